//! Glyph masks: the pixels of one concrete glyph
//!
//! Masks are created once and never mutated. Their rectangle is stored
//! relative to the glyph origin on the baseline, so a letter that rises seven
//! pixels has `rect.min_y == -7`. Constructors trim the data to the tight box
//! of non-transparent texels, which keeps mask bounding exact.

use crate::error::{ConfigError, Result};
use crate::types::{GlyphId, Rect};

/// Pixel layout of mask data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskFormat {
    /// One coverage byte per texel
    Alpha,
    /// Four straight RGBA bytes per texel
    Rgba,
}

impl MaskFormat {
    pub fn bytes_per_texel(self) -> usize {
        match self {
            MaskFormat::Alpha => 1,
            MaskFormat::Rgba => 4,
        }
    }
}

/// The bitmap of one concrete glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMask {
    pub glyph: GlyphId,
    /// Pen movement after this glyph, in font pixels
    pub advance: i32,
    rect: Rect,
    format: MaskFormat,
    data: Vec<u8>,
}

impl GlyphMask {
    /// A glyph that moves the pen but draws nothing
    pub fn empty(glyph: GlyphId, advance: i32) -> Self {
        Self {
            glyph,
            advance,
            rect: Rect::default(),
            format: MaskFormat::Alpha,
            data: Vec::new(),
        }
    }

    /// Coverage mask covering `rect`, one byte per texel in row order
    pub fn from_alpha(glyph: GlyphId, advance: i32, rect: Rect, data: Vec<u8>) -> Result<Self> {
        Self::with_format(glyph, advance, rect, MaskFormat::Alpha, data)
    }

    /// Color mask covering `rect`, four straight RGBA bytes per texel
    pub fn from_rgba(glyph: GlyphId, advance: i32, rect: Rect, data: Vec<u8>) -> Result<Self> {
        Self::with_format(glyph, advance, rect, MaskFormat::Rgba, data)
    }

    /// Alpha mask from text art: `#` is solid, `+` half covered, anything
    /// else empty. `top` is the row of the first line relative to the
    /// baseline.
    pub fn from_rows(glyph: GlyphId, advance: i32, left: i32, top: i32, rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let mut data = vec![0u8; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                data[y * width + x] = match ch {
                    '#' => 255,
                    '+' => 128,
                    _ => 0,
                };
            }
        }
        let rect = Rect::new(left, top, left + width as i32, top + height as i32);
        Self::trimmed(glyph, advance, rect, MaskFormat::Alpha, data)
    }

    fn with_format(
        glyph: GlyphId,
        advance: i32,
        rect: Rect,
        format: MaskFormat,
        data: Vec<u8>,
    ) -> Result<Self> {
        let expected = rect.width() as usize * rect.height() as usize * format.bytes_per_texel();
        if data.len() != expected {
            return Err(ConfigError::MaskDataLength {
                expected,
                actual: data.len(),
            }
            .into());
        }
        Ok(Self::trimmed(glyph, advance, rect, format, data))
    }

    fn trimmed(glyph: GlyphId, advance: i32, rect: Rect, format: MaskFormat, data: Vec<u8>) -> Self {
        let bpp = format.bytes_per_texel();
        let width = rect.width() as usize;
        let alpha_at = |x: usize, y: usize| data[(y * width + x) * bpp + bpp - 1];

        let mut tight: Option<(usize, usize, usize, usize)> = None;
        for y in 0..rect.height() as usize {
            for x in 0..width {
                if alpha_at(x, y) == 0 {
                    continue;
                }
                tight = Some(match tight {
                    None => (x, y, x + 1, y + 1),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
                });
            }
        }

        let Some((x0, y0, x1, y1)) = tight else {
            return Self::empty(glyph, advance);
        };
        if (x0, y0, x1, y1) == (0, 0, width, rect.height() as usize) {
            return Self {
                glyph,
                advance,
                rect,
                format,
                data,
            };
        }

        let mut cropped = Vec::with_capacity((x1 - x0) * (y1 - y0) * bpp);
        for y in y0..y1 {
            let start = (y * width + x0) * bpp;
            let end = (y * width + x1) * bpp;
            cropped.extend_from_slice(&data[start..end]);
        }
        Self {
            glyph,
            advance,
            rect: Rect::new(
                rect.min_x + x0 as i32,
                rect.min_y + y0 as i32,
                rect.min_x + x1 as i32,
                rect.min_y + y1 as i32,
            ),
            format,
            data: cropped,
        }
    }

    /// Tight box of visible texels, relative to the glyph origin
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn format(&self) -> MaskFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_blank(&self) -> bool {
        self.rect.is_empty()
    }

    /// Straight RGBA of the texel at origin-relative `(x, y)`
    ///
    /// Alpha masks report white with their coverage as alpha. Outside the
    /// mask everything is transparent.
    pub fn texel(&self, x: i32, y: i32) -> [u8; 4] {
        if !self.rect.contains(x, y) {
            return [0; 4];
        }
        let index = ((y - self.rect.min_y) * self.rect.width() + (x - self.rect.min_x)) as usize;
        match self.format {
            MaskFormat::Alpha => [255, 255, 255, self.data[index]],
            MaskFormat::Rgba => {
                let i = index * 4;
                [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
            }
        }
    }

    pub fn coverage(&self, x: i32, y: i32) -> u8 {
        self.texel(x, y)[3]
    }

    /// Visible texels as `(x, y, rgba)`, origin-relative, in row order
    pub fn texels(&self) -> impl Iterator<Item = (i32, i32, [u8; 4])> + '_ {
        let rect = self.rect;
        (rect.min_y..rect.max_y)
            .flat_map(move |y| (rect.min_x..rect.max_x).map(move |x| (x, y)))
            .map(|(x, y)| (x, y, self.texel(x, y)))
            .filter(|&(_, _, rgba)| rgba[3] != 0)
    }
}
