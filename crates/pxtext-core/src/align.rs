//! Text alignment relative to the draw origin
//!
//! An [`Align`] is a pair of independent axes. Values compose with `|`
//! (`VertAlign::Top | HorzAlign::Right`), and [`Align::apply`] changes only
//! the axes a patch names, so updating one axis never resets the other.

use crate::error::{ConfigError, PxError};
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// Horizontal anchor of each line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorzAlign {
    #[default]
    Left,
    HorzCenter,
    Right,
}

/// Vertical anchor of the text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertAlign {
    /// Top of the block's bounding box
    Top,
    /// Uppercase ascent above the first baseline
    CapLine,
    /// Lowercase ascent above the first baseline
    Midline,
    /// First baseline
    #[default]
    Baseline,
    /// Baseline of the last line
    LastBaseline,
    /// Middle of the block's bounding box
    VertCenter,
    /// Bottom of the block's bounding box
    Bottom,
}

/// Combined alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Align {
    horz: HorzAlign,
    vert: VertAlign,
}

impl Align {
    /// Centered on both axes
    pub const CENTER: Align = Align::new(VertAlign::VertCenter, HorzAlign::HorzCenter);

    pub const fn new(vert: VertAlign, horz: HorzAlign) -> Self {
        Self { horz, vert }
    }

    pub fn horz(&self) -> HorzAlign {
        self.horz
    }

    pub fn vert(&self) -> VertAlign {
        self.vert
    }

    /// Replace only the axes set in `patch`
    pub fn apply(self, patch: impl Into<AlignPatch>) -> Align {
        let patch = patch.into();
        Align {
            horz: patch.horz.unwrap_or(self.horz),
            vert: patch.vert.unwrap_or(self.vert),
        }
    }
}

/// A partial alignment: any axis left `None` is kept as it was
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AlignPatch {
    pub horz: Option<HorzAlign>,
    pub vert: Option<VertAlign>,
}

impl From<HorzAlign> for AlignPatch {
    fn from(horz: HorzAlign) -> Self {
        Self {
            horz: Some(horz),
            vert: None,
        }
    }
}

impl From<VertAlign> for AlignPatch {
    fn from(vert: VertAlign) -> Self {
        Self {
            horz: None,
            vert: Some(vert),
        }
    }
}

impl From<Align> for AlignPatch {
    fn from(align: Align) -> Self {
        Self {
            horz: Some(align.horz),
            vert: Some(align.vert),
        }
    }
}

impl BitOr<HorzAlign> for VertAlign {
    type Output = Align;

    fn bitor(self, horz: HorzAlign) -> Align {
        Align::new(self, horz)
    }
}

impl BitOr<VertAlign> for HorzAlign {
    type Output = Align;

    fn bitor(self, vert: VertAlign) -> Align {
        Align::new(vert, self)
    }
}

impl From<HorzAlign> for Align {
    fn from(horz: HorzAlign) -> Self {
        Align::default().apply(horz)
    }
}

impl From<VertAlign> for Align {
    fn from(vert: VertAlign) -> Self {
        Align::default().apply(vert)
    }
}

impl fmt::Display for HorzAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HorzAlign::Left => "Left",
            HorzAlign::HorzCenter => "HorzCenter",
            HorzAlign::Right => "Right",
        })
    }
}

impl fmt::Display for VertAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VertAlign::Top => "Top",
            VertAlign::CapLine => "CapLine",
            VertAlign::Midline => "Midline",
            VertAlign::Baseline => "Baseline",
            VertAlign::LastBaseline => "LastBaseline",
            VertAlign::VertCenter => "VertCenter",
            VertAlign::Bottom => "Bottom",
        })
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.vert, self.horz)
    }
}

impl FromStr for HorzAlign {
    type Err = PxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Left" => Ok(HorzAlign::Left),
            "HorzCenter" => Ok(HorzAlign::HorzCenter),
            "Right" => Ok(HorzAlign::Right),
            other => Err(ConfigError::unknown("horizontal align", other).into()),
        }
    }
}

impl FromStr for VertAlign {
    type Err = PxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Top" => Ok(VertAlign::Top),
            "CapLine" => Ok(VertAlign::CapLine),
            "Midline" => Ok(VertAlign::Midline),
            "Baseline" => Ok(VertAlign::Baseline),
            "LastBaseline" => Ok(VertAlign::LastBaseline),
            "VertCenter" => Ok(VertAlign::VertCenter),
            "Bottom" => Ok(VertAlign::Bottom),
            other => Err(ConfigError::unknown("vertical align", other).into()),
        }
    }
}

impl FromStr for Align {
    type Err = PxError;

    /// Accepts `Vert|Horz`, `Horz|Vert`, a single axis, or `Center`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut align = Align::default();
        for part in s.split('|').map(str::trim) {
            if part == "Center" {
                align = align.apply(Align::CENTER);
            } else if let Ok(horz) = part.parse::<HorzAlign>() {
                align = align.apply(horz);
            } else if let Ok(vert) = part.parse::<VertAlign>() {
                align = align.apply(vert);
            } else {
                return Err(ConfigError::unknown("align", s).into());
            }
        }
        Ok(align)
    }
}
