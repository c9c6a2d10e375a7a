//! A plain RGBA8 raster

use crate::traits::Raster;
use crate::types::Rect;
use crate::Color;

/// Row-major straight RGBA8 pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Fully transparent bitmap
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let pixels = width as usize * height as usize;
        let data = color.to_array().repeat(pixels);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_array();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Paint `rect` with `color`, clipped to the bitmap
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let area = rect.intersect(&self.bounds());
        if area.is_empty() {
            return;
        }
        for y in area.min_y..area.max_y {
            for x in area.min_x..area.max_x {
                self.set_pixel(x, y, color);
            }
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }
}

impl Raster for Bitmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let i = self.offset(x, y)?;
        Some(Color::rgba(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + 4].copy_from_slice(&color.to_array());
        }
    }
}
