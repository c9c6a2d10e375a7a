//! Canvas Projector - logical canvas to physical screen and back
//!
//! Pixel art is drawn on a small logical canvas and shown on a much larger
//! physical target. Two policies decide how the canvas is fitted:
//!
//! - [`Projector::Proportional`] uses the largest real scale that fits, so
//!   the canvas fills as much of the target as possible. Pixels whose area
//!   straddles an edge are averaged by coverage, letterbox included.
//! - [`Projector::PixelPerfect`] uses the largest integer scale that fits
//!   (at least 1), so every logical pixel becomes a crisp square, with a
//!   solid border around it.
//!
//! [`Projector::remap`] goes the other way, turning a physical position
//! (a cursor, say) into the logical pixel under it.

use pxtext_core::{Color, Raster};

/// How a logical canvas sits on a physical target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Projector {
    #[default]
    Proportional,
    PixelPerfect,
}

/// Where the projected canvas lands, in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Physical pixels per logical pixel
    pub scale: f64,
    /// Top left corner of the canvas on the target
    pub x: f64,
    pub y: f64,
}

impl Projector {
    pub fn name(&self) -> &'static str {
        match self {
            Projector::Proportional => "proportional",
            Projector::PixelPerfect => "pixel-perfect",
        }
    }

    /// Fit of a `logical_w × logical_h` canvas on a `physical_w ×
    /// physical_h` target, or `None` when either size is degenerate
    pub fn placement(&self, logical_w: u32, logical_h: u32, physical_w: u32, physical_h: u32) -> Option<Placement> {
        if logical_w == 0 || logical_h == 0 || physical_w == 0 || physical_h == 0 {
            return None;
        }
        match self {
            Projector::Proportional => {
                let scale = (physical_w as f64 / logical_w as f64).min(physical_h as f64 / logical_h as f64);
                Some(Placement {
                    scale,
                    x: (physical_w as f64 - logical_w as f64 * scale) / 2.0,
                    y: (physical_h as f64 - logical_h as f64 * scale) / 2.0,
                })
            }
            Projector::PixelPerfect => {
                let (k, ox, oy) = integer_fit(logical_w, logical_h, physical_w, physical_h);
                Some(Placement {
                    scale: k as f64,
                    x: ox as f64,
                    y: oy as f64,
                })
            }
        }
    }

    /// Project with a black letterbox
    pub fn project(&self, logical: &dyn Raster, physical: &mut dyn Raster) {
        self.project_with_border(logical, physical, Color::black());
    }

    /// Draw `logical` onto the whole of `physical`, filling the area the
    /// canvas does not cover with `border`
    pub fn project_with_border(&self, logical: &dyn Raster, physical: &mut dyn Raster, border: Color) {
        let (lw, lh) = (logical.width(), logical.height());
        let (pw, ph) = (physical.width(), physical.height());
        let Some(placement) = self.placement(lw, lh, pw, ph) else {
            log::debug!("{}: skipping degenerate projection {lw}x{lh} -> {pw}x{ph}", self.name());
            return;
        };
        log::debug!(
            "{}: {lw}x{lh} -> {pw}x{ph} at scale {:.3}",
            self.name(),
            placement.scale
        );
        match self {
            Projector::Proportional => project_area(logical, physical, &placement, border),
            Projector::PixelPerfect => project_nearest(logical, physical, border),
        }
    }

    /// Logical pixel under physical position `(x, y)`
    ///
    /// `from_*` is the physical size, `to_*` the logical one. Positions off
    /// the canvas clamp to the nearest edge pixel; degenerate sizes give
    /// `(0, 0)`.
    pub fn remap(&self, x: i32, y: i32, from_w: u32, from_h: u32, to_w: u32, to_h: u32) -> (i32, i32) {
        if from_w == 0 || from_h == 0 || to_w == 0 || to_h == 0 {
            return (0, 0);
        }
        let (lx, ly) = match self {
            Projector::Proportional => {
                let Some(p) = self.placement(to_w, to_h, from_w, from_h) else {
                    return (0, 0);
                };
                (
                    ((x as f64 + 0.5 - p.x) / p.scale).floor() as i32,
                    ((y as f64 + 0.5 - p.y) / p.scale).floor() as i32,
                )
            }
            Projector::PixelPerfect => {
                let (k, ox, oy) = integer_fit(to_w, to_h, from_w, from_h);
                ((x - ox).div_euclid(k), (y - oy).div_euclid(k))
            }
        };
        (lx.clamp(0, to_w as i32 - 1), ly.clamp(0, to_h as i32 - 1))
    }
}

/// Integer scale (at least 1) and centered offsets
fn integer_fit(logical_w: u32, logical_h: u32, physical_w: u32, physical_h: u32) -> (i32, i32, i32) {
    let k = (physical_w / logical_w).min(physical_h / logical_h).max(1) as i32;
    let ox = (physical_w as i32 - logical_w as i32 * k).div_euclid(2);
    let oy = (physical_h as i32 - logical_h as i32 * k).div_euclid(2);
    (k, ox, oy)
}

fn project_nearest(logical: &dyn Raster, physical: &mut dyn Raster, border: Color) {
    let (k, ox, oy) = integer_fit(logical.width(), logical.height(), physical.width(), physical.height());
    for py in 0..physical.height() as i32 {
        for px in 0..physical.width() as i32 {
            let u = (px - ox).div_euclid(k);
            let v = (py - oy).div_euclid(k);
            let color = logical.pixel(u, v).unwrap_or(border);
            physical.set_pixel(px, py, color);
        }
    }
}

/// Running premultiplied sum of weighted colors
#[derive(Default)]
struct Accum {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
    weight: f64,
}

impl Accum {
    fn add(&mut self, color: Color, weight: f64) {
        let alpha = color.a as f64 / 255.0 * weight;
        self.r += color.r as f64 * alpha;
        self.g += color.g as f64 * alpha;
        self.b += color.b as f64 * alpha;
        self.a += alpha;
        self.weight += weight;
    }

    fn finish(&self) -> Color {
        if self.a <= 0.0 || self.weight <= 0.0 {
            return Color::TRANSPARENT;
        }
        let channel = |sum: f64| (sum / self.a).round().clamp(0.0, 255.0) as u8;
        Color::rgba(
            channel(self.r),
            channel(self.g),
            channel(self.b),
            (self.a / self.weight * 255.0).round().clamp(0.0, 255.0) as u8,
        )
    }
}

fn project_area(logical: &dyn Raster, physical: &mut dyn Raster, placement: &Placement, border: Color) {
    let (lw, lh) = (logical.width() as f64, logical.height() as f64);
    let inv = 1.0 / placement.scale;

    for py in 0..physical.height() as i32 {
        let v0 = (py as f64 - placement.y) * inv;
        let v1 = (py as f64 + 1.0 - placement.y) * inv;
        for px in 0..physical.width() as i32 {
            let u0 = (px as f64 - placement.x) * inv;
            let u1 = (px as f64 + 1.0 - placement.x) * inv;
            let total = (u1 - u0) * (v1 - v0);

            // Entirely in the letterbox
            if u1 <= 0.0 || v1 <= 0.0 || u0 >= lw || v0 >= lh {
                physical.set_pixel(px, py, border);
                continue;
            }

            let mut acc = Accum::default();
            let mut inside = 0.0;
            let (first_u, last_u) = (u0.max(0.0).floor() as i32, u1.min(lw).ceil() as i32);
            let (first_v, last_v) = (v0.max(0.0).floor() as i32, v1.min(lh).ceil() as i32);
            for v in first_v..last_v {
                let h = (v1.min(v as f64 + 1.0) - v0.max(v as f64)).max(0.0);
                if h <= 0.0 {
                    continue;
                }
                for u in first_u..last_u {
                    let w = (u1.min(u as f64 + 1.0) - u0.max(u as f64)).max(0.0);
                    if w <= 0.0 {
                        continue;
                    }
                    if let Some(color) = logical.pixel(u, v) {
                        acc.add(color, w * h);
                        inside += w * h;
                    }
                }
            }
            let outside = total - inside;
            if outside > 1e-9 {
                acc.add(border, outside);
            }
            physical.set_pixel(px, py, acc.finish());
        }
    }
}
