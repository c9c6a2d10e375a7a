//! Per-pixel blend formulas
//!
//! All formulas work on straight (non-premultiplied) RGBA. `a` is the
//! effective source coverage in `0.0..=1.0`: mask coverage times color
//! alpha. Results are rounded to the nearest 8-bit value.

use pxtext_core::{BlendMode, Color};

#[inline]
fn unit(v: u8) -> f32 {
    v as f32 / 255.0
}

#[inline]
fn quantize(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[inline]
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Combine source color `src` at coverage `a` into `dst`
///
/// Zero coverage leaves the destination untouched for every mode.
pub fn blend(dst: Color, src: Color, a: f32, mode: BlendMode) -> Color {
    if a <= 0.0 {
        return dst;
    }
    let a = a.min(1.0);
    match mode {
        BlendMode::Over => over(dst, src, a),
        BlendMode::Replace => Color::rgba(src.r, src.g, src.b, quantize(a)),
        BlendMode::Cut => Color {
            a: dst.a.saturating_sub(quantize(a)),
            ..dst
        },
        BlendMode::Add => {
            let delta = |s: u8| quantize(unit(s) * a);
            Color {
                r: dst.r.saturating_add(delta(src.r)),
                g: dst.g.saturating_add(delta(src.g)),
                b: dst.b.saturating_add(delta(src.b)),
                a: dst.a,
            }
        }
        BlendMode::Sub => {
            let delta = |s: u8| quantize(unit(s) * a);
            Color {
                r: dst.r.saturating_sub(delta(src.r)),
                g: dst.g.saturating_sub(delta(src.g)),
                b: dst.b.saturating_sub(delta(src.b)),
                a: dst.a,
            }
        }
        BlendMode::Multiply => {
            let mul = |d: u8, s: u8| quantize(unit(d) * lerp(1.0, unit(s), a));
            Color {
                r: mul(dst.r, src.r),
                g: mul(dst.g, src.g),
                b: mul(dst.b, src.b),
                a: dst.a,
            }
        }
        BlendMode::Hue => hue(dst, src, a),
    }
}

/// Straight alpha "source over"
fn over(dst: Color, src: Color, a: f32) -> Color {
    let mix = |d: u8, s: u8| quantize(lerp(unit(d), unit(s), a));
    Color {
        r: mix(dst.r, src.r),
        g: mix(dst.g, src.g),
        b: mix(dst.b, src.b),
        a: quantize(a + unit(dst.a) * (1.0 - a)),
    }
}

type Rgb = [f32; 3];

fn lum(c: Rgb) -> f32 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn clip_color(c: Rgb) -> Rgb {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 {
        for v in &mut out {
            *v = l + (*v - l) * l / (l - n);
        }
    }
    if x > 1.0 {
        for v in &mut out {
            *v = l + (*v - l) * (1.0 - l) / (x - l);
        }
    }
    out
}

fn set_lum(c: Rgb, l: f32) -> Rgb {
    let d = l - lum(c);
    clip_color([c[0] + d, c[1] + d, c[2] + d])
}

fn sat(c: Rgb) -> f32 {
    c[0].max(c[1]).max(c[2]) - c[0].min(c[1]).min(c[2])
}

fn set_sat(c: Rgb, s: f32) -> Rgb {
    let min = c[0].min(c[1]).min(c[2]);
    let max = c[0].max(c[1]).max(c[2]);
    if max <= min {
        return [0.0; 3];
    }
    c.map(|v| (v - min) * s / (max - min))
}

/// Non-separable hue blend: source hue, destination saturation and
/// luminosity, faded in by coverage
fn hue(dst: Color, src: Color, a: f32) -> Color {
    let cb = [unit(dst.r), unit(dst.g), unit(dst.b)];
    let cs = [unit(src.r), unit(src.g), unit(src.b)];
    let mixed = set_lum(set_sat(cs, sat(cb)), lum(cb));
    Color {
        r: quantize(lerp(cb[0], mixed[0], a)),
        g: quantize(lerp(cb[1], mixed[1], a)),
        b: quantize(lerp(cb[2], mixed[2], a)),
        a: dst.a,
    }
}
