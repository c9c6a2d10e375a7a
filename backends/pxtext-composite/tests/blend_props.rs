use proptest::prelude::*;

use pxtext_composite::blend::blend;
use pxtext_composite::{Compositor, MaskDrawParams};
use pxtext_core::{Bitmap, BlendMode, Color, GlyphId, GlyphMask, Raster};

fn color() -> impl Strategy<Value = Color> {
    any::<[u8; 4]>().prop_map(Color::from_array)
}

fn coverage() -> impl Strategy<Value = f32> {
    (0u8..=255).prop_map(|c| c as f32 / 255.0)
}

// Property: Replace twice is the same as Replace once
proptest! {
    #[test]
    fn prop_replace_idempotent(dst in color(), src in color(), a in coverage()) {
        let once = blend(dst, src, a, BlendMode::Replace);
        prop_assert_eq!(blend(once, src, a, BlendMode::Replace), once);
    }
}

// Property: Over at full coverage twice is the same as once
proptest! {
    #[test]
    fn prop_opaque_over_idempotent(dst in color(), src in color()) {
        let once = blend(dst, src, 1.0, BlendMode::Over);
        prop_assert_eq!(blend(once, src, 1.0, BlendMode::Over), once);
    }
}

// Property: Add then Sub restores channels that did not saturate
proptest! {
    #[test]
    fn prop_add_sub_restores(dst in color(), src in color(), a in coverage()) {
        let added = blend(dst, src, a, BlendMode::Add);
        let restored = blend(added, src, a, BlendMode::Sub);
        let delta = |s: u8| (s as f32 / 255.0 * a * 255.0).round() as u16;
        let pairs = [(dst.r, restored.r, src.r), (dst.g, restored.g, src.g), (dst.b, restored.b, src.b)];
        for (before, after, s) in pairs {
            if before as u16 + delta(s) <= 255 {
                prop_assert_eq!(before, after);
            }
        }
        prop_assert_eq!(restored.a, dst.a);
    }
}

// Property: Cut never raises alpha and never touches color
proptest! {
    #[test]
    fn prop_cut_only_lowers_alpha(dst in color(), src in color(), a in coverage()) {
        let out = blend(dst, src, a, BlendMode::Cut);
        prop_assert!(out.a <= dst.a);
        prop_assert_eq!((out.r, out.g, out.b), (dst.r, dst.g, dst.b));
    }
}

// Property: drawing a mask lights exactly its scaled cells
proptest! {
    #[test]
    fn prop_draw_touches_covered_cells_only(
        cells in proptest::collection::vec(any::<bool>(), 9),
        scale in 1u32..4,
        x in -4i32..20,
        y in -4i32..20,
    ) {
        let rows: Vec<String> = cells
            .chunks(3)
            .map(|row| row.iter().map(|&on| if on { '#' } else { '.' }).collect())
            .collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let mask = GlyphMask::from_rows(GlyphId(1), 4, 0, -3, &rows);
        let mut target = Bitmap::new(16, 16);
        let params = MaskDrawParams { x, y, scale, ..Default::default() };
        Compositor::new().draw_mask(&mut target, &mask, &params);

        let s = scale as i32;
        for py in 0..16 {
            for px in 0..16 {
                let (tx, ty) = ((px - x).div_euclid(s), (py - y).div_euclid(s));
                let expected = mask.coverage(tx, ty) != 0;
                let lit = target.pixel(px, py).map_or(false, |c| c.a != 0);
                prop_assert_eq!(lit, expected, "pixel ({}, {})", px, py);
            }
        }
    }
}
