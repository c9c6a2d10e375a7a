mod common;

use common::{ink, sample_strand};
use proptest::prelude::*;
use pxtext::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Horizontal),
        Just(Direction::Sideways),
        Just(Direction::SidewaysRight),
    ]
}

fn bounding() -> impl Strategy<Value = BoundingMode> {
    prop_oneof![
        Just(BoundingMode::LogicalBounding),
        Just(BoundingMode::NoDescLogicalBounding),
        Just(BoundingMode::MaskBounding),
        Just(BoundingMode::NoDescMaskBounding),
    ]
}

fn text() -> impl Strategy<Value = String> {
    proptest::collection::vec("[ABHILOTagpy ]{1,6}", 1..4).prop_map(|lines| lines.join("\n"))
}

// Property: a single line drawn Left at x and Right at x + width is pixel
// identical
proptest! {
    #[test]
    fn prop_left_right_pixel_identical(
        line in "[ABHILOTgy. ]{1,8}",
        scale in 1u32..3,
        mode in bounding(),
    ) {
        let mut r = Renderer::new(sample_strand());
        r.set_scale(scale).unwrap();
        r.set_bounding_mode(mode);
        r.set_align(HorzAlign::Left);
        let (w, _) = r.measure(&line);

        let mut left = Bitmap::new(120, 40);
        r.draw(&mut left, &line, 4, 30);
        r.set_align(HorzAlign::Right);
        let mut right = Bitmap::new(120, 40);
        r.draw(&mut right, &line, 4 + w as i32, 30);
        prop_assert_eq!(left, right);
    }
}

// Property: under both mask modes the measured box is exactly the drawn ink
proptest! {
    #[test]
    fn prop_mask_bounds_equal_ink(
        text in text(),
        scale in 1u32..3,
        dir in direction(),
        no_desc in any::<bool>(),
    ) {
        prop_assume!(text.chars().any(|c| !c.is_whitespace()));
        let mut r = Renderer::new(sample_strand());
        r.set_scale(scale).unwrap();
        r.set_direction(dir);
        r.set_bounding_mode(if no_desc {
            BoundingMode::NoDescMaskBounding
        } else {
            BoundingMode::MaskBounding
        });
        r.set_align(Align::CENTER);

        let mut target = Bitmap::new(240, 240);
        let drawn = r.draw(&mut target, &text, 120, 120);
        let lit = ink(&target);
        prop_assert_eq!(drawn, lit);
        prop_assert_eq!(r.measure(&text), (lit.width() as u32, lit.height() as u32));
    }
}

// Property: logical bounding height is lines times line height times scale
proptest! {
    #[test]
    fn prop_logical_height(text in text(), scale in 1u32..4) {
        let mut r = Renderer::new(sample_strand());
        r.set_scale(scale).unwrap();
        let lines = text.split('\n').count() as u32;
        let line_height = pxtext::sample::METRICS.line_height() as u32;
        prop_assert_eq!(r.measure(&text).1, lines * line_height * scale);
    }
}

// Property: sideways directions swap width and height
proptest! {
    #[test]
    fn prop_sideways_swaps(text in text(), dir in direction()) {
        let mut r = Renderer::new(sample_strand());
        let (w, h) = r.measure(&text);
        r.set_direction(dir);
        let expected = if dir.is_vertical() { (h, w) } else { (w, h) };
        prop_assert_eq!(r.measure(&text), expected);
    }
}

// Property: Over at full coverage is idempotent on whole draws
proptest! {
    #[test]
    fn prop_opaque_over_idempotent(text in text(), c in any::<[u8; 3]>()) {
        let mut r = Renderer::new(sample_strand());
        r.set_color(Color::rgb(c[0], c[1], c[2]));
        r.set_align(Align::CENTER);
        let mut target = Bitmap::filled(120, 60, Color::rgb(9, 9, 9));
        r.draw(&mut target, &text, 60, 30);
        let once = target.clone();
        r.draw(&mut target, &text, 60, 30);
        prop_assert_eq!(target, once);
    }
}
