mod common;

use common::{ambiguous_font, bar_font, block_font, ink, renderer, sample_strand};
use pxtext::prelude::*;
use parking_lot::Mutex;
use pxtext::{sample, ConfigError, RewriteError, VariantFamily};
use std::sync::{Arc, Weak};

#[test]
fn two_lines_at_scale_two_are_48_high() {
    let mut r = renderer(block_font());
    r.set_scale(2).unwrap();
    r.set_align(VertAlign::Top | HorzAlign::Left);
    assert_eq!(r.measure("AB\nCD"), (20, 48));

    let mut target = Bitmap::new(40, 60);
    let drawn = r.draw(&mut target, "AB\nCD", 3, 4);
    assert_eq!(drawn, Rect::new(3, 4, 23, 52));
}

#[test]
fn sideways_swaps_measurement() {
    let mut r = Renderer::new(sample_strand());
    let (w, h) = r.measure("HELLO\nAB");
    for direction in [Direction::Sideways, Direction::SidewaysRight] {
        r.set_direction(direction);
        assert_eq!(r.measure("HELLO\nAB"), (h, w), "{direction}");
    }
}

#[test]
fn cap_line_anchor_puts_capitals_at_y() {
    let mut r = Renderer::new(sample_strand());
    r.set_align(VertAlign::CapLine | HorzAlign::Left);
    let mut target = Bitmap::new(20, 20);
    r.draw(&mut target, "H", 3, 10);
    assert_eq!(ink(&target), Rect::new(3, 10, 8, 17));
}

#[test]
fn unmapped_characters_draw_notdef() {
    let mut r = Renderer::new(sample_strand());
    r.set_align(VertAlign::Top | HorzAlign::Left);
    assert_eq!(r.measure("Z").0, 4);
    let mut target = Bitmap::new(10, 12);
    r.draw(&mut target, "Z", 0, 0);
    // Logical top sits one pixel of extra ascent above the cap line
    assert_eq!(ink(&target), Rect::new(0, 1, 4, 8));
}

#[test]
fn mask_alignment_ignores_trailing_advance() {
    let mut r = Renderer::new(sample_strand());
    r.set_bounding_mode(BoundingMode::MaskBounding);
    r.set_align(HorzAlign::Left);
    let (w, _) = r.measure("A ");
    assert_eq!(w, 5);

    let mut left = Bitmap::new(20, 20);
    r.draw(&mut left, "A ", 4, 15);
    r.set_align(HorzAlign::Right);
    let mut right = Bitmap::new(20, 20);
    r.draw(&mut right, "A ", 4 + w as i32, 15);
    assert_eq!(ink(&left), Rect::new(4, 8, 9, 15));
    assert_eq!(left, right);
}

#[test]
fn no_desc_mask_keeps_drawn_descenders() {
    let mut r = Renderer::new(sample_strand());
    r.set_bounding_mode(BoundingMode::NoDescMaskBounding);
    r.set_align(VertAlign::Top | HorzAlign::Left);
    let mut target = Bitmap::new(20, 20);
    let drawn = r.draw(&mut target, "gy", 2, 2);
    assert_eq!(drawn, ink(&target));
    assert_eq!(drawn, Rect::new(2, 2, 13, 9));
}

#[test]
fn huge_wrap_width_keeps_one_line() {
    let r = Renderer::new(sample_strand());
    assert_eq!(r.measure_with_wrap("AB AB", u32::MAX), r.measure("AB AB"));
}

#[test]
fn scale_beyond_limit_is_refused() {
    let mut r = Renderer::new(sample_strand());
    assert!(matches!(
        r.set_scale(1 << 31),
        Err(PxError::Config(ConfigError::InvalidScale))
    ));
    assert_eq!(r.measure("A"), Renderer::new(sample_strand()).measure("A"));
}

#[test]
fn wrapped_measurement() {
    let mut r = Renderer::new(sample_strand());
    assert_eq!(r.measure("AB AB"), (27, 11));
    assert_eq!(r.measure_with_wrap("AB AB", 20), (11, 22));
    r.set_scale(2).unwrap();
    assert_eq!(r.measure_with_wrap("AB AB", 40), (22, 44));

    r.set_wrap_width(Some(40));
    assert_eq!(r.measure("AB AB"), (22, 44));
}

#[test]
fn draw_with_wrap_matches_measure_with_wrap() {
    let mut r = Renderer::new(sample_strand());
    r.set_align(VertAlign::Top | HorzAlign::Left);
    let (w, h) = r.measure_with_wrap("ABC ABC ABC", 30);
    let mut target = Bitmap::new(64, 64);
    let drawn = r.draw_with_wrap(&mut target, "ABC ABC ABC", 0, 0, 30);
    assert_eq!(drawn, Rect::new(0, 0, w as i32, h as i32));
    assert!(ink(&target).width() <= 30);
}

#[test]
fn paragraph_breaks_space_out_blank_lines() {
    let mut r = Renderer::new(sample_strand());
    assert_eq!(r.measure("A\n\nB").1, 33);
    r.set_par_breaks(true);
    assert_eq!(r.measure("A\n\nB").1, 44);
    assert_eq!(r.measure("A\nB").1, 22);
}

#[test]
fn settings_change_drawn_pixels() {
    let strand = sample_strand();
    let r = Renderer::new(Arc::clone(&strand));
    let draw = || {
        let mut target = Bitmap::new(4, 7);
        r.draw(&mut target, "0", 0, 7);
        target
    };
    let plain = draw();
    assert_eq!(plain.pixel(2, 2), Some(Color::TRANSPARENT));

    strand.set_setting(sample::ZERO, 1).unwrap();
    let slashed = draw();
    assert_eq!(slashed.pixel(2, 2), Some(Color::white()));
    assert_ne!(plain.data(), slashed.data());
}

#[test]
fn rule_alternatives_follow_settings() {
    let strand = sample_strand();
    let r = Renderer::new(Arc::clone(&strand));
    // heart is 7 wide
    assert_eq!(r.measure("<3").0, 7);
    strand.set_setting(sample::EMOJI, 1).unwrap();
    // `<` (3) + interspacing + `3` (5)
    assert_eq!(r.measure("<3").0, 9);
}

#[test]
fn ambiguous_catalog_is_refused() {
    let err = Strand::new(Arc::new(ambiguous_font())).unwrap_err();
    assert!(err.rule().is_some_and(|rule| rule.starts_with("'<' '3'")));
}

#[test]
fn failed_activation_keeps_previous_rules() {
    let strand = Strand::without_rules(Arc::new(ambiguous_font()));
    assert!(strand.active_rewrite_rules().is_empty());

    strand.set_rewrite_rule_enabled(0, true).unwrap();
    let before = strand.active_rewrite_rules();

    let err = strand.set_rewrite_rule_enabled(1, true).unwrap_err();
    assert!(matches!(
        err,
        PxError::Rewrite(RewriteError::AmbiguousRules {
            rule_index: 0,
            other_index: 1,
            ..
        })
    ));
    assert_eq!(strand.active_rewrite_rules(), before);

    // Rule 1 stayed disabled, so the independent rule 2 can join
    strand.set_rewrite_rule_enabled(2, true).unwrap();
    assert_eq!(strand.active_rewrite_rules().indices(), vec![0, 2]);
    let heart = strand.find_glyph("heart").unwrap();
    let excl = strand.find_glyph("!").unwrap();
    assert_eq!(strand.resolve("<3!!"), vec![heart, excl]);
}

#[test]
fn activation_is_idempotent() {
    let strand = sample_strand();
    let first = strand.active_rewrite_rules();
    strand.activate_rewrite_rules().unwrap();
    strand.activate_rewrite_rules().unwrap();
    assert_eq!(strand.active_rewrite_rules(), first);
}

#[test]
fn pickers_choose_on_every_request() {
    let strand = Strand::new(Arc::new(bar_font())).unwrap();
    let family = strand.font().glyph_id('x').unwrap();
    let narrow = strand.find_glyph("x.narrow").unwrap();
    let wide = strand.find_glyph("x.wide").unwrap();

    // Without a picker the first candidate always wins
    assert_eq!(strand.load_mask(family).unwrap().glyph, narrow);
    assert_eq!(strand.load_mask(family).unwrap().glyph, narrow);

    strand.clear_mask_cache();
    strand.add_glyph_picker(Box::new(CyclingPicker::new()));
    assert_eq!(strand.load_mask(family).unwrap().glyph, narrow);
    assert_eq!(strand.load_mask(family).unwrap().glyph, wide);
    assert_eq!(strand.load_mask(family).unwrap().glyph, narrow);

    // Cached under the concrete glyphs, never under the family
    let stats = strand.cache_stats();
    assert_eq!((stats.misses, stats.hits, stats.size), (2, 1, 2));
}

#[test]
fn picked_layout_draws_what_it_measured() {
    let strand = Strand::new(Arc::new(bar_font())).unwrap();
    strand.add_glyph_picker(Box::new(CyclingPicker::new()));
    let mut r = Renderer::new(Arc::clone(&strand));
    r.set_align(VertAlign::Top | HorzAlign::Left);

    // narrow, wide, narrow then wide, narrow, wide
    assert_eq!(r.measure("xxx"), (8, 5));
    assert_eq!(r.measure("xxx"), (10, 5));

    let layout = r.layout("xxx", None);
    let mut target = Bitmap::new(16, 8);
    let drawn = r.draw_layout(&mut target, &layout, 1, 1);
    assert_eq!(drawn, layout.bounds().translate(1, 1));
    let lit = ink(&target);
    assert_eq!((lit.min_x, lit.min_y), (1, 1));
    assert!(lit.max_x <= drawn.max_x);
}

/// Picks the last candidate after asking its strand about the same family
struct WidestPicker {
    strand: Weak<Strand>,
    seen: Arc<Mutex<Vec<Option<GlyphId>>>>,
}

impl GlyphPicker for WidestPicker {
    fn name(&self) -> &'static str {
        "widest"
    }

    fn handles(&self, _family: GlyphId, _variants: &VariantFamily) -> bool {
        true
    }

    fn pick(&mut self, family: GlyphId, candidates: &[GlyphId]) -> GlyphId {
        if let Some(strand) = self.strand.upgrade() {
            let inner = strand.load_mask(family).map(|mask| mask.glyph);
            self.seen.lock().push(inner);
            strand.add_glyph_picker(Box::new(CyclingPicker::new()));
        }
        candidates.last().copied().unwrap_or(GlyphId::MISSING)
    }
}

#[test]
fn pickers_may_call_back_into_their_strand() {
    let strand = Strand::new(Arc::new(bar_font())).unwrap();
    let family = strand.font().glyph_id('x').unwrap();
    let narrow = strand.find_glyph("x.narrow").unwrap();
    let wide = strand.find_glyph("x.wide").unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    strand.add_glyph_picker(Box::new(WidestPicker {
        strand: Arc::downgrade(&strand),
        seen: Arc::clone(&seen),
    }));

    assert_eq!(strand.load_mask(family).unwrap().glyph, wide);
    // The nested request skips the busy picker and falls to the next one
    assert_eq!(*seen.lock(), vec![Some(narrow)]);
    assert_eq!(format!("{strand:?}").matches("pickers: 2").count(), 1);
}

#[test]
fn restricted_picker_leaves_other_families_alone() {
    let strand = sample_strand();
    strand.add_glyph_picker(Box::new(CyclingPicker::for_families([GlyphId(1)])));
    let zero = strand.font().glyph_id('0').unwrap();
    let plain = strand.find_glyph("0.plain").unwrap();
    for _ in 0..3 {
        assert_eq!(strand.load_mask(zero).unwrap().glyph, plain);
    }
}

#[test]
fn replace_twice_equals_once() {
    let mut r = Renderer::new(sample_strand());
    r.set_blend_mode(BlendMode::Replace);
    r.set_color(Color::rgba(200, 10, 30, 180));
    let mut target = Bitmap::filled(40, 12, Color::rgb(5, 6, 7));
    r.draw(&mut target, "HELLO", 0, 9);
    let once = target.clone();
    r.draw(&mut target, "HELLO", 0, 9);
    assert_eq!(target, once);
}

#[test]
fn add_then_sub_restores_background() {
    let background = Color::rgb(100, 110, 120);
    let mut target = Bitmap::filled(40, 12, background);
    let mut r = Renderer::new(sample_strand());
    r.set_color(Color::rgb(50, 60, 70));

    r.set_blend_mode(BlendMode::Add);
    r.draw(&mut target, "HELLO", 0, 9);
    assert_eq!(target.pixel(0, 2), Some(Color::rgb(150, 170, 190)));
    r.set_blend_mode(BlendMode::Sub);
    r.draw(&mut target, "HELLO", 0, 9);
    assert_eq!(target, Bitmap::filled(40, 12, background));
}

#[test]
fn cut_erases_previous_text() {
    let mut r = Renderer::new(sample_strand());
    let mut target = Bitmap::new(40, 12);
    r.draw(&mut target, "HELLO", 0, 9);
    r.set_blend_mode(BlendMode::Cut);
    r.draw(&mut target, "HELLO", 0, 9);
    assert_eq!(ink(&target), Rect::default());
}

#[test]
fn single_masks_draw_with_renderer_params() {
    let mut r = Renderer::new(sample_strand());
    r.set_scale(2).unwrap();
    let a = r.strand().font().glyph_id('A').unwrap();
    let mask = r.load_mask(a).unwrap();
    let mut target = Bitmap::new(16, 16);
    let covered = r.draw_mask(&mut target, &mask, &r.mask_params(2, 15));
    assert_eq!(covered, Rect::new(2, 1, 12, 15));
    assert_eq!(ink(&target), covered);
}

#[test]
fn logical_canvas_projects_pixel_perfect() {
    let mut r = Renderer::new(sample_strand());
    r.set_align(VertAlign::Top | HorzAlign::Left);
    let (w, h) = r.measure("HI");
    let mut logical = Bitmap::new(w, h);
    r.draw(&mut logical, "HI", 0, 0);

    let (pw, ph) = (w * 3 + 2, h * 3 + 2);
    let mut physical = Bitmap::new(pw, ph);
    Projector::PixelPerfect.project(&logical, &mut physical);

    assert_eq!(physical.pixel(0, 0), Some(Color::black()));
    for v in 0..h as i32 {
        for u in 0..w as i32 {
            let (px, py) = (1 + u * 3 + 1, 1 + v * 3 + 1);
            assert_eq!(physical.pixel(px, py), logical.pixel(u, v));
            assert_eq!(Projector::PixelPerfect.remap(px, py, pw, ph, w, h), (u, v));
        }
    }
}
