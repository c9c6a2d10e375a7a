//! A tiny built-in pixel font
//!
//! Covers `A B C D E H I L O T X`, `a b g o p y`, `0 1 2 3`, space, `.`,
//! `!`, `<` and a `notdef` box. Good enough for demos, tests and benches:
//!
//! - `0` is a variant family driven by the [`ZERO`] setting
//!   (plain or slashed)
//! - the rule `<3` turns into a heart, unless [`EMOJI`] selects text
//! - `L` followed by `T` is kerned one pixel closer
//!
//! Metrics: ascent 7, extra ascent 1, cap line 7, midline 5, descent 2,
//! line gap 1, one pixel of interspacing. Line height is 11.

use crate::{BitmapFont, FontBuilder};
use pxtext_core::{Metrics, RewriteRule, Setting, SettingKey, VariantCandidate, NOTDEF};

/// Style of the digit zero: `plain` or `slashed`
pub const ZERO: SettingKey = SettingKey(0);
/// Rendering of `<3`: `glyph` (a heart) or `text`
pub const EMOJI: SettingKey = SettingKey(1);

pub const METRICS: Metrics = Metrics {
    ascent: 7,
    extra_ascent: 1,
    uppercase_ascent: 7,
    midline_ascent: 5,
    descent: 2,
    extra_descent: 0,
    line_gap: 1,
    horz_interspacing: 1,
};

/// Glyphs that reach the cap line
const TALL: &[(char, &[&str])] = &[
    ('A', &[".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('B', &["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."]),
    ('C', &[".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."]),
    ('D', &["####.", "#...#", "#...#", "#...#", "#...#", "#...#", "####."]),
    ('E', &["#####", "#....", "#....", "####.", "#....", "#....", "#####"]),
    ('H', &["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('I', &["###", ".#.", ".#.", ".#.", ".#.", ".#.", "###"]),
    ('L', &["#....", "#....", "#....", "#....", "#....", "#....", "#####"]),
    ('O', &[".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('T', &["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."]),
    ('X', &["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"]),
    ('1', &[".#.", "##.", ".#.", ".#.", ".#.", ".#.", "###"]),
    ('2', &[".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"]),
    ('3', &["####.", "....#", "....#", ".###.", "....#", "....#", "####."]),
    ('b', &["#....", "#....", "####.", "#...#", "#...#", "#...#", "####."]),
    ('!', &["#", "#", "#", "#", "#", ".", "#"]),
];

/// Glyphs that start at the midline; the tall ones reach into the descent
const SHORT: &[(char, &[&str])] = &[
    ('a', &[".###.", "....#", ".####", "#...#", ".####"]),
    ('o', &[".###.", "#...#", "#...#", "#...#", ".###."]),
    ('g', &[".####", "#...#", "#...#", "#...#", ".####", "....#", ".###."]),
    ('p', &["####.", "#...#", "#...#", "#...#", "####.", "#....", "#...."]),
    ('y', &["#...#", "#...#", "#...#", "#...#", ".####", "....#", ".###."]),
];

fn width(rows: &[&str]) -> i32 {
    rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32
}

/// Builder preloaded with the sample glyphs, ready for extra rules
pub fn builder() -> FontBuilder {
    let mut b = FontBuilder::new("pxtext-sample");
    b.metrics(METRICS);

    let notdef_rows = ["####", "#..#", "#..#", "#..#", "#..#", "#..#", "####"];
    b.add_glyph_rows(NOTDEF, 4, -7, &notdef_rows);

    for &(ch, rows) in TALL {
        let id = b.add_glyph_rows(&ch.to_string(), width(rows), -7, rows);
        b.map(ch, id);
    }
    for &(ch, rows) in SHORT {
        let id = b.add_glyph_rows(&ch.to_string(), width(rows), -5, rows);
        b.map(ch, id);
    }

    let space = b.add_blank("space", 3);
    b.map(' ', space).map('\t', space);
    let period = b.add_glyph_rows(".", 1, -1, &["#"]);
    b.map('.', period);
    let less = b.add_glyph_rows("<", 3, -6, &["..#", ".#.", "#..", ".#.", "..#"]);
    b.map('<', less);

    let heart_rows = [".##.##.", "#######", "#######", ".#####.", "..###..", "...#..."];
    let heart = b.add_glyph_rows("heart", 7, -6, &heart_rows);

    let plain_rows = [".##.", "#..#", "#..#", "#..#", "#..#", "#..#", ".##."];
    let slashed_rows = [".##.", "#..#", "#.##", "##.#", "#..#", "#..#", ".##."];
    let plain = b.add_glyph_rows("0.plain", 4, -7, &plain_rows);
    let slashed = b.add_glyph_rows("0.slashed", 4, -7, &slashed_rows);

    let zero = b.add_setting(Setting::new("zero", &["plain", "slashed"])).unwrap_or(ZERO);
    let emoji = b.add_setting(Setting::new("emoji", &["glyph", "text"])).unwrap_or(EMOJI);
    debug_assert_eq!((zero, emoji), (ZERO, EMOJI));

    let family = b.add_family(
        "0",
        vec![
            VariantCandidate::new(plain).when(zero, 0),
            VariantCandidate::new(slashed).when(zero, 1),
        ],
    );
    b.map('0', family);

    let three = b.glyph("3").unwrap_or(heart);
    b.add_rule(RewriteRule::literal("<3", vec![heart]).with_alternative(emoji, 1, vec![less, three]));

    if let (Some(l), Some(t)) = (b.glyph("L"), b.glyph("T")) {
        b.kern(l, t, -1);
    }
    b
}

/// The sample font itself
pub fn font() -> BitmapFont {
    builder().build()
}
