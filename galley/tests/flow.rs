// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flow engine tests.
//!
//! `TestFonts` metrics at the baseline size of 10: glyphs advance 5.0,
//! spaces 10/3, lines are 10 tall plus 2 of leading.

use galley::{
    flow, itemize, Alignment, BreakReason, ColumnRect, FlowLayout, ItemKind, ResolvedStyle,
    StyleProperty, StyleSheet,
};
use galley_dev::{plain_story, ColorBrush, TestFonts};

const EPS: f32 = 1e-3;

fn flow_text(text: &str, columns: &[ColumnRect]) -> FlowLayout<ColorBrush> {
    let fonts = TestFonts::new();
    let story = plain_story(fonts.font(), text);
    let sequence = itemize(
        &story,
        &StyleSheet::new(),
        &fonts,
        &ResolvedStyle::baseline(),
    )
    .expect("itemization should succeed");
    flow(sequence, columns)
}

#[test]
fn scenario_ab_cd_breaks_into_two_lines() {
    // "AB C" needs 5 + 5 + 10/3 + 5 units; "D" pushes past 20.
    let layout = flow_text("AB CD", &[ColumnRect::new(20., 100.)]);

    assert_eq!(layout.lines().len(), 2, "expected a break before D");
    let first = &layout.lines()[0];
    let second = &layout.lines()[1];
    assert_eq!(first.item_range, 0..4);
    assert_eq!(first.break_reason, BreakReason::Regular);
    assert_eq!(second.break_reason, BreakReason::None);

    // The wrapped line is justified to fill its width exactly.
    let sum: f32 = layout.items()[first.item_range.clone()]
        .iter()
        .map(|item| item.width)
        .sum();
    assert!(
        (sum - first.metrics.available).abs() < EPS,
        "justified line fills {} of {}",
        sum,
        first.metrics.available
    );

    // The final line keeps natural widths.
    let d = &layout.items()[second.item_range.start];
    assert_eq!(d.ch, Some('D'));
    assert!((d.width - 5.).abs() < EPS, "final line is not stretched");
}

#[test]
fn every_item_is_placed_exactly_once_in_document_order() {
    let layout = flow_text(
        "the quick brown fox jumps over the lazy dog",
        &[ColumnRect::new(60., 200.), ColumnRect::new(60., 200.)],
    );

    assert_eq!(layout.unplaced(), 0, "capacity is ample");
    let mut next = 0;
    for line in layout.lines() {
        assert_eq!(
            line.item_range.start, next,
            "lines must partition the items contiguously"
        );
        next = line.item_range.end;
    }
    assert_eq!(next, layout.items().len());
}

#[test]
fn justified_lines_fill_available_width_exactly() {
    let layout = flow_text(
        "one two three four five six seven eight",
        &[ColumnRect::new(47., 500.)],
    );

    assert!(layout.lines().len() > 2, "text should wrap several times");
    for line in layout.lines() {
        if line.break_reason != BreakReason::Regular {
            continue;
        }
        let sum: f32 = layout.items()[line.item_range.clone()]
            .iter()
            .map(|item| item.width)
            .sum();
        assert!(
            (sum - line.metrics.available).abs() < EPS,
            "line {:?} fills {} of {}",
            line.item_range,
            sum,
            line.metrics.available
        );
    }
}

#[test]
fn leading_space_is_zeroed_and_interior_space_is_kept() {
    let layout = flow_text(" A B", &[ColumnRect::new(100., 100.)]);

    assert_eq!(layout.lines().len(), 1);
    let items = layout.items();
    assert_eq!(items[0].kind, ItemKind::Space);
    assert_eq!(items[0].width, 0., "a space never opens a line visually");
    let interior = &items[2];
    assert_eq!(interior.kind, ItemKind::Space);
    assert!(
        (interior.width - 10. / 3.).abs() < EPS,
        "a single interior space keeps its width"
    );
}

#[test]
fn trailing_space_is_zeroed_past_end_markers() {
    let layout = flow_text("AB ", &[ColumnRect::new(100., 100.)]);

    let items = layout.items();
    let space = items
        .iter()
        .find(|item| item.kind == ItemKind::Space)
        .expect("text has a space");
    assert_eq!(
        space.width, 0.,
        "the trailing space is removed from accounting"
    );
}

#[test]
fn too_tall_line_moves_to_the_next_column() {
    // One line is 12 units tall; neither 10-unit column can hold it, but it
    // must land in column 1, not vanish.
    let layout = flow_text("A", &[ColumnRect::new(100., 10.), ColumnRect::new(100., 10.)]);

    assert_eq!(layout.unplaced(), 0);
    assert_eq!(layout.lines().len(), 1);
    let line = &layout.lines()[0];
    assert_eq!(line.column, 1, "the line overflows into the next column");
    assert_eq!(line.index, 0);
    assert_eq!(line.metrics.top, 0.);
}

#[test]
fn items_past_the_last_column_stay_unplaced() {
    // Each column holds exactly one 12-unit line; the third paragraph has
    // nowhere to go.
    let columns = [ColumnRect::new(100., 12.), ColumnRect::new(100., 12.)];
    let layout = flow_text("A\nB\nC", &columns);

    assert_eq!(layout.lines().len(), 2);
    assert_eq!(layout.lines()[0].column, 0);
    assert_eq!(layout.lines()[1].column, 1);
    assert_eq!(layout.unplaced(), 2, "C and the end marker do not fit");
    assert_eq!(
        layout.placed_items().len() + layout.unplaced(),
        layout.items().len()
    );
}

#[test]
fn explicit_breaks_keep_natural_spacing() {
    let layout = flow_text("AB\nCD", &[ColumnRect::new(50., 100.)]);

    let first = &layout.lines()[0];
    assert_eq!(first.break_reason, BreakReason::Explicit);
    for item in &layout.items()[first.item_range.clone()] {
        if item.kind == ItemKind::Glyph {
            assert!(
                (item.width - 5.).abs() < EPS,
                "break-ended lines are not justified"
            );
        }
    }
}

#[test]
fn first_line_indent_applies_at_paragraph_starts_only() {
    let fonts = TestFonts::new();
    let mut story = plain_story(fonts.font(), "AA BB\nCC");
    story.set_override(story.root(), StyleProperty::FirstLineIndent(4.));
    let sequence = itemize(
        &story,
        &StyleSheet::new(),
        &fonts,
        &ResolvedStyle::baseline(),
    )
    .unwrap();
    // Width 14: the indented first line holds only "AA".
    let layout = flow(sequence, &[ColumnRect::new(14., 100.)]);

    let lines = layout.lines();
    assert!(lines.len() >= 3);
    assert_eq!(lines[0].metrics.indent, 4., "paragraph start is indented");
    assert_eq!(lines[0].metrics.available, 10.);
    assert_eq!(lines[1].metrics.indent, 0., "soft wraps are not indented");
    let after_break = lines
        .iter()
        .find(|line| layout.items()[line.item_range.start].ch == Some('C'))
        .expect("the second paragraph has a line");
    assert_eq!(
        after_break.metrics.indent, 4.,
        "an explicit break re-arms the indent"
    );
}

#[test]
fn right_and_center_alignment_move_slack_into_the_indent() {
    for (alignment, expected_indent) in [(Alignment::Right, 10.), (Alignment::Middle, 5.)] {
        let fonts = TestFonts::new();
        let mut story = plain_story(fonts.font(), "AB");
        story.set_override(story.root(), StyleProperty::Alignment(alignment));
        let sequence = itemize(
            &story,
            &StyleSheet::new(),
            &fonts,
            &ResolvedStyle::baseline(),
        )
        .unwrap();
        let layout = flow(sequence, &[ColumnRect::new(20., 100.)]);

        let line = &layout.lines()[0];
        assert!(
            (line.metrics.indent - expected_indent).abs() < EPS,
            "{alignment:?} slack: indent {} != {expected_indent}",
            line.metrics.indent,
        );
        assert!(
            (layout.items()[0].x - expected_indent).abs() < EPS,
            "items shift with the indent"
        );
    }
}

#[test]
fn wrapped_space_does_not_open_the_next_line() {
    // Width 10 fits exactly "AB"; the space wraps and is zeroed, so "CD"
    // starts flush at the line edge.
    let layout = flow_text("AB CD", &[ColumnRect::new(10., 100.)]);

    let second = &layout.lines()[1];
    let space = &layout.items()[second.item_range.start];
    assert_eq!(space.kind, ItemKind::Space);
    assert_eq!(space.width, 0.);
    let c = &layout.items()[second.item_range.start + 1];
    assert_eq!(c.ch, Some('C'));
    assert_eq!(c.x, 0., "the wrapped space leaves no gap");
}

#[test]
fn reflow_of_unchanged_input_is_identical() {
    let fonts = TestFonts::new();
    let story = plain_story(fonts.font(), "the quick brown fox jumps");
    let columns = [ColumnRect::new(40., 60.), ColumnRect::new(40., 60.)];
    let sheet = StyleSheet::new();
    let base = ResolvedStyle::baseline();

    let first = flow(itemize(&story, &sheet, &fonts, &base).unwrap(), &columns);
    let second = flow(itemize(&story, &sheet, &fonts, &base).unwrap(), &columns);

    assert_eq!(first.lines(), second.lines());
    assert_eq!(first.items(), second.items());
}

#[test]
fn mixed_alignment_lines_take_the_first_items_alignment() {
    let fonts = TestFonts::new();
    let mut story = plain_story(fonts.font(), "AB");
    let right = story.add_node(story.root(), None);
    story.set_override(right, StyleProperty::Alignment(Alignment::Right));
    story.add_run(right, "CD");
    let sequence = itemize(
        &story,
        &StyleSheet::new(),
        &fonts,
        &ResolvedStyle::baseline(),
    )
    .unwrap();
    let layout = flow(sequence, &[ColumnRect::new(100., 100.)]);

    assert_eq!(layout.lines().len(), 1);
    assert_eq!(
        layout.lines()[0].alignment,
        Alignment::Justified,
        "the first item's alignment decides the line"
    );
}

#[test]
fn end_markers_never_join_justification() {
    let fonts = TestFonts::new();
    let mut story = plain_story(fonts.font(), "");
    let child = story.add_node(story.root(), None);
    story.add_run(child, "AA");
    story.add_run(story.root(), " BB CC");
    let sequence = itemize(
        &story,
        &StyleSheet::new(),
        &fonts,
        &ResolvedStyle::baseline(),
    )
    .unwrap();
    // The child's end marker sits mid-line when "AA" wraps away from "BB".
    let layout = flow(sequence, &[ColumnRect::new(16., 100.)]);

    let first = &layout.lines()[0];
    assert_eq!(first.break_reason, BreakReason::Regular);
    let line_items = &layout.items()[first.item_range.clone()];
    let marker = line_items
        .iter()
        .find(|item| item.kind == ItemKind::EndOfNode)
        .expect("the child's end marker rides the first line");
    assert_eq!(marker.width, 0., "markers take no justification slack");
    let sum: f32 = line_items.iter().map(|item| item.width).sum();
    assert!((sum - first.metrics.available).abs() < EPS);
}

#[test]
fn an_item_wider_than_its_column_is_accepted_not_looped() {
    // A single glyph is 5 wide; the column is narrower. The flow must
    // still place everything and terminate.
    let layout = flow_text("AB", &[ColumnRect::new(3., 100.)]);

    assert_eq!(layout.unplaced(), 0);
    assert_eq!(
        layout.lines().len(),
        2,
        "each oversized glyph gets its own line"
    );
}

#[test]
fn line_vertical_metrics_stack_within_a_column() {
    let layout = flow_text("AB\nCD\nEF", &[ColumnRect::new(50., 100.)]);

    let lines = layout.lines();
    assert_eq!(lines.len(), 3);
    for line in lines {
        assert!((line.metrics.content_height - 10.).abs() < EPS);
        assert!((line.metrics.leading - 2.).abs() < EPS);
        assert!((line.metrics.ascent - 8.).abs() < EPS);
    }
    assert_eq!(lines[0].metrics.top, 0.);
    assert!((lines[1].metrics.top - 12.).abs() < EPS);
    assert!((lines[2].metrics.top - 24.).abs() < EPS);
}
