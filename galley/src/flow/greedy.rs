// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking.

use crate::itemize::{Item, ItemKind, ItemSequence};
use crate::resolve::ResolvedStyle;
use crate::style::Brush;

use super::{alignment, BreakReason, ColumnRect, FlowLayout, Line, LineMetrics};

/// The line currently being filled.
#[derive(Clone, Copy, Default)]
struct LineState {
    /// Index of the line's first item.
    start: usize,
    /// Sum of layout widths appended so far.
    filled: f32,
    /// Opening indent.
    indent: f32,
    /// Width the line is broken against: column width minus indent.
    available: f32,
    open: bool,
}

/// Fill position within the column list.
#[derive(Clone, Copy, Default)]
struct ColumnCursor {
    index: usize,
    /// Height consumed by the lines committed to the current column.
    used: f32,
    /// Lines committed to the current column.
    lines: usize,
}

/// Flows an item sequence into the supplied columns.
///
/// A single left-to-right greedy pass: items accumulate on the current line
/// until one no longer fits, the line is closed (trimmed, aligned) without
/// it, and the item retries on a fresh line. Closing a line that would
/// overrun its column's height moves it to the top of the next column; when
/// columns run out the remaining items are left unplaced.
///
/// All arithmetic stays in `f32` with no per-item rounding, so re-running
/// the flow on unchanged inputs reproduces identical geometry.
pub fn flow<B: Brush>(sequence: ItemSequence<B>, columns: &[ColumnRect]) -> FlowLayout<B> {
    let ItemSequence { mut items, styles } = sequence;
    let mut lines = Vec::new();
    let mut cursor = ColumnCursor::default();
    let mut state = LineState::default();
    let mut needs_indent = true;
    let mut placed = items.len();

    let mut i = 0;
    while i < items.len() {
        if columns.is_empty() {
            placed = 0;
            break;
        }
        let style = &styles[items[i].style_index as usize];

        if !state.open {
            // A new line opens against the current column and consumes the
            // pending paragraph indent.
            let indent = if needs_indent {
                style.first_line_indent
            } else {
                0.
            };
            needs_indent = false;
            state = LineState {
                start: i,
                filled: 0.,
                indent,
                available: columns[cursor.index].width - indent,
                open: true,
            };
        }

        match items[i].kind {
            ItemKind::LineBreak => {
                // Explicit breaks close the line with natural spacing and
                // re-arm the paragraph indent.
                items[i].width = 0.;
                let end = i + 1;
                if !commit_line(
                    &mut items,
                    &styles,
                    &mut lines,
                    columns,
                    &state,
                    end,
                    BreakReason::Explicit,
                    &mut cursor,
                ) {
                    placed = state.start;
                    break;
                }
                state.open = false;
                needs_indent = true;
                i = end;
                continue;
            }
            ItemKind::EndOfNode => {
                items[i].width = 0.;
                i += 1;
                continue;
            }
            ItemKind::Space if i == state.start => {
                // Spaces never open a line visually.
                items[i].width = 0.;
                i += 1;
                continue;
            }
            _ => {}
        }

        let mut effective = items[i].advance * style.horizontal_scale;
        if items[i].kind == ItemKind::Glyph && effective > 0. {
            effective += style.letter_spacing;
        }

        if state.filled + effective <= state.available || i == state.start {
            // Fits, or is alone on the line and can never fit: either way
            // it lands here. Accepting the oversized case keeps the pass
            // making progress.
            items[i].width = effective;
            state.filled += effective;
            i += 1;
        } else {
            // Close without this item and retry it on a fresh line.
            if !commit_line(
                &mut items,
                &styles,
                &mut lines,
                columns,
                &state,
                i,
                BreakReason::Regular,
                &mut cursor,
            ) {
                placed = state.start;
                break;
            }
            state.open = false;
        }
    }

    if state.open && placed == items.len() {
        let end = items.len();
        if !commit_line(
            &mut items,
            &styles,
            &mut lines,
            columns,
            &state,
            end,
            BreakReason::None,
            &mut cursor,
        ) {
            placed = state.start;
        }
    }

    // Position pass: x runs from the final indent, which has absorbed any
    // right/center slack by now.
    for line in &lines {
        let mut x = line.metrics.indent;
        for item in &mut items[line.item_range.clone()] {
            item.x = x;
            x += item.width;
        }
    }

    FlowLayout {
        items,
        styles,
        lines,
        columns: columns.to_vec(),
        placed,
    }
}

/// Closes `state`'s line over `items[state.start..end]` and assigns it to a
/// column. Returns `false` when the column list is exhausted, in which case
/// the line is dropped and the flow stops.
fn commit_line<B: Brush>(
    items: &mut [Item],
    styles: &[ResolvedStyle<B>],
    lines: &mut Vec<Line>,
    columns: &[ColumnRect],
    state: &LineState,
    end: usize,
    break_reason: BreakReason,
    cursor: &mut ColumnCursor,
) -> bool {
    let line_items = &mut items[state.start..end];
    let alignment = alignment::line_alignment(line_items, styles);
    let mut metrics = LineMetrics {
        available: state.available,
        advance: state.filled,
        indent: state.indent,
        ..Default::default()
    };
    alignment::apply(line_items, styles, alignment, break_reason, &mut metrics);
    let height = metrics.height();

    // Column overflow: a line that would push the column past its height
    // budget becomes the first line of the next column instead. The moved
    // line is accepted there even when it is taller than the column, so a
    // single oversized line cannot cascade through every remaining column.
    if cursor.used + height > columns[cursor.index].height {
        cursor.index += 1;
        if cursor.index >= columns.len() {
            log::debug!("columns exhausted with items remaining");
            return false;
        }
        cursor.used = 0.;
        cursor.lines = 0;
    }

    metrics.top = cursor.used;
    lines.push(Line {
        column: cursor.index,
        index: cursor.lines,
        item_range: state.start..end,
        alignment,
        break_reason,
        metrics,
    });
    cursor.used += height;
    cursor.lines += 1;
    true
}
