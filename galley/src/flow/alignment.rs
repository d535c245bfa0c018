// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slack distribution for closed lines.

use crate::itemize::{Item, ItemKind};
use crate::resolve::ResolvedStyle;
use crate::style::{Alignment, Brush};

use super::{BreakReason, LineMetrics};

/// Applies edge-space trimming and alignment to the items of a line being
/// closed, updating the metrics in place.
///
/// A single leading and a single trailing space are removed from
/// justification accounting by zeroing their widths; interior spaces are
/// untouched. Justification stretches every positive-width item so the
/// line fills its available width exactly, but only on soft wraps: lines
/// ended by an explicit break, and the final line, keep natural spacing.
/// Right and center alignment move slack into the indent on every close.
pub(crate) fn apply<B: Brush>(
    items: &mut [Item],
    styles: &[ResolvedStyle<B>],
    alignment: Alignment,
    break_reason: BreakReason,
    metrics: &mut LineMetrics,
) {
    if items.is_empty() {
        return;
    }

    // The leading space was already zeroed when it opened the line; the
    // trailing one is only known now. Zero-width trailers (break items,
    // end-of-node markers) don't count as the visual line end.
    if items.len() > 1 {
        for item in items.iter_mut().rev() {
            if item.width > 0. {
                if item.kind == ItemKind::Space {
                    metrics.advance -= item.width;
                    item.width = 0.;
                }
                break;
            }
        }
    }

    let slack = metrics.available - metrics.advance;
    match alignment {
        Alignment::Justified => {
            if break_reason == BreakReason::Regular && slack > 0. {
                let stretched = items.iter().filter(|item| item.width > 0.).count();
                if stretched > 0 {
                    let adjustment = slack / stretched as f32;
                    for item in items.iter_mut() {
                        if item.width > 0. {
                            item.width += adjustment;
                        }
                    }
                    metrics.advance = metrics.available;
                }
            }
        }
        Alignment::Right => {
            if slack > 0. {
                metrics.indent += slack;
            }
        }
        Alignment::Middle => {
            if slack > 0. {
                metrics.indent += slack * 0.5;
            }
        }
        Alignment::Left => {}
    }

    // Vertical metrics: tallest item sets the content height, the
    // line-height multiplier contributes leading on top of it. Glyphs
    // decide; spaces and breaks only count on lines that have no glyphs.
    metrics.content_height = 0.;
    metrics.leading = 0.;
    metrics.ascent = 0.;
    let mut have_metrics = false;
    for item in items.iter().filter(|item| item.kind == ItemKind::Glyph) {
        accumulate(metrics, item, styles);
        have_metrics = true;
    }
    if !have_metrics {
        for item in items.iter() {
            accumulate(metrics, item, styles);
        }
    }
}

fn accumulate<B: Brush>(metrics: &mut LineMetrics, item: &Item, styles: &[ResolvedStyle<B>]) {
    let height = item.height();
    metrics.content_height = metrics.content_height.max(height);
    metrics.ascent = metrics.ascent.max(item.ascent);
    let line_height = styles[item.style_index as usize].line_height;
    metrics.leading = metrics.leading.max(height * (line_height - 1.).max(0.));
}

/// Resolved alignment for a line: its first item's.
///
/// Mixing alignments on one line is a styling mistake; the first item wins
/// and the mix is reported through the log facade.
pub(crate) fn line_alignment<B: Brush>(
    items: &[Item],
    styles: &[ResolvedStyle<B>],
) -> Alignment {
    let Some(first) = items.first() else {
        return Alignment::default();
    };
    let alignment = styles[first.style_index as usize].alignment;
    if items
        .iter()
        .any(|item| styles[item.style_index as usize].alignment != alignment)
    {
        log::warn!(
            "line mixes alignments; using {alignment:?} from its first item"
        );
    }
    alignment
}
