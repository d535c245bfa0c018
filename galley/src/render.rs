// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emission of draw operations for a flowed layout.

use peniko::kurbo::{Affine, Point, Rect};

use crate::flow::{FlowLayout, Line};
use crate::font::GlyphId;
use crate::itemize::ItemKind;
use crate::style::Brush;

/// Underline offset below the baseline, as a fraction of font size.
const UNDERLINE_OFFSET: f32 = 0.12;
/// Decoration stroke thickness, as a fraction of font size.
const RULE_THICKNESS: f32 = 0.06;
/// Strike-through offset above the baseline, as a fraction of font size.
const STRIKETHROUGH_OFFSET: f32 = 0.28;

/// Receiver of draw operations for one flowed layout.
///
/// Implemented by the host's paint backend. Coordinates arrive in surface
/// space: column-local geometry offset by the column origins the caller
/// supplies.
pub trait RenderSurface<B: Brush> {
    /// Paints one glyph outline with the given placement transform.
    fn fill_glyph(&mut self, outline: GlyphId, transform: Affine, brush: &B);

    /// Paints a horizontal decoration rule (underline or strike-through).
    fn rule(&mut self, from: Point, to: Point, thickness: f32, brush: &B);

    /// Paints a selection highlight rectangle.
    fn highlight(&mut self, rect: Rect);
}

impl<B: Brush> FlowLayout<B> {
    /// Emits the whole layout to `surface`: one glyph fill per placed
    /// glyph, plus merged decoration rules per line.
    ///
    /// `origins` maps each column's local coordinates into surface space
    /// and must supply one origin per column. Any rounding for crisp
    /// output belongs to the surface; the layout hands over unrounded
    /// floats.
    pub fn render(&self, origins: &[Point], surface: &mut impl RenderSurface<B>) {
        for line in self.lines() {
            let Some(origin) = origins.get(line.column) else {
                continue;
            };
            self.render_line(line, *origin, surface);
        }
    }

    fn render_line(&self, line: &Line, origin: Point, surface: &mut impl RenderSurface<B>) {
        let baseline = origin.y + f64::from(line.metrics.baseline());
        for index in line.item_range.clone() {
            let item = &self.items[index];
            let style = self.style_of(item);
            if let (ItemKind::Glyph, Some(outline)) = (item.kind, item.outline) {
                // Translate to the glyph origin on the baseline, then apply
                // the style's horizontal stretch.
                let transform = Affine::translate((origin.x + f64::from(item.x), baseline))
                    * Affine::scale_non_uniform(f64::from(style.horizontal_scale), 1.);
                surface.fill_glyph(outline, transform, &style.brush);
            }
        }
        self.render_decorations(line, origin, baseline, surface);
    }

    /// Decoration rules, merged across consecutive same-styled items so a
    /// run of underlined glyphs produces one segment, not one per glyph.
    fn render_decorations(
        &self,
        line: &Line,
        origin: Point,
        baseline: f64,
        surface: &mut impl RenderSurface<B>,
    ) {
        let mut run: Option<(u16, f64, f64)> = None;
        for index in line.item_range.clone() {
            let item = &self.items[index];
            let style = self.style_of(item);
            let decorated = (style.underline || style.strikethrough)
                && item.kind != ItemKind::LineBreak
                && item.kind != ItemKind::EndOfNode;
            let x0 = origin.x + f64::from(item.x);
            let x1 = x0 + f64::from(item.width);
            match &mut run {
                Some((style_index, _, end)) if decorated && *style_index == item.style_index => {
                    *end = x1;
                }
                _ => {
                    if let Some(finished) = run.take() {
                        self.emit_rules(finished, baseline, surface);
                    }
                    if decorated {
                        run = Some((item.style_index, x0, x1));
                    }
                }
            }
        }
        if let Some(finished) = run.take() {
            self.emit_rules(finished, baseline, surface);
        }
    }

    fn emit_rules(
        &self,
        (style_index, x0, x1): (u16, f64, f64),
        baseline: f64,
        surface: &mut impl RenderSurface<B>,
    ) {
        let style = &self.styles[style_index as usize];
        let size = style.font_size;
        if style.underline {
            let y = baseline + f64::from(size * UNDERLINE_OFFSET);
            surface.rule(
                Point::new(x0, y),
                Point::new(x1, y),
                size * RULE_THICKNESS,
                &style.brush,
            );
        }
        if style.strikethrough {
            let y = baseline - f64::from(size * STRIKETHROUGH_OFFSET);
            surface.rule(
                Point::new(x0, y),
                Point::new(x1, y),
                size * RULE_THICKNESS,
                &style.brush,
            );
        }
    }

    /// Emits the highlight rectangles for a selection, offset into surface
    /// space by the per-column `origins`.
    pub fn render_selection(
        &self,
        first: usize,
        last: usize,
        origins: &[Point],
        surface: &mut impl RenderSurface<B>,
    ) {
        for (column, rect) in self.selection_geometry(first, last) {
            let Some(origin) = origins.get(column) else {
                continue;
            };
            surface.highlight(rect + origin.to_vec2());
        }
    }
}
