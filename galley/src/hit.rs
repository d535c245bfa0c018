// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing: from rendered geometry back to items and vice versa.

use peniko::kurbo::{Point, Rect};

use crate::flow::FlowLayout;
use crate::style::Brush;

impl<B: Brush> FlowLayout<B> {
    /// Global index of the line holding `item`, if it was placed.
    pub fn line_containing(&self, item: usize) -> Option<usize> {
        if item >= self.placed {
            return None;
        }
        // Lines partition the placed items in order.
        let at = self
            .lines
            .partition_point(|line| line.item_range.end <= item);
        self.lines
            .get(at)
            .filter(|line| line.item_range.contains(&item))
            .map(|_| at)
    }

    /// Column index and line-within-column of the line holding `item`.
    ///
    /// This is what groups a multi-line selection into one highlight
    /// rectangle per visual line.
    pub fn line_of(&self, item: usize) -> Option<(usize, usize)> {
        let line = &self.lines[self.line_containing(item)?];
        Some((line.column, line.index))
    }

    /// Axis-aligned box of a placed item, in its column's coordinates.
    ///
    /// The box spans the full line height including leading, so stacked
    /// boxes tile the column without gaps.
    pub fn item_box(&self, item: usize) -> Option<Rect> {
        let line = &self.lines[self.line_containing(item)?];
        let placed = &self.items[item];
        let top = f64::from(line.metrics.top);
        Some(Rect::new(
            f64::from(placed.x),
            top,
            f64::from(placed.x + placed.width),
            top + f64::from(line.metrics.height()),
        ))
    }

    /// Every placed item of `column` whose box intersects `rect`, in
    /// document order.
    ///
    /// A linear scan over the column's lines; per-column item counts are
    /// small enough that no spatial index is kept.
    pub fn items_under_rect(&self, column: usize, rect: Rect) -> Vec<usize> {
        let mut hits = Vec::new();
        for line in self.lines.iter().filter(|line| line.column == column) {
            let top = f64::from(line.metrics.top);
            let bottom = top + f64::from(line.metrics.height());
            if bottom < rect.y0 || top > rect.y1 {
                continue;
            }
            for index in line.item_range.clone() {
                let item = &self.items[index];
                let x0 = f64::from(item.x);
                let x1 = f64::from(item.x + item.width);
                if x1 >= rect.x0 && x0 <= rect.x1 {
                    hits.push(index);
                }
            }
        }
        hits
    }

    /// The single item under `point` in `column`, for cursor placement.
    ///
    /// Prefers the narrowest hit so zero-width markers sitting on a glyph
    /// edge don't shadow the glyph.
    pub fn item_at(&self, column: usize, point: Point) -> Option<usize> {
        let probe = Rect::new(point.x, point.y, point.x, point.y);
        self.items_under_rect(column, probe)
            .into_iter()
            .max_by(|a, b| {
                let wa = self.items[*a].width;
                let wb = self.items[*b].width;
                wa.total_cmp(&wb)
            })
    }

    /// Highlight rectangles for the selection spanning items
    /// `[first, last]` in document order (endpoints swapped if reversed).
    ///
    /// Produces one rectangle per visual line touched: a new rectangle
    /// starts whenever the column or line changes, otherwise the current
    /// one accumulates width.
    pub fn selection_geometry(&self, first: usize, last: usize) -> Vec<(usize, Rect)> {
        let (mut start, mut end) = (first, last);
        if start > end {
            core::mem::swap(&mut start, &mut end);
        }
        let end = end.min(self.placed.saturating_sub(1));

        let mut rects: Vec<(usize, Rect)> = Vec::new();
        let mut current: Option<(usize, usize, Rect)> = None;
        for index in start..=end {
            let Some(line_at) = self.line_containing(index) else {
                continue;
            };
            let line = &self.lines[line_at];
            let item = &self.items[index];
            let top = f64::from(line.metrics.top);
            let bottom = top + f64::from(line.metrics.height());
            let x0 = f64::from(item.x);
            let x1 = f64::from(item.x + item.width);
            match &mut current {
                Some((column, at, rect)) if *column == line.column && *at == line_at => {
                    rect.x1 = rect.x1.max(x1);
                }
                _ => {
                    if let Some((column, _, rect)) = current.take() {
                        rects.push((column, rect));
                    }
                    current = Some((line.column, line_at, Rect::new(x0, top, x1, bottom)));
                }
            }
        }
        if let Some((column, _, rect)) = current.take() {
            rects.push((column, rect));
        }
        rects
    }
}
