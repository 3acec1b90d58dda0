//! Dirty region tracking for incremental rendering.
//!
//! Collects axis-aligned rectangles that need repainting between frames.

use crate::util::Rect;

/// Tracks dirty rectangles accumulated between renders.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    force_full: bool,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire surface as dirty. Clears any accumulated rectangles.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.regions.clear();
    }

    /// Adds a dirty rectangle if the tracker is not already full.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() || self.force_full {
            return;
        }
        self.regions.push(rect);
    }

    /// Adds a dirty rectangle when present.
    pub fn mark_optional_rect(&mut self, rect: Option<Rect>) {
        if let Some(rect) = rect {
            self.mark_rect(rect);
        }
    }

    /// Drains the dirty regions gathered so far.
    ///
    /// When the full surface is marked, returns a single rectangle covering the
    /// entire surface; otherwise returns accumulated rectangles.
    pub fn take_regions(&mut self, width: i32, height: i32) -> Vec<Rect> {
        if self.force_full {
            self.force_full = false;
            self.regions.clear();
            Rect::new(0, 0, width, height).into_iter().collect()
        } else {
            self.regions.drain(..).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_bounds_are_recorded() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_optional_rect(Rect::around_segment((0, 0), (10, 10), 3.0));

        let rects = tracker.take_regions(100, 100);
        assert_eq!(rects.len(), 1);
        assert!(rects[0].contains(10, 10));
        assert!(tracker.take_regions(100, 100).is_empty());
    }

    #[test]
    fn mark_full_takes_precedence() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_rect(Rect::new(5, 5, 10, 10).unwrap());
        tracker.mark_full();
        tracker.mark_rect(Rect::new(20, 20, 15, 15).unwrap());

        let rects = tracker.take_regions(200, 100);
        assert_eq!(rects, vec![Rect::new(0, 0, 200, 100).unwrap()]);
    }

    #[test]
    fn full_damage_on_empty_surface_yields_nothing() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_full();
        assert!(tracker.take_regions(0, 0).is_empty());
    }
}
