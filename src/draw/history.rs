//! Bounded snapshot history backing undo.

use super::surface::Snapshot;
use std::collections::VecDeque;

/// Maximum number of snapshots kept for undo.
pub const HISTORY_CAPACITY: usize = 10;

/// Ordered snapshots of the committed surface, oldest first.
///
/// The newest entry always represents "now"; undo drops it and restores the
/// one beneath. Pushing past [`HISTORY_CAPACITY`] evicts the oldest entry.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Appends a snapshot, evicting the oldest one when at capacity.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.entries.len() == HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Removes and returns the newest snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    /// Newest snapshot without removing it.
    pub fn top(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Undo needs a snapshot below the one representing the current state.
    pub fn can_undo(&self) -> bool {
        self.entries.len() > 1
    }

    /// Snapshots from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawStyle, DrawingSurface, FillColor, Layer, StrokeWidth, color::NEON_PURPLE};
    use crate::util::Point;

    /// Produces `count` distinct snapshots by drawing a dot further right each time.
    fn distinct_snapshots(count: usize) -> Vec<Snapshot> {
        let surface = DrawingSurface::new(count as i32 * 10 + 10, 10).unwrap();
        let style = DrawStyle::new(NEON_PURPLE, FillColor::NoFill, StrokeWidth::default());
        (0..count)
            .map(|i| {
                let x = i as f64 * 10.0 + 5.0;
                surface
                    .draw_line(
                        Point::new(x, 5.0),
                        Point::new(x + 1.0, 5.0),
                        &style,
                        Layer::Committed,
                    )
                    .unwrap();
                surface.snapshot().unwrap()
            })
            .collect()
    }

    #[test]
    fn push_never_exceeds_capacity() {
        let mut history = History::new();
        for (pushed, snapshot) in distinct_snapshots(25).into_iter().enumerate() {
            history.push(snapshot);
            assert_eq!(history.len(), (pushed + 1).min(HISTORY_CAPACITY));
        }
    }

    #[test]
    fn eleventh_push_evicts_the_oldest() {
        let snapshots = distinct_snapshots(HISTORY_CAPACITY + 1);
        let mut history = History::new();
        for snapshot in &snapshots[..HISTORY_CAPACITY] {
            history.push(snapshot.clone());
        }
        assert_eq!(history.iter().next(), Some(&snapshots[0]));

        history.push(snapshots[HISTORY_CAPACITY].clone());
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.iter().next(), Some(&snapshots[1]));
        assert_eq!(history.top(), Some(&snapshots[HISTORY_CAPACITY]));
    }

    #[test]
    fn pop_returns_newest_and_exposes_previous() {
        let snapshots = distinct_snapshots(3);
        let mut history = History::new();
        for snapshot in &snapshots {
            history.push(snapshot.clone());
        }

        assert_eq!(history.pop(), Some(snapshots[2].clone()));
        assert_eq!(history.top(), Some(&snapshots[1]));
        assert!(history.can_undo());

        history.pop();
        assert!(!history.can_undo());
        history.pop();
        assert!(history.is_empty());
        assert_eq!(history.pop(), None);
        assert_eq!(history.top(), None);
    }
}
