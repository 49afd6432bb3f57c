//! Linear undo/redo history over document snapshots.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A linear undo/redo container over snapshots of `T`.
///
/// `past` is ordered oldest to most recent, `future` nearest to furthest.
/// Every frame is an independent clone, so mutating the present never
/// changes a stored frame. The history is unbounded: undoing after `n`
/// pushes restores each earlier present exactly, for any `n`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History<T: Clone> {
    past: Vec<T>,
    present: T,
    future: VecDeque<T>,
}

impl<T: Clone> History<T> {
    /// Create a history with an initial present and empty stacks.
    pub fn new(initial: T) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            future: VecDeque::new(),
        }
    }

    /// The current snapshot.
    pub fn present(&self) -> &T {
        &self.present
    }

    /// Commit a new snapshot.
    ///
    /// The old present moves onto `past` and `future` is discarded: once a
    /// new change is made, redo is no longer available.
    pub fn push(&mut self, value: T) {
        let previous = std::mem::replace(&mut self.present, value);
        self.past.push(previous);
        self.future.clear();
    }

    /// Step back to the previous snapshot.
    ///
    /// Returns true if a step was taken, false if `past` was empty.
    pub fn undo(&mut self) -> bool {
        match self.past.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.present, previous);
                self.future.push_front(current);
                true
            }
            None => false,
        }
    }

    /// Step forward to the next snapshot.
    ///
    /// Returns true if a step was taken, false if `future` was empty.
    pub fn redo(&mut self) -> bool {
        match self.future.pop_front() {
            Some(next) => {
                let current = std::mem::replace(&mut self.present, next);
                self.past.push(current);
                true
            }
            None => false,
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_history() {
        let history = History::new(0);
        assert_eq!(*history.present(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_restores_previous_present() {
        let mut history = History::new("a".to_string());
        history.push("b".to_string());

        assert!(history.can_undo());
        assert!(history.undo());
        assert_eq!(history.present(), "a");
        assert!(history.can_redo());
    }

    #[test]
    fn test_redo_restores_undone_present() {
        let mut history = History::new("a".to_string());
        history.push("b".to_string());
        history.undo();

        assert!(history.redo());
        assert_eq!(history.present(), "b");
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }

    #[test]
    fn test_push_discards_future() {
        let mut history = History::new(1);
        history.push(2);
        history.push(3);
        history.undo();
        assert!(history.can_redo());

        // A new change after undo discards the redo branch.
        history.push(4);
        assert!(!history.can_redo());
        assert_eq!(*history.present(), 4);

        history.undo();
        assert_eq!(*history.present(), 2);
    }

    #[test]
    fn test_undo_redo_empty_stacks_are_noops() {
        let mut history = History::new(7);
        assert!(!history.undo());
        assert_eq!(*history.present(), 7);
        assert!(!history.redo());
        assert_eq!(*history.present(), 7);
    }

    #[test]
    fn test_deep_undo_walks_back_in_order() {
        let mut history = History::new(0);
        for i in 1..=10 {
            history.push(i);
        }
        for expected in (0..10).rev() {
            assert!(history.undo());
            assert_eq!(*history.present(), expected);
        }
        assert!(!history.can_undo());

        for expected in 1..=10 {
            assert!(history.redo());
            assert_eq!(*history.present(), expected);
        }
        assert!(!history.can_redo());
    }

    #[test]
    fn test_frames_are_independent_values() {
        let mut history = History::new(vec![1, 2, 3]);
        let mut next = history.present().clone();
        next.push(4);
        history.push(next);

        // Mutating the new present must not have touched the stored frame.
        history.undo();
        assert_eq!(*history.present(), vec![1, 2, 3]);
    }
}
