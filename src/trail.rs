//! Fixed-length position history used to draw motion streaks.

use glam::Vec2;
use std::collections::VecDeque;

/// Recent positions of a particle, newest first.
///
/// The length is fixed at creation and every slot starts at the spawn
/// position, so the trail is always full. Pushing evicts the oldest point.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<Vec2>,
}

impl Trail {
    /// Trail of `len` copies of `origin`. A length of 0 is treated as 1.
    pub fn new(origin: Vec2, len: usize) -> Self {
        let len = len.max(1);
        Self {
            points: std::iter::repeat(origin).take(len).collect(),
        }
    }

    /// Record `point` as the newest position and drop the oldest.
    pub fn push(&mut self, point: Vec2) {
        self.points.pop_back();
        self.points.push_front(point);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no positions are recorded. [`Trail::new`] always records at
    /// least one.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest recorded position: where the streak starts.
    pub fn oldest(&self) -> Vec2 {
        self.points.back().copied().unwrap_or(Vec2::ZERO)
    }

    /// Most recently recorded position.
    pub fn newest(&self) -> Vec2 {
        self.points.front().copied().unwrap_or(Vec2::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_full() {
        let t = Trail::new(Vec2::new(1.0, 2.0), 5);
        assert_eq!(t.len(), 5);
        assert!(t.iter().all(|p| *p == Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut t = Trail::new(Vec2::ZERO, 3);
        t.push(Vec2::new(1.0, 0.0));
        t.push(Vec2::new(2.0, 0.0));
        t.push(Vec2::new(3.0, 0.0));
        t.push(Vec2::new(4.0, 0.0));
        assert_eq!(t.len(), 3);
        assert_eq!(t.newest(), Vec2::new(4.0, 0.0));
        assert_eq!(t.oldest(), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_zero_length_clamped() {
        let t = Trail::new(Vec2::ONE, 0);
        assert_eq!(t.len(), 1);
        assert!(!t.is_empty());
    }
}
