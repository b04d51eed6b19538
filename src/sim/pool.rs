//! Fixed-capacity arena of reusable obstacle slots
//!
//! A slot is either dead (inactive, reusable) or alive (placed and moving).
//! Acquisition always takes the first dead slot so reuse order is stable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// One pooled obstacle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleSlot {
    pub active: bool,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Obstacle arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotPool {
    slots: Vec<ObstacleSlot>,
}

impl SlotPool {
    /// Create a pool with every slot dead
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![ObstacleSlot::default(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    pub fn is_inactive(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| !s.active)
    }

    pub fn get(&self, index: usize) -> Option<&ObstacleSlot> {
        self.slots.get(index)
    }

    /// Reset the first dead slot to `pos`/`vel` and mark it alive.
    /// Returns `None` when every slot is in use.
    pub fn acquire(&mut self, pos: Vec2, vel: Vec2) -> Option<usize> {
        let index = self.slots.iter().position(|s| !s.active)?;
        let slot = &mut self.slots[index];
        slot.active = true;
        slot.pos = pos;
        slot.vel = vel;
        Some(index)
    }

    /// Mark a slot dead (no-op for unknown or already dead slots)
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.active = false;
        }
    }

    /// Kill every slot
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }

    /// Stop horizontal motion of every live slot
    pub fn halt(&mut self) {
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            slot.vel.x = 0.0;
        }
    }

    /// Move live slots by their velocity
    pub fn integrate(&mut self, dt: f32) {
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            slot.pos += slot.vel * dt;
        }
    }

    /// Kill live slots whose `size` box no longer touches `field`.
    /// Returns how many were retired.
    pub fn retire_outside(&mut self, field: &Aabb, size: f32) -> usize {
        let mut retired = 0;
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            if !Aabb::from_pos_size(slot.pos, size).intersects_field(field) {
                slot.active = false;
                retired += 1;
            }
        }
        retired
    }

    /// Live slots with their indices
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &ObstacleSlot)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_takes_first_dead_slot() {
        let mut pool = SlotPool::new(3);
        assert_eq!(pool.acquire(Vec2::ZERO, Vec2::ZERO), Some(0));
        assert_eq!(pool.acquire(Vec2::ZERO, Vec2::ZERO), Some(1));
        pool.release(0);
        assert!(pool.is_inactive(0));
        assert_eq!(pool.acquire(Vec2::new(5.0, 6.0), Vec2::X), Some(0));
        let slot = pool.get(0).unwrap();
        assert_eq!(slot.pos, Vec2::new(5.0, 6.0));
        assert_eq!(slot.vel, Vec2::X);
    }

    #[test]
    fn test_exhaustion_returns_none() {
        let mut pool = SlotPool::new(2);
        assert!(pool.acquire(Vec2::ZERO, Vec2::ZERO).is_some());
        assert!(pool.acquire(Vec2::ZERO, Vec2::ZERO).is_some());
        assert_eq!(pool.acquire(Vec2::ZERO, Vec2::ZERO), None);
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_retire_outside_field() {
        let field = Aabb::field(500.0, 600.0);
        let mut pool = SlotPool::new(4);
        pool.acquire(Vec2::new(400.0, 10.0), Vec2::new(-200.0, 0.0));
        pool.acquire(Vec2::new(-40.0, 70.0), Vec2::new(-200.0, 0.0));

        pool.integrate(0.1);
        // Second pipe is now at x = -60, fully off the left edge
        assert_eq!(pool.retire_outside(&field, 50.0), 1);
        assert_eq!(pool.active_count(), 1);
        assert!(pool.is_inactive(1));
    }

    #[test]
    fn test_halt_freezes_horizontal_motion() {
        let mut pool = SlotPool::new(2);
        pool.acquire(Vec2::new(400.0, 10.0), Vec2::new(-200.0, 0.0));
        pool.halt();
        pool.integrate(1.0);
        assert_eq!(pool.get(0).unwrap().pos, Vec2::new(400.0, 10.0));
    }

    #[test]
    fn test_release_out_of_range_is_noop() {
        let mut pool = SlotPool::new(1);
        pool.release(10);
        assert!(!pool.is_inactive(10));
        assert_eq!(pool.capacity(), 1);
    }
}
