//! Headless game runtime
//!
//! Bird body, pipe pool and field bounds with just enough physics to run a
//! session without an engine: gravity, constant pipe velocity, automatic
//! retirement of pipes that leave the field, and AABB overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::pool::SlotPool;
use super::runtime::Runtime;
use crate::tuning::Tuning;

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Tilt in degrees (negative = nose up)
    pub angle: f32,
    pub size: f32,
}

impl Bird {
    pub fn new(start: Vec2, size: f32) -> Self {
        Self {
            pos: start,
            vel: Vec2::ZERO,
            angle: 0.0,
            size,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Vertical centre
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size / 2.0
    }
}

/// Complete runtime state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    tuning: Tuning,
    pub bird: Bird,
    pub pipes: SlotPool,
    /// Score display text
    pub score_label: String,
    /// Flap cues played since the last reset
    pub flap_cues: u32,
}

impl World {
    pub fn new(tuning: Tuning) -> Self {
        let bird = Bird::new(tuning.bird.start, tuning.bird.size);
        let pipes = SlotPool::new(tuning.pool_capacity);
        Self {
            tuning,
            bird,
            pipes,
            score_label: "0".to_string(),
            flap_cues: 0,
        }
    }

    pub fn field(&self) -> Aabb {
        Aabb::field(self.tuning.field.width, self.tuning.field.height)
    }

    /// Integrate bird and pipes by `dt` seconds and retire pipes off the field
    pub fn step(&mut self, dt: f32) {
        let bird = &mut self.bird;
        bird.vel.y += self.tuning.bird.gravity * dt;
        bird.pos += bird.vel * dt;

        // Ease the nose back down toward the falling tilt
        let max_tilt = self.tuning.bird.max_tilt_deg;
        if bird.angle < max_tilt {
            bird.angle = (bird.angle + self.tuning.bird.tilt_rate_deg * dt).min(max_tilt);
        }

        self.pipes.integrate(dt);
        let field = self.field();
        self.pipes.retire_outside(&field, self.tuning.rows.pipe_size);
    }

    /// True while any part of the bird is inside the field
    pub fn bird_in_world(&self) -> bool {
        self.bird.bounds().intersects_field(&self.field())
    }

    /// True if the bird overlaps any live pipe
    pub fn bird_hits_obstacle(&self) -> bool {
        let bird = self.bird.bounds();
        let size = self.tuning.rows.pipe_size;
        self.pipes
            .iter_active()
            .any(|(_, pipe)| bird.overlaps(&Aabb::from_pos_size(pipe.pos, size)))
    }
}

impl Runtime for World {
    fn set_bird_velocity_y(&mut self, vy: f32) {
        self.bird.vel.y = vy;
    }

    fn play_flap_cue(&mut self) {
        self.bird.angle = self.tuning.bird.flap_tilt_deg;
        self.flap_cues += 1;
    }

    fn halt_obstacles(&mut self) {
        self.pipes.halt();
    }

    fn place_obstacle(&mut self, pos: Vec2, vel: Vec2) -> bool {
        self.pipes.acquire(pos, vel).is_some()
    }

    fn set_score_label(&mut self, score: u64) {
        self.score_label = score.to_string();
    }

    fn restart_scene(&mut self) {
        self.pipes.clear();
    }

    fn reset_bird(&mut self) {
        self.bird = Bird::new(self.tuning.bird.start, self.tuning.bird.size);
        self.flap_cues = 0;
    }
}
