//! Capabilities the session needs from the game runtime
//!
//! The session controller and row generator never touch sprites directly;
//! they issue requests through this trait. `World` is the headless
//! implementation used by the frame driver.

use glam::Vec2;

pub trait Runtime {
    /// Set the bird's vertical velocity (negative = up)
    fn set_bird_velocity_y(&mut self, vy: f32);
    /// Short nose-up animation cue after a flap
    fn play_flap_cue(&mut self);
    /// Stop horizontal motion of every live obstacle
    fn halt_obstacles(&mut self);
    /// Place one obstacle from the pool; `false` when the pool is exhausted
    fn place_obstacle(&mut self, pos: Vec2, vel: Vec2) -> bool;
    /// Update the score display
    fn set_score_label(&mut self, score: u64);
    /// Tear the scene down (all obstacles retired)
    fn restart_scene(&mut self);
    /// Put the bird back at its initial placement, at rest
    fn reset_bird(&mut self);
}
