//! Fixed timestep frame driver
//!
//! Serializes input callbacks, physics, collision checks and row timer
//! fires onto one logical thread, in that order, once per frame.

use super::session::{FlapController, SessionController, SessionPhase};
use super::world::World;
use crate::secs_to_ms;
use crate::tuning::Tuning;

/// Input events for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap key / pointer down
    pub flap: bool,
    /// Leave the frozen pose
    pub restart: bool,
    /// Idle/demo mode - autopilot flaps
    pub idle_mode: bool,
}

/// Runtime and session for one process
#[derive(Debug, Clone)]
pub struct Game {
    pub world: World,
    pub controller: FlapController,
    /// Finished play-throughs
    pub runs: u32,
    /// Score of the most recently finished play-through
    pub last_run_score: Option<u64>,
}

impl Game {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            world: World::new(tuning.clone()),
            controller: FlapController::new(tuning, seed),
            runs: 0,
            last_run_score: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.controller.phase()
    }

    pub fn score(&self) -> u64 {
        self.controller.score()
    }
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(game: &mut Game, input: &TickInput, dt: f32) {
    let Game {
        world, controller, ..
    } = game;

    // Input callbacks run before the frame update
    let flap = input.flap || (input.idle_mode && autopilot_wants_flap(world, controller));
    if flap {
        controller.on_input_impulse(world);
    }
    if input.restart {
        controller.request_restart(world);
    }

    world.step(dt);

    if controller.phase() != SessionPhase::Resetting {
        if !world.bird_in_world() {
            controller.on_out_of_bounds(world);
        } else if controller.phase() == SessionPhase::Alive && world.bird_hits_obstacle() {
            controller.on_collision(world);
        }
    }

    controller.advance_timer(world, secs_to_ms(dt));

    if controller.phase() == SessionPhase::Resetting {
        finish_run(game);
    }
}

/// Count the finished run and start the next one
fn finish_run(game: &mut Game) {
    game.runs += 1;
    let score = game.controller.score();
    game.last_run_score = Some(score);
    log::info!("Run {} scored {}", game.runs, score);
    game.controller.reset(&mut game.world);
}

/// Flap when falling below the centre of the most recent gap
fn autopilot_wants_flap(world: &World, controller: &FlapController) -> bool {
    if !controller.is_alive() || world.bird.vel.y <= 0.0 {
        return false;
    }
    let tuning = controller.tuning();
    let rows = &tuning.rows;
    let target_y = match controller.last_gap() {
        Some(gap) => {
            // Open band between the pipe above the hole and the pipe below the gap
            let above = gap.hole as f32 - 1.0;
            let top = above * rows.spacing + rows.offset + rows.pipe_size;
            let bottom = gap.hole.saturating_add(gap.span) as f32 * rows.spacing + rows.offset;
            (top + bottom) / 2.0
        }
        None => tuning.field.height / 2.0,
    };
    world.bird.center_y() > target_y
}
