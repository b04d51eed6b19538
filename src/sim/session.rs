//! Session state machine
//!
//! Alive --collision--> Frozen --restart request--> Resetting --reset--> Alive
//! Alive --out of bounds--> Resetting
//!
//! A pipe hit freezes the field and leaves the score on screen; leaving the
//! world restarts at once. The row timer is stopped on both paths so no row
//! can be generated into a dead or reset session.

use serde::{Deserialize, Serialize};

use super::gap::Gap;
use super::generator::{RowGenerator, RowReport};
use super::runtime::Runtime;
use super::timer::RepeatingTimer;
use crate::tuning::Tuning;

/// Where the session is in its play-through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Bird flying, rows spawning
    Alive,
    /// Pipe hit: field halted, waiting for a restart request
    Frozen,
    /// Scene torn down, waiting for `reset`
    Resetting,
}

/// In-memory state of one play-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub alive: bool,
    /// Rows spawned since the last reset
    pub score: u64,
    pub timer: RepeatingTimer,
}

impl Session {
    pub fn new(period_ms: u32) -> Self {
        Self {
            alive: true,
            score: 0,
            timer: RepeatingTimer::new(period_ms),
        }
    }

    pub fn timer_active(&self) -> bool {
        self.timer.is_active()
    }
}

/// Callbacks the runtime dispatches into the session
pub trait SessionController {
    /// Row timer fired
    fn on_tick(&mut self, runtime: &mut dyn Runtime) -> Option<RowReport>;
    /// Flap key or pointer down
    fn on_input_impulse(&mut self, runtime: &mut dyn Runtime);
    /// Bird overlapped a pipe
    fn on_collision(&mut self, runtime: &mut dyn Runtime);
    /// Bird left the visible world
    fn on_out_of_bounds(&mut self, runtime: &mut dyn Runtime);
}

/// The one concrete session controller
#[derive(Debug, Clone)]
pub struct FlapController {
    tuning: Tuning,
    session: Session,
    phase: SessionPhase,
    generator: RowGenerator,
}

impl FlapController {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let session = Session::new(tuning.rows.period_ms);
        Self {
            tuning,
            session,
            phase: SessionPhase::Alive,
            generator: RowGenerator::new(seed),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.session.score
    }

    pub fn is_alive(&self) -> bool {
        self.session.alive
    }

    pub fn last_gap(&self) -> Option<Gap> {
        self.generator.last_gap()
    }

    /// Advance the row timer and spawn one row per fire
    pub fn advance_timer(&mut self, runtime: &mut dyn Runtime, dt_ms: f32) -> u32 {
        let fires = self.session.timer.advance(dt_ms);
        let mut rows = 0;
        for _ in 0..fires {
            if self.on_tick(runtime).is_some() {
                rows += 1;
            }
        }
        rows
    }

    /// Leave the frozen pose and tear the scene down
    pub fn request_restart(&mut self, runtime: &mut dyn Runtime) {
        if self.phase == SessionPhase::Frozen {
            self.session.timer.stop();
            self.phase = SessionPhase::Resetting;
            runtime.restart_scene();
            log::info!("Restart requested at score {}", self.session.score);
        }
    }

    /// Start a fresh play-through
    pub fn reset(&mut self, runtime: &mut dyn Runtime) {
        self.session.score = 0;
        self.session.alive = true;
        self.session.timer.restart();
        self.generator.clear();
        self.phase = SessionPhase::Alive;
        runtime.reset_bird();
        runtime.set_score_label(0);
        log::info!("Session reset");
    }
}

impl SessionController for FlapController {
    fn on_tick(&mut self, runtime: &mut dyn Runtime) -> Option<RowReport> {
        if !self.session.alive || !self.session.timer_active() {
            return None;
        }
        let report = self.generator.spawn_row(runtime, &self.tuning.rows);
        self.session.score += 1;
        runtime.set_score_label(self.session.score);
        log::debug!(
            "Row {} spawned: gap at {} (+{}), {} pipes",
            self.session.score,
            report.gap.hole,
            report.gap.span,
            report.placed
        );
        Some(report)
    }

    fn on_input_impulse(&mut self, runtime: &mut dyn Runtime) {
        if !self.session.alive {
            return;
        }
        runtime.set_bird_velocity_y(self.tuning.bird.flap_velocity);
        runtime.play_flap_cue();
    }

    fn on_collision(&mut self, runtime: &mut dyn Runtime) {
        if !self.session.alive {
            return;
        }
        self.session.alive = false;
        self.session.timer.stop();
        self.phase = SessionPhase::Frozen;
        runtime.halt_obstacles();
        log::info!("Hit a pipe at score {}", self.session.score);
    }

    fn on_out_of_bounds(&mut self, runtime: &mut dyn Runtime) {
        self.session.timer.stop();
        self.session.alive = false;
        self.phase = SessionPhase::Resetting;
        runtime.restart_scene();
        log::info!("Left the world at score {}", self.session.score);
    }
}
