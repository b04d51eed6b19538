//! Data-driven game balance
//!
//! Everything the session and row generator need to know about the field,
//! the bird and the obstacle rows. Loaded from JSON or built from presets.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the gap's first slot (the hole) is chosen for each row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GapPolicy {
    /// Hole drawn uniformly from `[min, max]`, regardless of row width.
    /// With narrow rows the gap can run past the last slot.
    FixedRange { min: u32, max: u32 },
    /// Hole drawn from `[1, row_capacity - gap_span - 1]` so the gap always
    /// fits with at least one pipe on each side.
    Scaled,
}

impl Default for GapPolicy {
    fn default() -> Self {
        GapPolicy::FixedRange {
            min: GAP_HOLE_MIN,
            max: GAP_HOLE_MAX,
        }
    }
}

impl GapPolicy {
    /// Inclusive hole range for a row of `capacity` slots with a gap of `span`
    pub fn hole_range(&self, capacity: u32, span: u32) -> (u32, u32) {
        match *self {
            GapPolicy::FixedRange { min, max } => (min, max),
            GapPolicy::Scaled => {
                let max = capacity.saturating_sub(span.saturating_add(1)).max(1);
                (1, max)
            }
        }
    }
}

/// Visible field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldTuning {
    pub width: f32,
    pub height: f32,
}

/// Bird body and flap response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirdTuning {
    /// Initial top-left placement
    pub start: Vec2,
    /// Square sprite edge
    pub size: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Vertical velocity set by a flap (negative = up)
    pub flap_velocity: f32,
    /// Tilt snapped to on flap (degrees, negative = nose up)
    pub flap_tilt_deg: f32,
    /// Tilt recovery while falling (degrees/s)
    pub tilt_rate_deg: f32,
    /// Tilt limit while falling (degrees)
    pub max_tilt_deg: f32,
}

/// Obstacle rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowTuning {
    /// Row generation period (ms)
    pub period_ms: u32,
    /// Slots per row
    pub row_capacity: u32,
    /// Consecutive slots left empty
    pub gap_span: u32,
    #[serde(default)]
    pub gap_policy: GapPolicy,
    /// Vertical distance between slots
    pub spacing: f32,
    /// Y of slot 0
    pub offset: f32,
    /// X where new pipes appear
    pub spawn_x: f32,
    /// Horizontal pipe velocity (negative = leftward)
    pub speed: f32,
    /// Square pipe sprite edge
    pub pipe_size: f32,
}

impl RowTuning {
    /// Placement position of slot `index`
    pub fn slot_position(&self, index: u32) -> Vec2 {
        Vec2::new(self.spawn_x, index as f32 * self.spacing + self.offset)
    }

    /// Velocity given to every new pipe
    pub fn pipe_velocity(&self) -> Vec2 {
        Vec2::new(self.speed, 0.0)
    }

    /// Inclusive range the hole is drawn from
    pub fn hole_range(&self) -> (u32, u32) {
        self.gap_policy.hole_range(self.row_capacity, self.gap_span)
    }
}

/// Complete game balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Run seed (None = derive from the clock)
    #[serde(default)]
    pub seed: Option<u64>,
    pub pool_capacity: usize,
    pub field: FieldTuning,
    pub bird: BirdTuning,
    pub rows: RowTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::classic()
    }
}

impl Tuning {
    /// The original 500x600 layout: ten slots, two-slot gap, hole in [1, 5]
    pub fn classic() -> Self {
        Self {
            seed: None,
            pool_capacity: POOL_CAPACITY,
            field: FieldTuning {
                width: FIELD_WIDTH,
                height: FIELD_HEIGHT,
            },
            bird: BirdTuning {
                start: Vec2::new(BIRD_START_X, BIRD_START_Y),
                size: BIRD_SIZE,
                gravity: BIRD_GRAVITY,
                flap_velocity: FLAP_VELOCITY,
                flap_tilt_deg: -20.0,
                tilt_rate_deg: 60.0,
                max_tilt_deg: 20.0,
            },
            rows: RowTuning {
                period_ms: ROW_PERIOD_MS,
                row_capacity: ROW_CAPACITY,
                gap_span: GAP_SPAN,
                gap_policy: GapPolicy::default(),
                spacing: ROW_SPACING,
                offset: ROW_OFFSET,
                spawn_x: PIPE_SPAWN_X,
                speed: PIPE_SPEED,
                pipe_size: PIPE_SIZE,
            },
        }
    }

    /// Layout derived from the rendering surface
    ///
    /// Row capacity follows the surface height in pipe-sized slots, pipes
    /// spawn at the right edge, and the bird keeps its relative placement.
    /// The pool grows with the number of rows that can be on screen at once.
    ///
    /// A row never has fewer than `GAP_SPAN + 3` slots; on surfaces shorter
    /// than that many pipes the spacing shrinks so the row still fits.
    pub fn scaled(width: f32, height: f32, pipe_size: f32) -> Self {
        let mut tuning = Self::classic();
        let pipe_size = pipe_size.max(1.0);
        let capacity = ((height / pipe_size).floor() as u32).max(GAP_SPAN + 3);
        let spacing = pipe_size.min(height / capacity as f32);

        tuning.field = FieldTuning { width, height };
        tuning.bird.start = Vec2::new(
            width * (BIRD_START_X / FIELD_WIDTH),
            height * (BIRD_START_Y / FIELD_HEIGHT),
        );
        tuning.rows.row_capacity = capacity;
        tuning.rows.spacing = spacing;
        tuning.rows.offset = 0.0;
        tuning.rows.spawn_x = width;
        tuning.rows.pipe_size = pipe_size;
        tuning.rows.gap_policy = GapPolicy::Scaled;

        // Rows alive at once: travel time across the field over the period
        let travel_ms = (width + pipe_size) / tuning.rows.speed.abs() * 1000.0;
        let rows_on_screen = (travel_ms / tuning.rows.period_ms as f32).ceil() as usize + 1;
        tuning.pool_capacity = rows_on_screen * capacity as usize;
        tuning
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(TuningError::Parse)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(TuningError::Io)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        serde_json::to_string_pretty(self).map_err(TuningError::Parse)
    }

    /// Reject configurations the session cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let rows = &self.rows;
        if rows.period_ms == 0 {
            return Err(TuningError::Invalid("row period must be > 0".into()));
        }
        if rows.row_capacity == 0 {
            return Err(TuningError::Invalid("row capacity must be > 0".into()));
        }
        if rows.gap_span >= rows.row_capacity {
            return Err(TuningError::Invalid(format!(
                "gap span {} must be smaller than row capacity {}",
                rows.gap_span, rows.row_capacity
            )));
        }
        if self.pool_capacity == 0 {
            return Err(TuningError::Invalid("pool capacity must be > 0".into()));
        }
        if self.field.width <= 0.0 || self.field.height <= 0.0 {
            return Err(TuningError::Invalid(format!(
                "field must have positive size, got {}x{}",
                self.field.width, self.field.height
            )));
        }
        if let GapPolicy::FixedRange { min, max } = rows.gap_policy {
            if min > max {
                return Err(TuningError::Invalid(format!(
                    "hole range [{min}, {max}] is empty"
                )));
            }
            if max >= rows.row_capacity {
                return Err(TuningError::Invalid(format!(
                    "hole range [{min}, {max}] must start inside a {}-slot row",
                    rows.row_capacity
                )));
            }
            if max.saturating_add(rows.gap_span) > rows.row_capacity {
                log::warn!(
                    "hole range [{}, {}] lets a {}-slot gap run past a {}-slot row",
                    min,
                    max,
                    rows.gap_span,
                    rows.row_capacity
                );
            }
        }
        Ok(())
    }
}

/// Tuning load/validation failure
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning: {e}"),
            TuningError::Parse(e) => write!(f, "malformed tuning JSON: {e}"),
            TuningError::Invalid(msg) => write!(f, "invalid tuning: {msg}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}
