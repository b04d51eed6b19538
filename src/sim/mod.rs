//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable slot order in the obstacle pool
//! - No rendering or platform dependencies

pub mod collision;
pub mod gap;
pub mod generator;
pub mod pool;
pub mod runtime;
pub mod session;
pub mod tick;
pub mod timer;
pub mod world;

pub use collision::Aabb;
pub use gap::{Gap, draw_gap};
pub use generator::{RowGenerator, RowReport};
pub use pool::{ObstacleSlot, SlotPool};
pub use runtime::Runtime;
pub use session::{FlapController, Session, SessionController, SessionPhase};
pub use tick::{Game, TickInput, tick};
pub use timer::RepeatingTimer;
pub use world::{Bird, World};
