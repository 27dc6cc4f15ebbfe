//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod camera;
pub mod decor;
pub mod level;
pub mod particles;
pub mod physics;
pub mod pickup;
pub mod state;
pub mod tick;

pub use camera::{Camera, VisibleArea};
pub use decor::Decorations;
pub use level::{DOOR_COLUMN, LEVEL_H, LEVEL_W, Tile, TileKind, TileMap, build_level};
pub use particles::{Particle, ParticleSystem};
pub use physics::{Facing, Player, StepOutcome};
pub use pickup::{Follower, PickupEvent, Progress, RescueMessage};
pub use state::{Game, GameMode, ProposalChoice, Session, proposal_buttons};
pub use tick::{TickInput, tick};
