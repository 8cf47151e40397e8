//! # Dynamic Difficulty Scaler Core Library
//!
//! This library provides the pacing logic for a single-player game that
//! runs against a countdown clock. It decides how much a milestone is worth
//! and how many minutes completing one should add, based on how the
//! player's score compares with an intended pacing curve.
//!
//! ## Architecture
//!
//! - **Scaler**: A synchronous value object. The game engine owns the clock
//!   and pushes readings in; the scaler hands back adjustments
//! - **Storage**: JSON state snapshots and TOML-based configuration
//! - **Simulation**: Seeded match playback for comparing tunings
//!
//! ## Key Components
//!
//! - [`DifficultyScaler`]: Pacing state and calculators
//! - [`Config`]: Application configuration management
//! - [`SimulationHarness`]: Deterministic match simulation

pub mod error;
pub mod events;
pub mod scaler;
pub mod simulation;
pub mod storage;

pub use error::{ConfigError, CoreError, SnapshotError};
pub use events::Event;
pub use scaler::{DifficultyScaler, GameState, ScalerConfig, VisibleClock};
pub use simulation::{
    AdjustCadence, MatchOutcome, ScenarioVariation, SimulationHarness, SimulationResult,
    SimulationScenario, SimulationSeed, MIN_TICK_MINUTES,
};
pub use storage::{Config, PartialSnapshot, ScalerSnapshot};
