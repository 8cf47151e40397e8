mod clock;
mod config;
mod engine;
pub mod pacing;
mod report;
pub mod reward;

pub use clock::{VisibleClock, EFFECTIVE_TOTAL_EPSILON};
pub use config::ScalerConfig;
pub use engine::DifficultyScaler;
pub use report::GameState;
pub use reward::LATE_GAME_OVERRIDE_MINUTES;
