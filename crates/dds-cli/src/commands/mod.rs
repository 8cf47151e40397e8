pub mod config;
pub mod scaler;
pub mod simulate;
