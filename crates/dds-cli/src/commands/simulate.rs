use std::path::PathBuf;

use clap::{Args, ValueEnum};
use dds_core::{AdjustCadence, Config, SimulationHarness, SimulationScenario, SimulationSeed};

#[derive(Clone, Copy, ValueEnum)]
pub enum Cadence {
    /// Adjust the milestone value on every clock tick
    EveryTick,
    /// Adjust only after each completed milestone
    AfterMilestone,
}

impl From<Cadence> for AdjustCadence {
    fn from(cadence: Cadence) -> Self {
        match cadence {
            Cadence::EveryTick => AdjustCadence::EveryTick,
            Cadence::AfterMilestone => AdjustCadence::AfterMilestone,
        }
    }
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Replay a scenario file instead of building one from flags
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Write the scenario that was played to this file
    #[arg(long)]
    export: Option<PathBuf>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Match length in visible minutes (defaults to the configured total)
    #[arg(long)]
    minutes: Option<f64>,
    /// Stop after this many played minutes, bonuses included
    #[arg(long, default_value_t = 2_000.0)]
    max_minutes: f64,
    /// Mean visible minutes between milestones
    #[arg(long, default_value_t = 8.0)]
    skill: f64,
    /// Relative spread of milestone timing (0.0-1.0)
    #[arg(long, default_value_t = 0.5)]
    jitter: f64,
    #[arg(long, value_enum, default_value_t = Cadence::EveryTick)]
    cadence: Cadence,
    /// Do not grant the time bonuses milestones return
    #[arg(long)]
    no_bonuses: bool,
    /// Include the per-milestone trace in the output
    #[arg(long)]
    trace: bool,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = match &args.scenario {
        Some(path) => SimulationHarness::import_scenario(path)?,
        None => {
            let config = Config::load()?;
            let scenario = SimulationScenario::new("cli", SimulationSeed::new(args.seed))
                .with_scaler(config.scaler)
                .with_skill(args.skill)
                .with_jitter(args.jitter)
                .with_cadence(args.cadence.into())
                .with_bonuses(!args.no_bonuses)
                .with_max_minutes(args.max_minutes);
            match args.minutes {
                Some(minutes) => scenario.with_match_minutes(minutes),
                None => scenario,
            }
        }
    };

    if let Some(path) = &args.export {
        SimulationHarness::export_scenario(&scenario, path)?;
    }

    let mut result = SimulationHarness::new().run_scenario(&scenario)?;
    if !args.trace {
        result.trace.clear();
    }
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
