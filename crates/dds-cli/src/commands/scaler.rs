use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use dds_core::{Config, DifficultyScaler, Event};

#[derive(Subcommand)]
pub enum ScalerAction {
    /// Print the diagnostics snapshot as JSON
    Status,
    /// Report both clock readings in minutes (total is applied first)
    SetTime {
        #[arg(allow_negative_numbers = true)]
        remaining: f64,
        #[arg(allow_negative_numbers = true)]
        total: f64,
    },
    /// Report minutes remaining on the clock
    SetRemaining {
        #[arg(allow_negative_numbers = true)]
        minutes: f64,
    },
    /// Report the clock's current ceiling
    SetTotal {
        #[arg(allow_negative_numbers = true)]
        minutes: f64,
    },
    /// Push minutes into the tracked clock
    AddTime {
        #[arg(allow_negative_numbers = true)]
        delta: f64,
        /// The adjustment came from the engine, not from a scaler reward
        #[arg(long)]
        no_ledger: bool,
    },
    /// Overwrite the earned score (negative values clamp to 0)
    SetProgress {
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },
    /// Bank a milestone and print the time bonus to grant
    Complete,
    /// Re-evaluate the milestone value against the pacing curve
    Update,
    /// Print the reward a milestone would earn right now
    Reward,
    /// Start a new match on the current clock ceiling
    Reset,
    /// Copy the current state to another snapshot file
    Save { path: PathBuf },
    /// Merge a snapshot file into the current state
    Load { path: PathBuf },
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(
    action: ScalerAction,
    state_override: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let state_path = match state_override {
        Some(path) => path,
        None => config.state_path()?,
    };

    let mut scaler: DifficultyScaler = config.scaler();
    scaler.load_state(&state_path)?;

    match action {
        ScalerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&scaler.game_state())?);
            return Ok(());
        }
        ScalerAction::Reward => {
            println!("{}", serde_json::json!({ "time_reward": scaler.calculate_time_reward() }));
            return Ok(());
        }
        ScalerAction::SetTime { remaining, total } => {
            scaler.set_visible_time(remaining, total);
            print_event(&clock_event(&scaler))?;
        }
        ScalerAction::SetRemaining { minutes } => {
            scaler.set_visible_time_remaining(minutes);
            print_event(&clock_event(&scaler))?;
        }
        ScalerAction::SetTotal { minutes } => {
            scaler.set_visible_total_time(minutes);
            print_event(&clock_event(&scaler))?;
        }
        ScalerAction::AddTime { delta, no_ledger } => {
            scaler.add_visible_time(delta, !no_ledger);
            print_event(&Event::TimeAdded {
                delta_minutes: delta,
                recorded_to_ledger: !no_ledger,
                remaining: scaler.visible_time_remaining(),
                awarded_time_ledger: scaler.awarded_time_ledger(),
                at: Utc::now(),
            })?;
        }
        ScalerAction::SetProgress { score } => {
            scaler.set_progress(score);
            print_event(&Event::ProgressSet {
                earned_score: scaler.progress(),
                at: Utc::now(),
            })?;
        }
        ScalerAction::Complete => {
            let milestone_value = scaler.milestone_value();
            let time_bonus = scaler.complete_milestone();
            print_event(&Event::MilestoneCompleted {
                milestone_value,
                earned_score: scaler.progress(),
                time_bonus,
                at: Utc::now(),
            })?;
        }
        ScalerAction::Update => {
            let from = scaler.milestone_value();
            let pace_ratio = scaler.pace_ratio();
            let to = scaler.update_milestone_value();
            print_event(&Event::MilestoneValueAdjusted {
                from,
                to,
                pace_ratio,
                at: Utc::now(),
            })?;
        }
        ScalerAction::Reset => {
            scaler.reset();
            print_event(&Event::MatchReset {
                visible_total_time: scaler.visible_total_time(),
                at: Utc::now(),
            })?;
        }
        ScalerAction::Save { path } => {
            scaler.save_state(&path)?;
            print_event(&Event::StateSaved {
                path: path.display().to_string(),
                at: Utc::now(),
            })?;
            return Ok(());
        }
        ScalerAction::Load { path } => {
            let found = scaler.load_state(&path)?;
            print_event(&Event::StateLoaded {
                path: path.display().to_string(),
                found,
                at: Utc::now(),
            })?;
        }
    }

    scaler.save_state(&state_path)?;
    Ok(())
}

fn clock_event(scaler: &DifficultyScaler) -> Event {
    Event::ClockUpdated {
        remaining: scaler.visible_time_remaining(),
        total: scaler.visible_total_time(),
        effective_total: scaler.effective_total(),
        at: Utc::now(),
    }
}
