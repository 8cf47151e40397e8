//! Deterministic match simulation for tuning the scaler.
//!
//! The harness plays the engine's side of the contract: it counts the clock
//! down in fixed ticks, reports readings, completes milestones at seeded
//! intervals, optionally grants the returned bonus, and calls the adjuster.
//! This makes it possible to:
//! - See when a given tuning lets a player reach the target score
//! - Compare tunings across seeds and player skill levels
//! - Record scenarios and replay them as regression fixtures

use std::path::Path;

use chrono::{DateTime, Utc};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError};
use crate::scaler::{DifficultyScaler, ScalerConfig};

/// Smallest clock step a scenario may advance per tick.
pub const MIN_TICK_MINUTES: f64 = 0.01;

/// Seed for deterministic random number generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulationSeed(pub u64);

impl SimulationSeed {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Generate a seed from a string (for named scenarios)
    pub fn from_string(s: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        Self(hasher.finish())
    }
}

impl Default for SimulationSeed {
    fn default() -> Self {
        Self(42)
    }
}

/// When the simulated engine calls the milestone-value adjuster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustCadence {
    EveryTick,
    AfterMilestone,
}

/// Simulation scenario definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationScenario {
    pub name: String,
    pub seed: SimulationSeed,
    /// Tuning the scaler is built with; the match starts at
    /// `scaler.visible_total_time` minutes.
    pub scaler: ScalerConfig,
    /// Clock minutes advanced per tick.
    pub tick_minutes: f64,
    /// Mean visible minutes between milestones; lower is a stronger player.
    pub mean_minutes_between_milestones: f64,
    /// Relative spread around the mean, 0.0 for a metronome player.
    pub jitter: f64,
    /// Whether the engine grants the bonus each milestone returns.
    pub apply_bonuses: bool,
    pub cadence: AdjustCadence,
    /// Hard stop on played minutes so generous tunings still terminate.
    pub max_minutes: f64,
}

impl SimulationScenario {
    pub fn new(name: impl Into<String>, seed: SimulationSeed) -> Self {
        Self {
            name: name.into(),
            seed,
            scaler: ScalerConfig::default(),
            tick_minutes: 1.0,
            mean_minutes_between_milestones: 8.0,
            jitter: 0.5,
            apply_bonuses: true,
            cadence: AdjustCadence::EveryTick,
            max_minutes: 2_000.0,
        }
    }

    pub fn with_scaler(mut self, scaler: ScalerConfig) -> Self {
        self.scaler = scaler;
        self
    }

    pub fn with_skill(mut self, mean_minutes_between_milestones: f64) -> Self {
        self.mean_minutes_between_milestones = mean_minutes_between_milestones;
        self
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_cadence(mut self, cadence: AdjustCadence) -> Self {
        self.cadence = cadence;
        self
    }

    pub fn with_bonuses(mut self, apply_bonuses: bool) -> Self {
        self.apply_bonuses = apply_bonuses;
        self
    }

    pub fn with_max_minutes(mut self, max_minutes: f64) -> Self {
        self.max_minutes = max_minutes;
        self
    }

    /// Match length in visible minutes.
    pub fn with_match_minutes(mut self, minutes: f64) -> Self {
        self.scaler.visible_total_time = minutes;
        self
    }

    /// Check that the scenario describes a match that terminates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };

        if !self.tick_minutes.is_finite() || self.tick_minutes < MIN_TICK_MINUTES {
            return Err(invalid(
                "tick_minutes",
                &format!("must be a finite number of at least {MIN_TICK_MINUTES}"),
            ));
        }
        if !self.mean_minutes_between_milestones.is_finite()
            || self.mean_minutes_between_milestones < 0.0
        {
            return Err(invalid(
                "mean_minutes_between_milestones",
                "must be a finite, non-negative number",
            ));
        }
        if !self.jitter.is_finite() {
            return Err(invalid("jitter", "must be a finite number"));
        }
        if !self.max_minutes.is_finite() || self.max_minutes < 0.0 {
            return Err(invalid("max_minutes", "must be a finite, non-negative number"));
        }
        if !self.scaler.visible_total_time.is_finite() {
            return Err(invalid("scaler.visible_total_time", "must be a finite number"));
        }
        self.scaler.validate()
    }
}

/// How a simulated match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    TargetReached,
    ClockExpired,
    MinuteCapReached,
}

/// One milestone in the simulated match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneTrace {
    pub minute: f64,
    pub value: i64,
    pub earned_score: f64,
    pub time_bonus: f64,
    pub remaining_after: f64,
    pub pace_ratio: f64,
}

/// Simulation metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationMetrics {
    pub milestones_completed: usize,
    pub final_score: f64,
    /// Visible minutes played when the target score was reached.
    pub target_reached_at_minute: Option<f64>,
    pub minutes_played: f64,
    pub total_bonus_minutes: f64,
    pub min_milestone_value: i64,
    pub max_milestone_value: i64,
    pub final_pace_ratio: f64,
}

/// Simulation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scenario: SimulationScenario,
    pub outcome: MatchOutcome,
    pub metrics: SimulationMetrics,
    pub trace: Vec<MilestoneTrace>,
    pub run_at: DateTime<Utc>,
}

/// Deterministic simulation harness
#[derive(Debug, Default)]
pub struct SimulationHarness {
    history: Vec<SimulationResult>,
}

impl SimulationHarness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play one match.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if the scenario fails
    /// [`SimulationScenario::validate`].
    pub fn run_scenario(
        &mut self,
        scenario: &SimulationScenario,
    ) -> Result<SimulationResult, CoreError> {
        scenario.validate()?;
        let result = play_match(scenario);
        self.history.push(result.clone());
        Ok(result)
    }

    /// Run a scenario once per variation.
    pub fn run_sweep(
        &mut self,
        base_scenario: &SimulationScenario,
        variations: Vec<ScenarioVariation>,
    ) -> Result<Vec<SimulationResult>, CoreError> {
        variations
            .into_iter()
            .map(|variation| {
                let scenario = variation.apply(base_scenario.clone());
                self.run_scenario(&scenario)
            })
            .collect()
    }

    pub fn history(&self) -> &[SimulationResult] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Export scenario to a JSON file
    pub fn export_scenario(
        scenario: &SimulationScenario,
        path: impl AsRef<Path>,
    ) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(scenario)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Import scenario from a JSON file, rejecting ones that cannot be played
    pub fn import_scenario(path: impl AsRef<Path>) -> Result<SimulationScenario, CoreError> {
        let json = std::fs::read_to_string(path)?;
        let scenario: SimulationScenario = serde_json::from_str(&json)?;
        scenario.validate()?;
        Ok(scenario)
    }
}

/// Scenario variation for parameter sweeps
#[derive(Debug, Clone)]
pub enum ScenarioVariation {
    Seed(SimulationSeed),
    /// Mean minutes between milestones
    Skill(f64),
    AdjustmentRate(f64),
    Cadence(AdjustCadence),
    Bonuses(bool),
}

impl ScenarioVariation {
    /// Apply the variation to a scenario
    pub fn apply(&self, mut scenario: SimulationScenario) -> SimulationScenario {
        match self {
            ScenarioVariation::Seed(seed) => scenario.seed = *seed,
            ScenarioVariation::Skill(mean) => scenario.mean_minutes_between_milestones = *mean,
            ScenarioVariation::AdjustmentRate(rate) => scenario.scaler.adjustment_rate = *rate,
            ScenarioVariation::Cadence(cadence) => scenario.cadence = *cadence,
            ScenarioVariation::Bonuses(apply) => scenario.apply_bonuses = *apply,
        }
        scenario
    }
}

fn next_gap(rng: &mut Mcg128Xsl64, scenario: &SimulationScenario) -> f64 {
    let jitter = scenario.jitter.clamp(0.0, 1.0);
    let spread = if jitter > 0.0 {
        rng.gen_range(-jitter..=jitter)
    } else {
        0.0
    };
    (scenario.mean_minutes_between_milestones * (1.0 + spread)).max(scenario.tick_minutes)
}

fn play_match(scenario: &SimulationScenario) -> SimulationResult {
    let mut rng = Mcg128Xsl64::seed_from_u64(scenario.seed.0);
    let mut scaler = DifficultyScaler::with_config(scenario.scaler.clone());
    let tick = scenario.tick_minutes;
    let target = scenario.scaler.target_score;

    let mut remaining = scaler.visible_time_remaining();
    let mut total = scaler.visible_total_time();
    let mut played = 0.0;
    let mut until_milestone = next_gap(&mut rng, scenario);
    let mut trace = Vec::new();
    let mut metrics = SimulationMetrics {
        min_milestone_value: scaler.milestone_value(),
        max_milestone_value: scaler.milestone_value(),
        ..SimulationMetrics::default()
    };

    let outcome = loop {
        if remaining <= 0.0 {
            break MatchOutcome::ClockExpired;
        }
        if played >= scenario.max_minutes {
            break MatchOutcome::MinuteCapReached;
        }

        let step = tick.min(remaining);
        remaining -= step;
        played += step;
        until_milestone -= step;
        scaler.set_visible_time(remaining, total);

        if until_milestone <= 0.0 {
            let value = scaler.milestone_value();
            let bonus = scaler.complete_milestone();
            if scenario.apply_bonuses {
                scaler.add_visible_time(bonus, true);
                remaining = scaler.visible_time_remaining();
                total = scaler.visible_total_time();
                metrics.total_bonus_minutes += bonus;
            }
            trace.push(MilestoneTrace {
                minute: played,
                value,
                earned_score: scaler.progress(),
                time_bonus: bonus,
                remaining_after: remaining,
                pace_ratio: scaler.pace_ratio(),
            });

            if scenario.cadence == AdjustCadence::AfterMilestone {
                scaler.update_milestone_value();
            }
            if scaler.progress() >= target {
                metrics.target_reached_at_minute = Some(played);
                break MatchOutcome::TargetReached;
            }
            until_milestone = next_gap(&mut rng, scenario);
        }

        if scenario.cadence == AdjustCadence::EveryTick {
            scaler.update_milestone_value();
        }
        let value = scaler.milestone_value();
        metrics.min_milestone_value = metrics.min_milestone_value.min(value);
        metrics.max_milestone_value = metrics.max_milestone_value.max(value);
    };

    metrics.milestones_completed = trace.len();
    metrics.final_score = scaler.progress();
    metrics.minutes_played = played;
    metrics.final_pace_ratio = scaler.pace_ratio();

    SimulationResult {
        scenario: scenario.clone(),
        outcome,
        metrics,
        trace,
        run_at: Utc::now(),
    }
}
