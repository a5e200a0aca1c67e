use chrono::NaiveDate;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::logic::FsLoader;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub level: u32,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

/// Everything one logic check needs for one iteration.
#[derive(Debug, Clone)]
pub struct LogicCtx<'a> {
    pub loader: &'a FsLoader,
    pub level: u32,
    pub seed: u64,
    pub today: NaiveDate,
}

pub type LogicCheck = fn(&LogicCtx<'_>) -> anyhow::Result<()>;

#[derive(Debug, Clone)]
pub struct LogicScenario {
    pub name: String,
    pub check: LogicCheck,
}

impl LogicScenario {
    pub fn new(name: impl Into<String>, check: LogicCheck) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

pub struct LogicTester {
    loader: FsLoader,
    today: NaiveDate,
    verbose: bool,
}

impl LogicTester {
    pub const fn new(loader: FsLoader, today: NaiveDate, verbose: bool) -> Self {
        Self {
            loader,
            today,
            verbose,
        }
    }

    /// Run `scenario` once per level, `iterations` times each.
    pub fn run_scenario(
        &self,
        scenario: &LogicScenario,
        levels: &[u32],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        levels
            .iter()
            .map(|&level| {
                if self.verbose {
                    println!(
                        "🧪 Testing scenario: {} (level {level})",
                        scenario.name.bright_white()
                    );
                }
                self.run_single_scenario(scenario, level, iterations)
            })
            .collect()
    }

    fn run_single_scenario(
        &self,
        scenario: &LogicScenario,
        level: u32,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let start_time = Instant::now();
            let ctx = LogicCtx {
                loader: &self.loader,
                level,
                seed: u64::try_from(i).unwrap_or(u64::MAX),
                today: self.today,
            };
            match (scenario.check)(&ctx) {
                Ok(()) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    if self.verbose {
                        println!("  ✅ Iteration {}/{iterations} passed ({duration:?})", i + 1);
                    }
                }
                Err(err) => {
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{iterations} failed: {}",
                            i + 1,
                            format!("{err:#}").red()
                        );
                    }
                    failures.push(format!("Iteration {} (level {level}): {err:#}", i + 1));
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name.clone(),
            level,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
            performance_data,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis_vec
            .into_iter()
            .map(|m| Duration::from_millis(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passes(_: &LogicCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn fails_above_two(ctx: &LogicCtx<'_>) -> anyhow::Result<()> {
        anyhow::ensure!(ctx.level <= 2, "level {} too high", ctx.level);
        Ok(())
    }

    fn tester() -> LogicTester {
        LogicTester::new(
            FsLoader::locate(None),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            false,
        )
    }

    #[test]
    fn one_result_per_level() {
        let results = tester().run_scenario(&LogicScenario::new("ok", passes), &[1, 2, 3], 2);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.passed && r.successful_iterations == 2));
        assert_eq!(results[2].level, 3);
    }

    #[test]
    fn failures_name_iteration_and_level() {
        let results =
            tester().run_scenario(&LogicScenario::new("cap", fails_above_two), &[2, 4], 1);
        assert!(results[0].passed);
        assert!(!results[1].passed);
        assert!(results[1].failures[0].contains("level 4"));
        assert_eq!(results[1].average_duration, Duration::ZERO);
    }

    #[test]
    fn results_serialize_durations_as_millis() {
        let results = tester().run_scenario(&LogicScenario::new("ok", passes), &[1], 1);
        let json = serde_json::to_value(&results[0]).unwrap();
        assert!(json["average_duration"].is_u64());
    }
}
