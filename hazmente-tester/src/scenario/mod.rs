use anyhow::Result;
use chrono::NaiveDate;
use thirtyfour::prelude::*;

use crate::browser::UiDriver;
use crate::logic::{LogicCheck, LogicScenario};

pub mod checks;
pub mod onboarding;
pub mod session;
pub mod smoke;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub level: u32,
    /// Roster name typed on the onboarding keyboard.
    pub learner: Option<String>,
    pub today: NaiveDate,
    pub verbose: bool,
    pub ui: UiDriver<'a>,
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<LogicScenario>;
}

/// Scenario that only exercises the engine.
#[derive(Clone)]
pub struct LogicOnlyScenario {
    name: &'static str,
    check: LogicCheck,
    browser_message: &'static str,
}

impl LogicOnlyScenario {
    pub const fn new(name: &'static str, check: LogicCheck) -> Self {
        Self {
            name,
            check,
            browser_message: "Browser testing not implemented for this logic scenario",
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

#[async_trait::async_trait]
impl BrowserScenario for LogicOnlyScenario {
    async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
        anyhow::bail!(self.browser_message)
    }
}

impl CombinedScenario for LogicOnlyScenario {
    fn as_logic_scenario(&self) -> Option<LogicScenario> {
        Some(LogicScenario::new(self.name, self.check))
    }
}

/// Names `all` expands to, in run order.
pub const ALL_SCENARIOS: [&str; 7] = [
    "smoke",
    "onboarding",
    "catalog-levels",
    "session-walkthrough",
    "navigation",
    "content-documents",
    "profile-persistence",
];

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "onboarding" | "login" => Some(Box::new(onboarding::OnboardingScenario)),
        "session-walkthrough" | "session" => Some(Box::new(session::SessionScenario)),
        "catalog-levels" | "catalog" => Some(Box::new(LogicOnlyScenario::new(
            "Catalog Level Filter",
            checks::catalog_levels,
        ))),
        "navigation" | "jump" => Some(Box::new(LogicOnlyScenario::new(
            "Exercise Navigation",
            checks::navigation,
        ))),
        "content-documents" | "content" => Some(Box::new(LogicOnlyScenario::new(
            "Content Documents",
            checks::content_documents,
        ))),
        "profile-persistence" | "persistence" => Some(Box::new(LogicOnlyScenario::new(
            "Profile Persistence",
            checks::profile_persistence,
        ))),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "App boots; roster and catalog load"),
        ("onboarding", "Name and date wizard through to a stored profile"),
        ("catalog-levels", "Catalog filtered by learner level"),
        ("session-walkthrough", "Play every exercise; progress only grows"),
        ("navigation", "Jump between exercises and finish early"),
        ("content-documents", "Events, monthly readings and writing prompts"),
        ("profile-persistence", "Profile survives reloads; read-only storage degrades"),
        ("all", "Run every scenario above"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for (key, _) in list_scenarios() {
            if key == "all" {
                continue;
            }
            assert!(get_scenario(key).is_some(), "{key} missing");
        }
        for key in ALL_SCENARIOS {
            let scenario = get_scenario(key).expect("scenario");
            assert!(scenario.as_logic_scenario().is_some(), "{key} has no logic check");
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(get_scenario("does-not-exist").is_none());
        assert!(get_scenario("SMOKE").is_some());
    }

    #[test]
    fn logic_only_scenarios_keep_their_name() {
        let scenario = LogicOnlyScenario::new("Check", checks::smoke);
        assert_eq!(scenario.name(), "Check");
        assert_eq!(scenario.as_logic_scenario().expect("logic").name, "Check");
    }
}
