use anyhow::{Context, Result, bail};
use thirtyfour::prelude::*;

use super::onboarding::complete_wizard;
use super::{BrowserScenario, CombinedScenario, ScenarioCtx, checks};
use crate::logic::LogicScenario;

/// Upper bound on "done" presses; match games need two per exercise.
const MAX_PRESSES: usize = 64;

pub struct SessionScenario;

#[async_trait::async_trait]
impl BrowserScenario for SessionScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        complete_wizard(driver, ctx).await?;
        ctx.ui.click_id("start-btn").await?;
        driver
            .find(By::Css(".session-header"))
            .await
            .with_context(|| format!("no session for level {}", ctx.level))?;

        let mut finished = 0;
        for _ in 0..MAX_PRESSES {
            if driver.find(By::Id("restart-btn")).await.is_ok() {
                if ctx.verbose {
                    println!("  🏁 Session finished after {finished} exercises");
                }
                return Ok(());
            }
            if let Ok(button) = driver.find(By::Id("continue-btn")).await {
                button.click().await?;
                finished += 1;
                continue;
            }
            ctx.ui.click_id("exercise-done-btn").await?;
        }
        bail!("session did not finish within {MAX_PRESSES} presses")
    }
}

impl CombinedScenario for SessionScenario {
    fn as_logic_scenario(&self) -> Option<LogicScenario> {
        Some(LogicScenario::new(
            "Session Walkthrough",
            checks::session_walkthrough,
        ))
    }
}
