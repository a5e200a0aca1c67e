use anyhow::{Context, Result};
use chrono::Datelike;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, checks};
use crate::logic::LogicScenario;

pub struct OnboardingScenario;

/// Type the learner's name and today's date, stopping on the confirmation page.
pub async fn complete_wizard(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    let learner = ctx
        .learner
        .as_deref()
        .context("no roster learner to sign in as")?;
    let ui = &ctx.ui;
    ui.open_fresh(&ctx.base_url, "/onboarding").await?;

    ui.expect_step("name").await?;
    ui.type_keys(learner).await?;
    ui.next().await?;

    ui.expect_step("day").await?;
    ui.type_keys(&checks::wrong_day(ctx.today).to_string()).await?;
    ui.next().await?;
    ui.pick_month(ctx.today.month()).await?;
    ui.next().await?;
    ui.type_keys(&ctx.today.year().to_string()).await?;
    ui.next().await?;
    driver
        .find(By::Css("section.onboarding [role='alert']"))
        .await
        .context("wrong date was not flagged")?;
    ui.expect_step("day").await?;

    ui.type_keys(&ctx.today.day().to_string()).await?;
    ui.next().await?;
    ui.pick_month(ctx.today.month()).await?;
    ui.next().await?;
    ui.type_keys(&ctx.today.year().to_string()).await?;
    ui.next().await?;

    driver
        .find(By::Id("start-btn"))
        .await
        .context("confirmation page not shown")?;
    if ctx.verbose {
        println!("  🧾 Signed in as {learner} for {}", ctx.today);
    }
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for OnboardingScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        complete_wizard(driver, ctx).await?;
        ctx.ui.click_id("start-btn").await?;
        driver
            .find(By::Css(".session-header, .exercises-empty"))
            .await
            .context("exercises page not reached")?;

        let stored = driver
            .execute("return window.localStorage.getItem('userData')", vec![])
            .await?
            .json()
            .clone();
        anyhow::ensure!(stored.is_string(), "profile was not written to localStorage");
        Ok(())
    }
}

impl CombinedScenario for OnboardingScenario {
    fn as_logic_scenario(&self) -> Option<LogicScenario> {
        Some(LogicScenario::new("Onboarding Wizard", checks::onboarding))
    }
}
