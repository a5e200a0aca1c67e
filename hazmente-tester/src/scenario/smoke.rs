use anyhow::{Context, Result};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, checks};
use crate::logic::LogicScenario;

pub struct SmokeScenario;

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.ui.open_fresh(&ctx.base_url, "/").await?;
        ctx.ui.main_landmark().await?;

        driver
            .find(By::Css("a[href='#main']"))
            .await
            .context("skip link missing")?;
        ctx.ui.expect_step("name").await?;
        driver
            .find(By::Css(".keyboard-alpha"))
            .await
            .context("letter keyboard missing")?;

        if ctx.verbose {
            println!("  🌐 App booted into onboarding at {}", ctx.base_url);
        }
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> Option<LogicScenario> {
        Some(LogicScenario::new("Smoke Test", checks::smoke))
    }
}
