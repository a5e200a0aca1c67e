use anyhow::{Context, Result, bail};
use thirtyfour::prelude::*;

/// Letters on the onboarding keyboard.
const KEYBOARD_LETTERS: &str = "ABCDEFGHIJKLMNÑOPQRSTUVWXYZ";

/// Whether `name` can be spelled on the on-screen keyboard.
pub fn can_type(name: &str) -> bool {
    !name.trim().is_empty()
        && name
            .chars()
            .all(|c| c == ' ' || c.to_uppercase().all(|u| KEYBOARD_LETTERS.contains(u)))
}

/// Drives the app through the same buttons a learner presses.
#[derive(Debug, Clone)]
pub struct UiDriver<'a> {
    driver: &'a WebDriver,
}

impl<'a> UiDriver<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    /// Open `path` relative to the app's base URL with a cleared store.
    pub async fn open_fresh(&self, base_url: &str, path: &str) -> Result<()> {
        let url = format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'));
        self.driver.goto(&url).await.context("opening app")?;
        self.driver
            .execute("window.localStorage.clear()", vec![])
            .await
            .context("clearing localStorage")?;
        self.driver.refresh().await.context("reloading app")?;
        Ok(())
    }

    pub async fn main_landmark(&self) -> Result<WebElement> {
        self.driver
            .find(By::Id("main"))
            .await
            .context("main landmark missing")
    }

    pub async fn current_step(&self) -> Result<String> {
        let panel = self
            .driver
            .find(By::Css("section.onboarding"))
            .await
            .context("onboarding panel missing")?;
        Ok(panel.attr("data-step").await?.unwrap_or_default())
    }

    /// Press the on-screen key labelled `label`.
    pub async fn press(&self, label: &str) -> Result<()> {
        let xpath = format!("//div[contains(@class,'keyboard')]//button[normalize-space()='{label}']");
        self.driver
            .find(By::XPath(&xpath))
            .await
            .with_context(|| format!("key {label:?} not found"))?
            .click()
            .await?;
        Ok(())
    }

    /// Spell `text` on the letter or digit keyboard.
    pub async fn type_keys(&self, text: &str) -> Result<()> {
        for c in text.chars() {
            if c == ' ' {
                self.driver
                    .find(By::Css(".keyboard-alpha .key-space"))
                    .await
                    .context("space key missing")?
                    .click()
                    .await?;
            } else {
                self.press(&c.to_uppercase().to_string()).await?;
            }
        }
        Ok(())
    }

    pub async fn pick_month(&self, month: u32) -> Result<()> {
        let css = format!(".keyboard-month button[data-month='{month}']");
        self.driver
            .find(By::Css(&css))
            .await
            .with_context(|| format!("month {month} not offered"))?
            .click()
            .await?;
        Ok(())
    }

    pub async fn click_id(&self, id: &str) -> Result<()> {
        self.driver
            .find(By::Id(id))
            .await
            .with_context(|| format!("#{id} not found"))?
            .click()
            .await?;
        Ok(())
    }

    pub async fn next(&self) -> Result<()> {
        self.click_id("onboarding-next").await
    }

    /// Fail unless the onboarding wizard is on `expected`.
    pub async fn expect_step(&self, expected: &str) -> Result<()> {
        let step = self.current_step().await?;
        if step != expected {
            bail!("expected onboarding step {expected}, found {step}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_covers_plain_and_tilde_names() {
        assert!(can_type("Maria"));
        assert!(!can_type("peña garcía "));
        assert!(can_type("Begoña Ruiz"));
        assert!(!can_type("José Luis"));
        assert!(!can_type("  "));
    }
}
