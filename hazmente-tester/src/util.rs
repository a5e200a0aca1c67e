use anyhow::{Context, Result, bail};
use chrono::Utc;
use std::{fs, path::Path};
use thirtyfour::prelude::*;

use hazmente_core::USER_DATA_KEY;

pub fn artifacts_dir(base: &str, browser: &str, scenario: &str, level: u32) -> String {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    format!("{base}/{browser}/{scenario}/level-{level}/{ts}")
}

pub async fn capture_artifacts(driver: &WebDriver, dir: &str, err: &anyhow::Error) -> Result<()> {
    let screenshot = driver.screenshot_as_png().await.ok();
    let source = driver.source().await.ok();
    let profile = driver
        .execute(
            &format!("return window.localStorage.getItem('{USER_DATA_KEY}')"),
            vec![],
        )
        .await
        .ok()
        .and_then(|ret| ret.json().as_str().map(str::to_string));
    let chain = format!("{err:#}");

    write_artifact_files(
        Path::new(dir),
        screenshot.as_deref(),
        source.as_deref(),
        profile.as_deref(),
        &chain,
    )
}

fn write_artifact_files(
    dir: &Path,
    screenshot: Option<&[u8]>,
    source: Option<&str>,
    profile: Option<&str>,
    error_chain: &str,
) -> Result<()> {
    fs::create_dir_all(dir).context("creating artifacts dir")?;

    if let Some(png) = screenshot {
        let _ = fs::write(dir.join("screenshot.png"), png);
    }

    if let Some(src) = source {
        let _ = fs::write(dir.join("dom.html"), src);
    }

    if let Some(raw) = profile {
        let _ = fs::write(dir.join("profile.json"), raw);
    }

    let _ = fs::write(dir.join("error.txt"), error_chain);

    Ok(())
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse a comma-separated list of learner levels (1 or more).
pub fn parse_levels(s: &str) -> Result<Vec<u32>> {
    let mut levels = Vec::new();
    for token in split_csv(s) {
        let level: u32 = token
            .parse()
            .with_context(|| format!("invalid level {token:?}"))?;
        if level == 0 {
            bail!("levels start at 1");
        }
        if !levels.contains(&level) {
            levels.push(level);
        }
    }
    if levels.is_empty() {
        bail!("no levels given");
    }
    Ok(levels)
}
