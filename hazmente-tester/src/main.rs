mod browser;
mod logic;
mod scenario;
mod util;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use browser::{BrowserConfig, BrowserKind, UiDriver, can_type, new_session};
use logic::{FsLoader, LogicTester};
use scenario::{ALL_SCENARIOS, ScenarioCtx, get_scenario, list_scenarios};
use util::{artifacts_dir, capture_artifacts, parse_levels, split_csv};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TestMode {
    /// Engine checks against the data documents (fast, no browser)
    Logic,
    /// Browser automation testing (slow, captures screenshots)
    Browser,
    /// Run both logic and browser tests
    Both,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    /// Run browsers in headless mode
    Headless,
    /// Run browsers with visible windows
    Windowed,
}

impl HeadlessMode {
    const fn is_headless(self) -> bool {
        matches!(self, Self::Headless)
    }
}

#[derive(Debug, Parser)]
#[command(name = "hazmente-tester", version = "0.1.0")]
#[command(about = "Automated QA for HazMente - engine scenarios and browser automation")]
struct Args {
    /// Test mode: logic (fast), browser (visual), or both
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Learner levels to run every scenario at (comma-separated)
    #[arg(long, default_value = "1,3,5")]
    levels: String,

    /// Number of iterations per scenario and level (logic mode only)
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Date the learner confirms during onboarding (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory holding the data documents (defaults to the web crate's assets)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    // Browser-specific options
    /// Browsers to run (chrome,edge,firefox,safari) - browser mode only
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// Base URL the app is served from
    #[arg(long, default_value = "http://localhost:8080")]
    base_url: String,

    /// Artifacts directory for screenshots and logs
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Connect to a Selenium Grid/Appium hub instead of local drivers
    #[arg(long)]
    hub: Option<String>,

    /// Run headless where supported
    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let levels = parse_levels(&args.levels)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let loader = FsLoader::locate(args.data_dir.as_deref());
    log::debug!("reading documents from {}", loader.root().display());

    let all_results = run_logic_scenarios(&args, &scenarios, &levels, &loader, today);

    let browser_failures =
        run_browser_scenarios(&args, &scenarios, &levels, &loader, today).await?;

    write_reports(&args, &all_results, start_time)?;

    if browser_failures > 0 || all_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🧠 HazMente Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for name in ALL_SCENARIOS {
            if !scenarios.iter().any(|s| s == name) {
                scenarios.push(name.to_string());
            }
        }
    }
    scenarios
}

fn parse_browser_kind(name: &str) -> Option<BrowserKind> {
    match name {
        "chrome" => Some(BrowserKind::Chrome),
        "edge" => Some(BrowserKind::Edge),
        "firefox" => Some(BrowserKind::Firefox),
        "safari" => Some(BrowserKind::Safari),
        _ => None,
    }
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: args.headless.is_headless(),
        implicit_wait_secs: 3,
        remote_hub: args.hub.clone(),
    }
}

fn browser_label(kind: BrowserKind) -> String {
    format!("{kind:?}").to_lowercase()
}

fn scenario_artifacts_dir(args: &Args, kind: BrowserKind, scenario: &str, level: u32) -> String {
    let label = browser_label(kind);
    artifacts_dir(&args.artifacts_dir, &label, scenario, level)
}

/// Roster name to sign in with at `level`; only names the on-screen
/// keyboard can spell qualify.
fn browser_learner(loader: &FsLoader, level: u32) -> Option<String> {
    let roster = match loader.engine().load_roster() {
        Ok(roster) => roster,
        Err(err) => {
            log::warn!("no roster for browser sign-in: {err}");
            return None;
        }
    };
    let typeable: Vec<_> = roster.users.iter().filter(|e| can_type(&e.name)).collect();
    typeable
        .iter()
        .find(|entry| entry.level == level)
        .or_else(|| typeable.first())
        .map(|entry| entry.name.clone())
}

fn run_logic_scenarios(
    args: &Args,
    scenarios: &[String],
    levels: &[u32],
    loader: &FsLoader,
    today: NaiveDate,
) -> Vec<logic::ScenarioResult> {
    let mut results: Vec<logic::ScenarioResult> = Vec::new();
    if !matches!(args.mode, TestMode::Logic | TestMode::Both) {
        return results;
    }

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let logic_tester = LogicTester::new(loader.clone(), today, args.verbose);

    for scenario_name in scenarios {
        if let Some(combined_scenario) = get_scenario(scenario_name) {
            if let Some(logic_scenario) = combined_scenario.as_logic_scenario() {
                let scenario_results =
                    logic_tester.run_scenario(&logic_scenario, levels, args.iterations);
                results.extend(scenario_results);
            } else {
                eprintln!(
                    "⚠️  Scenario {} has no logic test implementation",
                    scenario_name.yellow()
                );
            }
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }

    results
}

/// Returns how many browser scenario runs failed.
async fn run_browser_scenarios(
    args: &Args,
    scenarios: &[String],
    levels: &[u32],
    loader: &FsLoader,
    today: NaiveDate,
) -> Result<usize> {
    if !matches!(args.mode, TestMode::Browser | TestMode::Both) {
        return Ok(0);
    }

    println!("{}", "🌐 Running Browser Tests".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    let browsers = split_csv(&args.browsers);
    let mut failures = 0;

    for browser_name in browsers {
        let Some(kind) = parse_browser_kind(&browser_name) else {
            eprintln!("⚠️  Unknown browser: {}", browser_name.yellow());
            continue;
        };

        let cfg = build_browser_config(args);

        let driver = match new_session(kind, &cfg).await {
            Ok(d) => d,
            Err(e) => {
                eprintln!("❌ Could not start {kind:?}: {e}");
                continue;
            }
        };

        failures += run_browser_scenarios_for_driver(
            args, scenarios, levels, loader, today, kind, &driver,
        )
        .await;
        let _ = driver.quit().await;
    }

    Ok(failures)
}

#[allow(clippy::too_many_arguments)]
async fn run_browser_scenarios_for_driver(
    args: &Args,
    scenarios: &[String],
    levels: &[u32],
    loader: &FsLoader,
    today: NaiveDate,
    kind: BrowserKind,
    driver: &thirtyfour::WebDriver,
) -> usize {
    let mut failures = 0;
    for scenario_name in scenarios {
        let Some(scenario) = get_scenario(scenario_name) else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
            continue;
        };
        for &level in levels {
            let ctx = ScenarioCtx {
                base_url: args.base_url.clone(),
                level,
                learner: browser_learner(loader, level),
                today,
                verbose: args.verbose,
                ui: UiDriver::new(driver),
            };

            let label = browser_label(kind);
            let dir = scenario_artifacts_dir(args, kind, scenario_name, level);

            let scenario_start = Instant::now();
            match scenario.run_browser(driver, &ctx).await {
                Ok(()) => {
                    let duration = scenario_start.elapsed();
                    println!(
                        "✅ [{} level {}] {} - {:?}",
                        label.green(),
                        level,
                        scenario_name,
                        duration
                    );
                }
                Err(e) => {
                    failures += 1;
                    let duration = scenario_start.elapsed();
                    eprintln!(
                        "❌ [{} level {}] {} - {:?}: {:#}",
                        label.red(),
                        level,
                        scenario_name,
                        duration,
                        e
                    );
                    let _ = capture_artifacts(driver, &dir, &e).await;
                }
            }
        }
    }
    failures
}

fn write_reports(
    args: &Args,
    results: &[logic::ScenarioResult],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                logic::reports::generate_json_report(&mut output_target, results)?;
            }
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# HazMente Logic Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            let duration = start_time.elapsed();
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(&mut output_target, results, duration)?;
            }
        }
    }

    let duration = start_time.elapsed();
    writeln!(&mut output_target)?;
    writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            mode: TestMode::Logic,
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            levels: "1".to_string(),
            iterations: 1,
            today: NaiveDate::from_ymd_opt(2026, 10, 18),
            report: "json".to_string(),
            verbose: false,
            output: None,
            data_dir: None,
            browsers: "chrome".to_string(),
            base_url: "http://localhost:8080".to_string(),
            artifacts_dir: "target/test-artifacts".to_string(),
            hub: None,
            headless: HeadlessMode::Headless,
        }
    }

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "hazmente-main-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn expand_scenarios_replaces_all_without_duplicates() {
        let expanded = expand_scenarios("smoke,all");
        assert_eq!(expanded.len(), ALL_SCENARIOS.len());
        assert_eq!(expanded[0], "smoke");
        assert!(expanded.iter().any(|s| s == "profile-persistence"));
        assert_eq!(expand_scenarios("navigation"), vec!["navigation"]);
    }

    #[test]
    fn browser_kinds_parse_and_label() {
        assert!(matches!(parse_browser_kind("firefox"), Some(BrowserKind::Firefox)));
        assert!(parse_browser_kind("netscape").is_none());
        assert_eq!(browser_label(BrowserKind::Chrome), "chrome");
    }

    #[test]
    fn browser_config_follows_args() {
        let mut args = base_args();
        args.headless = HeadlessMode::Windowed;
        args.hub = Some("http://grid:4444".into());
        let cfg = build_browser_config(&args);
        assert!(!cfg.headless);
        assert_eq!(cfg.remote_hub.as_deref(), Some("http://grid:4444"));
        let dir = scenario_artifacts_dir(&args, BrowserKind::Edge, "smoke", 2);
        assert!(dir.starts_with("target/test-artifacts/edge/smoke/level-2/"));
    }

    #[test]
    fn browser_learner_skips_names_the_keyboard_cannot_spell() {
        let loader = FsLoader::locate(None);
        let name = browser_learner(&loader, 4).expect("learner");
        assert!(can_type(&name), "{name}");
        assert_eq!(browser_learner(&loader, 3).as_deref(), Some("Maria"));
        assert!(browser_learner(&FsLoader::new("/nonexistent"), 1).is_none());
    }

    #[test]
    fn logic_scenarios_run_per_level() {
        let mut args = base_args();
        args.scenarios = "smoke,onboarding,unknown".to_string();
        let scenarios = expand_scenarios(&args.scenarios);
        let results =
            run_logic_scenarios(&args, &scenarios, &[1, 3], &FsLoader::locate(None), today());
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.passed), "{results:?}");

        args.mode = TestMode::Browser;
        assert!(
            run_logic_scenarios(&args, &scenarios, &[1], &FsLoader::locate(None), today())
                .is_empty()
        );
    }

    #[test]
    fn browser_run_skips_unknown_browsers() {
        let mut args = base_args();
        args.mode = TestMode::Browser;
        args.browsers = "netscape".to_string();
        let failures = tokio_test::block_on(run_browser_scenarios(
            &args,
            &["smoke".to_string()],
            &[1],
            &FsLoader::locate(None),
            today(),
        ))
        .unwrap();
        assert_eq!(failures, 0);
    }

    #[test]
    fn reports_write_every_format() {
        let mut args = base_args();
        let results = run_logic_scenarios(
            &args,
            &["smoke".to_string()],
            &[2],
            &FsLoader::locate(None),
            today(),
        );

        for format in ["json", "markdown", "console"] {
            let path = temp_path(format);
            args.report = format.to_string();
            args.output = Some(path.clone());
            write_reports(&args, &results, Instant::now()).unwrap();
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(content.contains("Total time"), "{format}: {content}");
        }

        let path = temp_path("empty");
        args.report = "markdown".to_string();
        args.output = Some(path.clone());
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("_No scenarios executed._"));
    }

    #[test]
    fn list_scenarios_writes_to_output() {
        let mut args = base_args();
        args.list_scenarios = true;
        let path = temp_path("list");
        args.output = Some(path.clone());
        assert!(maybe_list_scenarios(&args).unwrap());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("session-walkthrough"));

        args.list_scenarios = false;
        assert!(!maybe_list_scenarios(&args).unwrap());
    }
}
