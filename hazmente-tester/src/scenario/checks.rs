//! Logic checks run against the shipped documents through the core engine.
use anyhow::{Context, Result, bail, ensure};
use chrono::{Datelike, NaiveDate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use hazmente_core::content::{next_event, passage_for_day, select_prompts};
use hazmente_core::{
    CATALOG_PATH, CatalogError, CompletionOutcome, ContentSource, EngineError, ExerciseCatalog,
    HistoricalEvent, MemoryStorage, OnboardingStep, Persistence, ProfileStorage, ReadingPassage,
    RecentHistory, Roster, RosterEntry, SessionController, SessionError, SessionPhase,
    TrainingEngine, UserProfile, WritingPrompt, catalog::resolve,
};

use crate::logic::{FsLoader, LogicCtx};

/// The roster learner at `level`, or the first one when nobody has it.
pub fn learner_for_level(roster: &Roster, level: u32) -> Option<&RosterEntry> {
    roster
        .users
        .iter()
        .find(|entry| entry.level == level)
        .or_else(|| roster.users.first())
}

/// A day number that is not today's.
pub fn wrong_day(today: NaiveDate) -> u32 {
    if today.day() == 1 { 2 } else { 1 }
}

/// Start a session, treating "nothing at this level" as `None`.
fn start_session(ctx: &LogicCtx<'_>) -> Result<Option<SessionController>> {
    match ctx.loader.engine().start_session(ctx.level) {
        Ok(session) => Ok(Some(session)),
        Err(EngineError::Catalog(err)) if err.is_empty_for_level() => Ok(None),
        Err(err) => Err(err).context("starting session"),
    }
}

#[allow(clippy::cast_precision_loss)]
fn share(part: usize, total: usize) -> f32 {
    part as f32 / total as f32 * 100.0
}

pub fn smoke(ctx: &LogicCtx<'_>) -> Result<()> {
    let engine = ctx.loader.engine();
    let roster = engine.load_roster().context("loading roster")?;
    ensure!(!roster.is_empty(), "roster has no learners");
    ensure!(engine.resume().is_none(), "fresh store should hold no profile");
    start_session(ctx)?;
    Ok(())
}

pub fn onboarding(ctx: &LogicCtx<'_>) -> Result<()> {
    let engine = ctx.loader.engine();
    let roster = engine.load_roster().context("loading roster")?;
    let entry = learner_for_level(&roster, ctx.level).context("roster is empty")?;
    let typed = format!("{} ", entry.name.to_lowercase());
    let today = ctx.today;

    let mut wizard = engine.start_onboarding();
    ensure!(
        wizard.submit_name("nadie-se-llama-asi", &roster).is_err(),
        "unknown name was accepted"
    );
    ensure!(wizard.step() == OnboardingStep::Name, "unknown name left the name step");
    wizard.submit_name(&typed, &roster)?;
    ensure!(wizard.name() == entry.name, "roster spelling not kept");

    wizard.submit_day(&wrong_day(today).to_string())?;
    wizard.submit_month(&today.month().to_string())?;
    ensure!(
        wizard.submit_year(&today.year().to_string(), today).is_err(),
        "wrong date was accepted"
    );
    ensure!(
        wizard.step() == OnboardingStep::Day && wizard.day().is_empty(),
        "date mismatch should restart from an empty day"
    );

    wizard.submit_day(&today.day().to_string())?;
    wizard.submit_month(&today.month().to_string())?;
    wizard.submit_year(&today.year().to_string(), today)?;
    ensure!(wizard.progress_percent() == 100, "confirmation should show full progress");

    let (profile, persistence) = engine.finish_onboarding(&mut wizard)?;
    ensure!(persistence == Persistence::Durable, "memory store should persist");
    ensure!(profile.level == entry.level, "level must come from the roster");
    ensure!(engine.resume().as_ref() == Some(&profile), "profile not resumed");
    Ok(())
}

pub fn catalog_levels(ctx: &LogicCtx<'_>) -> Result<()> {
    let text = std::fs::read_to_string(ctx.loader.root().join(CATALOG_PATH))
        .context("reading catalog")?;
    let catalog = ExerciseCatalog::from_json(&text)?;
    let expected: Vec<String> = resolve(catalog.filter_for_level(ctx.level))
        .into_iter()
        .map(|exercise| exercise.descriptor.title)
        .collect();

    match ctx.loader.engine().start_session(ctx.level) {
        Ok(session) => {
            let titles: Vec<&str> = session.exercises().iter().map(|e| e.title()).collect();
            ensure!(titles == expected, "level {} got {titles:?}", ctx.level);
            ensure!(
                session
                    .exercises()
                    .iter()
                    .all(|e| e.descriptor.min_level <= ctx.level),
                "exercise above the learner's level"
            );
        }
        Err(EngineError::Catalog(CatalogError::NoneForLevel { level })) => {
            ensure!(expected.is_empty(), "level {level} reported empty but has {expected:?}");
        }
        Err(err) => bail!("catalog failed to load: {err}"),
    }
    Ok(())
}

pub fn session_walkthrough(ctx: &LogicCtx<'_>) -> Result<()> {
    let Some(mut session) = start_session(ctx)? else {
        return Ok(());
    };
    let total = session.total();
    let mut rng = SmallRng::seed_from_u64(ctx.seed);
    let replay_at = rng.gen_range(0..total);
    let mut last = 0.0_f32;

    while let SessionPhase::Showing(index) = session.phase() {
        let required = session.exercises()[index].kind.completions_required();
        for round in 1..required {
            let outcome = session.on_exercise_complete()?;
            ensure!(
                outcome == CompletionOutcome::Pending { received: round, required },
                "round {round} of {required} should stay pending"
            );
        }
        session.on_exercise_complete()?;
        ensure!(
            session.phase() == SessionPhase::Transition(index),
            "exercise {index} did not reach its transition"
        );
        let percent = session.percent_complete();
        ensure!(percent >= last, "progress went backwards: {last} -> {percent}");
        last = percent;

        if index == replay_at {
            session.replay()?;
            ensure!(
                (session.percent_complete() - last).abs() < f32::EPSILON,
                "replay changed progress"
            );
            session.finish_early();
            ensure!(session.is_finished(), "finish_early should end the session");
            return Ok(());
        }
        session.continue_session()?;
    }

    ensure!(session.is_finished(), "walkthrough did not finish");
    ensure!(session.completed_count() == total, "not every exercise counted");
    ensure!((last - 100.0).abs() < 0.01, "final progress {last}");
    Ok(())
}

pub fn navigation(ctx: &LogicCtx<'_>) -> Result<()> {
    let Some(mut session) = start_session(ctx)? else {
        return Ok(());
    };
    let total = session.total();
    let mut rng = SmallRng::seed_from_u64(ctx.seed);
    let target = rng.gen_range(0..total);

    session.go_to_exercise(target)?;
    ensure!(session.phase() == SessionPhase::Showing(target), "jump missed {target}");
    ensure!(
        (session.percent_complete() - share(target, total)).abs() < 0.01,
        "jump to {target} of {total} reported {}",
        session.percent_complete()
    );
    ensure!(
        session.go_to_exercise(total) == Err(SessionError::OutOfRange { index: total, total }),
        "out-of-range jump accepted"
    );

    session.finish_early();
    ensure!(
        session.go_to_exercise(0) == Err(SessionError::Finished),
        "jump after finishing accepted"
    );
    Ok(())
}

pub fn content_documents(ctx: &LogicCtx<'_>) -> Result<()> {
    let engine = ctx.loader.engine();
    let mut rng = SmallRng::seed_from_u64(ctx.seed);

    let events: Vec<HistoricalEvent> =
        engine.load_document(&ContentSource::HistoricalEvents.path(ctx.today.month()))?;
    ensure!(!events.is_empty(), "no historical events");
    let mut used = RecentHistory::with_capacity(events.len());
    let mut seen = Vec::new();
    for _ in 0..events.len() {
        let event = next_event(&events, &mut used, &mut rng).context("no event picked")?;
        ensure!(!seen.contains(&event.id), "event {} repeated early", event.id);
        let (day, month, year) = event.expected_answer();
        ensure!(
            !(day.is_empty() && month.is_empty() && year.is_empty()),
            "event {} asks for nothing",
            event.id
        );
        seen.push(event.id);
    }

    for month in 1..=12 {
        let passages: Vec<ReadingPassage> =
            engine.load_document(&ContentSource::MonthlyReading.path(month))?;
        let passage = passage_for_day(&passages, ctx.today.day())
            .with_context(|| format!("no reading for month {month}"))?;
        ensure!(!passage.text.is_empty(), "empty reading in month {month}");
    }

    let prompts: Vec<WritingPrompt> =
        engine.load_document(&ContentSource::WritingPrompts.path(ctx.today.month()))?;
    let mut history = RecentHistory::default();
    let first = select_prompts(&prompts, &mut history, &mut rng);
    ensure!(first.len() == 2, "expected two prompts, got {}", first.len());
    ensure!(first[0].id != first[1].id, "prompt repeated within a session");
    if prompts.len() >= 4 {
        let second = select_prompts(&prompts, &mut history, &mut rng);
        ensure!(
            second.iter().all(|p| first.iter().all(|f| f.id != p.id)),
            "recent prompts were shown again"
        );
    }
    Ok(())
}

/// Walk the roster learner at `ctx.level` through onboarding on `engine`.
fn complete_onboarding<S: ProfileStorage>(
    engine: &TrainingEngine<FsLoader, S>,
    ctx: &LogicCtx<'_>,
) -> Result<(UserProfile, Persistence)> {
    let today = ctx.today;
    let roster = engine.load_roster()?;
    let entry = learner_for_level(&roster, ctx.level).context("roster is empty")?;
    let mut wizard = engine.start_onboarding();
    wizard.submit_name(&entry.name, &roster)?;
    wizard.submit_day(&today.day().to_string())?;
    wizard.submit_month(&today.month().to_string())?;
    wizard.submit_year(&today.year().to_string(), today)?;
    Ok(engine.finish_onboarding(&mut wizard)?)
}

pub fn profile_persistence(ctx: &LogicCtx<'_>) -> Result<()> {
    let backend = MemoryStorage::new();
    let engine = ctx.loader.engine_with(backend.clone());
    let (profile, persistence) = complete_onboarding(&engine, ctx)?;
    ensure!(persistence.is_durable(), "writable store reported memory-only");
    let reloaded = ctx.loader.engine_with(backend.clone());
    ensure!(reloaded.resume() == Some(profile), "profile lost across reload");
    ensure!(reloaded.logout().is_durable(), "logout not persisted");
    ensure!(
        ctx.loader.engine_with(backend).resume().is_none(),
        "logout left a profile behind"
    );

    let locked = ctx.loader.engine_with(MemoryStorage::read_only());
    let (profile, persistence) = complete_onboarding(&locked, ctx)?;
    ensure!(persistence == Persistence::MemoryOnly, "read-only store claimed durability");
    ensure!(
        locked.resume() == Some(profile),
        "memory-only profile should last for the session"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(loader: &FsLoader, level: u32, seed: u64) -> LogicCtx<'_> {
        LogicCtx {
            loader,
            level,
            seed,
            today: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        }
    }

    #[test]
    fn every_check_passes_on_shipped_documents() {
        let loader = FsLoader::locate(None);
        for level in 1..=5 {
            for seed in 0..3 {
                let ctx = ctx(&loader, level, seed);
                smoke(&ctx).unwrap();
                onboarding(&ctx).unwrap();
                catalog_levels(&ctx).unwrap();
                session_walkthrough(&ctx).unwrap();
                navigation(&ctx).unwrap();
                content_documents(&ctx).unwrap();
                profile_persistence(&ctx).unwrap();
            }
        }
    }

    #[test]
    fn wrong_day_never_matches() {
        for day in [1, 2, 15, 31] {
            let date = NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
            assert_ne!(wrong_day(date), date.day());
        }
    }

    #[test]
    fn learner_lookup_falls_back_to_first() {
        let roster =
            Roster::from_json(r#"{"users":[{"name":"Ana","level":2},{"name":"Luz","level":4}]}"#)
                .unwrap();
        assert_eq!(learner_for_level(&roster, 4).map(|e| e.name.as_str()), Some("Luz"));
        assert_eq!(learner_for_level(&roster, 9).map(|e| e.name.as_str()), Some("Ana"));
    }
}
