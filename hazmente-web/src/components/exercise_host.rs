//! Generic exercise host
//!
//! Shows the exercise on screen with its instructions and, for kinds that
//! read a content document, a preview of today's content. The "done"
//! button feeds completion signals to the session controller.
use crate::i18n::{t, tr};
use crate::training::content::{next_event, passage_for_day, select_prompts};
use crate::training::{
    ContentSource, EVENT_HISTORY_KEY, EXERCISE_HISTORY_KEY, EngineError, EngineHandle,
    HistoricalEvent, ProfileStorage, ReadingPassage, RecentHistory, ResolvedExercise,
    ResourceLoader, TrainingEngine, WritingPrompt,
};
use chrono::{Datelike, NaiveDate};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExerciseContent {
    Event(HistoricalEvent),
    Reading(ReadingPassage),
    Prompts(Vec<WritingPrompt>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum ContentState {
    None,
    Loading,
    Ready(ExerciseContent),
    Failed,
}

/// Build today's content for `source` from an already loaded document.
///
/// Events and writing prompts avoid the recently shown ones and record the
/// new pick in the engine's storage, so a replay or a jump back to the
/// same exercise shows something else. `Ok(None)` means the document was
/// empty.
///
/// # Errors
/// Returns an error if the document is missing or malformed.
pub fn prepare_content<L, S>(
    engine: &TrainingEngine<L, S>,
    source: ContentSource,
    today: NaiveDate,
    seed: u64,
) -> Result<Option<ExerciseContent>, EngineError>
where
    L: ResourceLoader,
    S: ProfileStorage,
{
    let path = source.path(today.month());
    let mut rng = SmallRng::seed_from_u64(seed);
    let content = match source {
        ContentSource::HistoricalEvents => {
            let events: Vec<HistoricalEvent> = engine.load_document(&path)?;
            let storage = engine.user_store().storage();
            let mut used = RecentHistory::load(storage, EVENT_HISTORY_KEY);
            let picked = next_event(&events, &mut used, &mut rng).cloned();
            used.persist(storage, EVENT_HISTORY_KEY);
            picked.map(ExerciseContent::Event)
        }
        ContentSource::MonthlyReading => {
            let passages: Vec<ReadingPassage> = engine.load_document(&path)?;
            passage_for_day(&passages, today.day())
                .cloned()
                .map(ExerciseContent::Reading)
        }
        ContentSource::WritingPrompts => {
            let prompts: Vec<WritingPrompt> = engine.load_document(&path)?;
            let storage = engine.user_store().storage();
            let mut history = RecentHistory::load(storage, EXERCISE_HISTORY_KEY);
            let picked = select_prompts(&prompts, &mut history, &mut rng);
            history.persist(storage, EXERCISE_HISTORY_KEY);
            (!picked.is_empty()).then_some(ExerciseContent::Prompts(picked))
        }
    };
    Ok(content)
}

fn render_content(content: &ExerciseContent) -> Html {
    match content {
        ExerciseContent::Event(event) => {
            let mut vars = BTreeMap::new();
            vars.insert("hint", event.hint.as_str());
            html! {
                <div class="content content-event">
                    <p class="event">{ event.event.clone() }</p>
                    if !event.hint.is_empty() {
                        <p class="hint">{ tr("exercises.hint", Some(&vars)) }</p>
                    }
                </div>
            }
        }
        ExerciseContent::Reading(passage) => html! {
            <article class="content content-reading">
                <h3>{ passage.title.clone() }</h3>
                <p>{ passage.text.clone() }</p>
                <ol class="questions">
                    { for passage.questions.iter().map(|q| html! {
                        <li>{ q.question.clone() }</li>
                    }) }
                </ol>
            </article>
        },
        ExerciseContent::Prompts(prompts) => html! {
            <div class="content content-prompts">
                <h3>{ t("exercises.prompts_title") }</h3>
                <ul>
                    { for prompts.iter().map(|prompt| html! {
                        <li>
                            <strong>{ prompt.title.clone() }</strong>
                            <p>{ prompt.description.clone() }</p>
                        </li>
                    }) }
                </ul>
            </div>
        },
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub exercise: ResolvedExercise,
    pub index: usize,
    /// Completion signals already received for this exercise.
    pub pending_signals: u8,
    pub engine: EngineHandle,
    pub today: NaiveDate,
    pub seed: u64,
    /// Session attempt, bumped on replay.
    #[prop_or_default]
    pub attempt: u32,
    pub on_done: Callback<()>,
}

fn initial_state(source: Option<ContentSource>) -> ContentState {
    if source.is_some() {
        ContentState::Loading
    } else {
        ContentState::None
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[hook]
fn use_exercise_content(p: &Props) -> UseStateHandle<ContentState> {
    let source = p.exercise.kind.content();
    use_state(move || initial_state(source))
}

/// Fetch and prepare the content document whenever the exercise changes.
#[cfg(target_arch = "wasm32")]
#[hook]
fn use_exercise_content(p: &Props) -> UseStateHandle<ContentState> {
    let source = p.exercise.kind.content();
    let content = use_state(move || initial_state(source));
    let generation = use_memo((), |()| crate::training::LoadGeneration::new());
    let handle = content.clone();
    let engine = p.engine.clone();
    let today = p.today;
    let seed = p.seed ^ p.index as u64 ^ u64::from(p.attempt).rotate_left(32);
    use_effect_with((p.exercise.kind, p.index, p.attempt), move |_| {
        if let Some(source) = source {
            let ticket = generation.begin();
            handle.set(ContentState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                let path = source.path(today.month());
                let state = match engine.loader().prefetch(&path).await {
                    Ok(()) => match prepare_content(&*engine, source, today, seed) {
                        Ok(Some(ready)) => ContentState::Ready(ready),
                        Ok(None) => {
                            log::warn!("{path} has no content");
                            ContentState::Failed
                        }
                        Err(err) => {
                            log::error!("{err}");
                            ContentState::Failed
                        }
                    },
                    Err(err) => {
                        log::error!("{err}");
                        ContentState::Failed
                    }
                };
                if let Some(state) = ticket.accept(state) {
                    handle.set(state);
                }
            });
        } else {
            handle.set(ContentState::None);
        }
        move || generation.invalidate()
    });
    content
}

#[function_component(ExerciseHost)]
pub fn exercise_host(p: &Props) -> Html {
    let content = use_exercise_content(p);

    let on_done = {
        let cb = p.on_done.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let required = p.exercise.kind.completions_required();
    let round = (p.pending_signals + 1).to_string();
    let required_text = required.to_string();
    let mut round_vars = BTreeMap::new();
    round_vars.insert("received", round.as_str());
    round_vars.insert("required", required_text.as_str());
    let minutes = p.exercise.duration().div_ceil(60).to_string();
    let mut duration_vars = BTreeMap::new();
    duration_vars.insert("minutes", minutes.as_str());

    html! {
        <section
            class="panel exercise"
            data-component={p.exercise.kind.component_name()}
            aria-labelledby="exercise-title"
        >
            <h2 id="exercise-title">{ p.exercise.title().to_string() }</h2>
            <p class="instructions">
                { t(&format!("exercises.instructions.{}", p.exercise.kind.slug())) }
            </p>
            if p.exercise.duration() > 0 {
                <p class="duration">{ tr("exercises.duration", Some(&duration_vars)) }</p>
            }
            {
                match &*content {
                    ContentState::None => Html::default(),
                    ContentState::Loading => html! {
                        <p class="content-loading" aria-busy="true">{ t("exercises.content_loading") }</p>
                    },
                    ContentState::Ready(ready) => render_content(ready),
                    ContentState::Failed => html! {
                        <p class="content-error" role="alert">{ t("exercises.content_error") }</p>
                    },
                }
            }
            if required > 1 {
                <p class="rounds">{ tr("exercises.match_progress", Some(&round_vars)) }</p>
            }
            <button type="button" id="exercise-done-btn" class="btn-primary" onclick={on_done}>
                { t("exercises.done") }
            </button>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::{MemoryStorage, PrefetchLoader};

    const EVENTS: &str = include_str!("../../static/assets/events/events.json");
    const OCTOBER: &str = include_str!("../../static/assets/lecturas/10.json");
    const PROMPTS: &str = include_str!("../../static/assets/escrituras/writing-instructions.json");

    fn engine() -> TrainingEngine<PrefetchLoader, MemoryStorage> {
        let loader = PrefetchLoader::new();
        loader.insert("events/events.json", EVENTS);
        loader.insert("lecturas/10.json", OCTOBER);
        loader.insert("escrituras/writing-instructions.json", PROMPTS);
        TrainingEngine::new(loader, MemoryStorage::new())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn reading_uses_the_month_document_and_day() {
        let passages: Vec<ReadingPassage> = serde_json::from_str(OCTOBER).unwrap();
        let expected = &passages[18 % passages.len()];
        let content = prepare_content(&engine(), ContentSource::MonthlyReading, today(), 1)
            .unwrap()
            .unwrap();
        assert_eq!(content, ExerciseContent::Reading(expected.clone()));
    }

    #[test]
    fn writing_prompts_are_recorded_in_history() {
        let engine = engine();
        let first = prepare_content(&engine, ContentSource::WritingPrompts, today(), 1)
            .unwrap()
            .unwrap();
        let ExerciseContent::Prompts(prompts) = first else {
            panic!("expected prompts");
        };
        assert_eq!(prompts.len(), 2);
        let stored = engine
            .user_store()
            .storage()
            .get(EXERCISE_HISTORY_KEY)
            .unwrap();
        for prompt in &prompts {
            assert!(stored.contains(&prompt.id.to_string()));
        }
    }

    #[test]
    fn events_pick_one_entry() {
        let content = prepare_content(&engine(), ContentSource::HistoricalEvents, today(), 9)
            .unwrap()
            .unwrap();
        assert!(matches!(content, ExerciseContent::Event(_)));
    }

    #[test]
    fn events_do_not_repeat_until_all_were_shown() {
        let all: Vec<HistoricalEvent> = serde_json::from_str(EVENTS).unwrap();
        let engine = engine();
        let mut shown = Vec::new();
        for _ in 0..all.len() {
            // Same seed every time, as when the same exercise is replayed.
            let content = prepare_content(&engine, ContentSource::HistoricalEvents, today(), 9)
                .unwrap()
                .unwrap();
            let ExerciseContent::Event(event) = content else {
                panic!("expected an event");
            };
            assert!(!shown.contains(&event.id), "event {} repeated", event.id);
            shown.push(event.id);
        }
        assert!(engine.user_store().storage().get(EVENT_HISTORY_KEY).is_some());

        // Once the cycle is exhausted a new one starts instead of failing.
        let next = prepare_content(&engine, ContentSource::HistoricalEvents, today(), 9).unwrap();
        assert!(matches!(next, Some(ExerciseContent::Event(_))));
    }

    #[test]
    fn missing_document_is_an_error() {
        let engine = TrainingEngine::new(PrefetchLoader::new(), MemoryStorage::new());
        assert!(prepare_content(&engine, ContentSource::MonthlyReading, today(), 1).is_err());
    }
}
