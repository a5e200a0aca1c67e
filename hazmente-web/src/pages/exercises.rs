use crate::app::phase::LoadStatus;
use crate::components::exercise_host::ExerciseHost;
use crate::components::exercise_menu::ExerciseMenu;
use crate::components::exercise_transition::ExerciseTransition;
use crate::components::progress_bar::ProgressBar;
use crate::i18n::{t, tr};
use crate::training::{EngineHandle, SessionController, SessionPhase};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ExercisesPageProps {
    pub status: LoadStatus,
    pub level: u32,
    pub session: Option<SessionController>,
    pub engine: EngineHandle,
    pub today: NaiveDate,
    pub seed: u64,
    pub show_menu: bool,
    pub on_done: Callback<()>,
    pub on_continue: Callback<()>,
    pub on_replay: Callback<()>,
    pub on_go_to: Callback<usize>,
    pub on_finish_early: Callback<()>,
    pub on_restart: Callback<()>,
    pub on_retry: Callback<()>,
    pub on_toggle_menu: Callback<()>,
}

/// "Exercise 2 of 5" line; `index` is 0-based.
#[must_use]
pub fn position_label(index: usize, total: usize) -> String {
    let current = (index + 1).to_string();
    let total = total.to_string();
    let mut vars = BTreeMap::new();
    vars.insert("current", current.as_str());
    vars.insert("total", total.as_str());
    tr("exercises.progress", Some(&vars))
}

#[function_component(ExercisesPage)]
pub fn exercises_page(p: &ExercisesPageProps) -> Html {
    let status_view = match &p.status {
        LoadStatus::Idle | LoadStatus::Loading => Some(html! {
            <section class="panel exercises-loading" aria-busy="true" aria-live="polite">
                <p>{ t("exercises.loading") }</p>
            </section>
        }),
        LoadStatus::Failed(_) => {
            let retry = {
                let cb = p.on_retry.clone();
                Callback::from(move |_| cb.emit(()))
            };
            Some(html! {
                <section class="panel exercises-error" role="alert">
                    <p>{ t("exercises.load_error") }</p>
                    <button type="button" id="retry-btn" class="btn-primary" onclick={retry}>
                        { t("exercises.retry") }
                    </button>
                </section>
            })
        }
        LoadStatus::Empty => {
            let level = p.level.to_string();
            let mut vars = BTreeMap::new();
            vars.insert("level", level.as_str());
            Some(html! {
                <section class="panel exercises-empty" role="status">
                    <p>{ tr("exercises.empty", Some(&vars)) }</p>
                </section>
            })
        }
        LoadStatus::Ready => None,
    };
    if let Some(view) = status_view {
        return view;
    }
    let Some(session) = p.session.as_ref() else {
        return html! {
            <section class="panel exercises-loading" aria-busy="true">
                <p>{ t("exercises.loading") }</p>
            </section>
        };
    };

    let total = session.total();
    let titles: Vec<AttrValue> = session
        .exercises()
        .iter()
        .map(|exercise| AttrValue::from(exercise.title().to_string()))
        .collect();
    let finish_early = {
        let cb = p.on_finish_early.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let body = match session.phase() {
        SessionPhase::Showing(index) => match session.exercises().get(index) {
            Some(exercise) => html! {
                <>
                    <ExerciseHost
                        key={format!("{index}-{}", session.attempt())}
                        exercise={exercise.clone()}
                        index={index}
                        pending_signals={session.pending_signals()}
                        engine={p.engine.clone()}
                        today={p.today}
                        seed={p.seed}
                        attempt={session.attempt()}
                        on_done={p.on_done.clone()}
                    />
                    <button type="button" class="btn-link" onclick={finish_early}>
                        { t("transition.end") }
                    </button>
                </>
            },
            None => Html::default(),
        },
        SessionPhase::Transition(index) => {
            let title = session
                .exercises()
                .get(index)
                .map(|exercise| exercise.title().to_string())
                .unwrap_or_default();
            html! {
                <ExerciseTransition
                    exercise_title={AttrValue::from(title)}
                    position={index + 1}
                    total={total}
                    is_last={session.is_last(index)}
                    seed={p.seed}
                    on_continue={p.on_continue.clone()}
                    on_replay={p.on_replay.clone()}
                    on_finish={p.on_finish_early.clone()}
                />
            }
        }
        SessionPhase::Finished => {
            let restart = {
                let cb = p.on_restart.clone();
                Callback::from(move |_| cb.emit(()))
            };
            let percent = format!("{:.0}", session.percent_complete());
            let mut vars = BTreeMap::new();
            vars.insert("percent", percent.as_str());
            let message = tr("finished.message", Some(&vars));
            return html! {
                <section class="panel finished" aria-live="polite">
                    <h2>{ t("finished.title") }</h2>
                    <ProgressBar
                        percent={session.percent_complete()}
                        label={AttrValue::from(message.clone())}
                    />
                    <p>{ message }</p>
                    <button type="button" id="restart-btn" class="btn-primary" onclick={restart}>
                        { t("finished.restart") }
                    </button>
                </section>
            };
        }
    };

    let position = session
        .current_index()
        .map(|index| position_label(index, total))
        .unwrap_or_default();

    html! {
        <div class="exercises">
            <header class="session-header">
                <ProgressBar
                    percent={session.percent_complete()}
                    label={AttrValue::from(position.clone())}
                />
                <p class="session-position">{ position }</p>
                <ExerciseMenu
                    titles={titles}
                    current={session.current_index()}
                    open={p.show_menu}
                    on_toggle={p.on_toggle_menu.clone()}
                    on_select={p.on_go_to.clone()}
                />
            </header>
            { body }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_one_based() {
        crate::i18n::set_lang("en");
        let label = position_label(1, 5);
        assert!(label.contains('2') && label.contains('5'), "{label}");
    }
}
