use crate::app::phase::variant_index;
use crate::i18n::{t, tr, variant_count};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub exercise_title: AttrValue,
    /// 1-based position of the exercise just completed.
    pub position: usize,
    pub total: usize,
    pub is_last: bool,
    pub seed: u64,
    pub on_continue: Callback<()>,
    pub on_replay: Callback<()>,
    pub on_finish: Callback<()>,
}

/// Congratulation line naming the exercise.
#[must_use]
pub fn congratulation(exercise_title: &str, seed: u64, position: usize) -> String {
    let count = variant_count("transition.messages");
    let index = variant_index(seed, position as u64, count);
    let mut vars = BTreeMap::new();
    vars.insert("exercise", exercise_title);
    tr(&format!("transition.messages.{index}"), Some(&vars))
}

#[function_component(ExerciseTransition)]
pub fn exercise_transition(p: &Props) -> Html {
    let on_continue = {
        let cb = p.on_continue.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_replay = {
        let cb = p.on_replay.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_finish = {
        let cb = p.on_finish.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let current = p.position.to_string();
    let total = p.total.to_string();
    let mut vars = BTreeMap::new();
    vars.insert("current", current.as_str());
    vars.insert("total", total.as_str());
    let continue_label = if p.is_last {
        t("transition.all_done")
    } else {
        t("transition.continue")
    };

    html! {
        <section class="panel transition" aria-live="polite">
            <h2>{ congratulation(&p.exercise_title, p.seed, p.position) }</h2>
            <p class="transition-progress">{ tr("transition.progress", Some(&vars)) }</p>
            <div class="actions">
                <button type="button" id="continue-btn" class="btn-primary" onclick={on_continue}>
                    { continue_label }
                </button>
                <button type="button" class="btn-secondary" onclick={on_replay}>
                    { t("transition.replay") }
                </button>
                <button type="button" class="btn-link" onclick={on_finish}>
                    { t("transition.end") }
                </button>
            </div>
        </section>
    }
}
