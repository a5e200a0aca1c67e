use crate::app::phase::LoadStatus;
use crate::components::keyboards::{AlphaKeyboard, MonthKeyboard, NumericKeyboard};
use crate::components::progress_bar::ProgressBar;
use crate::i18n::{month_name, t, tr};
use crate::training::{Onboarding, OnboardingError, OnboardingStep};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct OnboardingPageProps {
    pub wizard: Onboarding,
    pub roster_status: LoadStatus,
    pub on_submit_name: Callback<String>,
    pub on_submit_day: Callback<String>,
    pub on_submit_month: Callback<u32>,
    pub on_submit_year: Callback<String>,
    pub on_back: Callback<()>,
    pub on_dismiss_error: Callback<()>,
}

/// Translated text for a rejected step.
#[must_use]
pub fn error_message(error: &OnboardingError) -> String {
    let key = format!("onboarding.errors.{}", error.code());
    match error {
        OnboardingError::UnknownUser(name) => {
            let mut vars = BTreeMap::new();
            vars.insert("name", name.as_str());
            tr(&key, Some(&vars))
        }
        _ => t(&key),
    }
}

/// What the wizard already holds for `step`, used to prefill the draft.
fn stored_value(wizard: &Onboarding, step: OnboardingStep) -> String {
    match step {
        OnboardingStep::Name => wizard.name(),
        OnboardingStep::Day => wizard.day(),
        OnboardingStep::Month => wizard.month(),
        OnboardingStep::Year => wizard.year(),
        OnboardingStep::Confirmation | OnboardingStep::Complete => "",
    }
    .to_string()
}

fn prompt_key(step: OnboardingStep) -> &'static str {
    match step {
        OnboardingStep::Name => "onboarding.name.prompt",
        OnboardingStep::Day => "onboarding.day.prompt",
        OnboardingStep::Month => "onboarding.month.prompt",
        OnboardingStep::Year | OnboardingStep::Confirmation | OnboardingStep::Complete => {
            "onboarding.year.prompt"
        }
    }
}

#[function_component(OnboardingPage)]
pub fn onboarding_page(p: &OnboardingPageProps) -> Html {
    let step = p.wizard.step();
    // Keyed by step by the caller, so each step mounts with its own draft.
    let draft = use_state(|| stored_value(&p.wizard, step));

    let on_change = {
        let draft = draft.clone();
        Callback::from(move |value: String| draft.set(value))
    };
    let on_month = {
        let draft = draft.clone();
        Callback::from(move |month: u32| draft.set(month.to_string()))
    };
    let roster_ready = p.roster_status == LoadStatus::Ready;
    let can_submit = !draft.trim().is_empty() && (step != OnboardingStep::Name || roster_ready);

    let submit = {
        let draft = draft.clone();
        let on_name = p.on_submit_name.clone();
        let on_day = p.on_submit_day.clone();
        let on_month = p.on_submit_month.clone();
        let on_year = p.on_submit_year.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let value = (*draft).clone();
            match step {
                OnboardingStep::Name => on_name.emit(value),
                OnboardingStep::Day => on_day.emit(value),
                OnboardingStep::Month => {
                    if let Ok(month) = value.parse::<u32>() {
                        on_month.emit(month);
                    }
                }
                OnboardingStep::Year => on_year.emit(value),
                OnboardingStep::Confirmation | OnboardingStep::Complete => {}
            }
        })
    };
    let back = {
        let cb = p.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let dismiss = {
        let cb = p.on_dismiss_error.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let shown_value = match step {
        OnboardingStep::Month => draft
            .parse::<u32>()
            .map(month_name)
            .unwrap_or_default(),
        _ => (*draft).clone(),
    };
    let keyboard = match step {
        OnboardingStep::Name => html! {
            <AlphaKeyboard value={AttrValue::from((*draft).clone())} on_change={on_change} />
        },
        OnboardingStep::Day => html! {
            <NumericKeyboard value={AttrValue::from((*draft).clone())} max_len={2} on_change={on_change} />
        },
        OnboardingStep::Month => html! {
            <MonthKeyboard selected={draft.parse::<u32>().ok()} on_select={on_month} />
        },
        OnboardingStep::Year => html! {
            <NumericKeyboard value={AttrValue::from((*draft).clone())} max_len={4} on_change={on_change} />
        },
        OnboardingStep::Confirmation | OnboardingStep::Complete => Html::default(),
    };

    html! {
        <section class="panel onboarding" data-step={step.as_str()}>
            <h1>{ t("onboarding.title") }</h1>
            <ProgressBar
                percent={f32::from(p.wizard.progress_percent())}
                label={AttrValue::from(t("onboarding.progress"))}
            />
            if let Some(error) = p.wizard.error() {
                <div class="notice notice-warning" role="alert">
                    <p>{ error_message(error) }</p>
                    <button
                        type="button"
                        class="notice-dismiss"
                        aria-label={t("notice.dismiss")}
                        onclick={dismiss}
                    >
                        { "×" }
                    </button>
                </div>
            }
            if step == OnboardingStep::Name {
                {
                    match &p.roster_status {
                        LoadStatus::Failed(_) => html! {
                            <p class="load-error" role="alert">{ t("onboarding.roster_error") }</p>
                        },
                        LoadStatus::Ready => Html::default(),
                        _ => html! {
                            <p class="loading" aria-busy="true">{ t("onboarding.roster_loading") }</p>
                        },
                    }
                }
            }
            <form onsubmit={submit}>
                <h2 id="step-prompt">{ t(prompt_key(step)) }</h2>
                <output class="draft" aria-labelledby="step-prompt" aria-live="polite">
                    { shown_value }
                </output>
                { keyboard }
                <div class="actions">
                    if step != OnboardingStep::Name {
                        <button type="button" class="btn-secondary" onclick={back}>
                            { t("onboarding.back") }
                        </button>
                    }
                    <button type="submit" id="onboarding-next" class="btn-primary" disabled={!can_submit}>
                        { t("onboarding.next") }
                    </button>
                </div>
            </form>
        </section>
    }
}
