use crate::app::phase::Phase;
use crate::app::state::AppState;
use crate::components::notice::{NoticeMessage, NoticeTone};
use crate::training::{BrowserClock, Clock, Onboarding, Persistence};
use chrono::NaiveDate;
use yew::prelude::*;

/// Apply `step` to a copy of the wizard and store the result. Rejections
/// live on the wizard itself, so the view shows them from there.
fn update_wizard(
    handle: &UseStateHandle<Onboarding>,
    step: impl FnOnce(&mut Onboarding) -> bool,
) {
    let mut wizard = (**handle).clone();
    if step(&mut wizard) {
        crate::a11y::set_status(wizard.step().as_str());
    }
    handle.set(wizard);
}

pub(super) fn build_submit_name(state: &AppState) -> Callback<String> {
    let onboarding = state.onboarding.clone();
    let roster = state.roster.clone();
    Callback::from(move |input: String| {
        let Some(roster) = (*roster).clone() else {
            log::warn!("name submitted before the roster loaded");
            return;
        };
        update_wizard(&onboarding, |wizard| {
            wizard.submit_name(&input, &roster).is_ok()
        });
    })
}

pub(super) fn build_submit_day(state: &AppState) -> Callback<String> {
    let onboarding = state.onboarding.clone();
    Callback::from(move |input: String| {
        update_wizard(&onboarding, |wizard| wizard.submit_day(&input).is_ok());
    })
}

pub(super) fn build_submit_month(state: &AppState) -> Callback<u32> {
    let onboarding = state.onboarding.clone();
    Callback::from(move |month: u32| {
        update_wizard(&onboarding, |wizard| {
            wizard.submit_month(&month.to_string()).is_ok()
        });
    })
}

/// Check the typed year against the clock as it reads now. Returns whether
/// the wizard advanced and the date it was checked against.
fn apply_year<C: Clock>(wizard: &mut Onboarding, input: &str, clock: &C) -> (bool, NaiveDate) {
    let now = clock.today();
    (wizard.submit_year(input, now).is_ok(), now)
}

/// The app may stay open across midnight, so the date is read at submission
/// and the shared `today` follows it.
pub(super) fn build_submit_year(state: &AppState) -> Callback<String> {
    let onboarding = state.onboarding.clone();
    let today = state.today.clone();
    Callback::from(move |input: String| {
        let mut checked = *today;
        update_wizard(&onboarding, |wizard| {
            let (advanced, now) = apply_year(wizard, &input, &BrowserClock);
            checked = now;
            advanced
        });
        if checked != *today {
            log::info!("date rolled over to {checked}");
            today.set(checked);
        }
    })
}

pub(super) fn build_back(state: &AppState) -> Callback<()> {
    let onboarding = state.onboarding.clone();
    Callback::from(move |()| {
        update_wizard(&onboarding, Onboarding::back);
    })
}

pub(super) fn build_dismiss_error(state: &AppState) -> Callback<()> {
    let onboarding = state.onboarding.clone();
    Callback::from(move |()| {
        let mut wizard = (*onboarding).clone();
        wizard.dismiss_error();
        onboarding.set(wizard);
    })
}

/// Save the profile, then enter the exercises. The phase change (and with
/// it the route change) happens only after `save` has returned.
pub(super) fn build_confirm(state: &AppState) -> Callback<()> {
    let onboarding = state.onboarding.clone();
    let engine = state.engine.clone();
    let profile = state.profile.clone();
    let notice = state.notice.clone();
    let phase = state.phase.clone();
    Callback::from(move |()| {
        let mut wizard = (*onboarding).clone();
        match engine.finish_onboarding(&mut wizard) {
            Ok((saved, persistence)) => {
                if persistence == Persistence::MemoryOnly {
                    notice.set(Some(NoticeMessage::new(
                        NoticeTone::Warning,
                        crate::i18n::t("onboarding.store_memory_only"),
                    )));
                }
                profile.set(Some(saved));
                onboarding.set(wizard);
                phase.set(Phase::Exercises);
            }
            Err(err) => {
                log::error!("could not finish onboarding: {err}");
                onboarding.set(wizard);
            }
        }
    })
}
