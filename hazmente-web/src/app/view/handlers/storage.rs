use crate::app::phase::{LoadStatus, Phase};
use crate::app::state::AppState;
use crate::training::Onboarding;
use yew::prelude::*;

/// Forget the learner and return to onboarding.
pub(super) fn build_logout(state: &AppState) -> Callback<()> {
    let engine = state.engine.clone();
    let profile = state.profile.clone();
    let onboarding = state.onboarding.clone();
    let session = state.session.clone();
    let catalog_status = state.catalog_status.clone();
    let notice = state.notice.clone();
    let show_menu = state.show_menu.clone();
    let phase = state.phase.clone();
    Callback::from(move |()| {
        if !engine.logout().is_durable() {
            log::warn!("stored profile could not be removed; it may return on reload");
        }
        profile.set(None);
        onboarding.set(Onboarding::new());
        session.set(None);
        catalog_status.set(LoadStatus::Idle);
        notice.set(None);
        show_menu.set(false);
        phase.set(Phase::Onboarding);
    })
}
