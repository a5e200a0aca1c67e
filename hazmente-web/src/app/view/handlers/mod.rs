mod onboarding;
mod prefs;
mod session;
mod storage;

use crate::app::state::AppState;
use yew::prelude::*;
use yew_router::prelude::Navigator;

#[derive(Clone)]
pub struct AppHandlers {
    pub submit_name: Callback<String>,
    pub submit_day: Callback<String>,
    pub submit_month: Callback<u32>,
    pub submit_year: Callback<String>,
    pub onboarding_back: Callback<()>,
    pub dismiss_onboarding_error: Callback<()>,
    pub confirm: Callback<()>,
    pub exercise_done: Callback<()>,
    pub continue_session: Callback<()>,
    pub replay: Callback<()>,
    pub go_to_exercise: Callback<usize>,
    pub finish_early: Callback<()>,
    pub restart: Callback<()>,
    pub retry_catalog: Callback<()>,
    pub toggle_menu: Callback<()>,
    pub dismiss_notice: Callback<()>,
    pub lang_change: Callback<String>,
    pub toggle_hc: Callback<bool>,
    pub logout: Callback<()>,
    pub go_home: Callback<()>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState, navigator: Option<Navigator>) -> Self {
        Self {
            submit_name: onboarding::build_submit_name(state),
            submit_day: onboarding::build_submit_day(state),
            submit_month: onboarding::build_submit_month(state),
            submit_year: onboarding::build_submit_year(state),
            onboarding_back: onboarding::build_back(state),
            dismiss_onboarding_error: onboarding::build_dismiss_error(state),
            confirm: onboarding::build_confirm(state),
            exercise_done: session::build_exercise_done(state),
            continue_session: session::build_continue(state),
            replay: session::build_replay(state),
            go_to_exercise: session::build_go_to(state),
            finish_early: session::build_finish_early(state),
            restart: session::build_restart(state),
            retry_catalog: session::build_retry_catalog(state),
            toggle_menu: session::build_toggle_menu(state),
            dismiss_notice: session::build_dismiss_notice(state),
            lang_change: prefs::build_lang_change(state),
            toggle_hc: prefs::build_toggle_hc(state),
            logout: storage::build_logout(state),
            go_home: prefs::build_go_home(navigator),
        }
    }
}
