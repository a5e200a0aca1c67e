mod exercises;
mod onboarding;

use crate::app::phase::Phase;
use crate::app::state::AppState;
use crate::app::view::handlers::AppHandlers;
use crate::pages::{boot::BootPage, not_found::NotFound};
use crate::router::Route;
use yew::prelude::*;

pub fn render_main_view(state: &AppState, handlers: &AppHandlers, route: Option<&Route>) -> Html {
    let not_found = matches!(route, None | Some(Route::NotFound));
    if not_found {
        return html! {
            <NotFound signed_in={state.profile.is_some()} on_go_home={handlers.go_home.clone()} />
        };
    }

    match *state.phase {
        Phase::Boot => html! { <BootPage ready={*state.boot_ready} /> },
        Phase::Onboarding => onboarding::render_onboarding(state, handlers),
        Phase::Exercises => exercises::render_exercises(state, handlers),
    }
}
