use crate::app::state::AppState;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::Navigator;

pub(super) fn build_lang_change(state: &AppState) -> Callback<String> {
    let current_language = state.current_language.clone();
    Callback::from(move |code: String| {
        crate::i18n::set_lang(&code);
        current_language.set(code);
    })
}

pub(super) fn build_toggle_hc(state: &AppState) -> Callback<bool> {
    let high_contrast = state.high_contrast.clone();
    Callback::from(move |next: bool| {
        crate::a11y::set_high_contrast(next);
        high_contrast.set(next);
    })
}

/// Leave the 404 page; the phase sync then picks the right route.
pub(super) fn build_go_home(navigator: Option<Navigator>) -> Callback<()> {
    Callback::from(move |()| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&Route::Home);
        }
    })
}
