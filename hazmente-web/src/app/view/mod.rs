mod handlers;
mod phases;

pub use handlers::AppHandlers;

use crate::app::state::AppState;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::Navigator;

pub fn render_app(state: &AppState, route: Option<&Route>, navigator: Option<Navigator>) -> Html {
    let handlers = AppHandlers::new(state, navigator);
    let main_view = phases::render_main_view(state, &handlers, route);
    let user_name = state
        .profile
        .as_ref()
        .map(|profile| AttrValue::from(profile.first_name().to_string()));

    html! {
        <>
            <crate::components::header::Header
                user_name={user_name}
                today={*state.today}
                current_lang={(*state.current_language).clone()}
                high_contrast={*state.high_contrast}
                on_lang_change={handlers.lang_change.clone()}
                on_toggle_hc={handlers.toggle_hc.clone()}
                on_logout={handlers.logout.clone()}
            />
            <main id="main" role="main">
                <style>{ crate::a11y::visible_focus_css() }</style>
                <div id="status-live" class="sr-only" aria-live="polite"></div>
                if let Some(notice) = (*state.notice).clone() {
                    <crate::components::notice::Notice
                        notice={notice}
                        on_dismiss={handlers.dismiss_notice.clone()}
                    />
                }
                { main_view }
            </main>
            <crate::components::footer::Footer />
        </>
    }
}
