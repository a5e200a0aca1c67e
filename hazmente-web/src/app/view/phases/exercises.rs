use crate::app::state::AppState;
use crate::app::view::handlers::AppHandlers;
use crate::pages::exercises::ExercisesPage;
use yew::prelude::*;

pub(super) fn render_exercises(state: &AppState, handlers: &AppHandlers) -> Html {
    html! {
        <ExercisesPage
            status={(*state.catalog_status).clone()}
            level={state.learner_level().unwrap_or_default()}
            session={(*state.session).clone()}
            engine={(*state.engine).clone()}
            today={*state.today}
            seed={*state.seed}
            show_menu={*state.show_menu}
            on_done={handlers.exercise_done.clone()}
            on_continue={handlers.continue_session.clone()}
            on_replay={handlers.replay.clone()}
            on_go_to={handlers.go_to_exercise.clone()}
            on_finish_early={handlers.finish_early.clone()}
            on_restart={handlers.restart.clone()}
            on_retry={handlers.retry_catalog.clone()}
            on_toggle_menu={handlers.toggle_menu.clone()}
        />
    }
}
