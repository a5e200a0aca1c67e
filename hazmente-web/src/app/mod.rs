#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

pub mod bootstrap;
pub mod phase;
pub mod routing;
pub mod state;
pub mod view;

pub use phase::{LoadStatus, Phase};

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
pub fn app_inner() -> Html {
    let app_state = state::use_app_state();
    bootstrap::use_bootstrap(&app_state);
    bootstrap::use_catalog_loader(&app_state);

    let navigator = use_navigator();
    let route = use_route::<Route>();
    let has_profile = app_state.profile.is_some();

    routing::use_sync_route_with_phase(&app_state.phase, navigator.clone(), route.clone());
    routing::use_sync_phase_with_route(&app_state.phase, route.clone(), has_profile);

    view::render_app(&app_state, route.as_ref(), navigator)
}

#[cfg(test)]
mod tests {
    use super::Phase;

    #[test]
    fn route_phase_mappings_cover_all_states() {
        use crate::router::Route;

        let phases = [Phase::Boot, Phase::Onboarding, Phase::Exercises];

        for phase in phases {
            let route = Route::from_phase(&phase);
            let round_trip = route.to_phase();
            match (phase, round_trip) {
                (Phase::Boot, None) => {}
                (_, Some(mapped)) => assert!(mapped == phase),
                (_, None) => panic!("Route should map to a phase"),
            }
        }
        assert_eq!(Route::NotFound.to_phase(), None);
    }
}
