#[cfg(any(target_arch = "wasm32", test))]
use crate::app::phase::Phase;
#[cfg(any(target_arch = "wasm32", test))]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::Navigator;

#[cfg(any(target_arch = "wasm32", test))]
fn next_route_for_phase(phase: Phase, current_route: Option<&Route>) -> Option<Route> {
    // Unknown URLs keep the 404 page until the learner leaves it.
    if matches!(current_route, Some(Route::NotFound)) {
        return None;
    }
    let new_route = Route::from_phase(&phase);
    if Some(&new_route) == current_route {
        None
    } else {
        Some(new_route)
    }
}

#[cfg(any(target_arch = "wasm32", test))]
fn next_phase_for_route(
    current_phase: Phase,
    route: Option<Route>,
    has_profile: bool,
) -> Option<Phase> {
    let new_phase = route.and_then(|route| route.to_phase())?;
    if new_phase == current_phase {
        return None;
    }

    is_route_transition_allowed(current_phase, new_phase, has_profile).then_some(new_phase)
}

/// Exercises need a stored learner; onboarding is only for someone without
/// one. Nothing leaves `Boot` through the URL, only through the startup gate.
#[cfg(any(target_arch = "wasm32", test))]
const fn is_route_transition_allowed(current: Phase, next: Phase, has_profile: bool) -> bool {
    match (current, next) {
        (Phase::Boot, _) => false,
        (_, Phase::Exercises) => has_profile,
        (_, Phase::Onboarding) => !has_profile,
        (_, Phase::Boot) => false,
    }
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_sync_route_with_phase(
    phase: &UseStateHandle<Phase>,
    navigator: Option<Navigator>,
    active_route: Option<Route>,
) {
    let phase = phase.clone();
    use_effect_with((phase, active_route), move |(phase, current_route)| {
        if **phase == Phase::Boot {
            return;
        }
        if let (Some(nav), Some(new_route)) = (
            navigator.as_ref(),
            next_route_for_phase(**phase, current_route.as_ref()),
        ) {
            nav.replace(&new_route);
        }
    });
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_sync_phase_with_route(
    phase: &UseStateHandle<Phase>,
    route: Option<Route>,
    has_profile: bool,
) {
    let phase = phase.clone();
    use_effect_with(route, move |route| {
        if let Some(new_phase) = next_phase_for_route(*phase, route.clone(), has_profile) {
            phase.set(new_phase);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_route_for_phase_skips_when_unchanged() {
        let route = Route::from_phase(&Phase::Exercises);
        assert!(next_route_for_phase(Phase::Exercises, Some(&route)).is_none());
        assert_eq!(
            next_route_for_phase(Phase::Onboarding, None),
            Some(Route::Onboarding)
        );
        assert_eq!(
            next_route_for_phase(Phase::Onboarding, Some(&Route::Home)),
            Some(Route::Onboarding)
        );
        assert!(next_route_for_phase(Phase::Exercises, Some(&Route::NotFound)).is_none());
    }

    #[test]
    fn boot_ignores_deep_links() {
        assert!(next_phase_for_route(Phase::Boot, Some(Route::Exercises), true).is_none());
        assert!(next_phase_for_route(Phase::Boot, Some(Route::Onboarding), false).is_none());
    }

    #[test]
    fn exercises_route_requires_a_profile() {
        assert!(next_phase_for_route(Phase::Onboarding, Some(Route::Exercises), false).is_none());
        assert_eq!(
            next_phase_for_route(Phase::Onboarding, Some(Route::Exercises), true),
            Some(Phase::Exercises)
        );
    }

    #[test]
    fn onboarding_route_is_closed_once_signed_in() {
        assert!(next_phase_for_route(Phase::Exercises, Some(Route::Onboarding), true).is_none());
        assert_eq!(
            next_phase_for_route(Phase::Exercises, Some(Route::Onboarding), false),
            Some(Phase::Onboarding)
        );
        assert!(next_phase_for_route(Phase::Exercises, Some(Route::Home), true).is_none());
        assert!(next_phase_for_route(Phase::Exercises, Some(Route::NotFound), true).is_none());
    }

    #[test]
    fn transition_rules() {
        assert!(!is_route_transition_allowed(Phase::Boot, Phase::Exercises, true));
        assert!(is_route_transition_allowed(Phase::Onboarding, Phase::Exercises, true));
        assert!(!is_route_transition_allowed(Phase::Exercises, Phase::Boot, true));
        assert!(is_route_transition_allowed(Phase::Exercises, Phase::Onboarding, false));
    }
}
