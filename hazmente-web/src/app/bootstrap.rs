#[cfg(any(target_arch = "wasm32", test))]
use crate::app::phase::{LoadStatus, Phase, gate_phase};
#[cfg(any(target_arch = "wasm32", test))]
use crate::app::state::AppState;
#[cfg(any(target_arch = "wasm32", test))]
use crate::training::{EngineHandle, Roster, UserProfile};
#[cfg(any(target_arch = "wasm32", test))]
use std::rc::Rc;
#[cfg(any(target_arch = "wasm32", test))]
use yew::prelude::*;

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Clone)]
struct BootstrapHandles {
    engine: EngineHandle,
    phase: UseStateHandle<Phase>,
    profile: UseStateHandle<Option<UserProfile>>,
    roster: UseStateHandle<Option<Rc<Roster>>>,
    roster_status: UseStateHandle<LoadStatus>,
    boot_ready: UseStateHandle<bool>,
}

#[cfg(any(target_arch = "wasm32", test))]
fn handles_from_state(app_state: &AppState) -> BootstrapHandles {
    BootstrapHandles {
        engine: (*app_state.engine).clone(),
        phase: app_state.phase.clone(),
        profile: app_state.profile.clone(),
        roster: app_state.roster.clone(),
        roster_status: app_state.roster_status.clone(),
        boot_ready: app_state.boot_ready.clone(),
    }
}

/// Read the stored profile and open the startup gate.
#[cfg(any(target_arch = "wasm32", test))]
fn resume_stored_profile(handles: &BootstrapHandles) -> Option<UserProfile> {
    let stored = handles.engine.resume();
    if let Some(profile) = &stored {
        log::info!("resuming session for {}", profile.first_name());
    }
    handles.phase.set(gate_phase(stored.is_some()));
    handles.profile.set(stored.clone());
    handles.boot_ready.set(true);
    stored
}

/// Parse the prefetched roster into state.
#[cfg(any(target_arch = "wasm32", test))]
fn settle_roster(handles: &BootstrapHandles) {
    match handles.engine.load_roster() {
        Ok(roster) => {
            log::debug!("roster loaded with {} learners", roster.len());
            handles.roster.set(Some(Rc::new(roster)));
            handles.roster_status.set(LoadStatus::Ready);
        }
        Err(err) => {
            log::error!("roster unavailable: {err}");
            handles.roster_status.set(LoadStatus::Failed(err.to_string()));
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let handles = handles_from_state(app_state);

    use_effect_with((), move |()| {
        resume_stored_profile(&handles);
        handles.roster_status.set(LoadStatus::Loading);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = handles
                .engine
                .loader()
                .prefetch(crate::training::ROSTER_PATH)
                .await
            {
                log::error!("{err}");
                handles.roster_status.set(LoadStatus::Failed(err.to_string()));
                return;
            }
            settle_roster(&handles);
        });
        || {}
    });
}

/// Load the catalog whenever a learner reaches the exercises, and again on
/// retry. Responses that land after logout or a newer load are dropped.
#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_catalog_loader(app_state: &AppState) {
    use crate::training::{CATALOG_PATH, CatalogError, EngineError, LoadGeneration};

    let generation = use_memo((), |()| LoadGeneration::new());
    let engine = (*app_state.engine).clone();
    let status = app_state.catalog_status.clone();
    let session = app_state.session.clone();
    let wanted = (*app_state.phase == Phase::Exercises)
        .then(|| app_state.learner_level())
        .flatten();

    use_effect_with((wanted, *app_state.catalog_reload), move |(level, _)| {
        if let Some(level) = *level {
            let ticket = generation.begin();
            status.set(LoadStatus::Loading);
            session.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                let result = match engine.loader().prefetch(CATALOG_PATH).await {
                    Ok(()) => engine.start_session(level),
                    Err(err) => Err(EngineError::Catalog(CatalogError::Fetch {
                        path: CATALOG_PATH.to_string(),
                        message: err.to_string(),
                    })),
                };
                if let Some(result) = ticket.accept(result) {
                    let (next_status, next_session) =
                        crate::app::phase::catalog_outcome(result);
                    session.set(next_session);
                    status.set(next_status);
                }
            });
        } else {
            generation.invalidate();
            status.set(LoadStatus::Idle);
        }
        move || generation.invalidate()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    const ROSTER: &str = include_str!("../../static/assets/data/users.json");

    #[function_component(BootstrapHarness)]
    fn bootstrap_harness() -> Html {
        let app_state = crate::app::state::use_app_state();
        let handles = handles_from_state(&app_state);
        let initialized = use_state(|| false);
        if !*initialized {
            initialized.set(true);
            let resumed = resume_stored_profile(&handles);
            assert!(resumed.is_none());
            handles.engine.loader().insert(crate::training::ROSTER_PATH, ROSTER);
            settle_roster(&handles);
        }
        Html::default()
    }

    #[function_component(MissingRosterHarness)]
    fn missing_roster_harness() -> Html {
        let app_state = crate::app::state::use_app_state();
        let handles = handles_from_state(&app_state);
        settle_roster(&handles);
        Html::default()
    }

    #[test]
    fn bootstrap_resumes_and_parses_roster() {
        let _ = block_on(LocalServerRenderer::<BootstrapHarness>::new().render());
    }

    #[test]
    fn missing_roster_does_not_panic() {
        let _ = block_on(LocalServerRenderer::<MissingRosterHarness>::new().render());
    }
}
