use crate::app::state::AppState;
use crate::components::notice::{NoticeMessage, NoticeTone};
use crate::training::{CompletionOutcome, SessionController, SessionError, SessionPhase};
use yew::prelude::*;

/// Run `action` on a copy of the live session and store it back.
fn with_session<T>(
    handle: &UseStateHandle<Option<SessionController>>,
    action: impl FnOnce(&mut SessionController) -> Result<T, SessionError>,
) -> Option<T> {
    let mut session = (**handle).clone()?;
    match action(&mut session) {
        Ok(value) => {
            handle.set(Some(session));
            Some(value)
        }
        Err(err) => {
            log::warn!("ignored session action: {err}");
            None
        }
    }
}

fn finished_notice(key: &str) -> NoticeMessage {
    NoticeMessage::new(NoticeTone::Success, crate::i18n::t(key))
}

pub(super) fn build_exercise_done(state: &AppState) -> Callback<()> {
    let session = state.session.clone();
    Callback::from(move |()| {
        match with_session(&session, SessionController::on_exercise_complete) {
            Some(CompletionOutcome::Pending { received, required }) => {
                log::debug!("waiting for {received}/{required} rounds");
            }
            Some(CompletionOutcome::Transition { percent, .. }) => {
                crate::a11y::set_status(&format!("{percent:.0}%"));
            }
            None => {}
        }
    })
}

pub(super) fn build_continue(state: &AppState) -> Callback<()> {
    let session = state.session.clone();
    let notice = state.notice.clone();
    Callback::from(move |()| {
        if with_session(&session, SessionController::continue_session)
            == Some(SessionPhase::Finished)
        {
            notice.set(Some(finished_notice("finished.title")));
        }
    })
}

pub(super) fn build_replay(state: &AppState) -> Callback<()> {
    let session = state.session.clone();
    Callback::from(move |()| {
        with_session(&session, SessionController::replay);
    })
}

pub(super) fn build_go_to(state: &AppState) -> Callback<usize> {
    let session = state.session.clone();
    let show_menu = state.show_menu.clone();
    Callback::from(move |index: usize| {
        with_session(&session, |controller| controller.go_to_exercise(index));
        show_menu.set(false);
    })
}

pub(super) fn build_finish_early(state: &AppState) -> Callback<()> {
    let session = state.session.clone();
    let notice = state.notice.clone();
    let show_menu = state.show_menu.clone();
    Callback::from(move |()| {
        if with_session(&session, |controller| Ok(controller.finish_early())).is_some() {
            notice.set(Some(finished_notice("finished.ended_early")));
        }
        show_menu.set(false);
    })
}

/// Start a fresh pass over the same exercises.
pub(super) fn build_restart(state: &AppState) -> Callback<()> {
    let session = state.session.clone();
    let notice = state.notice.clone();
    Callback::from(move |()| {
        let Some(current) = (*session).clone() else {
            return;
        };
        match SessionController::new(current.exercises().to_vec()) {
            Ok(fresh) => {
                notice.set(None);
                session.set(Some(fresh));
            }
            Err(err) => log::warn!("could not restart: {err}"),
        }
    })
}

pub(super) fn build_retry_catalog(state: &AppState) -> Callback<()> {
    let reload = state.catalog_reload.clone();
    Callback::from(move |()| reload.set(reload.wrapping_add(1)))
}

pub(super) fn build_toggle_menu(state: &AppState) -> Callback<()> {
    let show_menu = state.show_menu.clone();
    Callback::from(move |()| show_menu.set(!*show_menu))
}

pub(super) fn build_dismiss_notice(state: &AppState) -> Callback<()> {
    let notice = state.notice.clone();
    Callback::from(move |()| notice.set(None))
}
