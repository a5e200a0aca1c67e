use crate::app::phase::{LoadStatus, Phase};
use crate::components::notice::NoticeMessage;
use crate::training::{
    BrowserClock, Clock, EngineHandle, Onboarding, Roster, SessionController, UserProfile,
    create_web_engine,
};
use chrono::NaiveDate;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone)]
pub struct AppState {
    pub phase: UseStateHandle<Phase>,
    pub engine: UseStateHandle<EngineHandle>,
    pub profile: UseStateHandle<Option<UserProfile>>,
    pub roster: UseStateHandle<Option<Rc<Roster>>>,
    pub roster_status: UseStateHandle<LoadStatus>,
    pub onboarding: UseStateHandle<Onboarding>,
    pub catalog_status: UseStateHandle<LoadStatus>,
    pub catalog_reload: UseStateHandle<u32>,
    pub session: UseStateHandle<Option<SessionController>>,
    pub notice: UseStateHandle<Option<NoticeMessage>>,
    pub show_menu: UseStateHandle<bool>,
    pub boot_ready: UseStateHandle<bool>,
    pub high_contrast: UseStateHandle<bool>,
    pub current_language: UseStateHandle<String>,
    pub seed: UseStateHandle<u64>,
    pub today: UseStateHandle<NaiveDate>,
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        phase: use_state(|| Phase::Boot),
        engine: use_state(|| EngineHandle::new(create_web_engine())),
        profile: use_state(|| None::<UserProfile>),
        roster: use_state(|| None::<Rc<Roster>>),
        roster_status: use_state(|| LoadStatus::Idle),
        onboarding: use_state(Onboarding::new),
        catalog_status: use_state(|| LoadStatus::Idle),
        catalog_reload: use_state(|| 0_u32),
        session: use_state(|| None::<SessionController>),
        notice: use_state(|| None::<NoticeMessage>),
        show_menu: use_state(|| false),
        boot_ready: use_state(|| false),
        high_contrast: use_state(crate::a11y::high_contrast_enabled),
        current_language: use_state(crate::i18n::current_lang),
        seed: use_state(crate::app::phase::entropy_seed),
        today: use_state(|| BrowserClock.today()),
    }
}

impl AppState {
    #[must_use]
    pub fn learner_level(&self) -> Option<u32> {
        self.profile.as_ref().map(|profile| profile.level)
    }

    #[must_use]
    pub fn roster_ready(&self) -> bool {
        self.roster.is_some()
    }
}
