use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/onboarding")]
    Onboarding,
    #[at("/cognitive-exercises")]
    Exercises,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub const fn from_phase(phase: &crate::app::Phase) -> Self {
        match phase {
            crate::app::Phase::Boot => Self::Home,
            crate::app::Phase::Onboarding => Self::Onboarding,
            crate::app::Phase::Exercises => Self::Exercises,
        }
    }

    #[must_use]
    pub const fn to_phase(&self) -> Option<crate::app::Phase> {
        match self {
            Self::Onboarding => Some(crate::app::Phase::Onboarding),
            Self::Exercises => Some(crate::app::Phase::Exercises),
            // Home is the startup gate; 404 keeps whatever phase is current.
            Self::Home | Self::NotFound => None,
        }
    }
}
