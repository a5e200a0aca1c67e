pub mod boot;
pub mod confirmation;
pub mod exercises;
pub mod not_found;
pub mod onboarding;
