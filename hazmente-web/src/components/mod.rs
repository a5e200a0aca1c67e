pub mod exercise_host;
pub mod exercise_menu;
pub mod exercise_transition;
pub mod footer;
pub mod header;
pub mod keyboards;
pub mod notice;
pub mod progress_bar;
