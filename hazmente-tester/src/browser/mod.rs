pub mod session;
pub mod ui;

pub use session::{BrowserConfig, BrowserKind, new_session};
pub use ui::{UiDriver, can_type};
