pub mod action;
pub mod config;
pub mod error;
pub mod events;
pub mod history;
pub mod loader;
pub mod pane;
pub mod reducer;
pub mod registry;
pub mod session;
pub mod validation;

pub use action::{Action, pre_parse_action, pre_parse_bunny};
pub use config::Config;
pub use error::{ActionError, ConfigError, PayloadError, SessionError};
pub use events::{EventBatch, pre_parse_clicked, pre_parse_impression};
pub use pane::{PaneContext, Rendered, render_pane};
pub use session::{EditOutcome, EditSession};
