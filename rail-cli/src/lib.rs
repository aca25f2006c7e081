pub mod app_config;
pub mod error;
pub mod session;

pub use app_config::Config;
pub use error::CliError;
pub use session::{Session, SessionOutcome};
