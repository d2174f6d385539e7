pub mod config;
pub mod report;
pub mod runner;

pub use config::SurveyConfig;
pub use report::SessionOutcome;
pub use runner::run_session;
