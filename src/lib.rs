//! Watches WBM rental offers, parses each listing into a [`Flat`] and reports
//! the ones matching the applicant's criteria.

pub mod config;
pub mod error;
pub mod filter;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod notify;
pub mod parser;
pub mod pipeline;
pub mod sources;

pub use config::BotConfig;
pub use error::{ConfigError, FlatError};
pub use filter::{FlatFilter, Verdict};
pub use ledger::AppliedLedger;
pub use models::{ApplicationStatus, Flat, StatusLevel};
pub use parser::{FlatParser, LineFormat};
pub use pipeline::{Applicant, Pipeline, RunReport};
