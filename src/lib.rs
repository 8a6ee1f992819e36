#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod activity;
pub mod agent;
pub mod audit;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http_client;
pub mod ledger;

pub use activity::{ActivityOrchestrator, ActivityRequest, ResponseEnvelope};
pub use config::Config;
pub use error::ActivityError;
