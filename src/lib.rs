// Library for tests to access modules

pub mod aggregator;
pub mod cf_channel;
pub mod cf_repo;
pub mod config;
pub mod error;
pub mod metadata;
pub mod models;
pub mod output;
pub mod pass;
pub mod progress;
pub mod ranking;
