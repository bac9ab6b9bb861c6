// Library for tests to access modules

pub mod campaign;
pub mod cli;
pub mod command;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod log_repo;
pub mod models;
pub mod network;
pub mod record;
pub mod speedtest;
