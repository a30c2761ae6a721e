pub mod adb;
pub mod cli;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod executor;
pub mod interrupt;
pub mod logging;
pub mod models;
pub mod packages;
pub mod plan;
pub mod run_log;
