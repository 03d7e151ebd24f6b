// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;

pub mod csv;
pub mod gui;
pub mod jobs;
pub mod listing;
pub mod progress;
pub mod remote;
pub mod scrape;
pub mod sheets;
pub mod store;
pub mod timeline;
