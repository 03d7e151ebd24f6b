// src/gui/actions/mod.rs
pub mod download;
pub mod load;
