// src/gui/components/mod.rs
pub mod chart;
pub mod filters;
pub mod groups;
