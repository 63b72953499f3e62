//! API handlers

pub mod info;
pub mod stats;
pub mod tasks;
