//! Per-tick systems that operate on the particle store

pub mod steering;
