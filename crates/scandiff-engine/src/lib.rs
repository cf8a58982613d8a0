//! scandiff Engine - Orchestration layer
//!
//! Provides high-level command orchestration that coordinates between
//! core domain logic and the persistence layer.

pub mod commands;
