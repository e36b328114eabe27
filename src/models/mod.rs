//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod competition;
pub mod participant;
pub mod progress;
pub mod task;

pub use competition::*;
pub use participant::*;
pub use progress::*;
pub use task::*;
