//! Domain models for spy-cats.
//!
//! # Core Concepts
//!
//! - [`Cat`]: A field agent with a breed, experience and salary.
//! - [`Mission`]: Work assigned to at most one cat, made of 1–3 targets.
//! - [`Target`]: A sub-task of a mission. Completing the last open target
//!   completes the mission.
//! - [`Note`]: Free-text annotation on a target, frozen once the target or its
//!   mission is completed.
//!
//! Missions and targets share the same two-state lifecycle, [`Status`].

mod cat;
mod mission;
mod note;
mod status;
mod target;

pub use cat::*;
pub use mission::*;
pub use note::*;
pub use status::*;
pub use target::*;
