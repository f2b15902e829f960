//! Spy cats: HTTP CRUD over cats, missions, targets and notes.
//!
//! Layering: [`db`] stores → [`services`] rules → [`api`] handlers.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
