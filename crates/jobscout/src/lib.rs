//! Core library for the job-search assistant.
//!
//! The interesting machinery lives under [`workflows::search`]: a pure scoring
//! engine driven by a user-tunable [`workflows::search::Rubric`], a
//! deterministic ranker, and the boundary traits the surrounding service uses
//! to talk to listings feeds, notification channels, and durable storage.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
