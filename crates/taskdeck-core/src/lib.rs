//! Business logic and repository trait definitions for Taskdeck.
//!
//! This crate defines the "ports" (repository traits) that the
//! infrastructure layer implements, plus the chat pipeline built on top of
//! them: intent classification, tool dispatch, and turn orchestration. It
//! depends only on `taskdeck-types` -- never on `taskdeck-infra` or any
//! database/IO crate.

pub mod agent;
pub mod chat;
pub mod task;
