//! Shared domain types for Taskdeck.
//!
//! This crate contains the core domain types used across the Taskdeck
//! backend: Task, Conversation, ChatMessage, the agent tool envelope, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod agent;
pub mod chat;
pub mod config;
pub mod error;
pub mod task;
