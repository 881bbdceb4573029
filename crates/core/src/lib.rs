//! # AgentHub Core
//!
//! Domain types, traits, and error definitions for the AgentHub chat
//! runtime. This crate defines the model the other crates implement
//! against: conversation turns, execution events, stream frames, the
//! `Agent` capability trait, and the agent registry.
//!
//! ## Design Philosophy
//!
//! Agents, history stores, and transports are all defined as traits or
//! value objects here; implementations live in their respective crates.
//! This keeps the dependency graph pointing inward and makes every
//! component testable with scripted stand-ins.

pub mod agent;
pub mod error;
pub mod event;
pub mod frame;
pub mod registry;
pub mod turn;

// Re-export key types at crate root for ergonomics
pub use agent::{Agent, EventSink};
pub use error::{Error, ExecutionError, HistoryError, Result};
pub use event::{ExecutionEvent, PartKind};
pub use frame::StreamFrame;
pub use registry::AgentRegistry;
pub use turn::{ConversationTurn, Role};
