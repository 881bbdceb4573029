//! Agent execution driver and event streaming bridge.
//!
//! This crate turns one agent invocation into a live frame stream:
//!
//! - [`driver`] runs the invocation as a background tokio task and hands
//!   back a handle over its events and final result.
//! - [`session`] tracks per-session state: full-text accumulation and
//!   event-ordering validation.
//! - [`bridge`] drains the handle into an ordered [`StreamFrame`] channel
//!   with exactly one terminal frame.
//! - [`scripted`] is a minimal built-in agent so the server works without
//!   any external backend.
//!
//! [`StreamFrame`]: agenthub_core::StreamFrame

pub mod bridge;
pub mod driver;
pub mod scripted;
pub mod session;

pub use driver::ExecutionHandle;
pub use scripted::ScriptedAgent;
pub use session::StreamSession;
