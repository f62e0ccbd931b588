//! # Chat Core
//!
//! The conversational "brain" of Retort. This crate interfaces with
//! `knowledge_store`, finds the closest stored pattern for free-text input,
//! and drives the teach flow that grows the store.
//!
//! ## Core Components
//!
//! - **matcher**: Best-match lookup using a string similarity ratio
//! - **session**: Explicit conversation state and the teach operation
//!
//! ## Design Philosophy
//!
//! - **Explicit State**: Teach mode is a value carried by the session, never
//!   an ambient flag
//! - **Pure Lookup**: Matching is a side-effect-free function over the input
//!   and the current knowledge base
//! - **Deterministic**: Equally scored candidates resolve to the first one
//!   in scan order

pub mod matcher;
pub mod session;

pub use matcher::*;
pub use session::*;
