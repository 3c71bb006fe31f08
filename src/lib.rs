//! Survey and feedback management API.
//!
//! Administrators author surveys made of single-choice and free-text
//! questions, move them through `Draft -> Published -> Closed`, collect
//! anonymous responses while published and read per-option analytics. A
//! small user directory is kept alongside.
//!
//! # Layers
//!
//! - [`domain`]: survey aggregate, lifecycle rules, analytics
//! - [`service`]: validation and use cases
//! - [`infrastructure`]: repository traits, in-memory stores, configuration
//! - [`api`]: axum handlers, DTOs and error responses

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod service;
