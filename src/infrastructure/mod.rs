//! # Infrastructure Layer
//!
//! Ports and adapters for everything outside the domain: persistence,
//! the shared exchange-rate table, and the customs reference.

pub mod customs;
pub mod exchange;
pub mod persistence;
