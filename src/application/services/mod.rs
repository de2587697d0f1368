//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`QuoteEngine`]: eligibility filtering and per-provider pricing
//! - [`BookingService`]: booking lifecycle orchestration

pub mod booking_service;
pub mod quote_engine;

pub use booking_service::BookingService;
pub use quote_engine::{QuoteConfig, QuoteEngine, QuoteRequest};
