//! Identity checks against the Experian CrossCore API.
//!
//! This crate maps identity records into the CrossCore request schema, signs
//! the serialized body with HMAC-SHA256, sends it over HTTPS and returns the
//! provider's response unmodified.

/// Configuration loading (environment, JSON file)
pub mod config;

/// Error type shared by every stage of the pipeline
pub mod error;

/// Startup wiring of signer, mapper, transport, gateway and service
pub mod factory;

/// CrossCore request mapping, signing and dispatch
pub mod gateway;

/// Request handler: decode, validate and verify
pub mod handler;

/// Identity record submitted for checking
pub mod identity;

/// Cooperative cancellation of in-flight checks
pub mod interrupt;

/// Failure containment around the gateway
pub mod service;

/// Request body signers
pub mod signer;

/// Structural validation of identity records
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, Result};
