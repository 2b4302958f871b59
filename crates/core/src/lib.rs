//! Amberleaf Core - Shared types library.
//!
//! This crate provides common types used across the Amberleaf Exports
//! backend:
//! - `server` - REST service for inquiry submission and admin review
//! - `integration-tests` - End-to-end HTTP tests against the live service
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP, no
//! file access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Inquiry records, statuses, ids, emails, and the admin
//!   credential record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
