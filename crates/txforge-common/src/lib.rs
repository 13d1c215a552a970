//! Txforge Common Library
//!
//! Shared error handling, logging, and checksum utilities for the txforge
//! workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all txforge
//! workspace members:
//!
//! - **Error Handling**: The [`TxforgeError`] type and [`Result`] alias
//! - **Logging**: Tracing configuration and initialization
//! - **Checksums**: SHA-256 fingerprinting of produced archives

pub mod checksum;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{Result, TxforgeError};
