//! Crate aggregating the native currency balances of EVM wallets.
//!
//! The crate includes modules for configuration management, wallet models and validation, the ledger
//! provider and the balance aggregation built on it, the HTTP API, Prometheus metrics, and utilities
//! for testing purposes.

/// Module for configurations related to the application.
pub mod config;

/// Module containing constant values used in the project.
pub mod constants;

/// Module containing models used throughout the application.
pub mod models;

/// Module for handling Prometheus metrics.
pub mod prometheus_handler;

/// Module for the ledger provider and balance aggregation.
pub mod providers;

/// Module for the HTTP API and its server.
pub mod wallet_api;

/// Module containing utilities for testing purposes.
#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
