//! Data models for transaction records and configuration.

pub mod config;
pub mod transaction;
