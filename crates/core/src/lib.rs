//! Core types and shared functionality for joblens.
//!
//! This crate provides:
//! - The slug codec (stable per-job identifiers)
//! - The short-lived in-memory job cache
//! - The SQLite-backed search response cache
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod criteria;
pub mod error;
pub mod job;
pub mod jobs;
pub mod slug;

pub use cache::CacheDb;
pub use config::{AppConfig, ConfigError};
pub use criteria::{ContractType, SearchCriteria, WorkHours};
pub use error::Error;
pub use job::Job;
pub use jobs::{Clock, JobCache, SystemClock};
