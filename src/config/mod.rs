//! Configuration module for extraction runs
//!
//! This module provides the `ScrapeConfig` struct and its type-safe builder,
//! plus the per-component sections handed to the prober, resolver and runner.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{Complete, ScrapeConfigBuilder, WithInputFile};
pub use types::{
    ExtractionRule, ProbeConfig, ReadinessCheck, ResolverConfig, RunnerConfig, ScrapeConfig,
};
