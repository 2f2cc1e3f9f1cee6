//! Release resolution layer
//!
//! This module turns a release channel configuration into a single "latest"
//! release.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Tracker   │────▶│  Provider   │────▶│    Fetch    │
//! │  (select)   │     │ (versions)  │     │ (http,exec) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   Semver    │     │  Document   │
//! │(constraints)│     │  (jsonpath) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`tracker`]: Provider selection and latest-release resolution
//! - [`provider`]: Provider trait producing releases from one origin
//! - [`providers`]: Command, git tags, content query and HTTP query providers
//! - [`semver`]: Version parsing, precedence and constraints
//! - [`types`]: The `Release` record
//! - [`error`]: Error types for fetching and resolution

pub mod error;
pub mod provider;
pub mod providers;
pub mod semver;
pub mod tracker;
pub mod types;
