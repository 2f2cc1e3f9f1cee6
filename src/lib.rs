//! Latest-release resolution for externally versioned artifacts
//!
//! A release channel names exactly one origin (a queried document, git tags,
//! GitHub releases or Docker Hub tags). The tracker fetches the candidate
//! version strings from that origin, parses them as semantic versions and
//! picks the highest one satisfying a constraint.

pub mod config;
pub mod document;
pub mod fetch;
pub mod version;
