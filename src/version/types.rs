use semver::Version;

use crate::version::error::TrackerError;
use crate::version::semver::parse_version;

/// A version discovered from a release source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Parsed semantic version
    pub version: Version,
    /// Candidate string as the source reported it (e.g. "v1.2.3")
    pub raw: String,
    /// Description declared for the source, if any
    pub description: Option<String>,
}

impl Release {
    pub fn parse(raw: &str, description: Option<&str>) -> Result<Self, semver::Error> {
        Ok(Self {
            version: parse_version(raw)?,
            raw: raw.to_string(),
            description: description.map(str::to_string),
        })
    }
}

/// Parse every candidate into a release, failing on the first one that is
/// not a semantic version.
pub fn versions_to_releases(
    raw_versions: &[String],
    description: Option<&str>,
) -> Result<Vec<Release>, TrackerError> {
    raw_versions
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            Release::parse(raw, description).map_err(|source| TrackerError::Parse {
                index,
                raw: raw.clone(),
                source,
            })
        })
        .collect()
}
