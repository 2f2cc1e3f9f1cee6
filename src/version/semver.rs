use std::cmp::Ordering;
use std::fmt;

use semver::{Version, VersionReq};

use crate::version::error::TrackerError;

/// Constraint used when the caller gives none: any released version
pub const DEFAULT_CONSTRAINT: &str = "> 0.0.0";

/// Parse a version string strictly as semver 2.0, tolerating one leading `v`.
///
/// Examples:
/// - "1.2.3" -> Version(1, 2, 3)
/// - "v1.2.3-rc.1+build.5" -> Version(1, 2, 3, pre: rc.1, build: build.5)
/// - "1.2" -> error
/// - " 1.2.3" -> error
pub fn parse_version(raw: &str) -> Result<Version, semver::Error> {
    Version::parse(raw.strip_prefix('v').unwrap_or(raw))
}

/// Compare two versions by semver precedence.
///
/// Unlike `Ord for Version`, build metadata does not take part in the
/// comparison, so `1.0.0+a` and `1.0.0+b` are equal here.
pub fn compare_precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}

/// A compiled version range expression.
///
/// Alternatives are separated by `||`. Within an alternative, comparators
/// separated by commas or whitespace must all hold. Besides the `semver`
/// crate's operators, a bare version pins that exact version, `~>` is read as
/// `~`, `A - B` is the inclusive range `>= A, <= B` and `!= X` excludes `X`.
#[derive(Debug, Clone)]
pub struct Constraint {
    source: String,
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone)]
struct Alternative {
    req: VersionReq,
    excluded: Vec<Version>,
}

impl Alternative {
    fn matches(&self, version: &Version) -> bool {
        self.req.matches(version)
            && !self
                .excluded
                .iter()
                .any(|excluded| compare_precedence(excluded, version) == Ordering::Equal)
    }
}

impl Constraint {
    pub fn parse(expr: &str) -> Result<Self, TrackerError> {
        let source = if expr.trim().is_empty() {
            DEFAULT_CONSTRAINT.to_string()
        } else {
            expr.trim().to_string()
        };

        let alternatives = source
            .split("||")
            .map(|group| compile_alternative(group, &source))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source,
            alternatives,
        })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|alt| alt.matches(version))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Compile one `||` group, e.g. `>= 1.0 < 2.0 != 1.5.0` into
/// `VersionReq(">=1.0, <2.0")` plus the excluded `1.5.0`.
fn compile_alternative(group: &str, source: &str) -> Result<Alternative, TrackerError> {
    let invalid = |reason: String| {
        TrackerError::Config(format!("invalid constraint {:?}: {}", source, reason))
    };

    // (operator, version) pairs; the operator may be empty
    let mut comparators: Vec<(String, String)> = Vec::new();
    let mut pending_op = String::new();
    let mut range_start: Option<String> = None;

    for token in group.split([',', ' ', '\t']).filter(|t| !t.is_empty()) {
        if token == "-" {
            match comparators.pop() {
                Some((op, lower))
                    if op.is_empty() && pending_op.is_empty() && range_start.is_none() =>
                {
                    range_start = Some(lower);
                    continue;
                }
                _ => return Err(invalid("hyphen range needs a bare lower bound".to_string())),
            }
        }

        let (op, version) = split_operator(token);
        pending_op.push_str(op);
        if version.is_empty() {
            continue;
        }
        let op = std::mem::take(&mut pending_op);

        match range_start.take() {
            Some(lower) if op.is_empty() => {
                comparators.push((">=".to_string(), lower));
                comparators.push(("<=".to_string(), version.to_string()));
            }
            Some(_) => return Err(invalid("hyphen range needs a bare upper bound".to_string())),
            None => comparators.push((op, version.to_string())),
        }
    }

    if range_start.is_some() {
        return Err(invalid("hyphen range without upper bound".to_string()));
    }
    if !pending_op.is_empty() {
        return Err(invalid(format!("operator {:?} without version", pending_op)));
    }
    if comparators.is_empty() {
        return Err(invalid("empty alternative".to_string()));
    }

    let mut required = Vec::new();
    let mut excluded = Vec::new();
    for (op, version) in comparators {
        match op.as_str() {
            "!=" => {
                let v = parse_version(&version)
                    .map_err(|e| invalid(format!("!={}: {}", version, e)))?;
                excluded.push(v);
            }
            "~>" => required.push(format!("~{}", version)),
            "" if !is_wildcard(&version) => required.push(format!("={}", version)),
            _ => required.push(format!("{}{}", op, version)),
        }
    }

    let req = if required.is_empty() {
        VersionReq::STAR
    } else {
        VersionReq::parse(&required.join(", ")).map_err(|e| invalid(e.to_string()))?
    };

    Ok(Alternative { req, excluded })
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '~' | '^' | '!')
}

fn is_wildcard(version: &str) -> bool {
    version.split('.').any(|part| matches!(part, "*" | "x" | "X"))
}

/// `>=v1.2.0` -> (`>=`, `1.2.0`)
fn split_operator(token: &str) -> (&str, &str) {
    let op_len = token.chars().take_while(|c| is_operator_char(*c)).count();
    let (op, rest) = token.split_at(op_len);
    (op, rest.strip_prefix('v').unwrap_or(rest))
}
