use crate::core::error::{ArborError, ArborResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Marker separating the build stamp from the embedded source revision.
pub const REVISION_MARKER: &str = "+git";

/// Default number of revision characters embedded in an artifact version.
pub const DEFAULT_REVISION_LENGTH: usize = 7;

/// Compare two version strings structurally.
///
/// Each string is split into alternating runs: a (possibly empty) non-numeric
/// run followed by a (possibly empty) numeric run, repeated. Non-numeric runs
/// compare lexicographically, numeric runs compare as integers of arbitrary
/// length. This orders "1.10.0" after "1.2.0", which a plain string comparison
/// gets wrong.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut a = a;
    let mut b = b;

    while !a.is_empty() || !b.is_empty() {
        let (a_text, a_rest) = split_run(a, |c| !c.is_ascii_digit());
        let (b_text, b_rest) = split_run(b, |c| !c.is_ascii_digit());

        match a_text.cmp(b_text) {
            Ordering::Equal => {}
            other => return other,
        }

        let (a_num, a_rest) = split_run(a_rest, |c| c.is_ascii_digit());
        let (b_num, b_rest) = split_run(b_rest, |c| c.is_ascii_digit());

        match compare_numeric(a_num, b_num) {
            Ordering::Equal => {}
            other => return other,
        }

        a = a_rest;
        b = b_rest;
    }

    Ordering::Equal
}

/// Split off the longest prefix whose characters all satisfy `pred`.
fn split_run(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    s.split_at(end)
}

/// Compare two runs of ASCII digits without parsing them into a fixed-width integer.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// A version string ordered by [`compare_versions`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuredVersion(pub String);

impl StructuredVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StructuredVersion {
    fn from(version: &str) -> Self {
        Self(version.to_string())
    }
}

impl PartialOrd for StructuredVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StructuredVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_versions(&self.0, &other.0)
    }
}

impl fmt::Display for StructuredVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A version minted for a newly built artifact:
/// `{upstream}-{build_stamp}+git{revision}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactVersion {
    pub upstream: String,
    pub build_stamp: String,
    pub revision: String,
}

impl ArtifactVersion {
    pub fn new(upstream: &str, build_stamp: &str, revision: &str) -> Self {
        Self {
            upstream: upstream.to_string(),
            build_stamp: build_stamp.to_string(),
            revision: revision.to_string(),
        }
    }

    /// Parse a minted artifact version back into its parts
    /// (e.g. "1.2.3-20240101.000000+gitabc1234").
    pub fn parse(s: &str) -> ArborResult<Self> {
        let s = s.trim();

        let (head, revision) = s.rsplit_once(REVISION_MARKER).ok_or_else(|| {
            ArborError::Version(format!("Missing '{}' revision marker: {}", REVISION_MARKER, s))
        })?;

        let (upstream, build_stamp) = head.rsplit_once('-').ok_or_else(|| {
            ArborError::Version(format!("Missing build stamp separator: {}", s))
        })?;

        if upstream.is_empty() {
            return Err(ArborError::Version(format!("Missing upstream version: {}", s)));
        }

        let stamp_is_valid = !build_stamp.is_empty()
            && build_stamp.chars().all(|c| c.is_ascii_digit() || c == '.');
        if !stamp_is_valid {
            return Err(ArborError::Version(format!("Invalid build stamp: {}", s)));
        }

        let revision_is_valid =
            !revision.is_empty() && revision.chars().all(|c| c.is_ascii_alphanumeric());
        if !revision_is_valid {
            return Err(ArborError::Version(format!("Invalid revision: {}", s)));
        }

        Ok(Self::new(upstream, build_stamp, revision))
    }
}

impl fmt::Display for ArtifactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}{}{}",
            self.upstream, self.build_stamp, REVISION_MARKER, self.revision
        )
    }
}

/// Extract the source revision embedded in an artifact version.
///
/// Returns `None` when the version carries no revision marker. The revision is
/// truncated to `length` characters to match the short form recorded in graphs.
pub fn embedded_revision(version: &str, length: usize) -> Option<String> {
    let (_, revision) = version.rsplit_once(REVISION_MARKER)?;
    let revision: String = revision.chars().take(length).collect();
    if revision.is_empty() {
        None
    } else {
        Some(revision)
    }
}
