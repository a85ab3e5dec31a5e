//! Core types for Chronicle

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Label of the sentinel tag for commits no release contains yet
pub const UNRELEASED: &str = "UNRELEASED";

/// The release a commit belongs to
///
/// Ordering follows version precedence (major, minor, patch, then
/// pre-release rules). [`ReleaseTag::Unreleased`] sorts after every
/// versioned tag. Two tags with the same precedence but different names
/// (`v1.0.0` and `1.0.0`) are ordered by name so sorting stays total.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReleaseTag {
    /// A tag whose name parses as a semantic version
    Version {
        /// Tag name as it appears in the repository
        name: String,
        /// Parsed version
        version: Version,
    },
    /// No tag contains the commit yet
    Unreleased,
}

impl ReleaseTag {
    /// Parse a tag name, returning `None` when it is not a valid version.
    ///
    /// A single leading `v`, `V` or `=` is accepted, as are surrounding
    /// whitespace characters.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        let candidate = name
            .strip_prefix(['v', 'V', '='])
            .unwrap_or(name);

        Version::parse(candidate).ok().map(|version| Self::Version {
            name: name.to_string(),
            version,
        })
    }

    /// Whether this is the unreleased sentinel
    pub fn is_unreleased(&self) -> bool {
        matches!(self, Self::Unreleased)
    }

    /// Tag name, or [`UNRELEASED`] for the sentinel
    pub fn name(&self) -> &str {
        match self {
            Self::Version { name, .. } => name,
            Self::Unreleased => UNRELEASED,
        }
    }
}

impl Ord for ReleaseTag {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Unreleased, Self::Unreleased) => Ordering::Equal,
            (Self::Unreleased, _) => Ordering::Greater,
            (_, Self::Unreleased) => Ordering::Less,
            (
                Self::Version {
                    name: a,
                    version: va,
                },
                Self::Version {
                    name: b,
                    version: vb,
                },
            ) => va.cmp(vb).then_with(|| a.cmp(b)),
        }
    }
}

impl PartialOrd for ReleaseTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReleaseTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == UNRELEASED {
            return Ok(Self::Unreleased);
        }
        Self::parse(s).ok_or_else(|| format!("Not a version tag: {}", s))
    }
}

impl Serialize for ReleaseTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReleaseTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
