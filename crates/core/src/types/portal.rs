//! External portals gated by the verification step.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned for an unknown portal slug.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown portal: {0}")]
pub struct PortalError(pub String);

/// An external audience with its own shared code and access log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Portal {
    /// 16th Circuit Court of Jackson County.
    Court,
    /// Law enforcement agencies.
    Police,
}

impl Portal {
    pub const ALL: [Self; 2] = [Self::Court, Self::Police];

    /// URL path segment.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Court => "court",
            Self::Police => "police",
        }
    }

    /// Heading shown above the verification form.
    #[must_use]
    pub const fn audience(self) -> &'static str {
        match self {
            Self::Court => "16th Circuit Court of Jackson County, Missouri",
            Self::Police => "Law Enforcement Partners",
        }
    }

    /// Page title for the portal.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Court => "JCPAO APA Directory (Courts)",
            Self::Police => "JCPAO APA Directory (Police)",
        }
    }
}

impl fmt::Display for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Portal {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|portal| portal.slug() == s)
            .ok_or_else(|| PortalError(s.to_owned()))
    }
}
