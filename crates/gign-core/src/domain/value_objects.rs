//! Domain value objects: TechnologyId, Priority.
//!
//! Pure value types with equality-by-value and no identity. Parsing is the
//! only place where invariants are enforced; once constructed, a value is
//! always valid.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── TechnologyId ─────────────────────────────────────────────────────────────

/// Identifier of the reserved group holding the existing user file.
pub const CUSTOM_ID: &str = "custom";

/// Identifier of the group added by `generate --security`.
pub const SECURITY_ID: &str = "security";

const MAX_ID_LEN: usize = 64;

/// Identifier of a technology, and therefore of its template.
///
/// Always lowercase, non-empty, and limited to `[a-z0-9+._-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TechnologyId(String);

impl TechnologyId {
    /// Parse and normalize an identifier (trimmed, lowercased).
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let id = raw.trim().to_ascii_lowercase();

        if id.is_empty() {
            return Err(DomainError::InvalidTechnologyId {
                id,
                reason: "identifier is empty".into(),
            });
        }
        if id.len() > MAX_ID_LEN {
            return Err(DomainError::InvalidTechnologyId {
                id,
                reason: format!("longer than {MAX_ID_LEN} characters"),
            });
        }
        if let Some(bad) = id.chars().find(|c| !is_id_char(*c)) {
            return Err(DomainError::InvalidTechnologyId {
                reason: format!("character '{bad}' is not allowed"),
                id,
            });
        }

        Ok(Self(id))
    }

    /// Identifier of the existing user file group.
    pub fn custom() -> Self {
        Self(CUSTOM_ID.to_owned())
    }

    pub fn security() -> Self {
        Self(SECURITY_ID.to_owned())
    }

    /// Identifier known to be valid at compile time (marker table entries).
    pub(crate) fn from_static(id: &'static str) -> Self {
        debug_assert!(Self::parse(id).is_ok(), "invalid static id {id}");
        Self(id.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_custom(&self) -> bool {
        self.0 == CUSTOM_ID
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '.' | '_' | '-')
}

impl fmt::Display for TechnologyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TechnologyId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TechnologyId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TechnologyId> for String {
    fn from(id: TechnologyId) -> Self {
        id.0
    }
}

impl AsRef<str> for TechnologyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── Priority ─────────────────────────────────────────────────────────────────

/// Urgency of a recommendation. Ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
