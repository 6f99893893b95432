//! Strongly-typed identifiers for domain entities
//!
//! Patients, claims and insurance policies arrive from upstream systems with
//! their own codes (e.g. `PAT000001`), so those identifiers wrap the code as
//! given. Alerts are minted by this system and wrap a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

macro_rules! define_code {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an upstream-assigned code
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// Returns the code as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(CoreError::invalid_identifier(concat!(
                        $label,
                        " code must not be empty"
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self::new(code)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_code!(PatientId, "patient");
define_code!(ClaimId, "claim");
define_code!(InsuranceId, "insurance");

/// Namespace for content-derived alert identifiers
const ALERT_NAMESPACE: Uuid = Uuid::from_u128(0x6c0b_5e1a_93d4_4f2e_b7a1_20c8_f3d9_1e47);

/// Identifier of a COB alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(Uuid);

impl AlertId {
    /// Derives a stable identifier from the content that produced the alert
    ///
    /// The same claim and rule always map to the same identifier.
    pub fn derive(claim_id: &ClaimId, rule_id: &str) -> Self {
        let name = format!("{}/{}", claim_id.as_str(), rule_id);
        Self(Uuid::new_v5(&ALERT_NAMESPACE, name.as_bytes()))
    }

    /// Creates an identifier from a sequence number
    pub fn from_sequence(sequence: u64) -> Self {
        Self(Uuid::from_u64_pair(0, sequence))
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the identifier prefix for display
    pub fn prefix() -> &'static str {
        "ALT"
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::prefix(), self.0)
    }
}

impl FromStr for AlertId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Strip prefix if present
        let uuid_str = s.strip_prefix("ALT-").unwrap_or(s);
        Ok(Self(Uuid::parse_str(uuid_str)?))
    }
}

impl From<Uuid> for AlertId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
