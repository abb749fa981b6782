// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned when parsing role claims supplied by the external
/// identity service.
#[derive(Debug, Error)]
pub enum RoleParseError {
    #[error("unknown global role tag: {0}")]
    UnknownGlobalRole(String),

    #[error("unknown agency role tag: {0}")]
    UnknownAgencyRole(String),
}

/// Role tags granted at the platform level.
///
/// Non-exclusive: a user may hold both, one or neither.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GlobalRole {
    /// Oversight across the entire platform and all agencies.
    #[serde(rename = "Core Member")]
    CoreMember,

    /// Owner-level treatment for agency-scoped actions, regardless of the
    /// user's actual agency affiliation.
    #[serde(rename = "Agency Owner")]
    AgencyOwner,
}

impl Display for GlobalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GlobalRole::CoreMember => "Core Member",
            GlobalRole::AgencyOwner => "Agency Owner",
        };

        write!(f, "{}", s)
    }
}

impl FromStr for GlobalRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Core Member" => Ok(GlobalRole::CoreMember),
            "Agency Owner" => Ok(GlobalRole::AgencyOwner),
            other => Err(RoleParseError::UnknownGlobalRole(other.to_string())),
        }
    }
}

/// Role tags scoped to the single agency a user belongs to.
///
/// Only meaningful together with an agency affiliation; see
/// [`Affiliation`](crate::Affiliation).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgencyRole {
    /// Mirror of the agency's authoritative `owner_id` field on the owner's
    /// own membership record.
    Owner,
    Manager,
    #[serde(rename = "CFO")]
    Cfo,
    #[serde(rename = "HR")]
    Hr,
    Admin,
    Member,
}

impl Display for AgencyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgencyRole::Owner => "Owner",
            AgencyRole::Manager => "Manager",
            AgencyRole::Cfo => "CFO",
            AgencyRole::Hr => "HR",
            AgencyRole::Admin => "Admin",
            AgencyRole::Member => "Member",
        };

        write!(f, "{}", s)
    }
}

impl FromStr for AgencyRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Owner" => Ok(AgencyRole::Owner),
            "Manager" => Ok(AgencyRole::Manager),
            "CFO" => Ok(AgencyRole::Cfo),
            "HR" => Ok(AgencyRole::Hr),
            "Admin" => Ok(AgencyRole::Admin),
            "Member" => Ok(AgencyRole::Member),
            other => Err(RoleParseError::UnknownAgencyRole(other.to_string())),
        }
    }
}
