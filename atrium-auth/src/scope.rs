// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::identity::AgencyId;

/// The boundary a resource lives in: the platform-wide Group or one specific
/// agency.
///
/// A tagged union, so an agency-scoped resource without an agency id is
/// unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "agency_id")]
pub enum Scope {
    #[serde(rename = "GROUP")]
    Group,

    #[serde(rename = "AGENCY")]
    Agency(AgencyId),
}

impl Scope {
    /// Return the agency id of an agency scope.
    pub fn agency(&self) -> Option<&AgencyId> {
        match self {
            Scope::Group => None,
            Scope::Agency(id) => Some(id),
        }
    }

    /// True if this is the Group scope.
    pub fn is_group(&self) -> bool {
        matches!(self, Scope::Group)
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Group => write!(f, "GROUP"),
            Scope::Agency(id) => write!(f, "AGENCY:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::identity::AgencyId;

    use super::Scope;

    #[test]
    fn wire_shape() {
        let scope = Scope::Agency(AgencyId::new("a1"));
        assert_eq!(
            serde_json::to_string(&scope).unwrap(),
            "{\"scope\":\"AGENCY\",\"agency_id\":\"a1\"}"
        );

        let scope = Scope::Group;
        assert_eq!(serde_json::to_string(&scope).unwrap(), "{\"scope\":\"GROUP\"}");
    }

    #[test]
    fn accessors() {
        assert!(Scope::Group.is_group());
        assert_eq!(Scope::Group.agency(), None);

        let id = AgencyId::new("a1");
        let scope = Scope::Agency(id.clone());
        assert_eq!(scope.agency(), Some(&id));
    }
}
