// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::identity::{AgencyId, UserId};
use crate::role::{AgencyRole, GlobalRole};

/// A user's membership in the one agency they currently belong to.
///
/// Agency roles only exist together with an agency id. Removing a user from
/// their agency drops the whole affiliation, so roles can never outlive the
/// membership they were granted for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    pub agency_id: AgencyId,
    pub roles: BTreeSet<AgencyRole>,
}

impl Affiliation {
    pub fn new(agency_id: AgencyId, roles: impl IntoIterator<Item = AgencyRole>) -> Self {
        Self {
            agency_id,
            roles: roles.into_iter().collect(),
        }
    }
}

/// A user's authorization-relevant claims, snapshotted at the time of an
/// access check.
///
/// Snapshots are plain data assembled from the external identity and profile
/// services. Membership mutations produce a new snapshot; callers must
/// refetch after any lifecycle operation instead of caching one beyond the
/// current request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub global_roles: BTreeSet<GlobalRole>,
    pub affiliation: Option<Affiliation>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            global_roles: BTreeSet::new(),
            affiliation: None,
        }
    }

    pub fn with_global_role(mut self, role: GlobalRole) -> Self {
        self.global_roles.insert(role);
        self
    }

    pub fn with_affiliation(
        mut self,
        agency_id: AgencyId,
        roles: impl IntoIterator<Item = AgencyRole>,
    ) -> Self {
        self.affiliation = Some(Affiliation::new(agency_id, roles));
        self
    }

    /// True if the user holds the platform-wide Core Member role.
    pub fn is_core_member(&self) -> bool {
        self.global_roles.contains(&GlobalRole::CoreMember)
    }

    /// True if the user is treated as an owner with respect to `agency`.
    ///
    /// The global `Agency Owner` flag grants owner-level treatment on its
    /// own, independent of the target agency. Otherwise the user must belong
    /// to `agency` and hold the `Owner` role there. Passing `None` skips the
    /// per-agency clause and consults the global flag only.
    pub fn is_agency_owner(&self, agency: Option<&AgencyId>) -> bool {
        if self.global_roles.contains(&GlobalRole::AgencyOwner) {
            return true;
        }

        match (agency, &self.affiliation) {
            (Some(agency), Some(affiliation)) => {
                affiliation.agency_id == *agency && affiliation.roles.contains(&AgencyRole::Owner)
            }
            _ => false,
        }
    }

    /// True if the user holds `role` in their own agency.
    ///
    /// This checks the role tag only. A decision about one specific agency
    /// must also compare [`User::belongs_to`].
    pub fn has_agency_role(&self, role: AgencyRole) -> bool {
        self.affiliation
            .as_ref()
            .is_some_and(|affiliation| affiliation.roles.contains(&role))
    }

    /// True if the user currently belongs to `agency`.
    pub fn belongs_to(&self, agency: &AgencyId) -> bool {
        self.affiliation
            .as_ref()
            .is_some_and(|affiliation| affiliation.agency_id == *agency)
    }
}
