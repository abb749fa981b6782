// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;

use atrium_auth::{AgencyId, AgencyRole, UserId};
use serde::{Deserialize, Serialize};

use crate::agency::{Agency, AgencyStatus};

/// Membership mutations which can be applied to the directory.
///
/// Each action names everything a store needs to validate and persist the
/// whole change in one atomic unit; see
/// [`DirectoryStore::apply`](crate::store::DirectoryStore::apply).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AgencyAction {
    /// Register a fresh agency record, including the owner's auto-join.
    Create { agency: Agency },

    /// Affiliate a user with the agency under the given roles.
    AddMember {
        agency_id: AgencyId,
        user_id: UserId,
        roles: BTreeSet<AgencyRole>,
    },

    /// End a member's affiliation, clearing their agency roles with it.
    RemoveMember {
        agency_id: AgencyId,
        user_id: UserId,
    },

    /// Replace a member's agency roles.
    UpdateRoles {
        agency_id: AgencyId,
        user_id: UserId,
        roles: BTreeSet<AgencyRole>,
    },

    SetStatus {
        agency_id: AgencyId,
        status: AgencyStatus,
    },

    Rename {
        agency_id: AgencyId,
        name: String,
    },

    /// Prepend an entry to the agency's bounded activity log.
    RecordActivity {
        agency_id: AgencyId,
        entry: String,
    },

    /// Delete the agency, cascading over every member's affiliation.
    Delete { agency_id: AgencyId },
}

impl AgencyAction {
    /// The agency the action is directed at.
    pub fn agency_id(&self) -> &AgencyId {
        match self {
            AgencyAction::Create { agency } => &agency.id,
            AgencyAction::AddMember { agency_id, .. }
            | AgencyAction::RemoveMember { agency_id, .. }
            | AgencyAction::UpdateRoles { agency_id, .. }
            | AgencyAction::SetStatus { agency_id, .. }
            | AgencyAction::Rename { agency_id, .. }
            | AgencyAction::RecordActivity { agency_id, .. }
            | AgencyAction::Delete { agency_id } => agency_id,
        }
    }

    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            AgencyAction::Create { .. } => "create",
            AgencyAction::AddMember { .. } => "add member",
            AgencyAction::RemoveMember { .. } => "remove member",
            AgencyAction::UpdateRoles { .. } => "update roles",
            AgencyAction::SetStatus { .. } => "set status",
            AgencyAction::Rename { .. } => "rename",
            AgencyAction::RecordActivity { .. } => "record activity",
            AgencyAction::Delete { .. } => "delete",
        }
    }
}
