// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;
use std::fmt::{self, Display};

use atrium_auth::{AgencyId, UserId};
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in an agency's activity log.
pub const RECENT_ACTIVITY_CAP: usize = 10;

/// Availability status of an agency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgencyStatus {
    #[default]
    #[serde(rename = "Open to Work")]
    OpenToWork,
    Busy,
    #[serde(rename = "Break/Vacation")]
    BreakOrVacation,
    Holiday,
}

impl Display for AgencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgencyStatus::OpenToWork => "Open to Work",
            AgencyStatus::Busy => "Busy",
            AgencyStatus::BreakOrVacation => "Break/Vacation",
            AgencyStatus::Holiday => "Holiday",
        };

        write!(f, "{}", s)
    }
}

/// A tenant inside the platform-wide Group.
///
/// `owner_id` is the single authoritative ownership field. The `Owner` role
/// tag on the owner's own user record is a convenience mirror of it; the
/// transitions in [`directory`](crate::directory) keep the two consistent.
/// The owner is always a member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agency {
    pub id: AgencyId,
    pub name: String,
    pub owner_id: UserId,
    pub status: AgencyStatus,
    pub member_ids: BTreeSet<UserId>,
    /// Free-text activity entries, newest first, capped at
    /// [`RECENT_ACTIVITY_CAP`].
    pub recent_activity: Vec<String>,
    pub created_at: u64,
}

impl Agency {
    pub fn new(
        id: AgencyId,
        name: impl Into<String>,
        owner_id: UserId,
        status: AgencyStatus,
        created_at: u64,
    ) -> Self {
        let member_ids = BTreeSet::from([owner_id.clone()]);

        Self {
            id,
            name: name.into(),
            owner_id,
            status,
            member_ids,
            recent_activity: Vec::new(),
            created_at,
        }
    }

    /// True if `user` is currently a member of this agency.
    pub fn is_member(&self, user: &UserId) -> bool {
        self.member_ids.contains(user)
    }

    /// Prepend an activity entry, dropping the oldest entries beyond the
    /// cap.
    pub fn record_activity(&mut self, entry: impl Into<String>) {
        self.recent_activity.insert(0, entry.into());
        self.recent_activity.truncate(RECENT_ACTIVITY_CAP);
    }
}
