// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Debug;
use std::time::{SystemTime, UNIX_EPOCH};

use atrium_auth::{AgencyId, AgencyRole, User, UserId};
use thiserror::Error;
use tracing::{debug, warn};

use crate::action::AgencyAction;
use crate::agency::{Agency, AgencyStatus};
use crate::directory::DirectoryError;
use crate::store::{ApplyError, DirectoryStore};

/// Errors surfaced by [`AgencyManager`] operations.
#[derive(Debug, Error)]
pub enum ManagerError<E: Debug> {
    /// Authorization denial or invariant violation; see [`DirectoryError`].
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The backing store is unavailable. Treat the operation as denied.
    #[error("store unavailable: {0:?}")]
    Store(E),
}

impl<E: Debug> From<ApplyError<E>> for ManagerError<E> {
    fn from(err: ApplyError<E>) -> Self {
        match err {
            ApplyError::Directory(err) => ManagerError::Directory(err),
            ApplyError::Store(err) => ManagerError::Store(err),
        }
    }
}

/// Lifecycle API over a [`DirectoryStore`].
///
/// The manager assembles records and actions; validation happens inside the
/// store's atomic apply, against the state actually being written. Mutating
/// operations are not idempotent and are never retried here.
#[derive(Clone, Debug)]
pub struct AgencyManager<S> {
    store: S,
}

impl<S> AgencyManager<S>
where
    S: DirectoryStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create an agency owned by `actor`.
    ///
    /// The actor becomes the agency's owner and first member; their user
    /// record picks up the `Owner` role in the same step.
    pub async fn create_agency(
        &mut self,
        actor: &UserId,
        name: &str,
        status: Option<AgencyStatus>,
    ) -> Result<Agency, ManagerError<S::Error>> {
        let agency = Agency::new(
            fresh_agency_id(),
            name,
            actor.clone(),
            status.unwrap_or_default(),
            unix_now(),
        );

        self.apply(
            actor,
            AgencyAction::Create {
                agency: agency.clone(),
            },
        )
        .await?;

        Ok(agency)
    }

    /// Affiliate `user_id` with the agency under the given roles.
    pub async fn add_member(
        &mut self,
        actor: &UserId,
        agency_id: &AgencyId,
        user_id: &UserId,
        roles: impl IntoIterator<Item = AgencyRole>,
    ) -> Result<(), ManagerError<S::Error>> {
        self.apply(
            actor,
            AgencyAction::AddMember {
                agency_id: agency_id.clone(),
                user_id: user_id.clone(),
                roles: roles.into_iter().collect(),
            },
        )
        .await
    }

    /// End a member's affiliation with the agency.
    pub async fn remove_member(
        &mut self,
        actor: &UserId,
        agency_id: &AgencyId,
        user_id: &UserId,
    ) -> Result<(), ManagerError<S::Error>> {
        self.apply(
            actor,
            AgencyAction::RemoveMember {
                agency_id: agency_id.clone(),
                user_id: user_id.clone(),
            },
        )
        .await
    }

    /// Replace a member's agency roles.
    pub async fn update_member_roles(
        &mut self,
        actor: &UserId,
        agency_id: &AgencyId,
        user_id: &UserId,
        roles: impl IntoIterator<Item = AgencyRole>,
    ) -> Result<(), ManagerError<S::Error>> {
        self.apply(
            actor,
            AgencyAction::UpdateRoles {
                agency_id: agency_id.clone(),
                user_id: user_id.clone(),
                roles: roles.into_iter().collect(),
            },
        )
        .await
    }

    pub async fn set_status(
        &mut self,
        actor: &UserId,
        agency_id: &AgencyId,
        status: AgencyStatus,
    ) -> Result<(), ManagerError<S::Error>> {
        self.apply(
            actor,
            AgencyAction::SetStatus {
                agency_id: agency_id.clone(),
                status,
            },
        )
        .await
    }

    pub async fn rename_agency(
        &mut self,
        actor: &UserId,
        agency_id: &AgencyId,
        name: &str,
    ) -> Result<(), ManagerError<S::Error>> {
        self.apply(
            actor,
            AgencyAction::Rename {
                agency_id: agency_id.clone(),
                name: name.to_string(),
            },
        )
        .await
    }

    /// Prepend an entry to the agency's bounded activity log.
    pub async fn record_activity(
        &mut self,
        actor: &UserId,
        agency_id: &AgencyId,
        entry: &str,
    ) -> Result<(), ManagerError<S::Error>> {
        self.apply(
            actor,
            AgencyAction::RecordActivity {
                agency_id: agency_id.clone(),
                entry: entry.to_string(),
            },
        )
        .await
    }

    /// Delete the agency, cascading over every member's affiliation.
    pub async fn delete_agency(
        &mut self,
        actor: &UserId,
        agency_id: &AgencyId,
    ) -> Result<(), ManagerError<S::Error>> {
        self.apply(
            actor,
            AgencyAction::Delete {
                agency_id: agency_id.clone(),
            },
        )
        .await
    }

    /// Register a user profile supplied by the external identity service.
    pub async fn register_user(&mut self, user: &User) -> Result<(), ManagerError<S::Error>> {
        self.store
            .insert_user(user)
            .await
            .map_err(ManagerError::Store)
    }

    /// Get a user snapshot.
    pub async fn user(&self, id: &UserId) -> Result<Option<User>, ManagerError<S::Error>> {
        self.store.user(id).await.map_err(ManagerError::Store)
    }

    /// Get an agency record.
    pub async fn agency(&self, id: &AgencyId) -> Result<Option<Agency>, ManagerError<S::Error>> {
        self.store.agency(id).await.map_err(ManagerError::Store)
    }

    /// All agency records, newest first.
    pub async fn agencies(&self) -> Result<Vec<Agency>, ManagerError<S::Error>> {
        self.store.agencies().await.map_err(ManagerError::Store)
    }

    /// Snapshots of an agency's current members.
    pub async fn members(&self, id: &AgencyId) -> Result<Vec<User>, ManagerError<S::Error>> {
        self.store.members(id).await.map_err(ManagerError::Store)
    }

    async fn apply(
        &mut self,
        actor: &UserId,
        action: AgencyAction,
    ) -> Result<(), ManagerError<S::Error>> {
        match self.store.apply(actor, &action).await {
            Ok(()) => {
                debug!(
                    "applied {} on agency {} for {}",
                    action.kind(),
                    action.agency_id(),
                    actor
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "refused {} on agency {} for {}: {:?}",
                    action.kind(),
                    action.agency_id(),
                    actor,
                    err
                );
                Err(err.into())
            }
        }
    }
}

fn fresh_agency_id() -> AgencyId {
    let bytes: [u8; 16] = rand::random();
    AgencyId::new(hex::encode(bytes))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time is set after the unix epoch")
        .as_secs()
}
