// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Debug;

use atrium_auth::{AgencyId, User, UserId};
use thiserror::Error;

use crate::action::AgencyAction;
use crate::agency::Agency;
use crate::directory::DirectoryError;

/// Failure modes of [`DirectoryStore::apply`].
#[derive(Debug, Error)]
pub enum ApplyError<E: Debug> {
    /// The action violates the membership rules; the store is unchanged.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The backing store could not be reached or left the request
    /// undecided. Callers must fail closed and treat the operation as
    /// denied.
    #[error("store unavailable: {0:?}")]
    Store(E),
}

/// Access to the users and agencies held by the external persistence
/// service.
///
/// Reads return point-in-time snapshots. A snapshot fetched before a
/// membership mutation is stale afterwards and must be refetched; nothing
/// here extends its lifetime beyond the current request.
///
/// [`apply`](DirectoryStore::apply) is the single mutation entry point.
/// Implementations must validate the action against the state actually
/// being written (not an earlier read) and persist the whole multi-record
/// change as one atomic unit — via [`directory::apply`](crate::directory::apply)
/// under a write lock, a multi-row transaction or a conditional write.
/// Concurrent applies touching the same agency must serialize; a reader
/// must never observe a partially applied action. Applies are not
/// idempotent and must not be retried blindly.
pub trait DirectoryStore {
    type Error: Debug;

    /// Get a user snapshot.
    fn user(&self, id: &UserId) -> impl Future<Output = Result<Option<User>, Self::Error>>;

    /// Get an agency record.
    fn agency(&self, id: &AgencyId) -> impl Future<Output = Result<Option<Agency>, Self::Error>>;

    /// All agency records, newest first.
    fn agencies(&self) -> impl Future<Output = Result<Vec<Agency>, Self::Error>>;

    /// Snapshots of an agency's current members.
    fn members(&self, id: &AgencyId) -> impl Future<Output = Result<Vec<User>, Self::Error>>;

    /// Register a user profile supplied by the external identity service.
    fn insert_user(&mut self, user: &User) -> impl Future<Output = Result<(), Self::Error>>;

    /// Validate and apply a membership mutation on behalf of `actor`.
    fn apply(
        &mut self,
        actor: &UserId,
        action: &AgencyAction,
    ) -> impl Future<Output = Result<(), ApplyError<Self::Error>>>;
}
