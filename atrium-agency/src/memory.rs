// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory reference implementation of the directory store.

use std::convert::Infallible;
use std::sync::Arc;

use atrium_auth::{AgencyId, User, UserId};
use tokio::sync::RwLock;

use crate::action::AgencyAction;
use crate::agency::Agency;
use crate::directory::{self, Directory};
use crate::store::{ApplyError, DirectoryStore};

/// An in-memory [`DirectoryStore`].
///
/// Supports shared use from asynchronous, multi-threaded contexts by
/// wrapping the directory in an `RwLock` and `Arc`; clones share state.
/// Every apply revalidates and mutates under the write lock, which makes
/// each action one atomic unit and serializes concurrent mutations — two
/// simultaneous activity entries both land, and no reader ever observes a
/// half-applied cascade.
#[derive(Clone, Debug, Default)]
pub struct MemoryDirectoryStore {
    inner: Arc<RwLock<Directory>>,
}

impl MemoryDirectoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the whole directory, for inspection.
    pub async fn directory(&self) -> Directory {
        self.inner.read().await.clone()
    }
}

impl DirectoryStore for MemoryDirectoryStore {
    type Error = Infallible;

    async fn user(&self, id: &UserId) -> Result<Option<User>, Self::Error> {
        Ok(self.inner.read().await.users.get(id).cloned())
    }

    async fn agency(&self, id: &AgencyId) -> Result<Option<Agency>, Self::Error> {
        Ok(self.inner.read().await.agencies.get(id).cloned())
    }

    async fn agencies(&self) -> Result<Vec<Agency>, Self::Error> {
        let mut agencies: Vec<_> = self.inner.read().await.agencies.values().cloned().collect();
        agencies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(agencies)
    }

    async fn members(&self, id: &AgencyId) -> Result<Vec<User>, Self::Error> {
        let directory = self.inner.read().await;
        let members = match directory.agencies.get(id) {
            Some(agency) => agency
                .member_ids
                .iter()
                .filter_map(|member_id| directory.users.get(member_id).cloned())
                .collect(),
            None => Vec::new(),
        };

        Ok(members)
    }

    async fn insert_user(&mut self, user: &User) -> Result<(), Self::Error> {
        self.inner
            .write()
            .await
            .users
            .insert(user.id.clone(), user.clone());

        Ok(())
    }

    async fn apply(
        &mut self,
        actor: &UserId,
        action: &AgencyAction,
    ) -> Result<(), ApplyError<Self::Error>> {
        let mut state = self.inner.write().await;
        Ok(directory::apply(&mut state, actor, action)?)
    }
}
