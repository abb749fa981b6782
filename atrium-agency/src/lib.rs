// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agency membership lifecycle for the atrium platform.
//!
//! Agencies are tenants inside the platform-wide Group. Each has a single
//! authoritative owner, a set of members whose agency-scoped roles live on
//! their user records, a status and a bounded newest-first activity log.
//!
//! Membership mutations touch two logical records at once (the user and the
//! agency), so every operation is expressed as a typed [`AgencyAction`]
//! which a [`DirectoryStore`] implementation validates and persists as one
//! atomic unit. The pure transition functions in [`directory`] carry all
//! validation: actor authorization (via the `atrium-auth` policy) and the
//! membership invariants — a user belongs to at most one agency, roles
//! never outlive the membership, the owner cannot be removed while the
//! agency exists, and deleting an agency cascades over every member in the
//! same step.
//!
//! [`AgencyManager`] is the thin async API over a store; the in-memory
//! [`MemoryDirectoryStore`] is the reference store implementation used by
//! the tests.

mod action;
mod agency;
pub mod directory;
mod manager;
mod memory;
mod store;

pub use action::AgencyAction;
pub use agency::{Agency, AgencyStatus, RECENT_ACTIVITY_CAP};
pub use directory::{Directory, DirectoryError};
pub use manager::{AgencyManager, ManagerError};
pub use memory::MemoryDirectoryStore;
pub use store::{ApplyError, DirectoryStore};
