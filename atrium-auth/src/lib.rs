// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role model, permission evaluator and resource scoping for the atrium
//! platform.
//!
//! Every user belongs to the platform-wide Group and to at most one Agency.
//! Access to every scoped resource (channels, log entries, notices, ledger
//! transactions) is decided by combining the user's global role tags with
//! the role tags they hold inside their agency.
//!
//! The crate is split along those lines:
//!
//! - [`User`] and the role enums form the authorization snapshot: plain data
//!   supplied by the external identity and profile services, with the basic
//!   role predicates as methods.
//! - [`policy`] holds the central policy table, one pure predicate per
//!   action family. Predicates take an explicit (optional) user snapshot and
//!   a target scope and return a boolean; an absent user is unauthenticated
//!   and always denied.
//! - [`scoping`] applies the policy to concrete resource collections:
//!   stable visibility filters for channels and logs, scope selection for
//!   the ledger.
//!
//! Nothing in this crate performs I/O or holds mutable state. Membership
//! changes are the concern of the `atrium-agency` crate and always produce a
//! fresh snapshot; snapshots must not outlive the request they were fetched
//! for.

mod identity;
pub mod policy;
mod resource;
mod role;
mod scope;
pub mod scoping;
mod user;

pub use identity::{AgencyId, IdentityError, UserId};
pub use resource::{AccountRef, Channel, LogEntry, Notice, Transaction};
pub use role::{AgencyRole, GlobalRole, RoleParseError};
pub use scope::Scope;
pub use user::{Affiliation, User};
