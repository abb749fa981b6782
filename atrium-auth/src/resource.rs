// SPDX-License-Identifier: MIT OR Apache-2.0

//! The resource categories gated by scope.
//!
//! These are the shapes crossing the boundary to the external persistence
//! service; the storage and transport of the records themselves are not a
//! concern of this crate.

use serde::{Deserialize, Serialize};

use crate::identity::UserId;
use crate::scope::Scope;

/// A messaging channel, scoped to the Group or to one agency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub scope: Scope,
}

/// An entry in a Group or agency log book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    #[serde(flatten)]
    pub scope: Scope,
    pub text: String,
    pub created_by: UserId,
    pub created_at: u64,
}

/// A notice posted to the Group or to one agency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    #[serde(flatten)]
    pub scope: Scope,
    pub title: String,
    pub body: String,
    pub created_by: UserId,
    pub created_at: u64,
}

/// Reference to a ledger account, e.g. an agency sub-account inside the
/// Group ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    pub id: String,
    pub name: String,
}

/// A ledger transaction.
///
/// Amounts are minor units; positive values are credits, negative values
/// debits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(flatten)]
    pub scope: Scope,
    pub date: u64,
    pub description: String,
    pub amount: i64,
    pub account: AccountRef,
    pub created_by: UserId,
}
