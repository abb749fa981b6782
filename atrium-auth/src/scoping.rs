// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application of the policy predicates to resource collections.
//!
//! All filters are stable: retained items keep the order of the source
//! collection, nothing is re-sorted.
//!
//! Notices are the exception to the read-side pattern: any authenticated
//! user may read every notice, so no notice filter exists here and only
//! creation is gated, via [`policy::can_post_notice`]. The ledger is the
//! other way around: reads are filtered by scope selection alone, while
//! recording a transaction is gated by [`policy::can_record_transaction`].
//!
//! Log entries are gated identically for reading and writing; gate a
//! creation request with the same [`policy::can_access_log`] that filters
//! the listing. Message traffic inside a channel inherits the channel's
//! access predicate in both directions.

use crate::policy;
use crate::resource::{Channel, LogEntry, Transaction};
use crate::scope::Scope;
use crate::user::User;

/// The channels visible to a user.
pub fn visible_channels<'a>(user: Option<&User>, channels: &'a [Channel]) -> Vec<&'a Channel> {
    channels
        .iter()
        .filter(|channel| policy::can_access_channel(user, &channel.scope))
        .collect()
}

/// The log entries visible to a user.
pub fn visible_log_entries<'a>(user: Option<&User>, entries: &'a [LogEntry]) -> Vec<&'a LogEntry> {
    entries
        .iter()
        .filter(|entry| policy::can_access_log(user, &entry.scope))
        .collect()
}

/// The ledger transactions under the selected scope.
///
/// Scope selection is the only read-side filter the ledger has.
pub fn visible_transactions<'a>(
    selection: &Scope,
    transactions: &'a [Transaction],
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|transaction| transaction.scope == *selection)
        .collect()
}
