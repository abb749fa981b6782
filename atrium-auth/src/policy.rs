// SPDX-License-Identifier: MIT OR Apache-2.0

//! Central policy decisions, one predicate per action family.
//!
//! Each predicate takes an explicit user snapshot and, where applicable, the
//! target agency, and returns a boolean. An absent user is unauthenticated
//! and denied by every predicate. A `false` result is an authorization
//! denial, not an error; callers translate it into a "not permitted"
//! outcome without learning which clause failed.
//!
//! Core Members act as platform-wide observers and posters: they pass every
//! Group-scoped predicate and have blanket access to every agency-scoped
//! resource. Manager and Admin agency roles are empowered for notices and
//! logs but deliberately not for channel access; channels are open only to
//! owners and the agency's own members. This asymmetry is a reviewed
//! decision, not an accident.

use crate::identity::AgencyId;
use crate::role::AgencyRole;
use crate::scope::Scope;
use crate::user::User;

/// Group notices can be posted by Core Members only.
pub fn can_post_group_notice(user: Option<&User>) -> bool {
    user.is_some_and(User::is_core_member)
}

/// Agency notices can be posted by Core Members, by owners with respect to
/// the agency, and by Manager and Admin role holders.
pub fn can_post_agency_notice(user: Option<&User>, agency: &AgencyId) -> bool {
    let Some(user) = user else {
        return false;
    };

    user.is_core_member()
        || user.is_agency_owner(Some(agency))
        || user.has_agency_role(AgencyRole::Manager)
        || user.has_agency_role(AgencyRole::Admin)
}

/// The Group channel is open to Core Members only.
pub fn can_access_group_channel(user: Option<&User>) -> bool {
    user.is_some_and(User::is_core_member)
}

/// An agency channel is open to Core Members, owners with respect to the
/// agency and the agency's own members. Manager and Admin roles grant no
/// channel access of their own.
pub fn can_access_agency_channel(user: Option<&User>, agency: &AgencyId) -> bool {
    let Some(user) = user else {
        return false;
    };

    user.is_core_member() || user.is_agency_owner(Some(agency)) || user.belongs_to(agency)
}

/// The Group log book is open to Core Members only.
pub fn can_access_group_log(user: Option<&User>) -> bool {
    user.is_some_and(User::is_core_member)
}

/// Agency log access follows the agency notice policy. Reading and writing
/// log entries are one permission tier.
pub fn can_access_agency_log(user: Option<&User>, agency: &AgencyId) -> bool {
    can_post_agency_notice(user, agency)
}

/// Dispatch [`can_post_group_notice`] / [`can_post_agency_notice`] on a
/// scope.
pub fn can_post_notice(user: Option<&User>, scope: &Scope) -> bool {
    match scope {
        Scope::Group => can_post_group_notice(user),
        Scope::Agency(agency) => can_post_agency_notice(user, agency),
    }
}

/// Dispatch [`can_access_group_channel`] / [`can_access_agency_channel`] on
/// a scope.
pub fn can_access_channel(user: Option<&User>, scope: &Scope) -> bool {
    match scope {
        Scope::Group => can_access_group_channel(user),
        Scope::Agency(agency) => can_access_agency_channel(user, agency),
    }
}

/// Dispatch [`can_access_group_log`] / [`can_access_agency_log`] on a scope.
pub fn can_access_log(user: Option<&User>, scope: &Scope) -> bool {
    match scope {
        Scope::Group => can_access_group_log(user),
        Scope::Agency(agency) => can_access_agency_log(user, agency),
    }
}

/// Recording a ledger transaction follows the notice policy for the chosen
/// scope. Ledger reads are filtered by scope selection alone, see
/// [`scoping::visible_transactions`](crate::scoping::visible_transactions).
pub fn can_record_transaction(user: Option<&User>, scope: &Scope) -> bool {
    can_post_notice(user, scope)
}

/// True if the user may administer the agency itself: membership changes,
/// role assignment, status and info updates, activity entries.
///
/// Owners (with respect to the agency) and the agency's own Managers
/// qualify. Unlike the notice predicates, the Manager clause here is
/// agency-specific: managing is always directed at one concrete agency, so
/// the actor's affiliation must match it.
pub fn can_manage_agency(user: Option<&User>, agency: &AgencyId) -> bool {
    let Some(user) = user else {
        return false;
    };

    user.is_agency_owner(Some(agency))
        || (user.belongs_to(agency) && user.has_agency_role(AgencyRole::Manager))
}

#[cfg(test)]
mod tests {
    use crate::identity::{AgencyId, UserId};
    use crate::role::{AgencyRole, GlobalRole};
    use crate::scope::Scope;
    use crate::user::User;

    use super::*;

    fn agency_a() -> AgencyId {
        AgencyId::new("a1")
    }

    fn agency_b() -> AgencyId {
        AgencyId::new("a2")
    }

    fn plain_user() -> User {
        User::new(UserId::new("u0"), "Noor", "noor@example.org")
    }

    #[test]
    fn unauthenticated_is_denied_everywhere() {
        assert!(!can_post_group_notice(None));
        assert!(!can_post_agency_notice(None, &agency_a()));
        assert!(!can_access_group_channel(None));
        assert!(!can_access_agency_channel(None, &agency_a()));
        assert!(!can_access_group_log(None));
        assert!(!can_access_agency_log(None, &agency_a()));
        assert!(!can_record_transaction(None, &Scope::Group));
        assert!(!can_manage_agency(None, &agency_a()));
    }

    #[test]
    fn no_roles_no_affiliation_is_denied_everywhere() {
        let user = plain_user();

        for agency in [agency_a(), agency_b()] {
            assert!(!can_post_agency_notice(Some(&user), &agency));
            assert!(!can_access_agency_channel(Some(&user), &agency));
            assert!(!can_access_agency_log(Some(&user), &agency));
            assert!(!can_manage_agency(Some(&user), &agency));
        }

        assert!(!can_post_group_notice(Some(&user)));
        assert!(!can_access_group_channel(Some(&user)));
        assert!(!can_access_group_log(Some(&user)));
    }

    #[test]
    fn core_member_has_blanket_access() {
        let user = plain_user().with_global_role(GlobalRole::CoreMember);

        assert!(can_post_group_notice(Some(&user)));
        assert!(can_access_group_channel(Some(&user)));
        assert!(can_access_group_log(Some(&user)));

        for agency in [agency_a(), agency_b()] {
            assert!(can_post_agency_notice(Some(&user), &agency));
            assert!(can_access_agency_channel(Some(&user), &agency));
            assert!(can_access_agency_log(Some(&user), &agency));
        }
    }

    #[test]
    fn manager_gets_notices_and_logs_but_not_the_channel() {
        let manager = User::new(UserId::new("u2"), "Sam", "sam@example.org")
            .with_affiliation(agency_a(), [AgencyRole::Manager]);

        assert!(can_post_agency_notice(Some(&manager), &agency_a()));
        assert!(can_access_agency_log(Some(&manager), &agency_a()));
        // For their own agency the channel opens through the membership
        // clause, not through the Manager role.
        assert!(can_access_agency_channel(Some(&manager), &agency_a()));
        // The Manager role clause matches the role tag alone and is not
        // compared against the target agency, while the channel's
        // membership clause is. Hence a foreign agency's notices and logs
        // open for a Manager but its channel does not.
        assert!(can_post_agency_notice(Some(&manager), &agency_b()));
        assert!(can_access_agency_log(Some(&manager), &agency_b()));
        assert!(!can_access_agency_channel(Some(&manager), &agency_b()));
    }

    #[test]
    fn admin_matches_manager_for_notices_and_logs() {
        let admin = User::new(UserId::new("u3"), "Kim", "kim@example.org")
            .with_affiliation(agency_a(), [AgencyRole::Admin]);

        assert!(can_post_agency_notice(Some(&admin), &agency_a()));
        assert!(can_access_agency_log(Some(&admin), &agency_a()));
        assert!(!can_manage_agency(Some(&admin), &agency_a()));
    }

    #[test]
    fn plain_member_gets_the_channel_only() {
        let member = User::new(UserId::new("u4"), "Ida", "ida@example.org")
            .with_affiliation(agency_a(), [AgencyRole::Member]);

        assert!(can_access_agency_channel(Some(&member), &agency_a()));
        assert!(!can_post_agency_notice(Some(&member), &agency_a()));
        assert!(!can_access_agency_log(Some(&member), &agency_a()));
        assert!(!can_access_agency_channel(Some(&member), &agency_b()));
    }

    #[test]
    fn global_owner_flag_reaches_foreign_agencies() {
        let user = plain_user().with_global_role(GlobalRole::AgencyOwner);

        assert!(can_post_agency_notice(Some(&user), &agency_b()));
        assert!(can_access_agency_channel(Some(&user), &agency_b()));
        assert!(can_manage_agency(Some(&user), &agency_b()));
        // The global flag does not extend to Group-scoped resources.
        assert!(!can_post_group_notice(Some(&user)));
        assert!(!can_access_group_channel(Some(&user)));
    }

    #[test]
    fn owner_and_manager_post_notices_outsiders_do_not() {
        // Agency A: u1 owns it, u2 manages it, u3 is unaffiliated.
        let owner = User::new(UserId::new("u1"), "Ada", "ada@example.org")
            .with_affiliation(agency_a(), [AgencyRole::Owner]);
        let manager = User::new(UserId::new("u2"), "Sam", "sam@example.org")
            .with_affiliation(agency_a(), [AgencyRole::Manager]);
        let outsider = User::new(UserId::new("u3"), "Kim", "kim@example.org");

        assert!(can_post_agency_notice(Some(&owner), &agency_a()));
        assert!(can_post_agency_notice(Some(&manager), &agency_a()));
        assert!(!can_post_agency_notice(Some(&outsider), &agency_a()));
    }

    #[test]
    fn manage_requires_owner_or_local_manager() {
        let owner = User::new(UserId::new("u1"), "Ada", "ada@example.org")
            .with_affiliation(agency_a(), [AgencyRole::Owner]);
        let manager_elsewhere = User::new(UserId::new("u2"), "Sam", "sam@example.org")
            .with_affiliation(agency_b(), [AgencyRole::Manager]);

        assert!(can_manage_agency(Some(&owner), &agency_a()));
        assert!(!can_manage_agency(Some(&owner), &agency_b()));
        assert!(!can_manage_agency(Some(&manager_elsewhere), &agency_a()));
    }
}
