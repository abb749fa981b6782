// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory state and the membership transition functions.
//!
//! A [`Directory`] is the projection of the external store's users and
//! agencies that the lifecycle operates on. [`apply`] validates an action —
//! actor authorization first, then the membership invariants — and performs
//! the whole multi-record change in one step. Validation happens entirely
//! before the first write, so a failed action leaves the directory
//! untouched.

use std::collections::{BTreeSet, HashMap};

use atrium_auth::{Affiliation, AgencyId, AgencyRole, GlobalRole, User, UserId, policy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::AgencyAction;
use crate::agency::{Agency, AgencyStatus};

/// Violations of the membership rules.
///
/// `Unauthorized` is an authorization denial on a mutating operation and
/// deliberately carries no detail about which clause failed. The remaining
/// variants are invariant violations: caller bugs or race conditions, not
/// expected-path outcomes.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("actor is not permitted to perform this operation")]
    Unauthorized,

    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    #[error("unknown agency: {0}")]
    UnknownAgency(AgencyId),

    #[error("agency {0} already exists")]
    AgencyExists(AgencyId),

    #[error("agency name must not be empty")]
    EmptyName,

    #[error("user {0} already belongs to an agency")]
    AlreadyAffiliated(UserId),

    #[error("user {0} is not a member of agency {1}")]
    NotAMember(UserId, AgencyId),

    #[error("the owner of agency {0} cannot be removed while the agency exists")]
    OwnerRemoval(AgencyId),

    #[error("the Owner role tag is bound to the agency's owner")]
    OwnerRoleMismatch,
}

/// The users and agencies the lifecycle operates on.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    pub users: HashMap<UserId, User>,
    pub agencies: HashMap<AgencyId, Agency>,
}

impl Directory {
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn agency(&self, id: &AgencyId) -> Option<&Agency> {
        self.agencies.get(id)
    }
}

/// Validate and apply `action` on behalf of `actor`.
///
/// Store implementations call this under their atomic unit (a write lock, a
/// multi-row transaction or a conditional write), revalidating against the
/// state actually being mutated rather than trusting any earlier read.
pub fn apply(
    directory: &mut Directory,
    actor: &UserId,
    action: &AgencyAction,
) -> Result<(), DirectoryError> {
    match action {
        AgencyAction::Create { agency } => create(directory, actor, agency),
        AgencyAction::AddMember {
            agency_id,
            user_id,
            roles,
        } => add_member(directory, actor, agency_id, user_id, roles),
        AgencyAction::RemoveMember { agency_id, user_id } => {
            remove_member(directory, actor, agency_id, user_id)
        }
        AgencyAction::UpdateRoles {
            agency_id,
            user_id,
            roles,
        } => update_roles(directory, actor, agency_id, user_id, roles),
        AgencyAction::SetStatus { agency_id, status } => {
            set_status(directory, actor, agency_id, *status)
        }
        AgencyAction::Rename { agency_id, name } => rename(directory, actor, agency_id, name),
        AgencyAction::RecordActivity { agency_id, entry } => {
            record_activity(directory, actor, agency_id, entry)
        }
        AgencyAction::Delete { agency_id } => delete(directory, actor, agency_id),
    }
}

fn create(directory: &mut Directory, actor: &UserId, agency: &Agency) -> Result<(), DirectoryError> {
    let Some(creator) = directory.users.get(actor) else {
        return Err(DirectoryError::UnknownUser(actor.clone()));
    };

    // Agencies are created by their owner; acting for someone else is not a
    // thing.
    if !creator.global_roles.contains(&GlobalRole::AgencyOwner) || agency.owner_id != *actor {
        return Err(DirectoryError::Unauthorized);
    }

    if agency.name.is_empty() {
        return Err(DirectoryError::EmptyName);
    }

    if directory.agencies.contains_key(&agency.id) {
        return Err(DirectoryError::AgencyExists(agency.id.clone()));
    }

    // The owner's auto-join is part of the same change, so the creator must
    // not already belong to an agency.
    if creator.affiliation.is_some() {
        return Err(DirectoryError::AlreadyAffiliated(actor.clone()));
    }

    let mut agency = agency.clone();
    agency.member_ids.insert(agency.owner_id.clone());

    let owner = directory
        .users
        .get_mut(actor)
        .expect("creator was looked up above");
    owner.affiliation = Some(Affiliation::new(agency.id.clone(), [AgencyRole::Owner]));

    directory.agencies.insert(agency.id.clone(), agency);

    Ok(())
}

fn add_member(
    directory: &mut Directory,
    actor: &UserId,
    agency_id: &AgencyId,
    user_id: &UserId,
    roles: &BTreeSet<AgencyRole>,
) -> Result<(), DirectoryError> {
    authorize_management(directory, actor, agency_id)?;

    let Some(target) = directory.users.get(user_id) else {
        return Err(DirectoryError::UnknownUser(user_id.clone()));
    };

    if target.affiliation.is_some() {
        return Err(DirectoryError::AlreadyAffiliated(user_id.clone()));
    }

    // The Owner tag mirrors the agency's owner_id field and is assigned
    // only through agency creation.
    if roles.contains(&AgencyRole::Owner) {
        return Err(DirectoryError::OwnerRoleMismatch);
    }

    let target = directory
        .users
        .get_mut(user_id)
        .expect("target was looked up above");
    target.affiliation = Some(Affiliation::new(agency_id.clone(), roles.iter().copied()));

    let agency = directory
        .agencies
        .get_mut(agency_id)
        .expect("agency was authorized above");
    agency.member_ids.insert(user_id.clone());

    Ok(())
}

fn remove_member(
    directory: &mut Directory,
    actor: &UserId,
    agency_id: &AgencyId,
    user_id: &UserId,
) -> Result<(), DirectoryError> {
    authorize_management(directory, actor, agency_id)?;

    let Some(target) = directory.users.get(user_id) else {
        return Err(DirectoryError::UnknownUser(user_id.clone()));
    };

    if !target.belongs_to(agency_id) {
        return Err(DirectoryError::NotAMember(
            user_id.clone(),
            agency_id.clone(),
        ));
    }

    let agency = directory
        .agencies
        .get(agency_id)
        .expect("agency was authorized above");
    if agency.owner_id == *user_id {
        return Err(DirectoryError::OwnerRemoval(agency_id.clone()));
    }

    // The affiliation and the membership row go together.
    let target = directory
        .users
        .get_mut(user_id)
        .expect("target was looked up above");
    target.affiliation = None;

    let agency = directory
        .agencies
        .get_mut(agency_id)
        .expect("agency was authorized above");
    agency.member_ids.remove(user_id);

    Ok(())
}

fn update_roles(
    directory: &mut Directory,
    actor: &UserId,
    agency_id: &AgencyId,
    user_id: &UserId,
    roles: &BTreeSet<AgencyRole>,
) -> Result<(), DirectoryError> {
    authorize_management(directory, actor, agency_id)?;

    let Some(target) = directory.users.get(user_id) else {
        return Err(DirectoryError::UnknownUser(user_id.clone()));
    };

    if !target.belongs_to(agency_id) {
        return Err(DirectoryError::NotAMember(
            user_id.clone(),
            agency_id.clone(),
        ));
    }

    // Keep the Owner tag consistent with owner_id: the owner always carries
    // it, nobody else ever does.
    let agency = directory
        .agencies
        .get(agency_id)
        .expect("agency was authorized above");
    let target_is_owner = agency.owner_id == *user_id;
    if target_is_owner != roles.contains(&AgencyRole::Owner) {
        return Err(DirectoryError::OwnerRoleMismatch);
    }

    let target = directory
        .users
        .get_mut(user_id)
        .expect("target was looked up above");
    target.affiliation = Some(Affiliation::new(agency_id.clone(), roles.iter().copied()));

    Ok(())
}

fn set_status(
    directory: &mut Directory,
    actor: &UserId,
    agency_id: &AgencyId,
    status: AgencyStatus,
) -> Result<(), DirectoryError> {
    authorize_management(directory, actor, agency_id)?;

    let agency = directory
        .agencies
        .get_mut(agency_id)
        .expect("agency was authorized above");
    agency.status = status;

    Ok(())
}

fn rename(
    directory: &mut Directory,
    actor: &UserId,
    agency_id: &AgencyId,
    name: &str,
) -> Result<(), DirectoryError> {
    authorize_management(directory, actor, agency_id)?;

    if name.is_empty() {
        return Err(DirectoryError::EmptyName);
    }

    let agency = directory
        .agencies
        .get_mut(agency_id)
        .expect("agency was authorized above");
    agency.name = name.to_string();

    Ok(())
}

fn record_activity(
    directory: &mut Directory,
    actor: &UserId,
    agency_id: &AgencyId,
    entry: &str,
) -> Result<(), DirectoryError> {
    authorize_management(directory, actor, agency_id)?;

    let agency = directory
        .agencies
        .get_mut(agency_id)
        .expect("agency was authorized above");
    agency.record_activity(entry);

    Ok(())
}

fn delete(
    directory: &mut Directory,
    actor: &UserId,
    agency_id: &AgencyId,
) -> Result<(), DirectoryError> {
    let Some(agency) = directory.agencies.get(agency_id) else {
        return Err(DirectoryError::UnknownAgency(agency_id.clone()));
    };

    if directory.users.get(actor).is_none() {
        return Err(DirectoryError::UnknownUser(actor.clone()));
    }

    // Deletion is reserved for the authoritative owner; neither the global
    // owner flag nor a Manager role reaches it.
    if agency.owner_id != *actor {
        return Err(DirectoryError::Unauthorized);
    }

    let agency = directory
        .agencies
        .remove(agency_id)
        .expect("agency was looked up above");
    for member_id in &agency.member_ids {
        if let Some(member) = directory.users.get_mut(member_id) {
            member.affiliation = None;
        }
    }

    Ok(())
}

/// Authorization shared by the management operations: the agency must exist
/// and the actor must pass the management policy.
fn authorize_management(
    directory: &Directory,
    actor: &UserId,
    agency_id: &AgencyId,
) -> Result<(), DirectoryError> {
    if !directory.agencies.contains_key(agency_id) {
        return Err(DirectoryError::UnknownAgency(agency_id.clone()));
    }

    let Some(actor) = directory.users.get(actor) else {
        return Err(DirectoryError::UnknownUser(actor.clone()));
    };

    if !policy::can_manage_agency(Some(actor), agency_id) {
        return Err(DirectoryError::Unauthorized);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use atrium_auth::{AgencyId, AgencyRole, GlobalRole, User, UserId};

    use crate::action::AgencyAction;
    use crate::agency::{Agency, AgencyStatus};

    use super::{Directory, DirectoryError, apply};

    fn seeded_directory() -> Directory {
        let mut directory = Directory::default();
        for (id, name) in [("u1", "Ada"), ("u2", "Sam"), ("u3", "Kim")] {
            let mut user = User::new(UserId::new(id), name, format!("{id}@example.org"));
            if id == "u1" {
                user = user.with_global_role(GlobalRole::AgencyOwner);
            }
            directory.users.insert(user.id.clone(), user);
        }
        directory
    }

    fn created(directory: &mut Directory) -> AgencyId {
        let agency = Agency::new(
            AgencyId::new("a1"),
            "Tech Solutions",
            UserId::new("u1"),
            AgencyStatus::default(),
            1_700_000_000,
        );
        apply(
            directory,
            &UserId::new("u1"),
            &AgencyAction::Create { agency },
        )
        .unwrap();
        AgencyId::new("a1")
    }

    #[test]
    fn create_sets_owner_membership_and_mirror_role() {
        let mut directory = seeded_directory();
        let agency_id = created(&mut directory);

        let agency = directory.agency(&agency_id).unwrap();
        assert!(agency.is_member(&UserId::new("u1")));

        let owner = directory.user(&UserId::new("u1")).unwrap();
        assert!(owner.belongs_to(&agency_id));
        assert!(owner.has_agency_role(AgencyRole::Owner));
    }

    #[test]
    fn create_requires_the_global_owner_role() {
        let mut directory = seeded_directory();
        let agency = Agency::new(
            AgencyId::new("a1"),
            "Tech Solutions",
            UserId::new("u2"),
            AgencyStatus::default(),
            0,
        );

        let err = apply(
            &mut directory,
            &UserId::new("u2"),
            &AgencyAction::Create { agency },
        )
        .unwrap_err();
        assert_eq!(err, DirectoryError::Unauthorized);
    }

    #[test]
    fn owner_cannot_be_removed_while_the_agency_exists() {
        let mut directory = seeded_directory();
        let agency_id = created(&mut directory);

        let err = apply(
            &mut directory,
            &UserId::new("u1"),
            &AgencyAction::RemoveMember {
                agency_id: agency_id.clone(),
                user_id: UserId::new("u1"),
            },
        )
        .unwrap_err();
        assert_eq!(err, DirectoryError::OwnerRemoval(agency_id));
    }

    #[test]
    fn failed_action_leaves_the_directory_untouched() {
        let mut directory = seeded_directory();
        let agency_id = created(&mut directory);
        let before = directory.clone();

        // u2 is unaffiliated and holds no roles; the add must be refused and
        // nothing may change.
        let err = apply(
            &mut directory,
            &UserId::new("u2"),
            &AgencyAction::AddMember {
                agency_id,
                user_id: UserId::new("u3"),
                roles: BTreeSet::from([AgencyRole::Member]),
            },
        )
        .unwrap_err();
        assert_eq!(err, DirectoryError::Unauthorized);
        assert_eq!(directory, before);
    }

    #[test]
    fn delete_cascades_over_every_member() {
        let mut directory = seeded_directory();
        let agency_id = created(&mut directory);

        apply(
            &mut directory,
            &UserId::new("u1"),
            &AgencyAction::AddMember {
                agency_id: agency_id.clone(),
                user_id: UserId::new("u2"),
                roles: BTreeSet::from([AgencyRole::Manager]),
            },
        )
        .unwrap();

        apply(
            &mut directory,
            &UserId::new("u1"),
            &AgencyAction::Delete {
                agency_id: agency_id.clone(),
            },
        )
        .unwrap();

        assert!(directory.agency(&agency_id).is_none());
        for id in ["u1", "u2"] {
            assert!(directory.user(&UserId::new(id)).unwrap().affiliation.is_none());
        }
    }
}
