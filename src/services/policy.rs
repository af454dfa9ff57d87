use crate::errors::internal::AccessError;
use crate::types::internal::GroupRole;

/// Group-scoped actions the policy engine knows about. Every mutation of
/// group-owned data passes through `authorize` with one of these; no caller
/// re-derives capability from role flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// View the group, its properties, stays and guests
    ViewGroup,
    CreateProperty,
    UpdateProperty,
    /// Deletion is owner-only unless the admin created the property
    DeleteProperty,
    AddMember,
    /// Removing a member; the target's role decides the admin case
    RemoveMember,
    UpdateMemberRole,
    /// Create, update or delete a stay
    ManageStay,
    /// Create, update or delete a guest
    ManageGuest,
    /// Create, update or delete a cleaning notification
    ManageCleaning,
    /// List or read cleaning notifications
    ViewCleaning,
    DeleteGroup,
    LeaveGroup,
}

/// Contextual facts some rows of the policy table depend on.
#[derive(Debug, Default, Clone, Copy)]
pub struct PolicyContext {
    /// Whether the acting admin created the resource (property deletion)
    pub is_resource_creator: Option<bool>,

    /// Effective role of the member being removed or re-roled
    pub target_role: Option<GroupRole>,
}

/// Decide whether `role` may perform `action`.
///
/// Deny reasons are specific and surfaced verbatim; never collapse them
/// into a generic denial.
pub fn authorize(action: Action, role: GroupRole, ctx: &PolicyContext) -> Result<(), AccessError> {
    if role == GroupRole::None {
        return Err(AccessError::NotAMember);
    }

    match action {
        Action::ViewGroup | Action::ViewCleaning | Action::LeaveGroup => Ok(()),

        Action::CreateProperty
        | Action::UpdateProperty
        | Action::ManageStay
        | Action::ManageGuest
        | Action::ManageCleaning => {
            if role.is_manager() {
                Ok(())
            } else {
                Err(AccessError::InsufficientRole)
            }
        }

        Action::DeleteProperty => match role {
            GroupRole::Owner => Ok(()),
            GroupRole::Admin if ctx.is_resource_creator == Some(true) => Ok(()),
            _ => Err(AccessError::InsufficientRole),
        },

        Action::AddMember | Action::DeleteGroup => {
            if role == GroupRole::Owner {
                Ok(())
            } else {
                Err(AccessError::InsufficientRole)
            }
        }

        Action::RemoveMember => {
            if ctx.target_role == Some(GroupRole::Owner) {
                return Err(AccessError::CannotModifyOwner);
            }
            match role {
                GroupRole::Owner => Ok(()),
                GroupRole::Admin => {
                    if ctx.target_role == Some(GroupRole::Admin) {
                        Err(AccessError::AdminCannotRemoveAdmin)
                    } else {
                        Ok(())
                    }
                }
                _ => Err(AccessError::InsufficientRole),
            }
        }

        Action::UpdateMemberRole => {
            if ctx.target_role == Some(GroupRole::Owner) {
                return Err(AccessError::CannotModifyOwner);
            }
            if role == GroupRole::Owner {
                Ok(())
            } else {
                Err(AccessError::InsufficientRole)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PolicyContext {
        PolicyContext::default()
    }

    fn with_target(target: GroupRole) -> PolicyContext {
        PolicyContext {
            target_role: Some(target),
            ..PolicyContext::default()
        }
    }

    #[test]
    fn test_non_member_is_denied_everything() {
        for action in [
            Action::ViewGroup,
            Action::CreateProperty,
            Action::DeleteProperty,
            Action::AddMember,
            Action::RemoveMember,
            Action::ManageStay,
            Action::ManageGuest,
            Action::ManageCleaning,
            Action::ViewCleaning,
            Action::DeleteGroup,
            Action::LeaveGroup,
        ] {
            assert_eq!(
                authorize(action, GroupRole::None, &ctx()),
                Err(AccessError::NotAMember),
                "{action:?} should be denied for non-members"
            );
        }
    }

    #[test]
    fn test_every_member_role_can_view() {
        for role in [
            GroupRole::Owner,
            GroupRole::Admin,
            GroupRole::Member,
            GroupRole::Cleaner,
        ] {
            assert!(authorize(Action::ViewGroup, role, &ctx()).is_ok());
            assert!(authorize(Action::ViewCleaning, role, &ctx()).is_ok());
        }
    }

    #[test]
    fn test_property_mutation_requires_manager() {
        assert!(authorize(Action::CreateProperty, GroupRole::Owner, &ctx()).is_ok());
        assert!(authorize(Action::CreateProperty, GroupRole::Admin, &ctx()).is_ok());
        assert_eq!(
            authorize(Action::CreateProperty, GroupRole::Member, &ctx()),
            Err(AccessError::InsufficientRole)
        );
        assert_eq!(
            authorize(Action::UpdateProperty, GroupRole::Cleaner, &ctx()),
            Err(AccessError::InsufficientRole)
        );
    }

    #[test]
    fn test_admin_deletes_only_own_properties() {
        let creator = PolicyContext {
            is_resource_creator: Some(true),
            ..PolicyContext::default()
        };
        let not_creator = PolicyContext {
            is_resource_creator: Some(false),
            ..PolicyContext::default()
        };
        assert!(authorize(Action::DeleteProperty, GroupRole::Admin, &creator).is_ok());
        assert_eq!(
            authorize(Action::DeleteProperty, GroupRole::Admin, &not_creator),
            Err(AccessError::InsufficientRole)
        );
        // owners delete regardless of creator
        assert!(authorize(Action::DeleteProperty, GroupRole::Owner, &not_creator).is_ok());
    }

    #[test]
    fn test_member_management_is_owner_only() {
        assert!(authorize(Action::AddMember, GroupRole::Owner, &ctx()).is_ok());
        assert_eq!(
            authorize(Action::AddMember, GroupRole::Admin, &ctx()),
            Err(AccessError::InsufficientRole)
        );
        assert!(
            authorize(Action::UpdateMemberRole, GroupRole::Owner, &with_target(GroupRole::Member))
                .is_ok()
        );
        assert_eq!(
            authorize(Action::UpdateMemberRole, GroupRole::Admin, &with_target(GroupRole::Member)),
            Err(AccessError::InsufficientRole)
        );
    }

    #[test]
    fn test_admin_cannot_remove_admin() {
        assert_eq!(
            authorize(Action::RemoveMember, GroupRole::Admin, &with_target(GroupRole::Admin)),
            Err(AccessError::AdminCannotRemoveAdmin)
        );
        // but may remove ordinary members and cleaners
        assert!(
            authorize(Action::RemoveMember, GroupRole::Admin, &with_target(GroupRole::Member))
                .is_ok()
        );
        assert!(
            authorize(Action::RemoveMember, GroupRole::Admin, &with_target(GroupRole::Cleaner))
                .is_ok()
        );
        // owners remove admins freely
        assert!(
            authorize(Action::RemoveMember, GroupRole::Owner, &with_target(GroupRole::Admin))
                .is_ok()
        );
    }

    #[test]
    fn test_owner_is_immutable_via_member_paths() {
        assert_eq!(
            authorize(Action::RemoveMember, GroupRole::Owner, &with_target(GroupRole::Owner)),
            Err(AccessError::CannotModifyOwner)
        );
        assert_eq!(
            authorize(Action::UpdateMemberRole, GroupRole::Owner, &with_target(GroupRole::Owner)),
            Err(AccessError::CannotModifyOwner)
        );
        assert_eq!(
            authorize(Action::RemoveMember, GroupRole::Admin, &with_target(GroupRole::Owner)),
            Err(AccessError::CannotModifyOwner)
        );
    }

    #[test]
    fn test_group_deletion_is_owner_only() {
        assert!(authorize(Action::DeleteGroup, GroupRole::Owner, &ctx()).is_ok());
        for role in [GroupRole::Admin, GroupRole::Member, GroupRole::Cleaner] {
            assert_eq!(
                authorize(Action::DeleteGroup, role, &ctx()),
                Err(AccessError::InsufficientRole)
            );
        }
    }

    #[test]
    fn test_cleaner_views_but_does_not_manage_cleaning() {
        assert!(authorize(Action::ViewCleaning, GroupRole::Cleaner, &ctx()).is_ok());
        assert_eq!(
            authorize(Action::ManageCleaning, GroupRole::Cleaner, &ctx()),
            Err(AccessError::InsufficientRole)
        );
        assert_eq!(
            authorize(Action::ManageCleaning, GroupRole::Member, &ctx()),
            Err(AccessError::InsufficientRole)
        );
    }
}
