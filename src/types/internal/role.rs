use std::fmt;

/// Per-group capability level, resolved once by the role service and passed
/// around as a value. This is the single role representation; no call site
/// combines separate is_owner/is_admin booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRole {
    /// Derived from groups.owner_id, never stored as a role row
    Owner,
    Admin,
    Member,
    Cleaner,
    /// Not a member of the group at all
    None,
}

impl GroupRole {
    /// Parse a stored role-row value. Unknown strings fall back to Member,
    /// matching the column's default.
    pub fn from_assignment(value: &str) -> Self {
        match value {
            "admin" => GroupRole::Admin,
            "cleaner" => GroupRole::Cleaner,
            _ => GroupRole::Member,
        }
    }

    /// Parse a role string that a caller may assign to a member. Owner is
    /// not assignable; it is derived from group ownership.
    pub fn parse_assignable(value: &str) -> Option<Self> {
        match value {
            "member" => Some(GroupRole::Member),
            "admin" => Some(GroupRole::Admin),
            "cleaner" => Some(GroupRole::Cleaner),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupRole::Owner => "owner",
            GroupRole::Admin => "admin",
            GroupRole::Member => "member",
            GroupRole::Cleaner => "cleaner",
            GroupRole::None => "none",
        }
    }

    /// Owner or admin: the roles allowed to mutate group resources.
    pub fn is_manager(&self) -> bool {
        matches!(self, GroupRole::Owner | GroupRole::Admin)
    }
}

impl fmt::Display for GroupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_assignment_defaults_to_member() {
        assert_eq!(GroupRole::from_assignment("admin"), GroupRole::Admin);
        assert_eq!(GroupRole::from_assignment("cleaner"), GroupRole::Cleaner);
        assert_eq!(GroupRole::from_assignment("member"), GroupRole::Member);
        // drifted data falls back to the column default
        assert_eq!(GroupRole::from_assignment("owner"), GroupRole::Member);
        assert_eq!(GroupRole::from_assignment(""), GroupRole::Member);
    }

    #[test]
    fn test_owner_is_not_assignable() {
        assert_eq!(GroupRole::parse_assignable("owner"), None);
        assert_eq!(
            GroupRole::parse_assignable("cleaner"),
            Some(GroupRole::Cleaner)
        );
    }
}
