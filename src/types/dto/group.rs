use poem_openapi::Object;

use crate::services::group_service::{GroupSummary, ResolvedMember};
use crate::types::db::group;

#[derive(Object, Debug)]
pub struct CreateGroupRequest {
    #[oai(validator(min_length = 3, max_length = 255))]
    pub name: String,
}

#[derive(Object, Debug)]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub date_created: i64,
}

impl From<group::Model> for GroupResponse {
    fn from(group: group::Model) -> Self {
        Self {
            id: group.id,
            name: group.name,
            owner_id: group.owner_id,
            date_created: group.date_created,
        }
    }
}

/// A group as seen by the requesting member
#[derive(Object, Debug)]
pub struct GroupSummaryResponse {
    pub id: String,
    pub name: String,
    pub date_created: i64,
    pub is_owner: bool,
    pub role: String,
}

impl From<GroupSummary> for GroupSummaryResponse {
    fn from(summary: GroupSummary) -> Self {
        Self {
            id: summary.group.id,
            name: summary.group.name,
            date_created: summary.group.date_created,
            is_owner: summary.is_owner,
            role: summary.role.to_string(),
        }
    }
}

#[derive(Object, Debug)]
pub struct AddMemberRequest {
    #[oai(validator(min_length = 3, max_length = 255))]
    pub username: String,
}

#[derive(Object, Debug)]
pub struct UpdateMemberRoleRequest {
    /// One of member, admin, cleaner
    pub role: String,
}

/// A group member with their effective role
#[derive(Object, Debug)]
pub struct MemberResponse {
    pub id: String,
    pub username: String,
    pub date_joined: i64,
    pub is_owner: bool,
    pub role: String,
}

impl From<ResolvedMember> for MemberResponse {
    fn from(member: ResolvedMember) -> Self {
        Self {
            id: member.user_id,
            username: member.username,
            date_joined: member.date_joined,
            is_owner: member.is_owner,
            role: member.role.to_string(),
        }
    }
}
