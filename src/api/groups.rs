use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::BearerAuth;
use crate::errors::ApiError;
use crate::services::group_service::LeaveOutcome;
use crate::services::{GroupService, IdentityService};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::group::{
    AddMemberRequest, CreateGroupRequest, GroupResponse, GroupSummaryResponse, MemberResponse,
    UpdateMemberRoleRequest,
};

/// Group and membership endpoints
pub struct GroupApi {
    group_service: Arc<GroupService>,
    identity_service: Arc<IdentityService>,
}

impl GroupApi {
    pub fn new(group_service: Arc<GroupService>, identity_service: Arc<IdentityService>) -> Self {
        Self {
            group_service,
            identity_service,
        }
    }
}

#[derive(Tags)]
enum GroupTags {
    /// Group management endpoints
    Groups,
}

#[OpenApi]
impl GroupApi {
    /// Create a group owned by the caller. Free-tier users may own at most
    /// one group.
    #[oai(path = "/groups", method = "post", tag = "GroupTags::Groups")]
    async fn create_group(
        &self,
        auth: BearerAuth,
        body: Json<CreateGroupRequest>,
    ) -> Result<Json<GroupResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let group = self
            .group_service
            .create_group(&identity, body.0.name)
            .await?;
        Ok(Json(group.into()))
    }

    /// List the caller's groups with their role in each
    #[oai(path = "/groups/my-groups", method = "get", tag = "GroupTags::Groups")]
    async fn my_groups(
        &self,
        auth: BearerAuth,
    ) -> Result<Json<Vec<GroupSummaryResponse>>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let groups = self.group_service.list_groups(&identity).await?;
        Ok(Json(groups.into_iter().map(Into::into).collect()))
    }

    /// List a group's members with their effective roles
    #[oai(path = "/groups/:group_id/members", method = "get", tag = "GroupTags::Groups")]
    async fn list_members(
        &self,
        auth: BearerAuth,
        group_id: Path<String>,
    ) -> Result<Json<Vec<MemberResponse>>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let members = self
            .group_service
            .list_members(&identity, &group_id.0)
            .await?;
        Ok(Json(members.into_iter().map(Into::into).collect()))
    }

    /// Add a member by username (owner only)
    #[oai(path = "/groups/:group_id/members", method = "post", tag = "GroupTags::Groups")]
    async fn add_member(
        &self,
        auth: BearerAuth,
        group_id: Path<String>,
        body: Json<AddMemberRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.identity_service
            .require_minimum_tier(&identity, 101)
            .await?;
        self.group_service
            .add_member(&identity, &group_id.0, &body.0.username)
            .await?;
        Ok(Json(MessageResponse::new("Member added successfully")))
    }

    /// Remove a member. Owners remove anyone but the owner; admins remove
    /// non-admin members only.
    #[oai(
        path = "/groups/:group_id/members/:user_id",
        method = "delete",
        tag = "GroupTags::Groups"
    )]
    async fn remove_member(
        &self,
        auth: BearerAuth,
        group_id: Path<String>,
        user_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.identity_service
            .require_minimum_tier(&identity, 101)
            .await?;
        self.group_service
            .remove_member(&identity, &group_id.0, &user_id.0)
            .await?;
        Ok(Json(MessageResponse::new("Member removed successfully")))
    }

    /// Set a member's role (owner only; the owner's role is immutable)
    #[oai(
        path = "/groups/:group_id/members/:user_id/role",
        method = "put",
        tag = "GroupTags::Groups"
    )]
    async fn update_member_role(
        &self,
        auth: BearerAuth,
        group_id: Path<String>,
        user_id: Path<String>,
        body: Json<UpdateMemberRoleRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.identity_service
            .require_minimum_tier(&identity, 101)
            .await?;
        self.group_service
            .update_member_role(&identity, &group_id.0, &user_id.0, &body.0.role)
            .await?;
        Ok(Json(MessageResponse::new("Role updated successfully")))
    }

    /// Leave the group. The owner leaving deletes the group entirely.
    #[oai(path = "/groups/:group_id/leave", method = "post", tag = "GroupTags::Groups")]
    async fn leave_group(
        &self,
        auth: BearerAuth,
        group_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let outcome = self
            .group_service
            .leave_group(&identity, &group_id.0)
            .await?;
        let message = match outcome {
            LeaveOutcome::Left => "Successfully left the group",
            LeaveOutcome::GroupDeleted => "Group and all associated data deleted successfully",
        };
        Ok(Json(MessageResponse::new(message)))
    }

    /// Delete the group and everything it owns (owner only)
    #[oai(path = "/groups/:group_id", method = "delete", tag = "GroupTags::Groups")]
    async fn delete_group(
        &self,
        auth: BearerAuth,
        group_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.group_service
            .delete_group(&identity, &group_id.0)
            .await?;
        Ok(Json(MessageResponse::new(
            "Group and all associated data deleted successfully",
        )))
    }
}
