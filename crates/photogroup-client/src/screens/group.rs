//! Group details: members, join requests, admin controls and the edit form.

use tracing::{error, info, warn};

use photogroup_net::{GroupEdit, LocalFile};
use photogroup_shared::protocol::{
    BlockRequest, GroupDetails, GroupMember, JoinRequest, LeaveGroupRequest, ManageMemberRequest,
    ManageRequestRequest, MemberAction, RequestDecision, ToggleJoiningRequest,
};
use photogroup_shared::validation::validate_required;
use photogroup_shared::{GroupId, UserId};

use crate::error::{ClientError, ClientResult};
use crate::form::TrackedForm;
use crate::ports::PickedMedia;
use crate::screens::{pick_picture, PictureSource};
use crate::state::AppContext;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFields {
    pub name: String,
    /// Newly chosen picture; `None` keeps the current one
    pub picture: Option<PickedMedia>,
}

pub struct GroupScreen {
    ctx: AppContext,
    group_id: GroupId,
    details: GroupDetails,
    members: Vec<GroupMember>,
    requests: Vec<JoinRequest>,
    is_admin: bool,
    edit: Option<TrackedForm<GroupFields>>,
}

impl GroupScreen {
    pub fn new(ctx: AppContext, group_id: GroupId) -> Self {
        Self {
            ctx,
            group_id,
            details: GroupDetails::default(),
            members: Vec::new(),
            requests: Vec::new(),
            is_admin: false,
            edit: None,
        }
    }

    pub fn details(&self) -> &GroupDetails {
        &self.details
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn requests(&self) -> &[JoinRequest] {
        &self.requests
    }

    /// Whether the viewer is an admin, as reported by the member list.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Text for the clipboard.
    pub fn copy_code(&self) -> Option<&str> {
        Some(self.details.group_code.as_str()).filter(|c| !c.is_empty())
    }

    pub async fn load(&mut self) -> ClientResult<()> {
        let me = self.ctx.require_session()?.user_id;
        let group_id = self.group_id;
        let backend = &self.ctx.backend;

        let (details, members, requests) = futures::join!(
            backend.get_group_details(group_id),
            backend.get_group_members(group_id, me),
            backend.get_group_requests(group_id),
        );

        let (details, members) = details.and_then(|d| members.map(|m| (d, m))).map_err(|e| {
            error!(%group_id, "Loading group failed: {}", e);
            e
        })?;
        self.is_admin = members.iter().any(|m| m.id == me && m.is_admin);
        self.details = details;
        self.members = members;

        // Join requests are an admin view; the list is optional.
        self.requests = requests.unwrap_or_else(|e| {
            warn!(%group_id, "Loading join requests failed: {}", e);
            Vec::new()
        });
        Ok(())
    }

    fn require_admin(&self) -> ClientResult<UserId> {
        let me = self.ctx.require_session()?.user_id;
        if !self.is_admin {
            warn!(group_id = %self.group_id, user_id = %me, "Admin action refused");
            return Err(ClientError::NotAdmin);
        }
        Ok(me)
    }

    async fn manage_member(&mut self, target: UserId, action: MemberAction) -> ClientResult<()> {
        let admin_id = self.require_admin()?;
        let req = ManageMemberRequest {
            admin_id,
            group_id: self.group_id,
            target_user_id: target,
            action,
        };
        self.ctx.backend.manage_member(&req).await.map_err(|e| {
            error!(%target, ?action, "Member action failed: {}", e);
            e
        })?;
        info!(%target, ?action, "Member action applied");
        self.load().await
    }

    pub async fn kick(&mut self, target: UserId) -> ClientResult<()> {
        self.manage_member(target, MemberAction::Kick).await
    }

    pub async fn promote(&mut self, target: UserId) -> ClientResult<()> {
        self.manage_member(target, MemberAction::Promote).await
    }

    async fn answer_request(&mut self, target: UserId, action: RequestDecision) -> ClientResult<()> {
        let admin_id = self.require_admin()?;
        let req = ManageRequestRequest {
            admin_id,
            group_id: self.group_id,
            target_user_id: target,
            action,
        };
        self.ctx.backend.manage_request(&req).await.map_err(|e| {
            error!(%target, ?action, "Answering join request failed: {}", e);
            e
        })?;
        self.load().await
    }

    pub async fn accept_request(&mut self, target: UserId) -> ClientResult<()> {
        self.answer_request(target, RequestDecision::Accept).await
    }

    pub async fn decline_request(&mut self, target: UserId) -> ClientResult<()> {
        self.answer_request(target, RequestDecision::Decline).await
    }

    /// Opens or closes the group to join requests.
    pub async fn set_joining_open(&mut self, open: bool) -> ClientResult<()> {
        let user_id = self.require_admin()?;
        let req = ToggleJoiningRequest {
            user_id,
            group_id: self.group_id,
            status: open,
        };
        self.ctx.backend.toggle_joining(&req).await?;
        self.details.is_joining_active = open;
        Ok(())
    }

    pub async fn block_member(&mut self, target: UserId) -> ClientResult<()> {
        let me = self.ctx.require_session()?.user_id;
        let req = BlockRequest {
            blocker_id: me,
            blocked_id: target,
        };
        self.ctx.backend.block_user(&req).await?;
        info!(%target, "Member blocked");
        self.load().await
    }

    pub async fn unblock_member(&mut self, target: UserId) -> ClientResult<()> {
        let me = self.ctx.require_session()?.user_id;
        let req = BlockRequest {
            blocker_id: me,
            blocked_id: target,
        };
        self.ctx.backend.unblock_user(&req).await?;
        info!(%target, "Member unblocked");
        self.load().await
    }

    /// Leaves the group. The UI navigates home on success.
    pub async fn leave(&self) -> ClientResult<()> {
        let me = self.ctx.require_session()?.user_id;
        let req = LeaveGroupRequest {
            user_id: me,
            group_id: self.group_id,
        };
        self.ctx.backend.leave_group(&req).await.map_err(|e| {
            error!(group_id = %self.group_id, "Leaving group failed: {}", e);
            e
        })?;
        info!(group_id = %self.group_id, "Left group");
        Ok(())
    }

    // --- Edit form ---

    pub fn begin_edit(&mut self) {
        self.edit = Some(TrackedForm::new(GroupFields {
            name: self.details.group_name.clone(),
            picture: None,
        }));
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub fn edit_fields(&self) -> Option<&GroupFields> {
        self.edit.as_ref().map(TrackedForm::current)
    }

    pub fn set_edit_name(&mut self, name: &str) {
        if let Some(form) = self.edit.as_mut() {
            form.edit().name = name.to_string();
        }
    }

    pub async fn choose_edit_picture(&mut self, source: PictureSource) -> ClientResult<bool> {
        if self.edit.is_none() {
            return Err(ClientError::InvalidState("group edit is not open"));
        }
        let Some(picked) = pick_picture(&self.ctx, source).await? else {
            return Ok(false);
        };
        if let Some(form) = self.edit.as_mut() {
            form.edit().picture = Some(picked);
        }
        Ok(true)
    }

    /// The trimmed name differs from the current one, or a picture was chosen.
    pub fn edit_has_changes(&self) -> bool {
        self.edit.as_ref().is_some_and(|form| {
            let f = form.current();
            f.name.trim() != form.baseline().name || f.picture.is_some()
        })
    }

    pub async fn save_edit(&mut self) -> ClientResult<()> {
        if !self.edit_has_changes() {
            return Err(ClientError::NoChanges);
        }
        let me = self.ctx.require_session()?.user_id;
        let fields = self
            .edit
            .as_ref()
            .map(|form| form.current().clone())
            .ok_or(ClientError::InvalidState("group edit is not open"))?;
        let name = fields.name.trim();
        validate_required("Group name", name)?;

        let edit = GroupEdit {
            user_id: me,
            group_id: self.group_id,
            group_name: name.to_string(),
            picture: fields
                .picture
                .as_ref()
                .filter(|p| p.is_local())
                .map(|p| LocalFile::image(p.path())),
        };
        self.ctx.backend.edit_group(&edit).await.map_err(|e| {
            error!(group_id = %self.group_id, "Editing group failed: {}", e);
            e
        })?;
        self.edit = None;
        info!(group_id = %self.group_id, "Group edited");
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{logged_in, member, Call, Harness, GROUP, ME, OTHER};

    async fn loaded(admin: bool) -> (Harness, GroupScreen) {
        let h = logged_in();
        {
            let mut data = h.backend.data.lock().unwrap();
            data.group = GroupDetails {
                id: Some(GROUP),
                group_name: "Trip".into(),
                group_code: "ABC123".into(),
                picture_url: None,
                thumbnail_url: None,
                is_joining_active: true,
            };
            data.members = vec![member(ME, admin), member(OTHER, !admin)];
            data.requests = vec![JoinRequest {
                request_id: photogroup_shared::RequestId(1),
                user_id: UserId(9),
                username: "new".into(),
            }];
        }
        let mut screen = GroupScreen::new(h.ctx.clone(), GROUP);
        screen.load().await.unwrap();
        (h, screen)
    }

    #[tokio::test]
    async fn admin_flag_comes_from_member_list() {
        let (_h, screen) = loaded(true).await;
        assert!(screen.is_admin());
        assert_eq!(screen.copy_code(), Some("ABC123"));
        assert_eq!(screen.requests().len(), 1);

        let (_h, screen) = loaded(false).await;
        assert!(!screen.is_admin());
    }

    #[tokio::test]
    async fn non_admin_actions_never_reach_backend() {
        let (h, mut screen) = loaded(false).await;
        assert!(matches!(
            screen.kick(OTHER).await.unwrap_err(),
            ClientError::NotAdmin
        ));
        assert!(matches!(
            screen.accept_request(UserId(9)).await.unwrap_err(),
            ClientError::NotAdmin
        ));
        assert!(matches!(
            screen.set_joining_open(false).await.unwrap_err(),
            ClientError::NotAdmin
        ));
        assert!(h.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn accepting_request_refreshes_members() {
        let (_h, mut screen) = loaded(true).await;
        screen.accept_request(UserId(9)).await.unwrap();
        assert!(screen.requests().is_empty());
        assert!(screen.members().iter().any(|m| m.id == UserId(9)));
    }

    #[tokio::test]
    async fn kick_and_promote() {
        let (h, mut screen) = loaded(true).await;
        screen.promote(OTHER).await.unwrap();
        assert!(screen.members().iter().any(|m| m.id == OTHER && m.is_admin));

        screen.kick(OTHER).await.unwrap();
        assert!(!screen.members().iter().any(|m| m.id == OTHER));
        assert!(h.backend.calls().contains(&Call::ManageMember(ManageMemberRequest {
            admin_id: ME,
            group_id: GROUP,
            target_user_id: OTHER,
            action: MemberAction::Kick,
        })));
    }

    #[tokio::test]
    async fn toggling_joining_updates_local_flag() {
        let (h, mut screen) = loaded(true).await;
        screen.set_joining_open(false).await.unwrap();
        assert!(!screen.details().is_joining_active);

        h.backend.fail("toggle-joining");
        assert!(screen.set_joining_open(true).await.is_err());
        assert!(!screen.details().is_joining_active);
    }

    #[tokio::test]
    async fn any_member_can_block() {
        let (_h, mut screen) = loaded(false).await;
        screen.block_member(OTHER).await.unwrap();
        assert!(screen.members().iter().any(|m| m.id == OTHER && m.is_blocked_by_me));
        screen.unblock_member(OTHER).await.unwrap();
        assert!(screen.members().iter().all(|m| !m.is_blocked_by_me));
    }

    #[tokio::test]
    async fn edit_detects_trimmed_name_changes() {
        let (h, mut screen) = loaded(false).await;
        screen.begin_edit();
        screen.set_edit_name("  Trip ");
        assert!(!screen.edit_has_changes());
        assert!(matches!(
            screen.save_edit().await.unwrap_err(),
            ClientError::NoChanges
        ));

        screen.set_edit_name(" Summer Trip ");
        assert!(screen.edit_has_changes());
        screen.save_edit().await.unwrap();

        assert_eq!(screen.details().group_name, "Summer Trip");
        assert!(screen.edit_fields().is_none());
        assert!(matches!(
            h.backend.calls().last(),
            Some(Call::EditGroup(edit)) if edit.picture.is_none()
        ));
    }

    #[tokio::test]
    async fn edit_with_new_picture() {
        let (h, mut screen) = loaded(true).await;
        *h.devices.picked_image.lock().unwrap() = Some(PickedMedia::photo("/cache/g.jpg"));

        screen.begin_edit();
        assert!(screen.choose_edit_picture(PictureSource::Library).await.unwrap());
        assert!(screen.edit_has_changes());
        screen.save_edit().await.unwrap();

        assert!(matches!(
            h.backend.calls().last(),
            Some(Call::EditGroup(edit)) if edit.picture.as_ref().map(|p| p.mime.as_str()) == Some("image/jpg")
        ));
    }

    #[tokio::test]
    async fn leave_posts_membership() {
        let (h, screen) = loaded(false).await;
        screen.leave().await.unwrap();
        assert_eq!(
            h.backend.calls(),
            vec![Call::Leave(LeaveGroupRequest {
                user_id: ME,
                group_id: GROUP,
            })]
        );
    }
}
