use tracing::{error, info};

use photogroup_shared::protocol::{BlockRequest, BlockedUser, UserProfile};
use photogroup_shared::UserId;

use crate::error::ClientResult;
use crate::screens::avatar_url;
use crate::state::AppContext;

/// What the profile header shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub user: UserProfile,
    pub image_url: Option<String>,
}

impl ProfileView {
    pub fn is_super_admin(&self) -> bool {
        self.user.is_super_admin
    }
}

pub struct ProfileScreen {
    ctx: AppContext,
    profile: Option<ProfileView>,
    blocked: Vec<BlockedUser>,
}

impl ProfileScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            profile: None,
            blocked: Vec::new(),
        }
    }

    pub fn profile(&self) -> Option<&ProfileView> {
        self.profile.as_ref()
    }

    pub fn blocked(&self) -> &[BlockedUser] {
        &self.blocked
    }

    pub fn blocked_avatar(&self, user: &BlockedUser) -> Option<String> {
        avatar_url(
            self.ctx.backend.as_ref(),
            user.thumbnail_url.as_deref(),
            user.profile_image.as_deref(),
        )
    }

    pub async fn load(&mut self) -> ClientResult<&ProfileView> {
        let session = self.ctx.require_session()?;
        let user = self.ctx.backend.get_user(session.user_id).await.map_err(|e| {
            error!(user_id = %session.user_id, "Loading profile failed: {}", e);
            e
        })?;
        let image_url = avatar_url(
            self.ctx.backend.as_ref(),
            user.thumbnail_url.as_deref(),
            user.profile_image.as_deref(),
        );
        Ok(&*self.profile.insert(ProfileView { user, image_url }))
    }

    pub async fn load_blocked(&mut self) -> ClientResult<&[BlockedUser]> {
        let session = self.ctx.require_session()?;
        self.blocked = self.ctx.backend.get_blocked_users(session.user_id).await?;
        Ok(&self.blocked)
    }

    /// Unblocks `blocked_id` and reloads the list.
    pub async fn unblock(&mut self, blocked_id: UserId) -> ClientResult<()> {
        let session = self.ctx.require_session()?;
        let req = BlockRequest {
            blocker_id: session.user_id,
            blocked_id,
        };
        self.ctx.backend.unblock_user(&req).await.map_err(|e| {
            error!(%blocked_id, "Unblock failed: {}", e);
            e
        })?;
        info!(%blocked_id, "User unblocked");
        self.load_blocked().await?;
        Ok(())
    }

    pub fn logout(&mut self) -> ClientResult<()> {
        self.profile = None;
        self.blocked.clear();
        self.ctx.end_session()
    }

    /// Deletes the account on the backend, then clears the local session.
    pub async fn delete_account(&mut self) -> ClientResult<()> {
        let session = self.ctx.require_session()?;
        self.ctx
            .backend
            .delete_account(session.user_id)
            .await
            .map_err(|e| {
                error!(user_id = %session.user_id, "Account deletion failed: {}", e);
                e
            })?;
        info!(user_id = %session.user_id, "Account deleted");
        self.logout()
    }
}
