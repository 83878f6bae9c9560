//! reqwest implementation of [`Backend`].
//!
//! Reads are GET with query parameters, mutations POST with JSON or
//! multipart bodies, and the two destructive routes DELETE with query
//! parameters. Nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use photogroup_shared::constants::TUNNEL_WARNING_HEADER;
use photogroup_shared::protocol::{
    ApiErrorBody, BlockRequest, BlockedUser, BulkActionRequest, GroupDetails, GroupMember,
    HideMediaRequest, JoinRequest, LeaveGroupRequest, LoginRequest, LoginResponse,
    ManageMemberRequest, ManageRequestRequest, MediaItem, PushTokenRequest, RegisterRequest,
    RegisterResponse, ReportRequest, ToggleJoiningRequest, UserProfile,
};
use photogroup_shared::{GroupId, MediaId, UserId};

use crate::backend::Backend;
use crate::endpoint::Endpoint;
use crate::error::{NetError, NetResult};
use crate::forms::{GroupEdit, LocalFile, MediaUpload, ProfileUpdate};

/// Connection settings for [`HttpBackend`].
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    pub base_url: String,
    /// Send `ngrok-skip-browser-warning: true` with every request.
    pub skip_tunnel_warning: bool,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl HttpBackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            skip_tunnel_warning: true,
            timeout: None,
        }
    }
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &HttpBackendConfig) -> NetResult<Self> {
        let trimmed = config.base_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| NetError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        if config.skip_tunnel_warning {
            headers.insert(
                HeaderName::from_static(TUNNEL_WARNING_HEADER),
                HeaderValue::from_static("true"),
            );
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: trimmed.to_string(),
        })
    }

    fn request(&self, endpoint: Endpoint) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint.path());
        debug!(method = ?endpoint.method(), %endpoint, "backend request");
        match endpoint.method() {
            crate::endpoint::Method::Get => self.client.get(url),
            crate::endpoint::Method::Post => self.client.post(url),
            crate::endpoint::Method::Delete => self.client.delete(url),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
    ) -> NetResult<T> {
        let resp = self.request(endpoint).query(query).send().await?;
        read_json(endpoint, resp).await
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> NetResult<Response> {
        let resp = self.request(endpoint).json(body).send().await?;
        check_status(endpoint, resp).await
    }

    async fn post_form(&self, endpoint: Endpoint, form: Form) -> NetResult<Response> {
        let resp = self.request(endpoint).multipart(form).send().await?;
        check_status(endpoint, resp).await
    }

    async fn delete(&self, endpoint: Endpoint, query: &[(&str, String)]) -> NetResult<Response> {
        let resp = self.request(endpoint).query(query).send().await?;
        check_status(endpoint, resp).await
    }
}

/// Turn a non-2xx response into [`NetError::Status`], carrying the body's
/// `error`/`message` text when it has one.
async fn check_status(endpoint: Endpoint, resp: Response) -> NetResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp
        .bytes()
        .await
        .ok()
        .and_then(|body| serde_json::from_slice::<ApiErrorBody>(&body).ok())
        .and_then(ApiErrorBody::into_text);

    warn!(%endpoint, status = status.as_u16(), message = ?message, "backend rejected request");

    Err(NetError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(endpoint: Endpoint, resp: Response) -> NetResult<T> {
    let resp = check_status(endpoint, resp).await?;
    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

async fn file_part(file: &LocalFile) -> NetResult<Part> {
    let data = tokio::fs::read(&file.path)
        .await
        .map_err(|source| NetError::File {
            path: file.path.clone(),
            source,
        })?;
    Ok(Part::bytes(data)
        .file_name(file.file_name())
        .mime_str(&file.mime)?)
}

#[async_trait]
impl Backend for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn login(&self, req: &LoginRequest) -> NetResult<LoginResponse> {
        let resp = self.post_json(Endpoint::Login, req).await?;
        Ok(serde_json::from_slice(&resp.bytes().await?)?)
    }

    async fn register(&self, req: &RegisterRequest) -> NetResult<RegisterResponse> {
        let resp = self.post_json(Endpoint::Register, req).await?;
        let body = resp.bytes().await?;
        // 201 bodies are informational only
        Ok(serde_json::from_slice(&body).unwrap_or_default())
    }

    async fn update_push_token(&self, req: &PushTokenRequest) -> NetResult<()> {
        self.post_json(Endpoint::UpdatePushToken, req).await?;
        Ok(())
    }

    async fn get_user(&self, user_id: UserId) -> NetResult<UserProfile> {
        self.get_json(Endpoint::GetUser, &[("user_id", user_id.to_string())])
            .await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> NetResult<()> {
        let mut form = Form::new()
            .text("user_id", update.user_id.to_string())
            .text("username", update.username.clone())
            .text("email", update.email.clone())
            .text("phone_number", update.phone_number.clone());
        if let Some(ref image) = update.profile_image {
            form = form.part("profile_image", file_part(image).await?);
        }
        self.post_form(Endpoint::UpdateProfile, form).await?;
        Ok(())
    }

    async fn get_blocked_users(&self, user_id: UserId) -> NetResult<Vec<BlockedUser>> {
        self.get_json(Endpoint::GetBlockedUsers, &[("user_id", user_id.to_string())])
            .await
    }

    async fn block_user(&self, req: &BlockRequest) -> NetResult<()> {
        self.post_json(Endpoint::BlockUser, req).await?;
        Ok(())
    }

    async fn unblock_user(&self, req: &BlockRequest) -> NetResult<()> {
        self.post_json(Endpoint::UnblockUser, req).await?;
        Ok(())
    }

    async fn delete_account(&self, user_id: UserId) -> NetResult<()> {
        self.delete(Endpoint::DeleteAccount, &[("user_id", user_id.to_string())])
            .await?;
        Ok(())
    }

    async fn get_group_details(&self, group_id: GroupId) -> NetResult<GroupDetails> {
        self.get_json(Endpoint::GetGroupDetails, &[("group_id", group_id.to_string())])
            .await
    }

    async fn get_group_members(
        &self,
        group_id: GroupId,
        current_user_id: UserId,
    ) -> NetResult<Vec<GroupMember>> {
        self.get_json(
            Endpoint::GetGroupMembers,
            &[
                ("group_id", group_id.to_string()),
                ("current_user_id", current_user_id.to_string()),
            ],
        )
        .await
    }

    async fn get_group_requests(&self, group_id: GroupId) -> NetResult<Vec<JoinRequest>> {
        self.get_json(Endpoint::GetGroupRequests, &[("group_id", group_id.to_string())])
            .await
    }

    async fn manage_member(&self, req: &ManageMemberRequest) -> NetResult<()> {
        self.post_json(Endpoint::ManageMember, req).await?;
        Ok(())
    }

    async fn manage_request(&self, req: &ManageRequestRequest) -> NetResult<()> {
        self.post_json(Endpoint::ManageRequest, req).await?;
        Ok(())
    }

    async fn toggle_joining(&self, req: &ToggleJoiningRequest) -> NetResult<()> {
        self.post_json(Endpoint::ToggleJoining, req).await?;
        Ok(())
    }

    async fn leave_group(&self, req: &LeaveGroupRequest) -> NetResult<()> {
        self.post_json(Endpoint::LeaveGroup, req).await?;
        Ok(())
    }

    async fn edit_group(&self, edit: &GroupEdit) -> NetResult<()> {
        let mut form = Form::new()
            .text("user_id", edit.user_id.to_string())
            .text("group_id", edit.group_id.to_string())
            .text("group_name", edit.group_name.clone());
        if let Some(ref picture) = edit.picture {
            form = form.part("picture", file_part(picture).await?);
        }
        self.post_form(Endpoint::EditGroup, form).await?;
        Ok(())
    }

    async fn upload_media(&self, upload: &MediaUpload) -> NetResult<()> {
        let form = Form::new()
            .text("user_id", upload.user_id.to_string())
            .text("group_id", upload.group_id.to_string())
            .part("photo", file_part(&upload.file).await?);
        self.post_form(Endpoint::UploadPhoto, form).await?;
        Ok(())
    }

    async fn group_media(&self, group_id: GroupId, user_id: UserId) -> NetResult<Vec<MediaItem>> {
        self.get_json(
            Endpoint::GroupPhotos,
            &[
                ("group_id", group_id.to_string()),
                ("user_id", user_id.to_string()),
            ],
        )
        .await
    }

    async fn bulk_action(&self, req: &BulkActionRequest) -> NetResult<()> {
        self.post_json(Endpoint::BulkAction, req).await?;
        Ok(())
    }

    async fn hide_media(&self, req: &HideMediaRequest) -> NetResult<()> {
        self.post_json(Endpoint::HidePhoto, req).await?;
        Ok(())
    }

    async fn delete_media(&self, user_id: UserId, media_id: MediaId) -> NetResult<()> {
        self.delete(
            Endpoint::DeletePhoto,
            &[
                ("user_id", user_id.to_string()),
                ("photo_id", media_id.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    async fn report_content(&self, req: &ReportRequest) -> NetResult<()> {
        self.post_json(Endpoint::ReportContent, req).await?;
        Ok(())
    }
}
