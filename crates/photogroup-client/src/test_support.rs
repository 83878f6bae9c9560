//! Fake backend and platform services for screen tests.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use photogroup_media::{Camera, CameraError, PictureOptions, RecordingOptions};
use photogroup_net::{Backend, GroupEdit, MediaUpload, NetError, NetResult, ProfileUpdate};
use photogroup_shared::protocol::*;
use photogroup_shared::{GroupId, MediaId, MediaKind, UserId};
use photogroup_store::{Database, Session};

use crate::ports::{
    Connectivity, Devices, MediaPicker, Permission, PermissionStatus, Permissions, PhoneVerifier,
    PickedMedia, PushNotifications, VerificationError, VerificationId,
};
use crate::state::{AppContext, AppState};

pub const ME: UserId = UserId(5);
pub const OTHER: UserId = UserId(6);
pub const GROUP: GroupId = GroupId(3);
pub const PASSWORD: &str = "secret";

/// A request the fake backend received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(LoginRequest),
    Register(RegisterRequest),
    PushToken(PushTokenRequest),
    UpdateProfile(ProfileUpdate),
    Block(BlockRequest),
    Unblock(BlockRequest),
    DeleteAccount(UserId),
    ManageMember(ManageMemberRequest),
    ManageRequest(ManageRequestRequest),
    ToggleJoining(ToggleJoiningRequest),
    Leave(LeaveGroupRequest),
    EditGroup(GroupEdit),
    Upload(MediaUpload),
    Bulk(BulkActionRequest),
    Hide(HideMediaRequest),
    Delete(UserId, MediaId),
    Report(ReportRequest),
}

#[derive(Default)]
pub struct Data {
    pub user: Option<UserProfile>,
    pub blocked: Vec<BlockedUser>,
    pub group: GroupDetails,
    pub members: Vec<GroupMember>,
    pub requests: Vec<JoinRequest>,
    pub media: Vec<MediaItem>,
    /// Ids the backend acknowledges in a bulk action but keeps listing.
    pub sticky: HashSet<MediaId>,
}

/// In-memory backend that applies mutations to [`Data`] and records every
/// call. Endpoints named in `failing` answer 500.
#[derive(Default)]
pub struct FakeBackend {
    pub data: Mutex<Data>,
    pub calls: Mutex<Vec<Call>>,
    pub failing: Mutex<HashSet<&'static str>>,
}

impl FakeBackend {
    pub fn fail(&self, endpoint: &'static str) {
        self.failing.lock().unwrap().insert(endpoint);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &'static str, call: Option<Call>) -> NetResult<()> {
        if let Some(call) = call {
            self.calls.lock().unwrap().push(call);
        }
        if self.failing.lock().unwrap().contains(endpoint) {
            return Err(NetError::Status {
                status: 500,
                message: Some(format!("{endpoint} failed")),
            });
        }
        Ok(())
    }
}

pub fn media_item(id: i64, uploader: UserId) -> MediaItem {
    MediaItem {
        id: MediaId(id),
        url: format!("http://backend/uploads/{id}.jpg"),
        thumbnail_url: None,
        kind: MediaKind::Photo,
        uploader_id: uploader,
        uploaded_by: None,
        uploaded_at: None,
    }
}

pub fn member(id: UserId, admin: bool) -> GroupMember {
    GroupMember {
        id,
        username: format!("user{id}"),
        profile_url: None,
        thumbnail_url: None,
        is_admin: admin,
        is_blocked_by_me: false,
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn base_url(&self) -> &str {
        "http://backend"
    }

    async fn login(&self, req: &LoginRequest) -> NetResult<LoginResponse> {
        self.record("login", Some(Call::Login(req.clone())))?;
        if req.password != PASSWORD {
            return Err(NetError::Status {
                status: 401,
                message: Some("Invalid phone number or password".into()),
            });
        }
        Ok(LoginResponse {
            user_id: ME,
            username: "ayse".into(),
            profile_image: Some("ayse.jpg".into()),
        })
    }

    async fn register(&self, req: &RegisterRequest) -> NetResult<RegisterResponse> {
        self.record("register", Some(Call::Register(req.clone())))?;
        Ok(RegisterResponse {
            message: Some("User registered".into()),
            user_id: Some(UserId(42)),
        })
    }

    async fn update_push_token(&self, req: &PushTokenRequest) -> NetResult<()> {
        self.record("update-push-token", Some(Call::PushToken(req.clone())))
    }

    async fn get_user(&self, user_id: UserId) -> NetResult<UserProfile> {
        self.record("get-user", None)?;
        self.data
            .lock()
            .unwrap()
            .user
            .clone()
            .filter(|u| u.id == user_id)
            .ok_or(NetError::Status {
                status: 404,
                message: Some("User not found".into()),
            })
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> NetResult<()> {
        self.record("update-profile", Some(Call::UpdateProfile(update.clone())))
    }

    async fn get_blocked_users(&self, _user_id: UserId) -> NetResult<Vec<BlockedUser>> {
        self.record("get-blocked-users", None)?;
        Ok(self.data.lock().unwrap().blocked.clone())
    }

    async fn block_user(&self, req: &BlockRequest) -> NetResult<()> {
        self.record("block-user", Some(Call::Block(req.clone())))?;
        let mut data = self.data.lock().unwrap();
        for m in data.members.iter_mut().filter(|m| m.id == req.blocked_id) {
            m.is_blocked_by_me = true;
        }
        Ok(())
    }

    async fn unblock_user(&self, req: &BlockRequest) -> NetResult<()> {
        self.record("unblock-user", Some(Call::Unblock(req.clone())))?;
        let mut data = self.data.lock().unwrap();
        data.blocked.retain(|b| b.blocked_id != req.blocked_id);
        for m in data.members.iter_mut().filter(|m| m.id == req.blocked_id) {
            m.is_blocked_by_me = false;
        }
        Ok(())
    }

    async fn delete_account(&self, user_id: UserId) -> NetResult<()> {
        self.record("delete-account", Some(Call::DeleteAccount(user_id)))
    }

    async fn get_group_details(&self, _group_id: GroupId) -> NetResult<GroupDetails> {
        self.record("get-group-details", None)?;
        Ok(self.data.lock().unwrap().group.clone())
    }

    async fn get_group_members(
        &self,
        _group_id: GroupId,
        _current_user_id: UserId,
    ) -> NetResult<Vec<GroupMember>> {
        self.record("get-group-members", None)?;
        Ok(self.data.lock().unwrap().members.clone())
    }

    async fn get_group_requests(&self, _group_id: GroupId) -> NetResult<Vec<JoinRequest>> {
        self.record("get-group-requests", None)?;
        Ok(self.data.lock().unwrap().requests.clone())
    }

    async fn manage_member(&self, req: &ManageMemberRequest) -> NetResult<()> {
        self.record("manage-member", Some(Call::ManageMember(req.clone())))?;
        let mut data = self.data.lock().unwrap();
        match req.action {
            MemberAction::Kick => data.members.retain(|m| m.id != req.target_user_id),
            MemberAction::Promote => {
                for m in data.members.iter_mut().filter(|m| m.id == req.target_user_id) {
                    m.is_admin = true;
                }
            }
        }
        Ok(())
    }

    async fn manage_request(&self, req: &ManageRequestRequest) -> NetResult<()> {
        self.record("manage-request", Some(Call::ManageRequest(req.clone())))?;
        let mut data = self.data.lock().unwrap();
        data.requests.retain(|r| r.user_id != req.target_user_id);
        if req.action == RequestDecision::Accept {
            data.members.push(member(req.target_user_id, false));
        }
        Ok(())
    }

    async fn toggle_joining(&self, req: &ToggleJoiningRequest) -> NetResult<()> {
        self.record("toggle-joining", Some(Call::ToggleJoining(req.clone())))?;
        self.data.lock().unwrap().group.is_joining_active = req.status;
        Ok(())
    }

    async fn leave_group(&self, req: &LeaveGroupRequest) -> NetResult<()> {
        self.record("leave-group", Some(Call::Leave(req.clone())))
    }

    async fn edit_group(&self, edit: &GroupEdit) -> NetResult<()> {
        self.record("edit-group", Some(Call::EditGroup(edit.clone())))?;
        self.data.lock().unwrap().group.group_name = edit.group_name.clone();
        Ok(())
    }

    async fn upload_media(&self, upload: &MediaUpload) -> NetResult<()> {
        self.record("upload-photo", Some(Call::Upload(upload.clone())))?;
        let mut data = self.data.lock().unwrap();
        let next = data.media.iter().map(|m| m.id.0).max().unwrap_or(0) + 1;
        let mut item = media_item(next, upload.user_id);
        item.kind = MediaKind::from_file_name(&upload.file.file_name());
        data.media.push(item);
        Ok(())
    }

    async fn group_media(&self, _group_id: GroupId, _user_id: UserId) -> NetResult<Vec<MediaItem>> {
        self.record("group-photos", None)?;
        Ok(self.data.lock().unwrap().media.clone())
    }

    async fn bulk_action(&self, req: &BulkActionRequest) -> NetResult<()> {
        self.record("bulk-action", Some(Call::Bulk(req.clone())))?;
        let mut data = self.data.lock().unwrap();
        let Data { media, sticky, .. } = &mut *data;
        media.retain(|m| !req.photo_ids.contains(&m.id) || sticky.contains(&m.id));
        Ok(())
    }

    async fn hide_media(&self, req: &HideMediaRequest) -> NetResult<()> {
        self.record("hide-photo", Some(Call::Hide(req.clone())))?;
        self.data.lock().unwrap().media.retain(|m| m.id != req.photo_id);
        Ok(())
    }

    async fn delete_media(&self, user_id: UserId, media_id: MediaId) -> NetResult<()> {
        self.record("delete-photo", Some(Call::Delete(user_id, media_id)))?;
        self.data.lock().unwrap().media.retain(|m| m.id != media_id);
        Ok(())
    }

    async fn report_content(&self, req: &ReportRequest) -> NetResult<()> {
        self.record("report-content", Some(Call::Report(req.clone())))
    }
}

/// Every platform service in one configurable fake.
pub struct FakeDevices {
    pub online: AtomicBool,
    pub denied: Mutex<HashSet<Permission>>,
    pub requested: Mutex<Vec<Permission>>,
    pub push_token: Mutex<Option<String>>,
    pub send_code_error: Mutex<Option<VerificationError>>,
    pub sent_to: Mutex<Vec<String>>,
    pub valid_code: String,
    pub picked_image: Mutex<Option<PickedMedia>>,
    pub picked_media: Mutex<Vec<PickedMedia>>,
    pub pictures_taken: Mutex<Vec<PictureOptions>>,
}

impl Default for FakeDevices {
    fn default() -> Self {
        Self {
            online: AtomicBool::new(true),
            denied: Mutex::new(HashSet::new()),
            requested: Mutex::new(Vec::new()),
            push_token: Mutex::new(Some("ExponentPushToken[abc]".into())),
            send_code_error: Mutex::new(None),
            sent_to: Mutex::new(Vec::new()),
            valid_code: "123456".into(),
            picked_image: Mutex::new(None),
            picked_media: Mutex::new(Vec::new()),
            pictures_taken: Mutex::new(Vec::new()),
        }
    }
}

impl FakeDevices {
    pub fn go_offline(&self) {
        self.online.store(false, Ordering::SeqCst);
    }

    pub fn deny(&self, permission: Permission) {
        self.denied.lock().unwrap().insert(permission);
    }

    fn status_of(&self, permission: Permission) -> PermissionStatus {
        if self.denied.lock().unwrap().contains(&permission) {
            PermissionStatus::Denied
        } else {
            PermissionStatus::Granted
        }
    }
}

#[async_trait]
impl Permissions for FakeDevices {
    async fn status(&self, permission: Permission) -> PermissionStatus {
        match self.status_of(permission) {
            PermissionStatus::Granted => PermissionStatus::Granted,
            _ => PermissionStatus::Undetermined,
        }
    }

    async fn request(&self, permission: Permission) -> PermissionStatus {
        self.requested.lock().unwrap().push(permission);
        self.status_of(permission)
    }
}

#[async_trait]
impl PhoneVerifier for FakeDevices {
    async fn send_code(&self, phone_number: &str) -> Result<VerificationId, VerificationError> {
        self.sent_to.lock().unwrap().push(phone_number.to_string());
        match self.send_code_error.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(VerificationId("verification-1".into())),
        }
    }

    async fn confirm(&self, id: &VerificationId, code: &str) -> Result<(), VerificationError> {
        if id.0 == "verification-1" && code == self.valid_code {
            Ok(())
        } else {
            Err(VerificationError::InvalidCode)
        }
    }
}

#[async_trait]
impl PushNotifications for FakeDevices {
    async fn device_token(&self) -> Option<String> {
        self.push_token.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaPicker for FakeDevices {
    async fn capture_image(&self) -> Option<PickedMedia> {
        self.picked_image.lock().unwrap().clone()
    }

    async fn pick_image(&self) -> Option<PickedMedia> {
        self.picked_image.lock().unwrap().clone()
    }

    async fn pick_media(&self) -> Vec<PickedMedia> {
        self.picked_media.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connectivity for FakeDevices {
    async fn is_connected(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Camera for FakeDevices {
    async fn take_picture(&self, options: PictureOptions) -> Result<PathBuf, CameraError> {
        self.pictures_taken.lock().unwrap().push(options);
        Ok(PathBuf::from("/cache/Camera/shot.jpg"))
    }

    async fn record(&self, _options: RecordingOptions) -> Result<PathBuf, CameraError> {
        Err(CameraError::Recording("not supported by the fake".into()))
    }

    async fn stop_recording(&self) -> Result<(), CameraError> {
        Ok(())
    }
}

pub struct Harness {
    pub ctx: AppContext,
    pub backend: Arc<FakeBackend>,
    pub devices: Arc<FakeDevices>,
    _dir: tempfile::TempDir,
}

/// Context with device storage under a temp dir and nobody logged in.
pub fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(&dir.path().join("photogroup.db")).unwrap();
    let backend = Arc::new(FakeBackend::default());
    let fake = Arc::new(FakeDevices::default());
    let devices = Devices {
        permissions: fake.clone(),
        phone: fake.clone(),
        push: fake.clone(),
        picker: fake.clone(),
        connectivity: fake.clone(),
        camera: fake.clone(),
    };
    let ctx = AppContext::new(AppState::new(Some(db)), backend.clone(), devices);
    Harness {
        ctx,
        backend,
        devices: fake,
        _dir: dir,
    }
}

/// Same as [`harness`] with [`ME`] logged in.
pub fn logged_in() -> Harness {
    let h = harness();
    h.ctx
        .begin_session(Session {
            user_id: ME,
            username: "ayse".into(),
            profile_image: None,
        })
        .unwrap();
    h
}

pub fn profile(id: UserId) -> UserProfile {
    UserProfile {
        id,
        username: "ayse".into(),
        email: Some("ayse@example.com".into()),
        phone_number: Some("+905551234567".into()),
        profile_image: Some("ayse.jpg".into()),
        thumbnail_url: None,
        is_super_admin: false,
    }
}
