use std::fmt;

/// Every backend route the client calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Register,
    UpdatePushToken,
    GetUser,
    UpdateProfile,
    GetBlockedUsers,
    BlockUser,
    UnblockUser,
    DeleteAccount,
    GetGroupDetails,
    GetGroupMembers,
    GetGroupRequests,
    ManageMember,
    ManageRequest,
    ToggleJoining,
    LeaveGroup,
    EditGroup,
    UploadPhoto,
    GroupPhotos,
    BulkAction,
    HidePhoto,
    DeletePhoto,
    ReportContent,
}

/// HTTP verb used for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::UpdatePushToken => "/update-push-token",
            Self::GetUser => "/get-user",
            Self::UpdateProfile => "/update-profile",
            Self::GetBlockedUsers => "/get-blocked-users",
            Self::BlockUser => "/block-user",
            Self::UnblockUser => "/unblock-user",
            Self::DeleteAccount => "/delete-account",
            Self::GetGroupDetails => "/get-group-details",
            Self::GetGroupMembers => "/get-group-members",
            Self::GetGroupRequests => "/get-group-requests",
            Self::ManageMember => "/manage-member",
            Self::ManageRequest => "/manage-request",
            Self::ToggleJoining => "/toggle-joining",
            Self::LeaveGroup => "/leave-group",
            Self::EditGroup => "/edit-group",
            Self::UploadPhoto => "/upload-photo",
            Self::GroupPhotos => "/group-photos",
            Self::BulkAction => "/bulk-action",
            Self::HidePhoto => "/hide-photo",
            Self::DeletePhoto => "/delete-photo",
            Self::ReportContent => "/report-content",
        }
    }

    /// Reads are GET, destructive account/media removal is DELETE, the rest POST.
    pub fn method(self) -> Method {
        match self {
            Self::GetUser
            | Self::GetBlockedUsers
            | Self::GetGroupDetails
            | Self::GetGroupMembers
            | Self::GetGroupRequests
            | Self::GroupPhotos => Method::Get,
            Self::DeleteAccount | Self::DeletePhoto => Method::Delete,
            _ => Method::Post,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_follow_backend_convention() {
        assert_eq!(Endpoint::GroupPhotos.method(), Method::Get);
        assert_eq!(Endpoint::DeletePhoto.method(), Method::Delete);
        assert_eq!(Endpoint::DeleteAccount.method(), Method::Delete);
        assert_eq!(Endpoint::BulkAction.method(), Method::Post);
        assert_eq!(Endpoint::UploadPhoto.path(), "/upload-photo");
    }
}
