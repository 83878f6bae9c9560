//! Inputs of the multipart endpoints.

use std::path::{Path, PathBuf};

use photogroup_shared::{GroupId, MediaKind, UserId};

/// A file on the device that is attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub mime: String,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>, mime: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mime: mime.into(),
        }
    }

    /// A captured or picked photo/video.
    pub fn media(path: impl Into<PathBuf>, kind: MediaKind) -> Self {
        Self::new(path, kind.mime_type())
    }

    /// A picked picture; the MIME subtype comes from the extension
    /// (`image/png`). Without a usable extension it is sent as a JPEG.
    pub fn image(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mime = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
                format!("image/{}", ext.to_ascii_lowercase())
            }
            _ => MediaKind::Photo.mime_type().to_string(),
        };
        Self { path, mime }
    }

    /// Last path component, used as the part's file name.
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string()
}

/// `/update-profile` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    /// International form, e.g. `+905551234567`
    pub phone_number: String,
    pub profile_image: Option<LocalFile>,
}

/// `/edit-group` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEdit {
    pub user_id: UserId,
    pub group_id: GroupId,
    pub group_name: String,
    pub picture: Option<LocalFile>,
}

/// `/upload-photo` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub user_id: UserId,
    pub group_id: GroupId,
    pub file: LocalFile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_mime_from_extension() {
        assert_eq!(LocalFile::image("/tmp/pic.PNG").mime, "image/png");
        assert_eq!(LocalFile::image("/tmp/IMG_0001").mime, "image/jpeg");
        assert_eq!(LocalFile::image("/tmp/pic.").mime, "image/jpeg");
    }

    #[test]
    fn file_name_is_last_component() {
        let file = LocalFile::media("/var/mobile/cache/IMG_1.jpg", MediaKind::Photo);
        assert_eq!(file.file_name(), "IMG_1.jpg");
        assert_eq!(file.mime, "image/jpeg");
    }
}
