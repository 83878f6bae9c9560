use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

macro_rules! backend_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

backend_id!(
    /// Backend user row id
    UserId
);
backend_id!(
    /// Backend group row id
    GroupId
);
backend_id!(
    /// Backend media (photo or video) row id
    MediaId
);
backend_id!(
    /// Backend join-request row id
    RequestId
);

/// Kind of a captured or uploaded media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Photo,
    Video,
}

impl MediaKind {
    /// MIME type sent with the multipart upload.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Photo => "image/jpeg",
            Self::Video => "video/mp4",
        }
    }

    /// Guess the kind from a file name; `.mp4` and `.mov` are videos.
    pub fn from_file_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("mp4") | Some("mov") => Self::Video,
            _ => Self::Photo,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Photo => f.write_str("photo"),
            Self::Video => f.write_str("video"),
        }
    }
}
