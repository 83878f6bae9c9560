//! Per-screen state and operations.
//!
//! Each sub-module owns the state one screen renders and the operations its
//! controls trigger. Screens hold a cloned [`AppContext`](crate::state::AppContext)
//! and report failures as [`ClientError`](crate::error::ClientError), which the
//! UI turns into an alert.

pub mod camera;
pub mod edit_profile;
pub mod gallery;
pub mod group;
pub mod login;
pub mod profile;
pub mod register;

use tracing::debug;

use photogroup_net::Backend;

use crate::error::ClientResult;
use crate::ports::{ensure_permission, Permission, PickedMedia};
use crate::state::AppContext;

/// Where a replacement picture comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureSource {
    Camera,
    Library,
}

/// Asks for the matching permission, then opens the camera or the library.
/// `None` when the user cancels.
pub(crate) async fn pick_picture(
    ctx: &AppContext,
    source: PictureSource,
) -> ClientResult<Option<PickedMedia>> {
    let picked = match source {
        PictureSource::Camera => {
            ensure_permission(ctx.devices.permissions.as_ref(), Permission::Camera).await?;
            ctx.devices.picker.capture_image().await
        }
        PictureSource::Library => {
            ensure_permission(ctx.devices.permissions.as_ref(), Permission::MediaLibrary).await?;
            ctx.devices.picker.pick_image().await
        }
    };
    if picked.is_none() {
        debug!(?source, "Picture selection cancelled");
    }
    Ok(picked)
}

/// Avatar URL: the server-made thumbnail, else the uploaded file.
pub fn avatar_url(
    backend: &dyn Backend,
    thumbnail_url: Option<&str>,
    profile_image: Option<&str>,
) -> Option<String> {
    match (thumbnail_url, profile_image) {
        (Some(thumb), _) if !thumb.is_empty() => Some(thumb.to_string()),
        (_, Some(file)) if !file.is_empty() => Some(backend.media_url(file)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{harness, FakeBackend};

    #[test]
    fn avatar_prefers_thumbnail() {
        let backend = FakeBackend::default();
        assert_eq!(
            avatar_url(&backend, Some("http://cdn/t.jpg"), Some("a.jpg")).as_deref(),
            Some("http://cdn/t.jpg")
        );
        assert_eq!(
            avatar_url(&backend, None, Some("a.jpg")).as_deref(),
            Some("http://backend/uploads/a.jpg")
        );
        assert_eq!(avatar_url(&backend, None, None), None);
    }

    #[tokio::test]
    async fn denied_library_skips_picker() {
        let h = harness();
        h.devices.deny(Permission::MediaLibrary);
        *h.devices.picked_image.lock().unwrap() = Some(PickedMedia::photo("/cache/a.jpg"));

        let err = pick_picture(&h.ctx, PictureSource::Library).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::ClientError::PermissionDenied(Permission::MediaLibrary)
        ));
    }
}
