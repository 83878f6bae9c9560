use tracing::{error, info};

use photogroup_net::{LocalFile, ProfileUpdate};
use photogroup_shared::validation::{
    email_is_acceptable, international_phone, local_phone, phone_is_acceptable,
    sanitize_phone_input, validate_email, validate_phone, validate_required,
};

use crate::error::{ClientError, ClientResult};
use crate::form::TrackedForm;
use crate::ports::PickedMedia;
use crate::screens::{pick_picture, PictureSource};
use crate::state::AppContext;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub username: String,
    pub email: String,
    /// Local digits, without the country prefix
    pub phone_digits: String,
    /// Current picture: the server URL, or a freshly picked local file
    pub picture: Option<PickedMedia>,
}

pub struct EditProfileScreen {
    ctx: AppContext,
    form: TrackedForm<ProfileFields>,
    loaded: bool,
}

impl EditProfileScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: TrackedForm::default(),
            loaded: false,
        }
    }

    pub fn fields(&self) -> &ProfileFields {
        self.form.current()
    }

    pub async fn load(&mut self) -> ClientResult<()> {
        let session = self.ctx.require_session()?;
        let user = self.ctx.backend.get_user(session.user_id).await.map_err(|e| {
            error!(user_id = %session.user_id, "Loading profile failed: {}", e);
            e
        })?;
        let picture = user
            .profile_image
            .as_deref()
            .filter(|f| !f.is_empty())
            .map(|f| PickedMedia::photo(self.ctx.backend.media_url(f)));
        self.form.reset(ProfileFields {
            username: user.username,
            email: user.email.unwrap_or_default(),
            phone_digits: local_phone(user.phone_number.as_deref().unwrap_or_default()),
            picture,
        });
        self.loaded = true;
        Ok(())
    }

    pub fn set_username(&mut self, username: &str) {
        self.form.edit().username = username.to_string();
    }

    pub fn set_email(&mut self, email: &str) {
        self.form.edit().email = email.to_string();
    }

    pub fn set_phone(&mut self, input: &str) {
        if let Some(digits) = sanitize_phone_input(input) {
            self.form.edit().phone_digits = digits;
        }
    }

    /// Inline flag for the email field.
    pub fn email_valid(&self) -> bool {
        email_is_acceptable(&self.form.current().email)
    }

    /// Inline flag for the phone field.
    pub fn phone_valid(&self) -> bool {
        phone_is_acceptable(&self.form.current().phone_digits)
    }

    pub fn has_changes(&self) -> bool {
        self.loaded && self.form.is_dirty()
    }

    pub fn can_save(&self) -> bool {
        self.has_changes() && self.validate().is_ok()
    }

    fn validate(&self) -> ClientResult<()> {
        let f = self.form.current();
        validate_required("Username", &f.username)?;
        validate_email(&f.email)?;
        validate_phone(&f.phone_digits)?;
        Ok(())
    }

    /// Replaces the picture from the camera or library. Returns whether one
    /// was chosen.
    pub async fn choose_picture(&mut self, source: PictureSource) -> ClientResult<bool> {
        match pick_picture(&self.ctx, source).await? {
            Some(picked) => {
                self.form.edit().picture = Some(picked);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Posts the form. The picture is attached only when it was replaced by
    /// a local file. On failure the edits stay in place.
    pub async fn save(&mut self) -> ClientResult<()> {
        if !self.has_changes() {
            return Err(ClientError::NoChanges);
        }
        self.validate()?;
        let session = self.ctx.require_session()?;

        let current = self.form.current();
        let profile_image = current
            .picture
            .as_ref()
            .filter(|p| p.is_local() && self.form.baseline().picture.as_ref() != Some(*p))
            .map(|p| LocalFile::image(p.path()));
        let update = ProfileUpdate {
            user_id: session.user_id,
            username: current.username.clone(),
            email: current.email.clone(),
            phone_number: international_phone(&current.phone_digits),
            profile_image,
        };

        self.ctx.backend.update_profile(&update).await.map_err(|e| {
            error!(user_id = %session.user_id, "Profile update failed: {}", e);
            e
        })?;
        self.form.commit();
        info!(user_id = %session.user_id, "Profile updated");
        Ok(())
    }
}
