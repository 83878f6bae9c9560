use tracing::{debug, error, info, warn};

use photogroup_shared::protocol::{LoginRequest, PushTokenRequest};
use photogroup_shared::validation::{international_phone, sanitize_phone_input, validate_required};
use photogroup_shared::UserId;
use photogroup_store::Session;

use crate::error::ClientResult;
use crate::ports::{ensure_permission, Permission};
use crate::state::AppContext;

pub struct LoginScreen {
    ctx: AppContext,
    phone_digits: String,
    password: String,
}

impl LoginScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            phone_digits: String::new(),
            password: String::new(),
        }
    }

    /// The stored session, if the user is still logged in. The UI routes
    /// straight to the home screen when this returns one.
    pub fn restore(&self) -> ClientResult<Option<Session>> {
        self.ctx.restore_session()
    }

    pub fn phone_digits(&self) -> &str {
        &self.phone_digits
    }

    /// Keeps digits only; input beyond ten digits is ignored.
    pub fn set_phone(&mut self, input: &str) {
        if let Some(digits) = sanitize_phone_input(input) {
            self.phone_digits = digits;
        }
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = password.to_string();
    }

    pub async fn login(&self) -> ClientResult<Session> {
        validate_required("Phone number", &self.phone_digits)?;
        validate_required("Password", &self.password)?;

        let req = LoginRequest {
            phone_number: international_phone(&self.phone_digits),
            password: self.password.clone(),
        };
        let resp = self.ctx.backend.login(&req).await.map_err(|e| {
            error!("Login failed: {}", e);
            e
        })?;

        let session = Session {
            user_id: resp.user_id,
            username: resp.username,
            profile_image: resp.profile_image,
        };
        self.ctx.begin_session(session.clone())?;
        info!(user_id = %session.user_id, "Logged in");

        register_push_token(&self.ctx, session.user_id).await;
        Ok(session)
    }
}

/// Sends the device's push token to the backend. Never fails the login.
async fn register_push_token(ctx: &AppContext, user_id: UserId) {
    if let Err(e) = ensure_permission(ctx.devices.permissions.as_ref(), Permission::Notifications).await {
        info!("Push notifications disabled: {}", e);
        return;
    }
    let Some(push_token) = ctx.devices.push.device_token().await else {
        debug!("No push token available");
        return;
    };
    let req = PushTokenRequest { user_id, push_token };
    if let Err(e) = ctx.backend.update_push_token(&req).await {
        warn!(%user_id, "Push token update failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::test_support::{harness, Call, ME, PASSWORD};

    #[tokio::test]
    async fn login_persists_session_and_registers_push_token() {
        let h = harness();
        let mut screen = LoginScreen::new(h.ctx.clone());
        screen.set_phone("555 123 45 67");
        screen.set_password(PASSWORD);

        let session = screen.login().await.unwrap();
        assert_eq!(session.user_id, ME);

        let calls = h.backend.calls();
        assert_eq!(
            calls[0],
            Call::Login(LoginRequest {
                phone_number: "+905551234567".into(),
                password: PASSWORD.into(),
            })
        );
        assert!(matches!(&calls[1], Call::PushToken(req) if req.user_id == ME));

        // a fresh screen finds the stored session
        let restored = LoginScreen::new(h.ctx.clone()).restore().unwrap();
        assert_eq!(restored, Some(session));
    }

    #[tokio::test]
    async fn empty_fields_never_reach_the_network() {
        let h = harness();
        let mut screen = LoginScreen::new(h.ctx.clone());
        screen.set_password(PASSWORD);

        let err = screen.login().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(h.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn rejected_credentials_show_server_text() {
        let h = harness();
        let mut screen = LoginScreen::new(h.ctx.clone());
        screen.set_phone("5551234567");
        screen.set_password("wrong");

        let err = screen.login().await.unwrap_err();
        assert_eq!(err.alert().message, "Invalid phone number or password");
        assert_eq!(h.ctx.session(), None);
    }

    #[tokio::test]
    async fn push_failures_do_not_fail_login() {
        let h = harness();
        h.devices.deny(Permission::Notifications);
        let mut screen = LoginScreen::new(h.ctx.clone());
        screen.set_phone("5551234567");
        screen.set_password(PASSWORD);
        screen.login().await.unwrap();
        assert_eq!(h.backend.calls().len(), 1);

        let h = harness();
        h.backend.fail("update-push-token");
        let mut screen = LoginScreen::new(h.ctx.clone());
        screen.set_phone("5551234567");
        screen.set_password(PASSWORD);
        assert!(screen.login().await.is_ok());
    }

    #[test]
    fn phone_input_is_capped() {
        let h = harness();
        let mut screen = LoginScreen::new(h.ctx);
        screen.set_phone("5551234567");
        screen.set_phone("55512345678");
        assert_eq!(screen.phone_digits(), "5551234567");
    }
}
