//! Registration with SMS phone verification.
//!
//! The form is validated live while typing. Submitting sends a one-time code
//! to the phone; only a confirmed code creates the account on the backend.

use tracing::{error, info};

use photogroup_shared::constants::{MIN_PASSWORD_LEN, PHONE_DIGITS};
use photogroup_shared::protocol::{RegisterRequest, RegisterResponse};
use photogroup_shared::validation::{
    email_is_acceptable, international_phone, is_valid_email, password_is_acceptable,
    phone_is_acceptable, sanitize_phone_input, validate_email, validate_password, validate_phone,
    validate_required, validate_verification_code,
};

use crate::error::{ClientError, ClientResult};
use crate::ports::{VerificationError, VerificationId};
use crate::state::AppContext;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Local digits, without the country prefix
    pub phone_digits: String,
}

pub struct RegisterScreen {
    ctx: AppContext,
    form: RegistrationForm,
    challenge: Option<VerificationId>,
}

impl RegisterScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: RegistrationForm::default(),
            challenge: None,
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn set_username(&mut self, username: &str) {
        self.form.username = username.to_string();
    }

    pub fn set_email(&mut self, email: &str) {
        self.form.email = email.to_string();
    }

    pub fn set_password(&mut self, password: &str) {
        self.form.password = password.to_string();
    }

    pub fn set_phone(&mut self, input: &str) {
        if let Some(digits) = sanitize_phone_input(input) {
            self.form.phone_digits = digits;
        }
    }

    // Inline flags; an empty field is not flagged yet.

    pub fn email_valid(&self) -> bool {
        email_is_acceptable(&self.form.email)
    }

    pub fn phone_valid(&self) -> bool {
        phone_is_acceptable(&self.form.phone_digits)
    }

    pub fn password_valid(&self) -> bool {
        password_is_acceptable(&self.form.password)
    }

    pub fn can_submit(&self) -> bool {
        let f = &self.form;
        !f.username.is_empty()
            && is_valid_email(&f.email)
            && f.password.chars().count() >= MIN_PASSWORD_LEN
            && f.phone_digits.len() == PHONE_DIGITS
    }

    /// Whether a code was sent and is waiting for confirmation.
    pub fn awaiting_code(&self) -> bool {
        self.challenge.is_some()
    }

    pub async fn send_code(&mut self) -> ClientResult<()> {
        let f = &self.form;
        validate_required("Username", &f.username)?;
        validate_email(&f.email)?;
        validate_password(&f.password)?;
        validate_phone(&f.phone_digits)?;

        let phone = international_phone(&f.phone_digits);
        let id = self.ctx.devices.phone.send_code(&phone).await.map_err(|e| {
            error!("Sending verification SMS failed: {}", e);
            ClientError::Verification(e)
        })?;
        info!("Verification SMS sent");
        self.challenge = Some(id);
        Ok(())
    }

    /// Confirms the code, then creates the account.
    pub async fn verify_and_register(&mut self, code: &str) -> ClientResult<RegisterResponse> {
        validate_verification_code(code)?;
        let id = self
            .challenge
            .as_ref()
            .ok_or(ClientError::InvalidState("no verification code was sent"))?;

        if let Err(e) = self.ctx.devices.phone.confirm(id, code).await {
            error!("Code confirmation failed: {}", e);
            return Err(ClientError::Verification(VerificationError::InvalidCode));
        }
        info!("Phone number verified");

        let req = RegisterRequest {
            username: self.form.username.clone(),
            email: self.form.email.clone(),
            password: self.form.password.clone(),
            phone_number: international_phone(&self.form.phone_digits),
        };
        let resp = self.ctx.backend.register(&req).await.map_err(|e| {
            error!("Registration rejected: {}", e);
            e
        })?;
        self.challenge = None;
        info!(user_id = ?resp.user_id, "Account created");
        Ok(resp)
    }
}
