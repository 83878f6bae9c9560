use thiserror::Error;

/// Local form validation failures. These never reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Phone number must be exactly {expected} digits")]
    InvalidPhone { expected: usize },

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Verification code must be {expected} digits")]
    InvalidVerificationCode { expected: usize },
}
