/// Application name
pub const APP_NAME: &str = "PhotoGroup";

/// Backend used when no base URL is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Country prefix prepended to the 10 local phone digits before they reach the backend
pub const PHONE_COUNTRY_PREFIX: &str = "+90";

/// Number of local phone digits
pub const PHONE_DIGITS: usize = 10;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Length of the SMS one-time code
pub const VERIFICATION_CODE_LEN: usize = 6;

/// Maximum number of gallery items in one multi-select
pub const MAX_BULK_SELECTION: usize = 30;

/// Storage key of the persisted session record
pub const SESSION_STORAGE_KEY: &str = "user_session";

/// Path under which the backend serves uploaded files
pub const UPLOADS_PATH: &str = "uploads";

/// Header the backend tunnel expects to skip its interstitial page
pub const TUNNEL_WARNING_HEADER: &str = "ngrok-skip-browser-warning";

/// Zoom delta per unit of pinch scale
pub const PINCH_ZOOM_SENSITIVITY: f64 = 0.5;

/// Displayed magnification at zoom 0 for the back camera
pub const BACK_CAMERA_MIN_MAGNIFICATION: f64 = 0.3;

/// Displayed magnification at zoom 0 for the front camera
pub const FRONT_CAMERA_MIN_MAGNIFICATION: f64 = 1.0;

/// Displayed magnification at zoom 1
pub const MAX_MAGNIFICATION: f64 = 5.0;

/// Recording duration tick in seconds
pub const RECORDING_TICK_SECS: u64 = 1;

/// Reasons offered when reporting a media item
pub const REPORT_REASONS: [&str; 5] = [
    "Violence / Dangerous",
    "Nudity / Sexual content",
    "Harassment / Bullying",
    "Hate speech",
    "Other",
];
