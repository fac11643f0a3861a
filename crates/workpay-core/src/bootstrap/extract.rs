//! Token & identity extraction from loosely-shaped auth payloads.
//!
//! Providers do not guarantee a response schema, so extraction walks a fixed,
//! ordered set of candidate field paths: first non-empty match wins. The two
//! login variants (plain-token and OTP) are the same code path under
//! different [`ExtractionPolicy`] data.

use std::fmt;

use serde_json::Value;
use tracing::debug;

/// One candidate field location, checked in priority order.
type CandidatePath = &'static [&'static str];

/// JWTs are base64url; every JOSE header starts with this prefix.
const JWT_PREFIX: &str = "eyJ";

/// Error fields recognized in a payload, in priority order.
const ERROR_PATHS: &[CandidatePath] = &[
    &["data", "error"],
    &["error"],
    &["message"],
    &["error", "message"],
    &["errorMessage"],
];

const PROXY_TOKEN_PATHS: &[CandidatePath] = &[
    &["data", "proxy_auth_token"],
    &["proxy_auth_token"],
    &["token"],
    &["data", "token"],
    &["authToken"],
    &["data", "authToken"],
];

const PROXY_EMAIL_PATHS: &[CandidatePath] = &[
    &["data", "email"],
    &["email"],
    &["user", "email"],
    &["data", "user", "email"],
];

const OTP_TOKEN_PATHS: &[CandidatePath] = &[
    &["token"],
    &["jwt"],
    &["authToken"],
    &["auth_token"],
];

const OTP_EMAIL_PATHS: &[CandidatePath] = &[
    &["email"],
    &["identifier"],
    &["userIdentifier"],
];

/// Session data extracted from a widget payload.
///
/// `token` is non-empty whenever extraction succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSession {
    pub token: String,
    pub email: Option<String>,
}

/// Why extraction failed for an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The payload carried an explicit error field (and no token).
    Api { message: String },
    /// No candidate path matched and no error field was present.
    NoToken,
}

impl ExtractError {
    /// The message surfaced to the user.
    pub fn user_message(&self) -> String {
        match self {
            ExtractError::Api { message } => format!("Error: {message}"),
            ExtractError::NoToken => "No token received. Please try again.".to_string(),
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Api { message } => write!(f, "provider reported error: {message}"),
            ExtractError::NoToken => write!(f, "no token found in payload"),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Per-variant extraction rules: ordered candidate lists plus the OTP-only
/// special cases. Both login flows are configuration of one extractor.
#[derive(Debug, Clone)]
pub struct ExtractionPolicy {
    token_paths: &'static [CandidatePath],
    email_paths: &'static [CandidatePath],
    /// Accept a JWT delivered in `message` when the payload marks success.
    jwt_in_message: bool,
    /// Synthesize a placeholder token when the payload marks success but
    /// carries no token field.
    fallback_on_success: bool,
    /// Remove stale `selectedCompany` state during persistence.
    purge_stale_company: bool,
    /// Report `""` instead of absent email in navigation params.
    email_defaults_empty: bool,
}

impl ExtractionPolicy {
    /// Policy for the plain-token login flow.
    pub fn proxy_login() -> Self {
        Self {
            token_paths: PROXY_TOKEN_PATHS,
            email_paths: PROXY_EMAIL_PATHS,
            jwt_in_message: false,
            fallback_on_success: false,
            purge_stale_company: true,
            email_defaults_empty: false,
        }
    }

    /// Policy for the OTP login flow.
    pub fn otp_login() -> Self {
        Self {
            token_paths: OTP_TOKEN_PATHS,
            email_paths: OTP_EMAIL_PATHS,
            jwt_in_message: true,
            fallback_on_success: true,
            purge_stale_company: false,
            email_defaults_empty: true,
        }
    }

    pub fn purges_stale_company(&self) -> bool {
        self.purge_stale_company
    }

    pub fn email_defaults_empty(&self) -> bool {
        self.email_defaults_empty
    }

    /// Extracts the session token and optional email from a normalized
    /// payload.
    ///
    /// Precedence: an extracted token always wins over a present error
    /// field; a present error field wins over the generic no-token report.
    pub fn extract(&self, payload: &Value) -> Result<ExtractedSession, ExtractError> {
        if let Some(token) = self.find_token(payload) {
            let email = first_at_paths(payload, self.email_paths).map(str::to_string);
            debug!(
                token_len = token.len(),
                email_present = email.is_some(),
                "token extracted"
            );
            return Ok(ExtractedSession { token, email });
        }

        if let Some(message) = first_at_paths(payload, ERROR_PATHS) {
            return Err(ExtractError::Api {
                message: message.to_string(),
            });
        }

        Err(ExtractError::NoToken)
    }

    fn find_token(&self, payload: &Value) -> Option<String> {
        if self.jwt_in_message
            && has_success_marker(payload)
            && let Some(message) = lookup_str(payload, &["message"])
            && message.starts_with(JWT_PREFIX)
        {
            return Some(message.to_string());
        }

        if let Some(token) = first_at_paths(payload, self.token_paths) {
            return Some(token.to_string());
        }

        if self.fallback_on_success && has_success_marker(payload) {
            let token = fallback_token();
            debug!("no token field in successful payload, synthesized placeholder");
            return Some(token);
        }

        None
    }
}

/// Resolves a candidate path to a non-empty string, if present.
fn lookup_str<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut current = payload;
    for segment in path {
        current = current.get(segment)?;
    }
    current.as_str().filter(|s| !s.is_empty())
}

/// First candidate path resolving to a non-empty string wins.
fn first_at_paths<'a>(payload: &'a Value, paths: &[CandidatePath]) -> Option<&'a str> {
    paths.iter().find_map(|path| lookup_str(payload, path))
}

/// Does the payload carry an explicit success status marker?
fn has_success_marker(payload: &Value) -> bool {
    ["status", "type"].iter().any(|key| {
        payload
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| s.eq_ignore_ascii_case("success"))
    })
}

/// Timestamp-derived placeholder, unique per attempt.
fn fallback_token() -> String {
    format!("otp-session-{}", chrono::Utc::now().timestamp_millis())
}
