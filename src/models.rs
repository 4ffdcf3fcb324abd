use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named profile from the AWS shared config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub role_arn: Option<String>,
    pub mfa_serial: Option<String>,
    /// Profile whose credentials are used to call STS (default chain if unset)
    pub source_profile: Option<String>,
    pub region: Option<String>,
}

/// A profile selected on the command line, guaranteed to carry a role ARN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    pub name: String,
    pub role_arn: String,
    pub mfa_serial: Option<String>,
    pub source_profile: Option<String>,
    pub region: Option<String>,
}

/// Short-lived credentials returned by STS AssumeRole
#[derive(Clone, PartialEq, Eq)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: Option<DateTime<Utc>>,
}

impl TemporaryCredentials {
    pub fn expires_in_minutes(&self) -> Option<i64> {
        self.expiration
            .map(|exp| (exp - Utc::now()).num_minutes().max(0))
    }
}

impl fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Session JSON expected by the federation endpoint's getSigninToken action
#[derive(Debug, Serialize)]
pub struct SessionDescriptor<'a> {
    #[serde(rename = "sessionId")]
    pub session_id: &'a str,
    #[serde(rename = "sessionKey")]
    pub session_key: &'a str,
    #[serde(rename = "sessionToken")]
    pub session_token: &'a str,
}

impl<'a> From<&'a TemporaryCredentials> for SessionDescriptor<'a> {
    fn from(creds: &'a TemporaryCredentials) -> Self {
        Self {
            session_id: &creds.access_key_id,
            session_key: &creds.secret_access_key,
            session_token: &creds.session_token,
        }
    }
}

/// Response body of the getSigninToken action
#[derive(Debug, Deserialize)]
pub struct SigninTokenResponse {
    #[serde(rename = "SigninToken")]
    pub signin_token: String,
}

/// One-time token redeemable for a console session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigninToken(String);

impl SigninToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
