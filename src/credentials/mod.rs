// Role assumption with a single MFA re-attempt
mod prompt;
mod sts;

pub use prompt::ConsolePrompt;
pub use sts::StsRoleAssumer;

use crate::error::{ConsoleError, Result};
use crate::models::TemporaryCredentials;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Session name attached to every AssumeRole call
pub const ROLE_SESSION_NAME: &str = "AssumeRoleSession";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfaToken {
    pub serial_number: String,
    pub token_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeRoleRequest {
    pub role_arn: String,
    pub session_name: String,
    pub mfa: Option<MfaToken>,
}

impl AssumeRoleRequest {
    pub fn new(role_arn: &str) -> Self {
        Self {
            role_arn: role_arn.to_string(),
            session_name: ROLE_SESSION_NAME.to_string(),
            mfa: None,
        }
    }

    pub fn with_mfa(self, serial_number: &str, token_code: String) -> Self {
        Self {
            mfa: Some(MfaToken {
                serial_number: serial_number.to_string(),
                token_code,
            }),
            ..self
        }
    }
}

/// Exchanges a role ARN for temporary credentials.
///
/// Implementations must report an STS access-denied response as
/// [`ConsoleError::AccessDenied`] so the caller can decide whether to retry with MFA.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoleAssumer {
    async fn assume_role(&self, request: &AssumeRoleRequest) -> Result<TemporaryCredentials>;
}

/// Source of MFA codes, normally the terminal
#[cfg_attr(test, automock)]
pub trait MfaPrompt {
    fn prompt(&self, mfa_serial: &str) -> Result<String>;
}

/// Assume `role_arn`, retrying once with an MFA code when the first attempt is denied
/// and the profile has an MFA device configured.
pub async fn assume<A, P>(
    assumer: &A,
    prompt: &P,
    role_arn: &str,
    mfa_serial: Option<&str>,
) -> Result<TemporaryCredentials>
where
    A: RoleAssumer + ?Sized,
    P: MfaPrompt + ?Sized,
{
    let request = AssumeRoleRequest::new(role_arn);

    tracing::info!("Assuming role {}", role_arn);
    match assumer.assume_role(&request).await {
        Ok(creds) => Ok(creds),
        Err(ConsoleError::AccessDenied(reason)) => {
            let Some(serial) = mfa_serial else {
                return Err(ConsoleError::AccessDenied(reason));
            };

            tracing::debug!("AssumeRole denied without MFA, retrying with {}", serial);
            let code = prompt.prompt(serial)?;
            assumer.assume_role(&request.with_mfa(serial, code)).await
        }
        Err(e) => Err(e),
    }
}
