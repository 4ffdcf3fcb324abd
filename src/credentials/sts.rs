use super::{AssumeRoleRequest, RoleAssumer};
use crate::error::{ConsoleError, Result};
use crate::models::TemporaryCredentials;
use async_trait::async_trait;
use aws_sdk_sts::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sts::Client as StsClient;
use chrono::{DateTime, TimeZone, Utc};

const DEFAULT_REGION: &str = "us-east-1";
const ACCESS_DENIED: &str = "AccessDenied";

/// Calls STS AssumeRole with credentials from the default provider chain
pub struct StsRoleAssumer {
    client: StsClient,
}

impl StsRoleAssumer {
    /// Build a client from `source_profile` (or the default chain) and `region`
    pub async fn new(source_profile: Option<&str>, region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(profile) = source_profile {
            tracing::debug!("Using source profile {} for STS", profile);
            loader = loader.profile_name(profile);
        }
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }

        let mut config = loader.load().await;
        if config.region().is_none() {
            tracing::debug!("No region configured, using {} for STS", DEFAULT_REGION);
            config = config
                .into_builder()
                .region(aws_config::Region::new(DEFAULT_REGION))
                .build();
        }

        Self {
            client: StsClient::new(&config),
        }
    }
}

#[async_trait]
impl RoleAssumer for StsRoleAssumer {
    async fn assume_role(&self, request: &AssumeRoleRequest) -> Result<TemporaryCredentials> {
        let mut call = self
            .client
            .assume_role()
            .role_arn(&request.role_arn)
            .role_session_name(&request.session_name);

        if let Some(mfa) = &request.mfa {
            call = call
                .serial_number(&mfa.serial_number)
                .token_code(&mfa.token_code);
        }

        let response = call.send().await.map_err(map_sdk_error)?;

        let creds = response.credentials().ok_or_else(|| {
            ConsoleError::AuthenticationFailed("AssumeRole returned no credentials".to_string())
        })?;

        let expiration = to_chrono(creds.expiration());
        tracing::debug!("Received credentials expiring at {:?}", expiration);

        Ok(TemporaryCredentials {
            access_key_id: creds.access_key_id().to_string(),
            secret_access_key: creds.secret_access_key().to_string(),
            session_token: creds.session_token().to_string(),
            expiration,
        })
    }
}

fn map_sdk_error<E, R>(err: SdkError<E, R>) -> ConsoleError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + 'static,
{
    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            ConsoleError::Network(format!("{}", DisplayErrorContext(&err)))
        }
        SdkError::ServiceError(service) => {
            let inner = service.err();
            let message = inner.message().unwrap_or("no message").to_string();
            match inner.code() {
                Some(ACCESS_DENIED) => ConsoleError::AccessDenied(message),
                Some(code) => ConsoleError::AuthenticationFailed(format!("{}: {}", code, message)),
                None => ConsoleError::AuthenticationFailed(message),
            }
        }
        _ => ConsoleError::AuthenticationFailed(format!("{}", DisplayErrorContext(&err))),
    }
}

fn to_chrono(dt: &aws_smithy_types::DateTime) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(dt.secs(), dt.subsec_nanos()).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_sts::operation::assume_role::AssumeRoleError;
    use aws_smithy_types::error::ErrorMetadata;

    fn service_error(code: &str, message: &str) -> SdkError<AssumeRoleError, ()> {
        let meta = ErrorMetadata::builder().code(code).message(message).build();
        SdkError::service_error(AssumeRoleError::generic(meta), ())
    }

    #[test]
    fn test_access_denied_maps_to_access_denied() {
        let err = map_sdk_error(service_error(
            "AccessDenied",
            "not authorized to perform: sts:AssumeRole",
        ));
        match err {
            ConsoleError::AccessDenied(message) => {
                assert_eq!(message, "not authorized to perform: sts:AssumeRole")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_other_service_errors_are_authentication_failures() {
        let err = map_sdk_error(service_error("ExpiredToken", "token expired"));
        match err {
            ConsoleError::AuthenticationFailed(message) => {
                assert_eq!(message, "ExpiredToken: token expired")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_service_error_without_code() {
        let meta = ErrorMetadata::builder().message("boom").build();
        let err = SdkError::<AssumeRoleError, ()>::service_error(AssumeRoleError::generic(meta), ());
        assert!(matches!(
            map_sdk_error(err),
            ConsoleError::AuthenticationFailed(_)
        ));
    }

    #[test]
    fn test_timeout_maps_to_network() {
        let err = SdkError::<AssumeRoleError, ()>::timeout_error("request timed out");
        assert!(matches!(map_sdk_error(err), ConsoleError::Network(_)));
    }

    #[test]
    fn test_construction_failure_is_authentication_failure() {
        let err = SdkError::<AssumeRoleError, ()>::construction_failure("missing role_arn");
        assert!(matches!(
            map_sdk_error(err),
            ConsoleError::AuthenticationFailed(_)
        ));
    }

    #[test]
    fn test_to_chrono() {
        let dt = aws_smithy_types::DateTime::from_secs(1_700_000_000);
        let converted = to_chrono(&dt).unwrap();
        assert_eq!(converted.timestamp(), 1_700_000_000);
    }
}
