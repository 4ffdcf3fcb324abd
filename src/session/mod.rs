// Sign-in pipeline: assume role, exchange for a token, build the console URL
use crate::console::{self, TokenExchanger};
use crate::credentials::{self, MfaPrompt, RoleAssumer};
use crate::error::Result;
use crate::models::ResolvedProfile;

pub struct SessionManager<A, E, P> {
    assumer: A,
    exchanger: E,
    prompt: P,
}

impl<A, E, P> SessionManager<A, E, P>
where
    A: RoleAssumer,
    E: TokenExchanger,
    P: MfaPrompt,
{
    pub fn new(assumer: A, exchanger: E, prompt: P) -> Self {
        Self {
            assumer,
            exchanger,
            prompt,
        }
    }

    /// Produce a console sign-in URL for `profile`
    pub async fn signin_url(&self, profile: &ResolvedProfile) -> Result<String> {
        let creds = credentials::assume(
            &self.assumer,
            &self.prompt,
            &profile.role_arn,
            profile.mfa_serial.as_deref(),
        )
        .await?;

        if let Some(mins) = creds.expires_in_minutes() {
            tracing::debug!("Role credentials valid for {} minutes", mins);
        }

        let token = self.exchanger.exchange(&creds).await?;
        tracing::debug!("Received sign-in token");

        Ok(console::build_signin_url(&token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::MockTokenExchanger;
    use crate::credentials::{MockMfaPrompt, MockRoleAssumer};
    use crate::error::ConsoleError;
    use crate::models::{SigninToken, TemporaryCredentials};

    fn creds() -> TemporaryCredentials {
        TemporaryCredentials {
            access_key_id: "ASIAEXAMPLE".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: "token".to_string(),
            expiration: None,
        }
    }

    fn profile(name: &str, mfa_serial: Option<&str>) -> ResolvedProfile {
        ResolvedProfile {
            name: name.to_string(),
            role_arn: "arn:aws:iam::111111111111:role/Admin".to_string(),
            mfa_serial: mfa_serial.map(str::to_string),
            source_profile: None,
            region: None,
        }
    }

    #[tokio::test]
    async fn test_signin_without_mfa() {
        let mut assumer = MockRoleAssumer::new();
        assumer
            .expect_assume_role()
            .withf(|req| req.role_arn == "arn:aws:iam::111111111111:role/Admin" && req.mfa.is_none())
            .times(1)
            .returning(|_| Ok(creds()));

        let mut exchanger = MockTokenExchanger::new();
        exchanger
            .expect_exchange()
            .withf(|c| c.access_key_id == "ASIAEXAMPLE")
            .times(1)
            .returning(|_| Ok(SigninToken::new("tok-work")));

        let mut prompt = MockMfaPrompt::new();
        prompt.expect_prompt().never();

        let manager = SessionManager::new(assumer, exchanger, prompt);
        let url = manager.signin_url(&profile("work", None)).await.unwrap();

        assert!(url.ends_with(
            "Action=login&Destination=https%3A%2F%2Fconsole.aws.amazon.com%2F&SigninToken=tok-work"
        ));
    }

    #[tokio::test]
    async fn test_signin_with_mfa_retry() {
        let mut assumer = MockRoleAssumer::new();
        assumer
            .expect_assume_role()
            .withf(|req| req.mfa.is_none())
            .times(1)
            .returning(|_| Err(ConsoleError::AccessDenied("MFA required".to_string())));
        assumer
            .expect_assume_role()
            .withf(|req| req.mfa.as_ref().is_some_and(|m| m.token_code == "123456"))
            .times(1)
            .returning(|_| Ok(creds()));

        let mut exchanger = MockTokenExchanger::new();
        exchanger
            .expect_exchange()
            .times(1)
            .returning(|_| Ok(SigninToken::new("tok-secure")));

        let mut prompt = MockMfaPrompt::new();
        prompt
            .expect_prompt()
            .times(1)
            .returning(|_| Ok("123456".to_string()));

        let manager = SessionManager::new(assumer, exchanger, prompt);
        let url = manager
            .signin_url(&profile("secure", Some("arn:aws:iam::111111111111:mfa/alice")))
            .await
            .unwrap();

        assert!(url.ends_with("SigninToken=tok-secure"));
    }

    #[tokio::test]
    async fn test_assume_failure_skips_exchange() {
        let mut assumer = MockRoleAssumer::new();
        assumer
            .expect_assume_role()
            .times(1)
            .returning(|_| Err(ConsoleError::AuthenticationFailed("ExpiredToken".to_string())));

        let mut exchanger = MockTokenExchanger::new();
        exchanger.expect_exchange().never();

        let mut prompt = MockMfaPrompt::new();
        prompt.expect_prompt().never();

        let manager = SessionManager::new(assumer, exchanger, prompt);
        let result = manager
            .signin_url(&profile("secure", Some("arn:aws:iam::111111111111:mfa/alice")))
            .await;

        assert!(matches!(result, Err(ConsoleError::AuthenticationFailed(_))));
    }

    #[tokio::test]
    async fn test_exchange_failure_is_surfaced() {
        let mut assumer = MockRoleAssumer::new();
        assumer
            .expect_assume_role()
            .times(1)
            .returning(|_| Ok(creds()));

        let mut exchanger = MockTokenExchanger::new();
        exchanger
            .expect_exchange()
            .times(1)
            .returning(|_| Err(ConsoleError::Protocol("missing SigninToken".to_string())));

        let manager = SessionManager::new(assumer, exchanger, MockMfaPrompt::new());
        let result = manager.signin_url(&profile("work", None)).await;

        assert!(matches!(result, Err(ConsoleError::Protocol(_))));
    }
}
