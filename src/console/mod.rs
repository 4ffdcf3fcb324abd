// AWS Console federation and URL generation
use crate::error::{ConsoleError, Result};
use crate::models::{SessionDescriptor, SigninToken, SigninTokenResponse, TemporaryCredentials};
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// AWS Federation endpoint
pub const FEDERATION_URL: &str = "https://signin.aws.amazon.com/federation";

/// Console landing page after sign-in
pub const CONSOLE_DESTINATION: &str = "https://console.aws.amazon.com/";

/// 12 hours, the maximum for federated sessions
pub const SESSION_DURATION_SECS: u32 = 43200;

/// Exchanges temporary credentials for a one-time sign-in token
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenExchanger {
    async fn exchange(&self, creds: &TemporaryCredentials) -> Result<SigninToken>;
}

/// Federation endpoint client backed by reqwest
pub struct FederationClient {
    http: reqwest::Client,
    base_url: String,
}

impl FederationClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: FEDERATION_URL.to_string(),
        }
    }

    #[cfg(test)]
    fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder().no_proxy().build().unwrap(),
            base_url: base_url.into(),
        }
    }
}

impl Default for FederationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenExchanger for FederationClient {
    async fn exchange(&self, creds: &TemporaryCredentials) -> Result<SigninToken> {
        let token_url = token_request_url(&self.base_url, creds)?;

        tracing::debug!("Requesting sign-in token from AWS federation endpoint");
        let response = self
            .http
            .get(&token_url)
            .send()
            .await
            .map_err(|e| ConsoleError::Network(format!("Failed to get sign-in token: {}", e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ConsoleError::Network(format!("Failed to read sign-in token response: {}", e))
        })?;

        if !status.is_success() {
            return Err(ConsoleError::Protocol(format!(
                "federation endpoint returned HTTP {}",
                status
            )));
        }

        parse_signin_token(&body)
    }
}

/// Build the getSigninToken request URL for `creds` against `base_url`
pub fn token_request_url(base_url: &str, creds: &TemporaryCredentials) -> Result<String> {
    let session_json = serde_json::to_string(&SessionDescriptor::from(creds))?;
    let duration = SESSION_DURATION_SECS.to_string();

    Ok(with_query(
        base_url,
        &[
            ("Action", "getSigninToken"),
            ("Session", &session_json),
            ("SessionDuration", &duration),
        ],
    ))
}

/// Extract the sign-in token from a getSigninToken response body
pub fn parse_signin_token(body: &str) -> Result<SigninToken> {
    let response: SigninTokenResponse = serde_json::from_str(body).map_err(|e| {
        ConsoleError::Protocol(format!("Failed to parse token response: {}", e))
    })?;

    Ok(SigninToken::new(response.signin_token))
}

/// Build the browser URL that redeems `token` for a console session
pub fn build_signin_url(token: &SigninToken) -> String {
    with_query(
        FEDERATION_URL,
        &[
            ("Action", "login"),
            ("Destination", CONSOLE_DESTINATION),
            ("SigninToken", token.as_str()),
        ],
    )
}

fn with_query(base_url: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", base_url, query)
}

/// Open the sign-in URL in the default browser, or print it when headless
pub fn open_url(url: &str, headless: bool) -> Result<()> {
    if headless {
        tracing::info!("Headless environment, printing sign-in URL");
        println!("{}", url);
        return Ok(());
    }

    tracing::info!("Opening AWS Console in browser");
    webbrowser::open(url).map_err(|e| ConsoleError::BrowserLaunchFailed(format!("{}", e)))?;

    Ok(())
}
