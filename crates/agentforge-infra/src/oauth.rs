//! OAuth 2.0 authorization-code client for GitHub and Google sign-in.
//!
//! Builds the provider authorize URL and, on callback, exchanges the code
//! for an access token and fetches the account profile.

use serde::Deserialize;
use thiserror::Error;

use agentforge_types::config::OAuthClientConfig;
use agentforge_types::user::{OAuthProfile, OAuthProvider};

const USER_AGENT: &str = concat!("agentforge/", env!("CARGO_PKG_VERSION"));

/// Errors from the code exchange or profile fetch.
///
/// Never carries the access token or client secret.
#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("token exchange failed: {0}")]
    Exchange(String),

    #[error("profile request failed: {0}")]
    Profile(String),

    #[error("the account has no verified email address")]
    NoVerifiedEmail,
}

struct Endpoints {
    authorize: &'static str,
    token: &'static str,
    profile: &'static str,
    scope: &'static str,
}

fn endpoints(provider: OAuthProvider) -> Endpoints {
    match provider {
        OAuthProvider::Github => Endpoints {
            authorize: "https://github.com/login/oauth/authorize",
            token: "https://github.com/login/oauth/access_token",
            profile: "https://api.github.com/user",
            scope: "read:user user:email",
        },
        OAuthProvider::Google => Endpoints {
            authorize: "https://accounts.google.com/o/oauth2/v2/auth",
            token: "https://oauth2.googleapis.com/token",
            profile: "https://openidconnect.googleapis.com/v1/userinfo",
            scope: "openid email",
        },
    }
}

const GITHUB_EMAILS_URL: &str = "https://api.github.com/user/emails";

/// Provider authorize URL the browser is redirected to.
pub fn authorize_url(provider: OAuthProvider, client: &OAuthClientConfig, state: &str) -> String {
    let ep = endpoints(provider);
    format!(
        "{}?response_type=code&client_id={}&redirect_uri={}&scope={}&state={}",
        ep.authorize,
        urlencoding::encode(&client.client_id),
        urlencoding::encode(&client.redirect_url),
        urlencoding::encode(ep.scope),
        urlencoding::encode(state),
    )
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Deserialize)]
struct GithubUser {
    id: u64,
    email: Option<String>,
}

#[derive(Deserialize)]
struct GithubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

#[derive(Deserialize)]
struct GoogleUser {
    sub: String,
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

/// HTTP side of the OAuth flow.
#[derive(Clone, Default)]
pub struct OAuthClient {
    http: reqwest::Client,
}

impl OAuthClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exchange an authorization code and fetch the signed-in account.
    pub async fn exchange_code(
        &self,
        provider: OAuthProvider,
        client: &OAuthClientConfig,
        code: &str,
    ) -> Result<OAuthProfile, OAuthError> {
        let access_token = self.access_token(provider, client, code).await?;
        let profile = match provider {
            OAuthProvider::Github => self.github_profile(&access_token).await?,
            OAuthProvider::Google => self.google_profile(&access_token).await?,
        };
        tracing::debug!(provider = %provider, subject = %profile.subject, "oauth profile fetched");
        Ok(profile)
    }

    async fn access_token(
        &self,
        provider: OAuthProvider,
        client: &OAuthClientConfig,
        code: &str,
    ) -> Result<String, OAuthError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
            ("redirect_uri", client.redirect_url.as_str()),
        ];
        let response: TokenResponse = self
            .http
            .post(endpoints(provider).token)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| OAuthError::Exchange(e.without_url().to_string()))?
            .json()
            .await
            .map_err(|e| OAuthError::Exchange(e.to_string()))?;
        token_from_response(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, OAuthError> {
        self.http
            .get(url)
            .bearer_auth(access_token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| OAuthError::Profile(e.to_string()))?
            .json()
            .await
            .map_err(|e| OAuthError::Profile(e.to_string()))
    }

    async fn github_profile(&self, access_token: &str) -> Result<OAuthProfile, OAuthError> {
        let user: GithubUser = self
            .get_json(endpoints(OAuthProvider::Github).profile, access_token)
            .await?;
        let email = match user.email.filter(|e| !e.trim().is_empty()) {
            Some(email) => email,
            None => {
                let emails: Vec<GithubEmail> = self.get_json(GITHUB_EMAILS_URL, access_token).await?;
                primary_verified_email(emails).ok_or(OAuthError::NoVerifiedEmail)?
            }
        };
        Ok(OAuthProfile {
            provider: OAuthProvider::Github,
            subject: user.id.to_string(),
            email,
        })
    }

    async fn google_profile(&self, access_token: &str) -> Result<OAuthProfile, OAuthError> {
        let user: GoogleUser = self
            .get_json(endpoints(OAuthProvider::Google).profile, access_token)
            .await?;
        google_profile_from(user)
    }
}

fn token_from_response(response: TokenResponse) -> Result<String, OAuthError> {
    match response.access_token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(OAuthError::Exchange(
            response
                .error_description
                .or(response.error)
                .unwrap_or_else(|| "no access token in response".to_string()),
        )),
    }
}

fn primary_verified_email(emails: Vec<GithubEmail>) -> Option<String> {
    let verified: Vec<GithubEmail> = emails.into_iter().filter(|e| e.verified).collect();
    let primary = verified.iter().position(|e| e.primary).unwrap_or(0);
    verified.into_iter().nth(primary).map(|e| e.email)
}

fn google_profile_from(user: GoogleUser) -> Result<OAuthProfile, OAuthError> {
    match user.email {
        Some(email) if user.email_verified && !email.trim().is_empty() => Ok(OAuthProfile {
            provider: OAuthProvider::Google,
            subject: user.sub,
            email,
        }),
        _ => Err(OAuthError::NoVerifiedEmail),
    }
}
