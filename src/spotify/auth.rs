use std::{fmt, sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    REQUEST_TIMEOUT, config,
    config::Config,
    error, info,
    server::start_api_server,
    success,
    types::{PkceToken, Token},
    utils, warning,
};

#[derive(Debug)]
pub enum AuthError {
    Rejected(StatusCode),
    Network(reqwest::Error),
    Malformed(&'static str),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Network(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Rejected(status) => {
                write!(f, "token endpoint rejected the request with status {}", status)
            }
            AuthError::Network(err) => write!(f, "network error: {}", err),
            AuthError::Malformed(msg) => write!(f, "{}", msg),
        }
    }
}

/// Exchanges the refresh credential for a short-lived access token.
///
/// Stateless function of the client identity, client secret and refresh
/// token carried in [`Config`]; called once per upload session rather than
/// caching tokens across runs. The secrets travel only in the form body and
/// are never logged.
///
/// # Errors
///
/// - [`AuthError::Rejected`] when the token endpoint answers with any
///   non-success status. This is fatal to the pipeline; there is no retry.
/// - [`AuthError::Network`] for transport failures.
/// - [`AuthError::Malformed`] when the response carries no `access_token`.
pub async fn refresh_access_token(cfg: &Config) -> Result<Token, AuthError> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", cfg.refresh_token.as_str()),
            ("client_id", cfg.client_id.as_str()),
            ("client_secret", cfg.client_secret.as_str()),
        ])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        return Err(AuthError::Rejected(status));
    }

    let json: Value = res.json().await?;
    let access_token = json["access_token"]
        .as_str()
        .ok_or(AuthError::Malformed("access_token missing from token response"))?;

    Ok(Token {
        access_token: access_token.to_string(),
        // the endpoint may rotate the refresh token; fall back to the old one
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or(&cfg.refresh_token)
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Runs the interactive OAuth 2.0 PKCE flow to obtain a refresh credential.
///
/// This is the one-time bootstrap for the pipeline: it generates a PKCE
/// verifier and challenge, starts the local callback server, sends the user
/// to Spotify's consent page in their browser, and waits for the callback to
/// complete the code exchange. The resulting refresh token is printed for
/// the user to place in their environment; nothing is persisted.
///
/// # Arguments
///
/// * `shared_state` - Thread-safe shared state carrying the PKCE verifier to
///   the callback handler and the token back out of it
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // start API server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    // Construct the authorization URL
    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = &config::spotify_apiauth_url(),
        client_id = &config::spotify_client_id(),
        redirect_uri = &config::spotify_redirect_uri(),
        code_challenge = code_challenge,
        scope = &config::spotify_scope()
    );

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for callback to be hit
    match wait_for_token(shared_state).await {
        Some(token) => {
            success!("Authentication successful!");
            info!(
                "Set SPOTIFY_REFRESH_TOKEN={} in your environment so `xmsync sync` can fetch access tokens on its own.",
                token.refresh_token
            );
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Polls the shared state for a completed token, giving the user 60 seconds
/// to finish the consent flow in their browser.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for a token using the PKCE verifier.
///
/// Final step of the `xmsync auth` flow, invoked by the callback handler.
/// The verifier proves that the client completing the flow is the one that
/// started it.
///
/// # Errors
///
/// [`AuthError::Rejected`] on a non-success status (expired or reused code,
/// verifier mismatch), [`AuthError::Malformed`] when the response lacks the
/// token fields, [`AuthError::Network`] for transport failures.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, AuthError> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", config::spotify_client_id().as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", config::spotify_redirect_uri().as_str()),
        ])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        return Err(AuthError::Rejected(status));
    }

    let json: Value = res.json().await?;
    let access_token = json["access_token"]
        .as_str()
        .ok_or(AuthError::Malformed("access_token missing from token response"))?;
    let refresh_token = json["refresh_token"]
        .as_str()
        .ok_or(AuthError::Malformed("refresh_token missing from token response"))?;

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
