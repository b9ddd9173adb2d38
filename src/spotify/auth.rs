use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use serde_json::Value;
use tracing::debug;

use crate::{
    config::Credentials,
    error::{Error, Result},
    types::TokenResponse,
};

/// Short-lived bearer token for catalog calls.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        AccessToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Exchanges client credentials for an access token.
///
/// Sends `grant_type=client_credentials` as a form body to `token_url`,
/// authenticated with HTTP Basic `base64(client_id:client_secret)`.
///
/// # Returns
///
/// - `Ok(AccessToken)` - a non-empty bearer token
/// - `Err(Error::Auth)` - transport failure, non-2xx status, or a response
///   without a usable `access_token`. The upstream message is kept.
///
/// There is no retry and the token is never cached; callers request a new
/// one for every pipeline run.
pub async fn client_credentials_token(
    http: &Client,
    token_url: &str,
    credentials: &Credentials,
) -> Result<AccessToken> {
    let basic = STANDARD.encode(format!(
        "{}:{}",
        credentials.client_id, credentials.client_secret
    ));

    debug!("Requesting client-credentials token from {}", token_url);
    let response = http
        .post(token_url)
        .header(AUTHORIZATION, format!("Basic {basic}"))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| Error::Auth(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Auth(token_error_message(status, &body)));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| Error::Auth(format!("unexpected token response: {e}")))?;

    if token.access_token.is_empty() {
        return Err(Error::Auth("token response carried an empty access token".into()));
    }

    Ok(AccessToken(token.access_token))
}

// The accounts service answers `{"error": "...", "error_description": "..."}`.
fn token_error_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        json["error_description"]
            .as_str()
            .or_else(|| json["error"].as_str())
            .map(str::to_string)
    });

    match detail {
        Some(detail) => format!("{} ({})", detail, status.as_u16()),
        None => format!("token endpoint returned {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_description_wins_over_error_code() {
        let msg = token_error_message(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_client","error_description":"Invalid client secret"}"#,
        );
        assert_eq!(msg, "Invalid client secret (400)");
    }

    #[test]
    fn non_json_body_falls_back_to_status() {
        let msg = token_error_message(StatusCode::UNAUTHORIZED, "nope");
        assert!(msg.contains("401"));
    }

    #[test]
    fn debug_never_prints_the_token() {
        let token = AccessToken::new("BQCsecret");
        assert!(!format!("{:?}", token).contains("BQCsecret"));
    }
}
