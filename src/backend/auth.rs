use serde::Deserialize;

use super::SupabaseClient;
use crate::core::VocadexError;

/// The signed-in identity. Cleared on sign-out; everything auth-gated in
/// the GUI checks for its presence.
#[derive(Debug, Clone, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: UserIdentity,
}

// The auth service is not consistent about which field carries the message.
#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

async fn auth_error(response: reqwest::Response) -> VocadexError {
    let status = response.status();
    let message = match response.json::<AuthErrorBody>().await {
        Ok(body) => body
            .error_description
            .or(body.msg)
            .or(body.message)
            .unwrap_or_else(|| format!("Authentication failed (HTTP {})", status)),
        Err(_) => format!("Authentication failed (HTTP {})", status),
    };
    VocadexError::backend(message)
}

pub async fn sign_in(
    client: &SupabaseClient,
    email: &str,
    password: &str,
) -> Result<Session, VocadexError> {
    let url = client.endpoint("/auth/v1/token?grant_type=password");
    let response = client
        .authed(client.http().post(&url))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(auth_error(response).await);
    }

    Ok(response.json::<Session>().await?)
}

/// Sign-up does not hand back a usable session when the project requires
/// email confirmation, so callers get a message to show instead.
pub async fn sign_up(
    client: &SupabaseClient,
    email: &str,
    password: &str,
) -> Result<String, VocadexError> {
    let url = client.endpoint("/auth/v1/signup");
    let response = client
        .authed(client.http().post(&url))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(auth_error(response).await);
    }

    Ok(format!("Account created. Check {} for a confirmation link.", email))
}

pub async fn sign_out(client: &SupabaseClient) -> Result<(), VocadexError> {
    let url = client.endpoint("/auth/v1/logout");
    let response = client.authed(client.http().post(&url)).send().await?;

    // An already-expired token still means the user is signed out locally.
    if response.status().is_success() || response.status() == reqwest::StatusCode::UNAUTHORIZED {
        return Ok(());
    }

    Err(auth_error(response).await)
}
