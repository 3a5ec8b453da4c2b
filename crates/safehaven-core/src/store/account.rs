//! Login and registration.
//!
//! Unlike the data operations, these fall back to an offline identity only
//! when the backend is unreachable. Any answer the backend does give,
//! including a rejection, is passed to the caller unchanged.

use tracing::warn;

use safehaven_types::account::{LoginRequest, RegisterRequest, User};
use safehaven_types::error::{AccountError, RemoteError};

use super::StoreFacade;
use crate::cache::LocalCache;
use crate::remote::RemoteClient;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";

/// Shortest password accepted by the offline login.
pub const MIN_PASSWORD_LEN: usize = 6;

const ADMIN_NAME: &str = "Admin User";
const ADMIN_AVATAR_BG: &str = "ef4444";
const USER_AVATAR_BG: &str = "6366f1";

fn avatar_url(name: &str, background: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background={background}&color=fff",
        urlencoding::encode(name)
    )
}

fn offline_user_id() -> String {
    format!("u_{}", uuid::Uuid::now_v7().simple())
}

/// Identity produced by an offline login.
fn offline_login_user(email: &str) -> User {
    let is_admin = email.contains("admin");
    let local_part = email.split('@').next().unwrap_or(email).to_string();
    let name = if is_admin {
        ADMIN_NAME.to_string()
    } else {
        local_part.clone()
    };
    let background = if is_admin { ADMIN_AVATAR_BG } else { USER_AVATAR_BG };

    User {
        id: offline_user_id(),
        name,
        email: email.to_string(),
        avatar: Some(avatar_url(&local_part, background)),
        is_admin: Some(is_admin),
    }
}

impl<R: RemoteClient, L: LocalCache> StoreFacade<R, L> {
    /// Log in. Offline, any well-formed email with a long enough password is accepted.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.remote_post::<_, User>(LOGIN_PATH, Some(&body)).await {
            Ok(user) => Ok(user),
            Err(err) if err.is_unavailable() => {
                warn!(error = %err, "Backend offline, using offline login");
                tokio::time::sleep(self.options.offline_auth_delay).await;
                if email.trim().is_empty() || password.chars().count() < MIN_PASSWORD_LEN {
                    return Err(AccountError::InvalidCredentials);
                }
                Ok(offline_login_user(email))
            }
            Err(err) => Err(reject(err)),
        }
    }

    /// Register a new account. Offline, the identity is created locally.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AccountError> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.remote_post::<_, User>(REGISTER_PATH, Some(&body)).await {
            Ok(user) => Ok(user),
            Err(err) if err.is_unavailable() => {
                warn!(error = %err, "Backend offline, using offline registration");
                tokio::time::sleep(self.options.offline_auth_delay).await;
                Ok(User {
                    id: offline_user_id(),
                    name: name.to_string(),
                    email: email.to_string(),
                    avatar: Some(avatar_url(name, USER_AVATAR_BG)),
                    is_admin: None,
                })
            }
            Err(err) => Err(reject(err)),
        }
    }
}

fn reject(err: RemoteError) -> AccountError {
    warn!(error = %err, "Backend rejected account request");
    AccountError::Remote(err)
}
