use chrono::Utc;
use tracing::info;

use sweetshop_auth_types::token::issue_access_token;
use sweetshop_domain::id::UserId;
use sweetshop_domain::user::{User, UserRole};

use crate::domain::repository::{PasswordHasher, UserRepository};
use crate::domain::types::Credential;
use crate::error::ShopError;

/// Minimum password length in Unicode scalar values.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Same acceptance as `^[^\s@]+@[^\s@]+\.[^\s@]+$`: exactly one `@`, no
/// whitespace, and a dot in the domain with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: UserRole,
}

pub struct RegisterUseCase<U: UserRepository, H: PasswordHasher> {
    pub users: U,
    pub hasher: H,
}

impl<U: UserRepository, H: PasswordHasher> RegisterUseCase<U, H> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ShopError> {
        let (Some(email), Some(password)) = (present(input.email), present(input.password)) else {
            return Err(ShopError::MissingCredentials);
        };
        if !is_valid_email(&email) {
            return Err(ShopError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ShopError::PasswordTooShort);
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ShopError::EmailTaken);
        }

        let credential = Credential {
            id: UserId::generate(),
            email,
            password_hash: self.hasher.hash(&password).await?,
            role: input.role,
            created_at: Utc::now(),
        };
        // A concurrent registration can still win the race; the repository
        // maps the unique violation to EmailTaken.
        self.users.create(&credential).await?;

        info!(user_id = %credential.id, role = %credential.role, "user registered");
        Ok(credential.public())
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub user: User,
}

pub struct LoginUseCase<U: UserRepository, H: PasswordHasher> {
    pub users: U,
    pub hasher: H,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expires_in: u64,
}

impl<U: UserRepository, H: PasswordHasher> LoginUseCase<U, H> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ShopError> {
        let (Some(email), Some(password)) = (present(input.email), present(input.password)) else {
            return Err(ShopError::MissingCredentials);
        };

        // Unknown email and wrong password are indistinguishable to the caller.
        let credential = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(ShopError::InvalidCredentials)?;
        if !self.hasher.verify(&password, &credential.password_hash).await? {
            return Err(ShopError::InvalidCredentials);
        }

        let (token, _) = issue_access_token(
            credential.id,
            credential.role,
            &self.jwt_secret,
            self.jwt_expires_in,
        )
        .map_err(|e| ShopError::Internal(e.into()))?;

        info!(user_id = %credential.id, "user logged in");
        Ok(LoginOutput {
            token,
            user: credential.public(),
        })
    }
}
