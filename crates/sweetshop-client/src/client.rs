//! Typed REST client.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use sweetshop_domain::id::SweetId;
use sweetshop_domain::sweet::Sweet;
use sweetshop_domain::user::User;

use crate::error::ClientError;

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Deserialize)]
struct SweetEnvelope {
    sweet: Sweet,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RestockBody {
    quantity: i32,
}

/// Fields for a new catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct SweetDraft {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
}

/// Partial update; `None` fields are left out of the request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweetChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
}

/// Server-side search criteria for `GET /api/sweets/search`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

// ── Client ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ShopClient {
    http: Client,
    base_url: String,
}

impl ShopClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.bearer_auth(token)
    }

    // ── Auth ─────────────────────────────────────────────────────────────

    pub async fn register(&self, email: &str, password: &str) -> Result<User, ClientError> {
        self.register_at("/api/auth/register", email, password).await
    }

    pub async fn register_admin(&self, email: &str, password: &str) -> Result<User, ClientError> {
        self.register_at("/api/auth/register-admin", email, password)
            .await
    }

    async fn register_at(&self, path: &str, email: &str, password: &str) -> Result<User, ClientError> {
        let resp = self
            .http
            .post(self.url(path))
            .json(&Credentials { email, password })
            .send()
            .await?;
        let envelope: UserEnvelope = decode(resp).await?;
        Ok(envelope.user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&Credentials { email, password })
            .send()
            .await?;
        decode(resp).await
    }

    // ── Catalog ──────────────────────────────────────────────────────────

    pub async fn list_sweets(&self, token: &str) -> Result<Vec<Sweet>, ClientError> {
        let resp = self
            .authed(self.http.get(self.url("/api/sweets")), token)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn search_sweets(
        &self,
        token: &str,
        params: &SearchParams,
    ) -> Result<Vec<Sweet>, ClientError> {
        let query = serde_qs::to_string(params)?;
        let url = self.url(&format!("/api/sweets/search?{query}"));
        let resp = self.authed(self.http.get(url), token).send().await?;
        decode(resp).await
    }

    pub async fn create_sweet(&self, token: &str, draft: &SweetDraft) -> Result<Sweet, ClientError> {
        let resp = self
            .authed(self.http.post(self.url("/api/sweets")), token)
            .json(draft)
            .send()
            .await?;
        let envelope: SweetEnvelope = decode(resp).await?;
        Ok(envelope.sweet)
    }

    pub async fn update_sweet(
        &self,
        token: &str,
        id: SweetId,
        changes: &SweetChanges,
    ) -> Result<Sweet, ClientError> {
        let resp = self
            .authed(self.http.put(self.url(&format!("/api/sweets/{id}"))), token)
            .json(changes)
            .send()
            .await?;
        let envelope: SweetEnvelope = decode(resp).await?;
        Ok(envelope.sweet)
    }

    pub async fn delete_sweet(&self, token: &str, id: SweetId) -> Result<(), ClientError> {
        let resp = self
            .authed(self.http.delete(self.url(&format!("/api/sweets/{id}"))), token)
            .send()
            .await?;
        expect_success(resp).await
    }

    // ── Inventory ────────────────────────────────────────────────────────

    pub async fn purchase(&self, token: &str, id: SweetId) -> Result<(), ClientError> {
        let resp = self
            .authed(
                self.http.post(self.url(&format!("/api/sweets/{id}/purchase"))),
                token,
            )
            .send()
            .await?;
        expect_success(resp).await
    }

    pub async fn restock(&self, token: &str, id: SweetId, quantity: i32) -> Result<(), ClientError> {
        let resp = self
            .authed(
                self.http.post(self.url(&format!("/api/sweets/{id}/restock"))),
                token,
            )
            .json(&RestockBody { quantity })
            .send()
            .await?;
        expect_success(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────────────

/// Turn a non-2xx response into [`ClientError::Api`], using the body's
/// `message` when it has one.
async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned()
        });
    tracing::debug!(status = status.as_u16(), %message, "api request failed");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    Ok(check(resp).await?.json::<T>().await?)
}

async fn expect_success(resp: Response) -> Result<(), ClientError> {
    check(resp).await.map(drop)
}
