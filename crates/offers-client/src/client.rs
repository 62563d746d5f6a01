//! Client facade for the Offers API
//!
//! Owns the refresh token and the currently held access token, decides when
//! to renew, and maps transport outcomes onto the typed error taxonomy.
//! Renewal is lazy and pull-based: every authenticated call checks the held
//! expiry first; there is no background refresh task.
//!
//! The facade takes `&self` everywhere, so one instance can serve many
//! concurrent calls. The renewal path is deliberately not serialized:
//! several callers can observe an expired token at once and each perform a
//! redundant exchange. The exchange is idempotent server-side, the last
//! write wins, and every token handed out was valid when issued.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use offers_transport::{ApiRequest, ApiResponse, Transport};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::log::{CallLog, CallRecord};
use crate::models::{Offer, Product};
use crate::state::ClientState;

/// Authentication endpoint: exchanges the refresh token for an access token.
const AUTH_PATH: &str = "/api/v1/auth";
/// Product registration endpoint.
const REGISTER_PATH: &str = "/api/v1/products/register";
/// Token lifetime assumed when the auth response does not declare one.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 300;

fn offers_path(product_id: Uuid) -> String {
    format!("/api/v1/products/{product_id}/offers")
}

/// Response from the authentication endpoint.
///
/// `expires_in` is a delta in seconds from the response time; the facade
/// converts it to an absolute expiry when storing the token.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Registration acknowledgment: the server echoes the product id.
#[derive(Debug, Deserialize)]
struct RegisterResponse {
    id: Uuid,
}

/// Held access token with its absolute expiry.
#[derive(Debug, Clone)]
struct AccessToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Facade over the Offers API: authentication, product registration, offer
/// retrieval, and state persistence.
pub struct Client {
    base_url: String,
    refresh_token: String,
    transport: Arc<dyn Transport>,
    token: RwLock<Option<AccessToken>>,
    logging: bool,
    log_dir: PathBuf,
    call_log: Option<CallLog>,
}

impl Client {
    /// Build a client from a state snapshot, constructing the transport
    /// named by the state's discriminator.
    pub fn new(state: ClientState) -> Self {
        let transport = offers_transport::build(state.transport);
        Self::with_transport(state, transport)
    }

    /// Build a client with an explicit transport instance.
    pub fn with_transport(state: ClientState, transport: Arc<dyn Transport>) -> Self {
        let token = match (state.access_token, state.access_token_expiry) {
            (Some(token), Some(expires_at)) => Some(AccessToken { token, expires_at }),
            _ => None,
        };
        let call_log = state.logging.then(|| CallLog::new(&state.log_dir));
        Self {
            base_url: state.base_url,
            refresh_token: state.refresh_token,
            transport,
            token: RwLock::new(token),
            logging: state.logging,
            log_dir: state.log_dir,
            call_log,
        }
    }

    /// Load the persisted state at `path` and build a client from it.
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        ClientState::load(path).await.map(Self::new)
    }

    /// Persist the current state (including the held access token) so a
    /// later invocation can reuse it. Mirrors [`Client::load_from_file`].
    pub async fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.state().await.save(path).await
    }

    /// Snapshot the current state.
    pub async fn state(&self) -> ClientState {
        let held = self.token.read().await.clone();
        let (access_token, access_token_expiry) = match held {
            Some(t) => (Some(t.token), Some(t.expires_at)),
            None => (None, None),
        };
        ClientState {
            base_url: self.base_url.clone(),
            refresh_token: self.refresh_token.clone(),
            access_token,
            access_token_expiry,
            transport: self.transport.kind(),
            logging: self.logging,
            log_dir: self.log_dir.clone(),
        }
    }

    /// Exchange the refresh token for a fresh access token, unconditionally.
    ///
    /// On success both the token and its computed expiry are stored; on any
    /// failure the held token is left untouched. A transport failure here is
    /// an authentication failure from the caller's perspective.
    pub async fn retrieve_access_token(&self) -> Result<()> {
        let url = format!("{}{AUTH_PATH}", self.base_url);
        // The API takes the token in a literal `Bearer` header, not
        // `Authorization: Bearer ...`.
        let request = ApiRequest::post(&url, serde_json::json!({}))
            .header("accept", "application/json")
            .header("Bearer", &self.refresh_token);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "transport failure during authentication");
                return Err(Error::Auth(format!(
                    "transport failure during authentication: {e}"
                )));
            }
        };
        self.log_call("POST", &url, &response).await;

        match response.status {
            201 => {
                let auth: AuthResponse = response.json().map_err(|e| {
                    Error::UnexpectedResponse(format!("malformed auth response: {e}"))
                })?;
                let lifetime = auth.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
                let expires_at = Utc::now() + TimeDelta::seconds(lifetime);
                *self.token.write().await = Some(AccessToken {
                    token: auth.access_token,
                    expires_at,
                });
                info!(expires_at = %expires_at, "access token renewed");
                Ok(())
            }
            401 | 403 => Err(Error::Auth(format!(
                "refresh token rejected ({}): {}",
                response.status, response.body
            ))),
            status => Err(Error::InvalidRequest {
                status,
                body: response.body,
            }),
        }
    }

    /// Register `product` with the catalog and return the acknowledged id.
    ///
    /// Any non-2xx status maps to [`Error::InvalidRequest`] with the status
    /// and body, including 409 for an id that is already registered.
    pub async fn register_product(&self, product: &Product) -> Result<Uuid> {
        let token = self.ensure_fresh_token().await?;
        let url = format!("{}{REGISTER_PATH}", self.base_url);
        let body = serde_json::json!({
            "id": product.id,
            "name": product.name,
            "description": product.description,
        });
        let request = ApiRequest::post(&url, body)
            .header("accept", "application/json")
            .header("Bearer", &token);

        let response = self.transport.send(request).await?;
        self.log_call("POST", &url, &response).await;

        match response.status {
            201 => {
                let ack: RegisterResponse = response.json().map_err(|e| {
                    Error::UnexpectedResponse(format!("malformed registration response: {e}"))
                })?;
                if ack.id != product.id {
                    return Err(Error::UnexpectedResponse(format!(
                        "registration acknowledged a different id: sent {}, received {}",
                        product.id, ack.id
                    )));
                }
                info!(product_id = %ack.id, "product registered");
                Ok(ack.id)
            }
            401 => Err(Error::Auth(format!(
                "access token rejected: {}",
                response.body
            ))),
            status => Err(Error::InvalidRequest {
                status,
                body: response.body,
            }),
        }
    }

    /// Fetch all offers for `product_id`.
    ///
    /// An unknown product yields an empty list: the API answers 404 for ids
    /// that were never registered, and an empty array for registered ids
    /// with no offers. Both normalize to "no offers".
    pub async fn get_offers(&self, product_id: Uuid) -> Result<Vec<Offer>> {
        let token = self.ensure_fresh_token().await?;
        let url = format!("{}{}", self.base_url, offers_path(product_id));
        let request = ApiRequest::get(&url)
            .header("accept", "application/json")
            .header("Bearer", &token);

        let response = self.transport.send(request).await?;
        self.log_call("GET", &url, &response).await;

        match response.status {
            200 => response.json::<Vec<Offer>>().map_err(|e| {
                Error::UnexpectedResponse(format!("malformed offers response: {e}"))
            }),
            401 => Err(Error::Auth(format!(
                "access token rejected: {}",
                response.body
            ))),
            404 => {
                debug!(product_id = %product_id, "product not registered, no offers");
                Ok(Vec::new())
            }
            status => Err(Error::InvalidRequest {
                status,
                body: response.body,
            }),
        }
    }

    /// Return a valid access token, renewing first when the held one is
    /// missing or at/after its expiry.
    async fn ensure_fresh_token(&self) -> Result<String> {
        {
            let held = self.token.read().await;
            if let Some(token) = held.as_ref() {
                if Utc::now() < token.expires_at {
                    return Ok(token.token.clone());
                }
                debug!(expired_at = %token.expires_at, "access token expired, renewing");
            }
        }

        self.retrieve_access_token().await?;

        let held = self.token.read().await;
        match held.as_ref() {
            Some(token) => Ok(token.token.clone()),
            // retrieve_access_token stores the token before returning Ok
            None => Err(Error::UnexpectedResponse(
                "token missing after successful renewal".into(),
            )),
        }
    }

    /// Record one completed call in the optional append-only log. Log
    /// failures are reported and swallowed; they never fail the call.
    async fn log_call(&self, method: &str, url: &str, response: &ApiResponse) {
        debug!(method, url, status = response.status, "call completed");
        if let Some(log) = &self.call_log {
            let record = CallRecord {
                at: Utc::now(),
                method: method.to_string(),
                url: url.to_string(),
                status: response.status,
                body: response.body.clone(),
            };
            if let Err(e) = log.append(&record).await {
                warn!(error = %e, "failed to append call log record");
            }
        }
    }
}
