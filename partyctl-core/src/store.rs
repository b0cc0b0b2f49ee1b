//! Party store seam: the remote REST store and an in-memory stand-in
//!
//! Contract consumed by the view:
//!
//! ```text
//! GET    {endpoint}/party        -> [PartyMember]
//! PATCH  {endpoint}/party/{id}   {"name": ..} | {"selected_moves": [..]}
//! DELETE {endpoint}/party/{id}
//! ```

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;

use crate::error::{PartyError, Result};
use crate::member::{MemberId, MemberPatch, PartyMember};

/// Remote collection of party members, keyed by id
#[async_trait]
pub trait PartyStore: Send + Sync {
    /// Fetch the full current party
    async fn list(&self) -> Result<Vec<PartyMember>>;

    /// Apply a partial update; only success matters, the body is not read
    async fn patch(&self, id: &MemberId, patch: &MemberPatch) -> Result<()>;

    /// Remove a member
    async fn delete(&self, id: &MemberId) -> Result<()>;
}

// ============================================================================
// HTTP store
// ============================================================================

/// Party store reached over HTTP with reqwest
#[derive(Debug, Clone)]
pub struct HttpPartyStore {
    client: Client,
    endpoint: String,
}

#[derive(Deserialize, Debug)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl HttpPartyStore {
    /// Build a store for `endpoint` (base URL, without `/party`)
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = endpoint.trim_end_matches('/').to_string();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(PartyError::invalid_endpoint(
                endpoint,
                "expected an http:// or https:// URL",
            ));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| PartyError::Request {
            url: endpoint.clone(),
            source,
        })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn party_url(&self) -> String {
        format!("{}/party", self.endpoint)
    }

    fn member_url(&self, id: &MemberId) -> String {
        format!("{}/party/{}", self.endpoint, id.as_path_segment())
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<&MemberPatch>,
    ) -> Result<reqwest::Response> {
        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, %url, "party store request");

        let response = request
            .send()
            .await
            .map_err(|source| PartyError::Request {
                url: url.clone(),
                source,
            })?;

        check_status(method, url, response).await
    }
}

/// Turn a non-2xx response into [`PartyError::Status`]
async fn check_status(
    method: Method,
    url: String,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    let message = match serde_json::from_str::<ErrorResponse>(&error_text) {
        Ok(ErrorResponse {
            error: Some(error), ..
        }) => error,
        Ok(ErrorResponse {
            message: Some(message),
            ..
        }) => message,
        _ if error_text.is_empty() => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        _ => error_text,
    };

    Err(PartyError::Status {
        method: method_name(&method),
        url,
        status: status.as_u16(),
        message,
    })
}

fn method_name(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::PATCH => "PATCH",
        Method::DELETE => "DELETE",
        Method::POST => "POST",
        Method::PUT => "PUT",
        _ => "REQUEST",
    }
}

#[async_trait]
impl PartyStore for HttpPartyStore {
    async fn list(&self) -> Result<Vec<PartyMember>> {
        let url = self.party_url();
        let response = self.send(Method::GET, url.clone(), None).await?;

        let body = response
            .text()
            .await
            .map_err(|source| PartyError::Request {
                url: url.clone(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|e| PartyError::decode(url, e.to_string()))
    }

    async fn patch(&self, id: &MemberId, patch: &MemberPatch) -> Result<()> {
        self.send(Method::PATCH, self.member_url(id), Some(patch))
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &MemberId) -> Result<()> {
        self.send(Method::DELETE, self.member_url(id), None).await?;
        Ok(())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// A request seen by [`MemoryPartyStore`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    List,
    Patch { id: MemberId, patch: MemberPatch },
    Delete { id: MemberId },
}

#[derive(Debug, Default)]
struct MemoryState {
    members: Vec<PartyMember>,
    requests: Vec<StoreRequest>,
    failing: bool,
}

/// Party store held in process memory.
///
/// Records every request it receives and can be switched into a failing
/// state, where every call answers like a store returning 503.
#[derive(Debug, Default)]
pub struct MemoryPartyStore {
    state: Mutex<MemoryState>,
}

impl MemoryPartyStore {
    pub fn new(members: Vec<PartyMember>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                members,
                ..MemoryState::default()
            }),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<StoreRequest> {
        self.lock().requests.clone()
    }

    /// Current server-side members
    pub fn members(&self) -> Vec<PartyMember> {
        self.lock().members.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A poisoned lock only means a panicking test thread; the data is still usable
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn unavailable(method: &'static str, url: String) -> PartyError {
        PartyError::Status {
            method,
            url,
            status: 503,
            message: "store unavailable".to_string(),
        }
    }

    fn not_found(method: &'static str, id: &MemberId) -> PartyError {
        PartyError::Status {
            method,
            url: format!("memory:/party/{}", id),
            status: 404,
            message: "Not Found".to_string(),
        }
    }
}

#[async_trait]
impl PartyStore for MemoryPartyStore {
    async fn list(&self) -> Result<Vec<PartyMember>> {
        let mut state = self.lock();
        state.requests.push(StoreRequest::List);
        if state.failing {
            return Err(Self::unavailable("GET", "memory:/party".to_string()));
        }
        Ok(state.members.clone())
    }

    async fn patch(&self, id: &MemberId, patch: &MemberPatch) -> Result<()> {
        let mut state = self.lock();
        state.requests.push(StoreRequest::Patch {
            id: id.clone(),
            patch: patch.clone(),
        });
        if state.failing {
            return Err(Self::unavailable("PATCH", format!("memory:/party/{}", id)));
        }

        let member = state
            .members
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| Self::not_found("PATCH", id))?;
        *member = patch.applied_to(member);
        Ok(())
    }

    async fn delete(&self, id: &MemberId) -> Result<()> {
        let mut state = self.lock();
        state.requests.push(StoreRequest::Delete { id: id.clone() });
        if state.failing {
            return Err(Self::unavailable("DELETE", format!("memory:/party/{}", id)));
        }

        let before = state.members.len();
        state.members.retain(|m| &m.id != id);
        if state.members.len() == before {
            return Err(Self::not_found("DELETE", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_endpoint() {
        let err = HttpPartyStore::new("ftp://store", None).unwrap_err();
        assert!(matches!(err, PartyError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_member_url() {
        let store = HttpPartyStore::new("http://localhost:3000/", None).unwrap();
        assert_eq!(store.endpoint(), "http://localhost:3000");
        assert_eq!(
            store.member_url(&MemberId::from(7)),
            "http://localhost:3000/party/7"
        );
        assert_eq!(store.party_url(), "http://localhost:3000/party");
        assert_eq!(
            store.member_url(&MemberId::from("1#copy")),
            "http://localhost:3000/party/1%23copy"
        );
    }

    #[tokio::test]
    async fn test_memory_store_not_found() {
        let store = MemoryPartyStore::new(Vec::new());
        let err = store.delete(&MemberId::from(1)).await.unwrap_err();
        assert!(matches!(err, PartyError::Status { status: 404, .. }));
        assert_eq!(
            store.requests(),
            vec![StoreRequest::Delete { id: MemberId::from(1) }]
        );
    }
}
