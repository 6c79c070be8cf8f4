use std::fmt;

use layer_core::{LayerServerOptions, JSON_CONTENT_TYPE, LAYER_MEDIA_TYPE};
use log::{debug, error, trace};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

use super::endpoint::{Endpoint, Method};
use super::http_trait::HttpClient;
use super::response::LayerResponse;

/// Client for the Layer Platform API, acting either as a user or as the server.
///
/// Generic over the HTTP transport, which the caller constructs and configures
/// (host, TLS, timeouts). The client holds no per-call state, so one instance
/// can serve any number of concurrent requests.
///
/// Every call resolves to one of two outcomes: the raw response, whatever its
/// status code, or [`Error::Transport`] when no response was received. Use
/// `.ok()` on the result when only the response matters.
#[derive(Clone)]
pub struct LayerServerClient<H: HttpClient> {
    http_client: H,
    app_id: String,
    app_token: String,
}

impl<H: HttpClient> LayerServerClient<H> {
    /// Create a new client. The credentials are copied out of `options`;
    /// unset values are used as empty strings.
    pub fn new(http_client: H, options: &LayerServerOptions) -> Self {
        LayerServerClient {
            http_client,
            app_id: options.app_id().unwrap_or_default().to_string(),
            app_token: options.app_token().unwrap_or_default().to_string(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn http_client(&self) -> &H {
        &self.http_client
    }

    /// Path of `endpoint` for the configured application. Does not check the
    /// identifiers; see [`Endpoint::check`].
    pub fn endpoint_path(&self, endpoint: &Endpoint) -> String {
        endpoint.path(&self.app_id)
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> [(&'static str, String); 3] {
        [
            ("Accept", LAYER_MEDIA_TYPE.to_string()),
            ("Authorization", format!("Bearer {}", self.app_token)),
            ("Content-Type", JSON_CONTENT_TYPE.to_string()),
        ]
    }

    /// Gets up to [`PAGE_SIZE`](crate::PAGE_SIZE) conversations of a user,
    /// sorted by last message.
    pub async fn get_conversations_as_user(&self, user_id: &str) -> Result<LayerResponse> {
        self.get(Endpoint::ConversationsAsUser { user_id }).await
    }

    /// Gets the last [`PAGE_SIZE`](crate::PAGE_SIZE) messages of a
    /// conversation, as seen by a user.
    pub async fn get_conversation_messages_as_user(
        &self,
        conversation_id: &str,
        user_id: &str,
    ) -> Result<LayerResponse> {
        self.get(Endpoint::ConversationMessagesAsUser {
            user_id,
            conversation_id,
        })
        .await
    }

    /// Sends a message as a user.
    ///
    /// Only the `parts` of `message` are transmitted; the sender is implied by
    /// the path, and every other field is dropped.
    pub async fn post_message_as_user<M>(
        &self,
        conversation_id: &str,
        message: &M,
        user_id: &str,
    ) -> Result<LayerResponse>
    where
        M: Serialize + Sync + ?Sized,
    {
        let body = parts_only(serde_json::to_value(message)?)?;
        self.post(
            Endpoint::PostMessageAsUser {
                user_id,
                conversation_id,
            },
            &body,
        )
        .await
    }

    /// Creates a conversation on behalf of a user.
    pub async fn post_conversation_as_user<C>(
        &self,
        conversation: &C,
        user_id: &str,
    ) -> Result<LayerResponse>
    where
        C: Serialize + Sync + ?Sized,
    {
        self.post(Endpoint::PostConversationAsUser { user_id }, conversation)
            .await
    }

    pub async fn get_conversation(&self, conversation_id: &str) -> Result<LayerResponse> {
        self.get(Endpoint::Conversation { conversation_id }).await
    }

    /// Gets the last [`PAGE_SIZE`](crate::PAGE_SIZE) messages of a
    /// conversation as the server, not as a user.
    pub async fn get_conversation_messages(&self, conversation_id: &str) -> Result<LayerResponse> {
        self.get(Endpoint::ConversationMessages { conversation_id })
            .await
    }

    /// Creates a conversation as the server. Expects `participants`,
    /// `distinct` and optionally `metadata`.
    pub async fn post_conversation<C>(&self, conversation: &C) -> Result<LayerResponse>
    where
        C: Serialize + Sync + ?Sized,
    {
        self.post(Endpoint::PostConversation, conversation).await
    }

    /// Sends a message as the sender named in its `sender_id`. The payload is
    /// transmitted as given.
    pub async fn post_message<M>(&self, conversation_id: &str, message: &M) -> Result<LayerResponse>
    where
        M: Serialize + Sync + ?Sized,
    {
        self.post(Endpoint::PostMessage { conversation_id }, message)
            .await
    }

    /// Sends an announcement: `recipients`, `sender_id`, `parts` and
    /// `notification`.
    pub async fn post_announcement<A>(&self, announcement: &A) -> Result<LayerResponse>
    where
        A: Serialize + Sync + ?Sized,
    {
        self.post(Endpoint::PostAnnouncement, announcement).await
    }

    async fn get(&self, endpoint: Endpoint<'_>) -> Result<LayerResponse> {
        debug_assert_eq!(endpoint.method(), Method::Get);
        endpoint.check(&self.app_id)?;
        let path = self.endpoint_path(&endpoint);
        debug!("GET {}", path);

        let result = self.http_client.get(&path, &self.headers()).await;
        self.finish(Method::Get, &path, result)
    }

    async fn post<B>(&self, endpoint: Endpoint<'_>, body: &B) -> Result<LayerResponse>
    where
        B: Serialize + Sync + ?Sized,
    {
        debug_assert_eq!(endpoint.method(), Method::Post);
        endpoint.check(&self.app_id)?;
        let path = self.endpoint_path(&endpoint);
        let json_body = serde_json::to_string(body)?;
        debug!("POST {}", path);
        trace!("POST {} body: {}", path, json_body);

        let result = self
            .http_client
            .post_json(&path, &self.headers(), &json_body)
            .await;
        self.finish(Method::Post, &path, result)
    }

    fn finish(
        &self,
        method: Method,
        path: &str,
        result: anyhow::Result<LayerResponse>,
    ) -> Result<LayerResponse> {
        match result {
            Ok(response) => {
                debug!("{} {} -> {}", method, path, response.status());
                Ok(response)
            }
            Err(e) => {
                error!("{} {} failed: {:#}", method, path, e);
                Err(Error::Transport(e))
            }
        }
    }
}

impl<H: HttpClient + fmt::Debug> fmt::Debug for LayerServerClient<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerServerClient")
            .field("http_client", &self.http_client)
            .field("app_id", &self.app_id)
            .field("app_token", &"<redacted>")
            .finish()
    }
}

/// Narrow a message down to `{"parts": ...}`. A missing `parts` is sent as null.
fn parts_only(message: Value) -> Result<Value> {
    let Value::Object(mut message) = message else {
        return Err(Error::InvalidPayload("message must be a JSON object"));
    };
    let parts = message.remove("parts").unwrap_or(Value::Null);

    let mut body = Map::new();
    body.insert("parts".to_string(), parts);
    Ok(Value::Object(body))
}
