use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::{api::types::*, config};

/// A response as seen by interceptors: status plus the JSON body, if any.
#[derive(Debug, Clone, Copy)]
pub struct InterceptedResponse<'a> {
    pub status: StatusCode,
    pub body: Option<&'a Value>,
}

impl InterceptedResponse<'_> {
    pub fn should_logout(&self) -> bool {
        self.body.map(should_logout_marker).unwrap_or(false)
    }

    pub fn message(&self) -> Option<&str> {
        self.body
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
    }
}

/// Runs for every response that reaches the client, success or failure.
pub trait ResponseInterceptor {
    fn on_response(&self, response: &InterceptedResponse<'_>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterceptorId(usize);

#[derive(Default)]
struct InterceptorChain {
    next_id: Cell<usize>,
    entries: RefCell<Vec<(InterceptorId, Rc<dyn ResponseInterceptor>)>>,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    interceptors: Rc<InterceptorChain>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            interceptors: Rc::new(InterceptorChain::default()),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            interceptors: Rc::new(InterceptorChain::default()),
        }
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    /// Registers an interceptor shared by every clone of this client.
    pub fn add_interceptor(&self, interceptor: Rc<dyn ResponseInterceptor>) -> InterceptorId {
        let id = InterceptorId(self.interceptors.next_id.get());
        self.interceptors.next_id.set(id.0 + 1);
        self.interceptors
            .entries
            .borrow_mut()
            .push((id, interceptor));
        id
    }

    pub fn remove_interceptor(&self, id: InterceptorId) {
        self.interceptors
            .entries
            .borrow_mut()
            .retain(|(entry_id, _)| *entry_id != id);
    }

    fn run_interceptors(&self, response: &InterceptedResponse<'_>) {
        // Snapshot first: an interceptor may register or remove others.
        let entries: Vec<_> = self
            .interceptors
            .entries
            .borrow()
            .iter()
            .map(|(_, interceptor)| interceptor.clone())
            .collect();
        for interceptor in entries {
            interceptor.on_response(response);
        }
    }

    pub(crate) async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let base_url = self.resolved_base_url().await;
        let builder = self
            .client
            .request(method, format!("{}{}", base_url, path));
        with_credentials(builder)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).await;
        self.send(builder).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).await.json(body);
        self.send(builder).await
    }

    /// Single exit point for every request: reads the body once, lets the
    /// interceptors observe it, then decodes success or error payloads.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::request_failed(format!("Failed to read response: {}", e)))?;
        let body: Option<Value> = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        self.run_interceptors(&InterceptedResponse {
            status,
            body: body.as_ref(),
        });

        if status.is_success() {
            serde_json::from_value(body.unwrap_or(Value::Null))
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            log::debug!("API error response: {}", status);
            Err(ApiError::from_response(status, body.as_ref()))
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder
}
