// ============================================================================
// TRANSPORT - Única costura HTTP (gloo-net en el navegador, mock en tests)
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Envía una petición con cookies (`credentials: include`) y cuerpo JSON.
/// `Err` solo para fallos de transporte; cualquier status HTTP es `Ok`.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, String>;
}

#[cfg(target_arch = "wasm32")]
pub use web::WebTransport;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{ApiRequest, ApiResponse, HttpTransport, Method};
    use async_trait::async_trait;
    use futures::future::{select, Either};
    use gloo_net::http::Request;
    use gloo_timers::future::TimeoutFuture;
    use web_sys::RequestCredentials;

    pub struct WebTransport {
        timeout_ms: u32,
    }

    impl WebTransport {
        pub fn new(timeout_seconds: u32) -> Self {
            Self {
                timeout_ms: timeout_seconds.saturating_mul(1000),
            }
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for WebTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, String> {
            let builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Patch => Request::patch(&request.url),
                Method::Delete => Request::delete(&request.url),
            }
            .credentials(RequestCredentials::Include)
            .header("Accept", "application/json");

            let call = async move {
                let response = match request.body {
                    Some(body) => builder
                        .json(&body)
                        .map_err(|e| format!("Serialization error: {}", e))?
                        .send()
                        .await,
                    None => builder.send().await,
                }
                .map_err(|e| format!("Network error: {}", e))?;

                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                Ok::<ApiResponse, String>(ApiResponse { status, body })
            };

            match select(Box::pin(call), Box::pin(TimeoutFuture::new(self.timeout_ms))).await {
                Either::Left((result, _)) => result,
                Either::Right(_) => Err(format!("Timeout after {} ms", self.timeout_ms)),
            }
        }
    }
}
