// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// Construye URLs sobre el origen configurado y normaliza errores a ApiError.
// NO tiene lógica de negocio.
// ============================================================================

use std::rc::Rc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use crate::error::ApiError;
use crate::services::transport::{ApiRequest, ApiResponse, HttpTransport, Method};

#[derive(Clone)]
pub struct ApiClient {
    api_root: String,
    transport: Rc<dyn HttpTransport>,
}

impl ApiClient {
    /// `base_url` es el origen del backend, sin `/api`
    pub fn new(base_url: &str, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            api_root: format!("{}/api", base_url.trim_end_matches('/')),
            transport,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(Method::Get, path, None).await?;
        decode(&response)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self.execute(Method::Post, path, Some(encode(body)?)).await?;
        decode(&response)
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self.execute(Method::Patch, path, Some(encode(body)?)).await?;
        decode(&response)
    }

    /// POST cuyo cuerpo de respuesta no interesa (204, `{"detail": ...}`)
    pub async fn post_no_content<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(Method::Post, path, Some(encode(body)?)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::Delete, path, None).await?;
        Ok(())
    }

    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest {
            method,
            url: self.url(path),
            body,
        };
        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("❌ [API] {} {} -> {}", method.as_str(), path, e);
            ApiError::Network(e)
        })?;

        if response.ok() {
            Ok(response)
        } else {
            let error = ApiError::from_response(response.status, &response.body);
            if response.status >= 500 {
                log::error!("❌ [API] {} {} -> HTTP {}", method.as_str(), path, response.status);
            } else {
                log::debug!("⚠️ [API] {} {} -> HTTP {}", method.as_str(), path, response.status);
            }
            Err(error)
        }
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))
}

/// 204 / cuerpo vacío se decodifica como `null` (sirve para `()` y `Option<T>`)
fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ApiError> {
    let body = if response.status == 204 || response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}
