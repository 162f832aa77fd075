// ============================================================================
// API ERROR - Forma única de error para todas las llamadas al backend
// ============================================================================
// 401 -> Unauthorized (se recupera con un refresh + reintento)
// 400 -> Validation (se muestra tal cual, sin reintento)
// 404 -> NotFound (estado vacío en la UI, no banner de error)
// red -> Network (mensaje genérico, sin reintento)
// ============================================================================

use serde_json::Value;
use thiserror::Error;

/// Error normalizado de una llamada al backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<(String, Vec<String>)>,
    },

    #[error("Not found")]
    NotFound,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Construye el error de una respuesta no-2xx a partir del status y el cuerpo
    pub fn from_response(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            400 => {
                let parsed = serde_json::from_str::<Value>(body).ok();
                let fields = parsed.as_ref().map(field_messages).unwrap_or_default();
                let message = parsed
                    .as_ref()
                    .and_then(detail_message)
                    .or_else(|| join_field_messages(&fields))
                    .unwrap_or_else(|| fallback_text(status, body));
                ApiError::Validation { message, fields }
            }
            _ => {
                let message = serde_json::from_str::<Value>(body)
                    .ok()
                    .as_ref()
                    .and_then(detail_message)
                    .unwrap_or_else(|| fallback_text(status, body));
                ApiError::Http { status, message }
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// Texto legible para la UI
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Claves `detail`, `message` o `error`, o un string JSON suelto
fn detail_message(value: &Value) -> Option<String> {
    if let Value::String(s) = value {
        return Some(s.clone());
    }
    ["detail", "message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(as_messages))
        .map(|msgs| msgs.join("\n"))
}

fn field_messages(value: &Value) -> Vec<(String, Vec<String>)> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "detail" | "message" | "error" | "code"))
            .filter_map(|(key, v)| as_messages(v).map(|msgs| (key.clone(), msgs)))
            .collect(),
        Value::Array(_) => as_messages(value)
            .map(|msgs| vec![("non_field_errors".to_string(), msgs)])
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn as_messages(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Array(items) => {
            let msgs: Vec<String> = items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs)
            }
        }
        _ => None,
    }
}

fn join_field_messages(fields: &[(String, Vec<String>)]) -> Option<String> {
    let all: Vec<&str> = fields
        .iter()
        .flat_map(|(_, msgs)| msgs.iter().map(String::as_str))
        .collect();
    if all.is_empty() {
        None
    } else {
        Some(all.join("\n"))
    }
}

fn fallback_text(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        format!("Status {}", status)
    } else {
        trimmed.to_string()
    }
}
