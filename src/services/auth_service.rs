// ============================================================================
// AUTH SERVICE - Endpoints de cuenta (cookies JWT HttpOnly gestionadas por el backend)
// ============================================================================

use serde::Deserialize;
use serde_json::json;
use crate::error::ApiError;
use crate::models::{
    ChangePasswordRequest, LoginRequest, PasswordResetConfirm, ProfileUpdate, RegisterRequest,
    UserProfile,
};
use crate::services::api_client::ApiClient;

/// Respuestas informativas del backend (`detail` / `message`)
#[derive(Debug, Clone, Deserialize, Default)]
struct InfoMessage {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl InfoMessage {
    fn text(self) -> String {
        self.detail.or(self.message).unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.api.get("users/me/").await
    }

    /// El backend deja `access_token` y `refresh_token` en cookies
    pub async fn login(&self, credentials: &LoginRequest) -> Result<(), ApiError> {
        self.api.post_no_content("login/", credentials).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.api.post_no_content("logout/", &json!({})).await
    }

    /// El refresh token viaja en la cookie, el cuerpo va vacío
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.api.post_no_content("token/refresh/", &json!({})).await
    }

    /// Devuelve el mensaje del backend ("Пользователь создан. Подтвердите email.")
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, ApiError> {
        let info: Option<InfoMessage> = self.api.post("users/", request).await?;
        Ok(info.unwrap_or_default().text())
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.api.patch("users/me/", update).await
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
        self.api.post_no_content("users/me/change_password/", request).await
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<String, ApiError> {
        let info: Option<InfoMessage> = self.api.post("reset/request/", &json!({ "email": email })).await?;
        Ok(info.unwrap_or_default().text())
    }

    pub async fn confirm_password_reset(&self, request: &PasswordResetConfirm) -> Result<String, ApiError> {
        let info: Option<InfoMessage> = self.api.post("reset/", request).await?;
        Ok(info.unwrap_or_default().text())
    }

    /// Enlace del email de activación: `/activate/{uid}/{token}/`
    pub async fn activate(&self, uid: &str, token: &str) -> Result<String, ApiError> {
        let path = format!(
            "activate/{}/{}/",
            urlencoding::encode(uid),
            urlencoding::encode(token)
        );
        let info: Option<InfoMessage> = self.api.get(&path).await?;
        Ok(info.unwrap_or_default().text())
    }
}
