// ============================================================================
// PROFILE VIEWMODEL - Perfil, contraseña, registro, activación y reset
// ============================================================================
// Cada formulario termina en Success(mensaje) o Failed(mensaje); la vista
// solo pinta el texto.
// ============================================================================

use crate::error::ApiError;
use crate::models::{PasswordResetConfirm, ProfileUpdate};
use crate::services::{AuthService, SessionManager};
use crate::state::ReactiveState;
use crate::utils::constants::{
    MIN_PASSWORD_LENGTH, MSG_ACTIVATION_FAILED, MSG_EMAIL_REQUIRED, MSG_PASSWORDS_MISMATCH,
    MSG_PASSWORD_CHANGED, MSG_PASSWORD_TOO_SHORT, MSG_PROFILE_SAVED, MSG_RESET_LINK_INCOMPLETE,
    MSG_RESET_LINK_INVALID,
};
use crate::viewmodels::ui_message;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AccountFlowState {
    #[default]
    Idle,
    Working,
    Success(String),
    Failed(String),
}

#[derive(Clone)]
pub struct ProfileViewModel {
    session: SessionManager,
    auth: AuthService,
    state: ReactiveState<AccountFlowState>,
}

impl ProfileViewModel {
    pub fn new(session: SessionManager, auth: AuthService) -> Self {
        Self {
            session,
            auth,
            state: ReactiveState::default(),
        }
    }

    pub fn state(&self) -> AccountFlowState {
        self.state.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.state.subscribe(callback);
    }

    fn finish(&self, result: Result<String, String>) {
        self.state.set(match result {
            Ok(message) => AccountFlowState::Success(message),
            Err(message) => AccountFlowState::Failed(message),
        });
    }

    pub async fn save_profile(&self, update: ProfileUpdate) {
        self.state.set(AccountFlowState::Working);
        let result = self
            .session
            .update_profile(update)
            .await
            .map(|_| MSG_PROFILE_SAVED.to_string())
            .map_err(|e| ui_message(&e));
        self.finish(result);
    }

    pub async fn change_password(&self, old: &str, new: &str, new2: &str) {
        if new != new2 {
            self.finish(Err(MSG_PASSWORDS_MISMATCH.to_string()));
            return;
        }
        self.state.set(AccountFlowState::Working);
        let result = self
            .session
            .change_password(old, new, new2)
            .await
            .map(|_| MSG_PASSWORD_CHANGED.to_string())
            .map_err(|e| ui_message(&e));
        self.finish(result);
    }

    /// Alta: el mensaje de éxito es el del backend (email de activación enviado)
    pub async fn register(&self, email: &str, password: &str, password2: &str) {
        if password != password2 {
            self.finish(Err(MSG_PASSWORDS_MISMATCH.to_string()));
            return;
        }
        self.state.set(AccountFlowState::Working);
        let result = self
            .session
            .register(email, password, password2)
            .await
            .map_err(|e| ui_message(&e));
        self.finish(result);
    }

    pub async fn activate(&self, uid: &str, token: &str) {
        if uid.is_empty() || token.is_empty() {
            self.finish(Err(MSG_ACTIVATION_FAILED.to_string()));
            return;
        }
        self.state.set(AccountFlowState::Working);
        let result = match self.auth.activate(uid, token).await {
            Ok(message) => Ok(message),
            Err(ApiError::Validation { message, .. }) => Err(message),
            Err(e @ ApiError::Network(_)) => Err(ui_message(&e)),
            Err(e) => {
                log::warn!("❌ [ACCOUNT] Activación fallida: {}", e);
                Err(MSG_ACTIVATION_FAILED.to_string())
            }
        };
        self.finish(result);
    }

    pub async fn request_password_reset(&self, email: &str) {
        let email = email.trim();
        if email.is_empty() {
            self.finish(Err(MSG_EMAIL_REQUIRED.to_string()));
            return;
        }
        self.state.set(AccountFlowState::Working);
        let result = self
            .auth
            .request_password_reset(email)
            .await
            .map_err(|e| ui_message(&e));
        self.finish(result);
    }

    /// Formulario del enlace de reset (`uid` + `token` vienen de la URL)
    pub async fn confirm_password_reset(&self, uid: &str, token: &str, password: &str, password2: &str) {
        let precheck = if uid.is_empty() || token.is_empty() {
            Some(MSG_RESET_LINK_INCOMPLETE)
        } else if password.chars().count() < MIN_PASSWORD_LENGTH {
            Some(MSG_PASSWORD_TOO_SHORT)
        } else if password != password2 {
            Some(MSG_PASSWORDS_MISMATCH)
        } else {
            None
        };
        if let Some(message) = precheck {
            self.finish(Err(message.to_string()));
            return;
        }

        self.state.set(AccountFlowState::Working);
        let request = PasswordResetConfirm {
            uid: uid.to_string(),
            token: token.to_string(),
            new_password: password.to_string(),
            new_password2: password2.to_string(),
        };
        let result = match self.auth.confirm_password_reset(&request).await {
            Ok(message) => Ok(message),
            Err(ApiError::Validation { message, .. }) => Err(message),
            Err(e @ ApiError::Network(_)) => Err(ui_message(&e)),
            Err(_) => Err(MSG_RESET_LINK_INVALID.to_string()),
        };
        self.finish(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use crate::config::SessionConfig;
    use crate::services::{ApiClient, Method};
    use crate::testing::{user_json, Harness, BASE_URL};
    use crate::utils::storage::MemoryStore;

    fn viewmodel(h: &Harness) -> (ProfileViewModel, SessionManager) {
        let api = ApiClient::new(BASE_URL, h.transport.clone());
        let auth = AuthService::new(api);
        let session = SessionManager::new(
            auth.clone(),
            h.scheduler.clone(),
            Rc::new(MemoryStore::new()),
            SessionConfig::default(),
        );
        (ProfileViewModel::new(session.clone(), auth), session)
    }

    #[test]
    fn password_mismatch_is_caught_locally() {
        let mut h = Harness::new();
        let (vm, _) = viewmodel(&h);
        h.block_on(vm.change_password("old", "new-secret-1", "new-secret-2"));
        assert_eq!(vm.state(), AccountFlowState::Failed(MSG_PASSWORDS_MISMATCH.to_string()));
        assert!(h.transport.requests().is_empty());
    }

    #[test]
    fn wrong_old_password_is_shown_verbatim() {
        let mut h = Harness::new();
        let (vm, session) = viewmodel(&h);
        h.transport.respond(Method::Post, "login/", 200, "{}");
        h.transport.respond(Method::Get, "users/me/", 200, user_json());
        h.block_on(session.login("anna@example.com", "secret")).unwrap();
        h.transport.respond(
            Method::Post,
            "users/me/change_password/",
            400,
            r#"{"old_password": "Старый пароль неверен."}"#,
        );

        h.block_on(vm.change_password("bad", "new-secret", "new-secret"));
        assert_eq!(vm.state(), AccountFlowState::Failed("Старый пароль неверен.".to_string()));
    }

    #[test]
    fn reset_form_is_validated_before_sending() {
        let mut h = Harness::new();
        let (vm, _) = viewmodel(&h);

        h.block_on(vm.confirm_password_reset("", "tok", "longenough", "longenough"));
        assert_eq!(vm.state(), AccountFlowState::Failed(MSG_RESET_LINK_INCOMPLETE.to_string()));
        h.block_on(vm.confirm_password_reset("MQ", "tok", "short", "short"));
        assert_eq!(vm.state(), AccountFlowState::Failed(MSG_PASSWORD_TOO_SHORT.to_string()));
        h.block_on(vm.confirm_password_reset("MQ", "tok", "longenough", "longenougg"));
        assert_eq!(vm.state(), AccountFlowState::Failed(MSG_PASSWORDS_MISMATCH.to_string()));
        assert!(h.transport.requests().is_empty());
    }

    #[test]
    fn reset_confirm_success_uses_backend_message() {
        let mut h = Harness::new();
        let (vm, _) = viewmodel(&h);
        h.transport.respond(Method::Post, "reset/", 200, r#"{"message": "Пароль успешно изменён"}"#);

        h.block_on(vm.confirm_password_reset("MQ", "tok", "longenough", "longenough"));
        assert_eq!(vm.state(), AccountFlowState::Success("Пароль успешно изменён".to_string()));
    }

    #[test]
    fn expired_activation_link() {
        let mut h = Harness::new();
        let (vm, _) = viewmodel(&h);
        h.transport.respond(Method::Get, "activate/MQ/old/", 400, r#"{"detail": "Ссылка активации недействительна"}"#);
        h.transport.respond(Method::Get, "activate/MQ/gone/", 404, "");

        h.block_on(vm.activate("MQ", "old"));
        assert_eq!(vm.state(), AccountFlowState::Failed("Ссылка активации недействительна".to_string()));
        h.block_on(vm.activate("MQ", "gone"));
        assert_eq!(vm.state(), AccountFlowState::Failed(MSG_ACTIVATION_FAILED.to_string()));
    }

    #[test]
    fn registration_errors_are_aggregated() {
        let mut h = Harness::new();
        let (vm, session) = viewmodel(&h);
        h.transport.respond(
            Method::Post,
            "users/",
            400,
            r#"{"email": ["Пользователь с таким email уже существует."], "password": ["Слишком простой пароль."]}"#,
        );

        h.block_on(vm.register("anna@example.com", "12345678", "12345678"));
        assert_eq!(
            vm.state(),
            AccountFlowState::Failed(
                "Пользователь с таким email уже существует.\nСлишком простой пароль.".to_string()
            )
        );
        assert!(!session.is_authenticated());
    }
}
