// ============================================================================
// SESSION SERVICE - Usuario actual, login/logout y refresh silencioso
// ============================================================================
// - refresh(): como mucho uno en vuelo; los llamadores concurrentes esperan
//   el mismo resultado (future compartido)
// - timer de refresh cada 14 min mientras hay sesión; se aborta en logout
// - authorized(): ante un 401 hace un refresh y un único reintento
// ============================================================================

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::{Rc, Weak};

use futures::future::{abortable, AbortHandle, FutureExt, LocalBoxFuture, Shared};

use crate::config::SessionConfig;
use crate::error::ApiError;
use crate::models::{ChangePasswordRequest, LoginRequest, ProfileUpdate, RegisterRequest, UserProfile};
use crate::services::auth_service::AuthService;
use crate::services::scheduler::Scheduler;
use crate::state::{transition, ReactiveState, Session, SessionEvent};
use crate::utils::constants::{MSG_INVALID_CREDENTIALS, STORAGE_KEY_USER};
use crate::utils::storage::{load_from_storage, save_to_storage, KeyValueStore};

type SharedRefresh = Shared<LocalBoxFuture<'static, bool>>;

/// Resultado de preguntar al backend quién es el usuario actual
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Authenticated(UserProfile),
    Unauthenticated,
}

struct Inner {
    auth: AuthService,
    scheduler: Rc<dyn Scheduler>,
    store: Rc<dyn KeyValueStore>,
    config: SessionConfig,
    state: ReactiveState<Session>,
    in_flight: RefCell<Option<SharedRefresh>>,
    refresh_timer: RefCell<Option<AbortHandle>>,
    /// El timer está esperando un refresh (propio o compartido)
    timer_refreshing: Cell<bool>,
}

/// Dueño único de la sesión. Los clones comparten estado.
#[derive(Clone)]
pub struct SessionManager {
    inner: Rc<Inner>,
}

impl SessionManager {
    pub fn new(
        auth: AuthService,
        scheduler: Rc<dyn Scheduler>,
        store: Rc<dyn KeyValueStore>,
        config: SessionConfig,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                auth,
                scheduler,
                store,
                config,
                state: ReactiveState::default(),
                in_flight: RefCell::new(None),
                refresh_timer: RefCell::new(None),
                timer_refreshing: Cell::new(false),
            }),
        }
    }

    pub fn session(&self) -> Session {
        self.inner.state.get()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.inner.state.with(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.with(Session::is_authenticated)
    }

    /// Notifica cada cambio de sesión (login, logout, refresh, perfil)
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.inner.state.subscribe(callback);
    }

    /// Arranque: perfil cacheado para el primer render, luego verificación
    pub async fn restore(&self) -> Result<SessionOutcome, ApiError> {
        if let Some(user) = load_from_storage::<UserProfile>(&*self.inner.store, STORAGE_KEY_USER) {
            log::info!("📦 [SESSION] Perfil cacheado: {}", user.email);
            self.apply(SessionEvent::IdentityLoaded(user));
        }
        self.fetch_current_user().await
    }

    /// GET `users/me/`. Un 401 persistente limpia la sesión y no es un error.
    pub async fn fetch_current_user(&self) -> Result<SessionOutcome, ApiError> {
        let auth = &self.inner.auth;
        match self.authorized(move || auth.current_user()).await {
            Ok(user) => {
                self.set_identity(user.clone());
                Ok(SessionOutcome::Authenticated(user))
            }
            Err(ApiError::Unauthorized) => Ok(SessionOutcome::Unauthenticated),
            Err(e) => {
                log::warn!("⚠️ [SESSION] No se pudo verificar la sesión: {}", e);
                Err(e)
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        log::info!("🔐 [SESSION] Login de {}", email);
        self.apply(SessionEvent::LoginStarted);

        let credentials = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let result = match self.inner.auth.login(&credentials).await {
            Ok(()) => self.inner.auth.current_user().await,
            // SimpleJWT responde 401 a credenciales incorrectas
            Err(ApiError::Unauthorized) => Err(ApiError::Validation {
                message: MSG_INVALID_CREDENTIALS.to_string(),
                fields: Vec::new(),
            }),
            Err(e) => Err(e),
        };

        match result {
            Ok(user) => {
                log::info!("✅ [SESSION] Sesión iniciada: {}", user.email);
                self.set_identity(user.clone());
                Ok(user)
            }
            Err(e) => {
                log::warn!("❌ [SESSION] Login fallido: {}", e);
                self.apply(SessionEvent::LoginFailed(e.message()));
                Err(e)
            }
        }
    }

    /// Alta de cuenta: el backend envía el email de activación, la sesión no cambia
    pub async fn register(&self, email: &str, password: &str, password2: &str) -> Result<String, ApiError> {
        let request = RegisterRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            password2: password2.to_string(),
        };
        let message = self.inner.auth.register(&request).await?;
        log::info!("✅ [SESSION] Cuenta creada: {}", request.email);
        Ok(message)
    }

    /// Siempre termina sin sesión, falle o no la red
    pub async fn logout(&self) {
        self.cancel_refresh_timer();
        if let Err(e) = self.inner.auth.logout().await {
            log::warn!("⚠️ [SESSION] Logout en backend falló: {}", e);
        }
        self.clear_local();
        log::info!("👋 [SESSION] Sesión cerrada");
    }

    /// Extiende la sesión. Nunca falla: `false` si el backend la rechazó.
    pub async fn refresh(&self) -> bool {
        let pending = {
            let mut slot = self.inner.in_flight.borrow_mut();
            match slot.clone() {
                Some(shared) => {
                    log::debug!("🔄 [SESSION] Refresh ya en curso, esperando");
                    shared
                }
                None => {
                    let manager = self.clone();
                    let shared = async move {
                        let ok = manager.refresh_once().await;
                        manager.inner.in_flight.borrow_mut().take();
                        ok
                    }
                    .boxed_local()
                    .shared();
                    *slot = Some(shared.clone());
                    shared
                }
            }
        };
        pending.await
    }

    async fn refresh_once(&self) -> bool {
        self.apply(SessionEvent::RefreshStarted);
        match self.inner.auth.refresh().await {
            Ok(()) => {
                log::info!("🔄 [SESSION] Token renovado");
                self.apply(SessionEvent::RefreshSucceeded);
                true
            }
            Err(e) => {
                log::warn!("❌ [SESSION] Refresh rechazado: {}", e);
                self.apply(SessionEvent::RefreshFailed);
                false
            }
        }
    }

    /// Ejecuta una llamada autenticada. Ante 401: un refresh y un reintento;
    /// si sigue sin autorización la sesión se limpia.
    pub async fn authorized<T, F, Fut>(&self, call: F) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match call().await {
            Err(ApiError::Unauthorized) => {}
            other => return other,
        }

        if !self.refresh().await {
            if self.inner.timer_refreshing.get() {
                // el timer comparte este refresh fallido y hará el logout completo
                self.forget_identity();
            } else {
                self.clear_local();
            }
            return Err(ApiError::Unauthorized);
        }

        let retried = call().await;
        if matches!(retried, Err(ApiError::Unauthorized)) {
            log::warn!("⚠️ [SESSION] 401 tras refresh, sesión descartada");
            self.clear_local();
        }
        retried
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile, ApiError> {
        if update.is_empty() {
            return self.current_user().ok_or(ApiError::Unauthorized);
        }
        let (auth, update) = (&self.inner.auth, &update);
        let user = self.authorized(move || auth.update_profile(update)).await?;
        log::info!("✅ [SESSION] Perfil actualizado");
        self.set_identity(user.clone());
        Ok(user)
    }

    pub async fn change_password(&self, old: &str, new: &str, new2: &str) -> Result<(), ApiError> {
        let request = ChangePasswordRequest {
            password: old.to_string(),
            new_password: new.to_string(),
            new_password2: new2.to_string(),
        };
        let (auth, request) = (&self.inner.auth, &request);
        self.authorized(move || auth.change_password(request)).await?;
        log::info!("✅ [SESSION] Contraseña cambiada");
        Ok(())
    }

    fn apply(&self, event: SessionEvent) {
        self.inner.state.update(|session| *session = transition(session, event));
    }

    fn set_identity(&self, user: UserProfile) {
        if let Err(e) = save_to_storage(&*self.inner.store, STORAGE_KEY_USER, &user) {
            log::warn!("⚠️ [SESSION] No se pudo cachear el perfil: {}", e);
        }
        self.apply(SessionEvent::IdentityLoaded(user));
        self.ensure_refresh_timer();
    }

    fn clear_local(&self) {
        self.cancel_refresh_timer();
        self.forget_identity();
    }

    /// Borra perfil cacheado y sesión sin tocar el timer
    fn forget_identity(&self) {
        if let Err(e) = self.inner.store.remove_item(STORAGE_KEY_USER) {
            log::warn!("⚠️ [SESSION] No se pudo borrar el perfil cacheado: {}", e);
        }
        self.apply(SessionEvent::LoggedOut);
    }

    fn ensure_refresh_timer(&self) {
        if self.inner.refresh_timer.borrow().is_some() {
            return;
        }
        let interval_ms = self.inner.config.refresh_interval_ms();
        let (task, handle) = abortable(refresh_loop(Rc::downgrade(&self.inner), interval_ms));
        *self.inner.refresh_timer.borrow_mut() = Some(handle);
        self.inner.scheduler.spawn(task.map(|_| ()).boxed_local());
        log::debug!("⏱️ [SESSION] Timer de refresh cada {} ms", interval_ms);
    }

    fn cancel_refresh_timer(&self) {
        if let Some(handle) = self.inner.refresh_timer.borrow_mut().take() {
            handle.abort();
        }
    }
}

/// Bucle del timer. Solo guarda un `Weak` para no mantener viva la sesión.
async fn refresh_loop(inner: Weak<Inner>, interval_ms: u32) {
    loop {
        let sleep = match inner.upgrade() {
            Some(inner) => inner.scheduler.sleep(interval_ms),
            None => return,
        };
        sleep.await;

        let manager = match inner.upgrade() {
            Some(inner) => SessionManager { inner },
            None => return,
        };
        manager.inner.timer_refreshing.set(true);
        let refreshed = manager.refresh().await;
        manager.inner.timer_refreshing.set(false);
        if !refreshed {
            // se suelta el handle antes del logout para no abortar esta tarea
            manager.inner.refresh_timer.borrow_mut().take();
            manager.logout().await;
            return;
        }
    }
}
