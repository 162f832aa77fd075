// ============================================================================
// SESSION STATE - Máquina de estados de la sesión (pura, sin red)
// ============================================================================
// Anonymous --LoginStarted--> Authenticating --IdentityLoaded--> Authenticated
// Authenticated --RefreshStarted--> Refreshing --RefreshSucceeded--> Authenticated
// cualquier estado --LoggedOut--> Anonymous
// ============================================================================

use crate::models::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    Refreshing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoginStarted,
    LoginFailed(String),
    IdentityLoaded(UserProfile),
    RefreshStarted,
    RefreshSucceeded,
    RefreshFailed,
    LoggedOut,
}

/// Estado de sesión visto por la UI
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub user: Option<UserProfile>,
    pub phase: SessionPhase,
    pub last_error: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, SessionPhase::Authenticating | SessionPhase::Refreshing)
    }

    /// Fase estable según haya o no usuario
    fn settled(&self) -> SessionPhase {
        if self.user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }
}

/// Transición pura: devuelve el nuevo estado sin efectos secundarios
pub fn transition(session: &Session, event: SessionEvent) -> Session {
    let mut next = session.clone();
    match event {
        SessionEvent::LoginStarted => {
            next.phase = SessionPhase::Authenticating;
            next.last_error = None;
        }
        SessionEvent::LoginFailed(message) => {
            // el usuario previo (si lo había) se conserva
            next.phase = next.settled();
            next.last_error = Some(message);
        }
        SessionEvent::IdentityLoaded(user) => {
            next.user = Some(user);
            next.phase = SessionPhase::Authenticated;
            next.last_error = None;
        }
        SessionEvent::RefreshStarted => {
            if session.phase != SessionPhase::Authenticating {
                next.phase = SessionPhase::Refreshing;
            }
        }
        SessionEvent::RefreshSucceeded | SessionEvent::RefreshFailed => {
            if session.phase == SessionPhase::Refreshing {
                next.phase = next.settled();
            }
        }
        SessionEvent::LoggedOut => {
            next = Session::default();
        }
    }
    next
}
