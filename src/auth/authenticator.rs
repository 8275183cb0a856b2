use tracing::{info, warn};

use super::{
    errors::AuthError,
    password::verify_password,
    session::SessionState,
};
use crate::store::CredentialStore;

/// Проверяет попытку входа по хранилищу и переводит сессию между
/// состояниями `Anonymous` и `Authenticated`. Хранилище только читает,
/// никогда не изменяет.
#[derive(Debug, Clone)]
pub struct Authenticator {
    store: CredentialStore,
}

impl Authenticator {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    /// Вход: ищет пользователя и сверяет пароль. Неизвестный пользователь
    /// и неверный пароль дают один и тот же `AuthenticationFailed`, чтобы
    /// не позволять перечислять имена. При ошибке сессия остаётся
    /// нетронутой; повреждение хранилища всплывает отдельно как
    /// `AuthError::Store`.
    pub fn login(
        &self,
        session: &mut SessionState,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let users = self.store.load()?;

        let verified = users
            .get(username)
            .map(|hash| verify_password(hash, password))
            .unwrap_or(false);

        if !verified {
            warn!(username, "rejected login attempt");
            return Err(AuthError::AuthenticationFailed);
        }

        *session = SessionState::Authenticated {
            username: username.to_string(),
        };
        info!(username, "login successful");
        Ok(())
    }

    /// Выход: возвращает сессию в `Anonymous`. Повторный вызов из
    /// `Anonymous` — no-op, не ошибка.
    pub fn logout(
        &self,
        session: &mut SessionState,
    ) {
        if let SessionState::Authenticated { username } = session {
            info!(username = %username, "logout");
        }
        *session = SessionState::Anonymous;
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::auth::password::hash_password;

    fn seeded_store(dir: &tempfile::TempDir) -> CredentialStore {
        let store = CredentialStore::new(dir.path().join("users.json"));
        let mut snap = store.snapshot().unwrap();
        snap.users
            .insert("anton".into(), hash_password("secret").unwrap());
        store.save(&snap).unwrap();
        store
    }

    #[test]
    fn test_login_success_transitions_session() {
        let dir = tempdir().unwrap();
        let auth = Authenticator::new(seeded_store(&dir));

        let mut session = SessionState::default();
        auth.login(&mut session, "anton", "secret").unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.username(), Some("anton"));
    }

    #[test]
    fn test_unknown_user_and_wrong_password_look_the_same() {
        let dir = tempdir().unwrap();
        let auth = Authenticator::new(seeded_store(&dir));

        let mut session = SessionState::default();
        let unknown = auth.login(&mut session, "nobody", "secret").unwrap_err();
        let wrong = auth.login(&mut session, "anton", "WRONG").unwrap_err();

        assert!(matches!(unknown, AuthError::AuthenticationFailed));
        assert!(matches!(wrong, AuthError::AuthenticationFailed));
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_failed_login_leaves_session_untouched() {
        let dir = tempdir().unwrap();
        let auth = Authenticator::new(seeded_store(&dir));

        let mut session = SessionState::Authenticated {
            username: "anton".into(),
        };
        let err = auth.login(&mut session, "anton", "WRONG").unwrap_err();
        assert!(matches!(err, AuthError::AuthenticationFailed));
        assert_eq!(session.username(), Some("anton"));
    }

    #[test]
    fn test_logout_is_idempotent() {
        let dir = tempdir().unwrap();
        let auth = Authenticator::new(seeded_store(&dir));

        let mut session = SessionState::Authenticated {
            username: "anton".into(),
        };
        auth.logout(&mut session);
        assert_eq!(session, SessionState::Anonymous);

        // Повторный logout из Anonymous — no-op.
        auth.logout(&mut session);
        auth.logout(&mut session);
        assert_eq!(session, SessionState::Anonymous);
    }

    #[test]
    fn test_corrupt_store_surfaces_distinctly_and_keeps_session() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("users.json"));
        std::fs::write(store.path(), b"{broken").unwrap();
        let auth = Authenticator::new(store);

        let mut session = SessionState::default();
        let err = auth.login(&mut session, "anton", "secret").unwrap_err();

        assert!(matches!(err, AuthError::Store(_)));
        assert_eq!(session, SessionState::Anonymous);
    }

    #[test]
    fn test_malformed_hash_blocks_only_that_user() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("users.json"));
        let mut snap = store.snapshot().unwrap();
        snap.users.insert("broken".into(), "not-a-phc-hash".into());
        snap.users
            .insert("anton".into(), hash_password("secret").unwrap());
        store.save(&snap).unwrap();
        let auth = Authenticator::new(store);

        let mut session = SessionState::default();
        assert!(matches!(
            auth.login(&mut session, "broken", "whatever").unwrap_err(),
            AuthError::AuthenticationFailed
        ));
        auth.login(&mut session, "anton", "secret").unwrap();
        assert!(session.is_authenticated());
    }
}
