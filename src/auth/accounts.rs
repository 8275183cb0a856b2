use std::sync::Mutex;

use tracing::info;

use super::{
    errors::AdminError,
    password::{hash_password, verify_password},
    session::SessionState,
};
use crate::store::CredentialStore;

/// Кто вправе изменять учётные записи.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminPolicy {
    /// Поведение исходной системы: CRUD доступен независимо от сессии
    /// действующего лица.
    #[default]
    Open,
    /// Ужесточённый режим: каждая операция требует аутентифицированной
    /// сессии, иначе `PermissionDenied`.
    RequireAuthenticated,
}

/// CRUD над хранилищем учётных записей. Каждая операция — это
/// read-modify-write целиком: snapshot, изменение, save; запись
/// происходит только на успешном пути, поэтому неудачная попытка не
/// оставляет следов и повтор с исправленным вводом проходит чисто.
///
/// Все изменения в рамках процесса сериализуются через один мьютекс —
/// единственная точка записи (межпроцессные гонки покрываются отдельно
/// режимом `SaveMode::Checked` самого хранилища).
#[derive(Debug)]
pub struct AccountManager {
    store: CredentialStore,
    policy: AdminPolicy,
    write_gate: Mutex<()>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl AccountManager {
    pub fn new(store: CredentialStore) -> Self {
        Self::with_policy(store, AdminPolicy::default())
    }

    pub fn with_policy(
        store: CredentialStore,
        policy: AdminPolicy,
    ) -> Self {
        Self {
            store,
            policy,
            write_gate: Mutex::new(()),
        }
    }

    /// Создаёт учётную запись с хешем свежего пароля.
    pub fn create(
        &self,
        actor: &SessionState,
        username: &str,
        password: &str,
    ) -> Result<(), AdminError> {
        self.authorize(actor)?;
        let _gate = self.write_gate.lock().unwrap();

        let mut snap = self.store.snapshot()?;
        if snap.users.contains_key(username) {
            return Err(AdminError::DuplicateUser);
        }
        if username.is_empty() || password.is_empty() {
            return Err(AdminError::InvalidInput(
                "username and password must not be empty".into(),
            ));
        }

        let hash = hash_password(password)?;
        snap.users.insert(username.to_string(), hash);
        self.store.save(&snap)?;

        info!(username, "account created");
        Ok(())
    }

    /// Меняет пароль, требуя подтверждения текущим паролем.
    pub fn change_password(
        &self,
        actor: &SessionState,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AdminError> {
        self.authorize(actor)?;
        let _gate = self.write_gate.lock().unwrap();

        let mut snap = self.store.snapshot()?;
        let stored = snap
            .users
            .get(username)
            .ok_or(AdminError::UserNotFound)?;
        if !verify_password(stored, old_password) {
            return Err(AdminError::InvalidCredential);
        }
        if new_password.is_empty() {
            return Err(AdminError::InvalidInput(
                "new password must not be empty".into(),
            ));
        }

        let hash = hash_password(new_password)?;
        snap.users.insert(username.to_string(), hash);
        self.store.save(&snap)?;

        info!(username, "password changed");
        Ok(())
    }

    /// Административная перезапись пароля без знания старого.
    pub fn reset_password(
        &self,
        actor: &SessionState,
        username: &str,
        new_password: &str,
    ) -> Result<(), AdminError> {
        self.authorize(actor)?;
        let _gate = self.write_gate.lock().unwrap();

        let mut snap = self.store.snapshot()?;
        if !snap.users.contains_key(username) {
            return Err(AdminError::UserNotFound);
        }
        if new_password.is_empty() {
            return Err(AdminError::InvalidInput(
                "new password must not be empty".into(),
            ));
        }

        let hash = hash_password(new_password)?;
        snap.users.insert(username.to_string(), hash);
        self.store.save(&snap)?;

        info!(username, "password reset");
        Ok(())
    }

    /// Удаляет учётную запись.
    pub fn delete(
        &self,
        actor: &SessionState,
        username: &str,
    ) -> Result<(), AdminError> {
        self.authorize(actor)?;
        let _gate = self.write_gate.lock().unwrap();

        let mut snap = self.store.snapshot()?;
        if snap.users.remove(username).is_none() {
            return Err(AdminError::UserNotFound);
        }
        self.store.save(&snap)?;

        info!(username, "account deleted");
        Ok(())
    }

    /// Имена всех учётных записей, отсортированные. Хеши наружу не выходят.
    pub fn usernames(
        &self,
        actor: &SessionState,
    ) -> Result<Vec<String>, AdminError> {
        self.authorize(actor)?;
        let users = self.store.load()?;
        let mut names: Vec<String> = users.into_keys().collect();
        names.sort();
        Ok(names)
    }

    fn authorize(
        &self,
        actor: &SessionState,
    ) -> Result<(), AdminError> {
        if self.policy == AdminPolicy::RequireAuthenticated && !actor.is_authenticated() {
            return Err(AdminError::PermissionDenied);
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
