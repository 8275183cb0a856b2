use std::{
    collections::HashMap,
    fs, io,
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{
    error::{StoreError, StoreResult},
    store::file::{fingerprint, Fingerprint, FormatVersion, STORE_VERSION},
};

/// Полное содержимое хранилища: имя пользователя -> хеш пароля.
pub type CredentialMap = HashMap<String, String>;

/// Политика записи при конкурирующих сессиях.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Полная перезапись: последний писатель побеждает (поведение исходной
    /// системы, принятая гонка).
    #[default]
    Overwrite,
    /// Перед записью сверяется отпечаток файла, снятый при чтении;
    /// устаревший снимок отклоняется с `ConcurrentModification`.
    Checked,
}

/// Снимок хранилища: набор записей плюс отпечаток файла на момент чтения.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub users: CredentialMap,
    fingerprint: Option<Fingerprint>,
}

/// Файловое хранилище учётных записей. Единственный компонент,
/// который читает и пишет файл; запись всегда заменяет файл целиком.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    save_mode: SaveMode,
}

#[derive(Serialize)]
struct StoreFileRef<'a> {
    version: u8,
    users: &'a CredentialMap,
}

#[derive(Deserialize)]
struct StoreFile {
    version: u8,
    users: CredentialMap,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_save_mode(path, SaveMode::default())
    }

    pub fn with_save_mode(
        path: impl Into<PathBuf>,
        save_mode: SaveMode,
    ) -> Self {
        Self {
            path: path.into(),
            save_mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Читает всё отображение. Отсутствующий файл — валидное пустое
    /// хранилище, а не ошибка.
    pub fn load(&self) -> StoreResult<CredentialMap> {
        Ok(self.snapshot()?.users)
    }

    /// Читает отображение вместе с отпечатком файла для последующей
    /// проверяемой записи (read-modify-write).
    pub fn snapshot(&self) -> StoreResult<StoreSnapshot> {
        match self.read_raw()? {
            None => Ok(StoreSnapshot {
                users: CredentialMap::new(),
                fingerprint: None,
            }),
            Some(bytes) => {
                let users = Self::parse(&bytes)?;
                Ok(StoreSnapshot {
                    users,
                    fingerprint: Some(fingerprint(&bytes)),
                })
            }
        }
    }

    /// Сериализует всё отображение и атомарно заменяет файл
    /// (временный файл + rename). В режиме `Checked` устаревший снимок
    /// отклоняется до какой-либо записи.
    pub fn save(
        &self,
        snapshot: &StoreSnapshot,
    ) -> StoreResult<()> {
        if self.save_mode == SaveMode::Checked {
            let current = self.read_raw()?.map(|bytes| fingerprint(&bytes));
            if current != snapshot.fingerprint {
                return Err(StoreError::ConcurrentModification);
            }
        }

        let bytes = serde_json::to_vec(&StoreFileRef {
            version: STORE_VERSION,
            users: &snapshot.users,
        })?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    fn read_raw(&self) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn parse(bytes: &[u8]) -> StoreResult<CredentialMap> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        if value.get("version").is_some() {
            let file: StoreFile =
                serde_json::from_value(value).map_err(|e| StoreError::Corrupt(e.to_string()))?;
            FormatVersion::try_from(file.version)?;
            Ok(file.users)
        } else {
            // Старый формат: плоский объект username -> hash, без поля версии.
            // Читается как есть и переписывается в новый формат при следующем save.
            serde_json::from_value(value).map_err(|e| StoreError::Corrupt(e.to_string()))
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
