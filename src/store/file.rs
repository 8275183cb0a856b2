use sha2::{Digest, Sha256};

use crate::error::StoreError;

/// Поддерживаемые версии формата файла учётных записей.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    V1 = 1,
    // В будущем: V2 = 2, V3 = 3 и т.д.
}

impl TryFrom<u8> for FormatVersion {
    type Error = StoreError;

    fn try_from(value: u8) -> Result<Self, StoreError> {
        match value {
            1 => Ok(FormatVersion::V1),
            other => Err(StoreError::UnsupportedVersion(other)),
        }
    }
}

/// Текущая версия формата, как число (для записи в файл).
pub const STORE_VERSION: u8 = FormatVersion::V1 as u8;

/// Отпечаток содержимого файла (SHA-256).
pub type Fingerprint = [u8; 32];

/// Считает отпечаток сырых байтов файла.
pub fn fingerprint(bytes: &[u8]) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_version_roundtrip() {
        assert_eq!(FormatVersion::try_from(1).unwrap(), FormatVersion::V1);
        assert_eq!(STORE_VERSION, 1);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let err = FormatVersion::try_from(9).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedVersion(9)));
    }

    #[test]
    fn test_fingerprint_is_content_addressed() {
        let a = fingerprint(b"{}");
        let b = fingerprint(b"{}");
        let c = fingerprint(b"{ }");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
