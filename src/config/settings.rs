use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::{auth::AdminPolicy, store::SaveMode};

/// Runtime settings, overridable through `SEZAM_*` environment variables.
#[derive(Debug, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the credential file.
    pub users_file: String,
    /// Reject saves based on a stale read (optimistic concurrency).
    pub checked_save: bool,
    /// Keep account CRUD reachable without an authenticated session.
    pub open_admin: bool,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            // Adding default values
            .set_default("users_file", "users.json")?
            .set_default("checked_save", false)?
            .set_default("open_admin", true)?
            // Add enviroment variables with the SEZAM_ prefix
            .add_source(Environment::with_prefix("SEZAM"))
            .build()?;

        cfg.try_deserialize()
    }

    pub fn save_mode(&self) -> SaveMode {
        if self.checked_save {
            SaveMode::Checked
        } else {
            SaveMode::Overwrite
        }
    }

    pub fn admin_policy(&self) -> AdminPolicy {
        if self.open_admin {
            AdminPolicy::Open
        } else {
            AdminPolicy::RequireAuthenticated
        }
    }
}
