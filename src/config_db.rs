use std::path::{Path, PathBuf};

use redb::{Database, ReadableDatabase, TableDefinition};

use crate::{
    config::{Configuration, SettingKey},
    error::Result,
};

const SETTINGS: TableDefinition<&str, &str> = TableDefinition::new("settings");

pub struct ConfigDb {
    db: Database,
}

impl ConfigDb {
    pub fn open(path: &Path) -> Result<Self> {
        let db = Database::create(path)?;

        // Ensure the table exists by opening it in a write transaction.
        let txn = db.begin_write()?;
        txn.open_table(SETTINGS)?;
        txn.commit()?;

        Ok(Self { db })
    }

    // -- Settings --

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SETTINGS)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(SETTINGS)?;
        Ok(table.get(key)?.map(|v| v.value().to_string()))
    }

    /// Remove every stored setting in a single transaction.
    pub fn clear_settings(&self) -> Result<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SETTINGS)?;
            for key in SettingKey::ALL {
                table.remove(key.as_str())?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    // -- Configuration --

    /// Validate and persist a single setting.
    pub fn update(&self, key: SettingKey, value: &str) -> Result<()> {
        key.validate(value)?;
        self.set_setting(key.as_str(), value)
    }

    /// Load the configuration, with stored values layered over defaults.
    ///
    /// Stored values that fail to parse are reported and replaced by the
    /// default, so callers always receive a usable configuration.
    pub fn configuration(&self) -> Result<Configuration> {
        let mut config = Configuration::default();

        for key in SettingKey::ALL {
            if key == SettingKey::Vault {
                continue;
            }
            if let Some(raw) = self.get_setting(key.as_str())?
                && let Err(e) = config.apply(key, &raw)
            {
                tracing::warn!("ignoring stored {key}: {e}");
            }
        }

        Ok(config)
    }

    /// The stored default vault directory, if any.
    pub fn vault(&self) -> Result<Option<PathBuf>> {
        Ok(self
            .get_setting(SettingKey::Vault.as_str())?
            .filter(|v| !v.is_empty())
            .map(PathBuf::from))
    }
}

impl std::fmt::Debug for ConfigDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigDb").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, ConfigDb) {
        let tmp = tempfile::tempdir().unwrap();
        let db = ConfigDb::open(&tmp.path().join("config.redb")).unwrap();
        (tmp, db)
    }

    #[test]
    fn settings_crud() {
        let (_tmp, db) = test_db();

        assert_eq!(db.get_setting("dailies").unwrap(), None);

        db.set_setting("dailies", "daily").unwrap();
        assert_eq!(db.get_setting("dailies").unwrap(), Some("daily".to_string()));

        db.set_setting("dailies", "journal").unwrap();
        assert_eq!(
            db.get_setting("dailies").unwrap(),
            Some("journal".to_string())
        );
    }

    #[test]
    fn empty_store_yields_defaults() {
        let (_tmp, db) = test_db();
        assert_eq!(db.configuration().unwrap(), Configuration::default());
        assert_eq!(db.vault().unwrap(), None);
    }

    #[test]
    fn stored_values_override_defaults() {
        let (_tmp, db) = test_db();
        db.update(SettingKey::MinLetters, "4").unwrap();
        db.update(SettingKey::Dailies, "dailies").unwrap();
        db.update(SettingKey::AppendLink, "false").unwrap();
        db.update(SettingKey::FilterWords, "fox").unwrap();

        let config = db.configuration().unwrap();
        assert_eq!(config.min_letters, 4);
        assert_eq!(config.excluded_path, "dailies");
        assert!(!config.append_link);
        assert!(config.filter_words.contains("FOX"));
        assert!(!config.filter_words.contains("the"));
    }

    #[test]
    fn update_rejects_invalid_values() {
        let (_tmp, db) = test_db();
        assert!(db.update(SettingKey::MinLetters, "lots").is_err());
        assert!(db.update(SettingKey::AppendLink, "perhaps").is_err());
        assert_eq!(db.get_setting("min_letters").unwrap(), None);
    }

    #[test]
    fn corrupt_min_letters_falls_back_to_default() {
        let (_tmp, db) = test_db();
        db.set_setting("min_letters", "NaN").unwrap();
        assert_eq!(db.configuration().unwrap().min_letters, 3);
    }

    #[test]
    fn clear_restores_defaults() {
        let (_tmp, db) = test_db();
        db.update(SettingKey::MinLetters, "6").unwrap();
        db.set_setting("vault", "/notes").unwrap();
        assert_eq!(db.configuration().unwrap().min_letters, 6);
        assert_eq!(db.vault().unwrap(), Some(PathBuf::from("/notes")));

        db.clear_settings().unwrap();
        assert_eq!(db.configuration().unwrap(), Configuration::default());
        assert_eq!(db.vault().unwrap(), None);
    }

    #[test]
    fn reopen_preserves_data() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.redb");

        {
            let db = ConfigDb::open(&path).unwrap();
            db.update(SettingKey::MinLetters, "2").unwrap();
        }

        {
            let db = ConfigDb::open(&path).unwrap();
            assert_eq!(db.configuration().unwrap().min_letters, 2);
        }
    }
}
