//! Application settings persistence.
//!
//! Settings live as a single record in their own collection; absence means
//! the user never changed anything and defaults apply.

use super::{decode, encode, LetterStore, StoreResult, SETTINGS_COLLECTION};
use crate::model::settings::AppSettings;
use crate::storage::StorageBackend;
use log::error;

const SETTINGS_KEY: &str = "app";

impl<B: StorageBackend> LetterStore<B> {
    /// Returns the persisted settings, or defaults when none are stored.
    pub fn load_settings(&self) -> StoreResult<AppSettings> {
        match self.load_settings_inner() {
            Ok(settings) => Ok(settings),
            Err(err) => {
                error!("event=settings_load module=store status=error error={err}");
                Err(err)
            }
        }
    }

    fn load_settings_inner(&self) -> StoreResult<AppSettings> {
        match self.backend.get(SETTINGS_COLLECTION, SETTINGS_KEY)? {
            Some(payload) => decode(SETTINGS_COLLECTION, SETTINGS_KEY, &payload),
            None => Ok(AppSettings::default()),
        }
    }

    /// Persists the settings record, overwriting any previous one.
    pub fn save_settings(&mut self, settings: &AppSettings) -> StoreResult<()> {
        match self.save_settings_inner(settings) {
            Ok(()) => Ok(()),
            Err(err) => {
                error!("event=settings_save module=store status=error error={err}");
                Err(err)
            }
        }
    }

    fn save_settings_inner(&mut self, settings: &AppSettings) -> StoreResult<()> {
        let payload = encode(settings)?;
        self.backend
            .set(SETTINGS_COLLECTION, SETTINGS_KEY, &payload)?;
        Ok(())
    }
}
