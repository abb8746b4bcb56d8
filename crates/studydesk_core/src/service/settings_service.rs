//! Profile settings and data reset.

use super::{ServiceError, ServiceResult};
use crate::model::profile::Profile;
use crate::repo::kv_repo::KvStore;
use crate::repo::storage::Storage;
use log::{error, info};

pub struct SettingsService<S: KvStore> {
    storage: Storage<S>,
    profile: Option<Profile>,
    dirty: bool,
}

impl<S: KvStore> SettingsService<S> {
    pub fn open(storage: Storage<S>) -> ServiceResult<Self> {
        let profile = storage.load_profile()?;
        Ok(Self {
            storage,
            profile,
            dirty: false,
        })
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Replaces the stored profile after validation.
    pub fn update_profile(&mut self, profile: Profile) -> ServiceResult<Profile> {
        profile.validate()?;
        self.profile = Some(profile.clone());
        self.persist()?;
        info!("event=profile_update module=service status=ok");
        Ok(profile)
    }

    /// Removes every stored record; the next start is an onboarding start.
    pub fn clear_all_data(&mut self) -> ServiceResult<()> {
        self.storage.clear_all().map_err(ServiceError::NotSaved)?;
        self.profile = None;
        self.dirty = false;
        info!("event=data_clear module=service status=ok");
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn flush(&mut self) -> ServiceResult<()> {
        if self.dirty {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&mut self) -> ServiceResult<()> {
        let Some(profile) = &self.profile else {
            return Ok(());
        };
        match self.storage.save_profile(profile) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(err) => {
                self.dirty = true;
                error!("event=profile_save module=service status=error error={err}");
                Err(ServiceError::NotSaved(err))
            }
        }
    }
}
