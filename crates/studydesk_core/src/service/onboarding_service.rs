//! First-run profile creation.

use super::{ServiceError, ServiceResult};
use crate::model::profile::Profile;
use crate::repo::kv_repo::KvStore;
use crate::repo::storage::Storage;
use log::info;

pub struct OnboardingService<S: KvStore> {
    storage: Storage<S>,
}

impl<S: KvStore> OnboardingService<S> {
    pub fn new(storage: Storage<S>) -> Self {
        Self { storage }
    }

    /// Validates and stores the first profile.
    ///
    /// An invalid profile is rejected before anything is written.
    pub fn complete(&self, profile: Profile) -> ServiceResult<Profile> {
        profile.validate()?;
        self.storage
            .save_profile(&profile)
            .map_err(ServiceError::NotSaved)?;
        info!(
            "event=onboarding_complete module=service status=ok class={} stream={} goal={}",
            profile.class_name, profile.stream, profile.daily_goal
        );
        Ok(profile)
    }
}
