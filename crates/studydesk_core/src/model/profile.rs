//! Student profile.
//!
//! # Invariants
//! - At most one profile exists per store; absence means onboarding.
//! - `name` is non-empty, `class_name` is a known level, `daily_goal` is
//!   within `1..=12` hours.

use super::{require_text, ParseEnumError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Supported class levels, in display order.
pub const CLASS_LEVELS: [&str; 5] = ["9th", "10th", "11th", "12th", "College"];

/// Allowed daily goal range in hours.
pub const DAILY_GOAL_RANGE: std::ops::RangeInclusive<u8> = 1..=12;

/// Default daily goal offered during onboarding.
pub const DEFAULT_DAILY_GOAL: u8 = 2;

/// Academic stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stream {
    Science,
    Commerce,
    Arts,
    Other,
}

impl Stream {
    pub const ALL: [Stream; 4] = [Self::Science, Self::Commerce, Self::Arts, Self::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Science => "Science",
            Self::Commerce => "Commerce",
            Self::Arts => "Arts",
            Self::Other => "Other",
        }
    }
}

impl Display for Stream {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stream {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stream| stream.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "stream",
                value: value.to_string(),
                expected: "Science|Commerce|Arts|Other",
            })
    }
}

/// The single on-device student profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub class_name: String,
    pub stream: Stream,
    /// Study goal in whole hours per day.
    pub daily_goal: u8,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        class_name: impl Into<String>,
        stream: Stream,
        daily_goal: u8,
    ) -> Self {
        Self {
            name: name.into(),
            class_name: class_name.into(),
            stream,
            daily_goal,
        }
    }

    /// Checks profile invariants.
    ///
    /// # Errors
    /// - `EmptyField("name")` for a blank name.
    /// - `UnknownClassLevel` when `class_name` is not in [`CLASS_LEVELS`].
    /// - `DailyGoalOutOfRange` when the goal is outside `1..=12`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        if !CLASS_LEVELS.contains(&self.class_name.as_str()) {
            return Err(ValidationError::UnknownClassLevel(self.class_name.clone()));
        }
        if !DAILY_GOAL_RANGE.contains(&self.daily_goal) {
            return Err(ValidationError::DailyGoalOutOfRange(self.daily_goal));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Profile, Stream};
    use crate::model::ValidationError;

    #[test]
    fn validate_accepts_onboarding_defaults() {
        let profile = Profile::new("Asha", "11th", Stream::Science, 2);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let blank = Profile::new(" ", "11th", Stream::Arts, 2);
        assert_eq!(blank.validate(), Err(ValidationError::EmptyField("name")));

        let level = Profile::new("Asha", "8th", Stream::Arts, 2);
        assert!(matches!(
            level.validate(),
            Err(ValidationError::UnknownClassLevel(_))
        ));

        let goal = Profile::new("Asha", "College", Stream::Arts, 13);
        assert_eq!(
            goal.validate(),
            Err(ValidationError::DailyGoalOutOfRange(13))
        );
    }

    #[test]
    fn stream_parses_case_insensitively() {
        assert_eq!("commerce".parse::<Stream>().unwrap(), Stream::Commerce);
        assert!("law".parse::<Stream>().is_err());
    }
}
