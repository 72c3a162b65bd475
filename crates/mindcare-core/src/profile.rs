//! Profile fields and theme preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::storage::{keys, KeyValueStore, ProfileDefaults};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub avatar: String,
    pub name: String,
    pub status: String,
}

/// Editable profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Avatar,
    Name,
    Status,
}

impl ProfileField {
    fn key(&self) -> &'static str {
        match self {
            ProfileField::Avatar => keys::PROFILE_AVATAR,
            ProfileField::Name => keys::PROFILE_NAME,
            ProfileField::Status => keys::PROFILE_STATUS,
        }
    }
}

impl FromStr for ProfileField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avatar" => Ok(ProfileField::Avatar),
            "name" => Ok(ProfileField::Name),
            "status" => Ok(ProfileField::Status),
            other => Err(ValidationError::InvalidValue {
                field: "profile field".into(),
                message: format!("'{other}' is not one of avatar, name, status"),
            }),
        }
    }
}

impl Profile {
    pub fn load(store: &dyn KeyValueStore, defaults: &ProfileDefaults) -> Result<Self> {
        let read = |key: &str, fallback: &str| -> Result<String> {
            Ok(store
                .get(key)?
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()))
        };
        Ok(Self {
            avatar: read(keys::PROFILE_AVATAR, &defaults.avatar)?,
            name: read(keys::PROFILE_NAME, &defaults.name)?,
            status: read(keys::PROFILE_STATUS, &defaults.status)?,
        })
    }

    /// First word of the name, for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// Update one field. Blank values are rejected and the old value kept.
    pub fn set(&mut self, store: &dyn KeyValueStore, field: ProfileField, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::Empty(format!("{field:?}").to_lowercase()).into());
        }
        store.set(field.key(), value)?;
        let slot = match field {
            ProfileField::Avatar => &mut self.avatar,
            ProfileField::Name => &mut self.name,
            ProfileField::Status => &mut self.status,
        };
        *slot = value.to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Anything other than a stored "dark" reads as light.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        Ok(match store.get(keys::THEME)?.as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        })
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        store.set(keys::THEME, self.as_str())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(ValidationError::InvalidValue {
                field: "theme".into(),
                message: format!("'{s}' is not dark or light"),
            }),
        }
    }
}
