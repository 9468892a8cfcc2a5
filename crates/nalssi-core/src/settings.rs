//! User settings and partial updates.
//!
//! Settings updates arrive as a patch carrying only the fields the user
//! changed. Each patch field is tri-state: absent (keep the stored value) or
//! present (overwrite it). [`Patch`] makes that explicit instead of relying
//! on dynamic key-presence checks.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// A patchable field: either left alone or overwritten.
///
/// Deserializes from an optional JSON field — a missing or `null` field is
/// [`Patch::Keep`], anything else is [`Patch::Set`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Keep,
    Set(T),
}

impl<T> Patch<T> {
    /// Overwrite `target` when this patch carries a value.
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Set(value) = self {
            *target = value;
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Set(v),
            None => Patch::Keep,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Keep => serializer.serialize_none(),
            Patch::Set(v) => serializer.serialize_some(v),
        }
    }
}

/// Per-user application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub temperature_unit: TemperatureUnit,
    pub notifications: bool,
    pub language: String,
    /// Preferred region display name, fed to the weather pipeline.
    pub location: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::Celsius,
            notifications: true,
            language: "ko".to_string(),
            location: "서울".to_string(),
        }
    }
}

/// Partial settings update; absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub temperature_unit: Patch<TemperatureUnit>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub notifications: Patch<bool>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub language: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub location: Patch<String>,
}

impl UserSettings {
    /// Merge a patch into these settings, field by field.
    pub fn apply(&mut self, patch: SettingsPatch) {
        patch.temperature_unit.apply_to(&mut self.temperature_unit);
        patch.notifications.apply_to(&mut self.notifications);
        patch.language.apply_to(&mut self.language);
        patch.location.apply_to(&mut self.location);
    }
}
