// Import necessary modules from external crates.
use serde::{Deserialize, Serialize};
use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{Display, EnumCount, EnumIter, EnumMessage, EnumString};

use crate::error::{GameError, Result};

// The closed set of tracked attributes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    EnumCount,
    EnumMessage,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Attribute {
    #[strum(message = "Determination")]
    Determination,
    #[strum(message = "Humor")]
    Humor,
    #[strum(message = "Intelligence")]
    Intelligence,
    #[strum(message = "Appearance")]
    Appearance,
    #[strum(message = "Wealth")]
    Wealth,
}

impl Attribute {
    /// Parses one of the five attribute names, as stored on disk.
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| GameError::InvalidAttribute(name.to_string()))
    }

    /// Display title, as shown on the sheet.
    pub fn title(&self) -> &'static str {
        self.get_message().unwrap_or_default()
    }

    pub fn all() -> impl Iterator<Item = Attribute> {
        Attribute::iter()
    }
}

/// Base values of the five attributes.
///
/// Serialized as a map keyed by attribute name. Missing names read as zero so
/// that the key set is always complete after a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSet {
    pub determination: i64,
    pub humor: i64,
    pub intelligence: i64,
    pub appearance: i64,
    pub wealth: i64,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attribute: Attribute) -> i64 {
        match attribute {
            Attribute::Determination => self.determination,
            Attribute::Humor => self.humor,
            Attribute::Intelligence => self.intelligence,
            Attribute::Appearance => self.appearance,
            Attribute::Wealth => self.wealth,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut i64 {
        match attribute {
            Attribute::Determination => &mut self.determination,
            Attribute::Humor => &mut self.humor,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Appearance => &mut self.appearance,
            Attribute::Wealth => &mut self.wealth,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: i64) {
        *self.get_mut(attribute) = value;
    }

    pub fn increment(&mut self, attribute: Attribute) -> i64 {
        let value = self.get_mut(attribute);
        *value = value.saturating_add(1);
        *value
    }

    pub fn decrement(&mut self, attribute: Attribute) -> i64 {
        let value = self.get_mut(attribute);
        *value = value.saturating_sub(1);
        *value
    }

    // Name-based variants, for callers holding raw attribute names.
    pub fn increment_named(&mut self, name: &str) -> Result<i64> {
        Ok(self.increment(Attribute::from_name(name)?))
    }

    pub fn decrement_named(&mut self, name: &str) -> Result<i64> {
        Ok(self.decrement(Attribute::from_name(name)?))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i64)> + '_ {
        Attribute::iter().map(move |attribute| (attribute, self.get(attribute)))
    }
}
