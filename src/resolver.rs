use crate::attribute::{Attribute, AttributeSet};
use crate::modifier::Modifier;

/// Displayed attribute values: base plus every active modifier.
///
/// Derived on demand and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveAttributes(AttributeSet);

impl EffectiveAttributes {
    pub fn get(&self, attribute: Attribute) -> i64 {
        self.0.get(attribute)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i64)> + '_ {
        self.0.iter()
    }
}

/// Folds the modifiers onto the base values. Order of `modifiers` is irrelevant.
pub fn resolve<'a>(
    base: &AttributeSet,
    modifiers: impl IntoIterator<Item = &'a Modifier>,
) -> EffectiveAttributes {
    let mut effective = *base;
    for modifier in modifiers {
        let value = effective.get_mut(modifier.stat);
        *value = value.saturating_add(modifier.points);
    }
    EffectiveAttributes(effective)
}
