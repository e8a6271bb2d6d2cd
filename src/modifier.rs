use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attribute::Attribute;
use crate::error::{GameError, Result};

/// Anything that counts down once per turn and expires at zero.
pub trait Timed {
    fn turns_mut(&mut self) -> &mut u32;
}

/// Ticks every entry down by one turn and drops the ones that ran out.
///
/// Returns the expired entries in their original order. The collection is
/// rebuilt in a single pass, so callers never see it half-decayed.
pub fn decay<T: Timed>(entries: &mut Vec<T>) -> Vec<T> {
    let mut expired = Vec::new();
    let mut remaining = Vec::with_capacity(entries.len());
    for mut entry in entries.drain(..) {
        let turns = entry.turns_mut();
        *turns = turns.saturating_sub(1);
        if *turns == 0 {
            expired.push(entry);
        } else {
            remaining.push(entry);
        }
    }
    *entries = remaining;
    expired
}

/// A timed buff or debuff on one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    // In-memory identity only; a fresh one is minted for every loaded entry.
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub stat: Attribute,
    pub turns: u32,
    pub points: i64,
}

impl Modifier {
    pub fn is_buff(&self) -> bool {
        self.points >= 0
    }
}

impl Timed for Modifier {
    fn turns_mut(&mut self) -> &mut u32 {
        &mut self.turns
    }
}

/// Ordered collection of active modifiers, persisted as a plain sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierStore {
    modifiers: Vec<Modifier>,
}

impl ModifierStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one modifier. A debuff stores the negated amount.
    pub fn add(&mut self, stat: Attribute, turns: u32, amount: i64, debuff: bool) -> Result<Uuid> {
        if turns == 0 {
            return Err(GameError::InvalidDuration(turns));
        }
        if amount == 0 {
            return Err(GameError::ZeroMagnitude);
        }
        let modifier = Modifier {
            id: Uuid::new_v4(),
            stat,
            turns,
            points: if debuff { amount.saturating_neg() } else { amount },
        };
        let id = modifier.id;
        self.modifiers.push(modifier);
        Ok(id)
    }

    /// Same as [`ModifierStore::add`] but takes the attribute by name.
    pub fn add_named(&mut self, stat: &str, turns: u32, amount: i64, debuff: bool) -> Result<Uuid> {
        self.add(Attribute::from_name(stat)?, turns, amount, debuff)
    }

    /// Adds one independent modifier per attribute. Nothing is added unless
    /// every entry is valid.
    pub fn add_batch(
        &mut self,
        stats: &[Attribute],
        turns: u32,
        amount: i64,
        debuff: bool,
    ) -> Result<Vec<Uuid>> {
        if turns == 0 {
            return Err(GameError::InvalidDuration(turns));
        }
        if amount == 0 {
            return Err(GameError::ZeroMagnitude);
        }
        stats
            .iter()
            .map(|stat| self.add(*stat, turns, amount, debuff))
            .collect()
    }

    /// Removes the modifier with this id. Unknown ids are ignored.
    pub fn remove(&mut self, id: Uuid) -> Option<Modifier> {
        let index = self.modifiers.iter().position(|m| m.id == id)?;
        Some(self.modifiers.remove(index))
    }

    /// Removes entries that could not have been added: no turns left or no
    /// points. Only stored data can hold these.
    pub fn drop_invalid(&mut self) -> Vec<Modifier> {
        let (valid, invalid) = std::mem::take(&mut self.modifiers)
            .into_iter()
            .partition(|m| m.turns >= 1 && m.points != 0);
        self.modifiers = valid;
        invalid
    }

    pub fn decay_all(&mut self) -> Vec<Modifier> {
        decay(&mut self.modifiers)
    }

    pub fn clear(&mut self) {
        self.modifiers.clear();
    }

    pub fn get(&self, id: Uuid) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.id == id)
    }

    pub fn as_slice(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Modifier> {
        self.modifiers.iter()
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debuff_negates_amount() {
        let mut store = ModifierStore::new();
        let id = store
            .add(Attribute::Humor, 2, 3, true)
            .expect("Expected a valid modifier");
        let modifier = store.get(id).expect("Expected the modifier to be stored");
        assert_eq!(modifier.points, -3);
        assert!(!modifier.is_buff());
    }

    #[test]
    fn debuff_of_the_smallest_amount_saturates() {
        let mut store = ModifierStore::new();
        let id = store.add(Attribute::Wealth, 1, i64::MIN, true).unwrap();
        assert_eq!(store.get(id).map(|m| m.points), Some(i64::MAX));
    }

    #[test]
    fn rejects_zero_duration_and_zero_amount() {
        let mut store = ModifierStore::new();
        assert_eq!(
            store.add(Attribute::Wealth, 0, 1, false),
            Err(GameError::InvalidDuration(0))
        );
        assert_eq!(
            store.add(Attribute::Wealth, 1, 0, false),
            Err(GameError::ZeroMagnitude)
        );
        assert_eq!(
            store.add_named("luck", 1, 1, false),
            Err(GameError::InvalidAttribute("luck".to_string()))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn decay_removes_last_turn_and_ticks_the_rest() {
        let mut store = ModifierStore::new();
        store.add(Attribute::Determination, 1, 1, false).unwrap();
        let humor = store.add(Attribute::Humor, 2, 3, true).unwrap();

        let expired = store.decay_all();

        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].stat, Attribute::Determination);
        assert_eq!(store.len(), 1);
        let remaining = store.get(humor).unwrap();
        assert_eq!(remaining.turns, 1);
        assert_eq!(remaining.points, -3);
    }

    #[test]
    fn removal_is_idempotent() {
        let mut store = ModifierStore::new();
        let first = store.add(Attribute::Humor, 3, 2, false).unwrap();
        store.add(Attribute::Appearance, 3, 2, false).unwrap();

        assert!(store.remove(first).is_some());
        let after_first = store.clone();
        assert!(store.remove(first).is_none());
        assert_eq!(store, after_first);
    }

    #[test]
    fn batch_add_creates_independent_modifiers() {
        let mut store = ModifierStore::new();
        let ids = store
            .add_batch(&[Attribute::Humor, Attribute::Appearance], 3, 2, false)
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);

        store.remove(ids[0]);
        let left = store.get(ids[1]).unwrap();
        assert_eq!(left.stat, Attribute::Appearance);
        assert_eq!((left.turns, left.points), (3, 2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn loaded_modifiers_get_fresh_ids() {
        let store: ModifierStore = serde_json::from_str(
            r#"[{"stat":"wealth","turns":2,"points":2},{"stat":"wealth","turns":2,"points":2}]"#,
        )
        .expect("Expected a valid buff list");
        assert_eq!(store.len(), 2);
        assert_ne!(store.as_slice()[0].id, store.as_slice()[1].id);

        let json = serde_json::to_string(&store).unwrap();
        assert!(!json.contains("id"));
    }
}
