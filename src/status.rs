use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{GameError, Result};
use crate::modifier::{Timed, decay};

/// A named, purely descriptive effect that lasts a number of turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub turns: u32,
}

impl Timed for StatusEffect {
    fn turns_mut(&mut self) -> &mut u32 {
        &mut self.turns
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusBoard {
    statuses: Vec<StatusEffect>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        turns: u32,
    ) -> Result<Uuid> {
        if turns == 0 {
            return Err(GameError::InvalidDuration(turns));
        }
        let id = Uuid::new_v4();
        self.statuses.push(StatusEffect {
            id,
            title: title.into(),
            description: description.into(),
            turns,
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<StatusEffect> {
        let index = self.statuses.iter().position(|s| s.id == id)?;
        Some(self.statuses.remove(index))
    }

    /// Removes stored entries with no turns left.
    pub fn drop_invalid(&mut self) -> Vec<StatusEffect> {
        let (valid, invalid) = std::mem::take(&mut self.statuses)
            .into_iter()
            .partition(|s| s.turns >= 1);
        self.statuses = valid;
        invalid
    }

    pub fn decay_all(&mut self) -> Vec<StatusEffect> {
        decay(&mut self.statuses)
    }

    pub fn clear(&mut self) {
        self.statuses.clear();
    }

    pub fn get(&self, id: Uuid) -> Option<&StatusEffect> {
        self.statuses.iter().find(|s| s.id == id)
    }

    pub fn as_slice(&self) -> &[StatusEffect] {
        &self.statuses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StatusEffect> {
        self.statuses.iter()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_expire_like_modifiers() {
        let mut board = StatusBoard::new();
        let stunned = board.add("Stunned", "Skip the next action", 1).unwrap();
        let inspired = board.add("Inspired", "", 3).unwrap();

        let expired = board.decay_all();

        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id, stunned);
        assert_eq!(board.get(inspired).map(|s| s.turns), Some(2));
    }

    #[test]
    fn ids_stay_unique_under_rapid_creation() {
        let mut board = StatusBoard::new();
        let ids: Vec<Uuid> = (0..100)
            .map(|i| board.add(format!("status {i}"), "", 1).unwrap())
            .collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut board = StatusBoard::new();
        board.add("Blessed", "+luck", 2).unwrap();
        assert!(board.remove(Uuid::new_v4()).is_none());
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn zero_turn_status_is_rejected() {
        let mut board = StatusBoard::new();
        assert_eq!(board.add("Nope", "", 0), Err(GameError::InvalidDuration(0)));
        assert!(board.is_empty());
    }
}
