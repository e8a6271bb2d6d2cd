use crate::attribute::AttributeSet;
use crate::inventory::Inventory;
use crate::ledger::Ledger;
use crate::modifier::ModifierStore;
use crate::resolver::{EffectiveAttributes, resolve};
use crate::status::StatusBoard;
use crate::turn::TurnState;

/// Everything the tracker remembers between turns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    pub stats: AttributeSet,
    pub buffs: ModifierStore,
    pub statuses: StatusBoard,
    pub inventory: Inventory,
    pub money: Ledger,
    pub turn: TurnState,
}

impl GameState {
    pub fn effective_attributes(&self) -> EffectiveAttributes {
        resolve(&self.stats, self.buffs.iter())
    }

    /// Clears every store at once and hands the turn back to its initial state.
    pub fn reset(&mut self) {
        self.stats.reset();
        self.buffs.clear();
        self.statuses.clear();
        self.inventory.clear();
        self.money.reset();
        self.turn = TurnState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;

    #[test]
    fn reset_returns_to_defaults_from_any_state() {
        let mut game = GameState::default();
        game.stats.set(Attribute::Determination, 9);
        game.stats.set(Attribute::Humor, -4);
        game.buffs.add(Attribute::Wealth, 3, 2, false).unwrap();
        game.statuses.add("Poisoned", "-1 per turn", 4).unwrap();
        game.inventory.add("Sword", "Rusty");
        game.money.adjust(-120);
        game.turn = TurnState::MyTurn;

        game.reset();

        assert_eq!(game, GameState::default());
    }
}
