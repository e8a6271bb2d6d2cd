//! The application-facing state container.
//!
//! [`Tracker`] owns the game state, the turn rules and the storage port. Every
//! mutation is applied in memory first, then the stores it touched are saved
//! on a best-effort basis.

use std::time::Instant;

use uuid::Uuid;

use crate::attribute::{Attribute, AttributeSet};
use crate::error::Result;
use crate::game_state::GameState;
use crate::inventory::Inventory;
use crate::ledger::Ledger;
use crate::modifier::ModifierStore;
use crate::resolver::EffectiveAttributes;
use crate::save::{Storage, StoreKey, load_game_state, save_stores};
use crate::settings::Settings;
use crate::status::StatusBoard;
use crate::turn::{TurnNotice, TurnReport, TurnRules, TurnState};

const TURN_KEYS: [StoreKey; 4] = [
    StoreKey::Buffs,
    StoreKey::Statuses,
    StoreKey::TurnEnded,
    StoreKey::IsMyTurn,
];

#[derive(Debug)]
pub struct Tracker<S: Storage> {
    game: GameState,
    rules: TurnRules,
    notice: TurnNotice,
    storage: S,
}

impl<S: Storage> Tracker<S> {
    /// Restores every store from `storage`, falling back per key.
    pub fn load(storage: S, settings: &Settings) -> Self {
        let game = load_game_state(&storage);
        log::info!(
            "Loaded tracker: {} buffs, {} statuses, {} items, money {}, {}",
            game.buffs.len(),
            game.statuses.len(),
            game.inventory.len(),
            game.money.balance(),
            game.turn
        );
        Self {
            game,
            rules: settings.turn_rules(),
            notice: TurnNotice::new(settings.notice_duration()),
            storage,
        }
    }

    // --- Reads

    pub fn effective_attributes(&self) -> EffectiveAttributes {
        self.game.effective_attributes()
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn stats(&self) -> &AttributeSet {
        &self.game.stats
    }

    pub fn buffs(&self) -> &ModifierStore {
        &self.game.buffs
    }

    pub fn statuses(&self) -> &StatusBoard {
        &self.game.statuses
    }

    pub fn inventory(&self) -> &Inventory {
        &self.game.inventory
    }

    pub fn money(&self) -> &Ledger {
        &self.game.money
    }

    pub fn turn(&self) -> TurnState {
        self.game.turn
    }

    pub fn rules(&self) -> TurnRules {
        self.rules
    }

    pub fn notice_visible(&self, now: Instant) -> bool {
        self.notice.is_visible(now)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    // --- Attributes

    pub fn increment(&mut self, name: &str) -> Result<i64> {
        let value = self.game.stats.increment_named(name)?;
        log::debug!("{name} incremented to {value}");
        self.persist(&[StoreKey::Stats]);
        Ok(value)
    }

    pub fn decrement(&mut self, name: &str) -> Result<i64> {
        let value = self.game.stats.decrement_named(name)?;
        log::debug!("{name} decremented to {value}");
        self.persist(&[StoreKey::Stats]);
        Ok(value)
    }

    pub fn increment_attribute(&mut self, attribute: Attribute) -> i64 {
        let value = self.game.stats.increment(attribute);
        self.persist(&[StoreKey::Stats]);
        value
    }

    pub fn decrement_attribute(&mut self, attribute: Attribute) -> i64 {
        let value = self.game.stats.decrement(attribute);
        self.persist(&[StoreKey::Stats]);
        value
    }

    // --- Modifiers

    pub fn add_modifier(&mut self, stat: &str, turns: u32, amount: i64, debuff: bool) -> Result<Uuid> {
        let id = self.game.buffs.add_named(stat, turns, amount, debuff)?;
        log::debug!("Added modifier on {stat} for {turns} turns");
        self.persist(&[StoreKey::Buffs]);
        Ok(id)
    }

    /// One form submission: one independent modifier per selected attribute.
    pub fn add_modifiers(
        &mut self,
        stats: &[Attribute],
        turns: u32,
        amount: i64,
        debuff: bool,
    ) -> Result<Vec<Uuid>> {
        let ids = self.game.buffs.add_batch(stats, turns, amount, debuff)?;
        log::debug!("Added {} modifiers for {turns} turns", ids.len());
        self.persist(&[StoreKey::Buffs]);
        Ok(ids)
    }

    /// Removing a modifier that already expired is a no-op.
    pub fn remove_modifier(&mut self, id: Uuid) {
        if self.game.buffs.remove(id).is_some() {
            self.persist(&[StoreKey::Buffs]);
        } else {
            log::debug!("Modifier {id} already gone");
        }
    }

    // --- Statuses

    pub fn add_status(&mut self, title: &str, description: &str, turns: u32) -> Result<Uuid> {
        let id = self.game.statuses.add(title, description, turns)?;
        log::debug!("Added status '{title}' for {turns} turns");
        self.persist(&[StoreKey::Statuses]);
        Ok(id)
    }

    pub fn remove_status(&mut self, id: Uuid) {
        if self.game.statuses.remove(id).is_some() {
            self.persist(&[StoreKey::Statuses]);
        }
    }

    // --- Inventory

    pub fn add_item(&mut self, title: &str, description: &str) -> Uuid {
        let id = self.game.inventory.add(title, description);
        self.persist(&[StoreKey::Inventory]);
        id
    }

    pub fn remove_item(&mut self, id: Uuid) {
        if self.game.inventory.remove(id).is_some() {
            self.persist(&[StoreKey::Inventory]);
        }
    }

    // --- Money

    pub fn adjust_currency(&mut self, amount: i64) -> i64 {
        let balance = self.game.money.adjust(amount);
        log::debug!("Money adjusted by {amount} to {balance}");
        self.persist(&[StoreKey::Money]);
        balance
    }

    // --- Turns

    pub fn start_turn(&mut self) -> Result<TurnReport> {
        let report = self.rules.start_turn(&mut self.game)?;
        log::info!("Turn started, accrued {:?}", report.accrued);
        self.persist(&[StoreKey::Money, StoreKey::IsMyTurn]);
        Ok(report)
    }

    pub fn end_turn(&mut self) -> Result<TurnReport> {
        self.end_turn_at(Instant::now())
    }

    /// Ends the turn, raising the notice as of `now`.
    pub fn end_turn_at(&mut self, now: Instant) -> Result<TurnReport> {
        let report = self.rules.end_turn(&mut self.game)?;
        self.notice.raise(now);
        log::info!(
            "Turn ended: {} modifiers and {} statuses expired, accrued {:?}",
            report.expired_modifiers.len(),
            report.expired_statuses.len(),
            report.accrued
        );
        self.persist(&TURN_KEYS);
        if report.accrued.is_some() {
            self.persist(&[StoreKey::Money]);
        }
        Ok(report)
    }

    /// Drops the turn-ended notice once it has timed out.
    pub fn tick(&mut self, now: Instant) {
        self.notice.tick(now);
    }

    /// Wipes every store. Confirmation is the caller's job.
    pub fn reset_game(&mut self) {
        self.game.reset();
        self.notice.clear();
        log::info!("Game reset");
        self.persist(&[
            StoreKey::Stats,
            StoreKey::Buffs,
            StoreKey::Statuses,
            StoreKey::Inventory,
            StoreKey::Money,
            StoreKey::TurnEnded,
            StoreKey::IsMyTurn,
        ]);
    }

    fn persist(&mut self, keys: &[StoreKey]) {
        save_stores(&mut self.storage, &self.game, keys);
    }
}
