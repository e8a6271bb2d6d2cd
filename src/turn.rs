//! Turn controller: what happens at a turn boundary.
//!
//! Two turn models are supported. In the two-phase model the player owns the
//! turn between `start_turn` (money accrues) and `end_turn` (effects decay).
//! In the fused model a single `end_turn` does both, accruing from the wealth
//! the player had before anything decayed.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::attribute::Attribute;
use crate::error::{GameError, Result};
use crate::game_state::GameState;
use crate::ledger::ACCRUAL_MULTIPLIER;
use crate::modifier::Modifier;
use crate::status::StatusEffect;

/// How long the "turn ended" banner stays up.
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum TurnState {
    MyTurn,
    #[default]
    NotMyTurn,
}

impl TurnState {
    pub fn from_my_turn(is_my_turn: bool) -> Self {
        if is_my_turn {
            TurnState::MyTurn
        } else {
            TurnState::NotMyTurn
        }
    }

    pub fn is_my_turn(&self) -> bool {
        matches!(self, TurnState::MyTurn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TurnAction {
    #[strum(serialize = "start the turn")]
    StartTurn,
    #[strum(serialize = "end the turn")]
    EndTurn,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TurnModel {
    #[default]
    TwoPhase,
    Fused,
}

/// What a single transition did, for logging and display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub accrued: Option<i64>,
    pub expired_modifiers: Vec<Modifier>,
    pub expired_statuses: Vec<StatusEffect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnRules {
    pub model: TurnModel,
    pub multiplier: i64,
}

impl Default for TurnRules {
    fn default() -> Self {
        Self {
            model: TurnModel::default(),
            multiplier: ACCRUAL_MULTIPLIER,
        }
    }
}

impl TurnRules {
    pub fn new(model: TurnModel, multiplier: i64) -> Self {
        Self { model, multiplier }
    }

    /// Decays modifiers and statuses (accruing first in the fused model) and
    /// hands the turn away. Every effect lands before this returns.
    pub fn end_turn(&self, game: &mut GameState) -> Result<TurnReport> {
        let accrued = match self.model {
            TurnModel::TwoPhase => {
                if game.turn != TurnState::MyTurn {
                    return Err(GameError::InvalidTransition {
                        action: TurnAction::EndTurn,
                        state: game.turn,
                    });
                }
                None
            }
            TurnModel::Fused => Some(self.accrue(game)),
        };

        let expired_modifiers = game.buffs.decay_all();
        let expired_statuses = game.statuses.decay_all();
        game.turn = TurnState::NotMyTurn;

        Ok(TurnReport {
            accrued,
            expired_modifiers,
            expired_statuses,
        })
    }

    /// Takes the turn and pays out effective wealth times the multiplier.
    pub fn start_turn(&self, game: &mut GameState) -> Result<TurnReport> {
        if self.model == TurnModel::Fused {
            return Err(GameError::UnavailableInModel {
                action: TurnAction::StartTurn,
                model: self.model,
            });
        }
        if game.turn != TurnState::NotMyTurn {
            return Err(GameError::InvalidTransition {
                action: TurnAction::StartTurn,
                state: game.turn,
            });
        }
        let accrued = self.accrue(game);
        game.turn = TurnState::MyTurn;
        Ok(TurnReport {
            accrued: Some(accrued),
            ..TurnReport::default()
        })
    }

    fn accrue(&self, game: &mut GameState) -> i64 {
        let wealth = game.effective_attributes().get(Attribute::Wealth);
        game.money.accrue_from_attribute(wealth, self.multiplier)
    }
}

/// The transient "turn ended" banner. UI feedback only, never saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnNotice {
    raised_at: Option<Instant>,
    duration: Duration,
}

impl Default for TurnNotice {
    fn default() -> Self {
        Self::new(NOTICE_DURATION)
    }
}

impl TurnNotice {
    pub fn new(duration: Duration) -> Self {
        Self {
            raised_at: None,
            duration,
        }
    }

    /// Raises the banner; a banner already up is simply restarted.
    pub fn raise(&mut self, now: Instant) {
        self.raised_at = Some(now);
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.raised_at
            .is_some_and(|raised| now.saturating_duration_since(raised) < self.duration)
    }

    /// Drops the banner once it has been up long enough.
    pub fn tick(&mut self, now: Instant) {
        if !self.is_visible(now) {
            self.raised_at = None;
        }
    }

    pub fn clear(&mut self) {
        self.raised_at = None;
    }

    pub fn is_raised(&self) -> bool {
        self.raised_at.is_some()
    }
}
