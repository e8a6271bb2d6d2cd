// ../tests/tests.rs
use std::time::{Duration, Instant};

use turn_tracker::app::Command;
use turn_tracker::*;

fn tracker() -> Tracker<MemoryStorage> {
    Tracker::load(MemoryStorage::new(), &Settings::default())
}

fn fused_tracker() -> Tracker<MemoryStorage> {
    let settings = Settings {
        turn_model: TurnModel::Fused,
        ..Settings::default()
    };
    Tracker::load(MemoryStorage::new(), &settings)
}

#[test]
fn starting_a_turn_pays_effective_wealth_times_ten() {
    let mut tracker = tracker();
    for _ in 0..3 {
        tracker.increment("wealth").unwrap();
    }
    tracker.add_modifier("wealth", 2, 2, false).unwrap();
    assert_eq!(tracker.effective_attributes().get(Attribute::Wealth), 5);

    let report = tracker.start_turn().unwrap();

    assert_eq!(report.accrued, Some(50));
    assert_eq!(tracker.money().balance(), 50);
    assert_eq!(tracker.turn(), TurnState::MyTurn);
    assert_eq!(tracker.storage().raw(StoreKey::Money), Some("50"));
    assert_eq!(tracker.storage().raw(StoreKey::IsMyTurn), Some("true"));
}

#[test]
fn negative_wealth_drains_money() {
    let mut tracker = tracker();
    tracker.decrement("wealth").unwrap();
    tracker.start_turn().unwrap();
    assert_eq!(tracker.money().balance(), -10);
}

#[test]
fn out_of_order_transitions_are_rejected_without_side_effects() {
    let mut tracker = tracker();
    tracker.add_modifier("humor", 1, 1, false).unwrap();

    let err = tracker.end_turn().unwrap_err();
    assert!(matches!(err, GameError::InvalidTransition { .. }));
    assert_eq!(tracker.buffs().len(), 1);
    assert!(!tracker.notice_visible(Instant::now()));

    tracker.start_turn().unwrap();
    assert!(matches!(
        tracker.start_turn(),
        Err(GameError::InvalidTransition { .. })
    ));
    assert_eq!(tracker.money().balance(), 0);
}

#[test]
fn ending_a_turn_decays_and_expires_effects() {
    let mut tracker = tracker();
    tracker.add_modifier("humor", 1, 3, false).unwrap();
    tracker.add_modifier("intelligence", 2, 1, true).unwrap();
    tracker.add_status("Poisoned", "Lose a turn", 1).unwrap();
    tracker.add_status("Inspired", "", 3).unwrap();

    tracker.start_turn().unwrap();
    let report = tracker.end_turn().unwrap();

    assert_eq!(report.expired_modifiers.len(), 1);
    assert_eq!(report.expired_modifiers[0].stat, Attribute::Humor);
    assert_eq!(report.expired_statuses.len(), 1);
    assert_eq!(report.expired_statuses[0].title, "Poisoned");

    let remaining: Vec<_> = tracker.buffs().iter().collect();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].turns, 1);
    assert_eq!(remaining[0].points, -1);
    assert_eq!(tracker.statuses().iter().next().map(|s| s.turns), Some(2));

    let effective = tracker.effective_attributes();
    assert_eq!(effective.get(Attribute::Humor), 0);
    assert_eq!(effective.get(Attribute::Intelligence), -1);
    assert_eq!(tracker.turn(), TurnState::NotMyTurn);
    assert_eq!(tracker.storage().raw(StoreKey::TurnEnded), Some("false"));
    assert_eq!(tracker.storage().raw(StoreKey::IsMyTurn), Some("false"));
}

#[test]
fn fused_end_turn_accrues_before_decay() {
    let mut tracker = fused_tracker();
    tracker.increment("wealth").unwrap();
    tracker.add_modifier("wealth", 1, 4, false).unwrap();

    let report = tracker.end_turn().unwrap();

    // The expiring +4 still counts toward this payout.
    assert_eq!(report.accrued, Some(50));
    assert_eq!(tracker.money().balance(), 50);
    assert!(tracker.buffs().is_empty());
    assert_eq!(tracker.storage().raw(StoreKey::Money), Some("50"));
    assert!(matches!(
        tracker.start_turn(),
        Err(GameError::UnavailableInModel { .. })
    ));
}

#[test]
fn notice_shows_for_two_seconds_after_ending_a_turn() {
    let mut tracker = tracker();
    tracker.start_turn().unwrap();
    let now = Instant::now();
    tracker.end_turn_at(now).unwrap();

    assert!(tracker.notice_visible(now + Duration::from_millis(1500)));
    assert!(!tracker.notice_visible(now + Duration::from_secs(2)));

    tracker.tick(now + Duration::from_secs(3));
    assert!(!tracker.notice_visible(now));
}

#[test]
fn one_submission_adds_a_modifier_per_attribute() {
    let mut tracker = tracker();
    let ids = tracker
        .add_modifiers(&[Attribute::Humor, Attribute::Appearance], 3, 2, true)
        .unwrap();

    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    let effective = tracker.effective_attributes();
    assert_eq!(effective.get(Attribute::Humor), -2);
    assert_eq!(effective.get(Attribute::Appearance), -2);
    assert_eq!(effective.get(Attribute::Wealth), 0);
}

#[test]
fn invalid_modifiers_are_rejected_whole() {
    let mut tracker = tracker();
    assert!(matches!(
        tracker.add_modifier("luck", 1, 1, false),
        Err(GameError::InvalidAttribute(_))
    ));
    assert_eq!(
        tracker.add_modifiers(&[Attribute::Humor, Attribute::Wealth], 0, 1, false),
        Err(GameError::InvalidDuration(0))
    );
    assert_eq!(
        tracker.add_modifier("humor", 1, 0, false),
        Err(GameError::ZeroMagnitude)
    );
    assert!(tracker.buffs().is_empty());
    assert!(tracker.storage().raw(StoreKey::Buffs).is_none());
}

#[test]
fn removing_an_expired_modifier_is_a_no_op() {
    let mut tracker = tracker();
    let id = tracker.add_modifier("determination", 1, 1, false).unwrap();
    tracker.start_turn().unwrap();
    tracker.end_turn().unwrap();
    assert!(tracker.buffs().is_empty());

    tracker.remove_modifier(id);
    tracker.remove_modifier(id);
    assert!(tracker.buffs().is_empty());
}

#[test]
fn unknown_attribute_names_leave_values_untouched() {
    let mut tracker = tracker();
    tracker.increment("humor").unwrap();

    assert_eq!(
        tracker.increment("charisma"),
        Err(GameError::InvalidAttribute("charisma".to_string()))
    );
    assert!(tracker.decrement("").is_err());
    assert_eq!(tracker.stats().get(Attribute::Humor), 1);
    assert_eq!(tracker.stats().iter().map(|(_, v)| v).sum::<i64>(), 1);
}

#[test]
fn statuses_and_items_are_added_and_removed_by_id() {
    let mut tracker = tracker();
    let status = tracker.add_status("Blessed", "", 2).unwrap();
    let rope = tracker.add_item("Rope", "50 feet");
    let lamp = tracker.add_item("Lamp", "");

    tracker.remove_status(status);
    tracker.remove_item(rope);
    tracker.remove_item(rope);

    assert!(tracker.statuses().is_empty());
    let titles: Vec<_> = tracker.inventory().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Lamp"]);
    assert_eq!(tracker.inventory().iter().next().map(|i| i.id), Some(lamp));
    assert!(tracker.add_status("Stunned", "", 0).is_err());
}

#[test]
fn reset_returns_every_store_to_its_default() {
    let mut tracker = tracker();
    tracker.increment("wealth").unwrap();
    tracker.add_modifier("wealth", 3, 1, false).unwrap();
    tracker.add_status("Cursed", "", 2).unwrap();
    tracker.add_item("Key", "");
    tracker.adjust_currency(120);
    tracker.start_turn().unwrap();

    tracker.reset_game();

    assert_eq!(tracker.game(), &GameState::default());
    assert_eq!(tracker.turn(), TurnState::NotMyTurn);
    assert_eq!(tracker.storage().raw(StoreKey::Money), Some("0"));
    assert_eq!(tracker.storage().raw(StoreKey::Buffs), Some("[]"));
    assert_eq!(tracker.storage().raw(StoreKey::IsMyTurn), Some("false"));

    let reloaded = Tracker::load(tracker.storage().clone(), &Settings::default());
    assert_eq!(reloaded.game(), &GameState::default());
}

#[test]
fn corrupt_store_falls_back_without_touching_the_rest() {
    let mut storage = MemoryStorage::new();
    storage.insert_raw(
        StoreKey::Stats,
        r#"{"determination":2,"humor":0,"intelligence":0,"appearance":0,"wealth":3}"#,
    );
    storage.insert_raw(StoreKey::Buffs, "not json at all");
    storage.insert_raw(StoreKey::Money, "75");

    let tracker = Tracker::load(storage, &Settings::default());

    assert_eq!(tracker.stats().get(Attribute::Determination), 2);
    assert_eq!(tracker.stats().get(Attribute::Wealth), 3);
    assert!(tracker.buffs().is_empty());
    assert_eq!(tracker.money().balance(), 75);
    assert_eq!(tracker.turn(), TurnState::NotMyTurn);
}

#[test]
fn state_survives_a_reload() {
    let mut tracker = tracker();
    tracker.increment("appearance").unwrap();
    tracker.add_modifier("appearance", 4, 2, false).unwrap();
    tracker.add_status("Hasted", "Extra move", 3).unwrap();
    tracker.add_item("Compass", "");
    tracker.adjust_currency(30);
    tracker.start_turn().unwrap();

    let reloaded = Tracker::load(tracker.storage().clone(), &Settings::default());

    assert_eq!(reloaded.stats(), tracker.stats());
    assert_eq!(reloaded.statuses(), tracker.statuses());
    assert_eq!(reloaded.inventory(), tracker.inventory());
    assert_eq!(reloaded.money().balance(), 30);
    assert_eq!(reloaded.turn(), TurnState::MyTurn);
    // Modifiers come back with fresh ids but the same content.
    let buff = reloaded.buffs().iter().next().unwrap();
    assert_eq!((buff.stat, buff.turns, buff.points), (Attribute::Appearance, 4, 2));
    assert_ne!(Some(buff.id), tracker.buffs().iter().next().map(|b| b.id));
}

#[test]
fn failed_writes_keep_the_in_memory_change() {
    let mut tracker = tracker();
    tracker.storage_mut().fail_writes = true;

    assert_eq!(tracker.adjust_currency(40), 40);
    tracker.increment("humor").unwrap();

    assert_eq!(tracker.money().balance(), 40);
    assert_eq!(tracker.stats().get(Attribute::Humor), 1);
    assert!(tracker.storage().raw(StoreKey::Money).is_none());
}

#[test]
fn commands_report_what_they_did() {
    let mut tracker = tracker();
    tracker.increment("wealth").unwrap();

    let message = Command::StartTurn.apply(&mut tracker).unwrap();
    assert_eq!(message, "Your turn! +10 money");

    let message = Command::AddModifiers {
        stats: vec![Attribute::Humor],
        turns: 1,
        amount: 1,
        debuff: false,
    }
    .apply(&mut tracker)
    .unwrap();
    assert_eq!(message, "Added 1 buff(s) for 1 turns");

    let message = Command::EndTurn.apply(&mut tracker).unwrap();
    assert_eq!(message, "Turn ended: 1 buff(s) and 0 status(es) expired");

    assert!(Command::EndTurn.apply(&mut tracker).is_err());
    assert_eq!(
        Command::ResetGame.apply(&mut tracker).unwrap(),
        "Game reset"
    );
}
