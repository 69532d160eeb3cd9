//! Engine action tests: purchases, clicks, ticks, fatigue, delivery.

use vibe_tycoon_core::{
    economy::MarketDirection,
    engine::GameEngine,
    event::{GameEvent, IgnoreReason},
    formulas,
    rng::ScriptedRng,
    state::{ActiveModal, SimulationState},
};

/// Apply `edit` to a copy of the engine's state and load it back.
fn edit_state(engine: &mut GameEngine, edit: impl FnOnce(&mut SimulationState)) {
    let mut state = engine.state().clone();
    edit(&mut state);
    engine.load_state(state).expect("load edited state");
}

fn ignore_reason(events: &[GameEvent]) -> Option<&IgnoreReason> {
    events.iter().find_map(|e| match e {
        GameEvent::ActionIgnored { reason, .. } => Some(reason),
        _ => None,
    })
}

#[test]
fn first_purchase_spends_everything_and_second_is_refused() {
    let (mut engine, _clock) = GameEngine::build_test(1);
    edit_state(&mut engine, |s| s.resource = 10.0);

    let events = engine.buy_automation("ai-assistant").unwrap();
    assert!(matches!(
        events[0],
        GameEvent::AutomationPurchased { new_level: 1, .. }
    ));
    assert_eq!(engine.state().resource, 0.0);
    assert_eq!(engine.state().automation("ai-assistant").unwrap().current_level, 1);

    let events = engine.buy_automation("ai-assistant").unwrap();
    assert_eq!(
        ignore_reason(&events),
        Some(&IgnoreReason::InsufficientResource { needed: 19.0, available: 0.0 })
    );
    assert_eq!(engine.state().automation("ai-assistant").unwrap().current_level, 1);
}

#[test]
fn unknown_automation_is_ignored() {
    let (mut engine, _clock) = GameEngine::build_test(1);
    let before = engine.state().clone();
    let events = engine.buy_automation("quantum-intern").unwrap();
    assert!(matches!(ignore_reason(&events), Some(IgnoreReason::UnknownAutomation { .. })));
    assert_eq!(engine.state(), &before);
}

#[test]
fn tick_accrues_proportionally_and_is_idempotent() {
    let (mut engine, clock) = GameEngine::build_test(2);
    edit_state(&mut engine, |s| s.resource = 10.0);
    engine.buy_automation("ai-assistant").unwrap();

    clock.advance(2_000);
    engine.tick().unwrap();
    let expected = formulas::production_rate(0.5, 1) * 2.0;
    assert!((engine.state().resource - expected).abs() < 1e-9);

    // Same timestamp: nothing more accrues.
    let events = engine.tick().unwrap();
    assert_eq!(events, vec![GameEvent::ProductionAccrued { elapsed_secs: 0.0, amount: 0.0 }]);
    assert!((engine.state().resource - expected).abs() < 1e-9);

    // A long gap accrues in one go.
    clock.advance(60_000);
    engine.tick().unwrap();
    let expected = formulas::production_rate(0.5, 1) * 62.0;
    assert!((engine.state().resource - expected).abs() < 1e-6);
}

#[test]
fn paused_time_does_not_accrue() {
    let (mut engine, clock) = GameEngine::build_test(3);
    edit_state(&mut engine, |s| s.resource = 10.0);
    engine.buy_automation("ai-assistant").unwrap();

    engine.set_paused(true).unwrap();
    clock.advance(5_000);
    let events = engine.tick().unwrap();
    assert_eq!(ignore_reason(&events), Some(&IgnoreReason::Paused));
    assert_eq!(engine.state().resource, 0.0);

    engine.set_paused(false).unwrap();
    engine.tick().unwrap();
    assert_eq!(engine.state().resource, 0.0);

    clock.advance(1_000);
    engine.tick().unwrap();
    assert!(engine.state().resource > 0.0);
}

#[test]
fn click_applies_gain_and_flips_market() {
    let (engine, _clock) = GameEngine::build_test(4);
    let mut engine = engine.with_random_source(Box::new(ScriptedRng::new([0.9])));

    let events = engine.click("code").unwrap();
    assert!(matches!(
        events[0],
        GameEvent::ButtonClicked { progress, resource_gain, .. } if progress == 2.0 && resource_gain == 2.0
    ));
    assert!(events.contains(&GameEvent::MarketMoved { direction: MarketDirection::Down }));

    let state = engine.state();
    assert_eq!(state.progress, 2.0);
    assert_eq!(state.resource, 2.0);
    assert_eq!(state.total_clicks, 1);
    assert_eq!(state.fatigue.fatigue_level, 1);
    assert_eq!(state.economy.market_direction, MarketDirection::Down);
}

#[test]
fn click_respects_cost_and_cooldown() {
    let (mut engine, clock) = GameEngine::build_test(5);

    let events = engine.click("lint").unwrap();
    assert_eq!(
        ignore_reason(&events),
        Some(&IgnoreReason::InsufficientResource { needed: 10.0, available: 0.0 })
    );

    edit_state(&mut engine, |s| s.resource = 10.0);
    engine.click("debug").unwrap();
    assert_eq!(engine.state().resource, 9.0);

    let events = engine.click("debug").unwrap();
    assert_eq!(ignore_reason(&events), Some(&IgnoreReason::Cooldown { remaining_ms: 500 }));

    clock.advance(500);
    let events = engine.click("debug").unwrap();
    assert!(ignore_reason(&events).is_none());
    assert_eq!(engine.state().total_clicks, 2);

    let events = engine.click("deploy").unwrap();
    assert!(matches!(ignore_reason(&events), Some(IgnoreReason::UnknownButton { .. })));
}

#[test]
fn exhaustion_rolls_the_day_and_pays_down_sleep_debt() {
    let (mut engine, _clock) = GameEngine::build_test(6);
    edit_state(&mut engine, |s| {
        s.fatigue.fatigue_level = 299;
        s.fatigue.sleep_debt = 50;
    });

    let events = engine.click("code").unwrap();
    assert!(events.contains(&GameEvent::DayStarted { day: 1, starting_fatigue: 50, automatic: true }));

    let fatigue = &engine.state().fatigue;
    assert_eq!(fatigue.fatigue_level, 50);
    assert_eq!(fatigue.day_count, 1);
    assert_eq!(fatigue.sleep_debt, 0);
}

#[test]
fn sleep_on_rent_day_charges_rent_into_debt() {
    let (mut engine, _clock) = GameEngine::build_test(7);
    edit_state(&mut engine, |s| {
        s.fatigue.day_count = 29;
        s.fatigue.fatigue_level = 120;
        s.fatigue.sleep_debt = 10;
    });

    let events = engine.sleep().unwrap();
    assert!(events.contains(&GameEvent::DayStarted { day: 30, starting_fatigue: 0, automatic: false }));
    assert!(events.contains(&GameEvent::RentCharged { day: 30, amount: 2000.0, cash: -800.0 }));

    let state = engine.state();
    assert_eq!(state.fatigue.fatigue_level, 0);
    assert_eq!(state.fatigue.sleep_debt, 0);
    assert!(state.economy.is_in_debt());

    let events = engine.sleep().unwrap();
    assert!(!events.iter().any(|e| matches!(e, GameEvent::RentCharged { .. })));
}

#[test]
fn delivery_in_a_down_market_pays_within_range() {
    let (mut engine, _clock) = GameEngine::build_test(8);
    edit_state(&mut engine, |s| {
        s.progress = 100.0;
        s.economy.market_direction = MarketDirection::Down;
    });
    let old_name = engine.state().project_name.clone();

    let events = engine.deliver_app().unwrap();
    let payment = match &events[0] {
        GameEvent::AppDelivered { payment, market, completed_level, project_name, .. } => {
            assert_eq!(*market, MarketDirection::Down);
            assert_eq!(*completed_level, 1);
            assert_eq!(project_name, &old_name);
            *payment
        }
        other => panic!("expected delivery, got {other:?}"),
    };
    assert!((300.0..=594.0).contains(&payment), "payment {payment} out of range");

    let state = engine.state();
    assert_eq!(state.progress, 0.0);
    assert_eq!(state.level, 2);
    assert_eq!(state.total_apps_delivered, 1);
    assert_eq!(state.economy.cash, 1200.0 + payment);
    assert_eq!(state.economy.last_payment, payment);
    assert_eq!(state.prestige_multiplier, formulas::prestige_multiplier(1));
    assert!(!state.events.triggered_first && !state.events.triggered_second);

    // Same seed, same payment.
    let (mut twin, _clock) = GameEngine::build_test(8);
    edit_state(&mut twin, |s| {
        s.progress = 100.0;
        s.economy.market_direction = MarketDirection::Down;
    });
    let twin_events = twin.deliver_app().unwrap();
    assert_eq!(events, twin_events);
}

#[test]
fn unfinished_project_cannot_be_delivered() {
    let (mut engine, _clock) = GameEngine::build_test(8);
    edit_state(&mut engine, |s| s.progress = 99.5);
    let before = engine.state().clone();

    let events = engine.deliver_app().unwrap();
    assert_eq!(ignore_reason(&events), Some(&IgnoreReason::ProjectIncomplete { progress: 99.5 }));
    assert_eq!(engine.state(), &before);
    assert_eq!(engine.state().economy.cash, 1200.0);
    assert_eq!(engine.state().total_apps_delivered, 0);
}

#[test]
fn delivery_relabels_buttons_for_the_next_project() {
    let (mut engine, _clock) = GameEngine::build_test(9);
    edit_state(&mut engine, |s| s.progress = 100.0);
    engine.deliver_app().unwrap();

    let state = engine.state();
    let labels = vibe_tycoon_core::procedural::ProjectGenerator::button_labels(&state.project_name);
    for (i, button) in state.action_buttons.iter().enumerate() {
        assert_eq!(button.label, labels[i % labels.len()].to_string());
    }

    let slug = vibe_tycoon_core::procedural::ProjectGenerator::slug(&state.project_name);
    assert_eq!(engine.file_tree().path, format!("/projects/{slug}"));
}

#[test]
fn saturating_click_delivers_immediately() {
    let (mut engine, _clock) = GameEngine::build_test(10);
    edit_state(&mut engine, |s| {
        s.progress = 99.0;
        s.events.triggered_first = true;
        s.events.triggered_second = true;
    });

    let events = engine.click("code").unwrap();
    assert!(events.iter().any(|e| matches!(e, GameEvent::AppDelivered { .. })));
    assert_eq!(engine.state().level, 2);
    assert_eq!(engine.state().progress, 0.0);
    assert_ne!(engine.state().events.active_modal, ActiveModal::Bugs);
}

#[test]
fn click_lines_are_staggered_through_the_display_queue() {
    let (mut engine, clock) = GameEngine::build_test(11);
    engine.click("code").unwrap();

    let first = engine.take_due_lines();
    assert_eq!(first.len(), 1);
    assert!(engine.pending_lines() > 0);

    clock.advance(10_000);
    let rest = engine.take_due_lines();
    assert!(!rest.is_empty());
    assert_eq!(engine.pending_lines(), 0);
    assert!(rest.iter().any(|l| l.text.starts_with("$ git commit")));
}
