//! Status timing across ticks.
//!
//! Per-tick effects run for the statuses active when the tick starts, in id
//! order. A status given during tick N counts down from the end of tick
//! N + 1, so it is seen by `duration` ticks of events after the one that
//! gave it.

use phd_sim::{
    AttributeDefinition, ChoiceId, ChoiceOption, Effect, EventDefinition, GameConfig, GameData,
    GameEngine, ItemDefinition, ScriptedProxy, StatusDefinition, TriggerCondition,
};

fn engine_with(
    statuses: Vec<StatusDefinition>,
    events: Vec<EventDefinition>,
    proxy: ScriptedProxy,
) -> GameEngine<ScriptedProxy> {
    let data = GameData::new(
        vec![
            AttributeDefinition::new("hope", 50),
            AttributeDefinition::new("mood", 0),
        ],
        vec![ItemDefinition::new("paper", 0)],
        statuses,
        events,
        vec![],
    )
    .unwrap();

    let config = GameConfig::new("unused", "unused", "unused", "unused").with_seed(5);
    let mut engine = GameEngine::new(config, proxy);
    engine.load_with(data).unwrap();
    engine.start(false).unwrap();
    engine
}

fn hope(engine: &GameEngine<ScriptedProxy>) -> i64 {
    engine.variables().int_or("hope", 0)
}

/// Status effects run in id order, whatever order they were given in.
#[tokio::test]
async fn test_status_effects_run_in_id_order() {
    let mut engine = engine_with(
        vec![
            StatusDefinition::new("beta").with_effect(Effect::when(
                TriggerCondition::var_at_least("mood", 1),
                [Effect::set_var("mood", 2)],
                [Effect::set_var("mood", 10)],
            )),
            StatusDefinition::new("alpha").with_effect(Effect::set_var("mood", 1)),
        ],
        vec![EventDefinition::new("setup")
            .once()
            .with_effect(Effect::give_status("beta", None))
            .with_effect(Effect::give_status("alpha", None))],
        ScriptedProxy::new(),
    );

    engine.tick().await.unwrap();
    assert_eq!(engine.variables().int_or("mood", -1), 0);

    engine.tick().await.unwrap();
    assert_eq!(engine.variables().int_or("mood", -1), 2);
}

/// A status cleared by an earlier status in the same pass does not apply.
#[tokio::test]
async fn test_status_cleared_mid_pass_is_skipped() {
    let mut engine = engine_with(
        vec![
            StatusDefinition::new("relief").with_effect(Effect::clear_status("stress")),
            StatusDefinition::new("stress").with_effect(Effect::modify_var("hope", -10)),
        ],
        vec![EventDefinition::new("deadline")
            .once()
            .with_effect(Effect::give_status("stress", None))
            .with_effect(Effect::give_status("relief", Some(1)))],
        ScriptedProxy::new(),
    );

    engine.tick().await.unwrap();
    assert!(engine.public_state().has_status("stress"));

    let report = engine.tick().await.unwrap();
    assert_eq!(hope(&engine), 50);
    assert!(!engine.public_state().has_status("stress"));
    assert_eq!(report.expired, vec!["relief".to_string()]);
}

/// A status given by another status's effects starts applying next tick.
#[tokio::test]
async fn test_status_given_by_status_applies_next_tick() {
    let mut engine = engine_with(
        vec![
            StatusDefinition::new("mentor").with_effect(Effect::give_status("motivated", None)),
            StatusDefinition::new("motivated")
                .with_duration(1)
                .with_effect(Effect::modify_var("hope", 1)),
        ],
        vec![EventDefinition::new("meeting")
            .once()
            .with_effect(Effect::give_status("mentor", None))],
        ScriptedProxy::new(),
    );

    engine.tick().await.unwrap();
    let report = engine.tick().await.unwrap();
    assert_eq!(hope(&engine), 50);
    assert!(report.expired.is_empty());
    assert_eq!(engine.public_state().status_remaining("motivated"), Some(Some(1)));

    // Re-given every tick, so it never runs out.
    for expected in 51..=53 {
        let report = engine.tick().await.unwrap();
        assert_eq!(hope(&engine), expected);
        assert!(report.expired.is_empty());
    }
}

/// Events see a timed status for exactly `duration` ticks after it is given.
#[tokio::test]
async fn test_timed_status_visible_for_duration() {
    let mut engine = engine_with(
        vec![StatusDefinition::new("caffeinated").with_duration(2)],
        vec![
            EventDefinition::new("focus")
                .with_priority(1)
                .with_condition(TriggerCondition::has_status("caffeinated"))
                .with_effect(Effect::modify_var("hope", 3)),
            EventDefinition::new("coffee")
                .once()
                .with_effect(Effect::give_status("caffeinated", None)),
        ],
        ScriptedProxy::new(),
    );

    let report = engine.tick().await.unwrap();
    assert_eq!(report.fired, vec!["coffee".to_string()]);
    assert!(report.expired.is_empty());
    assert_eq!(engine.public_state().status_remaining("caffeinated"), Some(Some(2)));

    let report = engine.tick().await.unwrap();
    assert_eq!(report.fired, vec!["focus".to_string()]);
    assert!(report.expired.is_empty());

    let report = engine.tick().await.unwrap();
    assert_eq!(report.fired, vec!["focus".to_string()]);
    assert_eq!(report.expired, vec!["caffeinated".to_string()]);

    let report = engine.tick().await.unwrap();
    assert!(report.fired.is_empty());
    assert_eq!(hope(&engine), 56);
}

/// A one-tick status chosen in one month pays off in the next.
#[tokio::test]
async fn test_one_tick_status_reaches_next_choice() {
    let plan = EventDefinition::new("plan").with_effect(Effect::choice(
        "choice.month",
        [
            ChoiceOption::new(
                "choice.write",
                [
                    Effect::add_item("paper", 1),
                    Effect::when(
                        TriggerCondition::has_status("caffeinated"),
                        [Effect::modify_var("hope", 3)],
                        Vec::new(),
                    ),
                ],
            ),
            ChoiceOption::new("choice.coffee", [Effect::give_status("caffeinated", None)]),
        ],
    ));
    let mut engine = engine_with(
        vec![StatusDefinition::new("caffeinated").with_duration(1)],
        vec![plan],
        ScriptedProxy::with_script([ChoiceId::new(1), ChoiceId::new(0), ChoiceId::new(0)]),
    );

    let report = engine.tick().await.unwrap();
    assert!(report.expired.is_empty());
    assert!(engine.public_state().has_status("caffeinated"));

    let report = engine.tick().await.unwrap();
    assert_eq!(report.expired, vec!["caffeinated".to_string()]);
    assert_eq!(hope(&engine), 53);

    engine.tick().await.unwrap();
    assert_eq!(hope(&engine), 53);
    assert_eq!(engine.inventory().count("paper"), 2);
}
