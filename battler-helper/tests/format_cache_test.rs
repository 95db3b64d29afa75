use std::{
    sync::Arc,
    thread,
};

use battler_helper::{
    FormatOptions,
    FormatService,
    FormatServiceOptions,
    GameType,
    Id,
    RuleOption,
    SimulationEngine,
};
use battler_helper_test_utils::{
    TestEngine,
    assert_error_message,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn setup() -> (Arc<TestEngine>, FormatService) {
    let engine = Arc::new(TestEngine::new());
    let service = FormatService::new(engine.clone(), FormatServiceOptions::default()).unwrap();
    (engine, service)
}

fn options(value: serde_json::Value) -> FormatOptions {
    serde_json::from_value(value).unwrap()
}

#[test]
fn equivalent_options_share_one_definition() {
    let (engine, service) = setup();
    let instance = service.default_instance();
    let first = instance
        .get_format(
            &FormatOptions::default()
                .with_option(RuleOption::SleepClause)
                .with_option(RuleOption::Pokemon),
        )
        .unwrap();
    let second = instance
        .get_format(&options(json!({
            "sleepClause": 1,
            "pokemon": "yes",
            "cancel": false,
            "unknown": true,
        })))
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.name, "Custom Game 9");
    assert_eq!(first.id, Id::from("customgame9"));
    assert_eq!(engine.install_attempts(), 1);
    assert_eq!(engine.installed_formats(), vec![(*first).clone()]);
}

#[test]
fn empty_options_are_singles_with_empty_mask() {
    let (_, service) = setup();
    let instance = service.default_instance();
    let empty = instance.get_format(&FormatOptions::default()).unwrap();
    let singles = instance
        .get_format(&options(json!({ "gameType": "singles" })))
        .unwrap();
    assert!(Arc::ptr_eq(&empty, &singles));
    assert_eq!(empty.mask.value(), 0);
    assert_eq!(empty.game_type, GameType::Singles);
    assert_eq!(empty.name, "Custom Game 0");
    assert!(empty.ruleset.is_empty());
    assert!(empty.banlist.is_empty());
    assert!(empty.is_custom_game_format);
    assert!(!empty.rated);
}

#[test]
fn name_ends_with_decimal_mask() {
    let (_, service) = setup();
    let instance = service.resolve("gen4").unwrap();
    let format = instance
        .get_format(&options(json!({
            "cancel": true,
            "preview": true,
            "legality": true,
            "gameType": "Doubles",
        })))
        .unwrap();
    assert_eq!(format.name, "[Gen 4] Doubles Custom Game 22");
    assert_eq!(format.id, Id::from("gen4doublescustomgame22"));
    assert_eq!(format.mod_id, Id::from("gen4"));
    assert_eq!(format.ruleset, vec!["Team Preview", "Cancel Mod"]);
    assert_eq!(format.banlist, vec!["Illegal", "Unreleased"]);
}

#[test]
fn game_types_are_cached_separately() {
    let (engine, service) = setup();
    let instance = service.default_instance();
    let singles = instance
        .get_format(&FormatOptions::default().with_option(RuleOption::Pokemon))
        .unwrap();
    let triples = instance
        .get_format(
            &FormatOptions::default()
                .with_game_type(GameType::Triples)
                .with_option(RuleOption::Pokemon),
        )
        .unwrap();
    assert!(!Arc::ptr_eq(&singles, &triples));
    assert_eq!(singles.name, "Custom Game 1");
    assert_eq!(triples.name, "Triples Custom Game 1");
    assert_eq!(engine.install_attempts(), 2);
}

#[test]
fn unknown_game_types_are_kept() {
    let (_, service) = setup();
    let format = service
        .default_instance()
        .get_format(&options(json!({ "gameType": "Rotation" })))
        .unwrap();
    assert_eq!(format.game_type, GameType::Other(Id::from("rotation")));
    assert_eq!(format.name, "Rotation Custom Game 0");
}

#[test]
fn other_game_types_naming_known_ones_share_definitions() {
    let (engine, service) = setup();
    let instance = service.default_instance();
    let doubles = instance
        .get_format(&FormatOptions::default().with_game_type(GameType::Doubles))
        .unwrap();
    let other_doubles = instance
        .get_format(
            &FormatOptions::default().with_game_type(GameType::Other(Id::from("Doubles"))),
        )
        .unwrap();
    let other_empty = instance
        .get_format(&FormatOptions::default().with_game_type(GameType::Other(Id::from(""))))
        .unwrap();
    let singles = instance.get_format(&FormatOptions::default()).unwrap();

    assert!(Arc::ptr_eq(&doubles, &other_doubles));
    assert!(Arc::ptr_eq(&other_empty, &singles));
    assert_eq!(doubles.game_type, GameType::Doubles);
    assert_eq!(singles.game_type, GameType::Singles);
    assert_eq!(
        engine
            .installed_formats()
            .into_iter()
            .map(|format| format.id.to_string())
            .collect::<Vec<_>>(),
        vec!["doublescustomgame0", "customgame0"]
    );
    assert_eq!(engine.install_attempts(), 2);
}

#[test]
fn inherits_from_base_format_without_modifying_it() {
    let (engine, service) = setup();
    let instance = service.resolve("gen4ou").unwrap();
    let legal = instance
        .get_format(&FormatOptions::default().with_option(RuleOption::Legality))
        .unwrap();
    assert_eq!(legal.name, "[Gen 4 OU] Custom Game 2");
    assert_eq!(legal.mod_id, Id::from("gen4"));
    assert_eq!(legal.ruleset, vec!["Standard"]);
    assert_eq!(legal.banlist, vec!["Uber", "Illegal", "Unreleased"]);
    assert_eq!(legal.attributes.get("searchShow"), Some(&json!(true)));
    assert!(!legal.rated);

    let pokemon = instance
        .get_format(&FormatOptions::default().with_option(RuleOption::Pokemon))
        .unwrap();
    assert_eq!(pokemon.ruleset, vec!["Standard", "Pokemon"]);
    assert_eq!(pokemon.banlist, vec!["Uber"]);

    let base = engine.get_format(&Id::from("gen4ou")).unwrap().unwrap();
    assert_eq!(base.ruleset, vec!["Standard"]);
    assert_eq!(base.banlist, vec!["Uber"]);
    assert_eq!(
        instance.base_format().map(|format| format.banlist.clone()),
        Some(vec!["Uber".to_owned()])
    );
}

#[test]
fn instances_do_not_share_caches() {
    let (engine, service) = setup();
    let options = FormatOptions::default().with_option(RuleOption::Cancel);
    let from_mod = service.resolve("gen4").unwrap().get_format(&options).unwrap();
    let from_format = service
        .resolve("gen4ou")
        .unwrap()
        .get_format(&options)
        .unwrap();
    assert!(!Arc::ptr_eq(&from_mod, &from_format));
    assert_eq!(from_mod.name, "[Gen 4] Custom Game 16");
    assert_eq!(from_format.name, "[Gen 4 OU] Custom Game 16");
    assert_eq!(engine.install_attempts(), 2);
}

#[test]
fn failed_installation_is_not_cached() {
    let (engine, service) = setup();
    let instance = service.default_instance();
    let options = FormatOptions::default().with_option(RuleOption::Pokemon);

    engine.set_fail_installs(true);
    assert_error_message(
        instance.get_format(&options),
        "format customgame1 could not be installed",
    );
    assert!(engine.installed_formats().is_empty());

    engine.set_fail_installs(false);
    let format = instance.get_format(&options).unwrap();
    assert_eq!(format.id, Id::from("customgame1"));
    assert_eq!(engine.install_attempts(), 2);
    assert_eq!(engine.installed_formats().len(), 1);
}

#[test]
fn concurrent_lookups_install_once() {
    let (engine, service) = setup();
    let instance = service.resolve("gen5").unwrap();
    let options = FormatOptions::default()
        .with_game_type(GameType::Doubles)
        .with_option(RuleOption::Preview);
    let formats = thread::scope(|scope| {
        let handles = (0..8)
            .map(|_| scope.spawn(|| instance.get_format(&options).unwrap()))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });
    for format in &formats {
        assert!(Arc::ptr_eq(format, &formats[0]));
    }
    assert_eq!(formats[0].name, "[Gen 5] Doubles Custom Game 4");
    assert_eq!(engine.install_attempts(), 1);
}
