use std::{
    sync::Arc,
    thread,
};

use assert_matches::assert_matches;
use battler_helper::{
    FormatService,
    FormatServiceOptions,
    Id,
    error::UnknownModError,
};
use battler_helper_test_utils::{
    TestEngine,
    assert_error_message,
};
use pretty_assertions::assert_eq;

fn service() -> FormatService {
    FormatService::new(Arc::new(TestEngine::new()), FormatServiceOptions::default()).unwrap()
}

#[test]
fn default_instance_is_bound_to_base_mod() {
    let service = service();
    let instance = service.default_instance();
    assert_eq!(instance.mod_id(), &Id::from("base"));
    assert_eq!(instance.display_prefix(), "");
    assert!(instance.base_format().is_none());
    assert!(Arc::ptr_eq(&service.resolve("base").unwrap(), &instance));
}

#[test]
fn generation_and_mod_keys_resolve_to_same_instance() {
    let service = service();
    let by_generation = service.resolve_generation(7).unwrap();
    let by_key = service.resolve("gen7").unwrap();
    assert!(Arc::ptr_eq(&by_generation, &by_key));
    assert!(Arc::ptr_eq(&by_key, &service.default_instance()));

    let gen4 = service.resolve_generation(4).unwrap();
    assert!(Arc::ptr_eq(&gen4, &service.resolve("gen4").unwrap()));
    assert!(Arc::ptr_eq(&gen4, &service.resolve("Gen 4").unwrap()));
    assert!(!Arc::ptr_eq(&gen4, &by_key));
}

#[test]
fn mod_instances_have_display_prefix() {
    let service = service();
    assert_eq!(service.resolve("gen4").unwrap().display_prefix(), "[Gen 4]");
    assert_eq!(service.resolve("gen1").unwrap().display_prefix(), "[Gen 1]");
    assert_eq!(
        service.resolve("letsgo").unwrap().display_prefix(),
        "[letsgo]"
    );
}

#[test]
fn format_key_resolves_to_base_format_instance() {
    let service = service();
    let instance = service.resolve("gen4ou").unwrap();
    assert_eq!(instance.mod_id(), &Id::from("gen4"));
    assert_eq!(instance.display_prefix(), "[Gen 4 OU]");
    assert_eq!(
        instance.base_format().map(|format| format.name.as_str()),
        Some("Gen 4 OU")
    );
    assert!(Arc::ptr_eq(&instance, &service.resolve("Gen 4 OU").unwrap()));

    // The format's mod is a separate instance.
    assert!(!Arc::ptr_eq(&instance, &service.resolve("gen4").unwrap()));
}

#[test]
fn rejects_registry_entries_that_are_not_formats() {
    let service = service();
    let result = service.resolve("Sleep Clause Mod");
    assert_matches!(
        result.as_ref().map_err(|err| err.downcast_ref::<UnknownModError>()),
        Err(Some(UnknownModError { key })) => {
            assert_eq!(key, "Sleep Clause Mod");
        }
    );
}

#[test]
fn rejects_unknown_keys() {
    let service = service();
    assert_error_message(service.resolve("gen9"), "mod gen9 does not exist");
    assert_error_message(service.resolve_generation(8), "mod gen8 does not exist");

    // Failures are not remembered.
    assert_error_message(service.resolve("gen9"), "mod gen9 does not exist");
}

#[test]
fn fails_without_base_mod() {
    let result = FormatService::new(
        Arc::new(TestEngine::new()),
        FormatServiceOptions {
            base_mod: "missing".to_owned(),
            base_mod_aliases: Vec::new(),
        },
    );
    assert_error_message(result, "base mod missing not found");
}

#[test]
fn aliases_are_configurable() {
    let service = FormatService::new(
        Arc::new(TestEngine::new()),
        FormatServiceOptions {
            base_mod: "base".to_owned(),
            base_mod_aliases: vec!["current".to_owned()],
        },
    )
    .unwrap();
    assert!(Arc::ptr_eq(
        &service.resolve("current").unwrap(),
        &service.default_instance()
    ));

    // Without the alias, gen7 is its own mod.
    let gen7 = service.resolve("gen7").unwrap();
    assert!(!Arc::ptr_eq(&gen7, &service.default_instance()));
    assert_eq!(gen7.display_prefix(), "[Gen 7]");
}

#[test]
fn concurrent_resolution_creates_one_instance() {
    let service = service();
    let instances = thread::scope(|scope| {
        let handles = (0..8)
            .map(|_| scope.spawn(|| service.resolve("gen3").unwrap()))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });
    for instance in &instances {
        assert!(Arc::ptr_eq(instance, &instances[0]));
    }
}
