use std::sync::{
    Arc,
    Mutex,
    atomic::{
        AtomicBool,
        AtomicUsize,
        Ordering,
    },
};

use ahash::HashMap;
use anyhow::Result;
use battler_helper::{
    Id,
    config::{
        EffectType,
        FormatDefinition,
        FormatDescriptor,
    },
    engine::{
        BattleSession,
        BattleSessionOptions,
        ModDescriptor,
        SimulationEngine,
    },
    error::{
        general_error,
        not_found_error,
    },
};
use serde_json::{
    Map,
    Value,
    json,
};

use crate::TestBattle;

/// An in-memory [`SimulationEngine`] for tests.
///
/// Records every format installation and every seated side, so tests can observe what the helper
/// asked of the engine.
pub struct TestEngine {
    mods: HashMap<Id, ModDescriptor>,
    formats: HashMap<Id, FormatDescriptor>,
    installed: Mutex<Vec<FormatDefinition>>,
    install_attempts: AtomicUsize,
    fail_installs: AtomicBool,
    battles_created: AtomicUsize,
    sides_seated: Arc<AtomicUsize>,
}

impl TestEngine {
    /// Creates an engine with the default test data.
    pub fn new() -> Self {
        TestEngineBuilder::new().with_default_data().build()
    }

    /// Creates a builder for an engine with custom data.
    pub fn builder() -> TestEngineBuilder {
        TestEngineBuilder::new()
    }

    /// Formats successfully installed so far, in order.
    pub fn installed_formats(&self) -> Vec<FormatDefinition> {
        self.installed
            .lock()
            .map(|installed| installed.clone())
            .unwrap_or_default()
    }

    /// Number of times a format installation was requested, including failed ones.
    pub fn install_attempts(&self) -> usize {
        self.install_attempts.load(Ordering::SeqCst)
    }

    /// Makes every following installation fail, or succeed again.
    pub fn set_fail_installs(&self, fail: bool) {
        self.fail_installs.store(fail, Ordering::SeqCst);
    }

    /// Number of battles created.
    pub fn battles_created(&self) -> usize {
        self.battles_created.load(Ordering::SeqCst)
    }

    /// Number of sides seated across all battles.
    pub fn sides_seated(&self) -> usize {
        self.sides_seated.load(Ordering::SeqCst)
    }
}

impl Default for TestEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationEngine for TestEngine {
    fn get_mod(&self, id: &Id) -> Result<Option<ModDescriptor>> {
        Ok(self.mods.get(id).cloned())
    }

    fn get_format(&self, id: &Id) -> Result<Option<FormatDescriptor>> {
        Ok(self.formats.get(id).cloned())
    }

    fn install_format(&self, format: &FormatDefinition) -> Result<()> {
        self.install_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_installs.load(Ordering::SeqCst) {
            return Err(general_error(format!(
                "format {} could not be installed",
                format.id
            )));
        }
        self.installed
            .lock()
            .map_err(|_| general_error("installed formats lock is poisoned"))?
            .push(format.clone());
        Ok(())
    }

    fn create_battle(&self, options: BattleSessionOptions) -> Result<Box<dyn BattleSession>> {
        let format = self
            .installed
            .lock()
            .map_err(|_| general_error("installed formats lock is poisoned"))?
            .iter()
            .find(|format| format.id == options.format_id)
            .cloned()
            .ok_or_else(|| not_found_error(format!("format {}", options.format_id)))?;
        self.battles_created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TestBattle::new(
            &format,
            options.seed,
            self.sides_seated.clone(),
        )))
    }
}

/// Builder for a [`TestEngine`].
pub struct TestEngineBuilder {
    mods: HashMap<Id, ModDescriptor>,
    formats: HashMap<Id, FormatDescriptor>,
}

impl TestEngineBuilder {
    fn new() -> Self {
        Self {
            mods: HashMap::default(),
            formats: HashMap::default(),
        }
    }

    /// Adds the default test data:
    ///
    /// - The `base` mod (generation 7).
    /// - Mods `gen1` through `gen7`.
    /// - The `letsgo` mod, which is not named after a generation.
    /// - The `gen4ou` format in `gen4`.
    /// - The `sleepclausemod` rule, which is not a format.
    pub fn with_default_data(self) -> Self {
        let mut builder = self.with_mod("base", 7, true);
        for generation in 1..=7 {
            builder = builder.with_mod(&format!("gen{generation}"), generation, false);
        }
        builder
            .with_mod("letsgo", 7, false)
            .with_format(
                "Gen 4 OU",
                EffectType::Format,
                "gen4",
                json!({
                    "ruleset": ["Standard"],
                    "banlist": ["Uber"],
                    "searchShow": true,
                }),
            )
            .with_format(
                "Sleep Clause Mod",
                EffectType::Rule,
                "base",
                json!({}),
            )
    }

    /// Adds a mod.
    pub fn with_mod(mut self, id: &str, generation: u8, is_base: bool) -> Self {
        let id = Id::from(id);
        self.mods.insert(
            id.clone(),
            ModDescriptor {
                id,
                generation,
                is_base,
            },
        );
        self
    }

    /// Adds an entry to the format registry, keyed by the ID of its name.
    ///
    /// `attributes` must be a JSON object. Its `ruleset` and `banlist` become the format's lists;
    /// all other keys are kept as attributes.
    pub fn with_format(
        mut self,
        name: &str,
        effect_type: EffectType,
        mod_id: &str,
        attributes: Value,
    ) -> Self {
        let mut attributes = match attributes {
            Value::Object(attributes) => attributes,
            _ => Map::new(),
        };
        let mut take_list = |key: &str| -> Vec<String> {
            match attributes.remove(key) {
                Some(Value::Array(values)) => values
                    .into_iter()
                    .filter_map(|value| value.as_str().map(str::to_owned))
                    .collect(),
                _ => Vec::new(),
            }
        };
        let ruleset = take_list("ruleset");
        let banlist = take_list("banlist");
        let format = FormatDescriptor {
            id: Id::from(name),
            name: name.to_owned(),
            effect_type,
            mod_id: Id::from(mod_id),
            ruleset,
            banlist,
            attributes,
        };
        self.formats.insert(format.id.clone(), format);
        self
    }

    /// Builds the engine.
    pub fn build(self) -> TestEngine {
        TestEngine {
            mods: self.mods,
            formats: self.formats,
            installed: Mutex::new(Vec::new()),
            install_attempts: AtomicUsize::new(0),
            fail_installs: AtomicBool::new(false),
            battles_created: AtomicUsize::new(0),
            sides_seated: Arc::new(AtomicUsize::new(0)),
        }
    }
}
