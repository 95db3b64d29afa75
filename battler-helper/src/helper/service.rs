use std::sync::{
    Arc,
    Mutex,
};

use anyhow::Result;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    common::{
        FastHashMap,
        Id,
    },
    config::EffectType,
    engine::SimulationEngine,
    error::{
        WrapOptionError,
        general_error,
        unknown_mod_error,
    },
    helper::HelperInstance,
};

/// Options for a [`FormatService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatServiceOptions {
    /// The mod the default instance is bound to.
    #[serde(default = "default_base_mod")]
    pub base_mod: String,
    /// Additional keys the default instance is registered under.
    #[serde(default = "default_base_mod_aliases")]
    pub base_mod_aliases: Vec<String>,
}

fn default_base_mod() -> String {
    "base".to_owned()
}

fn default_base_mod_aliases() -> Vec<String> {
    vec!["gen7".to_owned()]
}

impl Default for FormatServiceOptions {
    fn default() -> Self {
        Self {
            base_mod: default_base_mod(),
            base_mod_aliases: default_base_mod_aliases(),
        }
    }
}

/// Registry of [`HelperInstance`]s, keyed by mod or base format ID.
///
/// Each key is resolved against the engine once. Later lookups of the same key return the same
/// instance, and with it the same cache of custom formats.
pub struct FormatService {
    engine: Arc<dyn SimulationEngine>,
    default_instance: Arc<HelperInstance>,
    instances: Mutex<FastHashMap<Id, Arc<HelperInstance>>>,
}

impl FormatService {
    /// Creates a new service, binding the default instance to the configured base mod.
    pub fn new(engine: Arc<dyn SimulationEngine>, options: FormatServiceOptions) -> Result<Self> {
        let base_mod = Id::from(options.base_mod.as_str());
        let module = engine
            .get_mod(&base_mod)?
            .wrap_not_found_error_with_format(format_args!("base mod {base_mod}"))?;
        let default_instance = Arc::new(HelperInstance::new(engine.clone(), module, None));
        log::info!("created default helper for mod {}", default_instance.mod_id());

        let mut instances = FastHashMap::default();
        instances.insert(default_instance.key().clone(), default_instance.clone());
        for alias in &options.base_mod_aliases {
            instances.insert(Id::from(alias.as_str()), default_instance.clone());
        }

        Ok(Self {
            engine,
            default_instance,
            instances: Mutex::new(instances),
        })
    }

    /// The instance bound to the engine's base mod.
    pub fn default_instance(&self) -> Arc<HelperInstance> {
        self.default_instance.clone()
    }

    /// Resolves a mod name or format ID to its helper instance.
    ///
    /// Mods take precedence over formats. A format key only resolves if the registry entry is an
    /// actual [`EffectType::Format`], in which case the instance derives custom formats from it.
    pub fn resolve(&self, key: &str) -> Result<Arc<HelperInstance>> {
        let id = Id::from(key);
        let mut instances = self
            .instances
            .lock()
            .map_err(|_| general_error("helper registry lock is poisoned"))?;
        if let Some(instance) = instances.get(&id) {
            return Ok(instance.clone());
        }

        if let Some(module) = self.engine.get_mod(&id)? {
            let instance = Arc::new(HelperInstance::new(self.engine.clone(), module, None));
            log::info!("created helper for mod {}", instance.mod_id());
            instances.insert(instance.key().clone(), instance.clone());
            return Ok(instance);
        }

        let format = match self.engine.get_format(&id)? {
            Some(format) if format.effect_type == EffectType::Format => format,
            _ => return Err(unknown_mod_error(key)),
        };
        if let Some(instance) = instances.get(&format.id) {
            return Ok(instance.clone());
        }
        let module = self
            .engine
            .get_mod(&format.mod_id)?
            .wrap_not_found_error_with_format(format_args!(
                "mod {} of format {}",
                format.mod_id, format.id
            ))?;
        let instance = Arc::new(HelperInstance::new(
            self.engine.clone(),
            module,
            Some(format),
        ));
        log::info!(
            "created helper for format {} in mod {}",
            instance.key(),
            instance.mod_id()
        );
        instances.insert(instance.key().clone(), instance.clone());
        Ok(instance)
    }

    /// Resolves the helper instance for a generation, such as `gen4` for generation 4.
    pub fn resolve_generation(&self, generation: u8) -> Result<Arc<HelperInstance>> {
        self.resolve(&format!("gen{generation}"))
    }
}
