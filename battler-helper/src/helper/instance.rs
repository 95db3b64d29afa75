use std::sync::{
    Arc,
    LazyLock,
    Mutex,
};

use anyhow::Result;
use itertools::Itertools;
use regex::Regex;

use crate::{
    common::{
        FastHashMap,
        Id,
        Identifiable,
    },
    config::{
        FormatDefinition,
        FormatDescriptor,
        FormatMask,
        FormatOptions,
        GameType,
    },
    engine::{
        ModDescriptor,
        SimulationEngine,
    },
    error::general_error,
};

type FormatCache = FastHashMap<GameType, FastHashMap<FormatMask, Arc<FormatDefinition>>>;

/// Helper scoped to one mod, or to one base format of the engine.
///
/// Custom formats derived through the helper are cached per game type and mask, so each one is
/// built and installed into the engine once.
pub struct HelperInstance {
    pub(crate) engine: Arc<dyn SimulationEngine>,
    module: ModDescriptor,
    base_format: Option<FormatDescriptor>,
    display_prefix: String,
    formats: Mutex<FormatCache>,
}

impl std::fmt::Debug for HelperInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelperInstance")
            .field("module", &self.module)
            .field("base_format", &self.base_format)
            .field("display_prefix", &self.display_prefix)
            .finish_non_exhaustive()
    }
}

impl HelperInstance {
    pub(crate) fn new(
        engine: Arc<dyn SimulationEngine>,
        module: ModDescriptor,
        base_format: Option<FormatDescriptor>,
    ) -> Self {
        let display_prefix = Self::display_prefix_for(&module, base_format.as_ref());
        Self {
            engine,
            module,
            base_format,
            display_prefix,
            formats: Mutex::new(FormatCache::default()),
        }
    }

    fn display_prefix_for(module: &ModDescriptor, base_format: Option<&FormatDescriptor>) -> String {
        static GENERATION_MOD: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^gen\d$").unwrap());
        match base_format
            .map(|format| format.name.as_str())
            .filter(|name| !name.is_empty())
        {
            Some(name) => format!("[{name}]"),
            None if module.is_base => String::new(),
            None if GENERATION_MOD.is_match(module.id.as_ref()) => {
                format!("[Gen {}]", module.generation)
            }
            None => format!("[{}]", module.id),
        }
    }

    /// The key the helper is registered under: the base format's ID, or the mod's ID.
    pub fn key(&self) -> &Id {
        self.base_format
            .as_ref()
            .map_or(&self.module.id, Identifiable::id)
    }

    /// ID of the mod the helper is scoped to.
    pub fn mod_id(&self) -> &Id {
        &self.module.id
    }

    /// The format custom formats are derived from, if any.
    pub fn base_format(&self) -> Option<&FormatDescriptor> {
        self.base_format.as_ref()
    }

    /// Prefix of all custom format names, such as `[Gen 4]`. Empty for the engine's base mod.
    pub fn display_prefix(&self) -> &str {
        &self.display_prefix
    }

    /// Gets the custom format described by the options, deriving and installing it on first use.
    ///
    /// Options with the same game type and active rule options always return the same shared
    /// definition. If installation fails, nothing is cached and the next call tries again.
    pub fn get_format(&self, options: &FormatOptions) -> Result<Arc<FormatDefinition>> {
        let mask = options.mask();
        let game_type = options.game_type.canonical();
        let mut formats = self
            .formats
            .lock()
            .map_err(|_| general_error("format cache lock is poisoned"))?;
        let bucket = formats.entry(game_type.clone()).or_default();
        if let Some(format) = bucket.get(&mask) {
            return Ok(format.clone());
        }

        let name = self.custom_format_name(&game_type, mask);
        let format = FormatDefinition::custom(
            name,
            self.module.id.clone(),
            self.base_format.as_ref(),
            options,
        );
        self.engine.install_format(&format)?;
        log::debug!("installed custom format {} ({})", format.id, format.name);

        let format = Arc::new(format);
        bucket.insert(mask, format.clone());
        Ok(format)
    }

    fn custom_format_name(&self, game_type: &GameType, mask: FormatMask) -> String {
        [
            self.display_prefix.clone(),
            game_type.name_prefix().unwrap_or_default(),
            "Custom Game".to_owned(),
            mask.to_string(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .join(" ")
    }
}
