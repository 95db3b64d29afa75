use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

use crate::{
    common::{
        Id,
        Identifiable,
    },
    config::{
        FormatMask,
        FormatOptions,
        GameType,
    },
};

/// The kind of entity stored in an engine's format registry.
///
/// Only [`EffectType::Format`] entities can serve as the base of a helper instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, SerializeLabeledStringEnum, DeserializeLabeledStringEnum,
)]
pub enum EffectType {
    #[string = "Format"]
    Format,
    #[string = "Rule"]
    Rule,
    #[string = "ValidatorRule"]
    ValidatorRule,
}

/// A format as it is stored in the engine's format registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatDescriptor {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    pub effect_type: EffectType,
    /// The mod the format is played under.
    #[serde(rename = "mod")]
    pub mod_id: Id,
    #[serde(default)]
    pub ruleset: Vec<String>,
    #[serde(default)]
    pub banlist: Vec<String>,
    /// Every other attribute, which this crate passes through untouched.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Identifiable for FormatDescriptor {
    fn id(&self) -> &Id {
        &self.id
    }
}

/// A custom format derived from a set of [`FormatOptions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatDefinition {
    pub id: Id,
    pub name: String,
    pub effect_type: EffectType,
    #[serde(rename = "mod")]
    pub mod_id: Id,
    pub mask: FormatMask,
    pub game_type: GameType,
    pub is_custom_game_format: bool,
    pub rated: bool,
    pub ruleset: Vec<String>,
    pub banlist: Vec<String>,
    /// Attributes inherited from the base format.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl FormatDefinition {
    /// Keys that a definition always sets itself, so they are never inherited.
    ///
    /// Keys are compared as IDs, so `gameType`, `game_type`, and `GameType` are all the same key.
    const OWN_KEYS: [&'static str; 11] = [
        "id",
        "name",
        "effecttype",
        "mod",
        "modid",
        "mask",
        "gametype",
        "iscustomgameformat",
        "rated",
        "ruleset",
        "banlist",
    ];

    fn is_own_key(key: &str) -> bool {
        let id = Id::from(key);
        let id: &str = id.as_ref();
        Self::OWN_KEYS.iter().any(|own| *own == id)
    }

    /// Derives a custom format.
    ///
    /// Attributes, ruleset, and banlist are copied from the base format when there is one. Tags
    /// for each active rule option are then appended in [`RuleOption::ALL`] order.
    ///
    /// [`RuleOption::ALL`]: crate::config::RuleOption::ALL
    pub fn custom(
        name: String,
        mod_id: Id,
        base: Option<&FormatDescriptor>,
        options: &FormatOptions,
    ) -> Self {
        let (mut ruleset, mut banlist, attributes) = match base {
            Some(base) => (
                base.ruleset.clone(),
                base.banlist.clone(),
                base.attributes
                    .iter()
                    .filter(|(key, _)| !Self::is_own_key(key))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ),
            None => (Vec::new(), Vec::new(), Map::new()),
        };
        for option in options.active_options() {
            ruleset.extend(option.ruleset_tags().iter().map(|tag| tag.to_string()));
            banlist.extend(option.banlist_tags().iter().map(|tag| tag.to_string()));
        }
        Self {
            id: Id::from(name.as_str()),
            name,
            effect_type: EffectType::Format,
            mod_id,
            mask: options.mask(),
            game_type: options.game_type.canonical(),
            is_custom_game_format: true,
            rated: false,
            ruleset,
            banlist,
            attributes,
        }
    }
}

impl Identifiable for FormatDefinition {
    fn id(&self) -> &Id {
        &self.id
    }
}

#[cfg(test)]
mod format_test {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::{
        common::Id,
        config::{
            EffectType,
            FormatDefinition,
            FormatDescriptor,
            FormatOptions,
            GameType,
            RuleOption,
        },
    };

    fn base_format() -> FormatDescriptor {
        serde_json::from_value(json!({
            "id": "gen4ou",
            "name": "Gen 4 OU",
            "effect_type": "Format",
            "mod": "gen4",
            "ruleset": ["Standard"],
            "banlist": ["Uber"],
            "search_show": true,
            "rated": true,
            "mask": 99,
        }))
        .unwrap()
    }

    #[test]
    fn appends_tags_in_fixed_order() {
        let options = FormatOptions::default()
            .with_option(RuleOption::Cancel)
            .with_option(RuleOption::SleepClause)
            .with_option(RuleOption::Preview)
            .with_option(RuleOption::Legality)
            .with_option(RuleOption::Pokemon);
        let format =
            FormatDefinition::custom("Custom Game 31".to_owned(), Id::from("base"), None, &options);
        assert_eq!(format.id, Id::from("customgame31"));
        assert_eq!(
            format.ruleset,
            vec!["Pokemon", "Team Preview", "Sleep Clause Mod", "Cancel Mod"]
        );
        assert_eq!(format.banlist, vec!["Illegal", "Unreleased"]);
        assert_eq!(format.mask.value(), 31);
        assert!(format.is_custom_game_format);
        assert!(!format.rated);
    }

    #[test]
    fn inherits_base_format_attributes() {
        let base = base_format();
        let options = FormatOptions::default()
            .with_game_type(GameType::Doubles)
            .with_option(RuleOption::Legality);
        let format = FormatDefinition::custom(
            "[Gen 4 OU] Doubles Custom Game 2".to_owned(),
            base.mod_id.clone(),
            Some(&base),
            &options,
        );
        assert_eq!(format.effect_type, EffectType::Format);
        assert_eq!(format.mod_id, Id::from("gen4"));
        assert_eq!(format.ruleset, vec!["Standard"]);
        assert_eq!(format.banlist, vec!["Uber", "Illegal", "Unreleased"]);
        assert_eq!(format.attributes.get("search_show"), Some(&json!(true)));
        assert!(!format.attributes.contains_key("rated"));
        assert!(!format.attributes.contains_key("mask"));

        // The base format is not modified.
        assert_eq!(base.banlist, vec!["Uber"]);
    }

    #[test]
    fn drops_overridden_attributes_in_any_case() {
        let base = serde_json::from_value::<FormatDescriptor>(json!({
            "id": "gen4doublesou",
            "name": "Gen 4 Doubles OU",
            "effect_type": "Format",
            "mod": "gen4",
            "gameType": "doubles",
            "isCustomGameFormat": false,
            "effectType": "Rule",
            "Rated": true,
            "modId": "gen3",
            "searchShow": false,
        }))
        .unwrap();
        let format = FormatDefinition::custom(
            "[Gen 4 Doubles OU] Custom Game 0".to_owned(),
            base.mod_id.clone(),
            Some(&base),
            &FormatOptions::default(),
        );
        assert_eq!(
            format.attributes.keys().collect::<Vec<_>>(),
            vec!["searchShow"]
        );

        let value = serde_json::to_value(&format).unwrap();
        assert_eq!(value["game_type"], json!("singles"));
        assert_eq!(value["is_custom_game_format"], json!(true));
        assert_eq!(value["rated"], json!(false));
        assert_eq!(value.get("gameType"), None);
        assert_eq!(value.get("isCustomGameFormat"), None);
    }

    #[test]
    fn serializes_overridden_attributes_once() {
        let base = base_format();
        let format = FormatDefinition::custom(
            "[Gen 4 OU] Custom Game 0".to_owned(),
            base.mod_id.clone(),
            Some(&base),
            &FormatOptions::default(),
        );
        let value = serde_json::to_value(&format).unwrap();
        assert_eq!(value["rated"], json!(false));
        assert_eq!(value["mask"], json!(0));
        assert_eq!(value["game_type"], json!("singles"));
        assert_eq!(value["id"], json!("gen4oucustomgame0"));
    }
}
