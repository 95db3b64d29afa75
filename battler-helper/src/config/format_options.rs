use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};
use serde_json::Value;

use crate::{
    common::Id,
    config::{
        FormatMask,
        GameType,
        RuleOption,
        is_truthy,
        truthy::deserialize_truthy,
    },
};

/// Options describing a custom format.
///
/// Keys are camelCase on the wire (`gameType`, `sleepClause`). Toggles accept any JSON value and
/// are on when the value is truthy. Unknown keys are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
    /// The type of battle. Selects the cache bucket; never part of the mask.
    #[serde(default, deserialize_with = "deserialize_game_type")]
    pub game_type: GameType,
    /// Adds the `Pokemon` rule.
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub pokemon: bool,
    /// Bans illegal and unreleased content.
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub legality: bool,
    /// Adds the `Team Preview` rule.
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub preview: bool,
    /// Adds the `Sleep Clause Mod` rule.
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub sleep_clause: bool,
    /// Adds the `Cancel Mod` rule.
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub cancel: bool,
}

impl FormatOptions {
    /// Sets the game type.
    pub fn with_game_type(mut self, game_type: GameType) -> Self {
        self.game_type = game_type;
        self
    }

    /// Turns on a rule option.
    pub fn with_option(mut self, option: RuleOption) -> Self {
        match option {
            RuleOption::Pokemon => self.pokemon = true,
            RuleOption::Legality => self.legality = true,
            RuleOption::Preview => self.preview = true,
            RuleOption::SleepClause => self.sleep_clause = true,
            RuleOption::Cancel => self.cancel = true,
        }
        self
    }

    /// Checks if a rule option is on.
    pub fn is_active(&self, option: RuleOption) -> bool {
        match option {
            RuleOption::Pokemon => self.pokemon,
            RuleOption::Legality => self.legality,
            RuleOption::Preview => self.preview,
            RuleOption::SleepClause => self.sleep_clause,
            RuleOption::Cancel => self.cancel,
        }
    }

    /// Active rule options, in tag application order.
    pub fn active_options(&self) -> impl Iterator<Item = RuleOption> + '_ {
        RuleOption::ALL
            .into_iter()
            .filter(|option| self.is_active(*option))
    }

    /// The mask of active rule options.
    pub fn mask(&self) -> FormatMask {
        self.active_options().collect()
    }
}

fn deserialize_game_type<'de, D>(deserializer: D) -> Result<GameType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !is_truthy(&value) {
        return Ok(GameType::default());
    }
    Ok(match value {
        Value::String(game_type) => GameType::from(Id::from(game_type)),
        other => GameType::from(Id::from(other.to_string())),
    })
}

#[cfg(test)]
mod format_options_test {
    use pretty_assertions::assert_eq;

    use crate::{
        common::Id,
        config::{
            FormatOptions,
            GameType,
            RuleOption,
        },
    };

    #[test]
    fn computes_mask_from_flags() {
        assert_eq!(FormatOptions::default().mask().value(), 0);
        let options = FormatOptions::default()
            .with_option(RuleOption::Cancel)
            .with_option(RuleOption::Pokemon)
            .with_option(RuleOption::Preview);
        assert_eq!(options.mask().value(), 21);
        assert_eq!(
            options.active_options().collect::<Vec<_>>(),
            vec![RuleOption::Pokemon, RuleOption::Preview, RuleOption::Cancel]
        );
    }

    #[test]
    fn deserializes_camel_case_keys() {
        let options = serde_json::from_str::<FormatOptions>(
            r#"{
                "gameType": "Doubles",
                "sleepClause": true,
                "legality": 1,
                "preview": "",
                "unknown": true
            }"#,
        )
        .unwrap();
        assert_eq!(
            options,
            FormatOptions::default()
                .with_game_type(GameType::Doubles)
                .with_option(RuleOption::SleepClause)
                .with_option(RuleOption::Legality)
        );
        assert_eq!(options.mask().value(), 10);
    }

    #[test]
    fn falsy_game_type_defaults_to_singles() {
        let options = serde_json::from_str::<FormatOptions>(r#"{"gameType": null}"#).unwrap();
        assert_eq!(options.game_type, GameType::Singles);
        let options = serde_json::from_str::<FormatOptions>(r#"{"gameType": ""}"#).unwrap();
        assert_eq!(options.game_type, GameType::Singles);
    }

    #[test]
    fn keeps_unknown_game_type() {
        let options =
            serde_json::from_str::<FormatOptions>(r#"{"gameType": "Rotation"}"#).unwrap();
        assert_eq!(options.game_type, GameType::Other(Id::from("rotation")));
    }
}
