use anyhow::Result;
use battler_prng::PrngSeed;
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use crate::{
    config::{
        FormatOptions,
        is_truthy,
    },
    engine::{
        BattleSessionOptions,
        SideOptions,
    },
    error::{
        WrapResultError,
        general_error,
        invalid_team_error,
    },
    graph::serialize_to_value,
    helper::HelperInstance,
};

/// Seed used for battles created without one, so that repeated runs are reproducible.
pub const DEFAULT_SEED: PrngSeed = PrngSeed::new([0x9917, 0x6924, 0xe1c8, 0x6af0]);

/// Priority every seated player joins with.
const PLAYER_PRIORITY: u32 = 1;

/// Options for creating a battle.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOptions {
    /// The custom format the battle is played in.
    #[serde(flatten)]
    pub format: FormatOptions,
    /// Seed of the battle's random number generator. [`DEFAULT_SEED`] is used when empty.
    #[serde(default)]
    pub seed: Option<PrngSeed>,
}

impl BattleOptions {
    /// Sets the seed.
    pub fn with_seed(mut self, seed: PrngSeed) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl From<FormatOptions> for BattleOptions {
    fn from(value: FormatOptions) -> Self {
        Self {
            format: value,
            seed: None,
        }
    }
}

impl HelperInstance {
    /// Creates a battle and returns its state as JSON text.
    ///
    /// Team `i` is seated in slot `i + 1` as `Guest <i + 1>`. Every team must be a list of sets;
    /// teams are checked before the format is resolved or the battle is created.
    pub fn create_battle(&self, options: &BattleOptions, teams: Option<&[Value]>) -> Result<String> {
        serde_json::to_string(&self.create_battle_snapshot(options, teams)?)
            .wrap_error_with_message("failed to write battle state as JSON")
    }

    /// Creates a battle and returns its state as a JSON value.
    ///
    /// See [`HelperInstance::create_battle`].
    pub fn create_battle_snapshot(
        &self,
        options: &BattleOptions,
        teams: Option<&[Value]>,
    ) -> Result<Value> {
        let teams = teams.unwrap_or_default();
        let teams = teams
            .iter()
            .enumerate()
            .map(|(index, team)| match team {
                Value::Array(sets) => Ok(sets),
                _ => Err(invalid_team_error(index)),
            })
            .collect::<Result<Vec<_>>>()?;

        let format = self.get_format(&options.format)?;
        let seed = options.seed.unwrap_or(DEFAULT_SEED);
        let mut battle = self.engine.create_battle(BattleSessionOptions {
            format_id: format.id.clone(),
            seed,
        })?;
        log::debug!(
            "created battle in format {} with seed {:?}",
            format.id,
            seed.words()
        );

        for (index, sets) in teams.into_iter().enumerate() {
            let slot = index + 1;
            battle.join(SideOptions {
                slot,
                name: format!("Guest {slot}"),
                priority: PLAYER_PRIORITY,
                team: sets.clone(),
            })?;
        }

        Ok(serialize_to_value(&battle.snapshot()))
    }

    /// Creates a battle from loosely-typed JSON arguments, returning its state as JSON text.
    ///
    /// `first` is either the battle options or, when it is an array, the list of teams. Falsy
    /// options are treated as empty options.
    pub fn create_battle_from_json(&self, first: Value, teams: Option<Value>) -> Result<String> {
        let (options, teams) = match first {
            Value::Array(teams) => (Value::Null, Some(Value::Array(teams))),
            options => (options, teams),
        };
        let options = if is_truthy(&options) {
            serde_json::from_value::<BattleOptions>(options)
                .wrap_error_with_message("invalid battle options")?
        } else {
            BattleOptions::default()
        };
        let teams = match teams {
            None | Some(Value::Null) => None,
            Some(Value::Array(teams)) => Some(teams),
            Some(other) => {
                return Err(general_error(format!(
                    "teams must be a list, got {other}"
                )));
            }
        };
        self.create_battle(&options, teams.as_deref())
    }
}
