use std::sync::{
    Arc,
    atomic::{
        AtomicUsize,
        Ordering,
    },
};

use anyhow::Result;
use battler_helper::{
    config::FormatDefinition,
    engine::{
        BattleSession,
        SideOptions,
    },
    error::general_error,
    graph::{
        GraphObject,
        GraphValue,
    },
};
use battler_prng::{
    PrngSeed,
    RealPseudoRandomNumberGenerator,
    rand_util,
};

const MAX_SIDES: usize = 4;

/// A battle created by a [`TestEngine`][`crate::TestEngine`].
///
/// The battle's object graph is shaped like a real engine's: sides point back to the battle,
/// opposing sides point to each other, and team members point back to their side. Each team member
/// also carries a roll from the battle's seeded generator.
pub struct TestBattle {
    root: GraphObject,
    sides: Vec<GraphObject>,
    prng: RealPseudoRandomNumberGenerator,
    sides_seated: Arc<AtomicUsize>,
}

impl TestBattle {
    pub(crate) fn new(
        format: &FormatDefinition,
        seed: PrngSeed,
        sides_seated: Arc<AtomicUsize>,
    ) -> Self {
        let root = GraphObject::new();
        root.insert("format_id", format.id.to_string());
        root.insert(
            "format",
            serde_json::to_value(format).map_or(GraphValue::Null, GraphValue::from),
        );
        root.insert("seed", seed.words().to_vec());
        root.insert("turn", 0u32);
        root.insert("sides", Vec::<GraphValue>::new());
        Self {
            root,
            sides: Vec::new(),
            prng: RealPseudoRandomNumberGenerator::new(seed),
            sides_seated,
        }
    }
}

impl BattleSession for TestBattle {
    fn join(&mut self, options: SideOptions) -> Result<()> {
        if options.slot == 0 || options.slot > MAX_SIDES {
            return Err(general_error(format!("invalid slot {}", options.slot)));
        }
        let slot_id = options.slot_id();
        if self.root.get(&slot_id).is_some() {
            return Err(general_error(format!("slot {slot_id} is already taken")));
        }

        let side = GraphObject::with_fields([
            ("id", GraphValue::from(slot_id.as_str())),
            ("name", GraphValue::from(options.name)),
            ("priority", GraphValue::from(options.priority)),
            ("battle", GraphValue::from(self.root.downgrade())),
        ]);
        let team = options
            .team
            .into_iter()
            .enumerate()
            .map(|(position, set)| {
                GraphObject::with_fields([
                    ("position", GraphValue::from(position)),
                    ("set", GraphValue::from(set)),
                    ("roll", GraphValue::from(rand_util::range(&mut self.prng, 1, 100))),
                    ("side", GraphValue::from(side.downgrade())),
                ])
            })
            .collect::<Vec<_>>();
        side.insert("team", team);

        if let Some(foe) = self.sides.last() {
            side.insert("foe", foe.downgrade());
            foe.insert("foe", side.downgrade());
        }

        self.sides.push(side.clone());
        self.root.insert("sides", self.sides.clone());
        self.root.insert(slot_id, side);
        self.sides_seated.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn snapshot(&self) -> GraphValue {
        self.root.clone().into()
    }
}
