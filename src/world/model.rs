use std::collections::HashMap;
use std::time::Duration;

//////////////////////////////
/// GAME STRUCTS AND ENUMS ///
//////////////////////////////

/// Static world definition. Everything here is fixed at load time; the
/// parts that change during play live in [`super::GameState`].
pub struct World {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub start_room: String,
    /// Spells a new player already knows.
    pub starting_spells: Vec<String>,
    pub fallback_hint: String,
    pub victory_text: String,
    pub rooms: HashMap<String, Room>,
    pub items: HashMap<String, Item>,
}

impl World {
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Guardian definitions keyed by the id of the room they start in.
    pub fn guardian(&self, home: &str) -> Option<&Guardian> {
        self.rooms.get(home).and_then(|r| r.guardian.as_ref())
    }
}

pub struct Room {
    pub id: String,
    pub name: String,
    pub desc: String,
    /// Declaration order is kept; the pathfinder relies on it.
    pub exits: Vec<Exit>,
    /// Items present when the session starts.
    pub items: Vec<String>,
    pub guardian: Option<Guardian>,
    pub puzzle: Option<Puzzle>,
    pub hazards: Vec<Hazard>,
    pub intro: Option<Intro>,
    pub look_hint: Option<String>,
    pub hints: Vec<HintRule>,
}

impl Room {
    pub fn exit(&self, direction: &str) -> Option<&Exit> {
        self.exits
            .iter()
            .find(|e| e.direction.eq_ignore_ascii_case(direction))
    }
}

pub struct Exit {
    pub direction: String,
    pub target: String,
}

/// One-time text shown the first time a room is entered.
pub struct Intro {
    pub flag: String,
    pub lines: Vec<String>,
}

pub struct HintRule {
    pub conditions: Vec<String>,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    Spell,
    Potion,
    Key,
    Tome,
    Scroll,
    Reagent,
}

impl ItemCategory {
    pub fn label(self) -> &'static str {
        match self {
            ItemCategory::Spell => "spell",
            ItemCategory::Potion => "potion",
            ItemCategory::Key => "key",
            ItemCategory::Tome => "tome",
            ItemCategory::Scroll => "scroll",
            ItemCategory::Reagent => "reagent",
        }
    }
}

pub struct Item {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub category: ItemCategory,
    /// Only spells carry a cost.
    pub mana_cost: Option<i32>,
    pub effect: Effect,
}

impl Item {
    pub fn is_spell(&self) -> bool {
        self.category == ItemCategory::Spell
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Health,
    Mana,
}

/// What happens when an item is used or a spell is cast.
#[derive(Debug, Clone)]
pub enum Effect {
    Inert,
    /// Offensive spell aimed at a guardian.
    Strike(Strike),
    /// Sets a protective flag on the player.
    Ward { flag: String, text: String },
    /// Moves the player to any room named by the target.
    Teleport,
    /// Restores health or mana; the item is consumed.
    Restore { stat: Stat, amount: i32, text: String },
    /// Teaches a spell.
    Learn { spell: String },
    /// Grants a mastery flag.
    Attune { flag: String, text: String },
    /// Unlocks something named by the target.
    Unlock {
        target: String,
        requires: Option<String>,
        grants: String,
        text: String,
    },
}

#[derive(Debug, Clone)]
pub struct Strike {
    pub damage: i32,
    pub slow: Option<Slow>,
    /// Health returned to the caster on a hit.
    pub drain: i32,
    pub freeze: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct Slow {
    pub defense: i32,
    pub duration: Duration,
}

pub struct Guardian {
    pub name: String,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub special: Option<String>,
    pub defeat_flag: String,
    pub defeat_text: String,
    /// Exits of the home room this guardian bars while undefeated.
    pub blocks: Vec<String>,
    /// Items revealed in the home room on defeat.
    pub drops: Vec<String>,
    pub ai: Option<GuardianAi>,
    pub victory: bool,
}

/// Name words too common to pick out a guardian on their own.
const NAME_FILLER: &[&str] = &["a", "an", "the", "of", "and"];

impl Guardian {
    /// True if `target` names this guardian: empty, "guardian", its home id,
    /// its full name, or one significant word of its name.
    pub fn answers_to(&self, home: &str, target: &str) -> bool {
        let target = target.trim().strip_prefix("the ").unwrap_or(target.trim());
        if target.is_empty()
            || target == "guardian"
            || target.eq_ignore_ascii_case(home)
            || target.eq_ignore_ascii_case(&self.name)
        {
            return true;
        }
        self.name
            .split_whitespace()
            .filter(|w| !NAME_FILLER.iter().any(|f| w.eq_ignore_ascii_case(f)))
            .any(|w| w.eq_ignore_ascii_case(target))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum GuardianAi {
    /// Moves one room toward the player per turn while within `range` rooms.
    Pursuit { range: usize },
}

pub struct Puzzle {
    pub kind: String,
    pub requires: Vec<String>,
    pub alternate_flag: Option<String>,
    pub reward: String,
    pub solved_flag: String,
    /// First entry is the item-based method; a second entry, if any, is the
    /// mastery route keyed on `alternate_flag`.
    pub methods: Vec<PuzzleMethod>,
}

pub struct PuzzleMethod {
    pub name: String,
    pub flag: Option<String>,
    pub text: String,
}

pub struct Hazard {
    pub kind: String,
    pub damage: i32,
    pub interval: Option<Duration>,
    pub message: String,
    pub hurt_text: String,
    pub safe_text: String,
    /// Any one of these flags lets the player pass unharmed.
    pub bypass: Vec<String>,
}
