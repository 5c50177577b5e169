mod loader;
mod model;
mod player;
mod state;
mod validator;

pub use loader::{TOWER_TOML, load_world_from_str, tower_world};

pub use model::{
    Effect, Exit, Guardian, GuardianAi, Hazard, HintRule, Intro, Item, ItemCategory, Puzzle,
    PuzzleMethod, Room, Slow, Stat, Strike, World,
};
pub use player::{MAX_STAT, Player};
pub use state::{EffectKind, GameState, GuardianState, HazardState, RoomState, TimedEffect};
pub use validator::{ValidationError, validate_world};
