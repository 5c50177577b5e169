pub(crate) mod conditions;
mod feedback;
mod guardians;
mod hazards;
mod helpers;
mod hints;
mod items;
mod movement;
mod output;
mod parser;
mod pathfinder;
mod puzzles;
mod render;
mod spells;

pub use conditions::{Condition, conditions_met, parse_condition};
pub use feedback::{Outcome, apply_feedback};
pub use guardians::{INVISIBILITY_FLAG, blocking_guardian, expire_effects, pursue};
pub use hazards::{handle_dodge, tick as tick_hazards, trigger_on_entry};
pub use hints::hint_for;
pub use items::{handle_inventory, handle_look, handle_take, handle_use};
pub use movement::{enter_room, handle_go};
pub use output::{Output, OutputBlock};
pub use parser::{Command, Verb, normalize, parse};
pub use pathfinder::shortest_path;
pub use puzzles::{Attempt, attempt as attempt_puzzle, handle_solve};
pub use render::{render_help, render_room, render_spells, render_status};
pub use spells::handle_cast;
