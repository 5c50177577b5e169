use crate::engine::conditions::conditions_met;
use crate::world::{Player, World};

/// Context hint for the player's current room: the first rule whose
/// conditions hold, or the world's generic hint. Read-only.
pub fn hint_for<'a>(world: &'a World, player: &Player) -> &'a str {
    world
        .room(&player.current_room)
        .and_then(|room| {
            room.hints
                .iter()
                .find(|rule| conditions_met(&rule.conditions, player))
        })
        .map(|rule| rule.text.as_str())
        .unwrap_or(&world.fallback_hint)
}
