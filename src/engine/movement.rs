use crate::engine::feedback::Outcome;
use crate::engine::guardians::blocking_guardian;
use crate::engine::hazards;
use crate::engine::output::Output;
use crate::world::{GameState, World};

pub fn handle_go(out: &mut Output, world: &World, state: &mut GameState, direction: &str) -> Outcome {
    let direction = direction.trim();
    if direction.is_empty() {
        out.say("Go where?");
        return Outcome::Nothing;
    }

    let current = state.player.current_room.clone();
    let Some(exit) = world.room(&current).and_then(|r| r.exit(direction)) else {
        out.say("You cannot go that way.");
        return Outcome::Nothing;
    };

    if let Some(name) = blocking_guardian(world, state, &current, &exit.direction) {
        out.say(format!("{} blocks your way.", name));
        return Outcome::Nothing;
    }

    if world.room(&exit.target).is_none() {
        out.say(format!(
            "You try to go {}, but something feels wrong (room not found).",
            exit.direction
        ));
        return Outcome::Nothing;
    }

    log::debug!("player moves {} -> {}", current, exit.target);
    state.player.current_room = exit.target.clone();
    enter_room(out, world, state);
    Outcome::Moved
}

/// Announce the room the player now stands in and run its entry hooks:
/// one-time intro, guardian presence, then hazards.
pub fn enter_room(out: &mut Output, world: &World, state: &mut GameState) {
    let room_id = state.player.current_room.clone();
    let Some(room) = world.room(&room_id) else {
        return;
    };

    out.say(format!("You enter {}.", room.name));
    out.say(room.desc.clone());

    if let Some(intro) = &room.intro {
        if state.player.set_flag(intro.flag.clone()) {
            for line in &intro.lines {
                out.event(line.clone());
            }
        }
    }

    if let Some(home) = state.guardian_in(&room_id) {
        if let Some(def) = world.guardian(home) {
            out.event(format!("A {} blocks your path!", def.name));
        }
    }

    hazards::trigger_on_entry(out, world, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tower_world;

    #[test]
    fn missing_exit_leaves_player_in_place() {
        let world = tower_world().expect("tower");
        let mut state = GameState::new(&world);

        let mut out = Output::new();
        assert_eq!(handle_go(&mut out, &world, &mut state, "west"), Outcome::Nothing);
        assert!(out.contains("You cannot go that way."));
        assert_eq!(state.player.current_room, "entrance");
    }

    #[test]
    fn intro_plays_once() {
        let world = tower_world().expect("tower");
        let mut state = GameState::new(&world);

        let mut out = Output::new();
        handle_go(&mut out, &world, &mut state, "east");
        assert!(out.contains("You enter Enchanted Garden."));
        assert!(out.contains("Strange herbs beckon"));

        handle_go(&mut Output::new(), &world, &mut state, "west");
        let mut out = Output::new();
        handle_go(&mut out, &world, &mut state, "east");
        assert!(!out.contains("Strange herbs beckon"));
    }

    #[test]
    fn undefeated_guardian_blocks_its_exit() {
        let world = tower_world().expect("tower");
        let mut state = GameState::new(&world);
        state.player.current_room = "lobby".into();

        let mut out = Output::new();
        assert_eq!(handle_go(&mut out, &world, &mut state, "up"), Outcome::Nothing);
        assert!(out.contains("Guardian of the Gate blocks your way."));

        if let Some(g) = state.guardians.get_mut("lobby") {
            g.defeated = true;
        }
        assert_eq!(handle_go(&mut Output::new(), &world, &mut state, "up"), Outcome::Moved);
        assert_eq!(state.player.current_room, "library");
    }

    #[test]
    fn hazards_hurt_on_entry_unless_mastered() {
        let world = tower_world().expect("tower");
        let mut state = GameState::new(&world);
        state.player.current_room = "frost_chamber".into();

        let mut out = Output::new();
        handle_go(&mut out, &world, &mut state, "east");
        assert_eq!(state.player.health(), 95);
        assert!(out.contains("The freezing mist damages you!"));
        assert!(state.rooms["ice_library"].hazards[0].active);

        state.player.set_flag("ice_mastery");
        handle_go(&mut Output::new(), &world, &mut state, "west");
        assert_eq!(state.player.health(), 95);
        assert!(!state.rooms["frost_chamber"].hazards[0].active);
    }
}
