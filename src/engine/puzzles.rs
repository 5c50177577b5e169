use crate::engine::feedback::Outcome;
use crate::engine::helpers::item_name;
use crate::engine::output::Output;
use crate::world::{GameState, Puzzle, PuzzleMethod, World};

#[derive(Debug, PartialEq, Eq)]
pub enum Attempt {
    Solved(Outcome),
    AlreadySolved,
    Missing(Vec<String>),
    NoPuzzle,
}

/// Pick the method the player qualifies for. The item route wins unless the
/// player asked for mastery or lacks the items.
fn choose_method<'a>(
    puzzle: &'a Puzzle,
    state: &GameState,
    prefer: &str,
) -> Result<&'a PuzzleMethod, Vec<String>> {
    let missing: Vec<String> = puzzle
        .requires
        .iter()
        .filter(|id| !state.player.has_item(id))
        .cloned()
        .collect();

    let mastery = puzzle
        .alternate_flag
        .as_deref()
        .filter(|flag| state.player.has_flag(flag))
        .and_then(|_| puzzle.methods.get(1));

    let wants_mastery = mastery.is_some_and(|m| m.name == prefer);

    match (missing.is_empty(), mastery) {
        (_, Some(m)) if wants_mastery => Ok(m),
        (true, _) => puzzle.methods.first().ok_or(missing),
        (false, Some(m)) => Ok(m),
        (false, None) => Err(missing),
    }
}

/// Try to solve the puzzle in the player's current room. The reward is only
/// granted the first time; afterwards the solved flag short-circuits.
pub fn attempt(out: &mut Output, world: &World, state: &mut GameState, prefer: &str) -> Attempt {
    let room_id = state.player.current_room.clone();
    let Some(puzzle) = world.room(&room_id).and_then(|r| r.puzzle.as_ref()) else {
        return Attempt::NoPuzzle;
    };

    if state.player.has_flag(&puzzle.solved_flag) {
        return Attempt::AlreadySolved;
    }

    let method = match choose_method(puzzle, state, prefer) {
        Ok(m) => m,
        Err(missing) => return Attempt::Missing(missing),
    };

    state.player.set_flag(puzzle.solved_flag.clone());
    if let Some(flag) = &method.flag {
        state.player.set_flag(flag.clone());
    }
    out.say(method.text.clone());
    log::info!(
        "puzzle '{}' solved in '{}' by {}",
        puzzle.kind,
        room_id,
        method.name
    );

    let reward = puzzle.reward.as_str();
    let outcome = match world.item(reward) {
        Some(item) if item.is_spell() => {
            state.player.learn_spell(reward);
            Outcome::Learned(reward.to_string())
        }
        _ => {
            state.player.add_item(reward);
            out.event(format!("You receive the {}.", item_name(world, reward)));
            Outcome::Nothing
        }
    };

    Attempt::Solved(outcome)
}

/// `solve [method]`
pub fn handle_solve(out: &mut Output, world: &World, state: &mut GameState, args: &str) -> Outcome {
    match attempt(out, world, state, args.trim()) {
        Attempt::Solved(outcome) => outcome,
        Attempt::AlreadySolved => {
            out.say("You have already solved this puzzle.");
            Outcome::Nothing
        }
        Attempt::Missing(missing) => {
            let names: Vec<&str> = missing.iter().map(|id| item_name(world, id)).collect();
            out.say(format!("You still need: {}.", names.join(", ")));
            Outcome::Nothing
        }
        Attempt::NoPuzzle => {
            out.say("There is no puzzle here.");
            Outcome::Nothing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tower_world;

    fn in_room(world: &World, room: &str) -> GameState {
        let mut state = GameState::new(world);
        state.player.current_room = room.to_string();
        state
    }

    #[test]
    fn garden_needs_both_herbs() {
        let world = tower_world().expect("tower");
        let mut state = in_room(&world, "garden");
        state.player.add_item("herb_rare");

        let mut out = Output::new();
        assert_eq!(
            attempt(&mut out, &world, &mut state, ""),
            Attempt::Missing(vec!["herb_common".to_string()])
        );
        assert!(!state.player.knows_spell("shield"));
    }

    #[test]
    fn garden_reward_is_granted_once() {
        let world = tower_world().expect("tower");
        let mut state = in_room(&world, "garden");
        state.player.add_item("herb_rare");
        state.player.add_item("herb_common");

        let mut out = Output::new();
        assert_eq!(
            attempt(&mut out, &world, &mut state, ""),
            Attempt::Solved(Outcome::Learned("shield".into()))
        );
        assert!(state.player.has_flag("garden_puzzle_solved"));

        let spells_before = state.player.spells().clone();
        let inventory_before = state.player.inventory().to_vec();
        assert_eq!(
            attempt(&mut out, &world, &mut state, ""),
            Attempt::AlreadySolved
        );
        assert_eq!(state.player.spells(), &spells_before);
        assert_eq!(state.player.inventory(), inventory_before.as_slice());
    }

    #[test]
    fn mastery_replaces_the_items() {
        let world = tower_world().expect("tower");
        let mut state = in_room(&world, "frost_chamber");
        state.player.set_flag("ice_mastery");

        let mut out = Output::new();
        assert!(matches!(
            attempt(&mut out, &world, &mut state, ""),
            Attempt::Solved(Outcome::Learned(ref s)) if s == "ice_lance"
        ));
        assert!(out.contains("You master the ice"));
        assert!(!state.player.has_flag("frost_riddle_solved"));
    }

    #[test]
    fn riddle_route_sets_its_own_flag() {
        let world = tower_world().expect("tower");
        let mut state = in_room(&world, "frost_chamber");
        state.player.add_item("frost_crystal");

        let mut out = Output::new();
        attempt(&mut out, &world, &mut state, "");
        assert!(state.player.has_flag("frost_riddle_solved"));
        assert!(out.contains("ice crystal resonates"));
    }

    #[test]
    fn mastery_can_be_requested_by_name() {
        let world = tower_world().expect("tower");
        let mut state = in_room(&world, "storm_peak");
        state.player.add_item("storm_crystal");
        state.player.set_flag("wind_mastery");

        let mut out = Output::new();
        attempt(&mut out, &world, &mut state, "mastery");
        assert!(out.contains("mastery of the winds"));
        assert!(!state.player.has_flag("storm_control_solved"));
    }
}
