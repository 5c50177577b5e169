use crate::engine::feedback::Outcome;
use crate::engine::guardians;
use crate::engine::helpers::spell_label;
use crate::engine::movement::enter_room;
use crate::engine::output::Output;
use crate::world::{Effect, GameState, World};

/// `cast <spell> [target]`. Mana is checked before anything else happens;
/// a failed cast changes nothing.
pub fn handle_cast(
    out: &mut Output,
    world: &World,
    state: &mut GameState,
    spell_id: &str,
    target: &str,
) -> Outcome {
    if spell_id.is_empty() {
        out.say("Cast what?");
        return Outcome::Nothing;
    }

    let Some(spell) = world
        .item(spell_id)
        .filter(|s| s.is_spell() && state.player.knows_spell(spell_id))
    else {
        out.say("You don't know that spell.");
        return Outcome::Nothing;
    };

    let cost = spell.mana_cost.unwrap_or(0);
    if state.player.mana() < cost {
        out.say("Not enough mana!");
        return Outcome::Nothing;
    }

    let teleport_to = match &spell.effect {
        Effect::Teleport => match world.room(target) {
            Some(room) => Some(room),
            None => {
                out.say("Invalid teleport target. Name a room, e.g. <b>cast teleport lobby</b>.");
                return Outcome::Nothing;
            }
        },
        _ => None,
    };

    state.player.adjust_mana(-cost);
    log::debug!("cast {} (-{} mana, target '{}')", spell.id, cost, target);

    match &spell.effect {
        Effect::Strike(strike) => guardians::strike(out, world, state, spell, strike, target),
        Effect::Ward { flag, text } => {
            state.player.set_flag(flag.clone());
            out.say(text.clone());
        }
        Effect::Teleport => {
            if let Some(room) = teleport_to {
                out.say(format!("You teleport to {}!", room.name));
                state.player.current_room = room.id.clone();
                enter_room(out, world, state);
            }
        }
        _ => out.say(format!("You cast {}, but nothing happens.", spell_label(spell))),
    }

    Outcome::Cast(spell.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tower_world;

    #[test]
    fn unknown_spell_is_refused() {
        let world = tower_world().expect("tower");
        let mut state = GameState::new(&world);

        let mut out = Output::new();
        assert_eq!(
            handle_cast(&mut out, &world, &mut state, "ice_lance", "guardian"),
            Outcome::Nothing
        );
        assert!(out.contains("You don't know that spell."));
        assert_eq!(state.player.mana(), 100);
        // items that are not spells cannot be cast either
        let mut out = Output::new();
        handle_cast(&mut out, &world, &mut state, "health_potion", "");
        assert!(out.contains("You don't know that spell."));
    }

    #[test]
    fn insufficient_mana_changes_nothing() {
        let world = tower_world().expect("tower");
        let mut state = GameState::new(&world);
        state.player.current_room = "lobby".into();
        state.player.learn_spell("fireball");
        state.player.adjust_mana(-85);

        let mut out = Output::new();
        handle_cast(&mut out, &world, &mut state, "fireball", "guardian");
        assert!(out.contains("Not enough mana!"));
        assert_eq!(state.player.mana(), 15);
        assert_eq!(state.guardians["lobby"].health, 50);
    }

    #[test]
    fn wards_set_their_flag() {
        let world = tower_world().expect("tower");
        let mut state = GameState::new(&world);
        state.player.learn_spell("shield");

        let mut out = Output::new();
        handle_cast(&mut out, &world, &mut state, "shield", "");
        assert!(state.player.has_flag("shield_active"));
        assert_eq!(state.player.mana(), 85);
    }

    #[test]
    fn teleport_needs_a_real_room() {
        let world = tower_world().expect("tower");
        let mut state = GameState::new(&world);
        state.player.learn_spell("teleport");

        let mut out = Output::new();
        handle_cast(&mut out, &world, &mut state, "teleport", "narnia");
        assert_eq!(state.player.mana(), 100);
        assert_eq!(state.player.current_room, "entrance");

        let mut out = Output::new();
        handle_cast(&mut out, &world, &mut state, "teleport", "garden");
        assert_eq!(state.player.mana(), 70);
        assert_eq!(state.player.current_room, "garden");
        assert!(out.contains("You teleport to Enchanted Garden!"));
    }

    #[test]
    fn ice_lance_slows_and_soul_drain_heals() {
        let world = tower_world().expect("tower");
        let mut state = GameState::new(&world);
        state.player.current_room = "frost_chamber".into();
        state.player.learn_spell("ice_lance");
        state.player.learn_spell("soul_drain");
        state.player.adjust_health(-90);

        let mut out = Output::new();
        handle_cast(&mut out, &world, &mut state, "ice_lance", "guardian");
        let frost = &state.guardians["frost_chamber"];
        assert_eq!(frost.health, 230);
        assert_eq!(frost.defense_penalty(), 5);

        handle_cast(&mut out, &world, &mut state, "soul_drain", "frost");
        assert_eq!(state.guardians["frost_chamber"].health, 180);
        assert_eq!(state.player.health(), 35);
        assert_eq!(state.player.mana(), 45);
    }
}
