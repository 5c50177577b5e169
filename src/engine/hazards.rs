use crate::engine::feedback::Outcome;
use crate::engine::output::Output;
use crate::world::{GameState, Hazard, Player, World};

fn bypassed(hazard: &Hazard, player: &Player) -> bool {
    hazard.bypass.iter().any(|flag| player.has_flag(flag))
}

fn hurt(out: &mut Output, hazard: &Hazard, player: &mut Player) {
    player.adjust_health(-hazard.damage);
    out.event(hazard.message.clone());
    out.event(format!("{} (-{} health)", hazard.hurt_text, hazard.damage));
}

/// Run every hazard of the room the player just entered.
pub fn trigger_on_entry(out: &mut Output, world: &World, state: &mut GameState) {
    let room_id = state.player.current_room.clone();
    let Some(room) = world.room(&room_id) else {
        return;
    };
    let Some(room_state) = state.rooms.get_mut(&room_id) else {
        return;
    };

    for (hazard, hs) in room.hazards.iter().zip(room_state.hazards.iter_mut()) {
        if bypassed(hazard, &state.player) {
            hs.active = false;
            out.event(hazard.message.clone());
            out.event(hazard.safe_text.clone());
            continue;
        }

        hurt(out, hazard, &mut state.player);
        hs.active = true;
        hs.last_trigger = state.clock;
        log::debug!("hazard '{}' triggered in '{}'", hazard.kind, room_id);
    }
}

/// Re-trigger recurring hazards in the player's room whose interval has
/// elapsed on the session clock. Dodged hazards stay quiet.
pub fn tick(out: &mut Output, world: &World, state: &mut GameState) {
    let room_id = state.player.current_room.clone();
    let Some(room) = world.room(&room_id) else {
        return;
    };
    let Some(room_state) = state.rooms.get_mut(&room_id) else {
        return;
    };

    for (hazard, hs) in room.hazards.iter().zip(room_state.hazards.iter_mut()) {
        let Some(interval) = hazard.interval else {
            continue;
        };
        if !hs.active || interval.is_zero() {
            continue;
        }

        while let Some(next) = hs.last_trigger.checked_add(interval) {
            if state.clock < next {
                break;
            }
            hs.last_trigger = next;
            if bypassed(hazard, &state.player) {
                hs.active = false;
                out.event(hazard.safe_text.clone());
                break;
            }
            hurt(out, hazard, &mut state.player);
            if state.player.is_fallen() {
                break;
            }
            if hazard.damage <= 0 {
                // harmless repeats are not replayed
                hs.last_trigger = state.clock;
                break;
            }
        }
    }
}

pub fn handle_dodge(out: &mut Output, state: &mut GameState) -> Outcome {
    let room_id = state.player.current_room.as_str();
    let active = state
        .rooms
        .get_mut(room_id)
        .and_then(|r| r.hazards.iter_mut().find(|h| h.active));

    match active {
        Some(hs) => {
            hs.active = false;
            out.say("You successfully dodge the hazard!");
            Outcome::Dodged
        }
        None => {
            out.say("There is nothing to dodge.");
            Outcome::Nothing
        }
    }
}
