use crate::engine::helpers::{item_name, room_name};
use crate::engine::output::Output;
use crate::world::{GameState, MAX_STAT, World};

pub fn render_room(out: &mut Output, world: &World, state: &GameState) {
    let room_id = state.player.current_room.as_str();
    let Some(room) = world.room(room_id) else {
        out.say(format!("Error: you are in an unknown room '{}'", room_id));
        return;
    };

    out.title(room.name.clone());
    out.say(room.desc.clone());

    let items = state.room_items(room_id);
    if !items.is_empty() {
        let list = items
            .iter()
            .map(|id| format!("{} ({})", item_name(world, id), id))
            .collect::<Vec<_>>()
            .join(", ");
        out.say(format!("Items here: {}", list));
    }

    if let Some(home) = state.guardian_in(room_id) {
        if let (Some(def), Some(gs)) = (world.guardian(home), state.guardians.get(home)) {
            let mut line = format!(
                "{} stands before you. (Health: {}, Defense: {})",
                def.name,
                gs.health,
                def.defense - gs.defense_penalty()
            );
            if gs.defense_penalty() > 0 {
                line.push_str(" [slowed]");
            }
            if gs.is_frozen() {
                line.push_str(" [frozen]");
            }
            out.event(line);
        }
    }

    if let Some(rs) = state.rooms.get(room_id) {
        for (hazard, hs) in room.hazards.iter().zip(&rs.hazards) {
            if hs.active {
                out.event(format!("{} Type <b>dodge</b> to evade it.", hazard.message));
            }
        }
    }

    if room.exits.is_empty() {
        out.set_exits("Exits: (none)");
    } else {
        let list = room
            .exits
            .iter()
            .map(|e| format!("{} ({})", e.direction, room_name(world, &e.target)))
            .collect::<Vec<_>>()
            .join(", ");
        out.set_exits(format!("Exits: {}", list));
    }

    if let Some(hint) = &room.look_hint {
        out.hint(hint.clone());
    }
}

pub fn render_status(out: &mut Output, world: &World, state: &GameState) {
    let player = &state.player;
    out.say(format!(
        "Health: {}/{}\nMana: {}/{}\nCurrent Room: {}",
        player.health(),
        MAX_STAT,
        player.mana(),
        MAX_STAT,
        room_name(world, &player.current_room)
    ));
}

pub fn render_spells(out: &mut Output, world: &World, state: &GameState) {
    let mut known: Vec<&String> = state.player.spells().iter().collect();
    if known.is_empty() {
        out.say("You don't know any spells yet.");
        return;
    }
    known.sort();

    let lines = known
        .into_iter()
        .map(|id| match world.item(id) {
            Some(spell) => format!(
                "- {} ({}): {} mana",
                spell.name,
                id,
                spell.mana_cost.unwrap_or(0)
            ),
            None => format!("- {}", id),
        })
        .collect::<Vec<_>>()
        .join("\n");
    out.say(format!("Known spells:\n{}", lines));
}

pub fn render_help(out: &mut Output, world: &World) {
    out.title(world.name.clone());
    out.say(format!("Objective: {}", world.desc));
    out.say(
        "How to Play:\n\
         - Movement: go north, go east, up, down, etc.\n\
         - Look/Examine: look, examine [object]\n\
         - Take/Use Items: take [item], use [item], use [item] on [target]\n\
         - Cast Spells: cast [spell] [target], spells\n\
         - Puzzles: solve, solve mastery\n\
         - Inventory/Status: inventory, status\n\
         - Save/Load: quicksave, quickload\n\
         - Dodge Hazards: dodge (when prompted)\n\
         - Hints: hint\n\
         - Help: help (for command list)",
    );
    out.hint("Tip: Explore, experiment, and pay attention to room descriptions and items!");
}
