use crate::engine::helpers::{item_name, spell_label};
use crate::engine::output::Output;
use crate::engine::pathfinder::shortest_path;
use crate::world::{EffectKind, GameState, GuardianAi, Item, Strike, TimedEffect, World};

/// Flag that hides the player from pursuing guardians.
pub const INVISIBILITY_FLAG: &str = "invisibility_active";

/// True while the guardian homed in `room_id` still bars `direction`.
/// Blocking belongs to the home room even if the guardian has wandered off.
pub fn blocking_guardian<'a>(
    world: &'a World,
    state: &GameState,
    room_id: &str,
    direction: &str,
) -> Option<&'a str> {
    let guardian = world.guardian(room_id)?;
    let active = state
        .guardians
        .get(room_id)
        .is_some_and(|g| g.is_active());

    if active && guardian.blocks.iter().any(|b| b == direction) {
        Some(guardian.name.as_str())
    } else {
        None
    }
}

/// Resolve an offensive spell. Mana has already been paid.
pub fn strike(
    out: &mut Output,
    world: &World,
    state: &mut GameState,
    spell: &Item,
    strike: &Strike,
    target: &str,
) {
    let label = spell_label(spell);
    let room_id = state.player.current_room.clone();

    let hit = state.guardian_in(&room_id).and_then(|home| {
        world
            .guardian(home)
            .filter(|g| g.answers_to(home, target))
            .map(|g| (home.to_string(), g))
    });

    let Some((home, def)) = hit else {
        if target.is_empty() {
            out.say(format!("You cast {label}!"));
        } else {
            out.say(format!("You cast {label} at {target}!"));
        }
        out.event("Your spell finds no target.");
        return;
    };

    let now = state.clock;
    let Some(gs) = state.guardians.get_mut(&home) else {
        return;
    };

    out.say(format!("You cast {label} at the {}!", def.name));

    if strike.damage > 0 {
        gs.health -= strike.damage;
        out.event(format!(
            "The {} takes {} damage. (Health: {})",
            def.name,
            strike.damage,
            gs.health.max(0)
        ));
    }

    if let Some(slow) = &strike.slow {
        gs.effects.push(TimedEffect {
            kind: EffectKind::DefenseDown(slow.defense),
            expires_at: now.saturating_add(slow.duration),
        });
        out.event(format!("The {} is slowed by the frost.", def.name));
    }

    if let Some(freeze) = strike.freeze {
        gs.effects.push(TimedEffect {
            kind: EffectKind::Frozen,
            expires_at: now.saturating_add(freeze),
        });
        out.event(format!("The {} is frozen in time.", def.name));
    }

    let defeated = gs.health <= 0;

    if strike.drain > 0 {
        let before = state.player.health();
        state.player.adjust_health(strike.drain);
        let gained = state.player.health() - before;
        if gained > 0 {
            out.event(format!("You drain {gained} health from the {}.", def.name));
        }
    }

    log::debug!(
        "{} hit guardian '{}' for {}",
        spell.id,
        home,
        strike.damage
    );

    if defeated {
        defeat(out, world, state, &home);
    }
}

/// Mark a guardian defeated. Runs once: the caller only reaches this on the
/// hit that takes health to zero or below.
fn defeat(out: &mut Output, world: &World, state: &mut GameState, home: &str) {
    let Some(def) = world.guardian(home) else {
        return;
    };
    let Some(gs) = state.guardians.get_mut(home) else {
        return;
    };
    if gs.defeated {
        return;
    }

    gs.defeated = true;
    gs.health = 0;
    gs.effects.clear();
    state.player.set_flag(def.defeat_flag.clone());
    log::info!("guardian '{}' defeated", home);

    out.event(format!("The {} is defeated!", def.name));
    out.event(def.defeat_text.clone());

    if !def.drops.is_empty() {
        if let Some(room) = state.rooms.get_mut(home) {
            for drop in &def.drops {
                room.items.push(drop.clone());
                out.event(format!("A {} is revealed.", item_name(world, drop)));
            }
        }
    }

    if def.victory {
        out.event(world.victory_text.clone());
    }
}

/// Clear expired timed effects. Defeated guardians have none left, so this
/// is a no-op for them.
pub fn expire_effects(out: &mut Output, world: &World, state: &mut GameState) {
    let now = state.clock;
    let player_room = state.player.current_room.clone();

    for gs in state.guardians.values_mut() {
        if gs.effects.is_empty() {
            continue;
        }
        let expired = gs.expire(now);
        if expired.is_empty() || gs.location != player_room {
            continue;
        }
        let Some(def) = world.guardian(&gs.home) else {
            continue;
        };
        for kind in expired {
            match kind {
                EffectKind::DefenseDown(_) => {
                    out.event(format!("The {} shakes off the frost.", def.name))
                }
                EffectKind::Frozen => out.event(format!("The {} moves again.", def.name)),
            }
        }
    }
}

/// Move each pursuing guardian one room toward the player.
pub fn pursue(out: &mut Output, world: &World, state: &mut GameState) {
    if state.player.has_flag(INVISIBILITY_FLAG) {
        return;
    }
    let player_room = state.player.current_room.clone();

    for gs in state.guardians.values_mut() {
        if !gs.is_active() || gs.location == player_room || gs.is_frozen() {
            continue;
        }
        let Some(def) = world.guardian(&gs.home) else {
            continue;
        };
        let Some(GuardianAi::Pursuit { range }) = def.ai else {
            continue;
        };

        let path = shortest_path(world, &gs.location, &player_room);
        if path.len() < 2 || path.len() - 1 > range {
            continue;
        }

        log::debug!("guardian '{}' moves {} -> {}", gs.home, gs.location, path[1]);
        gs.location = path[1].clone();

        if gs.location == player_room {
            out.event(format!("The {} has followed you here!", def.name));
        }
    }
}
