use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use super::model::World;
use super::player::Player;

/// Everything that changes during a session. The static definitions stay in
/// [`World`]; this holds the player plus per-room and per-guardian state.
#[derive(Debug, Clone)]
pub struct GameState {
    pub player: Player,
    pub rooms: HashMap<String, RoomState>,
    /// Keyed by the guardian's home room id.
    pub guardians: BTreeMap<String, GuardianState>,
    /// Session clock; advanced by the caller, used for timed effects and
    /// recurring hazards.
    pub clock: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct RoomState {
    pub items: Vec<String>,
    /// Parallel to the room's hazard definitions.
    pub hazards: Vec<HazardState>,
}

#[derive(Debug, Clone, Default)]
pub struct HazardState {
    pub active: bool,
    pub last_trigger: Duration,
}

#[derive(Debug, Clone)]
pub struct GuardianState {
    pub home: String,
    pub location: String,
    pub health: i32,
    pub defeated: bool,
    pub effects: Vec<TimedEffect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    DefenseDown(i32),
    Frozen,
}

/// A temporary status on a guardian, cleared once the clock passes
/// `expires_at`.
#[derive(Debug, Clone, Copy)]
pub struct TimedEffect {
    pub kind: EffectKind,
    pub expires_at: Duration,
}

impl GuardianState {
    pub fn is_active(&self) -> bool {
        !self.defeated
    }

    pub fn defense_penalty(&self) -> i32 {
        self.effects
            .iter()
            .map(|e| match e.kind {
                EffectKind::DefenseDown(n) => n,
                EffectKind::Frozen => 0,
            })
            .sum()
    }

    pub fn is_frozen(&self) -> bool {
        self.effects.iter().any(|e| e.kind == EffectKind::Frozen)
    }

    /// Drop effects that have run out by `now` and return them.
    pub fn expire(&mut self, now: Duration) -> Vec<EffectKind> {
        let mut expired = Vec::new();
        self.effects.retain(|e| {
            if e.expires_at <= now {
                expired.push(e.kind);
                false
            } else {
                true
            }
        });
        expired
    }
}

impl GameState {
    pub fn new(world: &World) -> Self {
        let mut rooms: HashMap<String, RoomState> = HashMap::new();
        let mut guardians: BTreeMap<String, GuardianState> = BTreeMap::new();

        for (id, room) in &world.rooms {
            rooms.insert(
                id.clone(),
                RoomState {
                    items: room.items.clone(),
                    hazards: vec![HazardState::default(); room.hazards.len()],
                },
            );

            if let Some(guardian) = &room.guardian {
                guardians.insert(
                    id.clone(),
                    GuardianState {
                        home: id.clone(),
                        location: id.clone(),
                        health: guardian.health,
                        defeated: false,
                        effects: Vec::new(),
                    },
                );
            }
        }

        let mut player = Player::new(world.start_room.clone());
        for spell in &world.starting_spells {
            player.learn_spell(spell.clone());
        }

        GameState {
            player,
            rooms,
            guardians,
            clock: Duration::ZERO,
        }
    }

    pub fn room_items(&self, room_id: &str) -> &[String] {
        self.rooms
            .get(room_id)
            .map(|r| r.items.as_slice())
            .unwrap_or(&[])
    }

    /// Home id of the undefeated guardian standing in `room_id`, preferring
    /// the room's own guardian over a pursuer that wandered in.
    pub fn guardian_in(&self, room_id: &str) -> Option<&str> {
        if let Some(g) = self.guardians.get(room_id) {
            if g.is_active() && g.location == room_id {
                return Some(g.home.as_str());
            }
        }
        self.guardians
            .values()
            .find(|g| g.is_active() && g.location == room_id)
            .map(|g| g.home.as_str())
    }
}
