use std::time::Duration;

use crate::config::GameConfig;
use crate::engine::{
    self, Command, Outcome, Output, Verb, apply_feedback, handle_cast, handle_dodge, handle_go,
    handle_inventory, handle_look, handle_solve, handle_take, handle_use, hint_for, render_help,
    render_spells, render_status,
};
use crate::error::{StoreError, WorldError};
use crate::persistence::{self, KeyValueStore};
use crate::world::{GameState, Player, World, tower_world};

const NOT_UNDERSTOOD: &str = "I don't understand that command. Try 'help' for a list of commands.";
const FALLEN: &str = "You have fallen... Type <b>quickload</b> to return to your last save.";

/// One play-through: the static world, the mutable state, and the store
/// quicksaves go to. Every command runs to completion before the next.
pub struct Session {
    world: World,
    state: GameState,
    config: GameConfig,
    store: Box<dyn KeyValueStore>,
}

impl Session {
    pub fn new(world: World, config: GameConfig, store: Box<dyn KeyValueStore>) -> Self {
        let state = GameState::new(&world);
        Session {
            world,
            state,
            config,
            store,
        }
    }

    /// A session over the built-in tower.
    pub fn tower(config: GameConfig, store: Box<dyn KeyValueStore>) -> Result<Self, WorldError> {
        Ok(Self::new(tower_world()?, config, store))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn current_room(&self) -> &str {
        &self.state.player.current_room
    }

    pub fn is_fallen(&self) -> bool {
        self.state.player.is_fallen()
    }

    /// True once a guardian marked as the final foe is down.
    pub fn is_victory(&self) -> bool {
        self.state.guardians.values().any(|g| {
            g.defeated && self.world.guardian(&g.home).is_some_and(|def| def.victory)
        })
    }

    /// Opening text plus the arrival in the start room.
    pub fn start(&mut self) -> Output {
        let mut out = Output::new();
        out.title(format!("Welcome to {}!", self.world.name));
        out.say(self.world.desc.clone());
        engine::enter_room(&mut out, &self.world, &mut self.state);
        out.hint("Type <b>help</b> for a list of commands.");
        out
    }

    /// Process one line of input; returns (output, quit?).
    pub fn step(&mut self, input: &str) -> (Output, bool) {
        let mut out = Output::new();
        let Some(cmd) = engine::parse(input) else {
            return (out, false);
        };

        log::debug!("command '{}' args '{}'", cmd.action, cmd.args);

        if cmd.verb == Some(Verb::Quit) {
            out.say("Goodbye.");
            return (out, true);
        }

        let was_fallen = self.is_fallen();
        let outcome = self.dispatch(&mut out, &cmd);

        if self.config.feedback_hints {
            apply_feedback(&mut out, &outcome);
        }

        if self.config.guardian_pursuit && !self.is_fallen() {
            engine::pursue(&mut out, &self.world, &mut self.state);
        }

        self.announce_fall(&mut out, was_fallen);
        (out, false)
    }

    /// Convenience for callers that only want text.
    pub fn run(&mut self, input: &str) -> String {
        self.step(input).0.to_string()
    }

    /// Move the session clock forward: expire timed guardian effects and
    /// re-trigger recurring hazards in the player's room.
    pub fn advance(&mut self, elapsed: Duration) -> Output {
        let mut out = Output::new();
        if elapsed.is_zero() {
            return out;
        }

        let was_fallen = self.is_fallen();
        self.state.clock = self.state.clock.saturating_add(elapsed);
        engine::expire_effects(&mut out, &self.world, &mut self.state);
        if !was_fallen {
            engine::tick_hazards(&mut out, &self.world, &mut self.state);
        }
        self.announce_fall(&mut out, was_fallen);
        out
    }

    /// Current player as a save blob, for callers that persist it themselves.
    pub fn save_blob(&self) -> Result<String, StoreError> {
        persistence::encode(&self.state.player)
    }

    /// Replace the player from a save blob. Returns false (state untouched)
    /// if the blob is unusable.
    pub fn restore_blob(&mut self, blob: &str) -> bool {
        match persistence::decode(blob, &self.world) {
            Some(player) => {
                self.state.player = player;
                true
            }
            None => false,
        }
    }

    fn announce_fall(&self, out: &mut Output, was_fallen: bool) {
        if !was_fallen && self.is_fallen() {
            log::info!("player fell in '{}'", self.current_room());
            out.event("You have fallen! Your health is exhausted.");
            out.hint("Type <b>quickload</b> to return to your last save.");
        }
    }

    fn dispatch(&mut self, out: &mut Output, cmd: &Command) -> Outcome {
        let Some(verb) = cmd.verb else {
            out.say(NOT_UNDERSTOOD);
            return Outcome::Nothing;
        };

        let allowed_when_fallen = matches!(
            verb,
            Verb::Quickload | Verb::Help | Verb::Status | Verb::Hint
        );
        if self.is_fallen() && !allowed_when_fallen {
            out.say(FALLEN);
            return Outcome::Nothing;
        }

        let world = &self.world;
        let state = &mut self.state;

        match verb {
            Verb::Go => handle_go(out, world, state, &cmd.args),
            Verb::Look => {
                handle_look(out, world, state, &cmd.args);
                Outcome::Nothing
            }
            Verb::Take => handle_take(out, world, state, &cmd.args),
            Verb::Use => {
                let (item, target) = cmd.object_and_target();
                handle_use(out, world, state, item, target)
            }
            Verb::Cast => {
                let (spell, target) = cmd.object_and_target();
                handle_cast(out, world, state, spell, target)
            }
            Verb::Inventory => {
                handle_inventory(out, world, state);
                Outcome::Nothing
            }
            Verb::Status => {
                render_status(out, world, state);
                Outcome::Status
            }
            Verb::Spells => {
                render_spells(out, world, state);
                Outcome::Nothing
            }
            Verb::Dodge => handle_dodge(out, state),
            Verb::Solve => handle_solve(out, world, state, &cmd.args),
            Verb::Help => {
                render_help(out, world);
                Outcome::Nothing
            }
            Verb::Hint => {
                out.hint(hint_for(world, &state.player));
                Outcome::Nothing
            }
            Verb::Quicksave => {
                match persistence::quicksave(
                    self.store.as_mut(),
                    &self.config.quicksave_key,
                    &state.player,
                ) {
                    Ok(()) => {
                        out.say("Game quicksaved!");
                        Outcome::Saved
                    }
                    Err(e) => {
                        log::warn!("quicksave failed: {}", e);
                        out.say(format!("Quicksave failed: {e}"));
                        Outcome::Nothing
                    }
                }
            }
            Verb::Quickload => {
                match persistence::quickload(
                    self.store.as_ref(),
                    &self.config.quicksave_key,
                    world,
                ) {
                    Some(player) => {
                        state.player = player;
                        out.say("Game quickloaded!");
                        Outcome::Loaded
                    }
                    None => {
                        out.say("No quicksave found.");
                        Outcome::Nothing
                    }
                }
            }
            Verb::Quit => Outcome::Nothing,
        }
    }
}
