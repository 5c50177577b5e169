pub mod config;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod session;
pub mod world;

pub use config::GameConfig;
pub use engine::{Output, OutputBlock};
pub use error::{ConfigError, StoreError, WorldError};
pub use persistence::{FileStore, KeyValueStore, MemoryStore, SaveRecord};
pub use session::Session;
pub use world::{GameState, Player, World, load_world_from_str, tower_world};

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use super::*;
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use std::time::Duration;
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmStepResult {
        blocks: Vec<OutputBlock>,
        quit: bool,
        fallen: bool,
        victory: bool,
    }

    #[wasm_bindgen]
    pub struct WasmGame {
        session: Session,
        initialized: bool,
    }

    impl WasmGame {
        fn result(&self, out: Output, quit: bool) -> JsValue {
            to_value(&WasmStepResult {
                blocks: out.blocks,
                quit,
                fallen: self.session.is_fallen(),
                victory: self.session.is_victory(),
            })
            .unwrap_or(JsValue::NULL)
        }
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Create a new game over the built-in tower. Saves live in memory;
        /// use `save_blob`/`restore_blob` to mirror them into page storage.
        #[wasm_bindgen(constructor)]
        pub fn new() -> Result<WasmGame, JsValue> {
            let session = Session::tower(GameConfig::default(), Box::new(MemoryStore::new()))
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame {
                session,
                initialized: false,
            })
        }

        /// Start the game and return the opening output.
        #[wasm_bindgen]
        pub fn init(&mut self) -> JsValue {
            if self.initialized {
                return JsValue::NULL;
            }
            self.initialized = true;
            let out = self.session.start();
            self.result(out, false)
        }

        /// Process a player command and return the resulting output blocks.
        #[wasm_bindgen]
        pub fn step(&mut self, input: &str) -> JsValue {
            if !self.initialized {
                let _ = self.init();
            }
            let (out, quit) = self.session.step(input);
            self.result(out, quit)
        }

        /// Advance the game clock by `millis` (from a page timer).
        #[wasm_bindgen]
        pub fn advance(&mut self, millis: f64) -> JsValue {
            let elapsed = Duration::from_millis(millis.max(0.0) as u64);
            let out = self.session.advance(elapsed);
            self.result(out, false)
        }

        #[wasm_bindgen]
        pub fn save_blob(&self) -> Option<String> {
            self.session.save_blob().ok()
        }

        #[wasm_bindgen]
        pub fn restore_blob(&mut self, blob: &str) -> bool {
            self.session.restore_blob(blob)
        }
    }
}
