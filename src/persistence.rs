//! Quicksave/quickload against an abstract key-value store.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::world::{Player, World};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store; used by tests and the browser build.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key)?, value)?;
        Ok(())
    }
}

/// The persisted player record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub inventory: Vec<String>,
    pub health: i32,
    pub mana: i32,
    pub flags: Vec<String>,
    pub spells: Vec<String>,
    pub current_room: String,
    /// Unix milliseconds.
    pub timestamp: i64,
}

impl SaveRecord {
    pub fn capture(player: &Player) -> Self {
        let mut flags: Vec<String> = player.flags().iter().cloned().collect();
        flags.sort();
        let mut spells: Vec<String> = player.spells().iter().cloned().collect();
        spells.sort();

        SaveRecord {
            inventory: player.inventory().to_vec(),
            health: player.health(),
            mana: player.mana(),
            flags,
            spells,
            current_room: player.current_room.clone(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn into_player(self) -> Player {
        Player::restore(
            self.current_room,
            self.inventory,
            self.health,
            self.mana,
            self.flags,
            self.spells,
        )
    }
}

pub fn encode(player: &Player) -> Result<String, StoreError> {
    Ok(serde_json::to_string(&SaveRecord::capture(player))?)
}

/// Parse a saved blob back into a player. Anything unusable (bad JSON, a
/// room this world does not have) is treated as no save at all.
pub fn decode(blob: &str, world: &World) -> Option<Player> {
    let record: SaveRecord = match serde_json::from_str(blob) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("ignoring corrupt quicksave: {}", e);
            return None;
        }
    };

    if world.room(&record.current_room).is_none() {
        log::warn!(
            "ignoring quicksave for unknown room '{}'",
            record.current_room
        );
        return None;
    }

    Some(record.into_player())
}

pub fn quicksave(store: &mut dyn KeyValueStore, key: &str, player: &Player) -> Result<(), StoreError> {
    let blob = encode(player)?;
    store.set(key, &blob)?;
    log::info!("quicksaved under '{}' ({} bytes)", key, blob.len());
    Ok(())
}

/// Never fails: store errors and corrupt records both come back as `None`.
pub fn quickload(store: &dyn KeyValueStore, key: &str, world: &World) -> Option<Player> {
    let blob = match store.get(key) {
        Ok(Some(b)) => b,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("quickload from '{}' failed: {}", key, e);
            return None;
        }
    };

    let player = decode(&blob, world)?;
    log::info!("quickloaded '{}' into room '{}'", key, player.current_room);
    Some(player)
}
