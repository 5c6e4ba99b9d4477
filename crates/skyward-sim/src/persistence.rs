//! Save/load of player state as flat JSON snapshots.
//!
//! Only durable player state is persisted (stats, aircraft, loadout,
//! settings); world entities are rebuilt on load. Failures surface as
//! `SaveError` and are logged at the call site, never fatal.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use skyward_core::components::Weapon;
use skyward_core::enums::AircraftModel;

use crate::progress::PlayerProgress;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save data malformed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Full save data written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub player: SavedPlayer,
    pub aircraft: SavedAircraft,
    pub settings: SavedSettings,
    pub slot_name: String,
    /// Simulation tick at which the save was written.
    pub saved_at_tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPlayer {
    pub progress: PlayerProgress,
    pub health: f64,
    pub fuel: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAircraft {
    pub model: AircraftModel,
    pub engine_level: u32,
    pub armor_level: u32,
    pub weapons: Vec<Weapon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSettings {
    pub difficulty: f64,
}

pub fn save_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{}.json", slot))
}

pub fn save_to_file(dir: &Path, slot: &str, data: &SaveData) -> Result<(), SaveError> {
    fs::create_dir_all(dir)?;
    let path = save_path(dir, slot);
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&path, json)?;
    Ok(())
}

pub fn load_from_file(dir: &Path, slot: &str) -> Result<SaveData, SaveError> {
    let path = save_path(dir, slot);
    let json = fs::read_to_string(&path)?;
    let data: SaveData = serde_json::from_str(&json)?;
    Ok(data)
}

/// Slot names of every readable save in the directory, newest first.
pub fn list_saves(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut saves: Vec<(u64, String)> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            if let Ok(json) = fs::read_to_string(&path) {
                if let Ok(data) = serde_json::from_str::<SaveData>(&json) {
                    saves.push((data.saved_at_tick, data.slot_name));
                }
            }
        }
    }
    saves.sort_by(|a, b| b.0.cmp(&a.0));
    saves.into_iter().map(|(_, slot)| slot).collect()
}

pub fn delete_save(dir: &Path, slot: &str) -> Result<(), SaveError> {
    let path = save_path(dir, slot);
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyward_core::enums::WeaponKind;

    fn make_save_data(slot: &str, tick: u64) -> SaveData {
        SaveData {
            player: SavedPlayer {
                progress: PlayerProgress {
                    credits: 1500,
                    experience: 250,
                    level: 2,
                },
                health: 80.0,
                fuel: 60.0,
            },
            aircraft: SavedAircraft {
                model: AircraftModel::Fighter,
                engine_level: 2,
                armor_level: 1,
                weapons: vec![Weapon {
                    kind: WeaponKind::Machinegun,
                    damage: 10,
                    ammo: 320,
                    max_ammo: 500,
                    cooldown_secs: 0.1,
                    last_fired_tick: 0,
                    projectile_speed: 5.0,
                    range: 200.0,
                }],
            },
            settings: SavedSettings { difficulty: 1.0 },
            slot_name: slot.to_string(),
            saved_at_tick: tick,
        }
    }

    #[test]
    fn save_data_roundtrip() {
        let data = make_save_data("test", 500);
        let json = serde_json::to_string(&data).unwrap();
        let restored: SaveData = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.player.progress.credits, 1500);
        assert_eq!(restored.aircraft.model, AircraftModel::Fighter);
        assert_eq!(restored.aircraft.weapons.len(), 1);
        assert_eq!(restored.slot_name, "test");
    }

    #[test]
    fn save_and_load_file() {
        let dir = std::env::temp_dir().join("skyward_test_save_load");
        let _ = fs::remove_dir_all(&dir);

        let data = make_save_data("slot1", 300);
        save_to_file(&dir, "slot1", &data).unwrap();
        let loaded = load_from_file(&dir, "slot1").unwrap();
        assert_eq!(loaded.saved_at_tick, 300);
        assert_eq!(loaded.player.progress.experience, 250);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_save_is_error() {
        let dir = std::env::temp_dir().join("skyward_test_missing");
        let _ = fs::remove_dir_all(&dir);
        assert!(load_from_file(&dir, "nope").is_err());
    }

    #[test]
    fn list_saves_newest_first() {
        let dir = std::env::temp_dir().join("skyward_test_list");
        let _ = fs::remove_dir_all(&dir);

        save_to_file(&dir, "early", &make_save_data("early", 100)).unwrap();
        save_to_file(&dir, "late", &make_save_data("late", 900)).unwrap();

        let saves = list_saves(&dir);
        assert_eq!(saves, vec!["late".to_string(), "early".to_string()]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn delete_nonexistent_save_ok() {
        let dir = std::env::temp_dir().join("skyward_test_delete_noop");
        delete_save(&dir, "nope").unwrap();
    }
}
