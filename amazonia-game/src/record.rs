//! Save-record contract for players and sessions.
//!
//! Records are plain serde structs whose JSON layout is the save format.
//! Decoding goes through [`GameRecord::from_value`] so that absent keys are
//! reported together as [`GameError::MissingField`] before any typed parse.
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GameError;
use crate::manager::GameManager;
use crate::player::{Player, PlayerParts, Vital};
use crate::player_class::PlayerClass;
use crate::range::Range;

const GAME_KEYS: [&str; 3] = ["player", "time", "days_survived"];
const PLAYER_KEYS: [&str; 13] = [
    "name",
    "player_class",
    "hp",
    "max_hp",
    "hunger",
    "max_hunger",
    "energy",
    "max_energy",
    "fish_pull_delay",
    "hunt_success_rate",
    "run_success_rate",
    "fish_amount",
    "meat_amount",
];
const RANGE_FIELDS: [&str; 3] = ["fish_pull_delay", "hunt_success_rate", "run_success_rate"];
const RANGE_KEYS: [&str; 2] = ["min", "max"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerClassRecord {
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub player_class: PlayerClassRecord,
    pub hp: f64,
    pub max_hp: f64,
    pub hunger: f64,
    pub max_hunger: f64,
    pub energy: f64,
    pub max_energy: f64,
    pub fish_pull_delay: Range,
    pub hunt_success_rate: Range,
    pub run_success_rate: Range,
    pub fish_amount: u32,
    pub meat_amount: u32,
}

/// One saved session, keyed by `player.name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub player: PlayerRecord,
    pub time: f64,
    pub days_survived: u32,
}

impl GameRecord {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.player.name
    }

    /// Decode a record from an untyped JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::MissingField`] listing every absent key,
    /// [`GameError::CorruptRecord`] when a present value has the wrong shape.
    pub fn from_value(value: &Value) -> Result<Self, GameError> {
        let missing = missing_keys(value)?;
        if !missing.is_empty() {
            warn!("rejecting save record; missing keys {missing:?}");
            return Err(GameError::MissingField(missing));
        }
        Self::deserialize(value).map_err(|err| {
            warn!("rejecting save record: {err}");
            GameError::CorruptRecord(err.to_string())
        })
    }

    /// # Errors
    ///
    /// See [`GameRecord::from_value`]; unparsable JSON is a corrupt record.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let value: Value =
            serde_json::from_str(json).map_err(|err| GameError::CorruptRecord(err.to_string()))?;
        Self::from_value(&value)
    }

    /// # Errors
    ///
    /// Returns [`GameError::CorruptRecord`] when a float is not representable
    /// in JSON.
    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string(self).map_err(|err| GameError::CorruptRecord(err.to_string()))
    }
}

fn missing_keys(value: &Value) -> Result<Vec<String>, GameError> {
    let Some(root) = value.as_object() else {
        return Err(GameError::CorruptRecord("save record must be an object".into()));
    };
    let mut missing: Vec<String> = GAME_KEYS
        .iter()
        .filter(|key| !root.contains_key(**key))
        .map(|key| (*key).to_string())
        .collect();

    let Some(player) = root.get("player").and_then(Value::as_object) else {
        return Ok(missing);
    };
    for key in PLAYER_KEYS {
        if !player.contains_key(key) {
            missing.push(format!("player.{key}"));
        }
    }
    if let Some(class) = player.get("player_class").and_then(Value::as_object)
        && !class.contains_key("class_name")
    {
        missing.push("player.player_class.class_name".into());
    }
    for field in RANGE_FIELDS {
        if let Some(range) = player.get(field).and_then(Value::as_object) {
            for key in RANGE_KEYS {
                if !range.contains_key(key) {
                    missing.push(format!("player.{field}.{key}"));
                }
            }
        }
    }
    Ok(missing)
}

impl Player {
    #[must_use]
    pub fn to_record(&self) -> PlayerRecord {
        PlayerRecord {
            name: self.name().to_string(),
            player_class: PlayerClassRecord {
                class_name: self.class().name().to_string(),
            },
            hp: self.hp().current(),
            max_hp: self.hp().max(),
            hunger: self.hunger().current(),
            max_hunger: self.hunger().max(),
            energy: self.energy().current(),
            max_energy: self.energy().max(),
            fish_pull_delay: self.fish_pull_delay(),
            hunt_success_rate: self.hunt_success_rate(),
            run_success_rate: self.run_success_rate(),
            fish_amount: self.fish_amount,
            meat_amount: self.meat_amount,
        }
    }

    /// Restore a player exactly as saved; the class buff is not reapplied.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownVariant`] for an unrecognized class and
    /// [`GameError::InvalidArgument`] when a vital lies outside its bounds.
    pub fn from_record(record: &PlayerRecord) -> Result<Self, GameError> {
        let class: PlayerClass = record.player_class.class_name.parse()?;
        Self::from_parts(PlayerParts {
            name: record.name.clone(),
            class,
            hp: Vital::new("hp", record.hp, record.max_hp)?,
            hunger: Vital::new("hunger", record.hunger, record.max_hunger)?,
            energy: Vital::new("energy", record.energy, record.max_energy)?,
            fish_pull_delay: record.fish_pull_delay,
            hunt_success_rate: record.hunt_success_rate,
            run_success_rate: record.run_success_rate,
            fish_amount: record.fish_amount,
            meat_amount: record.meat_amount,
        })
    }
}

impl GameManager {
    #[must_use]
    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            player: self.player().to_record(),
            time: self.time(),
            days_survived: self.days_survived(),
        }
    }

    /// # Errors
    ///
    /// Propagates player decoding errors and rejects clock readings outside
    /// `[0, 24)`.
    pub fn from_record(record: &GameRecord) -> Result<Self, GameError> {
        let player = Player::from_record(&record.player)?;
        Self::with_clock(player, record.time, record.days_survived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use serde_json::json;

    use crate::manager::TimeTaxes;

    fn sample_manager() -> GameManager {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut player = Player::create("Iara", PlayerClass::Fisher).unwrap();
        player.fish_amount = 3;
        player.meat_amount = 1;
        player.grow_fishing(0.05, &mut rng).unwrap();
        let mut manager = GameManager::new(player);
        manager.advance_time(7.25, TimeTaxes::ALL, &mut rng).unwrap();
        manager
    }

    #[test]
    fn records_use_the_save_layout() {
        let value = serde_json::to_value(sample_manager().to_record()).unwrap();
        assert_eq!(value["player"]["player_class"]["class_name"], "Fisher");
        assert_eq!(value["player"]["fish_amount"], 3);
        assert!(value["player"]["hunt_success_rate"]["min"].is_f64());
        assert_eq!(value["days_survived"], 0);
    }

    #[test]
    fn manager_round_trips_through_json() {
        let manager = sample_manager();
        let json = manager.to_record().to_json().unwrap();
        let restored = GameManager::from_record(&GameRecord::from_json(&json).unwrap()).unwrap();
        assert_eq!(restored.player(), manager.player());
        assert_eq!(restored.to_record(), manager.to_record());
        assert_eq!(restored.to_record().to_json().unwrap(), json);
    }

    #[test]
    fn missing_time_is_named() {
        let mut value = serde_json::to_value(sample_manager().to_record()).unwrap();
        value.as_object_mut().unwrap().remove("time");
        assert_eq!(
            GameRecord::from_value(&value),
            Err(GameError::MissingField(vec!["time".to_string()]))
        );
    }

    #[test]
    fn nested_missing_keys_are_collected() {
        let mut value = serde_json::to_value(sample_manager().to_record()).unwrap();
        let player = value["player"].as_object_mut().unwrap();
        player.remove("max_hp");
        player["run_success_rate"].as_object_mut().unwrap().remove("max");
        value.as_object_mut().unwrap().remove("days_survived");
        let Err(GameError::MissingField(keys)) = GameRecord::from_value(&value) else {
            panic!("expected missing field error");
        };
        assert_eq!(
            keys,
            vec![
                "days_survived".to_string(),
                "player.max_hp".to_string(),
                "player.run_success_rate.max".to_string(),
            ]
        );
    }

    #[test]
    fn wrong_shapes_are_corrupt() {
        assert!(matches!(
            GameRecord::from_json("[1, 2]"),
            Err(GameError::CorruptRecord(_))
        ));
        assert!(matches!(
            GameRecord::from_json("{not json"),
            Err(GameError::CorruptRecord(_))
        ));
        let mut value = serde_json::to_value(sample_manager().to_record()).unwrap();
        value["time"] = json!("noon");
        assert!(matches!(
            GameRecord::from_value(&value),
            Err(GameError::CorruptRecord(_))
        ));
    }

    #[test]
    fn unknown_class_is_rejected() {
        let mut record = sample_manager().to_record();
        record.player.player_class.class_name = "Shaman".into();
        assert!(matches!(
            GameManager::from_record(&record),
            Err(GameError::UnknownVariant(_))
        ));
    }

    #[test]
    fn out_of_bounds_vitals_are_rejected() {
        let mut record = sample_manager().to_record();
        record.player.hp = record.player.max_hp + 1.0;
        assert!(matches!(
            Player::from_record(&record.player),
            Err(GameError::InvalidArgument { field: "hp", .. })
        ));
    }

    #[test]
    fn loading_does_not_reapply_class_buff() {
        let player = Player::create("Iara", PlayerClass::Hunter).unwrap();
        let restored = Player::from_record(&player.to_record()).unwrap();
        assert_eq!(restored.hunt_success_rate(), player.hunt_success_rate());
    }
}
