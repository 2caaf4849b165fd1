//====================================================================

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use common::Position;
use serde::{Deserialize, Serialize};

use crate::{error::Result, CharacterDatabase, Roster, RosterError, DEFAULT_SQUAD_NAME};

//====================================================================

/// Saved squad layout: which template id sits in which slot.
///
/// Only ids are kept. Action budgets and inactivity are rebuilt from the
/// templates on load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadRecord {
    #[serde(rename = "squadName", default)]
    pub squad_name: String,
    #[serde(default)]
    pub members: BTreeMap<String, String>,
}

impl SquadRecord {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Member id at `position`, `None` for an empty or missing slot.
    pub fn member(&self, position: Position) -> Option<&str> {
        self.members
            .get(position.key())
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

//====================================================================

impl Roster {
    /// Builds a fresh roster. Every standard position is present; slots with
    /// an empty id, an unknown id or an unknown key stay empty.
    pub fn from_record(record: &SquadRecord, database: &CharacterDatabase) -> Self {
        let name = match record.squad_name.is_empty() {
            true => DEFAULT_SQUAD_NAME,
            false => record.squad_name.as_str(),
        };

        let mut roster = Roster::new(name);

        for (key, id) in &record.members {
            let position = match key.parse::<Position>() {
                Ok(position) => position,
                Err(e) => {
                    log::warn!("Skipping squad entry: {}", e);
                    continue;
                }
            };

            if id.is_empty() {
                continue;
            }

            match database.instantiate(id) {
                Some(unit) => {
                    // Every standard position exists on a fresh roster.
                    roster.set(position, Some(unit)).ok();
                }
                None => log::warn!("Character '{}' not found in database", id),
            }
        }

        log::debug!(
            "Built roster '{}' with {} members",
            roster.name(),
            roster.occupied_count()
        );

        roster
    }

    /// Layout snapshot for saving. Empty slots are written as `""`.
    pub fn to_record(&self) -> SquadRecord {
        let members = self
            .positions()
            .map(|position| {
                let id = self
                    .get(position)
                    .map(|unit| unit.id.clone())
                    .unwrap_or_default();
                (position.key().to_string(), id)
            })
            .collect();

        SquadRecord {
            squad_name: self.name().to_string(),
            members,
        }
    }
}

//====================================================================

pub trait SquadStore {
    fn load(&mut self) -> Result<SquadRecord>;
    fn save(&mut self, record: &SquadRecord) -> Result<()>;
}

impl<S: SquadStore + ?Sized> SquadStore for Box<S> {
    #[inline]
    fn load(&mut self) -> Result<SquadRecord> {
        (**self).load()
    }

    #[inline]
    fn save(&mut self, record: &SquadRecord) -> Result<()> {
        (**self).save(record)
    }
}

//--------------------------------------------------

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[inline]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SquadStore for JsonFileStore {
    fn load(&mut self) -> Result<SquadRecord> {
        log::debug!("Loading squad from {}", self.path.display());
        SquadRecord::from_json_str(&fs::read_to_string(&self.path)?)
    }

    fn save(&mut self, record: &SquadRecord) -> Result<()> {
        log::trace!("Saving squad to {}", self.path.display());
        fs::write(&self.path, record.to_json_string()?)?;
        Ok(())
    }
}

//--------------------------------------------------

/// Keeps the last saved record in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    record: Option<SquadRecord>,
    saves: usize,
}

impl MemoryStore {
    #[inline]
    pub fn new(record: SquadRecord) -> Self {
        Self {
            record: Some(record),
            saves: 0,
        }
    }

    #[inline]
    pub fn record(&self) -> Option<&SquadRecord> {
        self.record.as_ref()
    }

    #[inline]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SquadStore for MemoryStore {
    fn load(&mut self) -> Result<SquadRecord> {
        self.record.clone().ok_or(RosterError::MissingSquad)
    }

    fn save(&mut self, record: &SquadRecord) -> Result<()> {
        self.record = Some(record.clone());
        self.saves += 1;
        Ok(())
    }
}

//====================================================================


//====================================================================
