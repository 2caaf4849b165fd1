//====================================================================

use std::{fs, path::Path};

use common::FxHashMap;

use crate::{error::Result, RosterError, Unit};

//====================================================================

/// Template records keyed by unit id.
///
/// Templates are never handed out by reference to play code; `instantiate`
/// always returns a fresh copy.
#[derive(Debug, Default, Clone)]
pub struct CharacterDatabase {
    templates: FxHashMap<String, Unit>,
}

impl CharacterDatabase {
    pub fn from_templates(templates: impl IntoIterator<Item = Unit>) -> Result<Self> {
        let mut database = Self::default();
        for template in templates {
            database.insert(template)?;
        }
        Ok(database)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: FxHashMap<String, Unit> = serde_json::from_str(json)?;

        let mut database = Self::default();
        for (id, mut template) in raw {
            // The map key wins over whatever name the record carries.
            template.id = id;
            database.insert(template)?;
        }

        log::debug!("Loaded {} character templates", database.len());
        Ok(database)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading character database from {}", path.display());
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn insert(&mut self, template: Unit) -> Result<()> {
        if template.id.is_empty() {
            return Err(RosterError::InvalidTemplate {
                id: template.id,
                reason: "empty id".into(),
            });
        }

        if template.actions_per_round == 0 {
            return Err(RosterError::InvalidTemplate {
                id: template.id,
                reason: "actions per round must be positive".into(),
            });
        }

        self.templates.insert(template.id.clone(), template);
        Ok(())
    }

    #[inline]
    pub fn template(&self, id: &str) -> Option<&Unit> {
        self.templates.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Fresh unit for battle: full action budget, not inactive.
    pub fn instantiate(&self, id: &str) -> Option<Unit> {
        let mut unit = self.templates.get(id)?.clone();
        unit.reset_round();
        Some(unit)
    }
}

//====================================================================


//====================================================================
