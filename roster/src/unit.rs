//====================================================================

use serde::{Deserialize, Serialize};

//====================================================================

/// A squad member and its per-round action budget.
///
/// Field names on the wire follow the character database layout
/// (`characterName`, `initialActions`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(rename = "characterName", default)]
    pub id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(default)]
    pub health: i32,
    #[serde(rename = "attackPower", default)]
    pub attack_power: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub initiative: i32,

    #[serde(rename = "actions", default)]
    pub actions_remaining: u32,
    #[serde(rename = "initialActions")]
    pub actions_per_round: u32,

    #[serde(rename = "spritePath", default)]
    pub sprite_ref: String,
    #[serde(default)]
    pub inactive: bool,
}

impl Unit {
    pub fn new(id: impl Into<String>, initiative: i32, actions_per_round: u32) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            health: 0,
            attack_power: 0,
            defense: 0,
            initiative,
            actions_remaining: actions_per_round,
            actions_per_round,
            sprite_ref: String::new(),
            inactive: false,
        }
    }

    #[inline]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    #[inline]
    pub fn with_stats(mut self, health: i32, attack_power: i32, defense: i32) -> Self {
        self.health = health;
        self.attack_power = attack_power;
        self.defense = defense;
        self
    }
}

impl Unit {
    /// Not inactive and still holding at least one action.
    #[inline]
    pub fn is_eligible(&self) -> bool {
        !self.inactive && self.actions_remaining > 0
    }

    /// Spends one action, never going below zero.
    #[inline]
    pub fn spend_action(&mut self) {
        self.actions_remaining = self.actions_remaining.saturating_sub(1);
    }

    /// Marks the unit inactive once its budget is spent. Inactivity is never
    /// derived on read, so this must follow every `spend_action`.
    #[inline]
    pub fn check_inactive(&mut self) {
        if self.actions_remaining == 0 {
            self.inactive = true;
        }
    }

    #[inline]
    pub fn reset_round(&mut self) {
        self.actions_remaining = self.actions_per_round;
        self.inactive = false;
    }
}

//====================================================================


//====================================================================
