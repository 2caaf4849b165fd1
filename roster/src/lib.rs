//====================================================================

pub use database::CharacterDatabase;
pub use error::{Result, RosterError};
pub use persistence::{JsonFileStore, MemoryStore, SquadRecord, SquadStore};
pub use store::{Roster, DEFAULT_SQUAD_NAME};
pub use unit::Unit;

pub use common::Position;
pub use hecs::Ref;

pub mod database;
pub mod error;
pub mod persistence;
pub mod store;
pub mod unit;

//====================================================================
