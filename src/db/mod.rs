//! Persistence module split across logical submodules.

mod collections;
mod connection;
mod slots;

pub use collections::{load_collection, save_collection, Slot};
pub use connection::{ensure_schema, SqliteSlots};
pub use slots::{MemorySlots, SlotStore};
