//! # Cards Module
//!
//! Deck folders, theme pools, per-video card selection and the card catalog.

pub mod catalog;
pub mod copy;
pub mod deck;
pub mod pool;

pub use catalog::{truncate_chars, CardCatalog, CardInfo};
pub use copy::{CatalogCopyWriter, CopyWriter};
pub use deck::{Deck, DeckLibrary};
pub use pool::{CardPool, CardSelection};
