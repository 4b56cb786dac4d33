pub mod config;
pub mod db;
pub mod decompose;
pub mod dictionary;
pub mod error;
pub mod language;
pub mod models;
pub mod store;
pub mod utils;
pub mod vocab;

pub use dictionary::{CedictDictionary, Dictionary, EmptyDictionary};
pub use error::{FlashcardError, FlashcardResult};
pub use models::{TermId, TermRecord};
pub use store::{GapTracker, Lookup, TermStore};
pub use vocab::Vocabulary;
