//! The standard Thai knowledge base shipped with the crate.
//!
//! 44 consonants with their class and sounds, the common vowel inventory
//! (single signs and discontinuous patterns written around `-`), the four
//! tone marks, the default tone table and the sonorant/obstruent finals.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::error::Result;
use crate::knowledge::KnowledgeBase;
use crate::schema::{RawKnowledgeBase, ValidationMode};

/// JSON source of the standard knowledge base.
pub const STANDARD_JSON: &str = include_str!("../data/thai.json");

static SHARED: Lazy<Arc<KnowledgeBase>> = Lazy::new(|| {
    Arc::new(KnowledgeBase::standard().expect("embedded standard knowledge base is valid"))
});

impl KnowledgeBase {
    /// Parse and validate the embedded standard knowledge base.
    pub fn standard() -> Result<Self> {
        Self::from_json_str(STANDARD_JSON, ValidationMode::Strict)
    }
}

/// The raw form of the standard knowledge base, e.g. for re-serialization.
pub fn raw() -> Result<RawKnowledgeBase> {
    RawKnowledgeBase::from_json_str(STANDARD_JSON)
}

/// Process-wide shared copy of the standard knowledge base, parsed on first use.
pub fn shared() -> Arc<KnowledgeBase> {
    Arc::clone(&SHARED)
}
