// libthai/src/engine.rs
//
// Engine facade: one knowledge base, one config, the four analysis
// operations, and an optional memo of full syllable reports.

use std::borrow::Cow;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use libthai_core::{utils, Config, ConsonantClass, KnowledgeBase, SyllableWeight, Tone};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::classifier::{self, classify_detailed, CharacterKind, Classified};
use crate::complex_vowel::{self, ComplexVowelMatch};
use crate::syllable::{self, SyllableStructure};
use crate::tone::{self, ToneResult};

/// One glyph of an analyzed syllable, read in context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphReport {
    pub index: usize,
    pub glyph: char,
    pub kind: CharacterKind,
    /// Display name of the matched record.
    pub name: Option<String>,
    /// Sound of the glyph in this syllable. A complex pattern's romanization
    /// replaces the glyph's own; a coda reports its final sound.
    pub romanization: Option<String>,
    pub complex_vowel: Option<ComplexVowelMatch>,
}

/// Structure, tone and glyph breakdown of one syllable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllableReport {
    pub syllable: String,
    pub structure: SyllableStructure,
    pub tone: ToneResult,
    pub glyphs: Vec<GlyphReport>,
}

/// Thai script analysis engine.
///
/// The knowledge base is shared read-only; the memo is behind a mutex, so an
/// `Engine` can be used from several threads at once.
pub struct Engine {
    kb: Arc<KnowledgeBase>,
    config: Config,
    cache: Option<Mutex<LruCache<String, SyllableReport>>>,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
}

impl Engine {
    /// Create an engine over an already loaded knowledge base.
    pub fn new(kb: Arc<KnowledgeBase>, config: Config) -> Self {
        let cache = NonZeroUsize::new(config.max_cache_size).map(|cap| Mutex::new(LruCache::new(cap)));
        Self {
            kb,
            config,
            cache,
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
        }
    }

    /// Load the knowledge base named by the config (or the embedded one).
    pub fn from_config(config: Config) -> libthai_core::Result<Self> {
        let kb = match config.knowledge_base {
            Some(_) => Arc::new(config.load_knowledge_base()?),
            None => libthai_core::standard::shared(),
        };
        Ok(Self::new(kb, config))
    }

    /// Engine over the embedded standard knowledge base with default config.
    pub fn standard() -> Self {
        Self::new(libthai_core::standard::shared(), Config::default())
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn prepare<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.config.normalize_input {
            Cow::Owned(utils::normalize(text))
        } else {
            Cow::Borrowed(text)
        }
    }

    pub fn classify(&self, glyph: char) -> CharacterKind {
        classifier::classify(&self.kb, glyph)
    }

    pub fn classify_text(&self, text: &str) -> Vec<(char, CharacterKind)> {
        classifier::classify_text(&self.kb, &self.prepare(text))
    }

    pub fn analyze_syllable(&self, syllable: &str) -> SyllableStructure {
        syllable::analyze_syllable(&self.kb, &self.prepare(syllable))
    }

    /// Resolve a tone. `mark` is a tone-mark glyph; a glyph that is not a
    /// registered tone mark is treated as no mark.
    pub fn resolve_tone(&self, class: Option<ConsonantClass>, mark: Option<char>, weight: SyllableWeight) -> ToneResult {
        let record = mark.and_then(|c| {
            let record = self.kb.tone_mark(c);
            if record.is_none() {
                debug!(glyph = %c, "not a registered tone mark; resolving as unmarked");
            }
            record
        });
        tone::resolve_tone(&self.kb, class, record, weight)
    }

    pub fn detect_complex_vowel(&self, glyph: char, word: &str) -> Option<ComplexVowelMatch> {
        complex_vowel::detect_complex_vowel(&self.kb, glyph, &self.prepare(word))
    }

    /// Full analysis of one syllable, memoized by normalized input.
    pub fn analyze(&self, syllable: &str) -> SyllableReport {
        let key = self.prepare(syllable).into_owned();

        if let Some(cache) = &self.cache {
            if let Some(hit) = lock(cache).get(&key) {
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
                trace!(syllable = %key, "analysis cache hit");
                return hit.clone();
            }
            self.cache_misses.fetch_add(1, Ordering::Relaxed);
        }

        let report = self.build_report(&key);

        if let Some(cache) = &self.cache {
            lock(cache).put(key, report.clone());
        }
        report
    }

    /// Analyze several syllables in order.
    pub fn analyze_all<'a, I>(&self, syllables: I) -> Vec<SyllableReport>
    where
        I: IntoIterator<Item = &'a str>,
    {
        syllables.into_iter().map(|s| self.analyze(s)).collect()
    }

    fn build_report(&self, syllable: &str) -> SyllableReport {
        let kb = &*self.kb;
        let structure = syllable::analyze_syllable(kb, syllable);
        let tone = tone::resolve_syllable_tone(kb, &structure);
        let main_idx = structure
            .glyphs
            .iter()
            .position(|&g| Some(g) == structure.main_consonant);
        let coda_idx = if structure.has_coda {
            structure.glyphs.iter().rposition(|&g| Some(g) == structure.final_consonant)
        } else {
            None
        };

        let glyphs = structure
            .glyphs
            .iter()
            .enumerate()
            .map(|(index, &glyph)| {
                let classified = classify_detailed(kb, glyph);
                let complex = match classified {
                    Classified::Vowel(_) => complex_vowel::detect_complex_vowel(kb, glyph, syllable),
                    Classified::Consonant(_) if Some(index) != main_idx => {
                        complex_vowel::detect_complex_vowel(kb, glyph, syllable)
                    }
                    _ => None,
                };
                let (name, own_sound) = match classified {
                    Classified::ToneMark(m) => (Some(m.name.clone()), None),
                    Classified::Consonant(c) if Some(index) == coda_idx => (Some(c.name.clone()), c.final_sound.clone()),
                    Classified::Consonant(c) => (Some(c.name.clone()), Some(c.initial_sound.clone())),
                    Classified::Vowel(v) => (Some(v.name.clone()), Some(v.romanization.clone())),
                    Classified::Unknown => (None, None),
                };
                let romanization = complex
                    .as_ref()
                    .map(|m| m.romanization.clone())
                    .or(own_sound)
                    .filter(|s| !s.is_empty());
                GlyphReport {
                    index,
                    glyph,
                    kind: classified.kind(),
                    name: name.filter(|s| !s.is_empty()),
                    romanization,
                    complex_vowel: complex,
                }
            })
            .collect();

        SyllableReport {
            syllable: syllable.to_string(),
            structure,
            tone,
            glyphs,
        }
    }

    /// Tone of a syllable, shorthand for `analyze(s).tone.tone`.
    pub fn tone_of(&self, syllable: &str) -> Tone {
        self.analyze(syllable).tone.tone
    }

    /// Get cache statistics for monitoring.
    ///
    /// Returns (hits, misses) tuple.
    pub fn cache_stats(&self) -> (usize, usize) {
        (
            self.cache_hits.load(Ordering::Relaxed),
            self.cache_misses.load(Ordering::Relaxed),
        )
    }

    /// Get cache hit rate as a percentage (0.0 to 100.0).
    ///
    /// Returns None if no cache accesses have been made yet.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let (hits, misses) = self.cache_stats();
        let total = hits + misses;
        if total == 0 {
            None
        } else {
            Some((hits as f32 / total as f32) * 100.0)
        }
    }

    /// Get current cache size (number of entries).
    pub fn cache_size(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| lock(c).len())
    }

    /// Get cache capacity (0 when caching is disabled).
    pub fn cache_capacity(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| lock(c).cap().get())
    }

    /// Clear the cache and reset its counters.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            lock(cache).clear();
        }
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
    }
}

// The cache holds plain values, so a poisoned lock is still consistent.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}
