use anyhow::Result;
use clap::Parser;
use kb_tools::{init_logging, load_validated, Summary};
use libthai_core::{KnowledgeBase, ValidationMode};
use std::path::PathBuf;

/// Print record counts of a knowledge base, or look up single glyphs.
#[derive(Parser)]
#[command(name = "inspect_kb", version)]
struct Args {
    /// knowledge base file (.json, .toml, .bin, .bincode); the embedded one if omitted
    kb: Option<PathBuf>,

    /// glyphs to look up
    #[arg(long, num_args = 1..)]
    glyph: Vec<char>,

    #[arg(long)]
    lenient: bool,

    #[arg(long)]
    json: bool,
}

fn lookup(kb: &KnowledgeBase, glyph: char) {
    println!("{glyph} (U+{:04X})", glyph as u32);
    if let Some(m) = kb.tone_mark(glyph) {
        println!("  tone mark  {}", m.name);
    }
    if let Some(c) = kb.consonant(glyph) {
        let class = c.class.map_or("no class", |c| c.as_str());
        println!("  consonant  {} ({class}, initial {:?}, final {:?})", c.name, c.initial_sound, c.final_sound);
        if let Some(t) = kb.final_sound_type(glyph) {
            println!("  final      {t}");
        }
    }
    if let Some(v) = kb.vowel(glyph) {
        println!("  vowel      {} {} ({}, {})", v.key, v.name, v.romanization, v.length);
    }
    for p in kb.complex_vowel_patterns().filter(|p| p.contains(glyph)) {
        let before: String = p.leading_constituents().iter().collect();
        let after: String = p.trailing_constituents().iter().collect();
        println!("  in         {} ({}; [{before}] consonant [{after}])", p.key, p.romanization);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(0);

    let mode = if args.lenient {
        ValidationMode::Lenient
    } else {
        ValidationMode::Strict
    };
    let kb = match &args.kb {
        Some(path) => load_validated(path, mode)?.1,
        None => KnowledgeBase::standard()?,
    };

    if args.glyph.is_empty() {
        let summary = Summary::of(&kb);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("{summary}");
        }
    }
    for &glyph in &args.glyph {
        lookup(&kb, glyph);
    }
    Ok(())
}
