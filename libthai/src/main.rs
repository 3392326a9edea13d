use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libthai::{CharacterKind, ConsonantClass, Engine, SyllableReport, SyllableWeight, ToneResult};
use libthai_core::Config;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "libthai", version, about = "Thai glyph classification, syllable structure and tone analysis")]
struct Args {
    /// Knowledge base file (.json, .toml, .bin, .bincode); defaults to the embedded one
    #[arg(long, global = true)]
    kb: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Classify every glyph of a text
    Classify { text: String },
    /// Analyze one or more syllables
    Analyze {
        #[arg(required = true)]
        syllables: Vec<String>,
    },
    /// Resolve a tone from class, tone mark and weight
    Tone {
        #[arg(long)]
        class: ConsonantClass,
        #[arg(long)]
        mark: Option<char>,
        #[arg(long, default_value = "live")]
        weight: SyllableWeight,
    },
    /// Detect the complex vowel a glyph belongs to within a word
    Vowel { glyph: char, word: String },
    /// Read syllables from stdin, one per line
    Repl,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn build_engine(args: &Args) -> Result<Engine> {
    let mut config = match &args.config {
        Some(path) => Config::load_toml(path)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(kb) = &args.kb {
        config.set_knowledge_base(kb);
    }
    Engine::from_config(config).context("loading knowledge base")
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_report(report: &SyllableReport) {
    let s = &report.structure;
    let show = |c: Option<char>| c.map_or_else(|| "-".to_string(), |c| c.to_string());
    let join = |cs: &[char]| {
        if cs.is_empty() {
            "-".to_string()
        } else {
            cs.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
        }
    };

    println!("{}", report.syllable);
    println!(
        "  main consonant:  {} ({})",
        show(s.main_consonant),
        s.consonant_class.map_or("no class", |c| c.as_str())
    );
    match (s.has_coda, s.final_sound_type) {
        (true, Some(t)) => println!("  final consonant: {} ({t})", show(s.final_consonant)),
        (true, None) => println!("  final consonant: {} (unlisted)", show(s.final_consonant)),
        (false, _) => println!("  final consonant: {} (no coda)", show(s.final_consonant)),
    }
    println!("  vowels:          {}", join(&s.vowels));
    println!("  tone marks:      {}", join(&s.tone_marks));
    if let Some(m) = &s.complex_vowel {
        println!("  complex vowel:   {} ({}, {})", m.pattern, m.romanization, m.name);
    }
    println!("  vowel length:    {}", s.vowel_length);
    println!("  weight:          {}", s.syllable_weight);
    print_tone(&report.tone);
    for g in &report.glyphs {
        println!(
            "    {}  {:<10} {:<6} {}",
            g.glyph,
            g.kind.as_str(),
            g.romanization.as_deref().unwrap_or("-"),
            g.name.as_deref().unwrap_or("")
        );
    }
    println!();
}

fn print_tone(tone: &ToneResult) {
    println!("  tone:            {} ({})", tone.tone, tone.rule);
}

fn repl(engine: &Engine, json: bool) -> Result<()> {
    println!("Type a Thai syllable and press Enter. Ctrl+D to exit.");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let report = engine.analyze(input);
        if json {
            print_json(&report)?;
        } else {
            print_report(&report);
        }
        io::stdout().flush()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let engine = build_engine(&args)?;

    match args.command.as_ref().unwrap_or(&Command::Repl) {
        Command::Classify { text } => {
            let kinds = engine.classify_text(text);
            if args.json {
                print_json(&kinds)?;
            } else {
                for (glyph, kind) in kinds {
                    let marker = if kind == CharacterKind::Unknown { "?" } else { "" };
                    println!("{glyph}\t{kind}{marker}");
                }
            }
        }
        Command::Analyze { syllables } => {
            let reports = engine.analyze_all(syllables.iter().map(String::as_str));
            if args.json {
                print_json(&reports)?;
            } else {
                reports.iter().for_each(print_report);
            }
        }
        Command::Tone { class, mark, weight } => {
            let result = engine.resolve_tone(Some(*class), *mark, *weight);
            if args.json {
                print_json(&result)?;
            } else {
                print_tone(&result);
            }
        }
        Command::Vowel { glyph, word } => {
            let found = engine.detect_complex_vowel(*glyph, word);
            if args.json {
                print_json(&found)?;
            } else {
                match found {
                    Some(m) => println!(
                        "{glyph} in {word}: {} -> {} ({}{})",
                        m.pattern,
                        m.romanization,
                        m.name,
                        if m.is_first_constituent { ", first glyph" } else { "" }
                    ),
                    None => println!("{glyph} in {word}: not part of a complex vowel"),
                }
            }
        }
        Command::Repl => repl(&engine, args.json)?,
    }
    Ok(())
}
