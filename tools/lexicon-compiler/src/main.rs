use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use gist_graph::DepGraph;
use gist_lexicon::{build_lexicon, normalize_phrase};
use gist_minimizer::{CompiledTables, Minimizer};
use gist_protocol::{Lexicon, Phrase, RuleTables, Token, TokenIdx};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use serde::Deserialize;

#[derive(Parser)]
#[command(author, version, about = "Compiles collocation lexicons and relation tables to rkyv binaries")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a JSON collocation list into a lexicon binary
    Lexicon {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Compile a JSON relation-table file into a rule-table binary
    Rules {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Minimize one phrase described in a JSON file, to smoke-test
    /// compiled artifacts end to end
    Check {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        lexicon: Option<PathBuf>,
        #[arg(short, long, value_name = "FILE")]
        rules: Option<PathBuf>,
    },
}

/// JSON shape of one dependency-parsed sentence plus the phrase to
/// minimize, as handed over by the upstream parsing pipeline.
#[derive(Deserialize)]
struct SentenceSpec {
    tokens: Vec<TokenSpec>,
    edges: Vec<EdgeSpec>,
    phrase: Vec<u32>,
    head: u32,
}

#[derive(Deserialize)]
struct TokenSpec {
    idx: u32,
    surface: String,
    lemma: String,
    pos: String,
    #[serde(default)]
    ner: Option<String>,
    relation: String,
}

#[derive(Deserialize)]
struct EdgeSpec {
    head: u32,
    dependent: u32,
    label: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Lexicon { input, output } => compile_lexicon(&input, &output),
        Command::Rules { input, output } => compile_rules(&input, &output),
        Command::Check { input, lexicon, rules } => check(&input, lexicon.as_deref(), rules.as_deref()),
    }
}

fn compile_lexicon(input: &Path, output: &Path) -> Result<()> {
    println!("📖 Reading JSON from {input:?}...");
    let raw = fs::read_to_string(input).with_context(|| format!("reading {input:?}"))?;
    let listed: Lexicon = serde_json::from_str(&raw).context("parsing collocation list")?;

    // Normalize, sort and dedup so the archived form can be binary-searched
    let lexicon = build_lexicon(listed.version, listed.entries);
    println!(
        "⚙️  Compiling lexicon version {} with {} entries...",
        lexicon.version,
        lexicon.entries.len()
    );

    write_archive(&lexicon, output)?;
    println!("✅ Success! Binary written to {output:?}");
    Ok(())
}

fn compile_rules(input: &Path, output: &Path) -> Result<()> {
    println!("📖 Reading JSON from {input:?}...");
    let raw = fs::read_to_string(input).with_context(|| format!("reading {input:?}"))?;
    let tables: RuleTables = serde_json::from_str(&raw).context("parsing relation tables")?;

    // Reject malformed patterns at compile time, not in the engine
    CompiledTables::compile(&tables).context("validating relation patterns")?;
    println!(
        "⚙️  Compiling rule tables version {} ({} safe, {} entity, {} dictionary patterns)...",
        tables.version,
        tables.safe_head.len(),
        tables.safe_entity.len(),
        tables.dictionary.len()
    );

    write_archive(&tables, output)?;
    println!("✅ Success! Binary written to {output:?}");
    Ok(())
}

fn check(input: &Path, lexicon_path: Option<&Path>, rules_path: Option<&Path>) -> Result<()> {
    let raw = fs::read_to_string(input).with_context(|| format!("reading {input:?}"))?;
    let spec: SentenceSpec = serde_json::from_str(&raw).context("parsing sentence spec")?;

    let tables = match rules_path {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading {path:?}"))?;
            let artifact: RuleTables = serde_json::from_str(&raw).context("parsing relation tables")?;
            CompiledTables::compile(&artifact).context("validating relation patterns")?
        }
        None => CompiledTables::stanford_defaults(),
    };

    let mut graph = DepGraph::new();
    for edge in &spec.edges {
        graph.add_edge(TokenIdx(edge.head), TokenIdx(edge.dependent), edge.label.as_str());
    }

    let tokens: Vec<Token> = spec
        .phrase
        .iter()
        .map(|idx| {
            spec.tokens
                .iter()
                .find(|t| t.idx == *idx)
                .map(|t| Token {
                    idx: TokenIdx(t.idx),
                    surface: t.surface.clone(),
                    lemma: t.lemma.clone(),
                    pos: t.pos.clone(),
                    ner: t.ner.clone(),
                    relation: t.relation.clone(),
                })
                .ok_or_else(|| anyhow!("phrase references unknown token {idx}"))
        })
        .collect::<Result<_>>()?;

    let mut phrase = Phrase::new(tokens, TokenIdx(spec.head)).context("building phrase")?;
    println!("📖 Input phrase: {:?}", normalize_phrase(&phrase));

    match lexicon_path {
        Some(path) => {
            let bytes = fs::read(path).with_context(|| format!("reading {path:?}"))?;
            let archived = rkyv::check_archived_root::<Lexicon>(&bytes)
                .map_err(|e| anyhow!("lexicon artifact failed validation: {e}"))?;
            Minimizer::new(&tables, archived).minimize_object(&mut phrase, &graph);
        }
        None => Minimizer::safe_only(&tables).minimize_object(&mut phrase, &graph),
    }

    println!("✅ Minimized phrase: {:?}", normalize_phrase(&phrase));
    Ok(())
}

fn write_archive<T>(value: &T, output: &Path) -> Result<()>
where
    T: rkyv::Serialize<AllocSerializer<1024>>,
{
    let mut serializer = AllocSerializer::<1024>::default();
    serializer
        .serialize_value(value)
        .map_err(|e| anyhow!("rkyv serialization failed: {e}"))?;
    let bytes = serializer.into_serializer().into_inner();
    fs::write(output, bytes).with_context(|| format!("writing {output:?}"))?;
    Ok(())
}
