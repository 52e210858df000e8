use anyhow::{Context, Result};
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};
use hierarchy_graph::prover::{self, LoadPath};
use hierarchy_graph::render::{diagram_edges, render_dot, render_script, DisplayMode};
use hierarchy_graph::{close, Config, EdgeKind, HierarchyTriples};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "hierarchy-graph")]
#[command(about = "Draw a minimal structure hierarchy or generate a join verification script")]
struct Args {
    /// Emit a join verification script instead of a diagram
    #[arg(long)]
    verify: bool,

    /// Canonical projection edges: off, on, or a color name
    #[arg(long, value_name = "off|on|COLOR", default_value = "on")]
    canonicals: DisplayMode,

    /// Coercion edges: off, on, or a color name
    #[arg(long, value_name = "off|on|COLOR", default_value = "off")]
    coercions: DisplayMode,

    /// Library to import (repeatable; defaults to prover.libs from config)
    #[arg(long = "lib", value_name = "NAME")]
    libs: Vec<String>,

    /// Map a physical directory to a logical prefix, recursively (-R DIR NAME)
    #[arg(short = 'R', num_args = 2, value_names = ["DIR", "NAME"], action = ArgAction::Append)]
    recursive: Vec<String>,

    /// Map a physical directory to a qualified logical prefix (-Q DIR NAME)
    #[arg(short = 'Q', num_args = 2, value_names = ["DIR", "NAME"], action = ArgAction::Append)]
    qualified: Vec<String>,

    /// Read triples from a JSON file instead of running the prover
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the triples obtained from the prover to a JSON file
    #[arg(long, value_name = "FILE")]
    dump_triples: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Args {
    /// `-R` and `-Q` mappings in the order they were given. The prover
    /// resolves overlapping logical prefixes by argument order.
    fn load_paths(&self, matches: &ArgMatches) -> Vec<LoadPath> {
        let mut paths: Vec<(usize, LoadPath)> = Vec::new();
        if let Some(indices) = matches.indices_of("recursive") {
            for (pair, at) in self.recursive.chunks(2).zip(indices.step_by(2)) {
                let (dir, name) = (pair[0].clone(), pair[1].clone());
                paths.push((at, LoadPath::Recursive { dir, name }));
            }
        }
        if let Some(indices) = matches.indices_of("qualified") {
            for (pair, at) in self.qualified.chunks(2).zip(indices.step_by(2)) {
                let (dir, name) = (pair[0].clone(), pair[1].clone());
                paths.push((at, LoadPath::Qualified { dir, name }));
            }
        }
        paths.sort_by_key(|(at, _)| *at);
        paths.into_iter().map(|(_, lp)| lp).collect()
    }
}

/// Triples from `--input`, or from a prover run. Only prover results are
/// written to `--dump-triples`.
async fn obtain_triples(
    args: &Args,
    load_paths: &[LoadPath],
    config: &Config,
    libs: &[String],
) -> Result<HierarchyTriples> {
    if let Some(path) = &args.input {
        return HierarchyTriples::load(path)
            .with_context(|| format!("Failed to load triples from {}", path.display()));
    }

    log::info!("Libraries: {}", libs.join(", "));
    let triples = prover::load_hierarchy(&config.prover, libs, load_paths)
        .await
        .context("Failed to query the prover")?;
    if let Some(path) = &args.dump_triples {
        dump_triples(&triples, path)?;
    }
    Ok(triples)
}

fn dump_triples(triples: &HierarchyTriples, path: &Path) -> Result<()> {
    triples
        .save(path)
        .with_context(|| format!("Failed to write triples to {}", path.display()))?;
    log::info!("Triples written to {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let load_paths = args.load_paths(&matches);

    // Load configuration
    let config = Config::load()?;

    // Logs go to stderr; stdout carries only the generated output
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.general.log_level.as_str()),
    )
    .init();

    log::info!("Starting hierarchy-graph v{}", env!("CARGO_PKG_VERSION"));

    let libs = if args.libs.is_empty() {
        config.prover.libs.clone()
    } else {
        args.libs.clone()
    };

    let triples = obtain_triples(&args, &load_paths, &config, &libs).await?;

    let rendered = if args.verify {
        let closure = close(&triples.relation(EdgeKind::Canonical));
        render_script(&closure, &libs).context("Verification script not generated")?
    } else {
        log::info!("Canonicals: {}, coercions: {}", args.canonicals, args.coercions);
        let mut edges = diagram_edges(
            &triples.relation(EdgeKind::Canonical),
            EdgeKind::Canonical,
            &args.canonicals,
        );
        edges.extend(diagram_edges(
            &triples.relation(EdgeKind::Coercion),
            EdgeKind::Coercion,
            &args.coercions,
        ));
        if edges.is_empty() {
            log::warn!("No edges to draw. Check --canonicals / --coercions.");
        }
        render_dot(&edges, &config.diagram)
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Output written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
