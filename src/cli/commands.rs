//! Command implementations for the Fabric CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use tracing::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::engine::{Engine, EngineConfig};
use crate::error::Result;

/// Execute a CLI command.
pub fn execute_command(args: FabricArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search_files(search_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
    }
}

/// Build an engine from the optional configuration file.
pub fn build_engine(config: Option<&Path>) -> Result<Engine> {
    let config = match config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let engine = Engine::new(config)?;
    engine.init()?;
    Ok(engine)
}

/// Index every regular file under `paths`, keyed by its path.
///
/// Directories are walked recursively in name order. Returns the number of
/// files indexed.
pub fn index_paths(engine: &Engine, paths: &[PathBuf]) -> Result<usize> {
    let mut files = Vec::new();
    for path in paths {
        collect_files(path, &mut files)?;
    }

    for file in &files {
        let content = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
        engine.index(&file.display().to_string(), &content)?;
        debug!(path = %file.display(), bytes = content.len(), "indexed file");
    }

    info!(files = files.len(), "indexing complete");
    Ok(files.len())
}

fn collect_files(path: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let metadata =
        fs::metadata(path).with_context(|| format!("cannot access {}", path.display()))?;

    if metadata.is_file() {
        files.push(path.to_path_buf());
    } else if metadata.is_dir() {
        let mut entries = fs::read_dir(path)
            .with_context(|| format!("cannot list {}", path.display()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();
        for entry in entries {
            collect_files(&entry, files)?;
        }
    }
    Ok(())
}

/// Index the given paths and run a query over them.
fn search_files(args: SearchArgs, cli_args: &FabricArgs) -> Result<()> {
    let engine = build_engine(cli_args.config.as_deref())?;
    let documents_indexed = index_paths(&engine, &args.paths)?;

    let start_time = Instant::now();
    let mut results = engine.search(&args.query)?;
    let duration_ms = start_time.elapsed().as_millis() as u64;

    if let Some(limit) = args.limit {
        results.hits.truncate(limit);
    }

    let report = SearchReport {
        query: args.query,
        documents_indexed,
        total_hits: results.total,
        hits: results.hits,
        duration_ms,
    };
    output_search(&report, cli_args)
}

/// Index the given paths and show statistics.
fn show_stats(args: StatsArgs, cli_args: &FabricArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Gathering statistics for {} path(s)", args.paths.len());
    }

    let engine = build_engine(cli_args.config.as_deref())?;
    let start_time = Instant::now();
    index_paths(&engine, &args.paths)?;
    let duration_ms = start_time.elapsed().as_millis() as u64;

    let mut report = StatsReport::new(engine.stats()?, duration_ms);
    if args.keys {
        report = report.with_keys(engine.keys()?);
    }
    output_stats(&report, cli_args)
}
