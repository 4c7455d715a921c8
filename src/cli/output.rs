//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{FabricArgs, OutputFormat};
use crate::engine::EngineStats;
use crate::error::Result;
use crate::search::SearchHit;

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchReport {
    pub query: String,
    pub documents_indexed: usize,
    pub total_hits: usize,
    pub hits: Vec<SearchHit>,
    pub duration_ms: u64,
}

/// Result structure for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsReport {
    pub documents: usize,
    pub unique_terms: usize,
    pub postings: usize,
    pub content_bytes: usize,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

impl StatsReport {
    /// Build a report from engine statistics.
    pub fn new(stats: EngineStats, duration_ms: u64) -> Self {
        StatsReport {
            documents: stats.documents,
            unique_terms: stats.terms,
            postings: stats.postings,
            content_bytes: stats.content_bytes,
            duration_ms,
            keys: None,
        }
    }

    /// Attach the list of document keys.
    pub fn with_keys(mut self, keys: Vec<String>) -> Self {
        self.keys = Some(keys);
        self
    }
}

/// Output a search report.
pub fn output_search(report: &SearchReport, args: &FabricArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(report, args),
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("Indexed {} documents", report.documents_indexed);
                println!();
            }

            println!("Search Results:");
            println!("═══════════════");
            for (i, hit) in report.hits.iter().enumerate() {
                println!("{:>4}. {:.3}  {}", i + 1, hit.score, hit.key);
            }
            println!();
            println!("Total hits: {}", report.total_hits);
            if args.verbosity() > 0 {
                println!("Search time: {}ms", report.duration_ms);
            }
            Ok(())
        }
    }
}

/// Output a stats report.
pub fn output_stats(report: &StatsReport, args: &FabricArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(report, args),
        OutputFormat::Human => {
            println!("Index Statistics:");
            println!("════════════════");
            println!("Documents: {}", report.documents);
            println!("Unique terms: {}", report.unique_terms);
            println!("Postings: {}", report.postings);
            println!("Content size: {}", format_bytes(report.content_bytes));
            if args.verbosity() > 0 {
                println!("Indexing time: {}ms", report.duration_ms);
            }
            if let Some(keys) = &report.keys {
                println!();
                println!("Documents:");
                for key in keys {
                    println!("  {key}");
                }
            }
            Ok(())
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &FabricArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a byte count with a binary unit suffix.
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.2} {}", UNITS[unit])
    }
}
