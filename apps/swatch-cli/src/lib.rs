//! Command-line front end over the catalog filter engine.
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::collections::BTreeSet;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use swatch_catalog::{load_engine, open_source};
use swatch_core::config::{resolve_with_base, SwatchConfig};
use swatch_core::types::{Facet, RankedPolish};
use swatch_filter::browse::page;
use swatch_filter::{CatalogFilterEngine, EngineOptions};

#[derive(Debug, Parser)]
#[command(name = "swatch", about = "Search a nail-polish catalog by name, facets and color")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter the catalog, or rank it by closeness to a color
    Search(SearchArgs),
    /// List collections, or the polishes in one collection
    Collections(CollectionArgs),
    /// Print the configured facet vocabulary
    Facets,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Catalog JSON file or directory (defaults to `catalog.path` from config)
    pub catalog: Option<PathBuf>,
    /// Case-insensitive substring of the polish name
    #[arg(short, long)]
    pub query: Option<String>,
    /// Target color (`#RRGGBB`); switches to similarity ranking
    #[arg(short, long)]
    pub color: Option<String>,
    #[arg(long = "family")]
    pub families: Vec<String>,
    #[arg(long = "finish")]
    pub finishes: Vec<String>,
    #[arg(long = "brand")]
    pub brands: Vec<String>,
    #[arg(long = "type")]
    pub types: Vec<String>,
    /// Show results up to this 1-based page
    #[arg(long)]
    pub page: Option<NonZeroUsize>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CollectionArgs {
    pub catalog: Option<PathBuf>,
    /// Show the polishes of this collection
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(long)]
    pub json: bool,
}

pub async fn run(cli: Cli, settings: &SwatchConfig, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Command::Search(args) => search(args, settings, out).await,
        Command::Collections(args) => collections(args, settings, out).await,
        Command::Facets => facets(settings, out),
    }
}

async fn open_engine(catalog: Option<PathBuf>, settings: &SwatchConfig) -> Result<CatalogFilterEngine> {
    let path = match catalog {
        Some(path) => path,
        None => resolve_with_base(&std::env::current_dir()?, &settings.catalog.path),
    };
    info!(catalog = %path.display(), "loading catalog");
    let source = Arc::from(open_source(&path));
    load_engine(source, EngineOptions::from(&settings.engine)).await
}

async fn search(args: SearchArgs, settings: &SwatchConfig, out: &mut impl Write) -> Result<()> {
    let mut engine = open_engine(args.catalog, settings).await?;

    if let Some(query) = &args.query {
        engine.set_text_query(query);
    }
    let facets = [
        (Facet::ColorFamily, &args.families),
        (Facet::Finish, &args.finishes),
        (Facet::Brand, &args.brands),
        (Facet::Type, &args.types),
    ];
    for (facet, tags) in facets {
        // repeated flags select once instead of toggling back off
        for tag in tags.iter().collect::<BTreeSet<_>>() {
            engine.toggle_facet_tag(facet, tag);
        }
    }
    if let Some(color) = &args.color {
        engine.set_target_color(Some(color));
    }

    let results = engine.visible_results();
    let (shown, has_more) = match args.page {
        Some(n) => {
            let window = page(results, n.get(), settings.engine.page_size);
            (window.items, window.has_more)
        }
        None => (results, false),
    };

    if args.json {
        serde_json::to_writer_pretty(&mut *out, shown)?;
        writeln!(out)?;
        return Ok(());
    }
    if shown.is_empty() {
        writeln!(out, "No polishes found.")?;
        return Ok(());
    }
    for result in shown {
        writeln!(out, "{}", format_result(result))?;
    }
    if has_more {
        writeln!(out, "... {} more", results.len() - shown.len())?;
    }
    Ok(())
}

async fn collections(args: CollectionArgs, settings: &SwatchConfig, out: &mut impl Write) -> Result<()> {
    let engine = open_engine(args.catalog, settings).await?;
    match args.name {
        Some(name) => {
            let records = engine.records_in_collection(&name);
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &records)?;
                writeln!(out)?;
            } else {
                for record in records {
                    writeln!(out, "{}", format_result(&RankedPolish::unranked(record.clone())))?;
                }
            }
        }
        None => {
            let counts: Vec<(&str, usize)> = engine
                .collections()
                .into_iter()
                .map(|name| (name, engine.records_in_collection(name).len()))
                .collect();
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &counts)?;
                writeln!(out)?;
            } else {
                for (name, count) in counts {
                    writeln!(out, "{}\t{}", name, count)?;
                }
            }
        }
    }
    Ok(())
}

fn facets(settings: &SwatchConfig, out: &mut impl Write) -> Result<()> {
    let vocabulary = &settings.facets;
    for (facet, tags) in [
        (Facet::ColorFamily, &vocabulary.color_families),
        (Facet::Finish, &vocabulary.finishes),
        (Facet::Brand, &vocabulary.brands),
        (Facet::Type, &vocabulary.types),
    ] {
        writeln!(out, "{}: {}", facet, tags.join(", "))?;
    }
    Ok(())
}

/// `id  name  brand  finish  hex  [distance]`, tab separated, `-` for gaps.
pub fn format_result(result: &RankedPolish) -> String {
    let r = &result.record;
    let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let mut line = format!("{}\t{}\t{}\t{}\t{}", r.id, r.name, or_dash(&r.brand), or_dash(&r.finish), or_dash(&r.color_hex));
    if let Some(distance) = result.distance {
        line.push_str(&format!("\t{:.2}", distance));
    }
    line
}
