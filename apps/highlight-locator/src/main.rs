//! locate-highlights
//!
//! Diagnostic tool: resolves a field list against a JSON page dump and
//! prints the overlay each page would get.
//!
//! ```text
//! locate-highlights <page-dump.json> <fields.json> [scale]
//! ```

use std::sync::Arc;

use anyhow::{bail, Context};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use highlight_locator::document::{ExtractedField, PageDump, PageDumpLoader};
use highlight_locator::highlight::{project_highlights, HighlightColor, PageView, ProjectedPage};
use highlight_locator::{CacheStats, LocationCache, LocationResolver, LocatorConfig};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageOverlay {
    page: usize,
    #[serde(flatten)]
    overlay: ProjectedPage,
}

#[derive(Serialize)]
struct LegendEntry {
    token: &'static str,
    label: &'static str,
    css: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    document_id: String,
    pages: Vec<PageOverlay>,
    legend: Vec<LegendEntry>,
    cache: CacheStats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "highlight_locator=debug,locate_highlights=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = LocatorConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        LocatorConfig::default()
    });

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: locate-highlights <page-dump.json> <fields.json> [scale]");
    }
    let dump_path = &args[0];
    let fields_path = &args[1];
    let scale: f32 = match args.get(2) {
        Some(raw) => raw.parse().with_context(|| format!("invalid scale '{}'", raw))?,
        None => 1.0,
    };

    let fields: Vec<ExtractedField> = serde_json::from_slice(
        &tokio::fs::read(fields_path)
            .await
            .with_context(|| format!("failed to read {}", fields_path))?,
    )
    .with_context(|| format!("failed to parse {}", fields_path))?;

    tracing::info!(
        document = %dump_path,
        fields = fields.len(),
        window_runs = config.window_runs,
        cache_capacity = config.cache.capacity,
        "Resolving highlights"
    );

    let dump = PageDump::from_path(dump_path)
        .await
        .with_context(|| format!("failed to load {}", dump_path))?;
    // Page sizes for the overlay canvases
    let page_sizes: Vec<(f32, f32)> = dump.pages.iter().map(|p| (p.width, p.height)).collect();

    let loader = Arc::new(PageDumpLoader::new().with_document(dump_path.as_str(), dump));
    let cache = Arc::new(LocationCache::new(config.cache.clone()));
    let resolver = LocationResolver::new(loader, cache.clone(), &config);

    let ticket = resolver.begin_pass();
    let regions = match resolver
        .resolve_highlights(ticket, dump_path, dump_path, &fields)
        .await
        .context("highlight resolution failed")?
        .into_regions()
    {
        Some(regions) => regions,
        None => bail!("resolution pass was superseded"),
    };

    let pages: Vec<PageOverlay> = page_sizes
        .iter()
        .enumerate()
        .filter_map(|(index, &(width, height))| {
            let view = PageView {
                page: index + 1,
                scale,
                width,
                height,
            };
            let overlay = project_highlights(&regions, &view);
            overlay.should_render().then(|| PageOverlay {
                page: view.page,
                overlay,
            })
        })
        .collect();

    let legend = [
        HighlightColor::SuccessGreen,
        HighlightColor::InfoBlue,
        HighlightColor::DangerRed,
        HighlightColor::NeutralGray,
    ]
    .iter()
    .map(|color| LegendEntry {
        token: color.token(),
        label: color.label(),
        css: color.css_color(),
    })
    .collect();

    let report = Report {
        document_id: dump_path.clone(),
        pages,
        legend,
        cache: cache.stats(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
