use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use tracing::debug;

use lighttag::cli::args::{CliArgs, OutputFormat};
use lighttag::cli::reporter::{Reporter, TagReport};
use lighttag::{BuilderConfig, LightTypeTag, Prelude, RenderStyle, TagBuilder};

fn main() -> Result<()> {
    // Initialize tracing if LIGHTTAG_LOG or RUST_LOG is set (zero cost otherwise).
    // Supports LIGHTTAG_LOG_FORMAT=tree|json|text (see src/tracing_config.rs).
    lighttag::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let prelude = Prelude::new();

    if args.list {
        for (name, _) in prelude.samples() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut config = BuilderConfig::from_env();
    if args.no_cache {
        config = config.without_cache();
    }
    debug!(?config, "builder configuration");

    let tags = build_tags(&prelude, config, &args.types)?;

    let style = if args.short {
        RenderStyle::Short
    } else {
        RenderStyle::Long
    };
    match args.format {
        OutputFormat::Json => {
            let reports: Vec<_> = tags
                .iter()
                .map(|(name, tag)| TagReport::new(name, tag, style))
                .collect();
            let json = serde_json::to_string_pretty(&reports).context("failed to serialize tags")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            let color = args
                .pretty
                .unwrap_or_else(|| std::io::stdout().is_terminal());
            let reporter = Reporter::new(color, style);
            for (name, tag) in &tags {
                print!("{}", reporter.render_tag(name, tag));
            }
        }
    }
    Ok(())
}

/// Tags for the requested samples, or for every sample when none is named.
fn build_tags(
    prelude: &Prelude,
    config: BuilderConfig,
    requested: &[String],
) -> Result<Vec<(String, LightTypeTag)>> {
    let names: Vec<String> = if requested.is_empty() {
        prelude
            .samples()
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect()
    } else {
        requested.to_vec()
    };

    let builder = TagBuilder::new(&prelude.universe, config);
    let mut tags = Vec::with_capacity(names.len());
    for name in names {
        let ty = prelude
            .sample(&name)
            .with_context(|| format!("unknown type `{name}`; run with --list to see the available names"))?;
        let tag = builder
            .make_tag(&ty)
            .with_context(|| format!("failed to build a tag for `{name}`"))?;
        tags.push((name, tag));
    }
    Ok(tags)
}
