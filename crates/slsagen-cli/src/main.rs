use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use slsagen_core::config::Config;
use slsagen_core::context::{BuildContext, RepoInfo};
use slsagen_core::generate_provenance;
use slsagen_core::statement::render;

mod args;

const DEFAULT_CONFIG_FILE: &str = "slsagen.toml";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = args::Args::parse();
    let overrides = args.overrides();

    let config = match args.config.as_deref() {
        Some(path) => Config::load_required(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => Config::load(Path::new(DEFAULT_CONFIG_FILE))
            .with_context(|| format!("failed to load config: {DEFAULT_CONFIG_FILE}"))?,
    };
    let generator = config.generator_config(&overrides)?;

    let mut ctx = BuildContext::from_path(&args.context).with_context(|| {
        format!("failed to load build context: {}", args.context.display())
    })?;
    if let (Some(url), Some(ref_name)) = (args.repository.clone(), args.git_ref.clone()) {
        ctx.repository = Some(RepoInfo {
            url,
            ref_name,
            commit: args.commit.clone(),
        });
    }
    let ctx = ctx.with_user_properties(args.properties.clone());

    let document = generate_provenance(&ctx, &generator)?;
    let json = if args.pretty {
        document.to_json_pretty()?
    } else {
        document.to_json()?
    };

    if args.stdout {
        println!("{json}");
        return Ok(());
    }

    let path = config.output_path(&overrides);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }
    std::fs::write(&path, &json)
        .with_context(|| format!("failed to write provenance file: {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote provenance file");

    print!("{}", render::render_text(&document));
    Ok(())
}
