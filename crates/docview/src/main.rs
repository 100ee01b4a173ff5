use clap::Parser;
use docview::{ContentLoader, DocContext, DocviewConfig, NoopViewport};
use docview_core::{ContentCache, StaticRegistry};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Load one documentation page the way the viewer does and print it.
#[derive(Parser, Debug)]
#[command(name = "docview", version, about)]
struct Args {
    /// JSON manifest listing the documentation versions and sections
    #[arg(long)]
    manifest: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the content origin, e.g. https://docs.example.com
    #[arg(long)]
    origin: Option<String>,

    /// Documentation version, e.g. 1.x
    version: String,

    /// Page id; defaults to the configured default page
    page: Option<String>,
}

fn load_config(args: &Args) -> docview::Result<DocviewConfig> {
    let mut config = match &args.config {
        Some(path) => DocviewConfig::from_path(path)?,
        None => DocviewConfig::default(),
    };

    if let Some(origin) = &args.origin {
        config.content.origin.clone_from(origin);
        config.validate()?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let registry = match StaticRegistry::from_path(&args.manifest) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!("failed to load manifest {:?}: {}", args.manifest, e);
            return ExitCode::FAILURE;
        }
    };

    let cache = match ContentCache::new((&config.cache).into()) {
        Ok(cache) => cache,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let loader = ContentLoader::new(
        &config,
        Arc::new(DocContext::new()),
        Arc::new(registry),
        Arc::new(cache),
        Arc::new(NoopViewport),
    );

    let page = args
        .page
        .as_deref()
        .unwrap_or(&config.navigation.default_page);
    loader.load_document(&args.version, page).await;

    let state = loader.context().snapshot();
    if let Some(section) = &state.page {
        let title = section.title.as_deref().unwrap_or(&section.url);
        println!("# {} ({})", title, loader.build_section_url(&section.url));
    }

    match (state.markdown, state.error) {
        (Some(markdown), _) => {
            println!("{}", markdown);
            ExitCode::SUCCESS
        }
        (None, Some(error)) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
        (None, None) => ExitCode::FAILURE,
    }
}
