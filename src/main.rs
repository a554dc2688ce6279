use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pigment_matrix::api;
use pigment_matrix::assets::AssetLoader;
use pigment_matrix::models::AppConfig;
use pigment_matrix::server;

#[derive(Parser)]
#[command(name = "pigment-matrix")]
#[command(about = "Pigment Match Matrix - match pigments to customer orders")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Analyze one pigment and print the dashboard
    Analyze {
        /// Pigment identifier (e.g. PIG-0001)
        #[arg(short, long)]
        pigment: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List pigments known to the matching service
    Pigments,
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Html,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pigment Match Matrix API",
        description = "Match pigments to customer orders and present the results",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_pigments,
        api::handle_reload,
        api::handle_analyze,
        api::handle_latest,
        api::handle_dashboard,
        api::handle_latest_dashboard,
    ),
    components(schemas(
        api::PigmentListResponse,
        api::CatalogReloadResponse,
        api::AnalysisRequest,
        api::AnalysisResponse,
    )),
    tags(
        (name = "Catalog", description = "Pigment and order databases"),
        (name = "Analysis", description = "Pigment-to-order match results"),
        (name = "Dashboard", description = "Rendered dashboard pages")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Analyze {
            pigment,
            format,
            output,
        }) => run_analyze_command(&pigment, format, output).await,
        Some(Commands::Pigments) => run_pigments_command().await,
        Some(Commands::Init { force, list }) => run_init_command(force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pigment_matrix=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

/// Asset loader and config from TEMPLATES_DIR, CONFIG_FILE and MATCHER_URL
fn load_environment() -> (Arc<AssetLoader>, AppConfig) {
    let templates_dir = std::env::var("TEMPLATES_DIR").ok().map(PathBuf::from);
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);

    let asset_loader = Arc::new(AssetLoader::new(templates_dir, config_file));
    let config = AppConfig::load_from_assets(&asset_loader)
        .with_matcher_url(std::env::var("MATCHER_URL").ok());

    (asset_loader, config)
}

/// Analyze a pigment without starting the server
async fn run_analyze_command(
    pigment: &str,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let (asset_loader, config) = load_environment();
    let state = server::create_app_state(asset_loader, config)?;
    // only used to report unresolved orders
    server::warm_catalog(&state).await;

    let session = state
        .analysis
        .analyze(pigment)
        .await
        .map_err(|e| anyhow::anyhow!("Analysis failed: {e}"))?;

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&*session)?,
        OutputFormat::Html => state
            .pages
            .render_dashboard(&session)
            .map_err(|e| anyhow::anyhow!("Template error: {e}"))?,
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered)?;
            println!(
                "{} ({} matching orders) written to {}",
                session.pigment_id,
                session.match_count(),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Print the pigment catalog
async fn run_pigments_command() -> anyhow::Result<()> {
    init_cli_tracing();

    let (asset_loader, config) = load_environment();
    let state = server::create_app_state(asset_loader, config)?;
    let snapshot = state
        .catalog
        .reload(state.matcher.as_ref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load catalog: {e}"))?;

    println!(
        "{} pigments, {} orders\n",
        snapshot.pigments.len(),
        snapshot.orders.len()
    );
    for pigment in &snapshot.pigments {
        let stock = pigment
            .available_tonnage
            .map(|t| format!("{t:.1} t"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<12} L={:<7.2} a={:<7.2} b={:<7.2} {:>10}",
            pigment.id, pigment.l, pigment.a, pigment.b, stock
        );
    }

    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(force: bool, list: bool) -> anyhow::Result<()> {
    use pigment_matrix::assets::AssetCategory;

    if list {
        println!("Embedded assets:\n");
        println!("Templates:");
        for f in AssetLoader::list_embedded(AssetCategory::Templates) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    let (loader, _) = load_environment();
    let report = loader.init(&[AssetCategory::Templates, AssetCategory::Config], force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    use pigment_matrix::assets::AssetCategory;

    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let templates_dir = std::env::var("TEMPLATES_DIR").ok();
    let matcher_url = std::env::var("MATCHER_URL").ok();

    println!("Pigment Match Matrix v{VERSION}");
    println!("Match pigments to customer orders\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR     = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE   = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  TEMPLATES_DIR = {}",
        templates_dir.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  MATCHER_URL   = {}",
        matcher_url.as_deref().unwrap_or("(not set)")
    );

    let (loader, config) = load_environment();

    println!("\nAsset Sources:");
    let config_source = match loader.config_file() {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:    {config_source}");

    let embedded_count = AssetLoader::list_embedded(AssetCategory::Templates).len();
    match loader.templates_dir() {
        Some(dir) if dir.exists() => println!(
            "  Templates: {} ({} available, {embedded_count} embedded)",
            dir.display(),
            loader.list_templates().len()
        ),
        _ => println!("  Templates: embedded ({embedded_count} files)"),
    }

    println!("\nMatching Service:");
    println!("  URL:          {}", config.matcher.base_url);
    println!("  Timeout:      {}s", config.matcher.timeout_secs);
    println!("  Min duration: {}ms", config.analysis.min_duration_ms);
    println!("  Top matches:  {}", config.analysis.top_n);

    println!("\nCommands:");
    println!("  pigment-matrix serve      Start the HTTP server");
    println!("  pigment-matrix analyze    Analyze a pigment and print the dashboard");
    println!("  pigment-matrix pigments   List pigments from the matching service");
    println!("  pigment-matrix init       Extract embedded assets");
    println!("\nRun 'pigment-matrix --help' for more details.");
}

async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pigment_matrix=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let (asset_loader, config) = load_environment();

    tracing::info!(
        templates = ?asset_loader.templates_dir().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        config = ?asset_loader.config_file().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        "Asset sources configured"
    );

    // Seed if configured paths are empty
    match asset_loader.seed_if_configured() {
        Ok(report) if !report.is_empty() => {
            tracing::info!(
                templates = report.templates_seeded.len(),
                config = report.config_seeded,
                "Seeded empty locations with embedded assets"
            );
        }
        Err(e) => {
            tracing::warn!(%e, "Failed to seed assets");
        }
        _ => {}
    }

    let state = server::create_app_state(asset_loader, config)?;
    server::warm_catalog(&state).await;

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Pigment Match Matrix listening");

    axum::serve(listener, app).await?;

    Ok(())
}
