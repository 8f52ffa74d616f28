use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use gatekit::api;
use gatekit::config::{AppConfig, CSRF_SECRET_ENV};
use gatekit::favicon::{FaviconConverter, FAVICON_SIZE};
use gatekit::security::CsrfSigner;
use gatekit::server;

#[derive(Parser)]
#[command(name = "gatekit")]
#[command(about = "CSRF tokens, security headers and favicon tooling for web applications")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert an SVG icon to a 32x32 PNG favicon
    Favicon {
        /// Source SVG file path
        #[arg(short, long, default_value = "public/favicon.svg")]
        input: PathBuf,

        /// Destination PNG file path
        #[arg(short, long, default_value = "public/favicon.png")]
        output: PathBuf,
    },
    /// Issue or verify CSRF tokens from the command line
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Issue a fresh token and print it
    Issue,
    /// Verify a token; exits non-zero when invalid
    Verify {
        /// The token string to check
        token: String,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gatekit API",
        description = "CSRF token issuance and verification",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(api::handle_issue_token, api::handle_verify_token),
    components(schemas(
        api::TokenResponse,
        api::VerifyRequest,
        api::VerifyResponse,
    )),
    tags(
        (name = "Csrf", description = "Anti-forgery token issuance and verification")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Favicon { input, output }) => run_favicon_command(&input, &output),
        Some(Commands::Token { command }) => run_token_command(command),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal tracing setup for one-shot CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatekit=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Convert a favicon source to a raster icon (no server needed)
fn run_favicon_command(input: &PathBuf, output: &PathBuf) -> anyhow::Result<()> {
    init_cli_tracing();

    let converter = FaviconConverter::new();
    let bytes = converter
        .convert_file(input, output)
        .map_err(|e| anyhow::anyhow!("Favicon conversion failed: {e}"))?;

    println!(
        "Wrote {} ({FAVICON_SIZE}x{FAVICON_SIZE}, {bytes} bytes)",
        output.display()
    );
    Ok(())
}

/// Issue or verify a token using the secret from the environment
fn run_token_command(command: TokenCommands) -> anyhow::Result<()> {
    init_cli_tracing();

    let secret = AppConfig::csrf_secret()?;
    let signer = CsrfSigner::new(&secret);

    match command {
        TokenCommands::Issue => {
            println!("{}", signer.issue());
        }
        TokenCommands::Verify { token } => {
            if signer.verify(&token) {
                println!("valid");
            } else {
                println!("invalid");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let secret_set = std::env::var(CSRF_SECRET_ENV).map_or(false, |s| !s.is_empty());

    println!("Gatekit v{VERSION}");
    println!("CSRF tokens, security headers and favicon tooling\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  {CSRF_SECRET_ENV} = {}",
        if secret_set {
            "(set)"
        } else {
            "(not set - required for serve/token)"
        }
    );

    println!("\nCommands:");
    println!("  gatekit serve           Start the HTTP server");
    println!("  gatekit favicon         Convert an SVG icon to a PNG favicon");
    println!("  gatekit token issue     Issue a CSRF token");
    println!("  gatekit token verify    Verify a CSRF token");
    println!("\nRun 'gatekit --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatekit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(AppConfig::load());

    // No fallback secret: refuse to start without one rather than issue
    // forgeable tokens.
    let secret = AppConfig::csrf_secret()?;

    let bind_addr = config.bind_addr.clone();
    let state = server::create_app_state(config, &secret);

    // Build router: shared API routes plus OpenAPI documentation
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Gatekit server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
