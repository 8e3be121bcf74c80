//! `intent` command line: HTTP service and one-shot classification.
//!
//! ```text
//! GET /?request=<text>          intent classify <TEXT> | --annotation-file <json>
//!          |                                |
//!          +---------------+----------------+
//!                          v
//!        Annotator (Google annotateText | saved response)
//!                          |  ParsedDocument
//!                          v
//!          HandlerChain::classify (first match wins)
//!                          |
//!                          v
//!        {"type": ..., "details": {"searchQuery": ...}}
//! ```

use anyhow::{anyhow, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use intent_annotator::{
    Annotator, FixedAnnotator, GoogleLanguageAnnotator, GoogleLanguageConfig, DEFAULT_ENDPOINT,
};
use intent_classifier::{HandlerChain, IntentHandler};
use listen::ListenAddr;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

mod http_api;
mod listen;

pub use http_api::{router, AppState, ServiceError};

const API_KEY_ENV: &str = "INTENT_LANGUAGE_API_KEY";
const PROJECT_ENV: &str = "INTENT_LANGUAGE_PROJECT";

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "intent")]
#[command(about = "Classify short requests as order or product searches", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve GET /?request=<text> over HTTP
    Serve(ServeArgs),

    /// Classify one request and print the JSON result
    Classify(ClassifyArgs),
}

#[derive(Args)]
struct AnnotationArgs {
    /// Google Cloud API key (env: INTENT_LANGUAGE_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Project billed for annotation quota (env: INTENT_LANGUAGE_PROJECT)
    #[arg(long)]
    project_id: Option<String>,

    /// Natural Language API base URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Give up on the annotation service after this many milliseconds
    #[arg(long, default_value_t = 10_000)]
    annotation_timeout_ms: u64,
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address, e.g. 127.0.0.1:4567
    #[arg(long, default_value = "127.0.0.1:4567")]
    bind: String,

    /// Allow binding to non-loopback addresses
    #[arg(long)]
    public: bool,

    /// Handler chain file (TOML or JSON); defaults to orders, products, fallback
    #[arg(long)]
    handlers: Option<PathBuf>,

    #[command(flatten)]
    annotation: AnnotationArgs,
}

#[derive(Args)]
struct ClassifyArgs {
    /// Request text
    #[arg(required_unless_present = "annotation_file")]
    text: Option<String>,

    /// Classify a saved annotateText response instead of calling the service
    #[arg(long)]
    annotation_file: Option<PathBuf>,

    /// Handler chain file (TOML or JSON); defaults to orders, products, fallback
    #[arg(long)]
    handlers: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    annotation: AnnotationArgs,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // stdout carries only the JSON result.
    if matches!(cli.command, Commands::Classify(_)) && !cli.verbose {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Serve(args) => serve_http(args).await?,
        Commands::Classify(args) => run_classify(args).await?,
    }

    Ok(())
}

fn load_chain(path: Option<&Path>) -> Result<HandlerChain> {
    let chain = match path {
        Some(path) => HandlerChain::from_file(path)?,
        None => HandlerChain::default(),
    };
    let intents: Vec<&str> = chain.handlers().iter().map(IntentHandler::intent).collect();
    log::info!("Handler chain: {}", intents.join(" -> "));
    Ok(chain)
}

fn google_annotator(args: &AnnotationArgs) -> Result<GoogleLanguageAnnotator> {
    let api_key = args
        .api_key
        .clone()
        .or_else(|| env::var(API_KEY_ENV).ok())
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| anyhow!("No annotation API key: pass --api-key or export {API_KEY_ENV}"))?;
    let project_id = args
        .project_id
        .clone()
        .or_else(|| env::var(PROJECT_ENV).ok())
        .filter(|project| !project.trim().is_empty());

    let config = GoogleLanguageConfig {
        endpoint: args.endpoint.clone(),
        project_id,
        timeout: Duration::from_millis(args.annotation_timeout_ms),
        ..GoogleLanguageConfig::new(api_key)
    };
    GoogleLanguageAnnotator::new(config).context("Failed to set up the annotation client")
}

async fn serve_http(args: ServeArgs) -> Result<()> {
    let listen = ListenAddr::resolve(&args.bind, args.public).await?;
    let chain = load_chain(args.handlers.as_deref())?;
    let annotator = google_annotator(&args.annotation)?;
    log::info!(
        "Annotating via {} (timeout {} ms)",
        annotator.config().endpoint,
        args.annotation.annotation_timeout_ms
    );

    let app = router(AppState::new(chain, Arc::new(annotator)));

    let listener = listen.bind().await?;
    let local_addr = listener.local_addr()?;
    let base_url = format!("http://{local_addr}");

    print_stdout(&format!("Serving intent classification: {base_url}/?request=<text>"))?;
    if listen.is_public() {
        print_stdout("Public bind enabled (--public): reachable from other hosts")?;
    }
    print_stdout(&format!(
        "Try: curl '{base_url}/?request=show%20me%20red%20orders%20from%20last%20week'"
    ))?;

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_classify(args: ClassifyArgs) -> Result<()> {
    let chain = load_chain(args.handlers.as_deref())?;
    let annotator: Arc<dyn Annotator> = match &args.annotation_file {
        Some(path) => Arc::new(
            FixedAnnotator::from_file(path)
                .with_context(|| format!("Invalid annotation file {}", path.display()))?,
        ),
        None => Arc::new(google_annotator(&args.annotation)?),
    };

    let state = AppState::new(chain, annotator);
    let text = args.text.unwrap_or_default();
    let result = http_api::classify_text(&state, &text).await?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    print_stdout(&output)
}
