// ABOUTME: Entry point for the slipway hook binary.
// ABOUTME: Reads push input, drives the pipeline, reports a single pass/fail.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use slipway::config::{Config, StoreAuth};
use slipway::deploy::{Outcome, Pipeline, PipelineError, Resolved};
use slipway::error::{Error, Result};
use slipway::hook;
use slipway::output::Output;
use slipway::store::SwiftStore;
use slipway::trigger::HttpDeployApi;
use slipway::types::AppName;
use std::env;
use std::io;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let out = Output::from_flags(cli.quiet, cli.json);
    let result = run(cli, &out).await;

    if let Err(e) = result {
        out.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, out: &Output) -> Result<()> {
    match cli.command {
        Some(Commands::Check) => check_config(out),
        None => run_hook(out).await,
    }
}

/// Hook mode: one push in, one deploy verdict out.
async fn run_hook(out: &Output) -> Result<()> {
    let config = Config::from_env()?;
    let repo_dir = env::current_dir().expect("Failed to get current directory");
    let app = AppName::from_repo_dir(&repo_dir)?;

    let commit = hook::resolve_push(io::stdin().lock())?;
    out.progress(&format!("Deploying {app} at {commit}"));

    let store = SwiftStore::connect(&config.store_auth)
        .await
        .map_err(|source| Error::StoreConnect { source })?;
    let api = HttpDeployApi::new(
        config.tsuru_host.clone(),
        config.tsuru_token.clone(),
        config.deploy_timeout,
    );

    let pipeline = Pipeline::new(config, app, commit);
    run_pipeline(pipeline, &store, &api, &repo_dir, out).await
}

/// Run the pipeline state machine.
async fn run_pipeline(
    pipeline: Pipeline<Resolved>,
    store: &SwiftStore,
    api: &HttpDeployApi,
    repo_dir: &Path,
    out: &Output,
) -> Result<()> {
    out.progress("  → Archiving commit...");
    let pipeline = match pipeline.archive(repo_dir).await {
        Ok(p) => p,
        Err((p, e)) => return abort(p, store, e).await,
    };

    out.progress("  → Uploading archive...");
    let pipeline = match pipeline.upload(store).await {
        Ok(p) => p,
        Err((p, e)) => return abort(p, store, e).await,
    };

    out.progress("  → Granting read access...");
    let pipeline = match pipeline.grant_access(store).await {
        Ok(p) => p,
        Err((p, e)) => return abort(p, store, e).await,
    };

    let pipeline = match pipeline.resolve_url(store).await {
        Ok(p) => p,
        Err((p, e)) => return abort(p, store, e).await,
    };

    out.progress(&format!(
        "  → Triggering deploy from {}",
        pipeline.archive_url()
    ));
    let pipeline = match pipeline.trigger(api).await {
        Ok(p) => p,
        Err((p, e)) => return abort(p, store, e).await,
    };

    out.progress("  → Cleaning up...");
    let pipeline = pipeline.cleanup(store).await;

    match pipeline.outcome().await {
        Outcome::Success => {
            out.success("Deploy finished: OK");
            Ok(())
        }
        Outcome::Failed { last_line } => {
            Err(PipelineError::DeploymentFailed { last_line }.into())
        }
    }
}

/// Release whatever was created, then surface the stage error.
async fn abort<S>(pipeline: Pipeline<S>, store: &SwiftStore, e: PipelineError) -> Result<()> {
    pipeline.release(store).await;
    Err(e.into())
}

/// Check mode: resolve configuration and print the effective settings with
/// credentials redacted.
fn check_config(out: &Output) -> Result<()> {
    let config = Config::from_env()?;

    println!("Container: {}", config.container);
    match &config.cdn_url {
        Some(base) => println!("Archive URLs: CDN {base}"),
        None => println!("Archive URLs: store stat"),
    }
    match &config.store_auth {
        StoreAuth::TempAuth { auth_url, user, .. } => {
            println!("Store auth: {auth_url} (user {user}, key ****)");
        }
        StoreAuth::PreAuthorized { storage_url, .. } => {
            println!("Store auth: pre-authorized {storage_url} (token ****)");
        }
    }
    println!("Deploy API: {}", config.tsuru_host);
    println!("Deploy token: ****");
    println!("Deploy timeout: {}s", config.deploy_timeout.as_secs());
    println!("Grant public read: {}", config.grant_public_access);
    println!("Log dir: {}", config.log_dir.display());
    println!("Scratch dir: {}", config.tmp_dir.display());

    let cwd = env::current_dir().expect("Failed to get current directory");
    match AppName::from_repo_dir(&cwd) {
        Ok(app) => println!("App (from {}): {app}", cwd.display()),
        Err(e) => println!("App: cannot derive from {} ({e})", cwd.display()),
    }

    out.success("Configuration OK");
    Ok(())
}
