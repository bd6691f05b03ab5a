use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use taskserver_core::{CredentialGate, StoredSecret};
use taskserver_http::runtime::{HttpRuntimeConfig, HttpTaskRuntime, shutdown_signal};

#[derive(Parser, Debug)]
#[command(name = "taskserver", version)]
#[command(about = "Taskserver CLI - personal task tracker over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:9090")]
        listen: SocketAddr,
        /// TOML file seeding the credential table
        #[arg(long)]
        credentials: PathBuf,
        /// Disable permissive CORS
        #[arg(long)]
        no_cors: bool,
    },
    /// Derive a credential entry and print it as a [[users]] TOML block
    HashSecret {
        /// Username for the entry
        #[arg(long)]
        username: String,
        /// Secret to hash; read from stdin when omitted
        #[arg(long)]
        secret: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize JSON logging once.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter, // fallback to default if parsing fails
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            credentials,
            no_cors,
        } => {
            if let Err(e) = run_serve(listen, credentials, no_cors).await {
                tracing::error!(error = %e, "server failed");
                std::process::exit(1);
            }
        }
        Commands::HashSecret { username, secret } => {
            if let Err(e) = run_hash_secret(&username, secret) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

async fn run_serve(
    listen: SocketAddr,
    credentials: PathBuf,
    no_cors: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(&credentials)?;
    let gate = CredentialGate::from_toml_str(&raw)?;

    if gate.is_empty() {
        tracing::warn!(
            path = %credentials.display(),
            "credential table is empty; every create request will be rejected"
        );
    } else {
        tracing::info!(users = gate.len(), "credential table loaded");
    }

    let config = HttpRuntimeConfig {
        enable_cors: !no_cors,
        ..HttpRuntimeConfig::default()
    };
    let router = HttpTaskRuntime::new(gate).router_with_config(config);

    let listener = tokio::net::TcpListener::bind(listen).await?;
    tracing::info!(%listen, "taskserver listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("taskserver stopped");
    Ok(())
}

fn run_hash_secret(
    username: &str,
    secret: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let secret = match secret {
        Some(secret) => secret,
        None => {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let entry = StoredSecret::derive(&secret);
    println!("[[users]]");
    println!("username = \"{username}\"");
    println!("salt = \"{}\"", entry.salt_base64());
    println!("hash = \"{}\"", entry.hash_base64());
    Ok(())
}
