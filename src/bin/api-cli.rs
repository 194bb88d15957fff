use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;

use api_gateway_client::auth::{ApiEnvelope, AuthService, LoginCredentials};
use api_gateway_client::config;
use api_gateway_client::mock::Profile;
use api_gateway_client::normalizer;
use api_gateway_client::notification::{ChannelSink, Notification};
use api_gateway_client::observability;
use api_gateway_client::session::TokenFile;
use api_gateway_client::RequestOptions;

const DEFAULT_TOKEN_FILE: &str = ".api-gateway-tokens.json";

#[derive(Parser)]
#[command(name = "api-cli")]
#[command(about = "Authenticated API client for the gateway backend", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override api.base_url.
    #[arg(short = 'u', long)]
    base_url: Option<String>,

    /// Where tokens are kept between invocations.
    #[arg(short, long)]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the issued tokens
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "/local/token")]
        path: String,
    },
    /// Fetch the authenticated profile
    Profile {
        #[arg(long, default_value = "/local/profile")]
        path: String,
    },
    /// Forget the stored tokens
    Logout,
    /// Print the display messages for a JSON error body
    Flatten {
        /// JSON error body, e.g. '{"email": ["Required"]}'
        body: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = config::load_or_default(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    observability::init_tracing("api_gateway_client=warn");

    if let Commands::Flatten { body } = &cli.command {
        let value: Value = serde_json::from_str(body)?;
        for message in normalizer::format_error(&value) {
            println!("{message}");
        }
        return Ok(());
    }

    let token_file = TokenFile::new(
        cli.token_file
            .or_else(|| config.session.token_file.clone().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE)),
    );
    let session = Arc::new(token_file.load()?);
    let (sink, mut notifications) = ChannelSink::new();
    let auth = AuthService::new(&config, session.clone(), Arc::new(sink))?;

    match cli.command {
        Commands::Login {
            email,
            password,
            path,
        } => {
            let credentials = LoginCredentials::new(email, password);
            if auth.login(&path, credentials.to_json()).await {
                token_file.save(&session)?;
                println!("Logged in; tokens saved to {}", token_file.path().display());
            }
        }
        Commands::Profile { path } => {
            let result = auth
                .gateway()
                .request::<ApiEnvelope<Profile>>(&path, RequestOptions::get())
                .await;
            match result.into_parts().0 {
                Some(ApiEnvelope {
                    data: Some(profile),
                    ..
                }) => println!("{}", serde_json::to_string_pretty(&profile)?),
                Some(envelope) => {
                    eprintln!(
                        "Error: {}",
                        envelope.message.as_deref().unwrap_or("Request rejected")
                    );
                    let messages = match envelope.errors {
                        Some(Value::Array(items)) => items
                            .iter()
                            .filter_map(|item| item.as_str().map(str::to_owned))
                            .collect(),
                        Some(errors) => normalizer::format_error(&errors),
                        None => Vec::new(),
                    };
                    for message in messages {
                        eprintln!("  {message}");
                    }
                }
                None => {}
            }
        }
        Commands::Logout => {
            auth.logout();
            token_file.remove()?;
            println!("Logged out");
        }
        Commands::Flatten { .. } => {}
    }

    print_notifications(&mut notifications);
    Ok(())
}

fn print_notifications(rx: &mut UnboundedReceiver<Notification>) {
    while let Ok(notification) = rx.try_recv() {
        eprintln!(
            "{} [{}]: {}",
            notification.title,
            notification.severity.as_str(),
            notification.description
        );
    }
}
