use std::net::IpAddr;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use taxai_testing::{email, recaptcha, serve, sheets};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Recaptcha { host, port, secret } => {
            info!("Starting recaptcha testing server on {host}:{port}");
            recaptcha::log_usage(&secret);
            serve(host, port, recaptcha::router(secret)).await?
        }
        Command::Sheets { host, port } => {
            info!("Starting sheets testing server on {host}:{port}");
            sheets::log_usage();
            serve(host, port, sheets::router(Default::default())).await?
        }
        Command::Email {
            host,
            port,
            api_key,
        } => {
            info!("Starting email testing server on {host}:{port}");
            email::log_usage(&api_key);
            serve(host, port, email::router(email::EmailState::new(api_key))).await?
        }
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the recaptcha testing server
    Recaptcha {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8001")]
        port: u16,
        #[arg(long, default_value = "test-secret")]
        secret: String,
    },
    /// Start the google sheets testing server
    Sheets {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8002")]
        port: u16,
    },
    /// Start the email api testing server
    Email {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8003")]
        port: u16,
        #[arg(long, default_value = "test-api-key")]
        api_key: String,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}
