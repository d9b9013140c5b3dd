use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use taxai::{
    commands::{invoke::invoke, serve::serve, submit::SubmitCommand},
    environment::Provider,
};
use taxai_utils::taxai_version;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let config = taxai_config::load().context("Failed to load config")?;

    match cli.command {
        Command::Serve => serve(config).await?,
        Command::Invoke => invoke(config).await?,
        Command::Submit { command } => command.invoke(config).await?,
        Command::CheckConfig { verbose } => {
            let mut provider = Provider::new(&config).context("Invalid config")?;
            let captcha = match provider.is_captcha_enabled() {
                true => "enabled",
                false => "disabled",
            };
            println!("Config is valid (captcha {captcha})");
            verbose.then(|| println!("{config:#?}"));
        }
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = taxai_version())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the http server hosting the contact submission function
    #[command(aliases(["run", "start", "r", "s"]))]
    Serve,
    /// Handle a single function event read from stdin
    #[command(aliases(["i"]))]
    Invoke,
    /// Submit a contact form to a running contact function
    Submit {
        #[command(flatten)]
        command: SubmitCommand,
    },
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}
