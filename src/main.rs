use anyhow::Context;
use docquery::cli::commands::Client;
use docquery::cli::output::Output;
use docquery::cli::Cli;
use docquery::session::{FileTokenStore, Session};
use docquery::{AppError, ClientConfig, ErrorKind, HttpApi};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_args();
    let out = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };
    init_tracing(cli.verbose);

    let err_out = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Err(e) = run(cli, out).await {
        // Command handlers report their own failures; only start-up errors
        // reach the user from here.
        match e.downcast_ref::<AppError>() {
            Some(app) if app.kind() != ErrorKind::Config => tracing::debug!("{:#}", e),
            _ => err_out.error(&format!("{:#}", e)),
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "docquery=debug" } else { "docquery=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

async fn run(cli: Cli, out: Output) -> anyhow::Result<()> {
    let mut config =
        ClientConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(api_base) = cli.api_base {
        config = config.with_api_base(api_base);
        config.validate()?;
    }

    let session = Session::init(FileTokenStore::new(config.session_path()));
    let api = HttpApi::new(config.api_base.clone());
    let client = Client::new(api, session, config, out);

    client.run(cli.command).await?;
    Ok(())
}
