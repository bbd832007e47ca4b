use anyhow::Context;
use clap::Parser;
use fbpages::server::{self, config::ACCESS_TOKEN_ENV, AppState, RouterOptions, ServerConfig};
use fbpages::{Config, ReqwestTransport, Transport};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Local REST façade over the Facebook Graph API
#[derive(Debug, Parser)]
#[command(name = "fbpages-server", version, about)]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Emit permissive CORS headers and answer OPTIONS with 200
    #[arg(long)]
    cors: bool,

    /// Read this environment variable at request time when no other
    /// credential is available
    #[arg(long, value_name = "VAR", num_args = 0..=1, default_missing_value = ACCESS_TOKEN_ENV)]
    env_fallback: Option<String>,

    /// Graph API version (overrides API_VERSION)
    #[arg(long)]
    api_version: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fbpages=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(version) = args.api_version {
        config.api_version = version;
    }

    if config.default_token.is_none() {
        tracing::warn!(
            "{} not set; requests must supply access_token or an Authorization header",
            ACCESS_TOKEN_ENV
        );
    }

    // The blocking reqwest client must be built outside the async runtime
    let client_config = Config::default().with_api_version(&config.api_version);
    let transport: Arc<dyn Transport> =
        Arc::new(ReqwestTransport::new(&client_config).context("building HTTP client")?);
    // Released after the runtime so the blocking client is never dropped on it
    let _transport = Arc::clone(&transport);

    let state = AppState::new(client_config, transport)
        .with_default_token(config.default_token.clone())
        .with_options(RouterOptions {
            cors: args.cors,
            env_fallback: args.env_fallback,
        });

    let runtime = tokio::runtime::Runtime::new().context("starting runtime")?;
    let result = runtime.block_on(async move {
        let addr = config.server_address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("binding {}", addr))?;
        server::serve(listener, state).await.context("serving")?;
        Ok::<(), anyhow::Error>(())
    });
    drop(runtime);
    result
}
