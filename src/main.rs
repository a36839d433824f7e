use eslens::config::BuildInfo;
use tracing_subscriber::EnvFilter;

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = eslens::run(BuildInfo::current()) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}
