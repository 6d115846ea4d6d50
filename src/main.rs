use anyhow::Result;
use log::LevelFilter;
use sitemap2md::{cli::parse_args, run_sitemap};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = parse_args()?;
    init_logging(config.verbosity);
    run_sitemap(config).await?;
    Ok(())
}

/// `RUST_LOG` still wins over `-v`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
