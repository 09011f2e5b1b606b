use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use regsweep::{RunOptions, run};

#[derive(Parser, Debug)]
#[clap(author, version, about = "List orphaned image digests in a container registry")]
struct Opt {
    /// Repository or registry root to inspect, e.g. gcr.io/project/image
    repository: String,

    /// Recurse through every repository below the root
    #[clap(short, long)]
    recursive: bool,

    /// Ignore manifests uploaded within this duration, e.g. 12h or 7d
    #[clap(short, long, value_parser = regsweep::duration::parse, default_value = "0")]
    grace: chrono::Duration,

    /// Skip manifests carrying any tag that matches this regular expression;
    /// only manifests whose tags all fail to match are reported
    #[clap(short, long, default_value = "")]
    pattern: String,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[clap(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let options = Opt::parse();

    let default_filter = if options.verbose {
        "regsweep=debug"
    } else {
        "regsweep=info"
    };
    // Diagnostics go to stderr; stdout carries only report lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(RunOptions {
        reference: options.repository,
        recursive: options.recursive,
        grace: options.grace,
        pattern: options.pattern,
    })
    .await;

    if let Err(err) = result {
        error!("{err:#}");
        std::process::exit(1);
    }
}
