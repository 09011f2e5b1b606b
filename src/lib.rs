//! regsweep lists orphaned image digests in a container registry: manifests
//! that are untagged (or tagged only with names not matching a pattern) and
//! were uploaded before a cutoff. It only reports; it never deletes.

pub mod auth;
pub mod client;
pub mod clock;
pub mod collector;
pub mod digest;
pub mod duration;
pub mod error;
pub mod filters;
pub mod listing;
pub mod reference;

use std::io::Write;

use tracing::debug;

use crate::auth::Credentials;
use crate::client::{RegistryClient, RepositoryVisitor};
use crate::clock::Clock;
use crate::collector::Collector;
use crate::filters::build_filters;
use crate::reference::RepositoryReference;

#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Repository or registry root reference, e.g. `gcr.io/project/image`.
    pub reference: String,
    /// Recurse through every repository below the root.
    pub recursive: bool,
    /// Manifests uploaded within this duration of now are protected.
    pub grace: chrono::Duration,
    /// Tag pattern; a matching tag disqualifies the manifest. Empty means
    /// only fully untagged manifests are reported.
    pub pattern: String,
}

/// Runs a sweep, printing one `repository@digest` line per orphaned manifest
/// to stdout.
pub async fn run(options: RunOptions) -> anyhow::Result<()> {
    sweep(options, std::io::stdout()).await
}

/// Like [`run`] but writing report lines to `out`.
pub async fn sweep<W: Write + Send>(options: RunOptions, out: W) -> anyhow::Result<()> {
    sweep_at(options, Clock::new(), out).await
}

async fn sweep_at<W: Write + Send>(
    options: RunOptions,
    clock: Clock,
    out: W,
) -> anyhow::Result<()> {
    // Both validations happen before the client is ever used.
    let repository: RepositoryReference = options.reference.parse()?;
    let cutoff = clock.now() - options.grace;
    let filters = build_filters(cutoff, &options.pattern)?;

    debug!(%repository, %cutoff, recursive = options.recursive, "sweeping for orphaned digests");

    let collector = Collector::new(filters, out);
    let client = RegistryClient::new(Credentials::from_env());

    if options.recursive {
        client.walk(&repository, &collector).await?;
    } else {
        match client.list(&repository).await {
            Ok(listing) => collector.visit(&repository, Ok(&listing))?,
            Err(err) => collector.visit(&repository, Err(err))?,
        }
    }

    Ok(())
}
