//! The per-repository callback bound to a filter set. For every manifest
//! passing all filters it writes one `repository@digest` line; downstream
//! tooling parses that format, so it must stay byte-stable.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::client::RepositoryVisitor;
use crate::error::SweepError;
use crate::filters::ManifestFilter;
use crate::listing::TagListing;
use crate::reference::RepositoryReference;

pub struct Collector<W> {
    filters: Vec<ManifestFilter>,
    out: Mutex<W>,
}

impl<W: Write + Send> Collector<W> {
    pub fn new(filters: Vec<ManifestFilter>, out: W) -> Self {
        Self {
            filters,
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> RepositoryVisitor for Collector<W> {
    /// Applies every filter to every manifest in the listing, emitting one
    /// line per match. A fetch error is propagated unchanged without
    /// touching the output stream.
    fn visit(
        &self,
        repository: &RepositoryReference,
        listing: Result<&TagListing, SweepError>,
    ) -> Result<(), SweepError> {
        let listing = listing?;

        let mut matched = 0usize;
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        for (digest, manifest) in &listing.manifests {
            if self.filters.iter().all(|filter| filter(manifest)) {
                writeln!(out, "{repository}@{digest}")?;
                matched += 1;
            }
        }

        debug!(
            %repository,
            matched,
            total = listing.manifests.len(),
            "evaluated tag listing"
        );
        Ok(())
    }
}
