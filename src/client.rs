//! Registry client for the `tags/list` listing extension: a single-repository
//! fetch and a recursive walk over every descendant repository. Errors are
//! surfaced verbatim and never retried.

use std::collections::VecDeque;

use reqwest::header::ACCEPT;
use tracing::debug;

use crate::auth::Credentials;
use crate::error::SweepError;
use crate::listing::TagListing;
use crate::reference::RepositoryReference;

/// Per-repository callback driven by [`RegistryClient::walk`]. The callback
/// receives either the repository's listing or the error that fetching it
/// produced; returning an error aborts the walk.
pub trait RepositoryVisitor {
    fn visit(
        &self,
        repository: &RepositoryReference,
        listing: Result<&TagListing, SweepError>,
    ) -> Result<(), SweepError>;
}

pub struct RegistryClient {
    http: reqwest::Client,
    credentials: Credentials,
}

impl RegistryClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
        }
    }

    /// Fetches the tag listing for exactly one repository.
    pub async fn list(
        &self,
        repository: &RepositoryReference,
    ) -> Result<TagListing, SweepError> {
        let url = repository.tags_list_url();
        debug!(%repository, %url, "fetching tag listing");

        let request = self
            .credentials
            .apply(self.http.get(&url).header(ACCEPT, "application/json"));
        let response = request.send().await.map_err(|source| SweepError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SweepError::Registry {
                repository: repository.to_string(),
                status,
                body: body.chars().take(200).collect(),
            });
        }

        response
            .json::<TagListing>()
            .await
            .map_err(|source| SweepError::Transport { url, source })
    }

    /// Visits the root repository and every descendant discovered through the
    /// listings' `child` entries, breadth-first. Fetch failures are handed to
    /// the visitor, whose error return aborts the whole walk.
    pub async fn walk(
        &self,
        root: &RepositoryReference,
        visitor: &impl RepositoryVisitor,
    ) -> Result<(), SweepError> {
        let mut pending = VecDeque::from([root.clone()]);

        while let Some(repository) = pending.pop_front() {
            match self.list(&repository).await {
                Ok(listing) => {
                    visitor.visit(&repository, Ok(&listing))?;
                    for child in &listing.children {
                        pending.push_back(repository.child(child));
                    }
                }
                Err(err) => visitor.visit(&repository, Err(err))?,
            }
        }

        Ok(())
    }
}
