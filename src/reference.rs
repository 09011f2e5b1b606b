use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::SweepError;

pub const DEFAULT_REGISTRY: &str = "index.docker.io";

// Distribution-spec repository grammar: lowercase alphanumeric components
// joined by '.', '_', '__' or runs of '-', path elements joined by '/'.
static REPOSITORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:(?:[._]|__|-+)[a-z0-9]+)*(?:/[a-z0-9]+(?:(?:[._]|__|-+)[a-z0-9]+)*)*$")
        .unwrap()
});

/// A validated registry location: registry host plus repository path.
/// Immutable once parsed; the display form is what report lines carry.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct RepositoryReference {
    registry: String,
    repository: String,
}

impl RepositoryReference {
    pub fn registry(&self) -> &str {
        &self.registry
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// The reference for a child repository one path element below this one.
    pub fn child(&self, name: &str) -> Self {
        Self {
            registry: self.registry.clone(),
            repository: format!("{}/{}", self.repository, name),
        }
    }

    pub fn tags_list_url(&self) -> String {
        format!(
            "{}://{}/v2/{}/tags/list",
            self.scheme(),
            self.registry,
            self.repository
        )
    }

    /// Loopback registries are reached over plain HTTP, everything else
    /// over HTTPS.
    pub fn scheme(&self) -> &'static str {
        match self.host() {
            "localhost" | "127.0.0.1" | "::1" => "http",
            _ => "https",
        }
    }

    fn host(&self) -> &str {
        if let Some(rest) = self.registry.strip_prefix('[') {
            return rest.split(']').next().unwrap_or(rest);
        }
        self.registry.split(':').next().unwrap_or(&self.registry)
    }
}

fn is_registry_component(component: &str) -> bool {
    component == "localhost" || component.contains('.') || component.contains(':')
}

impl FromStr for RepositoryReference {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| SweepError::InvalidReference {
            reference: s.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(invalid("empty reference"));
        }

        let (registry, repository) = match s.split_once('/') {
            Some((first, rest)) if is_registry_component(first) => {
                (first.to_string(), rest.to_string())
            }
            _ => (DEFAULT_REGISTRY.to_string(), s.to_string()),
        };

        if repository.is_empty() {
            return Err(invalid("empty repository path"));
        }
        if !REPOSITORY_RE.is_match(&repository) {
            return Err(invalid(
                "repository may only contain lowercase alphanumerics separated by '.', '_', '-' and '/'",
            ));
        }
        if !registry
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '-' | '[' | ']'))
        {
            return Err(invalid("registry contains invalid characters"));
        }

        Ok(Self {
            registry,
            repository,
        })
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.registry, self.repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_registry() {
        let reference: RepositoryReference = "gcr.io/project/image".parse().unwrap();
        assert_eq!(reference.registry(), "gcr.io");
        assert_eq!(reference.repository(), "project/image");
        assert_eq!(reference.to_string(), "gcr.io/project/image");
    }

    #[test]
    fn default_registry() {
        let reference: RepositoryReference = "library/ubuntu".parse().unwrap();
        assert_eq!(reference.registry(), DEFAULT_REGISTRY);
        assert_eq!(reference.repository(), "library/ubuntu");
    }

    #[test]
    fn registry_with_port() {
        let reference: RepositoryReference = "localhost:5000/app".parse().unwrap();
        assert_eq!(reference.registry(), "localhost:5000");
        assert_eq!(reference.scheme(), "http");
    }

    #[test]
    fn remote_registries_use_https() {
        let reference: RepositoryReference = "gcr.io/project/image".parse().unwrap();
        assert_eq!(reference.scheme(), "https");
    }

    #[test]
    fn loopback_uses_http() {
        let reference: RepositoryReference = "127.0.0.1:39000/project/app".parse().unwrap();
        assert_eq!(reference.scheme(), "http");
        assert_eq!(
            reference.tags_list_url(),
            "http://127.0.0.1:39000/v2/project/app/tags/list"
        );
    }

    #[test]
    fn child_appends_one_element() {
        let reference: RepositoryReference = "gcr.io/project/app".parse().unwrap();
        let child = reference.child("api");
        assert_eq!(child.to_string(), "gcr.io/project/app/api");
    }

    #[test]
    fn rejects_uppercase_repository() {
        assert!("gcr.io/Project/Image".parse::<RepositoryReference>().is_err());
    }

    #[test]
    fn rejects_empty_repository() {
        assert!("gcr.io/".parse::<RepositoryReference>().is_err());
        assert!("".parse::<RepositoryReference>().is_err());
    }

    #[test]
    fn separators_need_alphanumerics_on_both_sides() {
        assert!("gcr.io/project/-app".parse::<RepositoryReference>().is_err());
        assert!("gcr.io/project/app-".parse::<RepositoryReference>().is_err());
        assert!("gcr.io/project/my-app.v2".parse::<RepositoryReference>().is_ok());
    }
}
