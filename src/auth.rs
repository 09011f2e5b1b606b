use reqwest::RequestBuilder;

/// Credentials threaded through every registry request. Resolved once at
/// startup; the client never inspects or refreshes them.
#[derive(Clone, Debug, Default)]
pub enum Credentials {
    #[default]
    Anonymous,
    Basic {
        username: String,
        password: String,
    },
    Bearer {
        token: String,
    },
}

impl Credentials {
    /// Resolves credentials from the environment: `REGSWEEP_TOKEN` wins,
    /// then `REGSWEEP_USERNAME`/`REGSWEEP_PASSWORD`, else anonymous.
    pub fn from_env() -> Self {
        if let Ok(token) = std::env::var("REGSWEEP_TOKEN") {
            if !token.is_empty() {
                return Self::Bearer { token };
            }
        }

        match (
            std::env::var("REGSWEEP_USERNAME"),
            std::env::var("REGSWEEP_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) if !username.is_empty() => Self::Basic { username, password },
            _ => Self::Anonymous,
        }
    }

    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Anonymous => request,
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::Bearer { token } => request.bearer_auth(token),
        }
    }
}
