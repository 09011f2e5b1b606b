use chrono::{DateTime, Utc};

/// Time source used to compute the age cutoff. Tests freeze it so cutoff
/// arithmetic is exact.
#[derive(Clone, Debug, Default)]
pub struct Clock {
    inner: Inner,
}

#[derive(Clone, Debug, Default)]
enum Inner {
    #[default]
    Realtime,
    #[cfg(test)]
    Frozen(DateTime<Utc>),
}

impl Clock {
    pub fn new() -> Self {
        Self {
            inner: Inner::Realtime,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        match &self.inner {
            Inner::Realtime => Utc::now(),
            #[cfg(test)]
            Inner::Frozen(at) => *at,
        }
    }

    /// Creates a clock pinned to a fixed instant.
    #[cfg(test)]
    pub fn frozen(at: DateTime<Utc>) -> Self {
        Self {
            inner: Inner::Frozen(at),
        }
    }
}
