//! Remote target value object - where a job mirrors to.

use std::fmt;

/// Remote side of a mirror: `[user@]host:path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    /// Login user; `None` lets ssh pick (its config or the local user)
    pub user: Option<String>,
    /// Remote host name or address
    pub host: String,
    /// Remote directory the local root is mirrored into
    pub path: String,
}

impl RemoteTarget {
    pub fn new(user: Option<String>, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            user: user.filter(|u| !u.is_empty()),
            host: host.into(),
            path: path.into(),
        }
    }

    /// `user@host` or just `host`
    pub fn login(&self) -> String {
        match &self.user {
            Some(user) => format!("{}@{}", user, self.host),
            None => self.host.clone(),
        }
    }

    /// rsync destination argument, with a trailing slash so the remote
    /// directory receives the contents of the local root.
    pub fn destination(&self) -> String {
        format!("{}:{}/", self.login(), self.path.trim_end_matches('/'))
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.login(), self.path)
    }
}
