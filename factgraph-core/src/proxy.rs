//! Development proxy rule: requests under a path prefix are forwarded to a
//! local backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PREFIX: &str = "/api";
pub const DEFAULT_TARGET: &str = "http://127.0.0.1:8080";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProxyError {
    #[error("proxy prefix '{0}' must start with '/'")]
    InvalidPrefix(String),
    #[error("proxy target '{0}' must be an http(s) origin")]
    InvalidTarget(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRule {
    pub prefix: String,
    pub target: String,
    /// Rewrite `Host` and `Origin` to the target's origin.
    pub change_origin: bool,
    /// Strip the prefix before forwarding.
    pub rewrite_prefix: bool,
}

impl Default for ProxyRule {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.into(),
            target: DEFAULT_TARGET.into(),
            change_origin: true,
            rewrite_prefix: false,
        }
    }
}

impl ProxyRule {
    pub fn new(prefix: &str, target: &str) -> Result<Self, ProxyError> {
        let rule = Self {
            prefix: prefix.to_string(),
            target: target.trim_end_matches('/').to_string(),
            ..Self::default()
        };
        rule.validate()?;
        Ok(rule)
    }

    pub fn validate(&self) -> Result<(), ProxyError> {
        if !self.prefix.starts_with('/') {
            return Err(ProxyError::InvalidPrefix(self.prefix.clone()));
        }
        let authority = self
            .target
            .strip_prefix("http://")
            .or_else(|| self.target.strip_prefix("https://"))
            .ok_or_else(|| ProxyError::InvalidTarget(self.target.clone()))?;
        if authority.is_empty() || authority.contains('/') {
            return Err(ProxyError::InvalidTarget(self.target.clone()));
        }
        Ok(())
    }

    /// Plain string-prefix match against the request path.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Upstream URL for `path_and_query`, applying the prefix rewrite.
    pub fn forward_url(&self, path_and_query: &str) -> String {
        let mut path = path_and_query;
        if self.rewrite_prefix {
            path = path.strip_prefix(&self.prefix).unwrap_or(path);
        }
        let base = self.target.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// `host[:port]` of the target.
    pub fn target_authority(&self) -> &str {
        let rest = self
            .target
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.target);
        rest.split('/').next().unwrap_or(rest)
    }

    /// Scheme plus authority of the target, used as the rewritten `Origin`.
    pub fn target_origin(&self) -> String {
        match self.target.split_once("://") {
            Some((scheme, _)) => format!("{scheme}://{}", self.target_authority()),
            None => self.target.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rule_targets_local_backend() {
        let rule = ProxyRule::default();
        assert!(rule.validate().is_ok());
        assert!(rule.change_origin);
        assert!(!rule.rewrite_prefix);
        assert_eq!(rule.target_authority(), "127.0.0.1:8080");
        assert_eq!(rule.target_origin(), "http://127.0.0.1:8080");
    }

    #[test]
    fn matches_by_string_prefix() {
        let rule = ProxyRule::default();
        assert!(rule.matches("/api"));
        assert!(rule.matches("/api/ping"));
        assert!(rule.matches("/apis"));
        assert!(!rule.matches("/app"));
        assert!(!rule.matches("/tasks/api"));
    }

    #[test]
    fn forward_url_keeps_path_and_query() {
        let rule = ProxyRule::default();
        assert_eq!(
            rule.forward_url("/api/verify/1a2b?x=1"),
            "http://127.0.0.1:8080/api/verify/1a2b?x=1"
        );
    }

    #[test]
    fn forward_url_with_rewrite_strips_prefix() {
        let rule = ProxyRule {
            rewrite_prefix: true,
            ..ProxyRule::default()
        };
        assert_eq!(rule.forward_url("/api/ping"), "http://127.0.0.1:8080/ping");
        assert_eq!(rule.forward_url("/api"), "http://127.0.0.1:8080/");
        assert_eq!(rule.forward_url("/api?x=1"), "http://127.0.0.1:8080/?x=1");
    }

    #[test]
    fn rejects_bad_rules() {
        assert_eq!(
            ProxyRule::new("api", DEFAULT_TARGET),
            Err(ProxyError::InvalidPrefix("api".into()))
        );
        assert!(ProxyRule::new("/api", "127.0.0.1:8080").is_err());
        assert!(ProxyRule::new("/api", "http://").is_err());
        assert!(ProxyRule::new("/api", "http://host/base").is_err());
        let rule = ProxyRule::new("/api", "https://backend.local:9000/").expect("rule");
        assert_eq!(rule.target, "https://backend.local:9000");
        assert_eq!(rule.target_origin(), "https://backend.local:9000");
    }
}
