use factgraph_core::proxy::{DEFAULT_PREFIX, DEFAULT_TARGET};
use factgraph_core::{ProxyError, ProxyRule};
use std::path::PathBuf;

pub const DEFAULT_DEV_BIND: &str = "127.0.0.1:5173";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DevSettings {
    pub bind: String,
    pub dist_dir: PathBuf,
    pub rule: ProxyRule,
}

impl DevSettings {
    pub fn from_env() -> Result<Self, ProxyError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProxyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let target = non_empty("FACTGRAPH_PROXY_TARGET").unwrap_or_else(|| DEFAULT_TARGET.into());
        let mut rule = ProxyRule::new(DEFAULT_PREFIX, target.trim())?;
        rule.rewrite_prefix = matches!(
            non_empty("FACTGRAPH_PROXY_REWRITE").as_deref(),
            Some("1" | "true" | "yes")
        );

        Ok(Self {
            bind: non_empty("FACTGRAPH_DEV_BIND").unwrap_or_else(|| DEFAULT_DEV_BIND.into()),
            dist_dir: non_empty("FACTGRAPH_DIST_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("dist")),
            rule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dev_proxy() {
        let s = DevSettings::from_lookup(|_| None).expect("settings");
        assert_eq!(s.bind, "127.0.0.1:5173");
        assert_eq!(s.dist_dir, PathBuf::from("dist"));
        assert_eq!(s.rule, ProxyRule::default());
    }

    #[test]
    fn rewrite_and_target_from_env() {
        let s = DevSettings::from_lookup(|k| match k {
            "FACTGRAPH_PROXY_TARGET" => Some("http://10.0.0.2:9000/".into()),
            "FACTGRAPH_PROXY_REWRITE" => Some("1".into()),
            _ => None,
        })
        .expect("settings");
        assert!(s.rule.rewrite_prefix);
        assert_eq!(s.rule.forward_url("/api/ping"), "http://10.0.0.2:9000/ping");
    }

    #[test]
    fn bad_target_is_an_error() {
        let res = DevSettings::from_lookup(|k| {
            (k == "FACTGRAPH_PROXY_TARGET").then(|| "localhost:8080".to_string())
        });
        assert!(matches!(res, Err(ProxyError::InvalidTarget(_))));
    }
}
