use crate::tasks::DEFAULT_MAX_FINISHED;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:8080", "http://localhost:5173"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub bind: String,
    pub allowed_origins: Vec<String>,
    /// Command line of the external verification pipeline.
    pub verifier_cmd: Option<String>,
    pub tmp_dir: PathBuf,
    /// Settled tasks kept before the oldest are evicted.
    pub max_finished_tasks: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.into(),
            allowed_origins: DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect(),
            verifier_cmd: None,
            tmp_dir: PathBuf::from("/tmp"),
            max_finished_tasks: DEFAULT_MAX_FINISHED,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let allowed_origins = non_empty("FACTGRAPH_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or(defaults.allowed_origins);

        Self {
            bind: non_empty("FACTGRAPH_BIND").unwrap_or(defaults.bind),
            allowed_origins,
            verifier_cmd: non_empty("FACTGRAPH_VERIFIER_CMD"),
            tmp_dir: non_empty("FACTGRAPH_TMP_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.tmp_dir),
            max_finished_tasks: non_empty("FACTGRAPH_MAX_FINISHED_TASKS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_finished_tasks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_env_is_empty() {
        let s = Settings::from_lookup(|_| None);
        assert_eq!(s, Settings::default());
        assert_eq!(s.bind, "127.0.0.1:8080");
        assert_eq!(s.allowed_origins.len(), 2);
        assert_eq!(s.max_finished_tasks, DEFAULT_MAX_FINISHED);
    }

    #[test]
    fn parses_origin_list_and_verifier() {
        let s = Settings::from_lookup(|k| match k {
            "FACTGRAPH_ALLOWED_ORIGINS" => Some(" https://a.example , ,https://b.example".into()),
            "FACTGRAPH_VERIFIER_CMD" => Some("python -m qa.verifier.pipeline".into()),
            "FACTGRAPH_BIND" => Some("   ".into()),
            "FACTGRAPH_MAX_FINISHED_TASKS" => Some("500".into()),
            _ => None,
        });
        assert_eq!(s.max_finished_tasks, 500);
        assert_eq!(s.allowed_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(s.verifier_cmd.as_deref(), Some("python -m qa.verifier.pipeline"));
        assert_eq!(s.bind, DEFAULT_BIND);
    }
}
