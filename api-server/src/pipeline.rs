//! Verification pipeline seam.
//!
//! The knowledge-graph verifier runs out of process; the server only knows
//! how to hand it a task id and the article text and whether it succeeded.

use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("no verifier configured")]
    NotConfigured,
    #[error("failed to start verifier: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("failed to feed verifier input: {0}")]
    Input(#[source] std::io::Error),
    #[error("verifier exited with {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },
}

/// Runs one verification job to completion. Called on a blocking thread.
pub trait Verifier: Send + Sync + 'static {
    fn verify(&self, task_id: &str, text: &str) -> Result<(), VerifyError>;

    fn is_ready(&self) -> bool {
        true
    }
}

/// Used when no pipeline is configured; every job fails.
pub struct Unconfigured;

impl Verifier for Unconfigured {
    fn verify(&self, _task_id: &str, _text: &str) -> Result<(), VerifyError> {
        Err(VerifyError::NotConfigured)
    }

    fn is_ready(&self) -> bool {
        false
    }
}

/// Spawns `program args.. <task_id>` with the article on stdin.
#[derive(Clone, Debug)]
pub struct CommandVerifier {
    program: String,
    args: Vec<String>,
    workdir: Option<PathBuf>,
}

impl CommandVerifier {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            workdir: None,
        }
    }

    /// Splits a whitespace separated command line; `None` when it is blank.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(ToString::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }
}

impl Verifier for CommandVerifier {
    fn verify(&self, task_id: &str, text: &str) -> Result<(), VerifyError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(task_id)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(VerifyError::Spawn)?;
        // Fed from its own thread so a chatty stderr cannot block the write.
        let feeder = child.stdin.take().map(|mut stdin| {
            let text = text.to_owned();
            thread::spawn(move || match stdin.write_all(text.as_bytes()) {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                other => other,
            })
        });
        let output = child.wait_with_output().map_err(VerifyError::Spawn)?;
        let fed = match feeder.map(|h| h.join()) {
            Some(Ok(res)) => res,
            Some(Err(_)) => Err(io::Error::other("stdin writer panicked")),
            None => Ok(()),
        };

        if !output.status.success() {
            return Err(VerifyError::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        fed.map_err(VerifyError::Input)
    }
}

pub fn from_settings(settings: &crate::Settings) -> Arc<dyn Verifier> {
    match settings
        .verifier_cmd
        .as_deref()
        .and_then(CommandVerifier::from_command_line)
    {
        Some(v) => Arc::new(v.with_workdir(&settings.tmp_dir)),
        None => Arc::new(Unconfigured),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_command_line_is_none() {
        assert!(CommandVerifier::from_command_line("   ").is_none());
        let v = CommandVerifier::from_command_line("python -m qa.verifier").expect("cmd");
        assert_eq!(v.program, "python");
        assert_eq!(v.args, vec!["-m", "qa.verifier"]);
    }

    #[test]
    fn unconfigured_is_not_ready() {
        assert!(!Unconfigured.is_ready());
        assert!(matches!(
            Unconfigured.verify("t", "x"),
            Err(VerifyError::NotConfigured)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn command_gets_task_id_and_text() {
        let v = CommandVerifier::new(
            "sh",
            vec!["-c".into(), r#"test "$0" = abc123 && grep -q headline"#.into()],
        );
        assert!(v.is_ready());
        v.verify("abc123", "breaking headline text").expect("verify");
        assert!(v.verify("other", "breaking headline text").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_reports_stderr() {
        let v = CommandVerifier::new("sh", vec!["-c".into(), "echo boom >&2; exit 3".into()]);
        match v.verify("t", "") {
            Err(VerifyError::Failed { code, stderr }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn command_may_exit_without_reading_input() {
        let v = CommandVerifier::new("true", Vec::new());
        v.verify("t", &"x".repeat(1 << 20)).expect("verify");
    }

    #[cfg(unix)]
    #[test]
    fn large_input_and_stderr_do_not_deadlock() {
        let v = CommandVerifier::new(
            "sh",
            vec!["-c".into(), "head -c 1048576 /dev/zero >&2; cat >/dev/null".into()],
        );
        v.verify("t", &"x".repeat(1 << 20)).expect("verify");
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let v = CommandVerifier::new("factgraph-no-such-binary", Vec::new());
        assert!(matches!(v.verify("t", "x"), Err(VerifyError::Spawn(_))));
    }
}
