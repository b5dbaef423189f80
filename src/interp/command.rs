//! Interpreter dispatch via child processes.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::{ExecError, Interpreter, QueryParams};

/// Production interpreter: spawns the configured program.
///
/// Invocation shape: `argv[0] argv[1..] <base name> k=v k=v ...`, with the
/// working directory set to the file's containing directory. The handling
/// task blocks until the child exits; there is no execution timeout.
#[derive(Debug, Default, Clone)]
pub struct CommandInterpreter;

#[async_trait]
impl Interpreter for CommandInterpreter {
    async fn run(
        &self,
        argv: &[String],
        file: &Path,
        params: &QueryParams,
    ) -> Result<Vec<u8>, ExecError> {
        let (program, args) = argv.split_first().ok_or(ExecError::EmptyArgv)?;

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(name) = file.file_name() {
            cmd.arg(name);
        }
        for (key, value) in params {
            cmd.arg(format!("{key}={value}"));
        }
        if let Some(dir) = file.parent() {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = cmd.output().await.map_err(|source| ExecError::Spawn {
            program: program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(ExecError::Exit {
                program: program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.md");
        tokio::fs::write(&file, "body text").await.unwrap();

        // cat runs in the file's directory and receives its base name.
        let out = CommandInterpreter
            .run(&argv(&["/bin/cat"]), &file, &Vec::new())
            .await
            .unwrap();
        assert_eq!(out, b"body text");
    }

    #[tokio::test]
    async fn test_query_params_become_trailing_argv() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.md");
        tokio::fs::write(&file, "").await.unwrap();

        let params = vec![
            ("x".to_string(), "1".to_string()),
            ("y".to_string(), "2".to_string()),
        ];
        let out = CommandInterpreter
            .run(&argv(&["/bin/sh", "-c", "echo $@", "sh"]), &file, &params)
            .await
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&out).trim(), "page.md x=1 y=2");
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.md");
        tokio::fs::write(&file, "").await.unwrap();

        let err = CommandInterpreter
            .run(&argv(&["/nonexistent/program"]), &file, &Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.md");
        tokio::fs::write(&file, "").await.unwrap();

        let err = CommandInterpreter
            .run(
                &argv(&["/bin/sh", "-c", "echo oops >&2; exit 3", "sh"]),
                &file,
                &Vec::new(),
            )
            .await
            .unwrap_err();
        match err {
            ExecError::Exit { status, stderr, .. } => {
                assert_eq!(status.code(), Some(3));
                assert!(stderr.contains("oops"));
            }
            other => panic!("expected Exit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_argv() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.md");
        tokio::fs::write(&file, "").await.unwrap();

        let err = CommandInterpreter
            .run(&Vec::new(), &file, &Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::EmptyArgv));
    }
}
