//! A scripted stand-in for kubectl used by unit tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::k8s::kubectl::Kubectl;

const INVOCATION_END: &str = "---";

/// Shell script run through `sh`, recording argv for every invocation
pub struct FakeKubectl {
    dir: TempDir,
}

impl FakeKubectl {
    /// `body` runs after the arguments are recorded; `$@` holds kubectl's args
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("args.log");
        let script = format!(
            "{{ for a in \"$@\"; do printf '%s\\n' \"$a\"; done; echo '{}'; }} >> '{}'\n{}\n",
            INVOCATION_END,
            log.display(),
            body
        );
        fs::write(dir.path().join("kubectl.sh"), script).unwrap();
        Self { dir }
    }

    /// Prints `yaml` for `config view` and succeeds for everything else
    pub fn with_view(yaml: &str) -> Self {
        Self::new(&format!(
            "case \"$*\" in\n  *\"config view\"*) cat <<'YAML'\n{}\nYAML\n  ;;\nesac",
            yaml.trim_end()
        ))
    }

    /// Prints a sample from `tests/samples` for `config view`
    pub fn with_sample(name: &str) -> Self {
        Self::with_view(&fs::read_to_string(sample_path(name)).unwrap())
    }

    pub fn kubectl(&self) -> Kubectl {
        Kubectl::new("sh").leading_args([self.script().display().to_string()])
    }

    fn script(&self) -> PathBuf {
        self.dir.path().join("kubectl.sh")
    }

    /// Arguments of every invocation so far, oldest first
    pub fn invocations(&self) -> Vec<Vec<String>> {
        let log = fs::read_to_string(self.dir.path().join("args.log")).unwrap_or_default();
        let mut calls = Vec::new();
        let mut current = Vec::new();
        for line in log.lines() {
            if line == INVOCATION_END {
                calls.push(std::mem::take(&mut current));
            } else {
                current.push(line.to_string());
            }
        }
        calls
    }

    /// The most recent invocation, without the leading `config`
    pub fn last_config_args(&self) -> Vec<String> {
        let mut last = self.invocations().pop().unwrap_or_default();
        if let Some(pos) = last.iter().position(|a| a == "config") {
            last.drain(..=pos);
        }
        last
    }
}

pub fn sample_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("samples")
        .join(name)
}
