use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A config file inside a temporary directory that lives as long as this value.
pub struct TempConfig {
    dir: TempDir,
    path: PathBuf,
}

impl TempConfig {
    pub fn write(contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).expect("write temp config");
        Self { dir, path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn dir(&self) -> &std::path::Path {
        self.dir.path()
    }
}

pub const MINIMAL: &str = r#"
database = "ipowatch-test.db"

[logging]
level = "warn"
format = "pretty"

[dispatch]
notify_hour = 9
notify_minute = 0
max_batch_size = 3
"#;
