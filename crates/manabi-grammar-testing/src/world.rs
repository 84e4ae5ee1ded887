//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated source tree
//! - Building a database from it
//! - Executing CLI commands against both

use anyhow::{Context, Result};
use assert_cmd::Command;
use manabi_grammar_db::{GrammarDb, write_database};
use manabi_grammar_source::collect_entries;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use manabi_grammar_testing::TestWorld;
///
/// let world = TestWorld::new().with_sample_tree().with_database();
///
/// let result = world.run(&["entry", "list"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    root: PathBuf,
    db_path: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment with an empty source tree.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("grammar");
        let db_path = temp_dir.path().join("dist/manabi-grammar.sqlite");

        std::fs::create_dir_all(&root).expect("Failed to create source root");

        Self {
            temp_dir,
            root,
            db_path,
            env_vars: HashMap::new(),
        }
    }

    /// Source tree root (contains `grammar-*` directories).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where [`TestWorld::with_database`] writes the database.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write the sample が/は tree.
    pub fn with_sample_tree(self) -> Self {
        fixtures::write_sample_tree(&self.root).expect("Failed to write sample tree");
        self
    }

    /// Write an extra file into the source tree.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        fixtures::write_file(&self.root, relative, content).expect("Failed to write file");
        self
    }

    /// Build the database from the current source tree, in-process.
    pub fn with_database(self) -> Self {
        self.build_database().expect("Failed to build database");
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    pub fn build_database(&self) -> Result<usize> {
        let entries = collect_entries(&self.root)
            .with_context(|| format!("Failed to collect {}", self.root.display()))?;
        Ok(write_database(&self.db_path, &entries)?)
    }

    pub fn open_database(&self) -> Result<GrammarDb> {
        Ok(GrammarDb::open(&self.db_path)?)
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// Runs from the temp root with HOME pointed at it so no stray config
    /// file is picked up, and clears `MANABI_GRAMMAR_DB` unless the test set it.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(self.temp_dir.path());
        cmd.env("HOME", self.temp_dir.path());
        cmd.env("XDG_CONFIG_HOME", self.temp_dir.path().join(".config"));
        cmd.env_remove("MANABI_GRAMMAR_DB");
        cmd.env_remove("RUST_LOG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the CLI with `args` and capture its output.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("manabi-grammar")
            .map_err(|e| anyhow::anyhow!("Failed to find manabi-grammar binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Run an `entry` subcommand against the built database.
    pub fn run_entry(&self, args: &[&str]) -> Result<CliResult> {
        let db = self.db_path.display().to_string();
        let mut full = vec!["--db", db.as_str(), "entry"];
        full.extend_from_slice(args);
        self.run(&full)
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
