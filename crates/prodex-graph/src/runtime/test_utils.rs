//! Test runtime that counts filesystem traffic.
//!
//! Delegates to [`NativeRuntime`] over a real temporary directory and records
//! how many reads and stats each path received, so tests can check that a
//! run memoises its probes.

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use super::native::NativeRuntime;
use super::{FileMetadata, Runtime, RuntimeResult};

#[derive(Debug, Default)]
struct Counters {
    reads: FxHashMap<PathBuf, usize>,
    stats: FxHashMap<PathBuf, usize>,
}

/// Counting wrapper around the native runtime.
#[derive(Debug)]
pub struct TestRuntime {
    cwd: PathBuf,
    inner: NativeRuntime,
    counters: Mutex<Counters>,
}

impl TestRuntime {
    /// Create a runtime whose working directory is `cwd`.
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            inner: NativeRuntime,
            counters: Mutex::new(Counters::default()),
        }
    }

    /// Number of times `path` was read.
    pub fn reads_of(&self, path: &Path) -> usize {
        self.counters.lock().reads.get(path).copied().unwrap_or(0)
    }

    /// Number of times `path` was stat'ed.
    pub fn stats_of(&self, path: &Path) -> usize {
        self.counters.lock().stats.get(path).copied().unwrap_or(0)
    }

    /// Total reads across all paths.
    pub fn total_reads(&self) -> usize {
        self.counters.lock().reads.values().sum()
    }

    /// Total stats across all paths.
    pub fn total_stats(&self) -> usize {
        self.counters.lock().stats.values().sum()
    }
}

#[async_trait]
impl Runtime for TestRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        *self
            .counters
            .lock()
            .reads
            .entry(path.to_path_buf())
            .or_default() += 1;
        self.inner.read_file(path).await
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        *self
            .counters
            .lock()
            .stats
            .entry(path.to_path_buf())
            .or_default() += 1;
        self.inner.metadata(path).await
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        self.inner.read_dir(path).await
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}
