//! Document store: loads the CV documents the chatbot is grounded on.
//!
//! Paths come from `[documents].paths` (files or `http(s)://` URLs), followed
//! by any files found under `[documents].root`. Only plain-text documents are
//! read; anything not matching `include_globs` (PDFs, images, …) is skipped
//! quietly. A path that fails to load is logged and left out, and the rest
//! still load.
//!
//! Fetches run concurrently. The resulting documents keep the order of the
//! resolved path list.

use anyhow::Result;
use async_trait::async_trait;
use futures_util::future::join_all;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

use crate::config::DocumentsConfig;
use crate::error::{ChatError, ChatResult};
use crate::models::SourceDocument;

/// Fetch-by-path capability backing the store.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Read the text content at `path`.
    async fn fetch(&self, path: &str) -> ChatResult<String>;
}

/// Reads documents from the local filesystem.
pub struct FsSource;

#[async_trait]
impl DocumentSource for FsSource {
    async fn fetch(&self, path: &str) -> ChatResult<String> {
        let bytes = tokio::fs::read(path).await.map_err(|e| load_error(path, e))?;
        String::from_utf8(bytes).map_err(|_| load_error(path, "content is not valid UTF-8"))
    }
}

/// Fetches documents over HTTP(S).
pub struct HttpSource {
    http: reqwest::Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> ChatResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Transport(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, path: &str) -> ChatResult<String> {
        let response = self
            .http
            .get(path)
            .send()
            .await
            .map_err(|e| load_error(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(load_error(path, format!("HTTP {}", status)));
        }

        response.text().await.map_err(|e| load_error(path, e))
    }
}

/// Dispatches to [`HttpSource`] for URLs and [`FsSource`] for everything else.
pub struct DefaultSource {
    fs: FsSource,
    http: HttpSource,
}

impl DefaultSource {
    pub fn new(timeout: Duration) -> ChatResult<Self> {
        Ok(Self {
            fs: FsSource,
            http: HttpSource::new(timeout)?,
        })
    }
}

#[async_trait]
impl DocumentSource for DefaultSource {
    async fn fetch(&self, path: &str) -> ChatResult<String> {
        if is_url(path) {
            self.http.fetch(path).await
        } else {
            self.fs.fetch(path).await
        }
    }
}

fn is_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

fn load_error(path: &str, reason: impl std::fmt::Display) -> ChatError {
    ChatError::DocumentLoad {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// Result of loading a set of paths.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Vec<SourceDocument>,
    skipped: Vec<String>,
    failures: Vec<ChatError>,
}

enum Outcome {
    Loaded(SourceDocument),
    Skipped(String),
    Failed(ChatError),
}

impl DocumentStore {
    /// Load `paths` through `source`, accepting only paths matched by `include`.
    pub async fn load(paths: &[String], include: &GlobSet, source: &dyn DocumentSource) -> Self {
        let fetches = paths.iter().map(|path| async move {
            if !include.is_match(path) {
                return Outcome::Skipped(path.clone());
            }
            match source.fetch(path).await {
                Ok(content) => Outcome::Loaded(SourceDocument {
                    path: path.clone(),
                    content,
                }),
                Err(e) => Outcome::Failed(e),
            }
        });

        let mut store = Self::default();
        for outcome in join_all(fetches).await {
            match outcome {
                Outcome::Loaded(doc) => store.documents.push(doc),
                Outcome::Skipped(path) => {
                    tracing::debug!(path = %path, "skipping unsupported document format");
                    store.skipped.push(path);
                }
                Outcome::Failed(e) => {
                    tracing::warn!(error = %e, "document omitted");
                    store.failures.push(e);
                }
            }
        }

        tracing::info!(
            loaded = store.documents.len(),
            skipped = store.skipped.len(),
            failed = store.failures.len(),
            "documents loaded"
        );
        store
    }

    /// Resolve and load everything `config` names, using the default sources.
    pub async fn from_config(config: &DocumentsConfig, timeout: Duration) -> Result<Self> {
        let resolved = resolve_paths(config)?;
        for failure in &resolved.failures {
            tracing::warn!(error = %failure, "document scan problem");
        }

        let include = build_globset(&config.include_globs)?;
        let source = DefaultSource::new(timeout)?;
        let mut store = Self::load(&resolved.paths, &include, &source).await;
        store.failures.extend(resolved.failures);
        Ok(store)
    }

    pub fn documents(&self) -> &[SourceDocument] {
        &self.documents
    }

    pub fn into_documents(self) -> Vec<SourceDocument> {
        self.documents
    }

    /// Paths left out because their format is not supported.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Paths that matched but could not be read.
    pub fn failures(&self) -> &[ChatError] {
        &self.failures
    }
}

/// Paths to load, plus problems met while scanning `root`.
#[derive(Debug, Default)]
pub struct ResolvedPaths {
    pub paths: Vec<String>,
    pub failures: Vec<ChatError>,
}

/// Explicit paths first, then files found under `root`, sorted.
///
/// Files under `root` that are already listed explicitly are not repeated.
/// A missing root or an unreadable entry is recorded as a failure and the
/// rest still resolves.
pub fn resolve_paths(config: &DocumentsConfig) -> Result<ResolvedPaths> {
    let mut resolved = ResolvedPaths {
        paths: config.paths.clone(),
        failures: Vec::new(),
    };

    let Some(root) = &config.root else {
        return Ok(resolved);
    };

    let root_str = root.to_string_lossy();
    if !root.is_dir() {
        resolved
            .failures
            .push(load_error(&root_str, "documents.root is not a directory"));
        return Ok(resolved);
    }

    let include_set = build_globset(&config.include_globs)?;
    let mut excludes = vec!["**/.git/**".to_string(), "**/node_modules/**".to_string()];
    excludes.extend(config.exclude_globs.clone());
    let exclude_set = build_globset(&excludes)?;

    let explicit: HashSet<PathBuf> = config.paths.iter().map(|p| path_key(Path::new(p))).collect();

    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(config.follow_symlinks) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_else(|| root_str.to_string());
                resolved.failures.push(load_error(&path, e));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy();

        if exclude_set.is_match(rel_str.as_ref()) || !include_set.is_match(rel_str.as_ref()) {
            continue;
        }
        if explicit.contains(&path_key(path)) {
            continue;
        }
        found.push(path.to_string_lossy().to_string());
    }

    found.sort();
    resolved.paths.extend(found);
    Ok(resolved)
}

/// Comparison key for a filesystem path: canonical when it exists.
fn path_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.components().collect())
}

pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
