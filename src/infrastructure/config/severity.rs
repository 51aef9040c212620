//! Severity resource locations.

use serde::Deserialize;

/// Paths to the threshold table and meme corpus.
///
/// Relative paths resolve against the working directory.
#[derive(Debug, Clone, Deserialize)]
pub struct SeverityConfig {
    /// One numeric threshold per line, ascending.
    #[serde(default = "default_thresholds_path")]
    pub thresholds_path: String,
    /// One flavor line per entry.
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,
}

fn default_thresholds_path() -> String {
    "resources/thresholds.txt".into()
}

fn default_corpus_path() -> String {
    "resources/memes.txt".into()
}

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            thresholds_path: default_thresholds_path(),
            corpus_path: default_corpus_path(),
        }
    }
}
