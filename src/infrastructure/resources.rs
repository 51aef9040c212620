//! Loading of the file-based severity resources.
//!
//! Both files are read once at startup. A missing, unreadable or invalid
//! file is a startup error: the bot cannot classify anything without them.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::application::classifier::SeverityClassifier;
use crate::domain::{MemeCorpus, ThresholdTable};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::severity::SeverityConfig;

fn read_resource(resource: &'static str, path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| {
        ConfigError::Resource {
            resource,
            path: path.display().to_string(),
            source,
        }
        .into()
    })
}

/// Read and validate the threshold table.
///
/// # Errors
///
/// Returns an error if the file is unreadable, empty, unparsable or not
/// ascending.
pub fn load_thresholds(path: impl AsRef<Path>) -> Result<ThresholdTable> {
    let path = path.as_ref();
    let text = read_resource("threshold table", path)?;
    ThresholdTable::parse(&text).map_err(|e| {
        ConfigError::InvalidValue {
            field: "thresholds_path",
            reason: format!("{}: {e}", path.display()),
        }
        .into()
    })
}

/// Read and validate the meme corpus.
///
/// # Errors
///
/// Returns an error if the file is unreadable or has no lines.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<MemeCorpus> {
    let path = path.as_ref();
    let text = read_resource("meme corpus", path)?;
    MemeCorpus::parse(&text).map_err(|e| {
        ConfigError::InvalidValue {
            field: "corpus_path",
            reason: format!("{}: {e}", path.display()),
        }
        .into()
    })
}

/// Load both resources into a classifier.
///
/// # Errors
///
/// Returns the first resource error encountered.
pub fn load_classifier(config: &SeverityConfig) -> Result<SeverityClassifier> {
    let thresholds = load_thresholds(&config.thresholds_path)?;
    let corpus = load_corpus(&config.corpus_path)?;

    info!(
        tiers = thresholds.len(),
        corpus_lines = corpus.len(),
        "Severity resources loaded"
    );

    Ok(SeverityClassifier::new(thresholds, corpus))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_both_resources() {
        let thresholds = temp_file("0\n1000\n1000000\n");
        let corpus = temp_file("a\nb\nc\nd\ne\nf\n");
        let config = SeverityConfig {
            thresholds_path: thresholds.path().display().to_string(),
            corpus_path: corpus.path().display().to_string(),
        };

        let classifier = load_classifier(&config).unwrap();
        assert_eq!(classifier.thresholds().len(), 3);
        assert_eq!(classifier.corpus().len(), 6);
        assert_eq!(classifier.slice_size(), 2);
    }

    #[test]
    fn missing_file_names_the_resource() {
        let result = load_corpus("/definitely/not/here.txt");
        match result {
            Err(Error::Config(ConfigError::Resource { resource, path, .. })) => {
                assert_eq!(resource, "meme corpus");
                assert_eq!(path, "/definitely/not/here.txt");
            }
            other => panic!("expected resource error, got {other:?}"),
        }
    }

    #[test]
    fn empty_threshold_file_fails_fast() {
        let file = temp_file("\n# nothing here\n");
        let result = load_thresholds(file.path());

        match result {
            Err(Error::Config(ConfigError::InvalidValue { field, reason })) => {
                assert_eq!(field, "thresholds_path");
                assert!(reason.contains("cannot be empty"));
            }
            other => panic!("expected invalid thresholds, got {other:?}"),
        }
    }

    #[test]
    fn shipped_resources_are_valid() {
        let root = env!("CARGO_MANIFEST_DIR");
        let config = SeverityConfig {
            thresholds_path: format!("{root}/resources/thresholds.txt"),
            corpus_path: format!("{root}/resources/memes.txt"),
        };

        let classifier = load_classifier(&config).unwrap();
        assert!(classifier.corpus().len() >= classifier.thresholds().len());
    }
}
