//! Writing rendered documents to per-peer files.
//!
//! One `<peer_name>.conf` file per peer, in a directory created if
//! absent. There is no transactional rollback: a failure partway
//! through a run can leave earlier files written.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

/// Default directory the generated files land in, relative to the
/// working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output_configs";

/// Writes each `(peer_name, document)` pair to `<dir>/<peer_name>.conf`,
/// creating `dir` first if needed. Returns the written paths in order.
pub fn write_configs(dir: &Path, docs: &[(String, String)]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(docs.len());
    for (name, doc) in docs {
        let path = dir.join(format!("{name}.conf"));
        info!(peer = name.as_str(), path = %path.display(), "writing configuration");
        fs::write(&path, doc)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_file_per_peer() {
        let dir = tempfile::tempdir().expect("tempdir");
        let docs = vec![
            ("alpha".to_string(), "[Interface]\n".to_string()),
            ("beta".to_string(), "[Interface]\n".to_string()),
        ];

        let written = write_configs(dir.path(), &docs).expect("writes");
        assert_eq!(written.len(), 2);
        assert!(dir.path().join("alpha.conf").is_file());
        assert!(dir.path().join("beta.conf").is_file());
    }

    #[test]
    fn file_content_matches_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let docs = vec![("alpha".to_string(), "[Interface]\nListenPort = 1\n".to_string())];

        write_configs(dir.path(), &docs).expect("writes");
        let content = fs::read_to_string(dir.path().join("alpha.conf")).expect("read");
        assert_eq!(content, "[Interface]\nListenPort = 1\n");
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("out").join("configs");
        let docs = vec![("alpha".to_string(), "x\n".to_string())];

        write_configs(&nested, &docs).expect("writes");
        assert!(nested.join("alpha.conf").is_file());
    }

    #[test]
    fn overwrites_existing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let docs_old = vec![("alpha".to_string(), "old\n".to_string())];
        let docs_new = vec![("alpha".to_string(), "new\n".to_string())];

        write_configs(dir.path(), &docs_old).expect("writes");
        write_configs(dir.path(), &docs_new).expect("writes");

        let content = fs::read_to_string(dir.path().join("alpha.conf")).expect("read");
        assert_eq!(content, "new\n");
    }
}
