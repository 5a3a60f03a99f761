//! Writing item artifacts to the output directory.

use crate::config::{Config, TitlePolicy};
use crate::error::ItemError;
use crate::types::FetchOutcome;
use crate::utils::{artifact_path, file_stem};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Persists fetch outcomes as files
///
/// Files are created with a fixed mode and truncate whatever already exists
/// under the same name.
#[derive(Clone, Debug)]
pub struct OutputWriter {
    output_dir: PathBuf,
    content_extension: String,
    redirect_extension: String,
    title_policy: TitlePolicy,
    file_mode: u32,
}

impl OutputWriter {
    /// Create a writer for the configured output directory and extensions
    pub fn new(config: &Config) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            content_extension: config.content_extension.clone(),
            redirect_extension: config.redirect_extension.clone(),
            title_policy: config.title_policy,
            file_mode: config.file_mode,
        }
    }

    /// Write the artifact for `outcome`, if it has one
    ///
    /// - `Downloaded` writes the body to `<dir>/<title>.<content ext>`
    /// - `RedirectCaptured` writes the target URL to `<dir>/<title>.<redirect ext>`
    /// - `Error` and `Skipped` write nothing
    ///
    /// Returns the written path.
    pub async fn write(
        &self,
        title: &str,
        outcome: &FetchOutcome,
    ) -> Result<Option<PathBuf>, ItemError> {
        let (extension, contents): (&str, &[u8]) = match outcome {
            FetchOutcome::Downloaded { bytes } => (self.content_extension.as_str(), &bytes[..]),
            FetchOutcome::RedirectCaptured { target } => {
                (self.redirect_extension.as_str(), target.as_str().as_bytes())
            }
            FetchOutcome::Error { .. } | FetchOutcome::Skipped { .. } => {
                debug!("Nothing to write for {}", title);
                return Ok(None);
            }
        };

        let stem = file_stem(title, self.title_policy);
        let path = artifact_path(&self.output_dir, &stem, extension);

        info!("Writing {}", path.display());
        self.write_file(&path, contents)
            .await
            .map_err(|source| ItemError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(Some(path))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(self.file_mode);

        let mut file = options.open(path).await?;
        file.write_all(contents).await?;
        file.flush().await
    }
}
