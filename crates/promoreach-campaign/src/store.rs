//! Local storage for campaign drafts.

use crate::{CampaignDraft, CampaignId, CampaignStatus};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading or writing campaigns.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create a directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to delete a file.
    #[error("Failed to delete file '{path}': {source}")]
    DeleteFile {
        /// The path that could not be deleted.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse a campaign file.
    #[error("Failed to parse campaign file '{path}': {source}")]
    ParseJson {
        /// The path that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Failed to serialize a campaign.
    #[error("Failed to serialize campaign: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// No campaign with this id exists.
    #[error("Campaign not found: {0}")]
    CampaignNotFound(CampaignId),

    /// Failed to read a directory.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Stores campaign drafts as JSON files under `<base>/campaigns/`.
#[derive(Debug, Clone)]
pub struct CampaignStore {
    base_path: PathBuf,
    campaigns_path: PathBuf,
}

impl CampaignStore {
    /// Opens a store rooted at `base_path`, creating directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn new(base_path: PathBuf) -> Result<Self> {
        let campaigns_path = base_path.join("campaigns");

        for path in [&base_path, &campaigns_path] {
            if !path.exists() {
                fs::create_dir_all(path).map_err(|e| StoreError::CreateDir {
                    path: path.clone(),
                    source: e,
                })?;
            }
        }

        Ok(Self {
            base_path,
            campaigns_path,
        })
    }

    /// Returns the default data directory.
    ///
    /// - Linux: `~/.local/share/promoreach/`
    /// - macOS: `~/Library/Application Support/promoreach/`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\promoreach\`
    ///
    /// Falls back to `~/.promoreach/`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "promoreach").map_or_else(dirs_fallback, |proj_dirs| {
            proj_dirs.data_dir().to_path_buf()
        })
    }

    /// Opens a store at the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn with_default_path() -> Result<Self> {
        Self::new(Self::default_path())
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the path of a campaign's file.
    #[must_use]
    pub fn campaign_path(&self, id: CampaignId) -> PathBuf {
        self.campaigns_path.join(format!("{id}.json"))
    }

    /// Writes a campaign, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns an error if the campaign cannot be serialized or written.
    pub fn save(&self, draft: &CampaignDraft) -> Result<()> {
        let path = self.campaign_path(draft.id);
        let json = serde_json::to_string_pretty(draft)?;

        fs::write(&path, json).map_err(|e| StoreError::WriteFile { path, source: e })
    }

    /// Loads a campaign by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CampaignNotFound`] if no file exists, or an
    /// error if it cannot be read or parsed.
    pub fn load(&self, id: CampaignId) -> Result<CampaignDraft> {
        let path = self.campaign_path(id);

        if !path.exists() {
            return Err(StoreError::CampaignNotFound(id));
        }

        let content = fs::read_to_string(&path).map_err(|e| StoreError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| StoreError::ParseJson { path, source: e })
    }

    /// Lists all campaigns, newest first.
    ///
    /// Files that fail to parse are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the campaigns directory cannot be read.
    pub fn list(&self) -> Result<Vec<CampaignDraft>> {
        let entries = fs::read_dir(&self.campaigns_path).map_err(|e| StoreError::ReadDir {
            path: self.campaigns_path.clone(),
            source: e,
        })?;

        let mut drafts = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| StoreError::ReadDir {
                path: self.campaigns_path.clone(),
                source: e,
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let content = fs::read_to_string(&path).map_err(|e| StoreError::ReadFile {
                    path: path.clone(),
                    source: e,
                })?;

                match serde_json::from_str::<CampaignDraft>(&content) {
                    Ok(draft) => drafts.push(draft),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping unreadable campaign file");
                    }
                }
            }
        }

        drafts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(drafts)
    }

    /// Lists campaigns with the given status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if campaigns cannot be listed.
    pub fn by_status(&self, status: CampaignStatus) -> Result<Vec<CampaignDraft>> {
        let drafts = self.list()?;
        Ok(drafts.into_iter().filter(|d| d.status == status).collect())
    }

    /// Deletes a campaign.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CampaignNotFound`] if no file exists, or an
    /// error if it cannot be removed.
    pub fn delete(&self, id: CampaignId) -> Result<()> {
        let path = self.campaign_path(id);

        if !path.exists() {
            return Err(StoreError::CampaignNotFound(id));
        }

        fs::remove_file(&path).map_err(|e| StoreError::DeleteFile { path, source: e })
    }
}

fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".promoreach")
}
