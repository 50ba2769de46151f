//! Session configuration model.
//!
//! [`ConfigFile`] is the persisted JSON document; [`SessionContext`] is the
//! immutable value built from it once per invocation and handed to every
//! repository, requirement, and command.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StratusError};
use crate::types::TargetFields;

/// Persisted session configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Base URL of the control plane API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    /// OAuth bearer token of the logged-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Name of the logged-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Currently targeted organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<TargetFields>,
    /// Currently targeted space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<TargetFields>,
}

impl ConfigFile {
    /// Loads the configuration from `path`.
    ///
    /// A missing file is not an error: it yields an empty, logged-out
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using empty session");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| StratusError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        match self.api_endpoint.as_deref() {
            Some(endpoint) if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") => {
                Err(StratusError::Config {
                    message: format!("API endpoint '{endpoint}' must be an http(s) URL"),
                })
            }
            _ => Ok(()),
        }
    }

    /// Persists the configuration to `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StratusError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| StratusError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        std::fs::rename(&tmp, path).map_err(|e| StratusError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Freezes this configuration into a session context.
    #[must_use]
    pub fn into_session(self) -> SessionContext {
        SessionContext {
            api_endpoint: self
                .api_endpoint
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or_default(),
            access_token: self.access_token,
            username: self.username,
            organization: self.organization,
            space: self.space,
        }
    }
}

/// Read-only session state for a single command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    api_endpoint: String,
    access_token: Option<String>,
    username: Option<String>,
    organization: Option<TargetFields>,
    space: Option<TargetFields>,
}

impl SessionContext {
    /// Creates a logged-out session against `api_endpoint`.
    #[must_use]
    pub fn new(api_endpoint: impl Into<String>) -> Self {
        let endpoint: String = api_endpoint.into();
        Self {
            api_endpoint: endpoint.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the targeted organization.
    #[must_use]
    pub fn with_organization(mut self, org: TargetFields) -> Self {
        self.organization = Some(org);
        self
    }

    /// Sets the targeted space.
    #[must_use]
    pub fn with_space(mut self, space: TargetFields) -> Self {
        self.space = Some(space);
        self
    }

    /// Base URL of the API, without a trailing slash.
    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    /// Bearer token, if logged in.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Name of the current user, or an empty string when unknown.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    /// Targeted organization, if any.
    pub const fn organization(&self) -> Option<&TargetFields> {
        self.organization.as_ref()
    }

    /// Targeted space, if any.
    pub const fn space(&self) -> Option<&TargetFields> {
        self.space.as_ref()
    }

    /// Whether an endpoint and an access token are both present.
    pub fn is_logged_in(&self) -> bool {
        !self.api_endpoint.is_empty() && self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}
