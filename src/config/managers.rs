//! NSX Manager inventory
//!
//! ```toml
//! [[managers]]
//! site = "dc1"
//! url = "https://nsx-dc1.example.com"
//! user_env = "NSX_DC1_USER"
//! password_env = "NSX_DC1_PASSWORD"
//! tls_skip_verify = false
//! enabled = true
//! ```
//!
//! Credentials never appear in the file; each entry names the environment
//! variables that hold them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Parsed inventory file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagersFile {
    pub managers: Vec<ManagerEntry>,
}

/// One inventory entry before credential resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerEntry {
    /// Site identifier written as the `site` tag
    pub site: String,

    /// Manager base URL
    pub url: String,

    /// Variable holding the username
    pub user_env: String,

    /// Variable holding the password
    pub password_env: String,

    #[serde(default)]
    pub tls_skip_verify: bool,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// A fully resolved manager, immutable after load
#[derive(Clone, PartialEq, Eq)]
pub struct Manager {
    pub site: String,
    pub url: String,
    pub username: String,
    pub password: String,
    pub tls_skip_verify: bool,
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("site", &self.site)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tls_skip_verify", &self.tls_skip_verify)
            .finish()
    }
}

impl ManagersFile {
    /// Load an inventory file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read managers file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse managers file: {}", path.display()))
    }

    /// Resolve credentials of every enabled entry through `lookup`
    ///
    /// # Errors
    ///
    /// Fails on the first enabled entry with a missing credential, on
    /// duplicate sites, and when no entry is enabled.
    pub fn resolve<F>(&self, lookup: F) -> Result<Vec<Manager>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = |site: &str, var: &str| -> Result<String> {
            if var.is_empty() {
                anyhow::bail!("Manager {site}: credential variable name is empty");
            }
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .with_context(|| format!("Manager {site}: env var {var} not set"))
        };

        let mut resolved: Vec<Manager> = Vec::new();
        for entry in self.managers.iter().filter(|m| m.enabled) {
            if entry.site.is_empty() {
                anyhow::bail!("Manager with url {} has no site", entry.url);
            }
            if resolved.iter().any(|m| m.site == entry.site) {
                anyhow::bail!("Duplicate manager site: {}", entry.site);
            }

            resolved.push(Manager {
                site: entry.site.clone(),
                url: entry.url.clone(),
                username: credential(&entry.site, &entry.user_env)?,
                password: credential(&entry.site, &entry.password_env)?,
                tls_skip_verify: entry.tls_skip_verify,
            });
        }

        if resolved.is_empty() {
            anyhow::bail!("No enabled managers found");
        }

        Ok(resolved)
    }
}

/// Load the inventory and resolve credentials from the process environment
pub fn load_managers(path: &Path) -> Result<Vec<Manager>> {
    ManagersFile::from_file(path)?
        .resolve(|var| std::env::var(var).ok())
        .with_context(|| format!("Invalid managers file: {}", path.display()))
}
