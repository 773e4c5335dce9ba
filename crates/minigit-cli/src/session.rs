//! The multi-repository container for one interactive session.
//!
//! Repositories are independent: each is created, selected and dropped by
//! name, and nothing is shared between them.

use minigit_core::config::RepoConfig;
use minigit_core::Repository;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("repository '{0}' already exists")]
    RepoExists(String),
    #[error("repository '{0}' not found")]
    RepoNotFound(String),
    #[error("no repository selected (run 'repo create <name>' first)")]
    NoActiveRepo,
    #[error("cannot delete the active repository '{0}' (switch first)")]
    DeleteActiveRepo(String),
}

#[derive(Debug)]
struct NamedRepo {
    name: String,
    repo: Repository,
}

/// A repository name and whether it is the selected one.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RepoListEntry {
    pub name: String,
    pub active: bool,
}

/// Named repositories in creation order, plus the active selection.
#[derive(Debug, Default)]
pub struct Session {
    repos: Vec<NamedRepo>,
    active: Option<String>,
    config: RepoConfig,
}

impl Session {
    pub fn new(config: RepoConfig) -> Self {
        Self {
            repos: Vec::new(),
            active: None,
            config,
        }
    }

    /// Create a repository and select it.
    pub fn create(&mut self, name: &str) -> Result<(), SessionError> {
        if self.position(name).is_some() {
            return Err(SessionError::RepoExists(name.to_string()));
        }
        self.repos.push(NamedRepo {
            name: name.to_string(),
            repo: Repository::with_config(self.config.clone()),
        });
        self.active = Some(name.to_string());
        tracing::debug!(repo = %name, "repository created");
        Ok(())
    }

    pub fn switch(&mut self, name: &str) -> Result<(), SessionError> {
        if self.position(name).is_none() {
            return Err(SessionError::RepoNotFound(name.to_string()));
        }
        self.active = Some(name.to_string());
        Ok(())
    }

    /// Drop a repository and all of its history. The active one is refused.
    pub fn delete(&mut self, name: &str) -> Result<(), SessionError> {
        if self.active.as_deref() == Some(name) {
            return Err(SessionError::DeleteActiveRepo(name.to_string()));
        }
        let idx = self
            .position(name)
            .ok_or_else(|| SessionError::RepoNotFound(name.to_string()))?;
        self.repos.remove(idx);
        tracing::debug!(repo = %name, "repository deleted");
        Ok(())
    }

    pub fn list(&self) -> Vec<RepoListEntry> {
        self.repos
            .iter()
            .map(|r| RepoListEntry {
                name: r.name.clone(),
                active: self.active.as_deref() == Some(r.name.as_str()),
            })
            .collect()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_repo(&mut self) -> Result<&mut Repository, SessionError> {
        let name = self.active.as_deref().ok_or(SessionError::NoActiveRepo)?;
        self.repos
            .iter_mut()
            .find(|r| r.name == name)
            .map(|r| &mut r.repo)
            .ok_or(SessionError::NoActiveRepo)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.repos.iter().position(|r| r.name == name)
    }
}
