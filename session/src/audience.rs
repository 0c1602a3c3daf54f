use threadscope_core::{Audience, ValidationError};
use tracing::debug;

/// Audiences known to the backend plus the one being assembled.
#[derive(Debug, Default)]
pub struct AudienceStore {
    audiences: Vec<Audience>,
    pending_name: String,
    pending_sources: Vec<String>,
    active: Option<String>,
}

impl AudienceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the trimmed name is blank or already pending.
    pub fn add_pending_source(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.pending_sources.iter().any(|s| s == name) {
            return false;
        }
        self.pending_sources.push(name.to_string());
        true
    }

    pub fn remove_pending_source(&mut self, name: &str) -> bool {
        let name = name.trim();
        let before = self.pending_sources.len();
        self.pending_sources.retain(|s| s != name);
        before != self.pending_sources.len()
    }

    pub fn set_pending_name(&mut self, name: &str) {
        self.pending_name = name.to_string();
    }

    pub fn pending_name(&self) -> &str {
        &self.pending_name
    }

    pub fn pending_sources(&self) -> &[String] {
        &self.pending_sources
    }

    /// Validates the pending name and sources without touching them.
    pub fn pending_audience(&self) -> Result<Audience, ValidationError> {
        let name = self.pending_name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.pending_sources.is_empty() {
            return Err(ValidationError::NoSources);
        }
        Ok(Audience {
            name: name.to_string(),
            sources: self.pending_sources.clone(),
        })
    }

    pub fn clear_pending(&mut self) {
        self.pending_name.clear();
        self.pending_sources.clear();
    }

    /// Replaces the list with what the backend last reported.
    pub fn replace_audiences(&mut self, audiences: Vec<Audience>) {
        debug!("Audience list replaced with {} entries", audiences.len());
        self.audiences = audiences;
    }

    pub fn audiences(&self) -> &[Audience] {
        &self.audiences
    }

    pub fn find(&self, name: &str) -> Option<&Audience> {
        self.audiences.iter().find(|a| a.name == name)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Returns true when the active audience actually changed.
    pub(crate) fn set_active(&mut self, name: Option<String>) -> bool {
        if self.active == name {
            return false;
        }
        self.active = name;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_pending_source_trims_and_dedups() {
        let mut store = AudienceStore::new();
        assert!(store.add_pending_source("  rust "));
        assert!(!store.add_pending_source("rust"));
        assert!(!store.add_pending_source("   "));
        assert!(store.add_pending_source("golang"));

        assert_eq!(store.pending_sources(), ["rust", "golang"]);
    }

    #[test]
    fn test_remove_pending_source() {
        let mut store = AudienceStore::new();
        store.add_pending_source("rust");
        store.add_pending_source("golang");

        assert!(store.remove_pending_source("rust"));
        assert!(!store.remove_pending_source("python"));
        assert_eq!(store.pending_sources(), ["golang"]);
    }

    #[test]
    fn test_pending_audience_validation() {
        let mut store = AudienceStore::new();
        store.add_pending_source("rust");
        store.set_pending_name("   ");
        assert_eq!(store.pending_audience(), Err(ValidationError::EmptyName));

        let mut store = AudienceStore::new();
        store.set_pending_name("X");
        assert_eq!(store.pending_audience(), Err(ValidationError::NoSources));

        store.add_pending_source("programming");
        store.add_pending_source("golang");
        store.set_pending_name(" Devs ");
        let audience = store.pending_audience().unwrap();
        assert_eq!(audience.name, "Devs");
        assert_eq!(audience.sources, ["programming", "golang"]);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut store = AudienceStore::new();
        store.replace_audiences(vec![Audience {
            name: "Devs".to_string(),
            sources: vec!["rust".to_string()],
        }]);

        assert!(store.find("Devs").is_some());
        assert!(store.find("devs").is_none());
    }

    #[test]
    fn test_set_active_reports_change() {
        let mut store = AudienceStore::new();
        assert!(store.set_active(Some("Devs".to_string())));
        assert!(!store.set_active(Some("Devs".to_string())));
        assert!(store.set_active(None));
        assert_eq!(store.active(), None);
    }
}
