pub mod audience;
pub mod orchestrator;
pub mod results;
pub mod status;
pub mod topics;


pub use audience::AudienceStore;
pub use orchestrator::{execute, Intent, Orchestrator, Outcome, Request, Response};
pub use results::ResultSet;
pub use status::{Operation, StatusMessage};
pub use topics::TopicIndex;

use threadscope_core::{ContentItem, FilterConfig, FilterField, ValidationError, ViewState};
use tracing::info;

/// Everything the presentation layer reads. Only the orchestrator's
/// resolution handlers and the local edits below mutate it.
#[derive(Debug, Default)]
pub struct Session {
    audiences: AudienceStore,
    results: ResultSet,
    topics: TopicIndex,
    filter: FilterConfig,
    status: Option<StatusMessage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn audiences(&self) -> &AudienceStore {
        &self.audiences
    }

    pub fn audiences_mut(&mut self) -> &mut AudienceStore {
        &mut self.audiences
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut ResultSet {
        &mut self.results
    }

    pub fn topics(&self) -> &TopicIndex {
        &self.topics
    }

    pub fn topics_mut(&mut self) -> &mut TopicIndex {
        &mut self.topics
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn set_filter(&mut self, field: FilterField, text: &str) {
        self.filter.set(field, text);
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, status: Option<StatusMessage>) {
        self.status = status;
    }

    pub fn view(&self) -> ViewState {
        self.results.view()
    }

    pub fn set_view(&mut self, view: ViewState) {
        self.results.set_view(view);
    }

    pub fn visible_posts(&self) -> Vec<&ContentItem> {
        self.results
            .visible_posts(&self.filter, self.results.selected_sources())
    }

    pub fn visible_posts_at(&self, now: f64) -> Vec<&ContentItem> {
        self.results
            .visible_posts_at(&self.filter, self.results.selected_sources(), now)
    }

    /// 1-based lookup into the visible posts.
    pub fn visible_post(&self, position: usize) -> Result<ContentItem, ValidationError> {
        position
            .checked_sub(1)
            .and_then(|i| self.visible_posts().get(i).map(|p| (*p).clone()))
            .ok_or(ValidationError::NoSuchPost { index: position })
    }

    /// Topics and posts are scoped to an audience, so a different selection
    /// discards them. Reselecting the active audience changes nothing.
    pub fn select_audience(&mut self, name: Option<&str>) -> Result<bool, ValidationError> {
        if let Some(name) = name {
            if self.audiences.find(name).is_none() {
                return Err(ValidationError::UnknownAudience {
                    name: name.to_string(),
                });
            }
        }

        let changed = self.audiences.set_active(name.map(str::to_string));
        if changed {
            info!("Active audience is now {:?}", name);
            self.topics.clear();
            self.results.clear_posts();
        }
        Ok(changed)
    }
}
