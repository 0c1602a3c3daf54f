/// Topic labels derived by the backend for the active audience.
#[derive(Debug, Default)]
pub struct TopicIndex {
    topics: Vec<String>,
    active_topic: Option<String>,
}

impl TopicIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, topics: Vec<String>) {
        self.topics = topics;
    }

    /// Drops the topics and the highlighted topic.
    pub fn clear(&mut self) {
        self.topics.clear();
        self.active_topic = None;
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn set_active(&mut self, topic: &str) {
        self.active_topic = Some(topic.to_string());
    }

    pub fn clear_active(&mut self) {
        self.active_topic = None;
    }

    pub fn active_topic(&self) -> Option<&str> {
        self.active_topic.as_deref()
    }
}
