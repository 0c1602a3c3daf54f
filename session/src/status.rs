/// The backend-facing user intents, used to pick status texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    SearchAudience,
    FetchComments,
    LoadAudiences,
    CreateAudience,
    FetchTopics,
    SelectTopic,
    SavePost,
}

impl Operation {
    pub fn pending_text(&self) -> &'static str {
        match self {
            Operation::Search | Operation::SearchAudience => "Searching...",
            Operation::FetchComments => "Fetching comments...",
            Operation::LoadAudiences => "Loading audiences...",
            Operation::CreateAudience => "Creating audience...",
            Operation::FetchTopics => "Fetching topics...",
            Operation::SelectTopic => "Filtering posts...",
            Operation::SavePost => "Saving post...",
        }
    }

    /// Shown when a request fails and the server sent no error text.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            Operation::Search => "Error fetching posts.",
            Operation::SearchAudience => "Error fetching posts for audience.",
            Operation::FetchComments => "Error fetching comments.",
            Operation::LoadAudiences => "Error fetching audiences.",
            Operation::CreateAudience => "Error creating audience.",
            Operation::FetchTopics => "Error fetching topics.",
            Operation::SelectTopic => "Error filtering posts by topic.",
            Operation::SavePost => "Error saving post.",
        }
    }
}

pub const DEFAULT_SAVE_CONFIRMATION: &str = "Post saved successfully.";
pub const DEFAULT_CREATE_CONFIRMATION: &str = "Audience created.";

/// The single status line. Each operation overwrites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Pending(Operation),
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Pending(operation) => operation.pending_text(),
            StatusMessage::Info(text) | StatusMessage::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Error(_))
    }
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}
