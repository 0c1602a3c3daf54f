//! Turns user intents into backend requests and applies their outcomes.
//!
//! An intent goes through [`Orchestrator::prepare`], which validates it and
//! marks the status as pending, then [`execute`] against a [`Backend`], then
//! [`Orchestrator::apply`], the only place a response changes the session.
//! Outcomes are applied in whatever order they arrive; the last one wins.

use crate::status::{
    Operation, StatusMessage, DEFAULT_CREATE_CONFIRMATION, DEFAULT_SAVE_CONFIRMATION,
};
use crate::Session;
use backend_client::{Backend, SearchResponse};
use threadscope_core::{
    Audience, Comment, ContentItem, CoreError, ErrorExt, ErrorReporter, FilterField,
    ValidationError, ViewState,
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Search { question: String },
    SearchAudience { question: String },
    FetchComments { permalink: String },
    LoadAudiences,
    CreateAudience,
    FetchTopics,
    SelectTopic { topic: String },
    SavePost { post: ContentItem },
}

/// A validated intent with everything the backend call needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Search { question: String },
    SearchAudience { question: String, audience: String },
    FetchComments { permalink: String },
    LoadAudiences,
    CreateAudience { audience: Audience },
    FetchTopics { audience: String },
    SelectTopic { topic: String, audience: String },
    SavePost { post: ContentItem },
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::Search { .. } => Operation::Search,
            Request::SearchAudience { .. } => Operation::SearchAudience,
            Request::FetchComments { .. } => Operation::FetchComments,
            Request::LoadAudiences => Operation::LoadAudiences,
            Request::CreateAudience { .. } => Operation::CreateAudience,
            Request::FetchTopics { .. } => Operation::FetchTopics,
            Request::SelectTopic { .. } => Operation::SelectTopic,
            Request::SavePost { .. } => Operation::SavePost,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Response {
    Search(SearchResponse),
    AudiencePosts {
        audience: String,
        posts: Vec<ContentItem>,
    },
    Comments {
        permalink: String,
        comments: Vec<Comment>,
    },
    Audiences(Vec<Audience>),
    AudienceCreated(Option<String>),
    Topics {
        audience: String,
        topics: Vec<String>,
    },
    TopicPosts {
        topic: String,
        audience: String,
        posts: Vec<ContentItem>,
    },
    Saved(Option<String>),
}

#[derive(Debug)]
pub struct Outcome {
    pub operation: Operation,
    pub result: Result<Response, CoreError>,
}

/// Issues exactly one backend call for the request.
pub async fn execute<B: Backend>(backend: &B, request: Request) -> Outcome {
    let operation = request.operation();
    debug!("Executing {:?}", operation);

    let result = match request {
        Request::Search { question } => backend.search(&question).await.map(Response::Search),
        Request::SearchAudience { question, audience } => backend
            .search_audience(&question, &audience)
            .await
            .map(|posts| Response::AudiencePosts { audience, posts }),
        Request::FetchComments { permalink } => backend
            .fetch_comments(&permalink)
            .await
            .map(|comments| Response::Comments {
                permalink,
                comments,
            }),
        Request::LoadAudiences => backend.list_audiences().await.map(Response::Audiences),
        Request::CreateAudience { audience } => backend
            .create_audience(&audience.name, &audience.sources)
            .await
            .map(Response::AudienceCreated),
        Request::FetchTopics { audience } => backend
            .get_topics(&audience)
            .await
            .map(|topics| Response::Topics { audience, topics }),
        Request::SelectTopic { topic, audience } => backend
            .filter_posts(&topic, &audience)
            .await
            .map(|posts| Response::TopicPosts {
                topic,
                audience,
                posts,
            }),
        Request::SavePost { post } => backend.save_post(&post).await.map(Response::Saved),
    };

    Outcome { operation, result }
}

pub struct Orchestrator<B> {
    backend: B,
    session: Session,
    reporter: ErrorReporter,
}

impl<B: Backend> Orchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self::with_session(backend, Session::new())
    }

    pub fn with_session(backend: B, session: Session) -> Self {
        Self {
            backend,
            session,
            reporter: ErrorReporter::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs an intent to completion, including any follow-up request.
    pub async fn dispatch(&mut self, intent: Intent) {
        let mut next = self.prepare(intent);
        while let Some(request) = next {
            let outcome = execute(&self.backend, request).await;
            next = self.apply(outcome);
        }
    }

    /// Validates the intent. On failure the status shows why and `None` is
    /// returned; otherwise the status goes pending and the request is returned.
    pub fn prepare(&mut self, intent: Intent) -> Option<Request> {
        match self.build_request(intent) {
            Ok(request) => {
                debug!("Intent accepted as {:?}", request.operation());
                self.session
                    .set_status(Some(StatusMessage::Pending(request.operation())));
                Some(request)
            }
            Err(error) => {
                self.reject(error);
                None
            }
        }
    }

    fn build_request(&self, intent: Intent) -> Result<Request, ValidationError> {
        let request = match intent {
            Intent::Search { question } => {
                require_question(&question)?;
                Request::Search { question }
            }
            Intent::SearchAudience { question } => {
                require_question(&question)?;
                Request::SearchAudience {
                    question,
                    audience: self.active_audience()?,
                }
            }
            Intent::FetchComments { permalink } => Request::FetchComments { permalink },
            Intent::LoadAudiences => Request::LoadAudiences,
            Intent::CreateAudience => Request::CreateAudience {
                audience: self.session.audiences().pending_audience()?,
            },
            Intent::FetchTopics => Request::FetchTopics {
                audience: self.active_audience()?,
            },
            Intent::SelectTopic { topic } => Request::SelectTopic {
                topic,
                audience: self.active_audience()?,
            },
            Intent::SavePost { post } => Request::SavePost { post },
        };
        Ok(request)
    }

    fn active_audience(&self) -> Result<String, ValidationError> {
        self.session
            .audiences()
            .active()
            .map(str::to_string)
            .ok_or(ValidationError::NoAudienceSelected)
    }

    fn reject(&mut self, error: ValidationError) {
        let error = CoreError::from(error);
        self.reporter.report_warning(&error);
        self.session
            .set_status(Some(StatusMessage::Error(error.user_friendly_message())));
    }

    /// The single update function. Returns a follow-up request when the
    /// outcome calls for one.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Request> {
        let Outcome { operation, result } = outcome;
        match result {
            Ok(response) => self.apply_response(operation, response),
            Err(error) => {
                self.reporter.report_error(&error);
                let text = error
                    .server_message()
                    .unwrap_or_else(|| operation.fallback_text())
                    .to_string();
                self.session.set_status(Some(StatusMessage::Error(text)));
                None
            }
        }
    }

    fn apply_response(&mut self, operation: Operation, response: Response) -> Option<Request> {
        match response {
            Response::Search(SearchResponse { posts, subreddits }) => {
                info!("Showing {} posts", posts.len());
                let session = &mut self.session;
                session.results_mut().set_posts(posts);
                session.results_mut().replace_sources(subreddits);
                session.topics_mut().clear_active();
                session.set_status(None);
            }
            Response::AudiencePosts { audience, posts } => {
                if self.is_stale(operation, &audience) {
                    return None;
                }
                self.session.results_mut().set_posts(posts);
                self.session.topics_mut().clear();
                self.session.set_status(None);
            }
            Response::Comments {
                permalink,
                comments,
            } => {
                self.session.results_mut().set_comments(comments, &permalink);
                self.session.set_status(None);
            }
            Response::Audiences(audiences) => {
                self.session.audiences_mut().replace_audiences(audiences);
                if self.session.status() == Some(&StatusMessage::Pending(operation)) {
                    self.session.set_status(None);
                }
            }
            Response::AudienceCreated(message) => {
                self.session.audiences_mut().clear_pending();
                let text = message.unwrap_or_else(|| DEFAULT_CREATE_CONFIRMATION.to_string());
                self.session.set_status(Some(StatusMessage::Info(text)));
                return Some(Request::LoadAudiences);
            }
            Response::Topics { audience, topics } => {
                if self.is_stale(operation, &audience) {
                    return None;
                }
                self.session.topics_mut().replace(topics);
                self.session.set_status(None);
            }
            Response::TopicPosts {
                topic,
                audience,
                posts,
            } => {
                if self.is_stale(operation, &audience) {
                    return None;
                }
                self.session.results_mut().set_posts(posts);
                self.session.topics_mut().set_active(&topic);
                self.session.set_status(None);
            }
            Response::Saved(message) => {
                let text = message.unwrap_or_else(|| DEFAULT_SAVE_CONFIRMATION.to_string());
                self.session.set_status(Some(StatusMessage::Info(text)));
            }
        }
        None
    }

    /// Audience-scoped data must never land under a different audience.
    fn is_stale(&mut self, operation: Operation, audience: &str) -> bool {
        if self.session.audiences().active() == Some(audience) {
            return false;
        }
        warn!(
            "Discarding {:?} result for '{}', no longer the active audience",
            operation, audience
        );
        if self.session.status() == Some(&StatusMessage::Pending(operation)) {
            self.session.set_status(None);
        }
        true
    }

    pub fn select_audience(&mut self, name: Option<&str>) {
        if let Err(error) = self.session.select_audience(name) {
            self.reject(error);
        }
    }

    pub fn set_view(&mut self, view: ViewState) {
        self.session.set_view(view);
    }

    pub fn set_filter(&mut self, field: FilterField, text: &str) {
        self.session.set_filter(field, text);
    }

    pub fn toggle_source(&mut self, source: &str) -> bool {
        self.session.results_mut().toggle_source(source)
    }

    pub fn reset_sources(&mut self) {
        self.session.results_mut().reset_sources();
    }

    pub fn set_pending_name(&mut self, name: &str) {
        self.session.audiences_mut().set_pending_name(name);
    }

    pub fn add_pending_source(&mut self, name: &str) -> bool {
        self.session.audiences_mut().add_pending_source(name)
    }

    pub fn remove_pending_source(&mut self, name: &str) -> bool {
        self.session.audiences_mut().remove_pending_source(name)
    }

    /// Looks up a visible post by 1-based position, reporting a bad position
    /// on the status line.
    pub fn visible_post(&mut self, position: usize) -> Option<ContentItem> {
        match self.session.visible_post(position) {
            Ok(post) => Some(post),
            Err(error) => {
                self.reject(error);
                None
            }
        }
    }
}

fn require_question(question: &str) -> Result<(), ValidationError> {
    if question.trim().is_empty() {
        return Err(ValidationError::EmptyQuestion);
    }
    Ok(())
}
