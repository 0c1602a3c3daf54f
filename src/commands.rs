use backend_client::Backend;
use session::{Intent, Orchestrator};
use std::str::FromStr;
use threadscope_core::{CoreError, FilterField, ViewState};

pub const HELP: &str = "\
Commands:
  search <question>          search all of Reddit
  asearch <question>         search within the active audience
  comments <n>               show comments of visible post n
  save <n>                   save visible post n
  view posts|comments        switch the displayed collection
  filter score|comments|age [value]
                             set or clear a filter (age in days)
  source <subreddit>         toggle a subreddit in the source filter
  sources reset              clear the source filter
  audiences                  reload the audience list
  use [audience]             select an audience (no name clears it)
  name <text>                name the audience being built
  add <subreddit>            add a subreddit to the audience being built
  remove <subreddit>         remove it again
  create                     create the audience being built
  topics                     fetch topics for the active audience
  topic <label>              show posts for a topic
  show                       redraw the current view
  help                       this text
  quit                       exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    AudienceSearch(String),
    Comments(usize),
    Save(usize),
    View(ViewState),
    Filter(FilterField, String),
    ToggleSource(String),
    ResetSources,
    Audiences,
    Use(Option<String>),
    Name(String),
    Add(String),
    Remove(String),
    Create,
    Topics,
    Topic(String),
    Show,
    Help,
    Quit,
}

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::InvalidInput {
        message: message.into(),
    }
}

fn position(arg: &str) -> Result<usize, CoreError> {
    arg.trim()
        .parse()
        .map_err(|_| invalid(format!("expected a post number, got '{}'", arg.trim())))
}

impl FromStr for Command {
    type Err = CoreError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            // Blank questions are passed through; the orchestrator rejects them.
            "search" => Command::Search(rest.to_string()),
            "asearch" => Command::AudienceSearch(rest.to_string()),
            "comments" => Command::Comments(position(rest)?),
            "save" => Command::Save(position(rest)?),
            "view" => Command::View(rest.parse()?),
            "filter" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Command::Filter(field.parse()?, value.trim().to_string())
            }
            "source" if !rest.is_empty() => Command::ToggleSource(rest.to_string()),
            "sources" if rest == "reset" => Command::ResetSources,
            "audiences" => Command::Audiences,
            "use" => Command::Use((!rest.is_empty()).then(|| rest.to_string())),
            "name" => Command::Name(rest.to_string()),
            "add" => Command::Add(rest.to_string()),
            "remove" => Command::Remove(rest.to_string()),
            "create" => Command::Create,
            "topics" => Command::Topics,
            "topic" if !rest.is_empty() => Command::Topic(rest.to_string()),
            "show" | "" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(invalid(format!("unknown command '{line}', try 'help'"))),
        };
        Ok(command)
    }
}

pub enum Flow {
    Continue,
    Help,
    Quit,
}

/// Applies one command. Backend-bound commands resolve before this returns.
pub async fn run<B: Backend>(orchestrator: &mut Orchestrator<B>, command: Command) -> Flow {
    match command {
        Command::Search(question) => orchestrator.dispatch(Intent::Search { question }).await,
        Command::AudienceSearch(question) => {
            orchestrator
                .dispatch(Intent::SearchAudience { question })
                .await
        }
        Command::Comments(n) => {
            if let Some(post) = orchestrator.visible_post(n) {
                orchestrator
                    .dispatch(Intent::FetchComments {
                        permalink: post.permalink,
                    })
                    .await;
            }
        }
        Command::Save(n) => {
            if let Some(post) = orchestrator.visible_post(n) {
                orchestrator.dispatch(Intent::SavePost { post }).await;
            }
        }
        Command::View(view) => orchestrator.set_view(view),
        Command::Filter(field, value) => orchestrator.set_filter(field, &value),
        Command::ToggleSource(source) => {
            orchestrator.toggle_source(&source);
        }
        Command::ResetSources => orchestrator.reset_sources(),
        Command::Audiences => orchestrator.dispatch(Intent::LoadAudiences).await,
        Command::Use(name) => orchestrator.select_audience(name.as_deref()),
        Command::Name(name) => orchestrator.set_pending_name(&name),
        Command::Add(source) => {
            orchestrator.add_pending_source(&source);
        }
        Command::Remove(source) => {
            orchestrator.remove_pending_source(&source);
        }
        Command::Create => orchestrator.dispatch(Intent::CreateAudience).await,
        Command::Topics => orchestrator.dispatch(Intent::FetchTopics).await,
        Command::Topic(topic) => orchestrator.dispatch(Intent::SelectTopic { topic }).await,
        Command::Show => {}
        Command::Help => return Flow::Help,
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}
