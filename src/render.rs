use session::Session;
use std::fmt::Write;
use threadscope_core::{FilterField, ViewState};

/// Plain-text rendering of the session, status line first.
pub fn render(session: &Session) -> String {
    let mut out = String::new();

    if let Some(status) = session.status() {
        let marker = if status.is_error() { '!' } else { '>' };
        let _ = writeln!(out, "{marker} {status}");
    }

    render_context(session, &mut out);

    match session.view() {
        ViewState::Posts => render_posts(session, &mut out),
        ViewState::Comments => render_comments(session, &mut out),
    }

    out
}

fn render_context(session: &Session, out: &mut String) {
    let audiences = session.audiences();
    if let Some(active) = audiences.active() {
        let _ = writeln!(out, "Audience: {active}");
    }

    let topics = session.topics();
    if !topics.topics().is_empty() {
        let labels: Vec<String> = topics
            .topics()
            .iter()
            .map(|t| {
                if topics.active_topic() == Some(t.as_str()) {
                    format!("[{t}]")
                } else {
                    t.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "Topics: {}", labels.join(", "));
    }

    let filter = session.filter();
    let active_filters: Vec<String> = [
        (FilterField::MinScore, "score >="),
        (FilterField::MinComments, "comments >="),
        (FilterField::MaxAgeDays, "age <= days"),
    ]
    .iter()
    .filter_map(|(field, label)| {
        filter
            .get(*field)
            .value()
            .map(|value| format!("{label} {value}"))
    })
    .collect();
    if !active_filters.is_empty() {
        let _ = writeln!(out, "Filters: {}", active_filters.join(", "));
    }

    let results = session.results();
    if !results.available_sources().is_empty() {
        let sources: Vec<String> = results
            .available_sources()
            .iter()
            .map(|s| {
                if results.selected_sources().contains(s) {
                    format!("*{s}")
                } else {
                    s.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "Subreddits: {}", sources.join(" "));
    }

    if !audiences.pending_name().is_empty() || !audiences.pending_sources().is_empty() {
        let _ = writeln!(
            out,
            "New audience: '{}' [{}]",
            audiences.pending_name(),
            audiences.pending_sources().join(", ")
        );
    }
}

fn render_posts(session: &Session, out: &mut String) {
    let visible = session.visible_posts();
    if visible.is_empty() {
        out.push_str("No posts to show.\n");
        return;
    }

    for (i, post) in visible.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, post.title);
        let _ = writeln!(
            out,
            "     r/{} | {} upvotes | {} comments | {}",
            post.subreddit,
            post.score,
            post.num_comments,
            post.full_link()
        );
    }

    let hidden = session.results().posts().len() - visible.len();
    if hidden > 0 {
        let _ = writeln!(out, "({hidden} hidden by filters)");
    }
}

fn render_comments(session: &Session, out: &mut String) {
    let comments = session.results().comments();
    if comments.is_empty() {
        out.push_str("No comments available.\n");
        return;
    }

    for comment in comments {
        let _ = writeln!(out, "{} ({} points)", comment.author, comment.score);
        for line in comment.body.lines() {
            let _ = writeln!(out, "    {line}");
        }
    }
}

/// The known audiences, active one marked.
pub fn render_audiences(session: &Session) -> String {
    let audiences = session.audiences();
    if audiences.audiences().is_empty() {
        return "No audiences yet. Build one with 'name', 'add' and 'create'.\n".to_string();
    }

    let mut out = String::new();
    for audience in audiences.audiences() {
        let marker = if audiences.active() == Some(audience.name.as_str()) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{marker} {} ({})",
            audience.name,
            audience.sources.join(", ")
        );
    }
    out
}
