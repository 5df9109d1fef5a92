//! Rule-based intent classifier.
//!
//! Maps one free-text message to a tool request plus extracted parameters,
//! or to a clarification prompt. Classification is an ordered rule table:
//! each rule pairs a keyword set with a builder, rules are evaluated
//! top-to-bottom, and the first rule whose keywords appear in the
//! lowercased message wins. The order (add > list > complete > delete >
//! update) is part of the contract, not an accident of control flow.
//!
//! Keyword matching is literal substring containment -- no stemming, no
//! synonym expansion.

use std::sync::LazyLock;

use regex::Regex;
use taskdeck_types::agent::{Intent, ListFilter, ToolRequest};
use taskdeck_types::task::TaskId;

/// Canonical 36-character hyphenated hex identifier (8-4-4-4-12 groups).
static TASK_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}").unwrap()
});

/// First double- or single-quoted substring.
static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"|'([^']+)'"#).unwrap());

/// First clause up to a sentence terminator.
static CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.!?]+").unwrap());

/// New-title patterns for update, in priority order.
static RENAME_AS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"as "(.*?)""#).unwrap());
static RENAME_TO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"to "(.*?)""#).unwrap());
static ANY_QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""(.*?)""#).unwrap());

const ADD_KEYWORDS: &[&str] = &["add", "create", "new", "remember", "remind"];
const LIST_KEYWORDS: &[&str] = &["list", "show", "see", "view", "my tasks", "what"];
const COMPLETE_KEYWORDS: &[&str] = &["complete", "done", "finish", "finished", "mark done"];
const DELETE_KEYWORDS: &[&str] = &["delete", "remove", "kill", "erase"];
const UPDATE_KEYWORDS: &[&str] = &["update", "change", "modify", "edit"];

const COMPLETE_PROMPT: &str =
    "Which task would you like to mark as completed? Please provide the task ID or more details.";
const DELETE_PROMPT: &str =
    "Which task would you like to delete? Please provide the task ID or more details.";
const UPDATE_PROMPT: &str =
    "Which task would you like to update? Please provide the task ID or more details.";
const HELP_PROMPT: &str =
    "I'm not sure what you'd like to do. You can ask me to add, list, complete, update, or delete tasks.";

/// One classification rule: a keyword set and the intent builder that runs
/// when any keyword is present.
struct Rule {
    keywords: &'static [&'static str],
    build: fn(&str) -> Intent,
}

/// The rule table. Evaluated top-to-bottom, first match wins; a message
/// matching several keyword sets resolves to the earliest rule.
const RULES: &[Rule] = &[
    Rule { keywords: ADD_KEYWORDS, build: add_intent },
    Rule { keywords: LIST_KEYWORDS, build: list_intent },
    Rule { keywords: COMPLETE_KEYWORDS, build: complete_intent },
    Rule { keywords: DELETE_KEYWORDS, build: delete_intent },
    Rule { keywords: UPDATE_KEYWORDS, build: update_intent },
];

/// Classify one message into an intent.
///
/// Keyword containment is tested against the lowercased message; parameter
/// extraction runs against the original text so quoted titles keep their
/// casing.
pub fn classify(message: &str) -> Intent {
    let lowered = message.to_lowercase();
    for rule in RULES {
        if rule.keywords.iter().any(|kw| lowered.contains(kw)) {
            return (rule.build)(message);
        }
    }
    Intent::Clarify(HELP_PROMPT.to_string())
}

/// Extract the first task identifier appearing anywhere in the message.
pub fn extract_task_id(message: &str) -> Option<TaskId> {
    let found = TASK_ID_RE.find(message)?;
    found.as_str().parse().ok()
}

fn add_intent(message: &str) -> Intent {
    Intent::Invoke(ToolRequest::AddTask {
        title: extract_title(message),
        description: Some(message.to_string()),
    })
}

/// Title for a new task: prefer the first quoted substring, else the first
/// sentence-like clause; cut at the first ". " split; fall back to a
/// literal placeholder when nothing usable remains.
fn extract_title(message: &str) -> String {
    let candidate = match QUOTED_RE.captures(message) {
        Some(caps) => caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or(""),
        None => CLAUSE_RE
            .find(message)
            .map(|m| m.as_str())
            .unwrap_or(""),
    };

    let candidate = match candidate.split_once(". ") {
        Some((first, _)) => first,
        None => candidate,
    };

    let title = candidate.trim();
    if title.is_empty() {
        "New task".to_string()
    } else {
        title.to_string()
    }
}

fn list_intent(message: &str) -> Intent {
    let lowered = message.to_lowercase();
    // Pending is checked first, so a message naming both filters lists
    // pending tasks.
    let status = if lowered.contains("pending") || lowered.contains("incomplete") {
        ListFilter::Pending
    } else if lowered.contains("done") || lowered.contains("completed") {
        ListFilter::Completed
    } else {
        ListFilter::All
    };

    Intent::Invoke(ToolRequest::ListTasks { status })
}

fn complete_intent(message: &str) -> Intent {
    match extract_task_id(message) {
        Some(task_id) => Intent::Invoke(ToolRequest::CompleteTask { task_id }),
        None => Intent::Clarify(COMPLETE_PROMPT.to_string()),
    }
}

fn delete_intent(message: &str) -> Intent {
    match extract_task_id(message) {
        Some(task_id) => Intent::Invoke(ToolRequest::DeleteTask { task_id }),
        None => Intent::Clarify(DELETE_PROMPT.to_string()),
    }
}

fn update_intent(message: &str) -> Intent {
    let Some(task_id) = extract_task_id(message) else {
        return Intent::Clarify(UPDATE_PROMPT.to_string());
    };

    Intent::Invoke(ToolRequest::UpdateTask {
        task_id,
        title: extract_new_title(message),
        description: None,
    })
}

/// New title for an update, by pattern priority: text following `as "…"`,
/// else `to "…"`, else any double-quoted substring. Absent all three the
/// title stays unset and the dispatcher reports the missing fields.
fn extract_new_title(message: &str) -> Option<String> {
    for re in [&*RENAME_AS_RE, &*RENAME_TO_RE, &*ANY_QUOTED_RE] {
        if let Some(caps) = re.captures(message) {
            return caps.get(1).map(|m| m.as_str().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoke(message: &str) -> ToolRequest {
        match classify(message) {
            Intent::Invoke(request) => request,
            Intent::Clarify(prompt) => panic!("expected invoke, got clarify: {prompt}"),
        }
    }

    fn clarify(message: &str) -> String {
        match classify(message) {
            Intent::Clarify(prompt) => prompt,
            Intent::Invoke(request) => panic!("expected clarify, got {request:?}"),
        }
    }

    const ID: &str = "0198c5f2-1234-7abc-8def-0123456789ab";

    #[test]
    fn add_with_quoted_title() {
        let request = invoke(r#"Add a task to "buy milk""#);
        match request {
            ToolRequest::AddTask { title, description } => {
                assert_eq!(title, "buy milk");
                assert_eq!(description.as_deref(), Some(r#"Add a task to "buy milk""#));
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn add_with_single_quoted_title() {
        let request = invoke("Create a task called 'walk the dog' please");
        match request {
            ToolRequest::AddTask { title, .. } => assert_eq!(title, "walk the dog"),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn add_without_quotes_takes_first_clause() {
        let request = invoke("Remember to water the plants. They are thirsty!");
        match request {
            ToolRequest::AddTask { title, .. } => {
                assert_eq!(title, "Remember to water the plants");
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn add_title_falls_back_when_extraction_is_empty() {
        // Quoted content that reduces to nothing after the ". " cut.
        let request = invoke(r#"add " . later""#);
        match request {
            ToolRequest::AddTask { title, .. } => assert_eq!(title, "New task"),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn add_quoted_title_with_inner_sentence_split_is_cut() {
        let request = invoke(r#"add "first part. second part""#);
        match request {
            ToolRequest::AddTask { title, .. } => assert_eq!(title, "first part"),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn list_defaults_to_all() {
        let request = invoke("show my tasks");
        assert_eq!(
            request,
            ToolRequest::ListTasks { status: ListFilter::All }
        );
    }

    #[test]
    fn list_pending_keyword() {
        let request = invoke("list my pending tasks");
        assert_eq!(
            request,
            ToolRequest::ListTasks { status: ListFilter::Pending }
        );
    }

    #[test]
    fn list_incomplete_keyword_means_pending() {
        let request = invoke("show incomplete tasks");
        assert_eq!(
            request,
            ToolRequest::ListTasks { status: ListFilter::Pending }
        );
    }

    #[test]
    fn list_completed_keyword() {
        let request = invoke("view completed tasks");
        assert_eq!(
            request,
            ToolRequest::ListTasks { status: ListFilter::Completed }
        );
    }

    #[test]
    fn list_with_both_status_keywords_prefers_pending() {
        let request = invoke("show pending and completed tasks");
        assert_eq!(
            request,
            ToolRequest::ListTasks { status: ListFilter::Pending }
        );
    }

    #[test]
    fn complete_with_id_extracts_exact_id() {
        let request = invoke(&format!("please mark {ID} as finished"));
        match request {
            ToolRequest::CompleteTask { task_id } => {
                assert_eq!(task_id.to_string(), ID);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn complete_id_match_is_case_insensitive() {
        let upper = ID.to_uppercase();
        let request = invoke(&format!("finish {upper}"));
        match request {
            ToolRequest::CompleteTask { task_id } => {
                assert_eq!(task_id.to_string(), ID);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn complete_without_id_asks_for_clarification() {
        let prompt = clarify("mark done");
        assert!(prompt.contains("mark as completed"));
    }

    #[test]
    fn delete_without_id_asks_for_clarification() {
        let prompt = clarify("remove that task");
        assert!(prompt.contains("delete"));
    }

    #[test]
    fn delete_with_id() {
        let request = invoke(&format!("erase {ID}"));
        match request {
            ToolRequest::DeleteTask { task_id } => assert_eq!(task_id.to_string(), ID),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn update_title_prefers_as_pattern() {
        let request = invoke(&format!(r#"edit {ID} to "alpha" as "beta""#));
        match request {
            ToolRequest::UpdateTask { title, .. } => {
                assert_eq!(title.as_deref(), Some("beta"));
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn update_title_to_pattern() {
        let request = invoke(&format!(r#"change {ID} to "groceries""#));
        match request {
            ToolRequest::UpdateTask { title, .. } => {
                assert_eq!(title.as_deref(), Some("groceries"));
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn update_title_any_quoted_fallback() {
        let request = invoke(&format!(r#"modify {ID} "other name""#));
        match request {
            ToolRequest::UpdateTask { title, .. } => {
                assert_eq!(title.as_deref(), Some("other name"));
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn update_without_new_title_leaves_title_unset() {
        let request = invoke(&format!("modify {ID}"));
        match request {
            ToolRequest::UpdateTask { title, description, .. } => {
                assert!(title.is_none());
                assert!(description.is_none());
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn update_without_id_asks_for_clarification() {
        let prompt = clarify("change that task title please");
        assert!(prompt.contains("update"));
    }

    #[test]
    fn unknown_intent_gets_help_prompt() {
        let prompt = clarify("hello there");
        assert!(prompt.contains("add, list, complete, update, or delete"));
    }

    #[test]
    fn earliest_rule_wins_on_overlap() {
        // "add" and "delete" both present: the add rule is checked first.
        let request = invoke(&format!(r#"add a note then delete {ID}"#));
        assert!(matches!(request, ToolRequest::AddTask { .. }));
    }

    #[test]
    fn done_alone_routes_to_complete_not_list() {
        // "done" is a complete-class keyword; without a list keyword the
        // complete rule fires and asks for an id.
        let prompt = clarify("done");
        assert!(prompt.contains("mark as completed"));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let request = invoke("ADD a reminder");
        assert!(matches!(request, ToolRequest::AddTask { .. }));
    }

    #[test]
    fn extract_task_id_first_match_wins() {
        let other = "11111111-2222-3333-4444-555555555555";
        let text = format!("{ID} and {other}");
        assert_eq!(extract_task_id(&text).unwrap().to_string(), ID);
    }

    #[test]
    fn extract_task_id_rejects_malformed() {
        assert!(extract_task_id("id 1234-not-a-uuid").is_none());
    }
}
