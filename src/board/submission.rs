use serde::Deserialize;

use crate::highlight::Highlighter;

/// Display name used when a post is submitted without one.
pub const DEFAULT_USERNAME: &str = "Anonymous";

/// Language assumed when the form omits one.
const DEFAULT_LANGUAGE: &str = "text";

/// Fields of the post submission form.
#[derive(Debug, Default, Deserialize)]
pub struct PostForm {
    pub username: Option<String>,
    pub message: Option<String>,
    pub code_snippet: Option<String>,
    pub language: Option<String>,
}

/// A validated post, ready to be appended to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub username: String,
    pub message: Option<String>,
    pub highlighted_code: Option<String>,
    pub language: Option<String>,
}

/// Turn a submitted form into a post.
///
/// Returns `None` when both the message and the code snippet are blank; such
/// submissions are dropped without an error. A blank username becomes
/// [`DEFAULT_USERNAME`]; any other username is kept as typed. The snippet,
/// if any, is highlighted here, once.
#[must_use]
pub fn prepare_post(form: PostForm, highlighter: &Highlighter) -> Option<NewPost> {
    let message = form.message.filter(|m| !m.trim().is_empty());
    let code = form.code_snippet.filter(|c| !c.trim().is_empty());

    if message.is_none() && code.is_none() {
        return None;
    }

    let username = form
        .username
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

    let (highlighted_code, language) = match code {
        Some(code) => {
            let language = form
                .language
                .as_deref()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or(DEFAULT_LANGUAGE);
            let highlighted = highlighter.highlight(&code, language);
            (Some(highlighted.html), Some(highlighted.language))
        }
        None => (None, None),
    };

    Some(NewPost {
        username,
        message,
        highlighted_code,
        language,
    })
}
