//! Syntax highlighting for code snippets.
//!
//! Snippets are rendered once at submission time into a fixed layout: a
//! `div.codehilite` wrapper around a two-column table of line numbers and
//! class-annotated code. The matching stylesheet is generated once per
//! process from the same theme and class style.

use once_cell::sync::Lazy;
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::sanitize::escape_html;

/// Class on the wrapper element around every highlighted snippet.
pub const WRAPPER_CLASS: &str = "codehilite";

/// Theme used for the generated stylesheet.
pub const THEME_NAME: &str = "InspiredGitHub";

/// Language identifiers offered by the submission form, as (value, label).
pub const LANGUAGE_CHOICES: &[(&str, &str)] = &[
    ("text", "Plain text"),
    ("python", "Python"),
    ("rust", "Rust"),
    ("javascript", "JavaScript"),
    ("c", "C"),
    ("cpp", "C++"),
    ("csharp", "C#"),
    ("java", "Java"),
    ("go", "Go"),
    ("ruby", "Ruby"),
    ("php", "PHP"),
    ("bash", "Shell"),
    ("sql", "SQL"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("json", "JSON"),
    ("yaml", "YAML"),
];

/// Layout rules for the line-number table. Token colors come from the theme.
const LAYOUT_CSS: &str = r".codehilite { overflow-x: auto; margin: 0.5rem 0; border: 1px solid #e4e4e7; border-radius: 0.375rem; }
.codehilite table { border-collapse: collapse; border: 0; margin: 0; }
.codehilite td { padding: 0; border: 0; vertical-align: top; }
.codehilite pre { margin: 0; padding: 0.5rem 0.75rem; font-size: 0.875rem; line-height: 1.4; background: transparent; }
.codehilite td.linenos pre { color: #9ca3af; text-align: right; user-select: none; border-right: 1px solid #e4e4e7; }
";

fn class_style() -> ClassStyle {
    ClassStyle::SpacedPrefixed { prefix: "hl-" }
}

static SHARED: Lazy<Highlighter> = Lazy::new(Highlighter::new);

/// A highlighted snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    /// Complete HTML fragment, safe to embed verbatim.
    pub html: String,
    /// Display name of the grammar that was used (e.g. "Rust", "Plain Text").
    pub language: String,
}

/// Grammar set plus the stylesheet that goes with it.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    stylesheet: String,
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("syntaxes", &self.syntax_set.syntaxes().len())
            .field("stylesheet_len", &self.stylesheet.len())
            .finish()
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Load the bundled grammars and build the stylesheet.
    #[must_use]
    pub fn new() -> Self {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let stylesheet = build_stylesheet();
        Self {
            syntax_set,
            stylesheet,
        }
    }

    /// Process-wide instance, built on first use.
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Stylesheet for highlighted snippets, embedded once per page.
    #[must_use]
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Resolve a language identifier to a grammar.
    ///
    /// Unknown identifiers resolve to the plain-text grammar.
    #[must_use]
    pub fn resolve(&self, language: &str) -> &SyntaxReference {
        let token = normalize_language(language);
        if token.is_empty() {
            return self.syntax_set.find_syntax_plain_text();
        }
        self.syntax_set
            .find_syntax_by_token(&token)
            .or_else(|| self.syntax_set.find_syntax_by_name(language.trim()))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    /// Render `code` as a line-numbered HTML fragment.
    ///
    /// Line endings are normalized and surrounding whitespace is stripped
    /// before highlighting. This never fails: if the grammar engine errors,
    /// the snippet is emitted as escaped plain text instead.
    #[must_use]
    pub fn highlight(&self, code: &str, language: &str) -> Highlighted {
        let normalized = code.replace("\r\n", "\n").replace('\r', "\n");
        let source = normalized.trim();
        let syntax = self.resolve(language);

        let body = match self.classed_html(syntax, &format!("{source}\n")) {
            Some(html) => html,
            None => {
                tracing::warn!(
                    language = %syntax.name,
                    "Highlighting failed, falling back to plain text"
                );
                escape_html(source)
            }
        };

        let line_count = source.lines().count().max(1);

        Highlighted {
            html: wrap_with_line_numbers(&body, line_count),
            language: syntax.name.clone(),
        }
    }

    fn classed_html(&self, syntax: &SyntaxReference, source: &str) -> Option<String> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, class_style());
        for line in LinesWithEndings::from(source) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .ok()?;
        }
        Some(generator.finalize())
    }
}

/// Map common identifiers and aliases onto tokens the grammar set knows.
fn normalize_language(language: &str) -> String {
    let lower = language.trim().to_lowercase();
    let mapped = match lower.as_str() {
        "" | "text" | "plain" | "plaintext" | "none" => "",
        "python3" | "py3" | "python2" => "py",
        "js" | "node" | "nodejs" => "js",
        "c++" | "cxx" => "cpp",
        "c#" | "csharp" | "cs" => "cs",
        "golang" => "go",
        "shell" | "console" | "zsh" | "sh" => "sh",
        "yml" => "yaml",
        "htm" | "xhtml" => "html",
        "md" => "markdown",
        other => other,
    };
    mapped.to_string()
}

fn build_stylesheet() -> String {
    let themes = ThemeSet::load_defaults();
    let theme = themes
        .themes
        .get(THEME_NAME)
        .or_else(|| themes.themes.values().next());

    let theme_css = match theme {
        Some(theme) => match css_for_theme_with_class_style(theme, class_style()) {
            Ok(css) => css,
            Err(e) => {
                tracing::warn!("Failed to generate highlight stylesheet: {e}");
                String::new()
            }
        },
        None => String::new(),
    };

    format!("{LAYOUT_CSS}{theme_css}")
}

fn wrap_with_line_numbers(body: &str, line_count: usize) -> String {
    let numbers = (1..=line_count)
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<div class=\"{WRAPPER_CLASS}\"><table class=\"{WRAPPER_CLASS}table\"><tr>\
         <td class=\"linenos\"><pre>{numbers}</pre></td>\
         <td class=\"code\"><pre>{body}</pre></td>\
         </tr></table></div>"
    )
}
