//! Page titles and namespaces
//!
//! Titles are stored in one canonical form: namespace prefix, a single
//! space after the colon's worth of text, underscores folded to spaces,
//! and an uppercased first letter. `File:wiki.png` and `File:Wiki_png`
//! style variants all resolve to the same page.

/// Characters that may never appear in a title.
const ILLEGAL_CHARS: &[char] = &['#', '<', '>', '[', ']', '|', '{', '}'];

const MAX_TITLE_BYTES: usize = 255;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title is empty")]
    Empty,

    #[error("Title exceeds {MAX_TITLE_BYTES} bytes")]
    TooLong,

    #[error("Title contains illegal character '{0}'")]
    IllegalCharacter(char),
}

/// Namespaces the upload flows touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Main,
    Talk,
    File,
    FileTalk,
    User,
    UserTalk,
}

impl Namespace {
    /// Canonical prefix without the trailing colon; empty for main.
    pub fn prefix(&self) -> &'static str {
        match self {
            Namespace::Main => "",
            Namespace::Talk => "Talk",
            Namespace::File => "File",
            Namespace::FileTalk => "File talk",
            Namespace::User => "User",
            Namespace::UserTalk => "User talk",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        let normalized = prefix.trim().replace('_', " ");
        let all = [
            Namespace::Talk,
            Namespace::File,
            Namespace::FileTalk,
            Namespace::User,
            Namespace::UserTalk,
        ];
        all.into_iter().find(|ns| ns.prefix().eq_ignore_ascii_case(&normalized))
    }
}

/// A normalized, namespace-qualified page title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title {
    namespace: Namespace,
    text: String,
}

impl Title {
    /// Build a title in the given namespace, normalizing the text part.
    pub fn new(namespace: Namespace, text: &str) -> Result<Self, TitleError> {
        let text = normalize_text(text)?;
        Ok(Self { namespace, text })
    }

    /// Parse a full title, resolving a leading namespace prefix when one is
    /// present. Unknown prefixes stay part of a main-namespace title.
    pub fn parse(full: &str) -> Result<Self, TitleError> {
        if let Some((prefix, rest)) = full.split_once(':') {
            if let Some(namespace) = Namespace::from_prefix(prefix) {
                return Self::new(namespace, rest);
            }
        }
        Self::new(Namespace::Main, full)
    }

    /// Title of a file description page.
    pub fn file(name: &str) -> Result<Self, TitleError> {
        Self::new(Namespace::File, name)
    }

    /// Talk page of the given user.
    pub fn user_talk(user: &str) -> Result<Self, TitleError> {
        Self::new(Namespace::UserTalk, user)
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Normalized text part, without the namespace prefix.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Full canonical form, e.g. `User talk:Alice`.
    pub fn full(&self) -> String {
        let prefix = self.namespace.prefix();
        if prefix.is_empty() {
            self.text.clone()
        } else {
            format!("{}:{}", prefix, self.text)
        }
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full())
    }
}

fn normalize_text(raw: &str) -> Result<String, TitleError> {
    let collapsed = raw.trim().replace('_', " ");
    if collapsed.is_empty() {
        return Err(TitleError::Empty);
    }
    if let Some(c) = collapsed.chars().find(|c| ILLEGAL_CHARS.contains(c) || c.is_control()) {
        return Err(TitleError::IllegalCharacter(c));
    }

    let mut chars = collapsed.chars();
    let first = chars.next().ok_or(TitleError::Empty)?;
    let text: String = first.to_uppercase().chain(chars).collect();

    if text.len() > MAX_TITLE_BYTES {
        return Err(TitleError::TooLong);
    }
    Ok(text)
}
