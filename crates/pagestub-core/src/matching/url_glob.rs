//! URL glob patterns used for route registration.

use regex::Regex;

/// Glob over full URLs.
///
/// `**` matches any sequence, `*` any sequence without `/`, `?` a single character and
/// `{a,b}` either alternative. Everything else is literal.
#[derive(Debug, Clone)]
pub struct UrlGlob {
    pattern: String,
    regex: Regex,
}

impl UrlGlob {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&glob_to_regex(pattern))?;
        Ok(Self {
            pattern: pattern.to_owned(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let mut regex_str = String::from("^");
    let mut chars = pattern.chars().peekable();
    let mut in_group = false;

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                regex_str.push_str(".*");
            }
            '*' => regex_str.push_str("[^/]*"),
            '?' => regex_str.push('.'),
            '{' => {
                in_group = true;
                regex_str.push('(');
            }
            '}' if in_group => {
                in_group = false;
                regex_str.push(')');
            }
            ',' if in_group => regex_str.push('|'),
            other => regex_str.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }

    regex_str.push('$');
    regex_str
}
