//! Configuration document parsing (YAML/JSON/JSONC).
//!
//! Used for run configuration ([`StaticConfig`](crate::config::StaticConfig)) and for mock
//! case files.

use crate::config::error::ConfigError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Config file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Jsonc,
    Unknown,
}

/// Get config file type from path extension
pub fn get_file_type(path: &str) -> ConfigFileType {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => ConfigFileType::Yaml,
        "json" => ConfigFileType::Json,
        "jsonc" => ConfigFileType::Jsonc,
        _ => ConfigFileType::Unknown,
    }
}

#[derive(Clone, Copy)]
enum Scan {
    Code,
    Str,
    LineComment,
    BlockComment,
}

/// Strip `//` and `/* */` comments from JSONC content.
///
/// Comment markers inside string literals are kept; escaped quotes do not end a string.
pub fn strip_json_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut scan = Scan::Code;

    while let Some(c) = chars.next() {
        match scan {
            Scan::Code => match c {
                '"' => {
                    out.push(c);
                    scan = Scan::Str;
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    scan = Scan::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    scan = Scan::BlockComment;
                }
                _ => out.push(c),
            },
            Scan::Str => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == '"' {
                    scan = Scan::Code;
                }
            }
            Scan::LineComment => {
                if c == '\n' || c == '\r' {
                    out.push(c);
                    scan = Scan::Code;
                }
            }
            Scan::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    scan = Scan::Code;
                }
            }
        }
    }

    out
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse JSONC content (JSON with comments)
pub fn parse_jsonc<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    parse_json(&strip_json_comments(content))
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Parse config content based on file type
pub fn parse_config<T: DeserializeOwned>(content: &str, path: &str) -> Result<T, ConfigError> {
    match get_file_type(path) {
        ConfigFileType::Yaml => parse_yaml(content),
        ConfigFileType::Json => parse_json(content),
        ConfigFileType::Jsonc => parse_jsonc(content),
        ConfigFileType::Unknown => Err(ConfigError::UnknownFileType(path.to_string())),
    }
}

/// Read a document from disk and parse it according to its extension.
pub async fn load_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let display = path.to_string_lossy().into_owned();

    // Reject unknown extensions before touching the filesystem
    if get_file_type(&display) == ConfigFileType::Unknown {
        return Err(ConfigError::UnknownFileType(display));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
    parse_config(&content, &display)
}
