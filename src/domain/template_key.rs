//! Placeholder tokens embedded in configured upload and download paths.

use crate::domain::AppError;

pub const LANGUAGE_TEMPLATE_KEY: &str = "{lang}";
pub const NAMESPACE_TEMPLATE_KEY: &str = "{ns}";

/// A placeholder recognized inside path strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKey {
    Language,
    Namespace,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 2] = [TemplateKey::Language, TemplateKey::Namespace];

    pub fn token(&self) -> &'static str {
        match self {
            TemplateKey::Language => LANGUAGE_TEMPLATE_KEY,
            TemplateKey::Namespace => NAMESPACE_TEMPLATE_KEY,
        }
    }

    /// Whether the path carries this placeholder anywhere.
    pub fn is_in(&self, path: &str) -> bool {
        path.contains(self.token())
    }
}

/// Whether any placeholder appears in the path.
pub fn has_template_key(path: &str) -> bool {
    TemplateKey::ALL.iter().any(|key| key.is_in(path))
}

/// Literal text around the single placeholder of a file name.
///
/// Matching only checks that both parts occur somewhere in a candidate name;
/// their relative position is not verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNamePattern {
    prefix: String,
    suffix: String,
}

impl FileNamePattern {
    /// Split the file-name part of `path` on `key`.
    ///
    /// Returns `Ok(None)` when the path has no placeholder at all. The
    /// placeholder is accepted in the file name only, and only once.
    pub fn parse(path: &str, key: TemplateKey) -> Result<Option<Self>, AppError> {
        let token = key.token();
        let file_name = file_name_of(path);

        match file_name.matches(token).count() {
            0 if key.is_in(path) => Err(AppError::config_error(format!(
                "Placeholder '{}' must be part of the file name in '{}'",
                token, path
            ))),
            0 => Ok(None),
            1 => {
                let (prefix, suffix) = file_name.split_once(token).unwrap_or((file_name, ""));
                Ok(Some(Self { prefix: prefix.to_string(), suffix: suffix.to_string() }))
            }
            _ => Err(AppError::config_error(format!(
                "Placeholder '{}' may appear only once in the file name of '{}'",
                token, path
            ))),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn matches(&self, file_name: &str) -> bool {
        file_name.contains(&self.prefix) && file_name.contains(&self.suffix)
    }

    /// Value standing in for the placeholder, or `None` when the name does not match.
    pub fn extract(&self, file_name: &str) -> Option<String> {
        if !self.matches(file_name) {
            return None;
        }
        Some(remove_all(&remove_all(file_name, &self.prefix), &self.suffix))
    }
}

/// Substitute language and namespace into a path template.
///
/// An absent value renders as an empty string.
pub fn render(template: &str, language: Option<&str>, namespace: Option<&str>) -> String {
    template
        .replace(LANGUAGE_TEMPLATE_KEY, language.unwrap_or_default())
        .replace(NAMESPACE_TEMPLATE_KEY, namespace.unwrap_or_default())
}

/// Directory part of the template preceding its first placeholder.
///
/// Empty when the first placeholder sits in the leading path segment.
pub fn directory_before_template_key(template: &str) -> &str {
    let first = TemplateKey::ALL
        .iter()
        .filter_map(|key| template.find(key.token()))
        .min()
        .unwrap_or(template.len());
    let head = &template[..first];
    match head.rfind(['/', '\\']) {
        Some(0) => &head[..1],
        Some(index) => &head[..index],
        None => "",
    }
}

fn file_name_of(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

fn remove_all(text: &str, pattern: &str) -> String {
    if pattern.is_empty() { text.to_string() } else { text.replace(pattern, "") }
}
