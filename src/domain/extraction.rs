//! Translation key extraction rules per project type.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::domain::AppError;

/// Framework family a scanned project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    ReactIntl,
    ReactI18next,
    VueI18n,
    NgxTranslate,
    Ios,
    Android,
}

impl ProjectType {
    pub const ALL: [ProjectType; 6] = [
        ProjectType::ReactIntl,
        ProjectType::ReactI18next,
        ProjectType::VueI18n,
        ProjectType::NgxTranslate,
        ProjectType::Ios,
        ProjectType::Android,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::ReactIntl => "yahoo/react-intl",
            ProjectType::ReactI18next => "i18next/react-i18next",
            ProjectType::VueI18n => "kazupon/vue-i18n",
            ProjectType::NgxTranslate => "ngx-translate/core",
            ProjectType::Ios => "mobile/ios",
            ProjectType::Android => "mobile/android",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        let value = value.trim();
        Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(value)).ok_or_else(|| {
            let supported: Vec<&str> = Self::ALL.iter().map(ProjectType::as_str).collect();
            AppError::config_error(format!(
                "Unsupported projectType '{}'. Supported: {}",
                value,
                supported.join(", ")
            ))
        })
    }

    /// Source file extensions scanned for this project type.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ProjectType::ReactIntl | ProjectType::ReactI18next => &["js", "jsx", "ts", "tsx"],
            ProjectType::VueI18n => &["vue", "js", "ts"],
            ProjectType::NgxTranslate => &["html", "ts"],
            ProjectType::Ios => &["swift", "m", "h"],
            ProjectType::Android => &["java", "kt", "xml"],
        }
    }

    fn patterns(&self) -> &'static [&'static str] {
        match self {
            ProjectType::ReactIntl => &[
                r#"<Formatted\w*Message[^>]*?\bid=\{?["'`]([^"'`]+)["'`]"#,
                r#"formatMessage\(\s*\{\s*id:\s*["'`]([^"'`]+)["'`]"#,
                r#"\bid:\s*["'`]([^"'`]+)["'`]\s*,\s*defaultMessage"#,
            ],
            ProjectType::ReactI18next => &[
                r#"\bt\(\s*["'`]([^"'`]+)["'`]"#,
                r#"\bi18nKey=\{?["'`]([^"'`]+)["'`]"#,
            ],
            ProjectType::VueI18n => &[
                r#"(?:\$tc?|\btc?)\(\s*["'`]([^"'`]+)["'`]"#,
                r#"\bv-t="'([^']+)'""#,
            ],
            ProjectType::NgxTranslate => &[
                r#"["']([^"'|{}]+)["']\s*\|\s*translate\b"#,
                r#"\btranslate=["']([^"']+)["']"#,
                r#"[Tt]ranslate(?:Service)?\.(?:instant|get|stream)\(\s*["'`]([^"'`]+)["'`]"#,
            ],
            ProjectType::Ios => &[
                r#"NSLocalizedString\(\s*@?"([^"]+)""#,
                r#"String\(localized:\s*"([^"]+)""#,
            ],
            ProjectType::Android => &[r"R\.string\.([A-Za-z0-9_]+)", r"@string/([A-Za-z0-9_]+)"],
        }
    }
}

/// Compiled key patterns for one project type.
#[derive(Debug, Clone)]
pub struct KeyExtractor {
    project_type: ProjectType,
    patterns: Vec<Regex>,
}

impl KeyExtractor {
    pub fn new(project_type: ProjectType) -> Result<Self, AppError> {
        let patterns = project_type
            .patterns()
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| AppError::ParseError {
                    what: format!("{} key pattern", project_type.as_str()),
                    details: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { project_type, patterns })
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.project_type.extensions().contains(&ext))
    }

    /// Keys referenced in one source file. Interpolated keys are skipped.
    pub fn extract(&self, content: &str) -> BTreeSet<String> {
        self.patterns
            .iter()
            .flat_map(|pattern| pattern.captures_iter(content))
            .filter_map(|captures| captures.get(1))
            .map(|key| key.as_str().trim())
            .filter(|key| !key.is_empty() && !key.contains("${"))
            .map(str::to_string)
            .collect()
    }
}

/// Keys found across a scanned project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    pub keys: BTreeSet<String>,
    pub processed_files: Vec<PathBuf>,
}

impl ExtractionResult {
    pub fn remove_ignored(&mut self, ignored: &[String]) {
        for key in ignored {
            self.keys.remove(key);
        }
    }
}
