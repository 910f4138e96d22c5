use std::fmt;

/// How serious a reported [`Issue`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The checked item cannot be used.
    Error,
    /// The checked item is usable but probably not what the author meant.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathElem {
    Field(&'static str),
    Key(String),
    Index(usize),
}

pub(crate) fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match p {
            PathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            PathElem::Key(key) => {
                s.push('.');
                s.push_str(key);
            }
            PathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// A structured validation finding.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Issue {
    /// Error or warning.
    pub severity: Severity,
    /// Template the issue belongs to, when it has a usable id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// JSON-path-like location, e.g. `$.part_rules[2].match`.
    pub path: String,
    /// Human-readable description.
    pub message: String,
}

impl Issue {
    pub(crate) fn error(
        template_id: Option<&str>,
        path: &[PathElem],
        message: impl Into<String>,
    ) -> Self {
        Self::at(Severity::Error, template_id, path, message)
    }

    pub(crate) fn warning(
        template_id: Option<&str>,
        path: &[PathElem],
        message: impl Into<String>,
    ) -> Self {
        Self::at(Severity::Warning, template_id, path, message)
    }

    fn at(
        severity: Severity,
        template_id: Option<&str>,
        path: &[PathElem],
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            template_id: template_id.filter(|id| !id.is_empty()).map(str::to_owned),
            path: format_path(path),
            message: message.into(),
        }
    }

    /// Return `true` for [`Severity::Error`].
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(id) = &self.template_id {
            write!(f, " [{id}]")?;
        }
        write!(f, " {}: {}", self.path, self.message)
    }
}

/// Return `true` when any issue in `issues` is an error.
pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(Issue::is_error)
}
