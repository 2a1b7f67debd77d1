//! Error types for document rendering.

use thiserror::Error;

/// A compile diagnostic in displayable form.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub hint: Option<String>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.hint {
            Some(hint) => write!(f, "{} (hint: {})", self.message, hint),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("compilation failed: {}", summarize(.0))]
    Compile(Vec<Diagnostic>),

    #[error("compilation timed out after {0} ms")]
    Timeout(u64),

    #[error("{format} export failed: {message}")]
    Export {
        format: &'static str,
        message: String,
    },

    #[error("invalid render input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(Diagnostic::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_lists_every_diagnostic() {
        let err = RenderError::Compile(vec![
            Diagnostic {
                message: "unknown variable: foo".to_string(),
                hint: None,
            },
            Diagnostic {
                message: "expected expression".to_string(),
                hint: Some("did you forget a value?".to_string()),
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("unknown variable: foo"));
        assert!(text.contains("did you forget a value?"));
    }
}
