/// Errors produced by tool transforms.
///
/// Every variant is local to the tool that raised it. The shell decides how to
/// surface it: an inline error line, a tool result flagged as an error, or, for
/// [`ToolError::EmptyInput`], a warning and no output at all.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Input could not be parsed (malformed JSON, bad base64, broken token).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input parsed but is out of range or otherwise unacceptable.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A call to the outside world failed (network, clipboard, storage).
    #[error("External call failed: {0}")]
    External(String),

    /// Nothing to transform.
    #[error("Input is empty")]
    EmptyInput,
}

pub type Result<T, E = ToolError> = std::result::Result<T, E>;

impl ToolError {
    pub fn parse(msg: impl Into<String>) -> Self {
        ToolError::Parse(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        ToolError::Validation(msg.into())
    }

    pub fn external(msg: impl Into<String>) -> Self {
        ToolError::External(msg.into())
    }

    /// True for the "silent no-op" kind, which callers report as a warning.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, ToolError::EmptyInput)
    }
}

/// Rejects input that is empty or whitespace only.
pub fn require_input(input: &str) -> Result<&str> {
    if input.trim().is_empty() {
        Err(ToolError::EmptyInput)
    } else {
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_input_rejects_blank() {
        assert_eq!(require_input("   \n"), Err(ToolError::EmptyInput));
        assert_eq!(require_input(""), Err(ToolError::EmptyInput));
    }

    #[test]
    fn test_require_input_passes_text_through() {
        assert_eq!(require_input(" a "), Ok(" a "));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ToolError::parse("unexpected token").to_string(),
            "Parse error: unexpected token"
        );
        assert!(ToolError::EmptyInput.is_empty_input());
        assert!(!ToolError::invalid("x").is_empty_input());
    }
}
