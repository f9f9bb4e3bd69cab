/// Failures that belong to the shell rather than to a tool transform.
///
/// Transform failures stay [`toolbelt_core::ToolError`] all the way up so
/// `main` can tell an empty input apart from a real error.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Config error: {0}")]
    Config(String),
}
