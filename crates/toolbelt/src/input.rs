use crate::prelude::*;
use std::io::{IsTerminal, Read};

/// The positional input, or stdin when it is absent or `-`.
///
/// An interactive terminal with no argument yields an empty string, which
/// the transforms turn into an empty-input warning instead of blocking.
pub fn read_input(arg: Option<String>) -> Result<String> {
    match arg {
        Some(value) if value != "-" => Ok(value),
        _ => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Ok(String::new());
            }
            let mut buffer = String::new();
            stdin
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_wins_over_stdin() {
        assert_eq!(read_input(Some("hello".into())).unwrap(), "hello");
    }
}
