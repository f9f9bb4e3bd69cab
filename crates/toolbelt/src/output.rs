use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Flags shared by every tool that prints a result.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Also copy the result to the clipboard
    #[arg(long)]
    pub copy: bool,
}

impl OutputArgs {
    /// Prints `value` as pretty JSON or through `render`.
    pub fn emit<T: Serialize>(&self, value: &T, render: impl FnOnce(&T) -> String) -> Result<()> {
        let rendered = if self.json {
            serde_json::to_string_pretty(value).context("Failed to serialize output")?
        } else {
            render(value)
        };
        self.print(&rendered);
        Ok(())
    }

    /// Prints a plain string result. With `--json` it is printed as a JSON string.
    pub fn emit_text(&self, text: &str) -> Result<()> {
        self.emit(&text, |t| t.to_string())
    }

    fn print(&self, rendered: &str) {
        println!("{rendered}");
        if self.copy {
            copy_to_clipboard(rendered);
        }
    }
}

/// Clipboard failures are reported but never fail the command.
pub fn copy_to_clipboard(text: &str) {
    match crate::clipboard::copy(text) {
        Ok(cmd) => eprintln!("{}", f!("Copied to clipboard ({cmd})").dimmed()),
        Err(e) => eprintln!("{} {e}", "warning:".yellow().bold()),
    }
}

/// Flags for tools that synthesize a file.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FileArgs {
    /// Where to write the file (defaults to a descriptive name in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

impl FileArgs {
    pub fn target(&self, default_name: &str) -> PathBuf {
        resolve_target(self.output.as_deref(), default_name)
    }

    /// Writes `contents` (or prints it with `--stdout`) and reports where it went.
    pub fn write(&self, default_name: &str, contents: &[u8]) -> Result<()> {
        if self.stdout {
            println!("{}", String::from_utf8_lossy(contents));
            return Ok(());
        }
        let path = self.target(default_name);
        write_file(&path, contents)?;
        println!("{} {}", "Wrote".green(), path.display());
        Ok(())
    }
}

/// A directory target gets the default name appended.
pub fn resolve_target(output: Option<&Path>, default_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(default_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_name),
    }
}

pub fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| f!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| f!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_target() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_target(Some(dir.path()), "blob-1.svg"),
            dir.path().join("blob-1.svg")
        );
        assert_eq!(
            resolve_target(Some(Path::new("out/x.svg")), "blob-1.svg"),
            PathBuf::from("out/x.svg")
        );
        assert_eq!(resolve_target(None, "blob-1.svg"), PathBuf::from("blob-1.svg"));
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/file.svg");
        write_file(&path, b"<svg/>").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<svg/>");
    }
}
