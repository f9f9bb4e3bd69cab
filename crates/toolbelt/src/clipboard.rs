use crate::prelude::*;
use std::io::Write;
use std::process::{Child, Command, Stdio};

/// Clipboard commands in order of preference, with their arguments.
const CANDIDATES: [(&str, &[&str]); 4] = [
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("clip", &[]),
];

fn pick(available: impl Fn(&str) -> bool) -> Option<(&'static str, &'static [&'static str])> {
    CANDIDATES.into_iter().find(|(cmd, _)| available(cmd))
}

/// Pipes `text` into the first clipboard command found on `PATH`.
pub fn copy(text: &str) -> Result<&'static str, Error> {
    let (cmd, args) = pick(|cmd| which::which(cmd).is_ok()).ok_or_else(|| {
        Error::Clipboard("no clipboard command found (tried pbcopy, wl-copy, xclip, clip)".into())
    })?;
    log::debug!("copying {} bytes with {cmd}", text.len());

    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::Clipboard(f!("failed to start {cmd}: {e}")))?;

    feed(&mut child, cmd, text)?;

    let status = child
        .wait()
        .map_err(|e| Error::Clipboard(f!("{cmd} did not finish: {e}")))?;
    if !status.success() {
        return Err(Error::Clipboard(f!("{cmd} exited with {status}")));
    }
    Ok(cmd)
}

/// Writes `text` to the child's stdin and closes it. A child that stops
/// reading is killed and reaped before the error is returned.
fn feed(child: &mut Child, cmd: &str, text: &str) -> Result<(), Error> {
    let Some(mut stdin) = child.stdin.take() else {
        return Ok(());
    };
    if let Err(e) = stdin.write_all(text.as_bytes()) {
        drop(stdin);
        let _ = child.kill();
        let _ = child.wait();
        return Err(Error::Clipboard(f!("failed to write to {cmd}: {e}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_failed_write_reaps_the_child() {
        let mut child = Command::new("sh")
            .args(["-c", "exec 0<&-; sleep 30"])
            .stdin(Stdio::piped())
            .spawn()
            .unwrap();
        let text = "x".repeat(4 * 1024 * 1024);

        let err = feed(&mut child, "sh", &text).unwrap_err();
        assert!(err.to_string().contains("failed to write to sh"));
        assert!(child.try_wait().unwrap().is_some());
    }

    #[test]
    fn test_pick_prefers_earlier_candidates() {
        let (cmd, args) = pick(|c| c == "xclip" || c == "clip").unwrap();
        assert_eq!(cmd, "xclip");
        assert_eq!(args, ["-selection", "clipboard"]);
        assert!(pick(|_| false).is_none());
    }
}
