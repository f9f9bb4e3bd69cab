use crate::prelude::*;
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub os: String,
    pub family: String,
    pub arch: String,
    pub cpus: usize,
    pub language: Option<String>,
    pub timezone: Option<String>,
    pub terminal: Option<String>,
    pub shell: Option<String>,
    pub color: bool,
}

/// Language tag from a POSIX locale such as `en_US.UTF-8`.
fn language_tag(locale: &str) -> Option<String> {
    let base = locale.split(['.', '@']).next()?.trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// Gathers what the process can see about the machine. `env` is the
/// environment lookup so tests can supply their own.
pub fn collect(env: impl Fn(&str) -> Option<String>) -> DeviceInfo {
    let language = ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|key| env(key))
        .find_map(|locale| language_tag(&locale));

    DeviceInfo {
        os: std::env::consts::OS.to_string(),
        family: std::env::consts::FAMILY.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpus: std::thread::available_parallelism().map_or(1, |n| n.get()),
        language,
        timezone: env("TZ").filter(|tz| !tz.is_empty()),
        terminal: env("TERM_PROGRAM").or_else(|| env("TERM")),
        shell: env("SHELL").and_then(|s| s.rsplit('/').next().map(str::to_string)),
        color: env("NO_COLOR").is_none(),
    }
}

pub fn render(info: &DeviceInfo) -> String {
    let unknown = || "unknown".to_string();
    let mut table = new_table();
    table.add_row(prettytable::row!["OS".bold(), f!("{} ({})", info.os, info.family)]);
    table.add_row(prettytable::row!["Architecture".bold(), info.arch]);
    table.add_row(prettytable::row!["CPU threads".bold(), info.cpus]);
    table.add_row(prettytable::row!["Language".bold(), info.language.clone().unwrap_or_else(unknown)]);
    table.add_row(prettytable::row!["Timezone".bold(), info.timezone.clone().unwrap_or_else(unknown)]);
    table.add_row(prettytable::row!["Terminal".bold(), info.terminal.clone().unwrap_or_else(unknown)]);
    table.add_row(prettytable::row!["Shell".bold(), info.shell.clone().unwrap_or_else(unknown)]);
    table.add_row(prettytable::row!["Color".bold(), if info.color { "yes" } else { "no" }]);
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_language_tag() {
        assert_eq!(language_tag("en_US.UTF-8").as_deref(), Some("en-US"));
        assert_eq!(language_tag("de_DE@euro").as_deref(), Some("de-DE"));
        assert_eq!(language_tag("C.UTF-8"), None);
    }

    #[test]
    fn test_collect_prefers_lc_all() {
        let info = collect(env(&[
            ("LANG", "en_US.UTF-8"),
            ("LC_ALL", "pt_BR.UTF-8"),
            ("SHELL", "/usr/bin/zsh"),
            ("TZ", "Europe/Lisbon"),
        ]));
        assert_eq!(info.language.as_deref(), Some("pt-BR"));
        assert_eq!(info.shell.as_deref(), Some("zsh"));
        assert_eq!(info.timezone.as_deref(), Some("Europe/Lisbon"));
        assert!(info.color);
        assert!(info.cpus >= 1);
    }

    #[test]
    fn test_collect_with_empty_environment() {
        let info = collect(env(&[]));
        assert_eq!(info.language, None);
        assert_eq!(info.terminal, None);
        assert_eq!(info.os, std::env::consts::OS);
    }
}
