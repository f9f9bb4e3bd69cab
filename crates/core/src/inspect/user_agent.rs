//! User-Agent string parsing
//!
//! Heuristic, order-sensitive matching: most browsers claim to be several
//! others, so the more specific tokens (`Edg/`, `OPR/`, `SamsungBrowser/`)
//! are checked before the generic `Chrome/` and `Safari/` ones.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{require_input, Result};

struct Rule {
    name: &'static str,
    re: Regex,
}

fn rules(table: &[(&'static str, &str)]) -> Vec<Rule> {
    table
        .iter()
        .map(|&(name, pattern)| Rule {
            name,
            re: Regex::new(pattern).expect("user agent regex"),
        })
        .collect()
}

static BROWSERS: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        ("Edge", r"(?:Edg|EdgA|EdgiOS|Edge)/([\d.]+)"),
        ("Opera", r"(?:OPR|Opera)/([\d.]+)"),
        ("Samsung Internet", r"SamsungBrowser/([\d.]+)"),
        ("Firefox", r"(?:Firefox|FxiOS)/([\d.]+)"),
        ("Chrome", r"(?:Chrome|CriOS)/([\d.]+)"),
        ("Safari", r"Version/([\d.]+).*Safari/"),
        ("Internet Explorer", r"(?:MSIE |Trident/.*rv:)([\d.]+)"),
    ])
});

static OPERATING_SYSTEMS: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        ("Windows", r"Windows NT ([\d.]+)"),
        ("iOS", r"(?:iPhone|CPU) OS ([\d_]+)"),
        ("macOS", r"Mac OS X ([\d_.]+)"),
        ("Android", r"Android ([\d.]+)"),
        ("ChromeOS", r"CrOS \S+ ([\d.]+)"),
        ("Linux", r"Linux()"),
    ])
});

static BOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)bot|crawler|spider|slurp|curl/|wget/").expect("bot regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Desktop,
    Mobile,
    Tablet,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAgentInfo {
    pub browser: Option<String>,
    pub browser_version: Option<String>,
    pub os: Option<String>,
    pub os_version: Option<String>,
    pub device: DeviceClass,
    pub engine: Option<String>,
}

pub fn parse_user_agent(input: &str) -> Result<UserAgentInfo> {
    let ua = require_input(input)?.trim();

    let (browser, browser_version) = first_match(&BROWSERS, ua);
    let (os, os_version) = first_match(&OPERATING_SYSTEMS, ua);
    let os_version = match (os.as_deref(), os_version) {
        (Some("Windows"), Some(nt)) => Some(windows_release(&nt).to_string()),
        (_, Some(v)) => Some(v.replace('_', ".")),
        (_, None) => None,
    };

    Ok(UserAgentInfo {
        engine: engine(ua, browser.as_deref()).map(str::to_string),
        browser,
        browser_version,
        os,
        os_version,
        device: device_class(ua),
    })
}

fn first_match(rules: &[Rule], ua: &str) -> (Option<String>, Option<String>) {
    rules
        .iter()
        .find_map(|rule| {
            rule.re.captures(ua).map(|caps| {
                let version = caps
                    .get(1)
                    .map(|m| m.as_str().to_string())
                    .filter(|v| !v.is_empty());
                (Some(rule.name.to_string()), version)
            })
        })
        .unwrap_or((None, None))
}

fn windows_release(nt: &str) -> &str {
    match nt {
        "10.0" => "10/11",
        "6.3" => "8.1",
        "6.2" => "8",
        "6.1" => "7",
        "6.0" => "Vista",
        "5.1" | "5.2" => "XP",
        other => other,
    }
}

fn engine(ua: &str, browser: Option<&str>) -> Option<&'static str> {
    match browser {
        Some("Internet Explorer") => Some("Trident"),
        _ if ua.contains("Edge/") => Some("EdgeHTML"),
        // Every iOS browser is WebKit underneath
        _ if ua.contains("iPhone") || ua.contains("iPad") => Some("WebKit"),
        Some("Chrome" | "Edge" | "Opera" | "Samsung Internet") => Some("Blink"),
        _ if ua.contains("Gecko/") && ua.contains("Firefox/") => Some("Gecko"),
        _ if ua.contains("AppleWebKit/") => Some("WebKit"),
        _ => None,
    }
}

fn device_class(ua: &str) -> DeviceClass {
    if BOT_RE.is_match(ua) {
        DeviceClass::Bot
    } else if ua.contains("iPad")
        || ua.contains("Tablet")
        || (ua.contains("Android") && !ua.contains("Mobile"))
    {
        DeviceClass::Tablet
    } else if ua.contains("Mobi") || ua.contains("iPhone") || ua.contains("Android") {
        DeviceClass::Mobile
    } else {
        DeviceClass::Desktop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_WIN: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.110 Safari/537.36";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1.2 Mobile/15E148 Safari/604.1";
    const FIREFOX_LINUX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const EDGE_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91";
    const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";
    const GOOGLEBOT: &str = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

    #[test]
    fn test_chrome_on_windows() {
        let info = parse_user_agent(CHROME_WIN).unwrap();
        assert_eq!(info.browser.as_deref(), Some("Chrome"));
        assert_eq!(info.browser_version.as_deref(), Some("120.0.6099.110"));
        assert_eq!(info.os.as_deref(), Some("Windows"));
        assert_eq!(info.os_version.as_deref(), Some("10/11"));
        assert_eq!(info.engine.as_deref(), Some("Blink"));
        assert_eq!(info.device, DeviceClass::Desktop);
    }

    #[test]
    fn test_safari_on_iphone() {
        let info = parse_user_agent(SAFARI_IPHONE).unwrap();
        assert_eq!(info.browser.as_deref(), Some("Safari"));
        assert_eq!(info.browser_version.as_deref(), Some("17.1.2"));
        assert_eq!(info.os.as_deref(), Some("iOS"));
        assert_eq!(info.os_version.as_deref(), Some("17.1.2"));
        assert_eq!(info.engine.as_deref(), Some("WebKit"));
        assert_eq!(info.device, DeviceClass::Mobile);
    }

    #[test]
    fn test_firefox_on_linux() {
        let info = parse_user_agent(FIREFOX_LINUX).unwrap();
        assert_eq!(info.browser.as_deref(), Some("Firefox"));
        assert_eq!(info.os.as_deref(), Some("Linux"));
        assert_eq!(info.os_version, None);
        assert_eq!(info.engine.as_deref(), Some("Gecko"));
    }

    #[test]
    fn test_edge_wins_over_chrome() {
        let info = parse_user_agent(EDGE_MAC).unwrap();
        assert_eq!(info.browser.as_deref(), Some("Edge"));
        assert_eq!(info.os.as_deref(), Some("macOS"));
        assert_eq!(info.os_version.as_deref(), Some("10.15.7"));
    }

    #[test]
    fn test_android_without_mobile_is_tablet() {
        let info = parse_user_agent(ANDROID_TABLET).unwrap();
        assert_eq!(info.os.as_deref(), Some("Android"));
        assert_eq!(info.device, DeviceClass::Tablet);
    }

    #[test]
    fn test_bot() {
        assert_eq!(parse_user_agent(GOOGLEBOT).unwrap().device, DeviceClass::Bot);
    }

    #[test]
    fn test_unknown_agent() {
        let info = parse_user_agent("SomethingElse/1.0").unwrap();
        assert_eq!(info.browser, None);
        assert_eq!(info.device, DeviceClass::Desktop);
    }
}
