//! Network diagnostics, minus the network
//!
//! The shell performs the HTTP calls; this module owns the endpoints, turns
//! response bodies into typed values and does the arithmetic on timings.

use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{require_input, Result, ToolError};

pub const IPIFY_URL: &str = "https://api.ipify.org?format=json";

pub fn ipapi_url(ip: &str) -> String {
    format!("https://ipapi.co/{ip}/json/")
}

// ---------------------------------------------------------------------------
// IP lookup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpInfo {
    pub ip: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub postal: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub org: Option<String>,
}

impl IpInfo {
    /// "City, Region, Country" with the missing parts left out.
    pub fn location(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.city, &self.region, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

#[derive(Deserialize)]
struct IpifyBody {
    ip: String,
}

/// Extracts the address from an ipify response.
pub fn parse_ipify(body: &str) -> Result<String> {
    let parsed: IpifyBody = serde_json::from_str(require_input(body)?)
        .map_err(|e| ToolError::parse(format!("Unexpected ipify response: {e}")))?;
    Ok(parsed.ip)
}

#[derive(Deserialize)]
struct IpapiBody {
    ip: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country_name: Option<String>,
    country_code: Option<String>,
    postal: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    timezone: Option<String>,
    org: Option<String>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// Parses an ipapi.co response. The service reports failures in-band with
/// `"error": true`.
pub fn parse_ipapi(body: &str) -> Result<IpInfo> {
    let parsed: IpapiBody = serde_json::from_str(require_input(body)?)
        .map_err(|e| ToolError::parse(format!("Unexpected ipapi response: {e}")))?;
    if parsed.error {
        return Err(ToolError::external(format!(
            "Geolocation lookup failed: {}",
            parsed.reason.as_deref().unwrap_or("unknown reason")
        )));
    }
    Ok(IpInfo {
        ip: parsed.ip.ok_or_else(|| ToolError::parse("ipapi response has no ip"))?,
        city: parsed.city,
        region: parsed.region,
        country: parsed.country_name,
        country_code: parsed.country_code,
        postal: parsed.postal,
        latitude: parsed.latitude,
        longitude: parsed.longitude,
        timezone: parsed.timezone,
        org: parsed.org,
    })
}

// ---------------------------------------------------------------------------
// YouTube thumbnails
// ---------------------------------------------------------------------------

static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video id regex"));

static YOUTUBE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?:https?://)?(?:www\.|m\.|music\.)?
        (?:
            youtu\.be/
          | youtube(?:-nocookie)?\.com/(?:embed/|shorts/|v/|live/|e/)
          | youtube\.com/.*[?&]v=
        )
        ([A-Za-z0-9_-]{11})",
    )
    .expect("youtube url regex")
});

/// Finds the 11-character video id in a URL (watch, short link, embed,
/// shorts, live) or accepts a bare id.
pub fn extract_video_id(input: &str) -> Result<String> {
    let input = require_input(input)?.trim();
    if VIDEO_ID_RE.is_match(input) {
        return Ok(input.to_string());
    }
    YOUTUBE_URL_RE
        .captures(input)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ToolError::parse(format!("No YouTube video id found in '{input}'")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailQuality {
    Default,
    Medium,
    High,
    Standard,
    MaxRes,
}

impl ThumbnailQuality {
    pub const ALL: [ThumbnailQuality; 5] = [
        ThumbnailQuality::MaxRes,
        ThumbnailQuality::Standard,
        ThumbnailQuality::High,
        ThumbnailQuality::Medium,
        ThumbnailQuality::Default,
    ];

    /// The file stem YouTube serves this size under.
    pub fn slug(self) -> &'static str {
        match self {
            ThumbnailQuality::Default => "default",
            ThumbnailQuality::Medium => "mqdefault",
            ThumbnailQuality::High => "hqdefault",
            ThumbnailQuality::Standard => "sddefault",
            ThumbnailQuality::MaxRes => "maxresdefault",
        }
    }

    pub fn dimensions(self) -> (u32, u32) {
        match self {
            ThumbnailQuality::Default => (120, 90),
            ThumbnailQuality::Medium => (320, 180),
            ThumbnailQuality::High => (480, 360),
            ThumbnailQuality::Standard => (640, 480),
            ThumbnailQuality::MaxRes => (1280, 720),
        }
    }
}

impl FromStr for ThumbnailQuality {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        ThumbnailQuality::ALL
            .into_iter()
            .find(|q| q.slug() == s || format!("{q:?}").eq_ignore_ascii_case(&s))
            .ok_or_else(|| ToolError::invalid(format!("Unknown thumbnail quality '{s}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    pub quality: ThumbnailQuality,
    pub url: String,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

pub fn thumbnail_url(id: &str, quality: ThumbnailQuality) -> String {
    format!("https://img.youtube.com/vi/{id}/{}.jpg", quality.slug())
}

pub fn thumbnail_file_name(id: &str, quality: ThumbnailQuality) -> String {
    format!("youtube-thumbnail-{id}-{}.jpg", quality.slug())
}

/// Every thumbnail size for the video, largest first.
pub fn thumbnails(id: &str) -> Vec<Thumbnail> {
    ThumbnailQuality::ALL
        .into_iter()
        .map(|quality| {
            let (width, height) = quality.dimensions();
            Thumbnail {
                quality,
                url: thumbnail_url(id, quality),
                file_name: thumbnail_file_name(id, quality),
                width,
                height,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Speed test
// ---------------------------------------------------------------------------

/// Download targets, smallest first.
pub const DOWNLOAD_TARGETS: [(&str, u64); 3] = [
    ("https://speed.cloudflare.com/__down?bytes=1000000", 1_000_000),
    ("https://speed.cloudflare.com/__down?bytes=10000000", 10_000_000),
    ("https://speed.cloudflare.com/__down?bytes=25000000", 25_000_000),
];

/// Zero-byte request used for latency.
pub const PING_TARGET: &str = "https://speed.cloudflare.com/__down?bytes=0";

/// Megabits per second for `bytes` transferred in `elapsed`.
pub fn mbps(bytes: u64, elapsed: Duration) -> Result<f64> {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return Err(ToolError::invalid("Elapsed time must be positive"));
    }
    let raw = bytes as f64 * 8.0 / secs / 1_000_000.0;
    Ok((raw * 100.0).round() / 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PingStats {
    pub samples: usize,
    pub min_ms: f64,
    pub max_ms: f64,
    pub avg_ms: f64,
    /// Mean absolute difference between consecutive samples.
    pub jitter_ms: f64,
}

fn ms(d: Duration) -> f64 {
    (d.as_secs_f64() * 100_000.0).round() / 100.0
}

pub fn ping_stats(samples: &[Duration]) -> Result<PingStats> {
    let (Some(min), Some(max)) = (samples.iter().min(), samples.iter().max()) else {
        return Err(ToolError::EmptyInput);
    };
    let total: Duration = samples.iter().sum();
    let avg = total / samples.len() as u32;
    let jitter = if samples.len() < 2 {
        Duration::ZERO
    } else {
        let diffs: Duration = samples
            .windows(2)
            .map(|w| w[0].abs_diff(w[1]))
            .sum();
        diffs / (samples.len() - 1) as u32
    };
    Ok(PingStats {
        samples: samples.len(),
        min_ms: ms(*min),
        max_ms: ms(*max),
        avg_ms: ms(avg),
        jitter_ms: ms(jitter),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedReport {
    pub download_mbps: f64,
    pub bytes: u64,
    pub seconds: f64,
    pub ping: Option<PingStats>,
}

/// Combines the per-download timings into one figure: total bytes over total time.
pub fn speed_report(downloads: &[(u64, Duration)], ping: Option<PingStats>) -> Result<SpeedReport> {
    if downloads.is_empty() {
        return Err(ToolError::EmptyInput);
    }
    let bytes: u64 = downloads.iter().map(|(b, _)| b).sum();
    let elapsed: Duration = downloads.iter().map(|(_, d)| *d).sum();
    Ok(SpeedReport {
        download_mbps: mbps(bytes, elapsed)?,
        bytes,
        seconds: (elapsed.as_secs_f64() * 1000.0).round() / 1000.0,
        ping,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipify() {
        assert_eq!(parse_ipify(r#"{"ip":"203.0.113.7"}"#).unwrap(), "203.0.113.7");
        assert!(parse_ipify("<html>").is_err());
        assert!(parse_ipify("").unwrap_err().is_empty_input());
    }

    #[test]
    fn test_parse_ipapi() {
        let body = r#"{
            "ip": "8.8.8.8", "city": "Mountain View", "region": "California",
            "country_name": "United States", "country_code": "US", "postal": "94043",
            "latitude": 37.42, "longitude": -122.08, "timezone": "America/Los_Angeles",
            "org": "GOOGLE", "asn": "AS15169"
        }"#;
        let info = parse_ipapi(body).unwrap();
        assert_eq!(info.country_code.as_deref(), Some("US"));
        assert_eq!(
            info.location().unwrap(),
            "Mountain View, California, United States"
        );
        assert_eq!(ipapi_url("8.8.8.8"), "https://ipapi.co/8.8.8.8/json/");
    }

    #[test]
    fn test_parse_ipapi_in_band_error() {
        let err = parse_ipapi(r#"{"error": true, "reason": "RateLimited"}"#).unwrap_err();
        assert!(matches!(err, ToolError::External(_)));
        assert!(err.to_string().contains("RateLimited"));
    }

    #[test]
    fn test_extract_video_id_shapes() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42",
            "https://youtu.be/dQw4w9WgXcQ?si=abc",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://youtube.com/shorts/dQw4w9WgXcQ",
            "https://m.youtube.com/live/dQw4w9WgXcQ",
            "youtube-nocookie.com/embed/dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
        ] {
            assert_eq!(extract_video_id(url).unwrap(), "dQw4w9WgXcQ", "{url}");
        }
        assert!(extract_video_id("https://vimeo.com/12345").is_err());
    }

    #[test]
    fn test_thumbnails() {
        let all = thumbnails("dQw4w9WgXcQ");
        assert_eq!(all.len(), 5);
        assert_eq!(
            all[0].url,
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
        assert_eq!(
            thumbnail_file_name("dQw4w9WgXcQ", ThumbnailQuality::High),
            "youtube-thumbnail-dQw4w9WgXcQ-hqdefault.jpg"
        );
        assert!("hq".parse::<ThumbnailQuality>().is_err());
        assert_eq!("maxres".parse::<ThumbnailQuality>().unwrap(), ThumbnailQuality::MaxRes);
        assert_eq!("sddefault".parse::<ThumbnailQuality>().unwrap(), ThumbnailQuality::Standard);
    }

    #[test]
    fn test_mbps() {
        assert_eq!(mbps(10_000_000, Duration::from_secs(2)).unwrap(), 40.0);
        assert!(mbps(1, Duration::ZERO).is_err());
    }

    #[test]
    fn test_ping_stats() {
        let samples = [20, 30, 25].map(Duration::from_millis);
        let stats = ping_stats(&samples).unwrap();
        assert_eq!(stats.min_ms, 20.0);
        assert_eq!(stats.max_ms, 30.0);
        assert_eq!(stats.avg_ms, 25.0);
        assert_eq!(stats.jitter_ms, 7.5);
        assert!(ping_stats(&[]).is_err());
    }

    #[test]
    fn test_speed_report() {
        let report = speed_report(
            &[
                (1_000_000, Duration::from_millis(500)),
                (9_000_000, Duration::from_millis(1500)),
            ],
            None,
        )
        .unwrap();
        assert_eq!(report.download_mbps, 40.0);
        assert_eq!(report.seconds, 2.0);
    }
}
