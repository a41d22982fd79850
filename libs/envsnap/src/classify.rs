//! Heuristic device classification over raw identification strings.
//!
//! All functions are pure. Every pattern list is checked in a fixed order and
//! the first hit wins, so the same input always yields the same label.

use std::fmt;

use regex::Regex;
use serde::Serialize;

/// Viewports at or below this width count as a mobile signal.
pub const MOBILE_VIEWPORT_MAX_WIDTH: u32 = 768;

#[allow(clippy::expect_used)] // good regex, it doesn't panic
static MOBILE_DEVICE_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)android|webos|iphone|ipad|ipod|blackberry|iemobile|opera mini")
        .expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static IOS_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)iphone|ipad|ipod").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static WINDOWS_PLATFORM_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    // word start only, so "Darwin" does not count
    Regex::new(r"(?i)\bwin").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static X64_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)wow64|win64|x64").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static ARM_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)arm|aarch64").expect("static regex should not panic")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    Android,
    #[serde(rename = "iOS")]
    Ios,
    Windows,
    #[serde(rename = "macOS")]
    MacOs,
    Linux,
    Unknown,
}

impl Platform {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::Windows => "Windows",
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Architecture {
    #[serde(rename = "x64")]
    X64,
    #[serde(rename = "ARM")]
    Arm,
    #[serde(rename = "x86")]
    X86,
    Unknown,
}

impl Architecture {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::Arm => "ARM",
            Self::X86 => "x86",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The derived fields computed once per collection and shared by every phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub platform: Platform,
    pub architecture: Architecture,
    pub is_mobile: bool,
}

impl Classification {
    #[must_use]
    pub fn classify(
        identification: &str,
        platform_name: &str,
        viewport_width: Option<u32>,
        has_touch_start: bool,
    ) -> Self {
        Self {
            platform: detect_platform(identification, platform_name),
            architecture: detect_architecture(identification, platform_name),
            is_mobile: detect_mobile(identification, viewport_width, has_touch_start),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Detects the operating system family.
///
/// Order: Android, iOS, Windows, macOS, Linux. Android and iOS identification
/// strings also mention Linux and Mac OS, so the mobile checks come first.
#[must_use]
pub fn detect_platform(identification: &str, platform_name: &str) -> Platform {
    if contains_ignore_case(identification, "android") {
        Platform::Android
    } else if IOS_REGEX.is_match(identification) {
        Platform::Ios
    } else if WINDOWS_PLATFORM_REGEX.is_match(platform_name)
        || contains_ignore_case(identification, "windows")
    {
        Platform::Windows
    } else if contains_ignore_case(platform_name, "mac")
        || contains_ignore_case(identification, "macintosh")
        || contains_ignore_case(identification, "mac os")
    {
        Platform::MacOs
    } else if contains_ignore_case(platform_name, "linux")
        || contains_ignore_case(identification, "linux")
    {
        Platform::Linux
    } else {
        Platform::Unknown
    }
}

/// Detects the CPU architecture family.
///
/// The identification string is searched first (64-bit markers, then ARM,
/// then `x86`); the platform name is only a fallback.
#[must_use]
pub fn detect_architecture(identification: &str, platform_name: &str) -> Architecture {
    if X64_REGEX.is_match(identification) {
        Architecture::X64
    } else if ARM_REGEX.is_match(identification) {
        Architecture::Arm
    } else if contains_ignore_case(identification, "x86") {
        Architecture::X86
    } else if platform_name.contains("64") {
        Architecture::X64
    } else if ARM_REGEX.is_match(platform_name) {
        Architecture::Arm
    } else {
        Architecture::Unknown
    }
}

/// Any single signal is enough: a mobile keyword, a narrow viewport, or touch events.
#[must_use]
pub fn detect_mobile(identification: &str, viewport_width: Option<u32>, has_touch_start: bool) -> bool {
    MOBILE_DEVICE_REGEX.is_match(identification)
        || viewport_width.is_some_and(|w| w <= MOBILE_VIEWPORT_MAX_WIDTH)
        || has_touch_start
}

/// Names the mobile browser. Only meaningful for devices classified as mobile.
#[must_use]
pub fn detect_mobile_browser_engine(identification: &str) -> &'static str {
    let has = |needle: &str| contains_ignore_case(identification, needle);
    let mobile = has("mobile");

    if has("chrome") && mobile {
        "Chrome Mobile"
    } else if has("safari") && mobile {
        "Safari Mobile"
    } else if has("firefox") && mobile {
        "Firefox Mobile"
    } else if has("samsung") {
        "Samsung Internet"
    } else if has("opera") && mobile {
        "Opera Mobile"
    } else {
        "Unknown Mobile Browser"
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const WINDOWS_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
    const MAC_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
        (KHTML, like Gecko) Version/17.0 Safari/605.1.15";
    const LINUX_UA: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

    #[test]
    fn test_platform_precedence_order() {
        assert_eq!(detect_platform(ANDROID_UA, "Linux armv8l"), Platform::Android);
        assert_eq!(detect_platform(IPHONE_UA, "iPhone"), Platform::Ios);
        assert_eq!(detect_platform("Mozilla/5.0 (iPad; CPU OS 16_0)", ""), Platform::Ios);
        assert_eq!(detect_platform("Mozilla/5.0 (iPod touch)", ""), Platform::Ios);
        assert_eq!(detect_platform(WINDOWS_UA, "Win32"), Platform::Windows);
        assert_eq!(detect_platform(MAC_UA, "MacIntel"), Platform::MacOs);
        assert_eq!(detect_platform(LINUX_UA, "Linux x86_64"), Platform::Linux);
        assert_eq!(detect_platform("curl/8.0", ""), Platform::Unknown);
    }

    #[test]
    fn test_platform_match_is_case_insensitive() {
        assert_eq!(detect_platform("ANDROID", ""), Platform::Android);
        assert_eq!(detect_platform("", "WIN32"), Platform::Windows);
        assert_eq!(detect_platform("", "linux"), Platform::Linux);
    }

    #[test]
    fn test_windows_platform_name_needs_word_start() {
        assert_eq!(detect_platform("", "Win64"), Platform::Windows);
        assert_eq!(detect_platform("", "Windows x86_64"), Platform::Windows);
        assert_eq!(detect_platform("", "Darwin arm64"), Platform::Unknown);
        assert_eq!(detect_platform("Darwin/23.4.0", "Darwin arm64"), Platform::Unknown);
    }

    #[test]
    fn test_architecture_branches() {
        assert_eq!(detect_architecture(WINDOWS_UA, "Win32"), Architecture::X64);
        assert_eq!(detect_architecture("Windows NT 6.1; WOW64", ""), Architecture::X64);
        assert_eq!(detect_architecture(ANDROID_UA, "Linux armv8l"), Architecture::Arm);
        assert_eq!(detect_architecture("Linux aarch64", ""), Architecture::Arm);
        assert_eq!(detect_architecture("Windows NT 10.0; x86", ""), Architecture::X86);
        assert_eq!(detect_architecture(MAC_UA, "MacIntel64"), Architecture::X64);
        assert_eq!(detect_architecture(MAC_UA, "armv7l"), Architecture::Arm);
        assert_eq!(detect_architecture(MAC_UA, "MacIntel"), Architecture::Unknown);
    }

    #[test]
    fn test_mobile_signals_are_independent() {
        assert!(detect_mobile(IPHONE_UA, Some(1920), false));
        assert!(detect_mobile("BlackBerry9700", None, false));
        assert!(detect_mobile("Opera Mini/8.0", None, false));
        assert!(detect_mobile(LINUX_UA, Some(768), false));
        assert!(!detect_mobile(LINUX_UA, Some(769), false));
        assert!(detect_mobile(LINUX_UA, Some(1920), true));
        assert!(!detect_mobile(WINDOWS_UA, Some(1920), false));
        assert!(!detect_mobile(WINDOWS_UA, None, false));
    }

    #[test]
    fn test_browser_engine_order() {
        assert_eq!(detect_mobile_browser_engine(ANDROID_UA), "Chrome Mobile");
        assert_eq!(detect_mobile_browser_engine(IPHONE_UA), "Safari Mobile");
        assert_eq!(
            detect_mobile_browser_engine("Mozilla/5.0 (Android 14; Mobile; rv:121.0) Firefox/121.0"),
            "Firefox Mobile"
        );
        assert_eq!(
            detect_mobile_browser_engine("Mozilla/5.0 (Linux; Android 13) SamsungBrowser/23.0"),
            "Samsung Internet"
        );
        assert_eq!(
            detect_mobile_browser_engine("Opera/9.80 (Android; Opera Mobi) Mobile"),
            "Opera Mobile"
        );
        assert_eq!(detect_mobile_browser_engine(LINUX_UA), "Unknown Mobile Browser");
    }

    #[test]
    fn test_classification_is_deterministic() {
        let first = Classification::classify(WINDOWS_UA, "Win32", Some(1920), false);
        let second = Classification::classify(WINDOWS_UA, "Win32", Some(1920), false);
        assert_eq!(first, second);
        assert_eq!(first.platform, Platform::Windows);
        assert_eq!(first.architecture, Architecture::X64);
        assert!(!first.is_mobile);
    }

    #[test]
    fn test_iphone_narrow_viewport() {
        let c = Classification::classify(IPHONE_UA, "iPhone", Some(390), true);
        assert_eq!(c.platform, Platform::Ios);
        assert!(c.is_mobile);
    }

    #[test]
    fn test_labels_serialize_like_display() {
        for p in [
            Platform::Android,
            Platform::Ios,
            Platform::Windows,
            Platform::MacOs,
            Platform::Linux,
            Platform::Unknown,
        ] {
            assert_eq!(serde_json::to_value(p).unwrap(), serde_json::json!(p.to_string()));
        }
        for a in [
            Architecture::X64,
            Architecture::Arm,
            Architecture::X86,
            Architecture::Unknown,
        ] {
            assert_eq!(serde_json::to_value(a).unwrap(), serde_json::json!(a.to_string()));
        }
    }
}
