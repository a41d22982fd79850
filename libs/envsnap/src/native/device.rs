//! Host operating-system family detection.
//!
//! Android reports itself as Linux to the standard library when built for a
//! Linux target, so it is recognized from the environment instead.

use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceFamily {
    Android { release: Option<String> },
    Linux,
    Windows,
    MacOs,
    Ios,
    /// Compiled to run inside a browser; not a traditional OS.
    Emscripten,
    Other(String),
}

impl DeviceFamily {
    /// Detects the family of the running host.
    #[must_use]
    pub fn detect() -> Self {
        let os = std::env::consts::OS;
        if os == "android" || os == "linux" {
            let android_root = std::env::var_os("ANDROID_ROOT").is_some();
            let release = android_release();
            if os == "android" || android_root || release.is_some() {
                tracing::debug!(release = ?release, "Detected Android host");
                return Self::Android { release };
            }
        }
        Self::from_os(os)
    }

    fn from_os(os: &str) -> Self {
        match os {
            "android" => Self::Android { release: None },
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            "ios" => Self::Ios,
            "emscripten" => Self::Emscripten,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Token placed in the identification string.
    #[must_use]
    pub fn identification_token(&self, os_version: Option<&str>) -> String {
        match self {
            Self::Android { release } => match release {
                Some(release) => format!("Linux; Android {release}"),
                None => "Linux; Android".to_owned(),
            },
            Self::Linux => match os_version {
                Some(v) => format!("Linux {v}"),
                None => "Linux".to_owned(),
            },
            Self::Windows => match os_version {
                Some(v) => format!("Windows {v}"),
                None => "Windows".to_owned(),
            },
            Self::MacOs => match os_version {
                Some(v) => format!("Macintosh; Mac OS {v}"),
                None => "Macintosh; Mac OS".to_owned(),
            },
            Self::Ios => match os_version {
                Some(v) => format!("iPhone; iOS {v}"),
                None => "iPhone".to_owned(),
            },
            Self::Emscripten => "Emscripten".to_owned(),
            Self::Other(os) => os.clone(),
        }
    }

    /// Platform name in the style browsers report it.
    #[must_use]
    pub fn platform_name(&self, arch: &str) -> String {
        match self {
            Self::Android { .. } | Self::Linux => format!("Linux {arch}"),
            Self::Windows => (if arch == "x86" { "Win32" } else { "Win64" }).to_owned(),
            Self::MacOs => format!("MacIntel {arch}"),
            Self::Ios => "iPhone".to_owned(),
            Self::Emscripten => "Emscripten".to_owned(),
            Self::Other(os) => format!("{os} {arch}"),
        }
    }
}

/// `ro.build.version.release` as reported by `getprop`, if the tool exists.
fn android_release() -> Option<String> {
    let output = Command::new("getprop")
        .arg("ro.build.version.release")
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let release = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    (!release.is_empty()).then_some(release)
}

/// Architecture token in the style of browser identification strings.
#[must_use]
pub fn arch_token(arch: &str) -> &str {
    match arch {
        "x86_64" => "x64",
        "x86" => "x86",
        "aarch64" => "aarch64",
        "arm" => "arm",
        other => other,
    }
}
