//! Host platform identifiers used as keys in command and shell variants.

use std::fmt;
use std::str::FromStr;

/// OS family keys, matched when no exact platform key is present.
pub const FAMILY_KEYS: [&str; 2] = ["nt", "posix"];

/// A host platform, identified the way `pyss.yaml` variant maps name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    Win32,
    Darwin,
    Cygwin,
    Aix,
    FreeBsd,
    OpenBsd,
    NetBsd,
    DragonFly,
    SunOs,
    Android,
    Ios,
    Wasi,
    Emscripten,
}

impl Platform {
    /// Every supported platform, in documentation order.
    pub const ALL: [Platform; 14] = [
        Platform::Linux,
        Platform::Win32,
        Platform::Darwin,
        Platform::Cygwin,
        Platform::Aix,
        Platform::FreeBsd,
        Platform::OpenBsd,
        Platform::NetBsd,
        Platform::DragonFly,
        Platform::SunOs,
        Platform::Android,
        Platform::Ios,
        Platform::Wasi,
        Platform::Emscripten,
    ];

    /// The key used for this platform in variant maps.
    pub fn key(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Win32 => "win32",
            Platform::Darwin => "darwin",
            Platform::Cygwin => "cygwin",
            Platform::Aix => "aix",
            Platform::FreeBsd => "freebsd",
            Platform::OpenBsd => "openbsd",
            Platform::NetBsd => "netbsd",
            Platform::DragonFly => "dragonfly",
            Platform::SunOs => "sunos5",
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Wasi => "wasi",
            Platform::Emscripten => "emscripten",
        }
    }

    /// Detect the platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Win32
        } else if cfg!(target_os = "macos") {
            Platform::Darwin
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "freebsd") {
            Platform::FreeBsd
        } else if cfg!(target_os = "openbsd") {
            Platform::OpenBsd
        } else if cfg!(target_os = "netbsd") {
            Platform::NetBsd
        } else if cfg!(target_os = "dragonfly") {
            Platform::DragonFly
        } else if cfg!(target_os = "aix") {
            Platform::Aix
        } else if cfg!(any(target_os = "solaris", target_os = "illumos")) {
            Platform::SunOs
        } else if cfg!(target_os = "wasi") {
            Platform::Wasi
        } else if cfg!(target_os = "emscripten") {
            Platform::Emscripten
        } else {
            Platform::Linux
        }
    }

    /// Check whether a variant-map key names a known platform.
    pub fn is_known_key(key: &str) -> bool {
        key.parse::<Platform>().is_ok()
    }

    /// The OS family key matching this platform: `nt` or `posix`.
    pub fn family(self) -> &'static str {
        match self {
            Platform::Win32 => "nt",
            _ => "posix",
        }
    }

    /// Check whether a variant-map key names a platform or an OS family.
    pub fn is_variant_key(key: &str) -> bool {
        FAMILY_KEYS.contains(&key) || Platform::is_known_key(key)
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .iter()
            .copied()
            .find(|p| p.key() == s)
            .ok_or_else(|| format!("unknown platform '{s}'"))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
