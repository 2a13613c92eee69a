//! Executable naming per target platform.
//!
//! Resolved once at the start of a build or run, so the rest of the pipeline
//! never branches on the operating system.

use camino::{Utf8Path, Utf8PathBuf};

/// Compiler executable stem
pub const COMPILER_STEM: &str = "pawncc";

/// Server executable stem
pub const SERVER_STEM: &str = "omp-server";

/// Executable naming rules for one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub tag: &'static str,
    pub exe_suffix: &'static str,
}

const PLATFORMS: &[Platform] = &[
    Platform {
        tag: "windows",
        exe_suffix: ".exe",
    },
    Platform {
        tag: "linux",
        exe_suffix: "",
    },
    Platform {
        tag: "macos",
        exe_suffix: "",
    },
];

impl Platform {
    /// Look up a platform by its `std::env::consts::OS` tag
    pub fn for_os(tag: &str) -> Option<Platform> {
        PLATFORMS.iter().copied().find(|p| p.tag == tag)
    }

    /// The platform this binary is running on, if supported
    pub fn current() -> Option<Platform> {
        Self::for_os(std::env::consts::OS)
    }

    /// `pawncc` or `pawncc.exe`
    pub fn executable_name(&self, stem: &str) -> String {
        format!("{}{}", stem, self.exe_suffix)
    }

    /// Executable file name joined to a directory
    pub fn executable_in(&self, dir: &Utf8Path, stem: &str) -> Utf8PathBuf {
        dir.join(self.executable_name(stem))
    }
}
