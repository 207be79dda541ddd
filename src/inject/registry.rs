// ABOUTME: Compiled-in table of supported (framework, platform) injection targets.
// ABOUTME: Maps each target to the ordered template files it installs into a repository.

use super::error::InjectError;

/// One template copy: `source` is relative to the template directory,
/// `destination` is relative to the target repository root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFile {
    pub source: &'static str,
    pub destination: &'static str,
}

/// A supported target and the files injected for it, in write order.
#[derive(Debug, PartialEq, Eq)]
pub struct InjectionTarget {
    pub framework: &'static str,
    pub platform: &'static str,
    pub files: &'static [TemplateFile],
}

impl InjectionTarget {
    /// Registry key, e.g. `nextjs-cloudflare`.
    pub fn key(&self) -> String {
        target_key(self.framework, self.platform)
    }

    pub fn destinations(&self) -> Vec<String> {
        self.files.iter().map(|f| f.destination.to_string()).collect()
    }
}

// Adding a target is an edit here; there is no runtime registration.
static TARGETS: &[InjectionTarget] = &[InjectionTarget {
    framework: "nextjs",
    platform: "cloudflare",
    files: &[
        TemplateFile {
            source: "sst.config.ts",
            destination: "sst.config.ts",
        },
        TemplateFile {
            source: "wrangler.toml",
            destination: "wrangler.toml",
        },
    ],
}];

pub fn target_key(framework: &str, platform: &str) -> String {
    format!("{framework}-{platform}")
}

/// Every registered target.
pub fn targets() -> &'static [InjectionTarget] {
    TARGETS
}

/// Keys of every registered target, in registry order.
pub fn known_targets() -> Vec<String> {
    TARGETS.iter().map(InjectionTarget::key).collect()
}

/// Resolve the exact (framework, platform) pair.
///
/// # Errors
///
/// Returns `InjectError::UnknownTarget` listing the supported pairs.
pub fn lookup(framework: &str, platform: &str) -> Result<&'static InjectionTarget, InjectError> {
    TARGETS
        .iter()
        .find(|t| t.framework == framework && t.platform == platform)
        .ok_or_else(|| InjectError::unknown_target(framework, platform))
}
