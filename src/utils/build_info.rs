/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub date: &'static str,
}

impl BuildMetadata {
    /// One-line form for the startup banner, e.g. `v0.1.0 (a1b2c3d, 2026-10-18)`.
    pub fn short(&self) -> String {
        let dirty = if self.git_status == "dirty" { "+" } else { "" };
        format!("v{} ({}{dirty}, {})", self.version, self.git_hash, self.date)
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("BUDGET_TRACKER_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("BUDGET_TRACKER_BUILD_STATUS").unwrap_or("unknown"),
        date: option_env!("BUDGET_TRACKER_BUILD_DATE").unwrap_or("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_form_marks_dirty_trees() {
        let meta = BuildMetadata {
            version: "1.2.3",
            git_hash: "abc1234",
            git_status: "dirty",
            date: "2026-01-02",
        };
        assert_eq!(meta.short(), "v1.2.3 (abc1234+, 2026-01-02)");
        assert_eq!(current().version, env!("CARGO_PKG_VERSION"));
    }
}
