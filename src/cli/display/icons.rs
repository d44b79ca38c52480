//! Status icons for CLI output

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Success icon (objects produced)
    pub const SUCCESS: &'static str = "✓";

    /// Warning icon (build produced nothing)
    pub const WARNING: &'static str = "⚠";

    /// Get status icon based on the number of objects built
    pub fn get_build_icon(objects: usize) -> &'static str {
        if objects == 0 {
            Self::WARNING
        } else {
            Self::SUCCESS
        }
    }
}
