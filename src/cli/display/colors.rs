//! Color theme for CLI output

use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub workload: TableColor,
    pub config: TableColor,
    pub network: TableColor,
    pub other: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            workload: TableColor::Green,
            config: TableColor::Yellow,
            network: TableColor::Cyan,
            other: TableColor::White,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color based on object kind
    pub fn get_kind_color(&self, kind: &str) -> TableColor {
        match kind {
            "Deployment" | "StatefulSet" | "DaemonSet" | "ReplicaSet" | "Job" | "CronJob"
            | "Pod" => self.workload,
            "ConfigMap" | "Secret" => self.config,
            "Service" | "Ingress" | "NetworkPolicy" => self.network,
            "" => self.muted,
            _ => self.other,
        }
    }
}
