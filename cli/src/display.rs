//! Colored text rendering of a battery record.

use std::fmt::{self, Write};
use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};
use juicecheck_platform::BasicStatus;
use juicecheck_report::{AdvancedInfo, BatteryReport};

use crate::config::AlertConfig;

const BANNER: &str = r"
       _       _           _____ _               _
      | |     (_)         / ____| |             | |
      | |_   _ _  ___ ___| |    | |__   ___  ___| | __
  _   | | | | | |/ __/ _ \ |    | '_ \ / _ \/ __| |/ /
 | |__| | |_| | | (_|  __/ |____| | | |  __/ (__|   <
  \____/ \__,_|_|\___\___|\_____|_| |_|\___|\___|_|\_\
";

/// Applies terminal colors, or passes text through when disabled.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    /// Colors only when asked for and stdout is a terminal.
    pub fn new(color: bool) -> Self {
        Self {
            enabled: color && std::io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn paint(&self, text: impl fmt::Display, color: Color) -> String {
        if self.enabled {
            text.to_string().with(color).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Qualitative grade of a health percentage, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl HealthTier {
    pub fn from_percent(health: f64) -> Self {
        if health >= 90.0 {
            HealthTier::Excellent
        } else if health >= 80.0 {
            HealthTier::Good
        } else if health >= 70.0 {
            HealthTier::Fair
        } else if health >= 60.0 {
            HealthTier::Poor
        } else {
            HealthTier::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthTier::Excellent => "Excellent",
            HealthTier::Good => "Good",
            HealthTier::Fair => "Fair",
            HealthTier::Poor => "Poor",
            HealthTier::Critical => "Critical",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            HealthTier::Excellent => "Battery is in great condition",
            HealthTier::Good => "Battery health is acceptable",
            HealthTier::Fair => "Monitor battery health closely",
            HealthTier::Poor => "Consider replacing the battery soon",
            HealthTier::Critical => "Battery replacement recommended",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            HealthTier::Excellent => Color::Green,
            HealthTier::Good => Color::Yellow,
            HealthTier::Fair => Color::Magenta,
            HealthTier::Poor | HealthTier::Critical => Color::Red,
        }
    }
}

fn charge_color(percent: u8) -> Color {
    match percent {
        80.. => Color::Green,
        50..=79 => Color::Yellow,
        20..=49 => Color::Magenta,
        _ => Color::Red,
    }
}

pub fn banner(version: &str) -> String {
    format!("{}\n           JuiceCheck v{}\n", BANNER, version)
}

pub fn render_basic(status: &BasicStatus, painter: Painter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Basic Battery Status ===");
    let _ = writeln!(
        out,
        "{}",
        painter.paint(
            format!("Charge: {}%", status.percent),
            charge_color(status.percent)
        )
    );

    let (plug_text, plug_color) = if status.plugged {
        ("Yes", Color::Green)
    } else {
        ("No", Color::Yellow)
    };
    let _ = writeln!(
        out,
        "{}",
        painter.paint(format!("Plugged In: {}", plug_text), plug_color)
    );
    let _ = writeln!(
        out,
        "{}",
        painter.paint(
            format!("Estimated Runtime: {}", status.runtime_formatted()),
            Color::Cyan
        )
    );

    out
}

fn report_lines(report: &BatteryReport) -> Vec<(&'static str, &str, Color)> {
    let mut lines = vec![
        ("Battery Name", report.name.as_str(), Color::Cyan),
        ("Current Charge", report.estimated_charge.as_str(), Color::Green),
        ("Design Voltage", report.voltage.as_str(), Color::Blue),
        ("Battery Status", report.status.as_str(), Color::Yellow),
        ("Battery Chemistry", report.chemistry.as_str(), Color::Magenta),
        ("Estimated Runtime", report.estimated_runtime.as_str(), Color::Cyan),
        ("Design Capacity", report.design_capacity.as_str(), Color::White),
        (
            "Full Charge Capacity",
            report.full_charge_capacity.as_str(),
            Color::White,
        ),
        ("Battery Health", report.health.as_str(), Color::Green),
    ];

    if let Some(cycles) = &report.cycle_count {
        lines.push(("Charge Cycles", cycles.as_str(), Color::Blue));
    }
    if let Some(temperature) = &report.temperature {
        lines.push(("Temperature", temperature.as_str(), Color::Cyan));
    }

    lines
}

/// The advanced block, or the acquisition error in place of it.
pub fn render_advanced(info: &AdvancedInfo, painter: Painter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Advanced Battery Information ===");

    let report = match info {
        AdvancedInfo::Error { error } => {
            let _ = writeln!(out, "{}", painter.paint(format!("Error: {}", error), Color::Red));
            return out;
        }
        AdvancedInfo::Report(report) => report,
    };

    for (label, value, color) in report_lines(report) {
        let _ = writeln!(out, "{}", painter.paint(format!("{}: {}", label, value), color));
    }

    if let Some(health) = report.health_percent {
        let tier = HealthTier::from_percent(health);
        let _ = writeln!(out);
        let _ = writeln!(out, "=== Health Assessment ===");
        let _ = writeln!(
            out,
            "{}",
            painter.paint(format!("{} - {}", tier.label(), tier.advice()), tier.color())
        );
    }

    out
}

/// Low-charge and low-health warnings.
pub fn alerts(status: &BasicStatus, info: &AdvancedInfo, thresholds: &AlertConfig) -> Vec<String> {
    let mut messages = Vec::new();

    if status.percent <= thresholds.critical_charge {
        messages.push(format!("CRITICAL: Battery at {}%!", status.percent));
    } else if status.percent <= thresholds.low_charge {
        messages.push(format!("WARNING: Battery low at {}%", status.percent));
    }

    if let Some(health) = info.report().and_then(|r| r.health_percent) {
        if health < thresholds.health_warning {
            messages.push(format!(
                "WARNING: Battery health is {:.1}% - Consider replacement",
                health
            ));
        }
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use juicecheck_report::{normalize, RawBatteryFields};
    use pretty_assertions::assert_eq;

    fn status(percent: u8, plugged: bool) -> BasicStatus {
        BasicStatus {
            percent,
            plugged,
            secsleft: None,
        }
    }

    fn advanced(design: u32, full: u32) -> AdvancedInfo {
        AdvancedInfo::Report(normalize(&RawBatteryFields {
            name: Some("BAT0".to_string()),
            design_capacity: Some(design),
            full_charge_capacity: Some(full),
            cycle_count: Some(120),
            ..Default::default()
        }))
    }

    #[test]
    fn test_health_tiers() {
        assert_eq!(HealthTier::from_percent(95.0), HealthTier::Excellent);
        assert_eq!(HealthTier::from_percent(90.0), HealthTier::Excellent);
        assert_eq!(HealthTier::from_percent(89.9), HealthTier::Good);
        assert_eq!(HealthTier::from_percent(70.0), HealthTier::Fair);
        assert_eq!(HealthTier::from_percent(60.0), HealthTier::Poor);
        assert_eq!(HealthTier::from_percent(59.9), HealthTier::Critical);
        assert_eq!(HealthTier::from_percent(120.0), HealthTier::Excellent);
    }

    #[test]
    fn test_charge_colors() {
        assert_eq!(charge_color(100), Color::Green);
        assert_eq!(charge_color(79), Color::Yellow);
        assert_eq!(charge_color(20), Color::Magenta);
        assert_eq!(charge_color(19), Color::Red);
    }

    #[test]
    fn test_render_basic_plain() {
        let out = render_basic(&status(42, true), Painter::plain());

        assert_eq!(
            out,
            "=== Basic Battery Status ===\nCharge: 42%\nPlugged In: Yes\nEstimated Runtime: Unknown\n"
        );
    }

    #[test]
    fn test_render_advanced_with_assessment() {
        let out = render_advanced(&advanced(50000, 41000), Painter::plain());

        assert!(out.contains("Battery Name: BAT0\n"));
        assert!(out.contains("Battery Health: 82.0%\n"));
        assert!(out.contains("Charge Cycles: 120 cycles\n"));
        assert!(!out.contains("Temperature"));
        assert!(out.ends_with("=== Health Assessment ===\nGood - Battery health is acceptable\n"));
    }

    #[test]
    fn test_render_advanced_error_only() {
        let info = AdvancedInfo::Error {
            error: "no battery found".to_string(),
        };
        let out = render_advanced(&info, Painter::plain());

        assert_eq!(
            out,
            "=== Advanced Battery Information ===\nError: no battery found\n"
        );
    }

    #[test]
    fn test_render_without_health_skips_assessment() {
        let info = AdvancedInfo::Report(normalize(&RawBatteryFields::default()));
        let out = render_advanced(&info, Painter::plain());

        assert!(out.contains("Battery Health: Unable to calculate"));
        assert!(!out.contains("Health Assessment"));
    }

    #[test]
    fn test_alerts() {
        let thresholds = AlertConfig::default();

        assert_eq!(
            alerts(&status(8, false), &advanced(50000, 35000), &thresholds),
            vec![
                "CRITICAL: Battery at 8%!".to_string(),
                "WARNING: Battery health is 70.0% - Consider replacement".to_string(),
            ]
        );
        assert_eq!(
            alerts(&status(20, false), &advanced(50000, 48000), &thresholds),
            vec!["WARNING: Battery low at 20%".to_string()]
        );
        assert!(alerts(&status(55, true), &advanced(50000, 48000), &thresholds).is_empty());
    }

    #[test]
    fn test_alerts_ignore_error_record() {
        let info = AdvancedInfo::Error {
            error: "unsupported platform".to_string(),
        };
        assert!(alerts(&status(90, true), &info, &AlertConfig::default()).is_empty());
    }
}
