//! Basic charge/plug/runtime status, available on every supported OS.

use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};
use starship_battery::units::ratio::percent;
use starship_battery::units::time::second;
use starship_battery::{Manager, State};

/// Point-in-time charge status of the first battery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicStatus {
    /// Charge level, 0-100.
    pub percent: u8,

    /// Whether external power is connected.
    pub plugged: bool,

    /// Seconds until empty. `None` when plugged in or the OS has no estimate.
    pub secsleft: Option<u64>,
}

impl BasicStatus {
    pub fn from_parts(charge_percent: f32, plugged: bool, secs_to_empty: Option<f32>) -> Self {
        let secsleft = if plugged {
            None
        } else {
            secs_to_empty.filter(|s| *s > 0.0).map(|s| s as u64)
        };

        Self {
            percent: charge_percent.round().clamp(0.0, 100.0) as u8,
            plugged,
            secsleft,
        }
    }

    /// Format the runtime estimate as `"Xh Ym"`, `"Ym"` or `"Unknown"`.
    pub fn runtime_formatted(&self) -> String {
        match self.secsleft.filter(|s| *s > 0) {
            Some(secs) => {
                let hours = secs / 3600;
                let mins = (secs % 3600) / 60;
                if hours > 0 {
                    format!("{}h {}m", hours, mins)
                } else {
                    format!("{}m", mins)
                }
            }
            None => "Unknown".to_string(),
        }
    }
}

/// Read the first battery's basic status. `Ok(None)` when there is no battery.
pub fn read_basic_status() -> Result<Option<BasicStatus>> {
    let manager = Manager::new()?;
    let Some(battery) = manager.batteries()?.next() else {
        return Ok(None);
    };
    let battery = battery?;

    Ok(Some(BasicStatus::from_parts(
        battery.state_of_charge().get::<percent>(),
        is_plugged_in(battery.state()),
        battery.time_to_empty().map(|t| t.get::<second>()),
    )))
}

/// Charging and full both mean external power; an unknown state does not.
fn is_plugged_in(state: State) -> bool {
    matches!(state, State::Charging | State::Full)
}
