//! Battery data acquisition for juicecheck.
//!
//! This crate queries the operating system for battery capacity and health
//! through an ordered chain of independent, unreliable sources and merges
//! their partial answers into one [`RawBatteryFields`] record.
//!
//! # Features
//!
//! - `windows` - Enable the WMI backend (the only backend with advanced data)
//!
//! # Example
//!
//! ```ignore
//! use juicecheck_platform::{acquire, AcquireOptions};
//!
//! match acquire(&AcquireOptions::default()) {
//!     Ok(acquisition) => println!("{:?}", acquisition.fields.design_capacity),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

mod basic;
mod energy_report;
mod engine;
mod property;
mod source;

pub use basic::{read_basic_status, BasicStatus};
pub use energy_report::{parse_energy_report, EnergyReportSource, DEFAULT_REPORT_TIMEOUT};
pub use engine::{
    AcquireError, Acquisition, AcquisitionEngine, BatteryBackend, PrimaryBattery,
    UnsupportedBackend,
};
pub use property::{
    classify_capacity_properties, first_count, first_positive, PropertyBag, PropertyValue,
};
pub use source::{
    resolve_capacity, AttemptOutcome, CapacityReading, CapacitySource, SourceAttempt,
    SourceResult, Wanted,
};

pub use juicecheck_report::RawBatteryFields;

#[cfg(windows)]
#[cfg(feature = "windows")]
pub mod windows;

use std::time::Duration;

/// Knobs for a single acquisition run.
#[derive(Debug, Clone)]
pub struct AcquireOptions {
    /// Upper bound on the external battery report command.
    pub report_timeout: Duration,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            report_timeout: DEFAULT_REPORT_TIMEOUT,
        }
    }
}

/// Run the acquisition engine against this host's backend.
pub fn acquire(options: &AcquireOptions) -> Result<Acquisition, AcquireError> {
    #[cfg(all(windows, feature = "windows"))]
    {
        AcquisitionEngine::new(windows::WmiBackend::connect(options)).acquire()
    }

    #[cfg(not(all(windows, feature = "windows")))]
    {
        let _ = options;
        AcquisitionEngine::new(UnsupportedBackend).acquire()
    }
}
