//! Capacity from the operating system's generated battery report.

use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};

use regex::Regex;
use tracing::debug;

use crate::source::{CapacityReading, CapacitySource, SourceResult, Wanted};

pub const DEFAULT_REPORT_TIMEOUT: Duration = Duration::from_secs(15);

const REPORT_PROGRAM: &str = "powercfg";
const REPORT_FILE_NAME: &str = "battery-report.html";
const POLL_INTERVAL: Duration = Duration::from_millis(50);

static MARKUP: OnceLock<Regex> = OnceLock::new();
static DESIGN: OnceLock<Regex> = OnceLock::new();
static FULL: OnceLock<Regex> = OnceLock::new();

fn markup() -> &'static Regex {
    MARKUP.get_or_init(|| Regex::new(r"<[^>]*>|&nbsp;").expect("markup pattern is valid"))
}

fn capacity_pattern(cell: &'static OnceLock<Regex>, label: &str) -> &'static Regex {
    cell.get_or_init(|| {
        let pattern = format!(
            r"(?i){}\s*([0-9][0-9,.\x{{00A0}}\x{{202F}} ]*?)\s*mWh",
            label
        );
        Regex::new(&pattern).expect("capacity pattern is valid")
    })
}

fn extract_capacity(text: &str, re: &Regex) -> Option<u32> {
    re.captures_iter(text).find_map(|caps| {
        let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
        digits.parse::<u32>().ok().filter(|v| *v > 0)
    })
}

/// Find the design and full-charge capacities in a battery report.
///
/// Markup is stripped first; numbers may use `,`, `.` or a non-breaking
/// space as thousands separators depending on the system locale.
pub fn parse_energy_report(report: &str) -> CapacityReading {
    let text = markup().replace_all(report, " ");

    CapacityReading {
        design: extract_capacity(&text, capacity_pattern(&DESIGN, r"design\s+capacity")),
        full: extract_capacity(
            &text,
            capacity_pattern(&FULL, r"full\s+charge\s+capacity"),
        ),
    }
}

/// Runs the report command into a private temporary directory and parses it.
///
/// The directory is removed when the read finishes, whatever the outcome.
pub struct EnergyReportSource {
    program: String,
    timeout: Duration,
}

impl EnergyReportSource {
    pub fn new(timeout: Duration) -> Self {
        Self::with_program(REPORT_PROGRAM, timeout)
    }

    pub fn with_program(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn generate(&self, output: &Path) -> Result<(), String> {
        let mut child = Command::new(&self.program)
            .arg("/batteryreport")
            .arg("/output")
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("failed to start {}: {}", self.program, e))?;

        let start = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) if status.success() => return Ok(()),
                Ok(Some(status)) => return Err(format!("{} exited with {}", self.program, status)),
                Ok(None) => {
                    if start.elapsed() >= self.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(format!(
                            "{} timed out after {}s",
                            self.program,
                            self.timeout.as_secs()
                        ));
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => return Err(format!("failed to wait for {}: {}", self.program, e)),
            }
        }
    }

    fn fetch(&self) -> Result<String, String> {
        let dir = tempfile::Builder::new()
            .prefix("juicecheck-")
            .tempdir()
            .map_err(|e| format!("failed to create report directory: {}", e))?;
        let output = dir.path().join(REPORT_FILE_NAME);

        self.generate(&output)?;

        let bytes = fs::read(&output).map_err(|e: io::Error| {
            format!("failed to read {}: {}", output.display(), e)
        })?;
        debug!(path = %output.display(), bytes = bytes.len(), "battery report generated");

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl CapacitySource for EnergyReportSource {
    fn name(&self) -> &'static str {
        "battery-report"
    }

    fn read(&self, _wanted: Wanted) -> SourceResult<CapacityReading> {
        match self.fetch() {
            Ok(report) => {
                let reading = parse_energy_report(&report);
                if reading.is_empty() {
                    SourceResult::Empty
                } else {
                    SourceResult::Found(reading)
                }
            }
            Err(reason) => SourceResult::Failed(reason),
        }
    }
}
