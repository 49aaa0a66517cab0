//! Typed results for unreliable data sources and the capacity fallback chain.

use std::fmt;

use tracing::{debug, warn};

/// Outcome of a single query against one data source.
///
/// Sources never raise: a missing property, an API error or a failed
/// subprocess all end up here so the caller can keep going.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceResult<T> {
    /// The source produced a usable value.
    Found(T),
    /// The source answered but had nothing usable.
    Empty,
    /// The source could not be queried.
    Failed(String),
}

impl<T> SourceResult<T> {
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => SourceResult::Found(v),
            None => SourceResult::Empty,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SourceResult<U> {
        match self {
            SourceResult::Found(v) => SourceResult::Found(f(v)),
            SourceResult::Empty => SourceResult::Empty,
            SourceResult::Failed(reason) => SourceResult::Failed(reason),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> SourceResult<U>) -> SourceResult<U> {
        match self {
            SourceResult::Found(v) => f(v),
            SourceResult::Empty => SourceResult::Empty,
            SourceResult::Failed(reason) => SourceResult::Failed(reason),
        }
    }
}

impl<T, E: fmt::Display> From<Result<Option<T>, E>> for SourceResult<T> {
    fn from(result: Result<Option<T>, E>) -> Self {
        match result {
            Ok(value) => SourceResult::from_option(value),
            Err(e) => SourceResult::Failed(e.to_string()),
        }
    }
}

/// Which capacity fields a source is asked for (or ended up filling).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wanted {
    pub design: bool,
    pub full: bool,
}

impl Wanted {
    pub const BOTH: Wanted = Wanted {
        design: true,
        full: true,
    };

    pub fn any(&self) -> bool {
        self.design || self.full
    }
}

impl fmt::Display for Wanted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.design, self.full) {
            (true, true) => write!(f, "design + full"),
            (true, false) => write!(f, "design"),
            (false, true) => write!(f, "full"),
            (false, false) => write!(f, "nothing"),
        }
    }
}

/// Design and full-charge capacity in mWh, either of which may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityReading {
    pub design: Option<u32>,
    pub full: Option<u32>,
}

impl CapacityReading {
    pub fn is_complete(&self) -> bool {
        self.design.is_some() && self.full.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.design.is_none() && self.full.is_none()
    }

    pub fn missing(&self) -> Wanted {
        Wanted {
            design: self.design.is_none(),
            full: self.full.is_none(),
        }
    }

    /// Fill still-missing fields from `other`, ignoring zeros.
    ///
    /// Fields that are already set are never overwritten. Returns the fields
    /// that were filled.
    pub fn absorb(&mut self, other: CapacityReading) -> Wanted {
        let mut filled = Wanted::default();

        if self.design.is_none() {
            if let Some(value) = other.design.filter(|v| *v > 0) {
                self.design = Some(value);
                filled.design = true;
            }
        }
        if self.full.is_none() {
            if let Some(value) = other.full.filter(|v| *v > 0) {
                self.full = Some(value);
                filled.full = true;
            }
        }

        filled
    }
}

impl SourceResult<CapacityReading> {
    /// Merge two independent per-field queries into one reading.
    ///
    /// Found if either side found a value; failed only if nothing was found
    /// and at least one side failed.
    pub fn from_fields(design: SourceResult<u32>, full: SourceResult<u32>) -> Self {
        let mut failures = Vec::new();
        let mut reading = CapacityReading::default();

        match design {
            SourceResult::Found(v) => reading.design = Some(v),
            SourceResult::Failed(reason) => failures.push(format!("design: {}", reason)),
            SourceResult::Empty => {}
        }
        match full {
            SourceResult::Found(v) => reading.full = Some(v),
            SourceResult::Failed(reason) => failures.push(format!("full: {}", reason)),
            SourceResult::Empty => {}
        }

        if !reading.is_empty() {
            SourceResult::Found(reading)
        } else if !failures.is_empty() {
            SourceResult::Failed(failures.join("; "))
        } else {
            SourceResult::Empty
        }
    }
}

/// One step in the capacity fallback chain.
pub trait CapacitySource {
    /// Short identifier used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Query the fields in `wanted`. Fields not asked for may be left empty.
    fn read(&self, wanted: Wanted) -> SourceResult<CapacityReading>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// The source filled at least one missing field.
    Filled(Wanted),
    /// Nothing usable for the missing fields.
    Empty,
    Failed(String),
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptOutcome::Filled(fields) => write!(f, "filled {}", fields),
            AttemptOutcome::Empty => write!(f, "empty"),
            AttemptOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Record of one source invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceAttempt {
    pub source: &'static str,
    pub asked: Wanted,
    pub outcome: AttemptOutcome,
}

/// Walk `sources` in priority order until both capacities are known.
///
/// Each field takes the first positive value any source offers. Sources
/// after the point where both fields are resolved are never invoked.
pub fn resolve_capacity(
    sources: &[Box<dyn CapacitySource + '_>],
) -> (CapacityReading, Vec<SourceAttempt>) {
    let mut reading = CapacityReading::default();
    let mut attempts = Vec::with_capacity(sources.len());

    for source in sources {
        if reading.is_complete() {
            break;
        }

        let asked = reading.missing();
        let outcome = match source.read(asked) {
            SourceResult::Found(found) => {
                let filled = reading.absorb(found);
                if filled.any() {
                    AttemptOutcome::Filled(filled)
                } else {
                    AttemptOutcome::Empty
                }
            }
            SourceResult::Empty => AttemptOutcome::Empty,
            SourceResult::Failed(reason) => {
                warn!(source = source.name(), %reason, "capacity source failed");
                AttemptOutcome::Failed(reason)
            }
        };

        debug!(source = source.name(), asked = %asked, outcome = %outcome, "capacity source queried");
        attempts.push(SourceAttempt {
            source: source.name(),
            asked,
            outcome,
        });
    }

    (reading, attempts)
}
