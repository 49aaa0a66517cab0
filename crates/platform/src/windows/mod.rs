//! Windows backend built on WMI.

mod battery;
mod sources;

pub use battery::WmiBackend;
