//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, TreeLoader)
//! but are themselves concrete structs, not traits.

mod translate;

pub use translate::{TranslateReport, TranslateService};
