//! Domain primitives, pure analytics, and ports.
//!
//! Purpose: define strongly typed study-space entities, the pure
//! derived-metrics functions that operate on them, and the port traits the
//! boundary layer implements. Keep types immutable and document invariants
//! and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — transport-agnostic error payload.
//! - [`CheckIn`] / [`StudySpace`] — validated domain entities.
//! - [`analytics`] — the occupancy scorer, peak-time analyzer, and
//!   utilization aggregator.
//! - [`ports`] — driven store-adapter ports and the driving analytics port.
//! - [`AnalyticsQueryService`] — service wiring ports, clock, and engine.

pub mod analytics;
mod analytics_service;
pub mod checkin;
pub mod error;
pub mod ports;
pub mod space;

pub use self::analytics::{
    AnalyticsConfig, NoiseDistribution, OccupancySnapshot, PeakTimeRecord, UtilizationRecord,
};
pub use self::analytics_service::AnalyticsQueryService;
pub use self::checkin::{
    CheckIn, CheckInDraft, CheckInId, CheckInValidationError, CrowdingLevel, NoiseLevel,
    OutletAvailability,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::space::{SpaceId, SpaceValidationError, StudySpace, StudySpaceDraft};
