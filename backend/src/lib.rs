//! StudySpaces derived-metrics engine.
//!
//! Turns an append-only stream of timestamped study-space check-ins into
//! derived records: a decaying occupancy snapshot per space, the busiest
//! hour bucket per space over a lookback window, and aggregate
//! noise/crowding statistics per space. The engine is pure: it consumes a
//! snapshot of check-ins plus a reference instant and returns values. The
//! boundary layer (routing, persistence, auth) lives behind the port traits
//! in [`domain::ports`].

pub mod domain;
pub mod outbound;
