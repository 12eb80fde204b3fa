//! Metrics collection.
//!
//! # Metrics
//! - `deeplink_registrations_total` (counter): registrations by slot, outcome
//! - `deeplink_unregistrations_total` (counter): unregistrations by slot, outcome
//! - `deeplink_resolutions_total` (counter): resolutions by slot, outcome
//! - `deeplink_routes` (gauge): patterns currently carrying a payload

use crate::routing::table::Slot;

/// Outcome of a resolution, as reported in metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// A node matched and the requested slot is filled.
    Hit,
    /// A node matched but the requested slot is empty.
    EmptySlot,
    /// No registered pattern matched.
    Miss,
}

impl ResolutionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionOutcome::Hit => "hit",
            ResolutionOutcome::EmptySlot => "empty_slot",
            ResolutionOutcome::Miss => "miss",
        }
    }
}

pub fn record_registration(slot: Slot, accepted: bool) {
    let outcome = if accepted { "accepted" } else { "rejected" };
    metrics::counter!(
        "deeplink_registrations_total",
        "slot" => slot.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_unregistration(slot: Slot, found: bool) {
    let outcome = if found { "cleared" } else { "not_found" };
    metrics::counter!(
        "deeplink_unregistrations_total",
        "slot" => slot.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_resolution(slot: Slot, outcome: ResolutionOutcome) {
    metrics::counter!(
        "deeplink_resolutions_total",
        "slot" => slot.as_str(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

pub fn record_route_count(count: usize) {
    metrics::gauge!("deeplink_routes").set(count as f64);
}
