//! Simulated time and expiry sweep
//!
//! The engine's clock is logical: it starts at construction time and moves
//! only when `advance_time` is called. Advancing sweeps all perishable items
//! and marks the ones whose expiry the new instant has passed.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::AuditAction;
use crate::error::{Result, StowageError};
use crate::stowage::Stowage;

/// The engine's logical clock.
#[derive(Debug, Clone)]
pub struct SimClock {
    current: DateTime<Utc>,
}

impl SimClock {
    /// Start the clock at the given instant.
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        SimClock { current: start }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.current
    }

    /// Move the clock by a (possibly negative, possibly fractional) number
    /// of hours and return the new instant.
    ///
    /// Fails without moving the clock when the delta does not fit in the
    /// representable time range.
    pub fn advance_hours(&mut self, hours: f64) -> Result<DateTime<Utc>> {
        let millis = hours * 3_600_000.0;
        if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
            return Err(StowageError::MalformedInput(format!(
                "hours {hours} is out of range"
            )));
        }
        let advanced = self
            .current
            .checked_add_signed(Duration::milliseconds(millis.round() as i64))
            .ok_or_else(|| {
                StowageError::MalformedInput(format!(
                    "hours {hours} moves the clock out of range"
                ))
            })?;
        self.current = advanced;
        Ok(advanced)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        SimClock::starting_at(Utc::now())
    }
}

/// Parse an expiry date as supplied on item records.
///
/// Accepts RFC 3339, naive ISO datetimes (`2025-01-01T12:00:00`, optional
/// fraction), and bare dates; naive values are taken as UTC. Returns `None`
/// for anything else, and the sweep skips such items.
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// One item touched by an expiry sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedItem {
    pub item_id: String,
    /// Always `"expired"` for the current sweep.
    pub status: String,
    /// Always `"marked"`: the sweep marks items, it never removes them.
    pub action: String,
}

/// Result of an `advance_time` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAdvance {
    pub current_time: DateTime<Utc>,
    pub hours_advanced: f64,
    pub affected_items: Vec<AffectedItem>,
}

impl Stowage {
    /// Advance the simulated clock by `hours` and sweep for expiry.
    ///
    /// An item is marked expired when it is perishable, its expiry date
    /// parses, the new instant strictly exceeds it, and it is not already
    /// expired. The expired status is monotonic: advancing time backwards
    /// never unmarks an item. Emits one `TIME` audit entry per call.
    pub fn advance_time(&mut self, hours: f64) -> Result<TimeAdvance> {
        if !hours.is_finite() {
            let err = StowageError::MalformedInput(format!("hours must be finite, got {hours}"));
            self.audit_failure("Time simulation", &err);
            return Err(err);
        }

        let now = match self.clock.advance_hours(hours) {
            Ok(now) => now,
            Err(err) => {
                self.audit_failure("Time simulation", &err);
                return Err(err);
            }
        };

        let mut affected_items = Vec::new();
        for id in self.store.items.ids().cloned().collect::<Vec<_>>() {
            let item = match self.store.items.get_mut(&id) {
                Some(item) => item,
                None => continue,
            };
            if !item.perishable || item.is_expired() {
                continue;
            }
            let expiry = match item.expiry_date.as_deref().and_then(parse_expiry) {
                Some(expiry) => expiry,
                None => continue,
            };
            if now > expiry {
                item.status = Some("expired".to_string());
                affected_items.push(AffectedItem {
                    item_id: id,
                    status: "expired".to_string(),
                    action: "marked".to_string(),
                });
            }
        }

        self.log.record(
            AuditAction::Time,
            format!("Time advanced by {hours} hours to {}", now.to_rfc3339()),
        );

        Ok(TimeAdvance {
            current_time: now,
            hours_advanced: hours,
            affected_items,
        })
    }
}
