//! # Fermentation Schedule
//!
//! Splits the total fermentation time into a room-temperature bulk stage and
//! a refrigerated cold retard. Direct doughs and poolish final doughs use
//! separate tier tables; a poolish dough has already fermented once, so it
//! moves to the fridge sooner.
//!
//! ```text
//!               all bulk     2h bulk + cold     capped bulk + cold
//! Direct        ≤ 8h         ≤ 16h              min(4, round(h × 0.1))
//! Poolish       ≤ 6h         ≤ 12h              min(3, round(h × 0.1))
//! ```

use serde::{Deserialize, Serialize};

use crate::params::Preferment;

/// Bulk / cold split of the total fermentation time.
///
/// `bulk_hours + cold_hours` always equals the requested total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FermentationSchedule {
    pub bulk_hours: u32,
    /// Zero when the whole fermentation happens at room temperature
    pub cold_hours: u32,
    pub note: String,
}

impl FermentationSchedule {
    pub fn total_hours(&self) -> u32 {
        self.bulk_hours + self.cold_hours
    }

    pub fn has_cold_stage(&self) -> bool {
        self.cold_hours > 0
    }
}

/// Tier boundaries for one preferment kind
struct ScheduleTiers {
    /// Up to this many hours, everything is bulk
    all_bulk_max: u32,
    /// Up to this many hours, a fixed short bulk precedes the cold stage
    short_split_max: u32,
    short_split_bulk: u32,
    /// Longer ferments use 10% of the total as bulk, capped here
    long_bulk_cap: u32,
    all_bulk_note: &'static str,
}

const DIRECT_TIERS: ScheduleTiers = ScheduleTiers {
    all_bulk_max: 8,
    short_split_max: 16,
    short_split_bulk: 2,
    long_bulk_cap: 4,
    all_bulk_note: "Room temperature bulk ferment only",
};

const POOLISH_TIERS: ScheduleTiers = ScheduleTiers {
    all_bulk_max: 6,
    short_split_max: 12,
    short_split_bulk: 2,
    long_bulk_cap: 3,
    all_bulk_note: "Room temperature bulk ferment after mixing",
};

impl ScheduleTiers {
    fn for_preferment(preferment: Preferment) -> &'static ScheduleTiers {
        match preferment {
            Preferment::Direct => &DIRECT_TIERS,
            Preferment::Poolish => &POOLISH_TIERS,
        }
    }

    fn bulk_hours(&self, total_hours: u32) -> u32 {
        if total_hours <= self.all_bulk_max {
            total_hours
        } else if total_hours <= self.short_split_max {
            self.short_split_bulk
        } else {
            let tenth = (total_hours as f64 * 0.1).round() as u32;
            self.long_bulk_cap.min(tenth)
        }
    }
}

/// Choose the bulk / cold split for a dough.
///
/// `temp_c` does not move the tier boundaries; temperature is already folded
/// into the yeast dose.
pub fn schedule(total_hours: u32, temp_c: f64, preferment: Preferment) -> FermentationSchedule {
    let tiers = ScheduleTiers::for_preferment(preferment);
    let bulk_hours = tiers.bulk_hours(total_hours).min(total_hours);
    let cold_hours = total_hours - bulk_hours;

    let note = if cold_hours == 0 {
        tiers.all_bulk_note.to_string()
    } else {
        format!("{}h room temp bulk → {}h cold proof in fridge", bulk_hours, cold_hours)
    };

    tracing::debug!(total_hours, temp_c, ?preferment, bulk_hours, cold_hours, "fermentation schedule");

    FermentationSchedule {
        bulk_hours,
        cold_hours,
        note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_tiers() {
        let short = schedule(8, 22.0, Preferment::Direct);
        assert_eq!((short.bulk_hours, short.cold_hours), (8, 0));
        assert_eq!(short.note, "Room temperature bulk ferment only");
        assert!(!short.has_cold_stage());

        let mid = schedule(16, 22.0, Preferment::Direct);
        assert_eq!((mid.bulk_hours, mid.cold_hours), (2, 14));
        assert_eq!(mid.note, "2h room temp bulk → 14h cold proof in fridge");

        let long = schedule(24, 22.0, Preferment::Direct);
        assert_eq!((long.bulk_hours, long.cold_hours), (2, 22));

        // 10% of 72h is 7.2h, capped at 4
        let very_long = schedule(72, 22.0, Preferment::Direct);
        assert_eq!((very_long.bulk_hours, very_long.cold_hours), (4, 68));
    }

    #[test]
    fn test_poolish_tiers() {
        let short = schedule(6, 22.0, Preferment::Poolish);
        assert_eq!((short.bulk_hours, short.cold_hours), (6, 0));
        assert_eq!(short.note, "Room temperature bulk ferment after mixing");

        let mid = schedule(7, 22.0, Preferment::Poolish);
        assert_eq!((mid.bulk_hours, mid.cold_hours), (2, 5));

        let long = schedule(13, 22.0, Preferment::Poolish);
        assert_eq!((long.bulk_hours, long.cold_hours), (1, 12));

        let very_long = schedule(48, 22.0, Preferment::Poolish);
        assert_eq!((very_long.bulk_hours, very_long.cold_hours), (3, 45));
    }

    #[test]
    fn test_bulk_plus_cold_equals_total() {
        for preferment in Preferment::ALL {
            for total in 2..=72 {
                let s = schedule(total, 20.0, preferment);
                assert_eq!(s.total_hours(), total, "{:?} {}h", preferment, total);
            }
        }
    }

    #[test]
    fn test_temperature_does_not_change_split() {
        for total in [4, 12, 30] {
            assert_eq!(
                schedule(total, 4.0, Preferment::Direct),
                schedule(total, 35.0, Preferment::Direct)
            );
        }
    }
}
