//! Bulletin timestamps.
//!
//! The agency publishes mid-range bulletins twice a day, at 06:00 and 18:00
//! local time. Every request must name the latest bulletin that already
//! exists at the wall-clock time of the request.

use chrono::{Days, Local, NaiveDate, NaiveDateTime, Timelike};

/// The two daily publication slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Morning,
    Evening,
}

impl Slot {
    pub fn hhmm(self) -> &'static str {
        match self {
            Slot::Morning => "0600",
            Slot::Evening => "1800",
        }
    }
}

/// A concrete bulletin: publication date plus slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bulletin {
    pub date: NaiveDate,
    pub slot: Slot,
}

impl Bulletin {
    /// Latest bulletin published at or before `now`:
    /// hour >= 18 → today's 18:00, hour >= 6 → today's 06:00,
    /// otherwise yesterday's 18:00.
    pub fn latest_at(now: NaiveDateTime) -> Self {
        let hour = now.hour();
        if hour >= 18 {
            Self {
                date: now.date(),
                slot: Slot::Evening,
            }
        } else if hour >= 6 {
            Self {
                date: now.date(),
                slot: Slot::Morning,
            }
        } else {
            Self {
                date: now.date().checked_sub_days(Days::new(1)).unwrap_or(now.date()),
                slot: Slot::Evening,
            }
        }
    }

    /// Latest bulletin as of the current local time.
    pub fn latest() -> Self {
        Self::latest_at(Local::now().naive_local())
    }

    /// The `tmFc` request parameter, `YYYYMMDDHHmm`.
    pub fn tm_fc(&self) -> String {
        format!("{}{}", self.date.format("%Y%m%d"), self.slot.hhmm())
    }

    /// First forecast day covered by this bulletin: the 06:00 bulletin
    /// starts at day 4, the 18:00 bulletin one day later at day 5.
    pub fn start_day(&self) -> u8 {
        match self.slot {
            Slot::Morning => 4,
            Slot::Evening => 5,
        }
    }
}
