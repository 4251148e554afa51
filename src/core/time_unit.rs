use std::fmt;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};

const DAY_MS: f64 = 86_400_000.0;

/// Calendar units a realtime axis can tick on, ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

/// Static description of a unit: whether auto selection may pick it, its
/// nominal size and the step multiples allowed for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitInterval {
    pub common: bool,
    pub size_ms: f64,
    pub steps: Option<&'static [u32]>,
}

impl TimeUnit {
    pub const ALL: [Self; 9] = [
        Self::Millisecond,
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::Year,
    ];

    #[must_use]
    pub const fn interval(self) -> UnitInterval {
        match self {
            Self::Millisecond => UnitInterval {
                common: true,
                size_ms: 1.0,
                steps: Some(&[1, 2, 5, 10, 20, 50, 100, 250, 500]),
            },
            Self::Second => UnitInterval {
                common: true,
                size_ms: 1_000.0,
                steps: Some(&[1, 2, 5, 10, 15, 30]),
            },
            Self::Minute => UnitInterval {
                common: true,
                size_ms: 60_000.0,
                steps: Some(&[1, 2, 5, 10, 15, 30]),
            },
            Self::Hour => UnitInterval {
                common: true,
                size_ms: 3_600_000.0,
                steps: Some(&[1, 2, 3, 6, 12]),
            },
            Self::Day => UnitInterval {
                common: true,
                size_ms: DAY_MS,
                steps: Some(&[1, 2, 5]),
            },
            Self::Week => UnitInterval {
                common: false,
                size_ms: 604_800_000.0,
                steps: Some(&[1, 2, 3, 4]),
            },
            Self::Month => UnitInterval {
                common: true,
                size_ms: 2.628e9,
                steps: Some(&[1, 2, 3]),
            },
            Self::Quarter => UnitInterval {
                common: false,
                size_ms: 7.884e9,
                steps: Some(&[1, 2, 3, 4]),
            },
            Self::Year => UnitInterval {
                common: true,
                size_ms: 3.154e10,
                steps: None,
            },
        }
    }

    #[must_use]
    pub const fn size_ms(self) -> f64 {
        self.interval().size_ms
    }

    #[must_use]
    pub const fn is_common(self) -> bool {
        self.interval().common
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|unit| *unit == self)
            .unwrap_or(Self::ALL.len() - 1)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Millisecond => "millisecond",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Floors `time` (epoch ms, UTC) to the start of the unit containing it.
    ///
    /// Weeks start on Sunday; use [`start_of_week`] for another first weekday.
    #[must_use]
    pub fn start_of(self, time: f64) -> f64 {
        match self {
            Self::Millisecond => time.floor(),
            Self::Second | Self::Minute | Self::Hour | Self::Day => {
                floor_to_multiple(time, self.size_ms())
            }
            Self::Week => start_of_week(time, Weekday::Sun),
            Self::Month | Self::Quarter | Self::Year => start_of_calendar(self, time),
        }
    }

    /// Adds `amount` units to `time`, month-based units following the calendar.
    #[must_use]
    pub fn add(self, time: f64, amount: i64) -> f64 {
        let months = match self {
            Self::Month => amount,
            Self::Quarter => amount.saturating_mul(3),
            Self::Year => amount.saturating_mul(12),
            _ => return time + amount as f64 * self.size_ms(),
        };
        add_months(time, months).unwrap_or(time + amount as f64 * self.size_ms())
    }

    /// Whole units between `earlier` and `later`, truncated toward zero.
    #[must_use]
    pub fn diff(self, later: f64, earlier: f64) -> f64 {
        let per_month = match self {
            Self::Month => 1,
            Self::Quarter => 3,
            Self::Year => 12,
            _ => return ((later - earlier) / self.size_ms()).trunc(),
        };
        match month_diff(later, earlier) {
            Some(months) => (months / per_month) as f64,
            None => ((later - earlier) / self.size_ms()).trunc(),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps an ISO weekday number (1 = Monday ... 7 = Sunday) to a chrono weekday.
#[must_use]
pub fn iso_weekday(number: u8) -> Option<Weekday> {
    match number {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Floors `time` to midnight of the most recent `first_day` (inclusive).
#[must_use]
pub fn start_of_week(time: f64, first_day: Weekday) -> f64 {
    let day = floor_to_multiple(time, DAY_MS);
    let Some(date) = unix_millis_to_datetime(day) else {
        return day;
    };
    let back = (date.weekday().num_days_from_monday() + 7 - first_day.num_days_from_monday()) % 7;
    day - f64::from(back) * DAY_MS
}

fn floor_to_multiple(time: f64, size: f64) -> f64 {
    (time / size).floor() * size
}

fn start_of_calendar(unit: TimeUnit, time: f64) -> f64 {
    let Some(date) = unix_millis_to_datetime(time) else {
        return floor_to_multiple(time, unit.size_ms());
    };
    let month = match unit {
        TimeUnit::Quarter => (date.month0() / 3) * 3 + 1,
        TimeUnit::Year => 1,
        _ => date.month(),
    };
    NaiveDate::from_ymd_opt(date.year(), month, 1)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|start| datetime_to_unix_millis(start.and_utc()))
        .unwrap_or_else(|| floor_to_multiple(time, unit.size_ms()))
}

fn add_months(time: f64, months: i64) -> Option<f64> {
    let date = unix_millis_to_datetime(time)?;
    let fraction = time - time.floor();
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    let shifted = if months >= 0 {
        date.checked_add_months(magnitude)?
    } else {
        date.checked_sub_months(magnitude)?
    };
    Some(datetime_to_unix_millis(shifted) + fraction)
}

fn month_diff(later: f64, earlier: f64) -> Option<i64> {
    let to = unix_millis_to_datetime(later)?;
    let from = unix_millis_to_datetime(earlier)?;
    let mut months = i64::from(to.year() - from.year()) * 12 + i64::from(to.month())
        - i64::from(from.month());
    let landed = add_months(earlier, months)?;
    if months > 0 && landed > later {
        months -= 1;
    } else if months < 0 && landed < later {
        months += 1;
    }
    Some(months)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc, Weekday};

    use super::{TimeUnit, start_of_week};
    use crate::core::primitives::datetime_to_unix_millis;

    fn utc_ms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> f64 {
        datetime_to_unix_millis(
            Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
                .single()
                .expect("valid datetime"),
        )
    }

    #[test]
    fn units_are_ordered_finest_first() {
        assert!(TimeUnit::Millisecond < TimeUnit::Second);
        assert!(TimeUnit::Quarter < TimeUnit::Year);
        assert_eq!(TimeUnit::Day.index(), 4);
    }

    #[test]
    fn start_of_fixed_units_floors_in_utc() {
        let t = utc_ms(2024, 3, 14, 15, 9, 26) + 535.0;
        assert_eq!(TimeUnit::Second.start_of(t), utc_ms(2024, 3, 14, 15, 9, 26));
        assert_eq!(TimeUnit::Minute.start_of(t), utc_ms(2024, 3, 14, 15, 9, 0));
        assert_eq!(TimeUnit::Day.start_of(t), utc_ms(2024, 3, 14, 0, 0, 0));
    }

    #[test]
    fn start_of_calendar_units_uses_month_boundaries() {
        let t = utc_ms(2024, 8, 20, 10, 0, 0);
        assert_eq!(TimeUnit::Month.start_of(t), utc_ms(2024, 8, 1, 0, 0, 0));
        assert_eq!(TimeUnit::Quarter.start_of(t), utc_ms(2024, 7, 1, 0, 0, 0));
        assert_eq!(TimeUnit::Year.start_of(t), utc_ms(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn week_start_respects_first_weekday() {
        // 2024-03-14 is a Thursday.
        let t = utc_ms(2024, 3, 14, 12, 0, 0);
        assert_eq!(TimeUnit::Week.start_of(t), utc_ms(2024, 3, 10, 0, 0, 0));
        assert_eq!(start_of_week(t, Weekday::Mon), utc_ms(2024, 3, 11, 0, 0, 0));
        assert_eq!(start_of_week(t, Weekday::Thu), utc_ms(2024, 3, 14, 0, 0, 0));
    }

    #[test]
    fn month_arithmetic_clamps_to_month_end() {
        let jan_31 = utc_ms(2024, 1, 31, 0, 0, 0);
        assert_eq!(TimeUnit::Month.add(jan_31, 1), utc_ms(2024, 2, 29, 0, 0, 0));
        assert_eq!(TimeUnit::Quarter.add(jan_31, 1), utc_ms(2024, 4, 30, 0, 0, 0));
    }

    #[test]
    fn diff_counts_whole_units() {
        assert_eq!(TimeUnit::Second.diff(10_999.0, 0.0), 10.0);
        let from = utc_ms(2024, 1, 15, 0, 0, 0);
        let to = utc_ms(2024, 4, 14, 0, 0, 0);
        assert_eq!(TimeUnit::Month.diff(to, from), 2.0);
        assert_eq!(TimeUnit::Quarter.diff(to, from), 0.0);
    }
}
