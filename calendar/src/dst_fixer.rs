/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::error::{Error, Result};
use crate::transitions::TransitionTable;
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Whether the clocks are currently following summer (DST) time
/// or winter (standard) time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DstState {
    /// Summer time, one hour ahead of winter time
    Summer,
    /// Winter (i.e., standard) time
    #[default]
    Winter,
}

impl DstState {
    /// The opposite state
    pub fn flip(self) -> Self {
        match self {
            Self::Summer => Self::Winter,
            Self::Winter => Self::Summer,
        }
    }

    /// `1` for summer and `-1` for winter
    pub fn direction(self) -> i32 {
        match self {
            Self::Summer => 1,
            Self::Winter => -1,
        }
    }
}

impl TryFrom<i32> for DstState {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            1 => Ok(Self::Summer),
            -1 => Ok(Self::Winter),
            _ => Err(Error::InvalidDirection { value }),
        }
    }
}

impl FromStr for DstState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "summer" | "1" | "+1" => Ok(Self::Summer),
            "winter" | "-1" => Ok(Self::Winter),
            _ => Err(Error::UnknownState {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DstState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summer => write!(f, "summer"),
            Self::Winter => write!(f, "winter"),
        }
    }
}

/// Removes the Daylight Saving Time jumps from sequences of naive
/// local timestamps, leaving all of them in winter time.
///
/// The sequence is scanned once, against the boundaries of a
/// [`TransitionTable`]. A sample is considered to still be in the
/// current regime while it is not later than the next boundary and it
/// did not go back in time by more than the slack (30 minutes by default).
/// Otherwise, the regime flips. Samples in summer time are moved back
/// by one hour.
///
/// Fall-backs are detected by the clock going backwards, so the data
/// needs to be sampled more often than the slack.
///
/// ```
/// use calendar::{DstFixer, DstState};
/// use chrono::NaiveDateTime;
///
/// let dates: Vec<NaiveDateTime> = [
///     "2018-03-25 01:00:00",
///     "2018-03-25 02:30:00",
///     "2018-03-25 02:50:00",
///     "2018-03-25 04:00:00",
///     "2018-03-25 05:00:00",
/// ]
/// .iter()
/// .map(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
/// .collect();
///
/// let fixed = DstFixer::default().fix(&dates, DstState::Winter).unwrap();
/// assert_eq!(fixed[2], dates[2]);
/// assert_eq!(fixed[3].to_string(), "2018-03-25 03:00:00");
/// assert_eq!(fixed[4].to_string(), "2018-03-25 04:00:00");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DstFixer {
    /// The DST boundaries
    table: TransitionTable,

    /// How far back in time a sample can go before it is
    /// considered to have crossed a boundary
    slack: Duration,

    /// The difference between summer and winter time
    shift: Duration,
}

impl Default for DstFixer {
    fn default() -> Self {
        Self::new(TransitionTable::default())
    }
}

impl DstFixer {
    /// Creates a new fixer with a 30 minutes slack and a one hour shift
    pub fn new(table: TransitionTable) -> Self {
        Self {
            table,
            slack: Duration::minutes(30),
            shift: Duration::hours(1),
        }
    }

    /// Changes the tolerance for samples going back in time
    pub fn with_slack(mut self, slack: Duration) -> Self {
        self.slack = slack;
        self
    }

    /// Changes the difference between summer and winter time
    pub fn with_shift(mut self, shift: Duration) -> Self {
        self.shift = shift;
        self
    }

    /// The table of boundaries used by this fixer
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Returns a copy of `dates` in winter time. `initial` tells whether
    /// the first date is in summer or winter time.
    ///
    /// `dates` are expected to be in chronological order (apart from the
    /// jumps caused by DST itself).
    pub fn fix(&self, dates: &[NaiveDateTime], initial: DstState) -> Result<Vec<NaiveDateTime>> {
        let (first, last) = match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(Error::EmptyInput),
        };

        let mut boundaries = self.table.boundaries_within(first, last);
        let mut fixed = dates.to_vec();
        let mut state = initial;
        let mut last_time = first - Duration::minutes(1);

        // The sample that crossed the latest boundary. It is left as it is
        // until the next sample confirms that a summer period started.
        let mut pending: Option<usize> = None;
        let mut visited = 0;

        for (i, date) in dates.iter().enumerate() {
            let boundary = match boundaries.front() {
                Some(b) => *b,
                None => {
                    debug!(index = i, "no more DST boundaries in range");
                    break;
                }
            };

            if *date <= boundary && *date >= last_time - self.slack {
                if state == DstState::Summer {
                    fixed[i] -= self.shift;
                    if let Some(j) = pending.take() {
                        fixed[j] -= self.shift;
                    }
                }
            } else {
                state = state.flip();
                boundaries.pop_front();
                pending = Some(i);
                debug!(index = i, %date, %boundary, %state, "crossed a DST boundary");
            }

            last_time = *date;
            visited = i + 1;
        }

        // Whatever the scan did not reach is still in the last regime
        if state == DstState::Summer {
            let start = pending.unwrap_or(visited);
            trace!(start, "ending in summer time");
            for date in fixed[start..].iter_mut() {
                *date -= self.shift;
            }
        }

        Ok(fixed)
    }
}

/// Removes DST from `dates` using the default [`TransitionTable`]
pub fn fix_dst(dates: &[NaiveDateTime], initial: DstState) -> Result<Vec<NaiveDateTime>> {
    DstFixer::default().fix(dates, initial)
}

/// Attaches a fixed UTC offset (in hours) to corrected dates.
///
/// ```
/// use calendar::attach_offset;
/// use chrono::NaiveDateTime;
///
/// let d = NaiveDateTime::parse_from_str("2018-03-25 03:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let with_offset = attach_offset(&[d], 2).unwrap();
/// assert_eq!(with_offset[0].to_rfc3339(), "2018-03-25T03:00:00+02:00");
/// ```
pub fn attach_offset(
    dates: &[NaiveDateTime],
    utc_offset_hours: i32,
) -> Result<Vec<DateTime<FixedOffset>>> {
    let invalid = Error::InvalidOffset {
        hours: utc_offset_hours,
    };
    let offset = utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| invalid.clone())?;

    dates
        .iter()
        .map(|d| offset.from_local_datetime(d).single().ok_or_else(|| invalid.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DateFactory;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn dts(v: &[&str]) -> Vec<NaiveDateTime> {
        v.iter().map(|s| dt(s)).collect()
    }

    /// Labels `winter` dates the way a clock that follows DST would
    fn with_dst(winter: &[NaiveDateTime], table: &TransitionTable) -> Vec<NaiveDateTime> {
        let hour = Duration::hours(1);
        winter
            .iter()
            .map(|d| {
                let in_summer = table.years().iter().any(|y| {
                    let starts = y.spring_forward;
                    let ends = y.fall_back.map(|f| f - hour);
                    *d >= starts && ends.map_or(true, |e| *d < e)
                });
                if in_summer {
                    *d + hour
                } else {
                    *d
                }
            })
            .collect()
    }

    #[test]
    fn test_states() {
        assert_eq!(DstState::try_from(1), Ok(DstState::Summer));
        assert_eq!(DstState::try_from(-1), Ok(DstState::Winter));
        assert_eq!(
            DstState::try_from(0),
            Err(Error::InvalidDirection { value: 0 })
        );
        assert_eq!(DstState::Summer.flip(), DstState::Winter);
        assert_eq!(DstState::Winter.flip().direction(), 1);
        assert_eq!("Winter".parse::<DstState>(), Ok(DstState::Winter));
        assert_eq!("-1".parse::<DstState>(), Ok(DstState::Winter));
        assert_eq!("summer".parse::<DstState>(), Ok(DstState::Summer));
        assert!("autumn".parse::<DstState>().is_err());
        assert_eq!(DstState::Summer.to_string(), "summer");
        assert_eq!(DstState::default(), DstState::Winter);
    }

    #[test]
    fn test_empty() {
        assert_eq!(fix_dst(&[], DstState::Winter), Err(Error::EmptyInput));
    }

    #[test]
    fn test_spring_forward() {
        let dates = dts(&[
            "2018-3-25 01:00:00",
            "2018-3-25 02:30:00",
            "2018-3-25 02:50:00",
            "2018-3-25 04:00:00",
            "2018-3-25 05:00:00",
        ]);
        let fixed = fix_dst(&dates, DstState::Winter).unwrap();
        let expected = dts(&[
            "2018-3-25 01:00:00",
            "2018-3-25 02:30:00",
            "2018-3-25 02:50:00",
            "2018-3-25 03:00:00",
            "2018-3-25 04:00:00",
        ]);
        assert_eq!(fixed, expected);
        // The input is untouched
        assert_eq!(dates[4], dt("2018-3-25 05:00:00"));
    }

    #[test]
    fn test_crossing_on_last_sample() {
        let dates = dts(&["2018-3-25 01:00:00", "2018-3-25 02:00:00", "2018-3-25 04:00:00"]);
        let fixed = fix_dst(&dates, DstState::Winter).unwrap();
        assert_eq!(
            fixed,
            dts(&["2018-3-25 01:00:00", "2018-3-25 02:00:00", "2018-3-25 03:00:00"])
        );
    }

    #[test]
    fn test_fall_back() {
        // Ten-minute data, the clocks go back from 04:00 to 03:00
        let dates = dts(&[
            "2018-10-28 03:30:00",
            "2018-10-28 03:40:00",
            "2018-10-28 03:50:00",
            "2018-10-28 03:00:00",
            "2018-10-28 03:10:00",
            "2018-10-28 03:20:00",
            "2018-10-28 03:30:00",
            "2018-10-28 03:40:00",
            "2018-10-28 03:50:00",
            "2018-10-28 04:00:00",
            "2018-10-28 04:10:00",
        ]);
        let fixed = fix_dst(&dates, DstState::Summer).unwrap();
        assert_eq!(
            fixed,
            dts(&[
                "2018-10-28 02:30:00",
                "2018-10-28 02:40:00",
                "2018-10-28 02:50:00",
                "2018-10-28 03:00:00",
                "2018-10-28 03:10:00",
                "2018-10-28 03:20:00",
                "2018-10-28 03:30:00",
                "2018-10-28 03:40:00",
                "2018-10-28 03:50:00",
                "2018-10-28 04:00:00",
                "2018-10-28 04:10:00",
            ])
        );
    }

    #[test]
    fn test_slack() {
        // A sample going 20 minutes back is just noise...
        let dates = dts(&[
            "2018-3-24 22:00:00",
            "2018-3-24 22:30:00",
            "2018-3-24 22:10:00",
            "2018-3-24 23:00:00",
            "2018-3-25 02:00:00",
            "2018-3-25 04:00:00",
            "2018-3-25 05:00:00",
        ]);
        let fixed = fix_dst(&dates, DstState::Winter).unwrap();
        assert_eq!(&fixed[..5], &dates[..5]);
        assert_eq!(fixed[5], dt("2018-3-25 03:00:00"));
        assert_eq!(fixed[6], dt("2018-3-25 04:00:00"));

        // ... exactly at the limit is also noise...
        let mut at_limit = dates.clone();
        at_limit[2] = dt("2018-3-24 22:00:00");
        let fixed = fix_dst(&at_limit, DstState::Winter).unwrap();
        assert_eq!(&fixed[..5], &at_limit[..5]);

        // ... but 40 minutes is a change of regime.
        let mut too_far = dates.clone();
        too_far[2] = dt("2018-3-24 21:50:00");
        let fixed = fix_dst(&too_far, DstState::Winter).unwrap();
        assert_eq!(fixed[1], too_far[1]);
        assert_eq!(fixed[2], dt("2018-3-24 20:50:00"));
        assert_eq!(fixed[3], dt("2018-3-24 22:00:00"));

        // A wider slack accepts it
        let fixer = DstFixer::default().with_slack(Duration::minutes(45));
        let fixed = fixer.fix(&too_far, DstState::Winter).unwrap();
        assert_eq!(&fixed[..5], &too_far[..5]);
    }

    #[test]
    fn test_ends_in_summer() {
        let table = TransitionTable::finnish();
        let start = dt("2018-3-24 00:00:00");
        let end = dt("2018-4-10 00:00:00");
        let winter: Vec<NaiveDateTime> = DateFactory::new(start, end, Duration::minutes(10)).collect();
        let local = with_dst(&winter, &table);
        assert_ne!(local, winter);

        let fixed = DstFixer::new(table).fix(&local, DstState::Winter).unwrap();
        assert_eq!(fixed, winter);
    }

    #[test]
    fn test_no_boundary_in_range() {
        let winter: Vec<NaiveDateTime> =
            DateFactory::new(dt("2018-1-1 00:00:00"), dt("2018-2-1 00:00:00"), Duration::hours(1))
                .collect();
        assert_eq!(fix_dst(&winter, DstState::Winter).unwrap(), winter);

        // The whole thing moves when it is all in summer time
        let summer: Vec<NaiveDateTime> =
            DateFactory::new(dt("2018-7-1 00:00:00"), dt("2018-8-1 00:00:00"), Duration::hours(1))
                .collect();
        let fixed = fix_dst(&summer, DstState::Summer).unwrap();
        assert_eq!(fixed.len(), summer.len());
        for (f, s) in fixed.iter().zip(summer.iter()) {
            assert_eq!(*f, *s - Duration::hours(1));
        }
    }

    #[test]
    fn test_single_date() {
        let d = dts(&["2018-7-1 12:00:00"]);
        assert_eq!(
            fix_dst(&d, DstState::Summer).unwrap(),
            dts(&["2018-7-1 11:00:00"])
        );
        assert_eq!(fix_dst(&d, DstState::Winter).unwrap(), d);
    }

    #[test]
    fn test_last_date_on_boundary() {
        // The last sample is the boundary itself; nothing is moved twice
        let dates = dts(&["2018-10-28 03:00:00", "2018-10-28 03:30:00", "2018-10-28 04:00:00"]);
        let fixed = fix_dst(&dates, DstState::Summer).unwrap();
        assert_eq!(
            fixed,
            dts(&["2018-10-28 02:00:00", "2018-10-28 02:30:00", "2018-10-28 03:00:00"])
        );
    }

    #[test]
    fn test_full_years() {
        let table = TransitionTable::finnish();
        let fixer = DstFixer::new(table.clone());

        // Starting in winter time
        let winter: Vec<NaiveDateTime> = DateFactory::new(
            dt("2018-1-1 00:00:00"),
            dt("2019-1-1 00:00:00"),
            Duration::minutes(10),
        )
        .collect();
        let local = with_dst(&winter, &table);
        let fixed = fixer.fix(&local, DstState::Winter).unwrap();
        assert_eq!(fixed.len(), local.len());
        assert!(fixed.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(fixed, winter);

        // Starting in summer time, through a whole winter
        let winter: Vec<NaiveDateTime> = DateFactory::new(
            dt("2018-6-1 00:00:00"),
            dt("2019-6-1 00:00:00"),
            Duration::minutes(5),
        )
        .collect();
        let local = with_dst(&winter, &table);
        let fixed = fixer.fix(&local, DstState::Summer).unwrap();
        assert_eq!(fixed, winter);
    }

    #[test]
    fn test_table_coverage() {
        // The default table has no fall-back for 2021...
        let winter: Vec<NaiveDateTime> = DateFactory::new(
            dt("2021-1-1 00:00:00"),
            dt("2022-1-1 00:00:00"),
            Duration::minutes(10),
        )
        .collect();
        let full = TransitionTable::european(2021..=2021, 2).unwrap();
        let local = with_dst(&winter, &full);

        let fixed = fix_dst(&local, DstState::Winter).unwrap();
        assert_ne!(fixed, winter);
        // ... so the end of the year stays one hour behind
        assert_eq!(
            *fixed.last().unwrap(),
            *winter.last().unwrap() - Duration::hours(1)
        );

        // A table covering the whole year fixes that
        let fixed = DstFixer::new(full).fix(&local, DstState::Winter).unwrap();
        assert_eq!(fixed, winter);
    }

    #[test]
    fn test_attach_offset() {
        let dates = dts(&["2018-3-25 01:00:00", "2018-7-1 12:00:00"]);
        let with_offset = attach_offset(&dates, 2).unwrap();
        assert_eq!(with_offset[1].to_rfc3339(), "2018-07-01T12:00:00+02:00");
        assert_eq!(with_offset[1].naive_utc(), dt("2018-7-1 10:00:00"));

        assert_eq!(
            attach_offset(&dates, 24),
            Err(Error::InvalidOffset { hours: 24 })
        );
    }
}
