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
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::ops::RangeInclusive;
use std::path::Path;

/// The Daylight Saving Time boundaries of a single year, expressed
/// in the same naive local time as the data that will be corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTransitions {
    /// The year these boundaries belong to
    pub year: i32,

    /// The moment the clocks jump forward (winter clock)
    pub spring_forward: NaiveDateTime,

    /// The moment the clocks jump backwards (summer clock). Only the
    /// last year of a [`TransitionTable`] can leave this empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fall_back: Option<NaiveDateTime>,
}

/// An ordered list of spring-forward and fall-back boundaries.
///
/// The table only covers the years it is given. Data outside of that
/// coverage is treated as if no more transitions happened, so the table
/// needs to be extended (e.g., through [`TransitionTable::european`] or
/// a JSON file) when working with other years.
///
/// ```
/// use calendar::TransitionTable;
/// use chrono::NaiveDate;
///
/// let table = TransitionTable::finnish();
/// let spring_2018 = NaiveDate::from_ymd_opt(2018, 3, 25)
///     .unwrap()
///     .and_hms_opt(3, 0, 0)
///     .unwrap();
/// assert!(table.boundaries().contains(&spring_2018));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<YearTransitions>", into = "Vec<YearTransitions>")]
pub struct TransitionTable {
    years: Vec<YearTransitions>,
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::finnish()
    }
}

impl TryFrom<Vec<YearTransitions>> for TransitionTable {
    type Error = Error;

    fn try_from(years: Vec<YearTransitions>) -> Result<Self> {
        Self::new(years)
    }
}

impl From<TransitionTable> for Vec<YearTransitions> {
    fn from(table: TransitionTable) -> Self {
        table.years
    }
}

/// Builds a whole-hour naive datetime
fn at(year: i32, month: u32, day: u32, hour: u32) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .ok_or(Error::InvalidYear { year })
}

/// The last Sunday of a month
fn last_sunday(year: i32, month: u32, last_day: u32) -> Result<NaiveDate> {
    let last =
        NaiveDate::from_ymd_opt(year, month, last_day).ok_or(Error::InvalidYear { year })?;
    let back = last.weekday().num_days_from_sunday() as i64;
    last.checked_sub_signed(Duration::days(back))
        .ok_or(Error::InvalidYear { year })
}

impl TransitionTable {
    /// Builds a table, checking that every boundary is in chronological
    /// order and that only the last year lacks a fall-back date.
    pub fn new(years: Vec<YearTransitions>) -> Result<Self> {
        let n = years.len();
        for (i, y) in years.iter().enumerate() {
            if y.spring_forward.year() != y.year {
                return Err(Error::YearMismatch {
                    year: y.year,
                    boundary: y.spring_forward,
                });
            }
            match y.fall_back {
                Some(fall_back) if fall_back.year() != y.year => {
                    return Err(Error::YearMismatch {
                        year: y.year,
                        boundary: fall_back,
                    })
                }
                None if i + 1 != n => return Err(Error::MissingFallBack { year: y.year }),
                _ => {}
            }
        }

        let table = Self { years };
        let boundaries = table.boundaries();
        if let Some(w) = boundaries.windows(2).find(|w| w[0] >= w[1]) {
            return Err(Error::UnorderedTransitions {
                previous: w[0],
                next: w[1],
            });
        }
        Ok(table)
    }

    /// The boundaries that used to be hard-coded for Finnish data
    /// (EET/EEST), from the spring of 2017 to the spring of 2021.
    pub fn finnish() -> Self {
        const DATES: [(i32, (u32, u32), Option<(u32, u32)>); 5] = [
            (2017, (3, 26), Some((10, 29))),
            (2018, (3, 25), Some((10, 28))),
            (2019, (3, 31), Some((10, 27))),
            (2020, (3, 29), Some((10, 25))),
            (2021, (3, 28), None),
        ];

        let years = DATES
            .iter()
            .filter_map(|(year, (sm, sd), fall)| {
                let spring_forward = at(*year, *sm, *sd, 3).ok()?;
                let fall_back = match fall {
                    Some((fm, fd)) => Some(at(*year, *fm, *fd, 4).ok()?),
                    None => None,
                };
                Some(YearTransitions {
                    year: *year,
                    spring_forward,
                    fall_back,
                })
            })
            .collect();

        Self { years }
    }

    /// Generates the boundaries of the European Union rule: clocks go forward
    /// on the last Sunday of March and back on the last Sunday of October,
    /// both at 01:00 UTC.
    ///
    /// `winter_utc_offset_hours` is the offset of the local winter time
    /// (e.g., `2` for Finland, `1` for Central Europe). The spring-forward is
    /// expressed in the winter clock and the fall-back in the summer clock,
    /// just like the data being corrected.
    ///
    /// ```
    /// use calendar::TransitionTable;
    ///
    /// let generated = TransitionTable::european(2017..=2020, 2).unwrap();
    /// let finnish = TransitionTable::finnish();
    /// assert_eq!(generated.years(), &finnish.years()[..4]);
    /// ```
    pub fn european(years: RangeInclusive<i32>, winter_utc_offset_hours: i32) -> Result<Self> {
        if winter_utc_offset_hours.abs() > 23 {
            return Err(Error::InvalidOffset {
                hours: winter_utc_offset_hours,
            });
        }
        let offset = Duration::hours(winter_utc_offset_hours as i64);
        let one_am = |date: NaiveDate, year: i32| {
            date.and_hms_opt(1, 0, 0)
                .ok_or(Error::InvalidYear { year })
        };

        let years = years
            .map(|year| -> Result<YearTransitions> {
                let spring = one_am(last_sunday(year, 3, 31)?, year)? + offset;
                let fall = one_am(last_sunday(year, 10, 31)?, year)? + offset + Duration::hours(1);
                Ok(YearTransitions {
                    year,
                    spring_forward: spring,
                    fall_back: Some(fall),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(years)
    }

    /// Parses a table from a JSON array of [`YearTransitions`]
    ///
    /// ```
    /// use calendar::TransitionTable;
    ///
    /// let json = r#"[
    ///     {"year": 2022, "spring_forward": "2022-03-27T03:00:00", "fall_back": "2022-10-30T04:00:00"}
    /// ]"#;
    /// let table = TransitionTable::from_json_str(json).unwrap();
    /// assert_eq!(table.boundaries().len(), 2);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config {
            message: e.to_string(),
        })
    }

    /// Reads a table from a JSON file
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self> {
        let path = filename.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("could not read file '{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&json)
    }

    /// Adds one more year at the end of the table
    pub fn push(&mut self, year: YearTransitions) -> Result<()> {
        let mut years = self.years.clone();
        years.push(year);
        *self = Self::new(years)?;
        Ok(())
    }

    /// The years covered by this table
    pub fn years(&self) -> &[YearTransitions] {
        &self.years
    }

    /// All the boundaries, in order: spring-forward, fall-back, spring-forward...
    pub fn boundaries(&self) -> Vec<NaiveDateTime> {
        self.years
            .iter()
            .flat_map(|y| std::iter::once(y.spring_forward).chain(y.fall_back))
            .collect()
    }

    /// The boundaries between `first` and `last` (both included)
    pub fn boundaries_within(
        &self,
        first: NaiveDateTime,
        last: NaiveDateTime,
    ) -> VecDeque<NaiveDateTime> {
        self.boundaries()
            .into_iter()
            .filter(|b| *b >= first && *b <= last)
            .collect()
    }
}
