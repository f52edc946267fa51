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
use chrono::{Duration, NaiveDateTime};

/// Produces regularly sampled dates, from a start date (included)
/// to an end date (excluded).
///
/// ```
/// use calendar::DateFactory;
/// use chrono::{Duration, NaiveDate};
///
/// let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(2019, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// assert_eq!(DateFactory::new(start, end, Duration::minutes(30)).count(), 48);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DateFactory {
    /// End date of the iterator
    end: NaiveDateTime,

    /// Current date in the iterator
    current: NaiveDateTime,

    /// The timestep of the iterator
    dt: Duration,
}

impl DateFactory {
    /// Creates a new Factory starting on `start` and ending before `end`,
    /// separated by `dt` each time.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, dt: Duration) -> Self {
        Self {
            end,
            current: start,
            dt,
        }
    }
}

impl Iterator for DateFactory {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        if self.dt <= Duration::zero() || self.current >= self.end {
            return None;
        }
        let ret = self.current;
        self.current = self.current.checked_add_signed(self.dt)?;
        Some(ret)
    }
}
