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

use calendar::DateFactory;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::io::Write;

const MINUTES_PER_DAY: u32 = 24 * 60;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The average day of a month: one mean value per time-of-day bin
#[derive(Debug, Clone, PartialEq)]
pub struct MonthProfile {
    /// Month of the year, from 1 to 12
    pub month: u32,

    /// The start of each bin, and the mean of the values within it.
    /// Bins without data are `NaN`.
    pub bins: Vec<(NaiveTime, f64)>,
}

impl MonthProfile {
    /// The English name of the month, or `"Unknown"` if `month`
    /// is not between 1 and 12
    pub fn month_name(&self) -> &'static str {
        (self.month as usize)
            .checked_sub(1)
            .and_then(|i| MONTH_NAMES.get(i))
            .copied()
            .unwrap_or("Unknown")
    }

    /// A file name for this profile, e.g., `03_March_GHI_avg.csv`
    pub fn file_name(&self, column: &str) -> String {
        format!("{:02}_{}_{}_avg.csv", self.month, self.month_name(), column)
    }

    /// Writes the profile as a two-column CSV (`HH:MM`, value)
    pub fn write_csv<W: Write>(&self, writer: W, column: &str) -> Result<(), String> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["time", column])
            .map_err(|e| e.to_string())?;
        for (time, v) in self.bins.iter() {
            let v = if v.is_nan() { String::new() } else { v.to_string() };
            wtr.write_record([time.format("%H:%M").to_string(), v])
                .map_err(|e| e.to_string())?;
        }
        wtr.flush().map_err(|e| e.to_string())
    }
}

/// Splits `values` by month and averages them by time of day, in bins
/// of `resolution_minutes`. Only the months present in `dates` are
/// returned, in calendar order. Non-finite values are ignored.
///
/// ```
/// use chrono::NaiveDateTime;
/// use dstfix::profile::monthly_profiles;
///
/// let dates: Vec<NaiveDateTime> = ["2019-06-01 12:00:00", "2019-06-02 12:30:00"]
///     .iter()
///     .map(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
///     .collect();
/// let profiles = monthly_profiles(&dates, &[100.0, 200.0], 60).unwrap();
/// assert_eq!(profiles.len(), 1);
/// assert_eq!(profiles[0].month, 6);
/// assert_eq!(profiles[0].bins[12].1, 150.0);
/// ```
pub fn monthly_profiles(
    dates: &[NaiveDateTime],
    values: &[f64],
    resolution_minutes: u32,
) -> Result<Vec<MonthProfile>, String> {
    if resolution_minutes == 0 || MINUTES_PER_DAY % resolution_minutes != 0 {
        return Err(format!(
            "A resolution of {} minutes does not split a day evenly",
            resolution_minutes
        ));
    }
    if dates.len() != values.len() {
        return Err(format!(
            "Found {} dates but {} values",
            dates.len(),
            values.len()
        ));
    }

    let n_bins = (MINUTES_PER_DAY / resolution_minutes) as usize;
    let mut sums = vec![vec![0.0; n_bins]; 12];
    let mut counts = vec![vec![0_usize; n_bins]; 12];
    let mut present = [false; 12];

    for (date, v) in dates.iter().zip(values.iter()) {
        let month = date.month0() as usize;
        present[month] = true;
        if !v.is_finite() {
            continue;
        }
        let minute = date.hour() * 60 + date.minute();
        let bin = (minute / resolution_minutes) as usize;
        sums[month][bin] += v;
        counts[month][bin] += 1;
    }

    let midnight = NaiveDate::default().and_time(NaiveTime::MIN);
    let times: Vec<NaiveTime> = DateFactory::new(
        midnight,
        midnight + Duration::days(1),
        Duration::minutes(resolution_minutes as i64),
    )
    .map(|d| d.time())
    .collect();

    let profiles = (0..12)
        .filter(|m| present[*m])
        .map(|m| {
            let bins = times
                .iter()
                .zip(sums[m].iter().zip(counts[m].iter()))
                .map(|(t, (sum, count))| {
                    let mean = if *count == 0 {
                        f64::NAN
                    } else {
                        sum / *count as f64
                    };
                    (*t, mean)
                })
                .collect();
            MonthProfile {
                month: m as u32 + 1,
                bins,
            }
        })
        .collect();

    Ok(profiles)
}
