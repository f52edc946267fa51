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

use chrono::NaiveDateTime;
use std::fmt;

/// Result type alias for the operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while correcting Daylight Saving Times
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The sequence of dates to correct was empty
    EmptyInput,

    /// The direction flag was neither `1` (summer) nor `-1` (winter)
    InvalidDirection {
        /// The value given
        value: i32,
    },

    /// The transition table is not in chronological order
    UnorderedTransitions {
        /// The boundary that came too late in the table
        previous: NaiveDateTime,
        /// The boundary that should have come after `previous`
        next: NaiveDateTime,
    },

    /// A year other than the last one in the table has no fall-back date
    MissingFallBack {
        /// The year that is missing it
        year: i32,
    },

    /// The year of a boundary does not match the year it is registered under
    YearMismatch {
        /// The year the boundary is registered under
        year: i32,
        /// The boundary itself
        boundary: NaiveDateTime,
    },

    /// A year for which dates cannot be built
    InvalidYear {
        /// The year given
        year: i32,
    },

    /// A state name that is neither `summer` nor `winter`
    UnknownState {
        /// The name given
        value: String,
    },

    /// An offset (in hours) that cannot be represented
    InvalidOffset {
        /// The offset given, in hours
        hours: i32,
    },

    /// The transition table file could not be read or parsed
    Config {
        /// What went wrong
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "cannot correct an empty sequence of dates"),
            Self::InvalidDirection { value } => {
                write!(
                    f,
                    "invalid DST direction {value} (use 1 for summer time or -1 for winter time)"
                )
            }
            Self::UnorderedTransitions { previous, next } => {
                write!(
                    f,
                    "transitions are not in chronological order: {next} comes after {previous}"
                )
            }
            Self::MissingFallBack { year } => {
                write!(
                    f,
                    "year {year} has no fall-back date, but only the last year of the table can omit it"
                )
            }
            Self::YearMismatch { year, boundary } => {
                write!(f, "boundary {boundary} is registered under year {year}")
            }
            Self::InvalidYear { year } => write!(f, "cannot build DST transitions for year {year}"),
            Self::UnknownState { value } => {
                write!(f, "unknown DST state '{value}' (expected 'summer' or 'winter')")
            }
            Self::InvalidOffset { hours } => {
                write!(f, "invalid UTC offset of {hours} hours")
            }
            Self::Config { message } => write!(f, "invalid transition table: {message}"),
        }
    }
}

impl std::error::Error for Error {}
