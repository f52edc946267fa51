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

#![deny(missing_docs)]

//! Tools for removing Daylight Saving Time (DST) from time series recorded
//! in local civil time.
//!
//! Many loggers (e.g., those of solar panels and weather stations) write
//! naive timestamps that jump forward one hour in spring and back one hour
//! in autumn. The [`DstFixer`] scans such a sequence once and leaves all of
//! it in winter (i.e., standard) time, so it can be paired with a single
//! fixed UTC offset.
//!
//! ```
//! use calendar::{attach_offset, fix_dst, DstState};
//! use chrono::NaiveDateTime;
//!
//! let dates: Vec<NaiveDateTime> = ["2018-07-01 12:00:00", "2018-07-01 13:00:00"]
//!     .iter()
//!     .map(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
//!     .collect();
//!
//! // All in summer time, so everything moves back one hour
//! let fixed = fix_dst(&dates, DstState::Summer).unwrap();
//! let eet = attach_offset(&fixed, 2).unwrap();
//! assert_eq!(eet[0].to_rfc3339(), "2018-07-01T11:00:00+02:00");
//! ```
//!
//! # The transition table
//!
//! The dates at which clocks change are not computed from time zone rules
//! during the correction; they come from a [`TransitionTable`]. The default
//! one covers Finnish data from 2017 to the spring of 2021, but tables can be
//! generated for other years and offsets through [`TransitionTable::european`]
//! or read from JSON files.

mod error;
pub use crate::error::{Error, Result};

mod transitions;
pub use crate::transitions::{TransitionTable, YearTransitions};

mod dst_fixer;
pub use crate::dst_fixer::{attach_offset, fix_dst, DstFixer, DstState};

mod date_factory;
pub use crate::date_factory::DateFactory;
