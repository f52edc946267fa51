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

//! Removes Daylight Saving Time from measured time series (e.g., solar
//! irradiance or PV production logged in local civil time), and builds
//! the average day of each month out of them.
//!
//! The correction itself lives in the `calendar` crate; this crate reads and
//! writes the series and puts everything together for the `dstfix` binary.

/// Logging setup and error reporting for the binary
pub mod logging;

/// Measured time series, read from and written to CSV
pub mod series;
pub use series::Series;

/// The average day of each month
pub mod profile;
pub use profile::{monthly_profiles, MonthProfile};

/// A module with the options and functions used by the binary
pub mod run;

// Re-exports
pub use calendar::{
    attach_offset, fix_dst, DateFactory, DstFixer, DstState, TransitionTable, YearTransitions,
};
