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
use crate::profile::monthly_profiles;
use crate::series::{Series, DEFAULT_DATE_FORMAT};
use calendar::{DstFixer, DstState, TransitionTable};
use chrono::{Datelike, NaiveDateTime};
use clap::Parser;
use std::fs;
use std::io::Write;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, warn};

/// The options we can pass to `dstfix`
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Options {
    /// The CSV file to correct. Its first column holds the dates
    #[clap(short = 'i')]
    pub input_file: String,

    /// Specifies the path to which to write the corrected file.
    /// If none is given, STDOUT is used
    #[clap(short = 'o')]
    pub output: Option<String>,

    /// Whether the first date is in `summer` or `winter` time
    #[clap(short = 's', default_value = "winter")]
    pub initial_state: DstState,

    /// A JSON file with the DST transitions. The Finnish
    /// transitions (2017 to 2021) are used if none is given
    #[clap(short = 't')]
    pub transitions_file: Option<String>,

    /// Generates the European Union transitions for a range
    /// of years (e.g., `2022-2025`) instead of reading them
    #[clap(short = 'e')]
    pub european_years: Option<String>,

    /// The UTC offset of winter time, in hours
    #[clap(short = 'z', default_value_t = 2, allow_negative_numbers = true)]
    pub utc_offset: i32,

    /// The format of the dates in the input file
    #[clap(short = 'f', default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// A column for which to write the average day of each month
    #[clap(short = 'p')]
    pub profile_column: Option<String>,

    /// The resolution of the average days, in minutes
    #[clap(short = 'r', default_value_t = 60)]
    pub resolution: u32,

    /// The directory in which to write the average days
    #[clap(short = 'd', default_value = ".")]
    pub profile_dir: String,

    /// Writes the transition table in use to a JSON file, so it
    /// can be edited and passed back with `-t`
    #[clap(long)]
    pub dump_table: Option<String>,

    /// Logs what the correction does (`-v`), or everything (`-vv`).
    /// Overrides `RUST_LOG`
    #[clap(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            input_file: String::new(),
            output: None,
            initial_state: DstState::Winter,
            transitions_file: None,
            european_years: None,
            utc_offset: 2,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            profile_column: None,
            resolution: 60,
            profile_dir: ".".to_string(),
            dump_table: None,
            verbose: 0,
        }
    }
}

/// Parses `2022-2025` or `2022`
fn parse_years(s: &str) -> Result<RangeInclusive<i32>, String> {
    let bad = || format!("Could not parse '{}' as a range of years (e.g., 2022-2025)", s);
    let (first, last) = match s.split_once('-') {
        Some((a, b)) => (a, b),
        None => (s, s),
    };
    let first: i32 = first.trim().parse().map_err(|_| bad())?;
    let last: i32 = last.trim().parse().map_err(|_| bad())?;
    if first > last {
        return Err(bad());
    }
    Ok(first..=last)
}

/// Builds the [`DstFixer`] requested in the options
pub fn build_fixer(options: &Options) -> Result<DstFixer, String> {
    let table = match (&options.transitions_file, &options.european_years) {
        (Some(_), Some(_)) => {
            return Err("Options '-t' and '-e' cannot be used at the same time".to_string())
        }
        (Some(file), None) => TransitionTable::from_file(file).map_err(|e| e.to_string())?,
        (None, Some(years)) => {
            TransitionTable::european(parse_years(years)?, options.utc_offset)
                .map_err(|e| e.to_string())?
        }
        (None, None) => TransitionTable::default(),
    };
    Ok(DstFixer::new(table))
}

/// Describes the parts of `dates` that `table` cannot correct: data
/// before its first year, and data after its last fall-back year.
pub fn coverage_gaps(table: &TransitionTable, dates: &[NaiveDateTime]) -> Vec<String> {
    let (first, last) = match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Vec::new(),
    };
    let years = table.years();
    let first_year = match years.first() {
        Some(y) => y.year,
        None => return vec!["the transition table is empty".to_string()],
    };

    let mut gaps = Vec::new();
    if first.year() < first_year {
        gaps.push(format!(
            "the transition table starts in {}, but the data starts on {}",
            first_year, first
        ));
    }
    match years.iter().rev().find(|y| y.fall_back.is_some()) {
        Some(y) if last.year() <= y.year => {}
        Some(y) => gaps.push(format!(
            "the transition table has no fall-back after {}, but the data goes until {}",
            y.year, last
        )),
        None => gaps.push(format!(
            "the transition table has no fall-back, but the data goes until {}",
            last
        )),
    }
    gaps
}

/// Writes the average day of each month into `options.profile_dir`
fn write_profiles(series: &Series, column: &str, options: &Options) -> Result<(), String> {
    let values = series.column(column).ok_or_else(|| {
        format!(
            "Column '{}' not found in file '{}'",
            column, options.input_file
        )
    })?;
    let profiles = monthly_profiles(&series.dates, values, options.resolution)?;

    let dir = Path::new(&options.profile_dir);
    fs::create_dir_all(dir)
        .map_err(|e| format!("Could not create directory '{}': {}", dir.display(), e))?;
    for profile in profiles.iter() {
        let path = dir.join(profile.file_name(column));
        let file = fs::File::create(&path)
            .map_err(|e| format!("Could not create file '{}': {}", path.display(), e))?;
        profile.write_csv(file, column)?;
    }
    debug!(n = profiles.len(), "wrote monthly profiles");
    Ok(())
}

/// Reads the input file, removes DST from its dates and writes
/// the result into `out`.
pub fn run<T: Write>(options: &Options, out: T) -> Result<(), String> {
    let fixer = build_fixer(options)?;

    if let Some(path) = &options.dump_table {
        let json = serde_json::to_string_pretty(fixer.table()).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| format!("Could not write file '{}': {}", path, e))?;
    }

    let mut series = Series::from_file(&options.input_file, &options.date_format)?;
    debug!(rows = series.len(), columns = series.header.len(), "read input");
    for gap in coverage_gaps(fixer.table(), &series.dates) {
        warn!("{}", gap);
    }

    series.fix_dst(&fixer, options.initial_state)?;
    series.write_csv(out, options.utc_offset)?;

    if let Some(column) = &options.profile_column {
        write_profiles(&series, column, options)?;
    }
    Ok(())
}

/// Runs `dstfix` and writes the result into `options.output`, or
/// STDOUT. The output file is only created once `run` succeeds.
pub fn run_to_output(options: &Options) -> Result<(), String> {
    match &options.output {
        Some(path) => {
            let mut buf: Vec<u8> = Vec::new();
            run(options, &mut buf)?;
            fs::write(path, buf).map_err(|e| format!("Could not write file '{}': {}", path, e))
        }
        None => run(options, std::io::stdout().lock()),
    }
}
