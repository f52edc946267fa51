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

use calendar::{attach_offset, DstFixer, DstState};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// The format of the dates when none is given
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A measured time series: a column of naive local dates followed
/// by any number of numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// The name of the date column
    pub date_column: String,

    /// The names of the numeric columns
    pub header: Vec<String>,

    /// The dates of each row
    pub dates: Vec<NaiveDateTime>,

    /// The numeric columns. Empty cells are `NaN`.
    pub columns: Vec<Vec<f64>>,
}

impl Series {
    /// Reads a CSV file with a header row. The first column holds the
    /// dates, in `date_format`.
    pub fn from_reader<R: Read>(reader: R, date_format: &str) -> Result<Self, String> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let names = rdr
            .headers()
            .map_err(|e| format!("Could not read the header: {}", e))?
            .clone();
        let mut names = names.iter();
        let date_column = names
            .next()
            .ok_or_else(|| "The header has no columns".to_string())?
            .to_string();
        let header: Vec<String> = names.map(|s| s.to_string()).collect();

        let mut dates = Vec::new();
        let mut columns = vec![Vec::new(); header.len()];
        for (i, record) in rdr.records().enumerate() {
            // the header is row 1
            let row = i + 2;
            let record = record.map_err(|e| format!("Could not read row {}: {}", row, e))?;

            let raw = record.get(0).unwrap_or_default();
            let date = NaiveDateTime::parse_from_str(raw, date_format).map_err(|e| {
                format!(
                    "Could not parse date '{}' in row {} with format '{}': {}",
                    raw, row, date_format, e
                )
            })?;
            dates.push(date);

            for (j, column) in columns.iter_mut().enumerate() {
                let cell = record.get(j + 1).unwrap_or_default();
                let value = if cell.is_empty() {
                    f64::NAN
                } else {
                    cell.parse::<f64>().map_err(|e| {
                        format!(
                            "Could not parse value '{}' of column '{}' in row {}: {}",
                            cell, header[j], row, e
                        )
                    })?
                };
                column.push(value);
            }
        }

        Ok(Self {
            date_column,
            header,
            dates,
            columns,
        })
    }

    /// Reads a CSV file. See [`Series::from_reader`]
    pub fn from_file<P: AsRef<Path>>(filename: P, date_format: &str) -> Result<Self, String> {
        let path = filename.as_ref();
        let file = File::open(path)
            .map_err(|e| format!("Could not open file '{}': {}", path.display(), e))?;
        Self::from_reader(file, date_format)
            .map_err(|e| format!("In file '{}': {}", path.display(), e))
    }

    /// Gets a numeric column by name
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let i = self.header.iter().position(|h| h == name)?;
        self.columns.get(i).map(|c| c.as_slice())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Checks whether there are no rows
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Moves all the dates into winter time
    pub fn fix_dst(&mut self, fixer: &DstFixer, initial: DstState) -> Result<(), String> {
        self.dates = fixer
            .fix(&self.dates, initial)
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Writes the series as CSV. Dates are written in RFC 3339,
    /// with a fixed UTC offset (in hours).
    pub fn write_csv<W: Write>(&self, writer: W, utc_offset_hours: i32) -> Result<(), String> {
        if self.header.len() != self.columns.len() {
            return Err(format!(
                "There are {} column names, but {} columns",
                self.header.len(),
                self.columns.len()
            ));
        }
        for (name, column) in self.header.iter().zip(self.columns.iter()) {
            if column.len() != self.dates.len() {
                return Err(format!(
                    "Column '{}' has {} values, but there are {} dates",
                    name,
                    column.len(),
                    self.dates.len()
                ));
            }
        }
        let dates = attach_offset(&self.dates, utc_offset_hours).map_err(|e| e.to_string())?;

        let mut wtr = csv::Writer::from_writer(writer);
        let mut names = Vec::with_capacity(1 + self.header.len());
        names.push(self.date_column.as_str());
        names.extend(self.header.iter().map(|h| h.as_str()));
        wtr.write_record(&names)
            .map_err(|e| format!("Could not write header: {}", e))?;

        for (i, date) in dates.iter().enumerate() {
            let mut row = Vec::with_capacity(1 + self.columns.len());
            row.push(date.to_rfc3339());
            for column in self.columns.iter() {
                let v = column[i];
                row.push(if v.is_nan() { String::new() } else { v.to_string() });
            }
            wtr.write_record(&row)
                .map_err(|e| format!("Could not write row {}: {}", i + 2, e))?;
        }
        wtr.flush().map_err(|e| e.to_string())
    }
}
