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
use std::fmt::Display;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// The filter used for a number of `-v` flags
fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Builds the subscriber used by `dstfix`, writing into `writer`.
///
/// With no `-v` flags the filter is taken from `RUST_LOG`, falling back
/// to warnings only. Each `-v` overrides it: one shows the regime changes
/// of the correction (`debug`), two or more show everything (`trace`).
pub fn subscriber<W>(verbosity: u8, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = if verbosity == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level(0)))
    } else {
        EnvFilter::new(level(verbosity))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .finish()
}

/// Installs the `dstfix` subscriber, logging into STDERR. Does nothing
/// if a global subscriber is already set.
pub fn init(verbosity: u8) {
    let _ = tracing::subscriber::set_global_default(subscriber(verbosity, std::io::stderr));
}

/// Reports an error that stops `dstfix`
///
/// ```
/// dstfix::logging::report_error("could not open file 'data.csv'");
/// ```
pub fn report_error<T: Display>(msg: T) {
    eprintln!("Error: [in dstfix] {}", msg)
}
