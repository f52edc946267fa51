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

use dstfix::run::{run, Options};
use dstfix::series::DEFAULT_DATE_FORMAT;
use dstfix::DstState;

fn options(input_file: &str) -> Options {
    Options {
        input_file: input_file.into(),
        output: None,
        initial_state: DstState::Winter,
        transitions_file: None,
        european_years: None,
        utc_offset: 2,
        date_format: DEFAULT_DATE_FORMAT.into(),
        profile_column: None,
        resolution: 60,
        profile_dir: ".".into(),
        dump_table: None,
        verbose: 0,
    }
}

/// A path under the system's temporary directory
fn tmp_path(name: &str) -> String {
    std::env::temp_dir()
        .join(name)
        .to_string_lossy()
        .into_owned()
}

fn run_to_string(options: &Options) -> Result<String, String> {
    let mut out: Vec<u8> = Vec::new();
    run(options, &mut out)?;
    String::from_utf8(out).map_err(|e| e.to_string())
}

#[test]
fn spring_forward() -> Result<(), String> {
    let out = run_to_string(&options("./tests/dst_fix/spring_2018.csv"))?;
    let expected = "dt,power
2018-03-25T00:00:00+02:00,0
2018-03-25T01:00:00+02:00,0
2018-03-25T02:00:00+02:00,0
2018-03-25T02:30:00+02:00,1
2018-03-25T03:00:00+02:00,2
2018-03-25T04:00:00+02:00,3
2018-03-25T05:00:00+02:00,4
";
    assert_eq!(out, expected);
    Ok(())
}

#[test]
fn monthly_profile() -> Result<(), String> {
    let dir = tmp_path("dstfix_profiles");
    let mut opts = options("./tests/dst_fix/spring_2018.csv");
    opts.profile_column = Some("power".into());
    opts.profile_dir = dir.clone();
    run_to_string(&opts)?;

    let profile = std::fs::read_to_string(format!("{}/03_March_power_avg.csv", dir))
        .map_err(|e| e.to_string())?;
    let lines: Vec<&str> = profile.lines().collect();
    assert_eq!(lines.len(), 25);
    assert_eq!(lines[0], "time,power");
    assert_eq!(lines[1], "00:00,0");
    // 02:00 and 02:30
    assert_eq!(lines[3], "02:00,0.5");
    assert_eq!(lines[4], "03:00,2");
    assert_eq!(lines[6], "05:00,4");
    assert_eq!(lines[7], "06:00,");

    let err = {
        opts.profile_column = Some("ghi".into());
        run_to_string(&opts).unwrap_err()
    };
    assert!(err.contains("'ghi'"), "{}", err);
    Ok(())
}

#[test]
fn fall_back_with_table_file() -> Result<(), String> {
    let mut opts = options("./tests/dst_fix/autumn_2022.csv");
    opts.initial_state = DstState::Summer;
    opts.date_format = "%d.%m.%Y %H:%M".into();
    opts.transitions_file = Some("./tests/dst_fix/transitions_2022.json".into());
    let out = run_to_string(&opts)?;
    let expected = "dt,power
2022-10-28T11:00:00+02:00,5
2022-10-30T02:30:00+02:00,0
2022-10-30T02:45:00+02:00,0
2022-10-30T03:00:00+02:00,0
2022-10-30T03:15:00+02:00,0
2022-10-30T04:30:00+02:00,0
2022-10-31T12:00:00+02:00,6
";
    assert_eq!(out, expected);

    // Same thing, generating the table
    opts.transitions_file = None;
    opts.european_years = Some("2022".into());
    assert_eq!(run_to_string(&opts)?, expected);
    Ok(())
}

#[test]
fn dump_table() -> Result<(), String> {
    let path = tmp_path("dstfix_dumped_table.json");
    let mut opts = options("./tests/dst_fix/spring_2018.csv");
    opts.dump_table = Some(path.clone());
    let first = run_to_string(&opts)?;

    // Reading it back gives the same result
    opts.dump_table = None;
    opts.transitions_file = Some(path);
    assert_eq!(run_to_string(&opts)?, first);
    Ok(())
}

#[test]
fn missing_file() {
    let err = run_to_string(&options("./tests/dst_fix/nothing_here.csv")).unwrap_err();
    assert!(err.contains("nothing_here.csv"), "{}", err);
}
