//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "Month,Weight Load Factor %,Total CC,No Carried(P)";

/// Write `body` below `header` into a temporary CSV file.
pub fn write_csv(header: &str, body: &[&str]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    writeln!(file, "{header}").expect("write header");
    for line in body {
        writeln!(file, "{line}").expect("write row");
    }
    file.flush().expect("flush csv");
    file
}

/// The three-row sample used by the comparison scenarios.
pub fn sample_csv() -> NamedTempFile {
    write_csv(
        HEADER,
        &[
            "01/2021,70,100,1000",
            "01/2021,80,200,2000",
            "02/2021,60,50,500",
        ],
    )
}
