//! Reading rows from disk and writing prediction reports.

use crate::bayes::Prediction;
use anyhow::{Context, Result};
use std::{fs, io::Write, path::Path};

/// Reads a text file into rows, one per line.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("couldn't read rows from {}", path.display()))?;
    Ok(contents.lines().map(str::to_string).collect())
}

/// Writes `predictions` as a CSV report to `path`.
pub fn write_predictions<P: AsRef<Path>>(path: P, predictions: &[Prediction]) -> Result<()> {
    let path = path.as_ref();
    let file = fs::File::create(path)
        .with_context(|| format!("couldn't create report {}", path.display()))?;
    write_report(file, predictions)
}

/// Writes the `ID,Label` report, where ID is the source row of each
/// prediction and Label is `0` or `1`.
pub fn write_report<W: Write>(writer: W, predictions: &[Prediction]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(["ID", "Label"])?;
    for prediction in predictions {
        let label = if prediction.label { "1" } else { "0" };
        writer.write_record([prediction.row.to_string().as_str(), label])?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;

    fn prediction(row: usize, label: bool) -> Prediction {
        Prediction {
            row,
            instance: Instance::new(vec![label], Some(label)),
            label,
            scores: [0.0, 0.0],
        }
    }

    #[test]
    fn report_layout() {
        let mut out = Vec::new();
        write_report(&mut out, &[prediction(1, true), prediction(3, false)]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ID,Label\n1,1\n3,0\n");
    }

    #[test]
    fn read_rows_keeps_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.txt");
        fs::write(&path, "1 0 1\n\n0 0 0\n").unwrap();
        assert_eq!(read_rows(&path).unwrap(), vec!["1 0 1", "", "0 0 0"]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_rows("/nonexistent/rows.txt").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rows.txt"));
    }
}
