use std::io::Read;
use std::path::Path;

use failure::ResultExt as _;
use ndarray::prelude::*;

/// Read a numeric CSV file with one sample per row into an array of shape (n_samples, n_features).
pub fn read_csv_sample(path: &Path, has_headers: bool) -> Result<Array2<f64>, failure::Error> {
    let file = std::fs::File::open(path)
        .with_context(|err| format!("cannot open {}: {}", path.display(), err))?;
    Ok(parse_csv_sample(file, has_headers)
        .with_context(|err| format!("while reading {}: {}", path.display(), err))?)
}

/// Parse numeric CSV records from any reader.
pub fn parse_csv_sample<R: Read>(reader: R, has_headers: bool) -> Result<Array2<f64>, failure::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut values = Vec::new();
    let mut n_features = None;
    let mut n_rows = 0;
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        match n_features {
            None => n_features = Some(record.len()),
            Some(expected) => ensure!(
                record.len() == expected,
                "record {} has {} fields, expected {}",
                line + 1,
                record.len(),
                expected,
            ),
        }
        for field in record.iter() {
            let value = field
                .parse::<f64>()
                .with_context(|err| format!("record {}: cannot parse {:?}: {}", line + 1, field, err))?;
            values.push(value);
        }
        n_rows += 1;
    }

    let n_features = n_features.ok_or_else(|| format_err!("no records found"))?;
    ensure!(n_features > 0, "records must contain at least one field");
    Ok(Array2::from_shape_vec((n_rows, n_features), values)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_a_sample_with_headers() {
        let data = "a,b\n1.0, 2\n-3,4.5\n";
        let sample = parse_csv_sample(data.as_bytes(), true).unwrap();
        assert_eq!(sample, array![[1.0, 2.0], [-3.0, 4.5]]);
    }

    #[test]
    fn it_parses_a_sample_without_headers() {
        let data = "1\n2\n3\n";
        let sample = parse_csv_sample(data.as_bytes(), false).unwrap();
        assert_eq!(sample, array![[1.0], [2.0], [3.0]]);
    }

    #[test]
    fn it_rejects_bad_input() {
        assert!(parse_csv_sample("".as_bytes(), false).is_err());
        assert!(parse_csv_sample("1,2\nx,3\n".as_bytes(), false).is_err());
    }

    #[test]
    fn it_rejects_ragged_rows() {
        let data = "1,2\n3\n";
        let err = parse_csv_sample(data.as_bytes(), false).unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
