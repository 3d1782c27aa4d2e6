//! Record reading and header normalization.
//!
//! Turns a decoded input stream into a lazy, forward-only sequence of
//! [`Application`] records. Two header families are supported:
//!
//! - the current H1B record layout, which already names `CASE_STATUS`,
//!   `WORKSITE_STATE` and `SOC_NAME`;
//! - the previous LCA record layout, recognized by its `LCA_CASE_NUMBER`
//!   column and relabeled positionally to the current layout.
//!
//! Schema validation happens once, against the (possibly migrated) header:
//! the three required columns are resolved to positional indices up front,
//! so every later field access is a plain index lookup.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{ReadResult, SchemaError};
use crate::sniff::Dialect;

/// Column holding the application status.
pub const STATUS_COLUMN: &str = "CASE_STATUS";
/// Column holding the worksite state dimension.
pub const STATE_COLUMN: &str = "WORKSITE_STATE";
/// Column holding the occupation name dimension.
pub const OCCUPATION_COLUMN: &str = "SOC_NAME";

/// Header column marking the previous LCA record layout.
const LEGACY_SENTINEL: &str = "LCA_CASE_NUMBER";

/// Column names of the current H1B record layout, in the positional order
/// of the previous LCA layout. Files using the old layout are relabeled
/// with these names; the first column is an unnamed row index.
const LEGACY_FIELDNAMES: [&str; 36] = [
    "",
    "CASE_NO",
    "CASE_STATUS",
    "CASE_SUBMITTED",
    "DECISION_DATE",
    "VISA_CLASS",
    "EMPLOYMENT_START_DATE",
    "EMPLOYMENT_END_DATE",
    "EMPLOYER_NAME",
    "EMPLOYER_ADDRESS1",
    "EMPLOYER_CITY",
    "EMPLOYER_STATE",
    "EMPLOYER_POSTAL_CODE",
    "SOC_CODE",
    "SOC_NAME",
    "JOB_TITLE",
    "WAGE_RATE_OF_PAY",
    "WAGE_RATE_TO",
    "WAGE_UNIT_OF_PAY",
    "FULL_TIME_POSITION",
    "TOTAL WORKERS",
    "WORKSITE_CITY",
    "WORKSITE_STATE",
    "PREVAILING_WAGE",
    "PW_UNIT_OF_PAY",
    "PW_WAGE_SOURCE",
    "PW_WAGE_SOURCE_OTHER",
    "PW_WAGE_SOURCE_YEAR",
    "WORKSITE_CITY_2",
    "WORKSITE_STATE_2",
    "PREVAILING_WAGE_2",
    "PW_UNIT_OF_PAY_2",
    "PW_WAGE_SOURCE_2",
    "PW_WAGE_SOURCE_OTHER_2",
    "PW_WAGE_SOURCE_YEAR_2",
    "NAIC_CODE",
];

/// One H1B application, reduced to the fields the reports need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub case_status: String,
    pub worksite_state: String,
    pub soc_name: String,
}

/// Positional indices of the required columns in the normalized header.
#[derive(Debug, Clone, Copy)]
struct Columns {
    case_status: usize,
    worksite_state: usize,
    soc_name: usize,
}

impl Columns {
    fn resolve<'a, I>(header: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut case_status = None;
        let mut worksite_state = None;
        let mut soc_name = None;

        for (index, name) in header.into_iter().enumerate() {
            match name {
                STATUS_COLUMN => case_status = case_status.or(Some(index)),
                STATE_COLUMN => worksite_state = worksite_state.or(Some(index)),
                OCCUPATION_COLUMN => soc_name = soc_name.or(Some(index)),
                _ => {}
            }
        }

        Ok(Self {
            case_status: case_status.ok_or(SchemaError::MissingColumn(STATUS_COLUMN))?,
            worksite_state: worksite_state.ok_or(SchemaError::MissingColumn(STATE_COLUMN))?,
            soc_name: soc_name.ok_or(SchemaError::MissingColumn(OCCUPATION_COLUMN))?,
        })
    }
}

/// Lazy, single-pass reader of [`Application`] records.
///
/// The header row is consumed and validated at construction time; iteration
/// yields one record per data row, in file order.
pub struct ApplicationReader<R: Read> {
    inner: csv::Reader<R>,
    columns: Columns,
    row: StringRecord,
}

impl<R: Read> ApplicationReader<R> {
    /// Wrap a decoded input stream positioned at offset 0.
    pub fn new(input: R, dialect: Dialect) -> ReadResult<Self> {
        let mut inner = ReaderBuilder::new()
            .delimiter(dialect.delimiter)
            .quote(dialect.quote)
            .flexible(true)
            .from_reader(input);

        let header = inner.headers()?;
        let columns = if header.iter().any(|name| name == LEGACY_SENTINEL) {
            if header.len() != LEGACY_FIELDNAMES.len() {
                return Err(SchemaError::LegacyColumnCount {
                    found: header.len(),
                    expected: LEGACY_FIELDNAMES.len(),
                }
                .into());
            }
            Columns::resolve(LEGACY_FIELDNAMES)?
        } else {
            Columns::resolve(header.iter())?
        };

        Ok(Self {
            inner,
            columns,
            row: StringRecord::new(),
        })
    }

    fn field(&self, index: usize) -> String {
        self.row.get(index).unwrap_or("").to_string()
    }
}

impl<R: Read> Iterator for ApplicationReader<R> {
    type Item = ReadResult<Application>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.read_record(&mut self.row) {
            Ok(true) => Some(Ok(Application {
                case_status: self.field(self.columns.case_status),
                worksite_state: self.field(self.columns.worksite_state),
                soc_name: self.field(self.columns.soc_name),
            })),
            Ok(false) => None,
            Err(err) => Some(Err(err.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReadError;
    use crate::sniff::sniff;

    fn read_all(input: &[u8]) -> Vec<Application> {
        // Mirror the pipeline: sniff the sample, then parse from offset 0.
        let format = sniff(input).unwrap();
        ApplicationReader::new(input, format.dialect)
            .unwrap()
            .collect::<ReadResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_current_layout() {
        let input = b"CASE_STATUS,WORKSITE_STATE,SOC_NAME\nCERTIFIED,CA,Engineer\nDENIED,TX,Analyst\n";
        let apps = read_all(input);
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].case_status, "CERTIFIED");
        assert_eq!(apps[0].worksite_state, "CA");
        assert_eq!(apps[1].soc_name, "Analyst");
    }

    #[test]
    fn test_dialect_independence() {
        // The same logical data in two dialects must read identically.
        let comma = b"\"CASE_STATUS\",\"WORKSITE_STATE\",\"SOC_NAME\"\n\"CERTIFIED\",\"CA\",\"Software, Engineer\"\n\"DENIED\",\"TX\",\"Analyst\"\n";
        let semicolon = b"CASE_STATUS;WORKSITE_STATE;SOC_NAME\nCERTIFIED;CA;Software, Engineer\nDENIED;TX;Analyst\n";
        assert_eq!(read_all(comma), read_all(semicolon));
    }

    #[test]
    fn test_legacy_layout_migration() {
        // Build a legacy header plus one data row of 35 positional values.
        let mut legacy_header: Vec<String> =
            (0..35).map(|i| format!("LEGACY_{i}")).collect();
        legacy_header[1] = "LCA_CASE_NUMBER".to_string();
        let values: Vec<String> = (0..35).map(|i| format!("v{i}")).collect();
        let input = format!("{}\n{}\n", legacy_header.join(","), values.join(","));

        let apps = read_all(input.as_bytes());
        assert_eq!(apps.len(), 1);
        // Relabeled positions: CASE_STATUS is the 3rd column, SOC_NAME the
        // 15th, WORKSITE_STATE the 23rd.
        assert_eq!(apps[0].case_status, "v2");
        assert_eq!(apps[0].soc_name, "v14");
        assert_eq!(apps[0].worksite_state, "v22");
    }

    #[test]
    fn test_legacy_layout_wrong_column_count() {
        let input = b"LCA_CASE_NUMBER,CASE_STATUS,OTHER\nx,CERTIFIED,y\n";
        let err = ApplicationReader::new(&input[..], Dialect { delimiter: b',', quote: b'"' })
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ReadError::Schema(SchemaError::LegacyColumnCount { found: 3, expected: 35 })
        ));
    }

    #[test]
    fn test_missing_status_column() {
        let input = b"WORKSITE_STATE,SOC_NAME\nCA,Engineer\n";
        let err = ApplicationReader::new(&input[..], Dialect { delimiter: b',', quote: b'"' })
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ReadError::Schema(SchemaError::MissingColumn(STATUS_COLUMN))
        ));
    }

    #[test]
    fn test_short_row_yields_empty_fields() {
        let input = b"CASE_STATUS,WORKSITE_STATE,SOC_NAME\nCERTIFIED\n";
        let apps = ApplicationReader::new(&input[..], Dialect { delimiter: b',', quote: b'"' })
            .unwrap()
            .collect::<ReadResult<Vec<_>>>()
            .unwrap();
        assert_eq!(apps[0].case_status, "CERTIFIED");
        assert_eq!(apps[0].worksite_state, "");
        assert_eq!(apps[0].soc_name, "");
    }
}
