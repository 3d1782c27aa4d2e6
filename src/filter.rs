//! Certified-record filtering.
//!
//! Only applications whose status equals [`CERTIFIED_STATUS`] are counted.
//! The match is exact: no case folding, no trimming.

use crate::error::ReadResult;
use crate::reader::Application;

/// Status value of a certified application.
pub const CERTIFIED_STATUS: &str = "CERTIFIED";

/// Keep only certified applications from a record stream.
///
/// Pull-driven, one record in flight. Errors from the underlying reader
/// pass through unchanged.
pub fn certified<I>(records: I) -> Certified<I>
where
    I: Iterator<Item = ReadResult<Application>>,
{
    Certified { inner: records }
}

/// Iterator returned by [`certified`].
pub struct Certified<I> {
    inner: I,
}

impl<I> Iterator for Certified<I>
where
    I: Iterator<Item = ReadResult<Application>>,
{
    type Item = ReadResult<Application>;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.inner.by_ref() {
            match item {
                Ok(app) if app.case_status != CERTIFIED_STATUS => continue,
                other => return Some(other),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ReadError, SchemaError};

    fn app(status: &str) -> Application {
        Application {
            case_status: status.to_string(),
            worksite_state: "CA".to_string(),
            soc_name: "Engineer".to_string(),
        }
    }

    #[test]
    fn test_keeps_only_certified() {
        let input = vec![
            Ok(app("CERTIFIED")),
            Ok(app("DENIED")),
            Ok(app("CERTIFIED-WITHDRAWN")),
            Ok(app("CERTIFIED")),
        ];
        let kept: Vec<_> = certified(input.into_iter())
            .collect::<ReadResult<Vec<_>>>()
            .unwrap();
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_match_is_exact() {
        let input = vec![
            Ok(app("certified")),
            Ok(app(" CERTIFIED")),
            Ok(app("CERTIFIED ")),
        ];
        assert_eq!(certified(input.into_iter()).count(), 0);
    }

    #[test]
    fn test_errors_pass_through() {
        let input = vec![
            Ok(app("DENIED")),
            Err(ReadError::Schema(SchemaError::MissingColumn("CASE_STATUS"))),
            Ok(app("CERTIFIED")),
        ];
        let items: Vec<_> = certified(input.into_iter()).collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_err());
        assert!(items[1].is_ok());
    }

    #[test]
    fn test_empty_stream() {
        assert_eq!(certified(std::iter::empty()).count(), 0);
    }
}
