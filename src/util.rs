extern crate ini;

use crate::error::{FillSpreadError, Result};
use chrono::NaiveDate;
use std::io;

mod args;
pub use args::{add_options_and_parse, UserArgs};

pub mod config_file;
pub use config_file::{load_config, FillSpreadConfig};

pub mod common;
pub use common::*;

/// Parses a `YYYY/M/D` date, zero padding optional.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y/%m/%d")
        .map_err(|_| FillSpreadError::InvalidDate(s.to_string()))
}

/// Turns transport failures and non-2xx statuses into errors.
pub fn check_response(resp: ureq::Response) -> Result<ureq::Response> {
    if let Some(e) = resp.synthetic_error() {
        return Err(FillSpreadError::Io(io::Error::new(
            io::ErrorKind::Other,
            e.to_string(),
        )));
    }
    if resp.ok() {
        Ok(resp)
    } else {
        Err(FillSpreadError::Http {
            status: resp.status(),
            url: resp.get_url().to_string(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2011/6/30").unwrap(),
            NaiveDate::from_ymd_opt(2011, 6, 30).unwrap()
        );
        assert_eq!(
            parse_date("2011/06/03").unwrap(),
            NaiveDate::from_ymd_opt(2011, 6, 3).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        for bad in &["2011-06-30", "2011/13/1", "2011/2/30", "yesterday", "2011/6"] {
            match parse_date(bad) {
                Err(FillSpreadError::InvalidDate(s)) => assert_eq!(s, *bad),
                other => panic!("{:?} parsed as {:?}", bad, other),
            }
        }
    }
}
