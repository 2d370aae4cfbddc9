//! Monthly emission submissions
//!
//! A [`MonthlySubmission`] is the record handed to the reporting store once a month's
//! material sheet is complete: the period, the sheet as entered and the calculated results.
//! Submissions are stored and exchanged as TOML documents.

use crate::calculator::EmissionResult;
use crate::errors::{CemError, CemResult};
use crate::sheet::MaterialSheet;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month of a reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Month from its number (1 = January)
    pub fn from_number(number: u32) -> Option<Month> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Month::ALL.get(index).copied()
    }

    /// Month number (1 = January)
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = CemError;

    /// Accepts full names, three-letter abbreviations (any case) and numbers 1-12.
    fn from_str(s: &str) -> CemResult<Self> {
        let trimmed = s.trim();
        let invalid = || CemError::InvalidMonth(s.to_string());

        if let Ok(number) = trimmed.parse::<u32>() {
            return Month::from_number(number).ok_or_else(invalid);
        }
        if trimmed.len() < 3 {
            return Err(invalid());
        }
        Month::ALL
            .into_iter()
            .find(|month| {
                month.name().eq_ignore_ascii_case(trimmed)
                    || (trimmed.len() == 3 && month.name()[..3].eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(invalid)
    }
}

/// The emissions record for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySubmission {
    pub month: Month,
    pub year: i32,
    /// Caller supplied timestamp (e.g. RFC 3339) of when the record was saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
    pub form_data: MaterialSheet,
    pub calculation_results: EmissionResult,
}

impl MonthlySubmission {
    /// Create a submission, calculating results from `sheet`.
    pub fn new(month: Month, year: i32, sheet: MaterialSheet) -> Self {
        let calculation_results = sheet.calculate();
        Self {
            month,
            year,
            recorded_at: None,
            form_data: sheet,
            calculation_results,
        }
    }

    pub fn with_recorded_at(mut self, recorded_at: impl Into<String>) -> Self {
        self.recorded_at = Some(recorded_at.into());
        self
    }

    /// Refresh the results after `form_data` has been edited.
    pub fn recalculate(&mut self) -> &EmissionResult {
        self.calculation_results = self.form_data.calculate();
        &self.calculation_results
    }

    /// Reporting period label, e.g. "March 2024"
    pub fn period(&self) -> String {
        format!("{} {}", self.month, self.year)
    }

    /// Read a submission from a TOML document.
    ///
    /// Stored results are kept as they were saved; call [`recalculate`](Self::recalculate)
    /// to derive them from the sheet again.
    pub fn from_toml_str(document: &str) -> CemResult<Self> {
        let submission: Self = toml::from_str(document)?;
        debug!("Read submission for {}", submission.period());
        Ok(submission)
    }

    pub fn to_toml_string(&self) -> CemResult<String> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::ClinkerRow;
    use is_close::is_close;

    fn sheet() -> MaterialSheet {
        MaterialSheet {
            processed_materials: vec![ClinkerRow {
                name: "Kiln 1".to_string(),
                value: Some("1000".into()),
                cao_content: Some("65".into()),
                mgo_content: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_month_parsing() {
        assert_eq!("March".parse::<Month>().unwrap(), Month::March);
        assert_eq!("sep".parse::<Month>().unwrap(), Month::September);
        assert_eq!("DECEMBER".parse::<Month>().unwrap(), Month::December);
        assert_eq!(" 7 ".parse::<Month>().unwrap(), Month::July);
        assert!(matches!("13".parse::<Month>(), Err(CemError::InvalidMonth(_))));
        assert!("0".parse::<Month>().is_err());
        assert!("Ma".parse::<Month>().is_err());
        assert!("Marc".parse::<Month>().is_err());
    }

    #[test]
    fn test_month_numbers() {
        for (index, month) in Month::ALL.into_iter().enumerate() {
            assert_eq!(month.number() as usize, index + 1);
            assert_eq!(Month::from_number(month.number()), Some(month));
        }
        assert_eq!(Month::from_number(0), None);
    }

    #[test]
    fn test_new_calculates_results() {
        let submission = MonthlySubmission::new(Month::March, 2024, sheet());
        assert_eq!(submission.period(), "March 2024");
        assert!(is_close!(
            submission.calculation_results.uncorrected_co2_emissions,
            650.0 / 56.0774 * 44.01
        ));
    }

    #[test]
    fn test_recalculate_after_edit() {
        let mut submission = MonthlySubmission::new(Month::March, 2024, sheet());
        submission.form_data.processed_materials[0].value = Some("2000".into());

        let result = submission.recalculate();
        assert_eq!(result.total_clinker_production, 2000.0);
        assert_eq!(result.total_cao_amount_clinker, 1300.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let submission = MonthlySubmission::new(Month::November, 2023, sheet())
            .with_recorded_at("2023-12-01T09:30:00Z");
        let document = submission.to_toml_string().unwrap();

        assert!(document.contains("month = \"November\""));
        assert!(document.contains("[calculationResults]"));

        let read = MonthlySubmission::from_toml_str(&document).unwrap();
        assert_eq!(read, submission);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = MonthlySubmission::from_toml_str("month = \"Smarch\"\nyear = 2024\n");
        assert!(matches!(result, Err(CemError::TomlDeserialize(_))));
    }
}
