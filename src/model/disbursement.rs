use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Lowest gross salary the form accepts.
pub const MIN_GROSS_SALARY: f64 = 850.0;

const SECONDARY_RATE: f64 = 0.20;
const EXPENSE_RATE: f64 = 0.167;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("All fields are required.")]
    MissingField,
    #[error("Salary must be a number of at least 850.00.")]
    InvalidSalary,
    #[error("Date must be a real calendar date in YYYY-MM-DD format.")]
    InvalidDate,
}

/// One salary disbursement, split across the three accounts.
///
/// Amounts are kept unrounded; 2-decimal rounding happens where they are
/// rendered (slip file, API response).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryRecord {
    pub name: String,
    pub worker_id: String,
    pub date: NaiveDate,
    pub gross_salary: f64,
    pub secondary_amount: f64,
    pub expense_amount: f64,
    pub primary_amount: f64,
}

impl SalaryRecord {
    /// Validates the four raw form fields and computes the split.
    ///
    /// Secondary account takes 20% of gross, expenses take 16.7% of what is
    /// left, the primary account gets the remainder.
    pub fn compute(
        name: &str,
        worker_id: &str,
        date: &str,
        salary_text: &str,
    ) -> Result<Self, SplitError> {
        let name = name.trim();
        let worker_id = worker_id.trim();
        let date = date.trim();
        let salary_text = salary_text.trim();

        if name.is_empty() || worker_id.is_empty() || date.is_empty() || salary_text.is_empty() {
            return Err(SplitError::MissingField);
        }

        let gross: f64 = salary_text.parse().map_err(|_| SplitError::InvalidSalary)?;
        if !gross.is_finite() || gross < MIN_GROSS_SALARY {
            return Err(SplitError::InvalidSalary);
        }

        let date =
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| SplitError::InvalidDate)?;

        let secondary = SECONDARY_RATE * gross;
        let remaining = gross - secondary;
        let expense = EXPENSE_RATE * remaining;
        let primary = remaining - expense;

        Ok(Self {
            name: name.to_string(),
            worker_id: worker_id.to_string(),
            date,
            gross_salary: gross,
            secondary_amount: secondary,
            expense_amount: expense,
            primary_amount: primary,
        })
    }

    /// Slip file name, derived from the identifying fields.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.txt",
            self.name,
            self.worker_id,
            self.date.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round2(v: f64) -> f64 {
        (v * 100.0).round() / 100.0
    }

    #[test]
    fn splits_the_reference_submission() {
        let rec = SalaryRecord::compute("Alice", "007", "2024-03-15", "1000").unwrap();
        assert_eq!(round2(rec.secondary_amount), 200.00);
        assert_eq!(round2(rec.expense_amount), 133.60);
        assert_eq!(round2(rec.primary_amount), 666.40);
        assert_eq!(rec.gross_salary, 1000.0);
        assert_eq!(rec.file_name(), "Alice_007_2024-03-15.txt");
    }

    #[test]
    fn rounded_parts_sum_back_to_gross_within_a_cent() {
        for gross in [850.0, 850.01, 999.99, 1234.56, 87654.32] {
            let rec =
                SalaryRecord::compute("A", "1", "2024-01-01", &gross.to_string()).unwrap();
            let sum = round2(rec.secondary_amount)
                + round2(rec.expense_amount)
                + round2(rec.primary_amount);
            assert!(
                (sum - gross).abs() <= 0.01,
                "gross {gross}: rounded parts sum to {sum}"
            );
        }
    }

    #[test]
    fn rejects_salary_below_floor() {
        assert_eq!(
            SalaryRecord::compute("Alice", "007", "2024-03-15", "849.99"),
            Err(SplitError::InvalidSalary)
        );
    }

    #[test]
    fn rejects_non_numeric_salary() {
        for text in ["abc", "12,5", "NaN", "inf"] {
            assert_eq!(
                SalaryRecord::compute("Alice", "007", "2024-03-15", text),
                Err(SplitError::InvalidSalary),
                "salary text {text:?}"
            );
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        for date in ["2024/01/01", "2024-13-40", "15-03-2024", "yesterday"] {
            assert_eq!(
                SalaryRecord::compute("Alice", "007", date, "1000"),
                Err(SplitError::InvalidDate),
                "date {date:?}"
            );
        }
    }

    #[test]
    fn rejects_any_empty_field() {
        let cases = [
            ("", "007", "2024-03-15", "1000"),
            ("Alice", "", "2024-03-15", "1000"),
            ("Alice", "007", "", "1000"),
            ("Alice", "007", "2024-03-15", ""),
            ("   ", "007", "2024-03-15", "1000"),
        ];
        for (name, id, date, salary) in cases {
            assert_eq!(
                SalaryRecord::compute(name, id, date, salary),
                Err(SplitError::MissingField)
            );
        }
    }

    #[test]
    fn missing_field_wins_over_other_errors() {
        // Empty name plus an invalid salary still reports the missing field.
        assert_eq!(
            SalaryRecord::compute("", "007", "2024-03-15", "abc"),
            Err(SplitError::MissingField)
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let rec = SalaryRecord::compute(" Alice ", " 007 ", " 2024-03-15 ", " 1000 ").unwrap();
        assert_eq!(rec.name, "Alice");
        assert_eq!(rec.worker_id, "007");
    }
}
