use std::fs;
use std::path::PathBuf;

use anyhow::{Result, anyhow};

use crate::model::disbursement::SalaryRecord;

/// Writes disbursement slips as plain-text files under one output directory.
#[derive(Clone)]
pub struct RecordStore {
    output_dir: PathBuf,
}

impl RecordStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Fixed slip layout, one labeled line per field, amounts at 2 decimals.
    pub fn render(record: &SalaryRecord) -> String {
        format!(
            "Name: {}\nID: {}\nDate: {}\nSalary: {:.2}\nSecondary Account (20%): {:.2}\nExpenses (16.7%): {:.2}\nPrimary Account: {:.2}\n",
            record.name,
            record.worker_id,
            record.date.format("%Y-%m-%d"),
            record.gross_salary,
            record.secondary_amount,
            record.expense_amount,
            record.primary_amount,
        )
    }

    /// Writes the slip, replacing any previous file of the same name.
    ///
    /// The file is fully written and closed before the caller moves on to the
    /// upload, so an upload failure never leaves a half-written slip behind.
    pub fn write(&self, record: &SalaryRecord) -> Result<PathBuf> {
        let file_name = record.file_name();
        if file_name.contains(['/', '\\']) {
            return Err(anyhow!(
                "record fields must not contain path separators: {file_name:?}"
            ));
        }

        fs::create_dir_all(&self.output_dir)
            .map_err(|e| anyhow!("failed to create {:?}: {e}", self.output_dir))?;

        let path = self.output_dir.join(&file_name);
        fs::write(&path, Self::render(record))
            .map_err(|e| anyhow!("failed to write {path:?}: {e}"))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> SalaryRecord {
        SalaryRecord::compute("Alice", "007", "2024-03-15", "1000").unwrap()
    }

    #[test]
    fn renders_the_fixed_slip_layout() {
        let text = RecordStore::render(&alice());
        assert_eq!(
            text,
            "Name: Alice\n\
             ID: 007\n\
             Date: 2024-03-15\n\
             Salary: 1000.00\n\
             Secondary Account (20%): 200.00\n\
             Expenses (16.7%): 133.60\n\
             Primary Account: 666.40\n"
        );
    }

    #[test]
    fn writes_under_the_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path());

        let path = store.write(&alice()).unwrap();
        assert_eq!(path, dir.path().join("Alice_007_2024-03-15.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), RecordStore::render(&alice()));
    }

    #[test]
    fn resubmission_overwrites_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path());

        let first = store.write(&alice()).unwrap();
        let second = store.write(&alice()).unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn creates_the_output_dir_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("nested/slips"));
        let path = store.write(&alice()).unwrap();
        assert!(path.starts_with(dir.path().join("nested/slips")));
    }

    #[test]
    fn rejects_fields_that_escape_the_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path());

        let rec = SalaryRecord::compute("../evil", "007", "2024-03-15", "1000").unwrap();
        assert!(store.write(&rec).is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
