use crate::domain::model::DepartmentSummary;
use crate::domain::ports::StructureExporter;
use crate::utils::error::{HrError, Result};

/// Writes one row per department: `code,name,employee_count,members`.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    delimiter: u8,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn tsv() -> Self {
        Self { delimiter: b'\t' }
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureExporter for CsvExporter {
    fn export(&self, summaries: &[DepartmentSummary]) -> Result<String> {
        let mut writer = ::csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        writer.write_record(["code", "name", "employee_count", "members"])?;
        for summary in summaries {
            let count = summary.employee_count.to_string();
            let members = summary.member_names.join(";");
            writer.write_record([
                summary.code.as_str(),
                summary.name.as_str(),
                count.as_str(),
                members.as_str(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| HrError::IoError(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| HrError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}
