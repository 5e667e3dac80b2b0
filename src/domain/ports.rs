use crate::domain::model::{DepartmentSummary, EmployeeRecord};
use crate::utils::error::Result;

/// Converts employees to and from a structured text form.
pub trait EmployeeCodec {
    fn encode(&self, records: &[EmployeeRecord]) -> Result<String>;
    fn decode(&self, input: &str) -> Result<Vec<EmployeeRecord>>;
}

pub trait StructureExporter {
    fn export(&self, summaries: &[DepartmentSummary]) -> Result<String>;
}
