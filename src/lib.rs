pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::DirectoryConfig;

pub use adapters::{csv::CsvExporter, json::JsonCodec};
pub use crate::core::{directory::DirectoryStore, registry::DepartmentRegistry, service::HrService};
pub use domain::model::{
    Assignment, Department, DepartmentId, DepartmentSummary, Employee, EmployeeRecord, EntityId,
    Member, Person, Registration, Salary,
};
pub use domain::ports::{EmployeeCodec, StructureExporter};
pub use utils::error::{HrError, Result};
