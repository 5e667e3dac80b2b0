pub mod directory;
pub mod registry;
pub mod service;

pub use crate::domain::model::{Department, Employee, Member, Person};
pub use crate::utils::error::Result;
