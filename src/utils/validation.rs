use crate::utils::error::{HrError, Result};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_AGE: i64 = 150;
pub const MAX_SALARY: f64 = 1_000_000.0;

static EMPLOYEE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^EMP[0-9]{4}$").expect("employee id pattern is valid"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 名稱去除空白後至少兩個字元，且只能包含字母與空白
pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty()
        && trimmed.chars().count() >= MIN_NAME_LENGTH
        && name.chars().all(|c| c.is_alphabetic() || c.is_whitespace())
}

pub fn is_valid_age(age: i64) -> bool {
    (0..=MAX_AGE).contains(&age)
}

/// 員工編號格式：EMP 加上四位數字，例如 EMP0001
pub fn is_valid_employee_id(employee_id: &str) -> bool {
    !employee_id.is_empty() && EMPLOYEE_ID_PATTERN.is_match(employee_id)
}

pub fn is_valid_salary(salary: f64) -> bool {
    salary.is_finite() && (0.0..=MAX_SALARY).contains(&salary)
}

pub fn validate_name(field_name: &str, name: &str) -> Result<()> {
    if is_valid_name(name) {
        return Ok(());
    }

    let reason = if name.trim().is_empty() {
        "Name cannot be empty or whitespace-only".to_string()
    } else if name.trim().chars().count() < MIN_NAME_LENGTH {
        format!("Name must be at least {} characters", MIN_NAME_LENGTH)
    } else {
        "Name may only contain letters and spaces".to_string()
    };
    Err(HrError::validation(field_name, name, reason))
}

pub fn validate_age(field_name: &str, age: i64) -> Result<()> {
    if is_valid_age(age) {
        return Ok(());
    }
    Err(HrError::validation(
        field_name,
        age,
        format!("Age must be between 0 and {}", MAX_AGE),
    ))
}

pub fn validate_employee_id(field_name: &str, employee_id: &str) -> Result<()> {
    if is_valid_employee_id(employee_id) {
        return Ok(());
    }
    Err(HrError::validation(
        field_name,
        employee_id,
        "Employee id must be 'EMP' followed by 4 digits",
    ))
}

pub fn validate_salary(field_name: &str, salary: f64) -> Result<()> {
    if is_valid_salary(salary) {
        return Ok(());
    }
    Err(HrError::validation(
        field_name,
        salary,
        format!("Salary must be between 0 and {}", MAX_SALARY),
    ))
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(HrError::validation(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(HrError::validation(
            field_name,
            path,
            "Path contains null bytes",
        ));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HrError::validation(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}
