use crate::core::service::HrService;
use crate::domain::model::{Assignment, EmployeeRecord, Person};
use crate::utils::error::{HrError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub directory: DirectoryInfo,
    #[serde(default)]
    pub departments: Vec<DepartmentConfig>,
    #[serde(default)]
    pub employees: Vec<EmployeeConfig>,
    #[serde(default)]
    pub raises: Vec<RaiseConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentConfig {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeConfig {
    pub name: String,
    pub age: Option<i64>,
    pub birth_date: Option<NaiveDate>,
    pub employee_id: String,
    pub salary: f64,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaiseConfig {
    pub employee_id: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

/// 載入結果摘要
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub registered: usize,
    pub rejected: Vec<String>,
    pub unassigned: Vec<String>,
    pub raises_applied: usize,
    pub raises_skipped: Vec<String>,
}

impl EmployeeConfig {
    /// 有 age 時直接使用，否則依 birth_date 推算
    pub fn resolve_age(&self, today: NaiveDate) -> Result<i64> {
        match (self.age, self.birth_date) {
            (Some(age), _) => Ok(age),
            (None, Some(birth_date)) => Ok(Person::age_on(birth_date, today)),
            (None, None) => Err(HrError::ConfigError {
                field: format!("employees.{}", self.employee_id),
                message: "Either age or birth_date is required".to_string(),
            }),
        }
    }

    pub fn to_record(&self, today: NaiveDate) -> Result<EmployeeRecord> {
        Ok(EmployeeRecord {
            name: self.name.clone(),
            age: self.resolve_age(today)?,
            employee_id: self.employee_id.clone(),
            salary: self.salary,
            department: self.department.clone(),
        })
    }
}

impl DirectoryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| HrError::ConfigError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COMPANY_NAME})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// 驗證檔案結構；員工欄位交給 HrService 逐筆驗證
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("directory.name", &self.directory.name)?;

        for department in &self.departments {
            validate_non_empty_string("departments.name", &department.name)?;
            validate_non_empty_string("departments.code", &department.code)?;
        }

        for employee in &self.employees {
            if employee.age.is_none() && employee.birth_date.is_none() {
                return Err(HrError::ConfigError {
                    field: format!("employees.{}", employee.employee_id),
                    message: "Either age or birth_date is required".to_string(),
                });
            }
        }

        for raise in &self.raises {
            validate_non_empty_string("raises.employee_id", &raise.employee_id)?;
        }

        Ok(())
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }

    /// Builds a service holding every department and every employee that
    /// passes validation. Raises are not applied here.
    pub fn seed(&self, today: NaiveDate) -> (HrService, SeedReport) {
        let mut service = HrService::new();
        let mut report = SeedReport::default();

        for department in &self.departments {
            service.create_department(&department.name, &department.code);
        }

        let mut records = Vec::with_capacity(self.employees.len());
        for employee in &self.employees {
            match employee.to_record(today) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", employee.name, e);
                    report.rejected.push(format!("{}: {}", employee.name, e));
                }
            }
        }

        let names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        for (name, result) in names.into_iter().zip(service.import_records(records)) {
            match result {
                Ok(registration) => {
                    report.registered += 1;
                    if let Assignment::DepartmentNotFound(code) = registration.assignment {
                        report.unassigned.push(format!("{} ({})", name, code));
                    }
                }
                Err(e) => {
                    tracing::warn!("Rejected {}: {}", name, e);
                    report.rejected.push(format!("{}: {}", name, e));
                }
            }
        }

        (service, report)
    }

    pub fn apply_raises(&self, service: &mut HrService, report: &mut SeedReport) {
        for raise in &self.raises {
            let target = service
                .directory()
                .find_by_employee_id(&raise.employee_id)
                .map(|e| e.id());

            let applied = match target {
                Some(id) => service.give_raise(id, raise.percentage),
                None => Err(HrError::not_found("employee", &raise.employee_id)),
            };

            match applied {
                Ok(_) => report.raises_applied += 1,
                Err(e) => {
                    tracing::warn!("Raise for {} skipped: {}", raise.employee_id, e);
                    report.raises_skipped.push(raise.employee_id.clone());
                }
            }
        }
    }
}

impl Validate for DirectoryConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[directory]
name = "Acme"

[[departments]]
name = "Information Technology"
code = "IT"

[[employees]]
name = "John Smith"
age = 30
employee_id = "EMP0001"
salary = 75000.0
department = "IT"

[[employees]]
name = "J"
age = 30
employee_id = "EMP0002"
salary = 50000.0
department = "IT"

[[employees]]
name = "Jane Doe"
birth_date = "1990-06-15"
employee_id = "EMP0003"
salary = 60000.0
department = "XX"

[[raises]]
employee_id = "EMP0001"
percentage = 10.0

[[raises]]
employee_id = "EMP0999"
percentage = 5.0
"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_parse_basic_toml_config() {
        let config = DirectoryConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.directory.name, "Acme");
        assert_eq!(config.departments.len(), 1);
        assert_eq!(config.employees.len(), 3);
        assert_eq!(config.log_level(), "info");
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_seed_and_raises() {
        let config = DirectoryConfig::from_toml_str(BASIC).unwrap();
        let (mut service, mut report) = config.seed(today());

        assert_eq!(report.registered, 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.unassigned, vec!["Jane Doe (XX)".to_string()]);

        let jane = service.find_by_name("Jane Doe").unwrap();
        assert_eq!(jane.as_employee().unwrap().age(), 33);

        config.apply_raises(&mut service, &mut report);
        assert_eq!(report.raises_applied, 1);
        assert_eq!(report.raises_skipped, vec!["EMP0999".to_string()]);

        let john = service.directory().find_by_employee_id("EMP0001").unwrap();
        assert_eq!(john.salary().amount(), 82_500.0);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ORG_DIRECTORY_TEST_NAME", "Globex");

        let toml_content = r#"
[directory]
name = "${ORG_DIRECTORY_TEST_NAME}"
"#;

        let config = DirectoryConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.directory.name, "Globex");

        std::env::remove_var("ORG_DIRECTORY_TEST_NAME");
    }

    #[test]
    fn test_missing_age_fails_validation() {
        let toml_content = r#"
[directory]
name = "Acme"

[[employees]]
name = "No Age"
employee_id = "EMP0001"
salary = 1000.0
"#;

        let config = DirectoryConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_department_code_fails_validation() {
        let toml_content = r#"
[directory]
name = "Acme"

[[departments]]
name = "Sales"
code = "  "
"#;

        let config = DirectoryConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = DirectoryConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.directory.name, "Acme");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = DirectoryConfig::from_toml_str("[directory").unwrap_err();
        assert!(matches!(err, HrError::ConfigError { .. }));
    }
}
