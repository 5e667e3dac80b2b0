use crate::core::directory::DirectoryStore;
use crate::core::registry::DepartmentRegistry;
use crate::domain::model::{
    Assignment, Department, DepartmentId, DepartmentSummary, Employee, EmployeeRecord, EntityId,
    Member, Person, Registration, Salary,
};
use crate::utils::error::{HrError, Result};
use crate::utils::validation::{
    is_valid_salary, validate_age, validate_employee_id, validate_name, validate_salary,
};
use std::slice;

/// Facade over the directory and the department registry.
///
/// Every person and employee enters the directory through this type, after
/// validation. Department membership changes go through the registry so both
/// sides of the link are updated in the same call.
#[derive(Debug, Default)]
pub struct HrService {
    directory: DirectoryStore,
    registry: DepartmentRegistry,
}

impl HrService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(&self) -> &DirectoryStore {
        &self.directory
    }

    pub fn registry(&self) -> &DepartmentRegistry {
        &self.registry
    }

    pub fn create_department(&mut self, name: &str, code: &str) -> DepartmentId {
        self.registry.create(name, code)
    }

    pub fn register_person(&mut self, name: &str, age: i64) -> Result<EntityId> {
        validate_name("name", name)?;
        validate_age("age", age)?;

        let id = self.directory.next_id();
        self.directory.add(Member::Person(Person::new(id, name, age)));
        Ok(id)
    }

    /// 驗證順序：name -> age -> employee_id -> salary，遇到第一個錯誤就中止
    ///
    /// A missing department is not an error: the employee stays registered
    /// and unassigned, and the returned [`Registration`] says so.
    pub fn create_and_register_employee(
        &mut self,
        name: &str,
        age: i64,
        employee_id: &str,
        salary: f64,
        department_code: &str,
    ) -> Result<Registration> {
        self.register_employee(
            name,
            age,
            employee_id,
            salary,
            Some(department_code),
            SalaryCheck::HiringRange,
        )
    }

    fn register_employee(
        &mut self,
        name: &str,
        age: i64,
        employee_id: &str,
        salary: f64,
        department_code: Option<&str>,
        salary_check: SalaryCheck,
    ) -> Result<Registration> {
        validate_name("name", name)?;
        validate_age("age", age)?;
        validate_employee_id("employee_id", employee_id)?;
        let salary = match salary_check {
            SalaryCheck::HiringRange => {
                validate_salary("salary", salary)?;
                Salary::from_amount(salary)
            }
            SalaryCheck::FiniteOnly => Salary::try_from_amount(salary).ok_or_else(|| {
                HrError::validation("salary", salary, "Salary must be a finite amount")
            })?,
        };

        let id = self.directory.next_id();
        let employee = Employee::new(Person::new(id, name, age), employee_id, salary);
        self.directory.add(Member::Employee(employee));

        let assignment = match department_code {
            None => Assignment::Unassigned,
            Some(code) => match self.registry.find_by_code(code).map(Department::id) {
                Some(department) => {
                    self.link(department, id)?;
                    Assignment::Assigned(department)
                }
                None => {
                    tracing::warn!("Department with code {} not found", code);
                    Assignment::DepartmentNotFound(code.to_string())
                }
            },
        };

        Ok(Registration {
            employee: id,
            assignment,
        })
    }

    /// Raises are applied as given: no bound on the percentage and no
    /// re-validation of the resulting salary.
    ///
    /// A non-finite percentage, or a result that cannot be held in cents, is
    /// rejected and the salary is left unchanged.
    pub fn give_raise(&mut self, employee: EntityId, percentage: f64) -> Result<Salary> {
        if !percentage.is_finite() {
            return Err(HrError::validation(
                "percentage",
                percentage,
                "Percentage must be a finite number",
            ));
        }

        let target = self
            .directory
            .employee_mut(employee)
            .ok_or_else(|| HrError::not_found("employee", employee))?;

        let raised = target.salary().raised_by(percentage).ok_or_else(|| {
            HrError::validation(
                "percentage",
                percentage,
                format!("Raised salary of {} is out of range", target.name()),
            )
        })?;
        if !is_valid_salary(raised.amount()) {
            tracing::warn!(
                "Salary of {} is now {}, outside the range accepted at hiring",
                target.name(),
                raised
            );
        }
        target.set_salary(raised);

        tracing::info!(
            "Gave {}% raise to {}: new salary {}",
            percentage,
            target.name(),
            raised
        );
        Ok(raised)
    }

    pub fn assign_to_department(
        &mut self,
        employee: EntityId,
        code: &str,
    ) -> Result<DepartmentId> {
        let department = self
            .registry
            .find_by_code(code)
            .map(Department::id)
            .ok_or_else(|| HrError::not_found("department", code))?;
        self.link(department, employee)?;
        Ok(department)
    }

    /// Returns `false` when the employee was not assigned anywhere.
    pub fn unassign(&mut self, employee: EntityId) -> Result<bool> {
        let target = self
            .directory
            .employee_mut(employee)
            .ok_or_else(|| HrError::not_found("employee", employee))?;

        match target.department() {
            Some(department) => self.registry.remove_employee(department, target),
            None => Ok(false),
        }
    }

    fn link(&mut self, department: DepartmentId, employee: EntityId) -> Result<bool> {
        let target = self
            .directory
            .employee_mut(employee)
            .ok_or_else(|| HrError::not_found("employee", employee))?;
        self.registry.add_employee(department, target)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Member> {
        self.directory.find_by_name(name)
    }

    pub fn find_department(&self, code: &str) -> Option<&Department> {
        self.registry.find_by_code(code)
    }

    pub fn employee(&self, id: EntityId) -> Option<&Employee> {
        self.directory.employee(id)
    }

    pub fn department_of(&self, employee: EntityId) -> Option<&Department> {
        self.employee(employee)
            .and_then(Employee::department)
            .and_then(|d| self.registry.get(d))
    }

    pub fn department_structure(&self) -> DepartmentStructure<'_> {
        DepartmentStructure {
            directory: &self.directory,
            registry: &self.registry,
        }
    }

    pub fn display_department_structure(&self) -> String {
        let mut lines = Vec::new();
        for summary in self.department_structure() {
            tracing::info!(
                "Department: {} ({}), employees: {}",
                summary.name,
                summary.code,
                summary.employee_count
            );
            lines.push(summary.to_string());
        }
        lines.join("\n")
    }

    pub fn export_records(&self) -> Vec<EmployeeRecord> {
        self.directory
            .employees()
            .map(|e| EmployeeRecord {
                name: e.name().to_string(),
                age: i64::from(e.age()),
                employee_id: e.employee_id().to_string(),
                salary: e.salary().amount(),
                department: e
                    .department()
                    .and_then(|d| self.registry.get(d))
                    .map(|d| d.code().to_string()),
            })
            .collect()
    }

    /// 逐筆匯入；單筆驗證失敗不影響其他筆
    pub fn import_records(&mut self, records: Vec<EmployeeRecord>) -> Vec<Result<Registration>> {
        self.load_records(records, SalaryCheck::HiringRange)
    }

    /// Re-loads records produced by [`export_records`](Self::export_records).
    ///
    /// Salaries are only required to be finite, so employees whose raises
    /// took them outside the hiring range survive the round trip.
    pub fn restore_records(&mut self, records: Vec<EmployeeRecord>) -> Vec<Result<Registration>> {
        self.load_records(records, SalaryCheck::FiniteOnly)
    }

    fn load_records(
        &mut self,
        records: Vec<EmployeeRecord>,
        salary_check: SalaryCheck,
    ) -> Vec<Result<Registration>> {
        records
            .into_iter()
            .map(|r| {
                self.register_employee(
                    &r.name,
                    r.age,
                    &r.employee_id,
                    r.salary,
                    r.department.as_deref(),
                    salary_check,
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum SalaryCheck {
    HiringRange,
    FiniteOnly,
}

/// Read-only view of every department. Each call to [`iter`](Self::iter)
/// starts a fresh pass.
#[derive(Debug, Clone, Copy)]
pub struct DepartmentStructure<'a> {
    directory: &'a DirectoryStore,
    registry: &'a DepartmentRegistry,
}

impl<'a> DepartmentStructure<'a> {
    pub fn iter(&self) -> DepartmentSummaries<'a> {
        DepartmentSummaries {
            departments: self.registry.departments(),
            directory: self.directory,
        }
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl<'a> IntoIterator for DepartmentStructure<'a> {
    type Item = DepartmentSummary;
    type IntoIter = DepartmentSummaries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct DepartmentSummaries<'a> {
    departments: slice::Iter<'a, Department>,
    directory: &'a DirectoryStore,
}

impl Iterator for DepartmentSummaries<'_> {
    type Item = DepartmentSummary;

    fn next(&mut self) -> Option<Self::Item> {
        let department = self.departments.next()?;
        let member_names = department
            .members()
            .iter()
            .filter_map(|id| self.directory.get(*id))
            .map(|m| m.name().to_string())
            .collect();

        Some(DepartmentSummary {
            name: department.name().to_string(),
            code: department.code().to_string(),
            employee_count: department.employee_count(),
            member_names,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.departments.size_hint()
    }
}
