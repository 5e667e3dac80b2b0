use crate::domain::model::{Department, DepartmentId, Employee};
use crate::utils::error::{HrError, Result};

/// Owns departments and the employee/department membership on both sides.
#[derive(Debug, Default)]
pub struct DepartmentRegistry {
    departments: Vec<Department>,
    next_id: u32,
}

impl DepartmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建立新的空部門。重複的代碼允許存在，但查詢只會找到第一個
    pub fn create(&mut self, name: &str, code: &str) -> DepartmentId {
        if self.find_by_code(code).is_some() {
            tracing::debug!(
                "Department code {} already registered; lookups resolve to the first one",
                code
            );
        }

        let id = DepartmentId(self.next_id);
        self.next_id += 1;
        self.departments.push(Department::new(id, name, code));
        tracing::info!("Created department: {} ({})", name, code);
        id
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.matches_code(code))
    }

    pub fn get(&self, id: DepartmentId) -> Option<&Department> {
        self.departments.iter().find(|d| d.id() == id)
    }

    fn get_mut(&mut self, id: DepartmentId) -> Result<&mut Department> {
        self.departments
            .iter_mut()
            .find(|d| d.id() == id)
            .ok_or_else(|| HrError::not_found("department", id))
    }

    /// Returns `false` when the employee already belongs to `department`.
    ///
    /// An employee assigned elsewhere is moved: it leaves the previous
    /// department before joining this one.
    pub fn add_employee(
        &mut self,
        department: DepartmentId,
        employee: &mut Employee,
    ) -> Result<bool> {
        let target = self.get_mut(department)?;
        if target.contains(employee.id()) {
            return Ok(false);
        }
        target.push_member(employee.id());

        if let Some(previous) = employee.department().filter(|p| *p != department) {
            if let Ok(old) = self.get_mut(previous) {
                old.remove_member(employee.id());
            }
        }
        employee.set_department(Some(department));

        tracing::info!("Added {} to department {}", employee.name(), department);
        Ok(true)
    }

    pub fn remove_employee(
        &mut self,
        department: DepartmentId,
        employee: &mut Employee,
    ) -> Result<bool> {
        let target = self.get_mut(department)?;
        if !target.remove_member(employee.id()) {
            return Ok(false);
        }
        if employee.department() == Some(department) {
            employee.set_department(None);
        }

        tracing::info!("Removed {} from department {}", employee.name(), department);
        Ok(true)
    }

    pub fn departments(&self) -> std::slice::Iter<'_, Department> {
        self.departments.iter()
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }
}
