use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub(crate) u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DepartmentId(pub(crate) u32);

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dept-{}", self.0)
    }
}

/// 薪資以「分」為單位儲存，避免浮點誤差
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Salary(i64);

impl Salary {
    pub fn from_amount(amount: f64) -> Self {
        Salary((amount * 100.0).round() as i64)
    }

    /// Like [`from_amount`](Self::from_amount), but `None` when the amount
    /// is not finite or does not fit in cents.
    pub fn try_from_amount(amount: f64) -> Option<Self> {
        checked_cents(amount * 100.0).map(Salary)
    }

    pub fn from_cents(cents: i64) -> Self {
        Salary(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn amount(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiplies by `1 + percentage / 100`, rounded to the nearest cent.
    ///
    /// `None` when the result is not finite or overflows `i64` cents.
    pub fn raised_by(self, percentage: f64) -> Option<Self> {
        checked_cents(self.0 as f64 * (1.0 + percentage / 100.0)).map(Salary)
    }
}

// i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
fn checked_cents(value: f64) -> Option<i64> {
    let rounded = value.round();
    if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
        Some(rounded as i64)
    } else {
        None
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    id: EntityId,
    name: String,
    age: u32,
}

impl Person {
    pub(crate) fn new(id: EntityId, name: &str, age: i64) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            age: clamp_age(age),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// 依出生日期計算在指定日期時的年齡（未滿生日不算一歲）
    pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i64 {
        let mut years = (today.year() - birth_date.year()) as i64;
        if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
            years -= 1;
        }
        years
    }
}

fn clamp_age(age: i64) -> u32 {
    age.clamp(0, u32::MAX as i64) as u32
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}, Age: {}", self.name, self.age)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    person: Person,
    employee_id: String,
    salary: Salary,
    department: Option<DepartmentId>,
}

impl Employee {
    pub(crate) fn new(person: Person, employee_id: &str, salary: Salary) -> Self {
        Self {
            person,
            employee_id: employee_id.to_string(),
            salary,
            department: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.person.id
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn name(&self) -> &str {
        self.person.name()
    }

    pub fn age(&self) -> u32 {
        self.person.age()
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn salary(&self) -> Salary {
        self.salary
    }

    pub fn department(&self) -> Option<DepartmentId> {
        self.department
    }

    pub fn is_assigned(&self) -> bool {
        self.department.is_some()
    }

    pub(crate) fn set_salary(&mut self, salary: Salary) {
        self.salary = salary;
    }

    // 只由 DepartmentRegistry 維護，保持雙向一致
    pub(crate) fn set_department(&mut self, department: Option<DepartmentId>) {
        self.department = department;
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Employee ID: {}, Salary: {}",
            self.person, self.employee_id, self.salary
        )
    }
}

/// Anything the directory can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Person(Person),
    Employee(Employee),
}

impl Member {
    pub fn id(&self) -> EntityId {
        match self {
            Member::Person(p) => p.id(),
            Member::Employee(e) => e.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Member::Person(p) => p.name(),
            Member::Employee(e) => e.name(),
        }
    }

    pub fn as_employee(&self) -> Option<&Employee> {
        match self {
            Member::Employee(e) => Some(e),
            Member::Person(_) => None,
        }
    }

    pub(crate) fn as_employee_mut(&mut self) -> Option<&mut Employee> {
        match self {
            Member::Employee(e) => Some(e),
            Member::Person(_) => None,
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Person(p) => fmt::Display::fmt(p, f),
            Member::Employee(e) => fmt::Display::fmt(e, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    id: DepartmentId,
    name: String,
    code: String,
    members: Vec<EntityId>,
}

impl Department {
    pub(crate) fn new(id: DepartmentId, name: &str, code: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            code: code.to_string(),
            members: Vec::new(),
        }
    }

    pub fn id(&self) -> DepartmentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn members(&self) -> &[EntityId] {
        &self.members
    }

    pub fn employee_count(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, employee: EntityId) -> bool {
        self.members.contains(&employee)
    }

    pub fn matches_code(&self, code: &str) -> bool {
        self.code.to_lowercase() == code.to_lowercase()
    }

    pub(crate) fn push_member(&mut self, employee: EntityId) -> bool {
        if self.contains(employee) {
            return false;
        }
        self.members.push(employee);
        true
    }

    pub(crate) fn remove_member(&mut self, employee: EntityId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| *m != employee);
        self.members.len() != before
    }
}

/// 部門結構的唯讀投影
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentSummary {
    pub name: String,
    pub code: String,
    pub employee_count: usize,
    pub member_names: Vec<String>,
}

impl fmt::Display for DepartmentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} employee(s)",
            self.name, self.code, self.employee_count
        )?;
        for name in &self.member_names {
            write!(f, "\n  - {}", name)?;
        }
        Ok(())
    }
}

/// Flat, fully populated form of an employee used by external codecs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub name: String,
    pub age: i64,
    pub employee_id: String,
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    Assigned(DepartmentId),
    DepartmentNotFound(String),
    Unassigned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub employee: EntityId,
    pub assignment: Assignment,
}

impl Registration {
    pub fn department(&self) -> Option<DepartmentId> {
        match self.assignment {
            Assignment::Assigned(id) => Some(id),
            Assignment::DepartmentNotFound(_) | Assignment::Unassigned => None,
        }
    }
}
