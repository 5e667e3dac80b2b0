use crate::domain::model::{Employee, EntityId, Member};

/// Canonical collection of people and employees, in insertion order.
#[derive(Debug, Default)]
pub struct DirectoryStore {
    members: Vec<Member>,
    next_id: u64,
}

impl DirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 配發下一個實體編號
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Returns `false` when a member with the same identity is already stored.
    pub fn add(&mut self, member: Member) -> bool {
        if self.get(member.id()).is_some() {
            tracing::debug!("Member {} already in directory, skipping", member.id());
            return false;
        }
        tracing::info!("Added person: {}", member.name());
        self.members.push(member);
        true
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Member> {
        let wanted = name.to_lowercase();
        self.members
            .iter()
            .find(|m| m.name().to_lowercase() == wanted)
    }

    pub fn find_by_employee_id(&self, employee_id: &str) -> Option<&Employee> {
        self.employees().find(|e| e.employee_id() == employee_id)
    }

    /// 回傳快照；修改回傳值不會影響目錄本身
    pub fn all(&self) -> Vec<Member> {
        self.members.clone()
    }

    pub fn get(&self, id: EntityId) -> Option<&Member> {
        self.members.iter().find(|m| m.id() == id)
    }

    pub fn employee(&self, id: EntityId) -> Option<&Employee> {
        self.get(id).and_then(Member::as_employee)
    }

    pub(crate) fn employee_mut(&mut self, id: EntityId) -> Option<&mut Employee> {
        self.members
            .iter_mut()
            .find(|m| m.id() == id)
            .and_then(Member::as_employee_mut)
    }

    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.members.iter().filter_map(Member::as_employee)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
