use org_directory::{Assignment, Department, HrError, HrService, Member, Salary};

fn service_with_it() -> HrService {
    let mut service = HrService::new();
    service.create_department("Information Technology", "IT");
    service
}

#[test]
fn test_john_smith_joins_it() {
    let mut service = service_with_it();

    let registration = service
        .create_and_register_employee("John Smith", 30, "EMP0001", 75000.0, "IT")
        .unwrap();

    let john = service.employee(registration.employee).unwrap();
    assert_eq!(john.salary(), Salary::from_amount(75000.0));
    assert_eq!(john.employee_id(), "EMP0001");
    assert_eq!(
        service.department_of(john.id()).map(Department::code),
        Some("IT")
    );
}

#[test]
fn test_ten_percent_raise() {
    let mut service = service_with_it();
    let john = service
        .create_and_register_employee("John Smith", 30, "EMP0001", 75000.0, "IT")
        .unwrap()
        .employee;

    service.give_raise(john, 10.0).unwrap();

    assert_eq!(service.employee(john).unwrap().salary().amount(), 82500.0);
}

#[test]
fn test_short_name_is_rejected_and_never_findable() {
    let mut service = service_with_it();

    let err = service
        .create_and_register_employee("J", 30, "EMP0001", 75000.0, "IT")
        .unwrap_err();

    assert!(matches!(err, HrError::ValidationFailure { ref field, .. } if field == "name"));
    assert!(service.find_by_name("J").is_none());
    assert!(service.directory().is_empty());
}

#[test]
fn test_invalid_names_leave_directory_empty() {
    let mut service = service_with_it();

    for name in ["", " ", "J", "John 2", "R2D2"] {
        let result = service.create_and_register_employee(name, 30, "EMP0001", 75000.0, "IT");
        assert!(result.is_err(), "{:?} should be rejected", name);
    }
    assert!(service.directory().is_empty());

    for name in ["Jo", "John Smith", "Mary Ann Lee"] {
        let result = service.create_and_register_employee(name, 30, "EMP0001", 75000.0, "IT");
        assert!(result.is_ok(), "{:?} should be accepted", name);
    }
    assert_eq!(service.directory().len(), 3);
}

#[test]
fn test_unknown_department_code_keeps_employee_registered() {
    let mut service = service_with_it();

    let registration = service
        .create_and_register_employee("John Smith", 30, "EMP0001", 75000.0, "XX")
        .unwrap();

    assert_eq!(
        registration.assignment,
        Assignment::DepartmentNotFound("XX".to_string())
    );
    assert!(service.find_by_name("John Smith").is_some());
    assert_eq!(service.employee(registration.employee).unwrap().department(), None);

    assert!(service.find_department("XX").is_none());
    assert!(service.find_department("xx").is_none());
    assert_eq!(
        service.find_department("it").map(Department::id),
        service.find_department("IT").map(Department::id)
    );
}

#[test]
fn test_assignment_is_idempotent_and_bidirectional() {
    let mut service = service_with_it();
    let id = service
        .create_and_register_employee("John Smith", 30, "EMP0001", 75000.0, "IT")
        .unwrap()
        .employee;

    let it = service.assign_to_department(id, "IT").unwrap();
    assert_eq!(service.registry().get(it).unwrap().employee_count(), 1);

    assert_eq!(service.employee(id).unwrap().department(), Some(it));
    assert!(service.registry().get(it).unwrap().contains(id));

    assert!(service.unassign(id).unwrap());
    assert_eq!(service.employee(id).unwrap().department(), None);
    assert!(!service.registry().get(it).unwrap().contains(id));
}

#[test]
fn test_create_then_find_by_code_round_trip() {
    let mut service = HrService::new();
    let sales = service.create_department("Sales", "SLS");

    assert_eq!(service.find_department("SLS").map(Department::id), Some(sales));
    assert_eq!(service.find_department("sls").map(Department::name), Some("Sales"));
}

#[test]
fn test_directory_snapshot_is_detached() {
    let mut service = service_with_it();
    service.register_person("Alice Walker", 44).unwrap();
    service
        .create_and_register_employee("John Smith", 30, "EMP0001", 75000.0, "IT")
        .unwrap();

    let mut snapshot = service.directory().all();
    snapshot.pop();
    assert_eq!(service.directory().len(), 2);

    let names: Vec<String> = service
        .directory()
        .all()
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    assert_eq!(names, vec!["Alice Walker".to_string(), "John Smith".to_string()]);
    assert!(matches!(
        service.find_by_name("alice walker"),
        Some(Member::Person(_))
    ));
}
