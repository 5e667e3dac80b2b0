use anyhow::Result;
use chrono::NaiveDate;
use org_directory::{
    CsvExporter, DirectoryConfig, EmployeeCodec, HrService, JsonCodec, StructureExporter,
};
use tempfile::TempDir;

const DIRECTORY: &str = r#"
[directory]
name = "Acme Corporation"

[[departments]]
name = "Information Technology"
code = "IT"

[[departments]]
name = "Human Resources"
code = "HR"

[[employees]]
name = "John Smith"
age = 30
employee_id = "EMP0001"
salary = 75000.0
department = "it"

[[employees]]
name = "Sarah Johnson"
birth_date = "1988-03-22"
employee_id = "EMP0002"
salary = 68000.0
department = "HR"

[[employees]]
name = "Mike Wilson"
age = 41
employee_id = "EMP0003"
salary = 82000.0

[[raises]]
employee_id = "EMP0001"
percentage = 10.0
"#;

fn load(dir: &TempDir) -> Result<DirectoryConfig> {
    let path = dir.path().join("directory.toml");
    std::fs::write(&path, DIRECTORY)?;
    Ok(DirectoryConfig::from_file(&path)?)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 21).unwrap()
}

#[test]
fn test_seed_from_file_and_export_json() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = load(&temp_dir)?;

    let (mut service, mut report) = config.seed(today());
    config.apply_raises(&mut service, &mut report);
    assert_eq!(report.registered, 3);
    assert!(report.rejected.is_empty());
    assert!(report.unassigned.is_empty());

    let codec = JsonCodec::pretty();
    let json = codec.encode(&service.export_records())?;
    let output_path = temp_dir.path().join("employees.json");
    std::fs::write(&output_path, &json)?;

    let records = codec.decode(&std::fs::read_to_string(&output_path)?)?;
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].salary, 82500.0);
    assert_eq!(records[0].department.as_deref(), Some("IT"));
    assert_eq!(records[1].age, 35);
    assert_eq!(records[2].department, None);

    Ok(())
}

#[test]
fn test_json_import_into_fresh_service() -> Result<()> {
    let input = r#"[
        {"name": "John Smith", "age": 30, "employee_id": "EMP0001", "salary": 75000.0, "department": "IT"},
        {"name": "J", "age": 30, "employee_id": "EMP0002", "salary": 1000.0},
        {"name": "Jane Doe", "age": 28, "employee_id": "EMP0003", "salary": 60000.0, "department": "XX"}
    ]"#;

    let mut service = HrService::new();
    service.create_department("Information Technology", "IT");

    let records = JsonCodec::new().decode(input)?;
    let results = service.import_records(records);

    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().ok().and_then(|r| r.department()), None);
    assert_eq!(service.directory().len(), 2);
    assert!(service.find_by_name("J").is_none());

    Ok(())
}

#[test]
fn test_department_structure_csv_export() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = load(&temp_dir)?;
    let (service, _) = config.seed(today());

    let summaries: Vec<_> = service.department_structure().into_iter().collect();
    let csv = CsvExporter::new().export(&summaries)?;
    let output_path = temp_dir.path().join("departments.csv");
    std::fs::write(&output_path, &csv)?;

    let content = std::fs::read_to_string(&output_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "IT,Information Technology,1,John Smith");
    assert_eq!(lines[2], "HR,Human Resources,1,Sarah Johnson");

    Ok(())
}
