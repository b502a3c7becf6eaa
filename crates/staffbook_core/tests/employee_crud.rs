use rusqlite::Connection;
use staffbook_core::db::SCHEMA_VERSION;
use staffbook_core::{
    EmployeeDraft, EmployeeRepository, EmployeeService, RepoError, SqliteEmployeeRepository,
    StorageHandle, EMPLOYEE_TABLE,
};
use std::collections::HashSet;

fn draft(name: &str, email: &str, profession: &str) -> EmployeeDraft {
    EmployeeDraft::new(name, email, profession)
}

#[test]
fn create_then_get_roundtrip() {
    let handle = StorageHandle::connect_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(handle.connection().unwrap()).unwrap();

    let id = repo
        .create_employee(&draft("Grace", "grace@navy.mil", "Admiral"))
        .unwrap();

    let loaded = repo.get_employee(id).unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Grace");
    assert_eq!(loaded.email, "grace@navy.mil");
    assert_eq!(loaded.profession, "Admiral");
}

#[test]
fn create_preserves_inner_whitespace_and_unvalidated_text() {
    let handle = StorageHandle::connect_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(handle.connection().unwrap()).unwrap();

    let input = draft("Ada King Lovelace", "not-an-email", "");
    let id = repo.create_employee(&input).unwrap();

    assert_eq!(repo.get_employee(id).unwrap().into_draft(), input);
}

#[test]
fn get_missing_id_returns_not_found() {
    let handle = StorageHandle::connect_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(handle.connection().unwrap()).unwrap();

    let err = repo.get_employee(42).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
    assert_eq!(err.to_string(), "employee not found: 42");
}

#[test]
fn update_overwrites_all_fields() {
    let handle = StorageHandle::connect_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(handle.connection().unwrap()).unwrap();

    let id = repo
        .create_employee(&draft("Linus", "linus@kernel.org", "Maintainer"))
        .unwrap();
    let affected = repo
        .update_employee(id, &draft("Linus T.", "lt@kernel.org", "BDFL"))
        .unwrap();
    assert_eq!(affected, 1);

    let loaded = repo.get_employee(id).unwrap();
    assert_eq!(loaded.into_draft(), draft("Linus T.", "lt@kernel.org", "BDFL"));
}

#[test]
fn update_writes_the_table_that_list_and_get_read() {
    let handle = StorageHandle::connect_in_memory().unwrap();
    let conn = handle.connection().unwrap();
    let repo = SqliteEmployeeRepository::try_new(conn).unwrap();

    let id = repo
        .create_employee(&draft("Ada", "ada@x.io", "Engineer"))
        .unwrap();
    repo.update_employee(id, &draft("Ada L.", "ada@x.io", "Lead"))
        .unwrap();

    let profession: String = conn
        .query_row(
            &format!("SELECT profession FROM {EMPLOYEE_TABLE} WHERE id = ?1;"),
            [id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(profession, "Lead");
    assert_eq!(repo.get_employee(id).unwrap().profession, "Lead");
    assert_eq!(repo.list_employees().unwrap()[0].name, "Ada L.");
}

#[test]
fn update_of_absent_id_reports_zero_affected() {
    let handle = StorageHandle::connect_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(handle.connection().unwrap()).unwrap();

    let affected = repo.update_employee(7, &draft("x", "y", "z")).unwrap();
    assert_eq!(affected, 0);
}

#[test]
fn delete_of_absent_id_reports_zero_affected() {
    let handle = StorageHandle::connect_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(handle.connection().unwrap()).unwrap();

    assert_eq!(repo.delete_employee(99).unwrap(), 0);
}

#[test]
fn list_contains_every_created_employee() {
    let handle = StorageHandle::connect_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(handle.connection().unwrap()).unwrap();

    let mut created = HashSet::new();
    for index in 0..5 {
        let id = repo
            .create_employee(&draft(
                &format!("employee-{index}"),
                &format!("e{index}@corp.test"),
                "Analyst",
            ))
            .unwrap();
        created.insert(id);
    }

    let listed: HashSet<_> = repo
        .list_employees()
        .unwrap()
        .into_iter()
        .map(|employee| employee.id)
        .collect();
    assert!(created.is_subset(&listed));
    assert_eq!(listed.len(), 5);
}

#[test]
fn list_on_empty_table_is_empty() {
    let handle = StorageHandle::connect_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(handle.connection().unwrap()).unwrap();

    assert!(repo.list_employees().unwrap().is_empty());
}

#[test]
fn list_scan_failure_discards_result() {
    let handle = StorageHandle::connect_in_memory().unwrap();
    let conn = handle.connection().unwrap();
    let repo = SqliteEmployeeRepository::try_new(conn).unwrap();

    repo.create_employee(&draft("ok", "ok@corp.test", "Clerk"))
        .unwrap();
    conn.execute(
        "INSERT INTO etsi_employees (name, email, profession) VALUES (X'0102', 'b', 'c');",
        [],
    )
    .unwrap();

    let err = repo.list_employees().unwrap_err();
    assert!(matches!(err, RepoError::Query(_)));
}

#[test]
fn ada_lifecycle_scenario() {
    let handle = StorageHandle::connect_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(handle.connection().unwrap()).unwrap();

    let id = repo
        .create_employee(&draft("Ada", "ada@x.io", "Engineer"))
        .unwrap();
    assert_eq!(id, 1);

    let listed = repo.list_employees().unwrap();
    assert!(listed.contains(&draft("Ada", "ada@x.io", "Engineer").with_id(1)));

    assert_eq!(
        repo.update_employee(1, &draft("Ada L.", "ada@x.io", "Lead"))
            .unwrap(),
        1
    );
    assert_eq!(repo.delete_employee(1).unwrap(), 1);
    assert_eq!(repo.delete_employee(1).unwrap(), 0);
}

#[test]
fn deleted_ids_are_not_reassigned() {
    let handle = StorageHandle::connect_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(handle.connection().unwrap()).unwrap();

    let first = repo.create_employee(&draft("a", "a@x", "p")).unwrap();
    repo.delete_employee(first).unwrap();
    let second = repo.create_employee(&draft("b", "b@x", "p")).unwrap();

    assert!(second > first);
}

#[test]
fn service_wraps_repository_calls() {
    let handle = StorageHandle::connect_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(handle.connection().unwrap()).unwrap();
    let service = EmployeeService::new(repo);

    let id = service
        .create_employee(&draft("Ken", "ken@bell-labs.com", "Researcher"))
        .unwrap();
    assert_eq!(service.get_employee(id).unwrap().name, "Ken");
    assert_eq!(service.list_employees().unwrap().len(), 1);
    assert_eq!(
        service
            .update_employee(id, &draft("Ken T.", "ken@go.dev", "Designer"))
            .unwrap(),
        1
    );
    assert_eq!(service.delete_employee(id).unwrap(), 1);
    assert!(matches!(
        service.get_employee(id),
        Err(RepoError::NotFound(missing)) if missing == id
    ));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteEmployeeRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, SCHEMA_VERSION),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_employee_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
        .unwrap();

    assert!(matches!(
        SqliteEmployeeRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("etsi_employees"))
    ));
}

#[test]
fn repository_rejects_table_missing_profession_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE etsi_employees (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            age INTEGER
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
        .unwrap();

    assert!(matches!(
        SqliteEmployeeRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "etsi_employees",
            column: "profession"
        })
    ));
}
