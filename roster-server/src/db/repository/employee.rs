//! Employee Repository

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const EMPLOYEE_SELECT: &str =
    "SELECT id, name, position, dept, email, password, created_at, updated_at FROM employee";

/// Find all employees
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} ORDER BY id");
    let rows = sqlx::query_as::<_, Employee>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Find employee by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Find employee by email (login identifier)
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE email = ? LIMIT 1");
    let row = sqlx::query_as::<_, Employee>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Search by name substring (case-insensitive) and/or exact department.
/// Filters combine with AND; with neither present all rows are returned.
pub async fn search(
    pool: &SqlitePool,
    name: Option<&str>,
    dept: Option<&str>,
) -> RepoResult<Vec<Employee>> {
    let mut sql = format!("{EMPLOYEE_SELECT} WHERE 1=1");
    if name.is_some() {
        sql.push_str(" AND LOWER(name) LIKE LOWER(?)");
    }
    if dept.is_some() {
        sql.push_str(" AND dept = ?");
    }
    sql.push_str(" ORDER BY id");

    let mut query = sqlx::query_as::<_, Employee>(&sql);
    if let Some(name) = name {
        query = query.bind(format!("%{name}%"));
    }
    if let Some(dept) = dept {
        query = query.bind(dept.to_string());
    }

    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}

/// Create a new employee
///
/// The password column is persisted exactly as supplied: signup hashes the
/// credential before calling this, the administrative create passes its
/// value through untouched.
pub async fn create(pool: &SqlitePool, data: EmployeeCreate) -> RepoResult<Employee> {
    // Check duplicate email
    if find_by_email(pool, &data.email).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Email '{}' already registered",
            data.email
        )));
    }

    let now = now_millis();
    let result = sqlx::query(
        "INSERT INTO employee (name, position, dept, email, password, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(data.name)
    .bind(data.position)
    .bind(data.dept)
    .bind(data.email)
    .bind(data.password)
    .bind(now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

/// Update an employee (partial merge over the existing row)
pub async fn update(pool: &SqlitePool, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE employee SET name = COALESCE(?1, name), position = COALESCE(?2, position), dept = COALESCE(?3, dept), email = COALESCE(?4, email), password = COALESCE(?5, password), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.name)
    .bind(data.position)
    .bind(data.dept)
    .bind(data.email)
    .bind(data.password)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
}

/// Hard delete an employee; returns false when no row matched
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Create an in-memory SQLite pool with the employee schema applied.
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    fn payload(email: &str, name: Option<&str>, dept: Option<&str>) -> EmployeeCreate {
        EmployeeCreate {
            name: name.map(str::to_string),
            position: None,
            dept: dept.map(str::to_string),
            email: email.to_string(),
            password: Some("$argon2id$test-hash".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let pool = test_pool().await;
        let created = create(&pool, payload("a@x.com", Some("Abdul"), Some("IT")))
            .await
            .unwrap();

        let found = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found.email, "a@x.com");
        assert_eq!(found.name.as_deref(), Some("Abdul"));
        assert_eq!(found.dept.as_deref(), Some("IT"));
        assert_eq!(found.password.as_deref(), Some("$argon2id$test-hash"));
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let pool = test_pool().await;
        assert!(find_by_id(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_email_rejected() {
        let pool = test_pool().await;
        create(&pool, payload("a@x.com", None, None)).await.unwrap();

        let err = create(&pool, payload("a@x.com", None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let pool = test_pool().await;
        create(&pool, payload("a@x.com", Some("Abdul"), None))
            .await
            .unwrap();

        let found = find_by_email(&pool, "a@x.com").await.unwrap().unwrap();
        assert_eq!(found.name.as_deref(), Some("Abdul"));
        assert!(find_by_email(&pool, "b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_only_supplied_fields() {
        let pool = test_pool().await;
        let created = create(&pool, payload("a@x.com", Some("Abdul"), Some("IT")))
            .await
            .unwrap();

        let updated = update(
            &pool,
            created.id,
            EmployeeUpdate {
                name: Some("X".to_string()),
                position: None,
                dept: None,
                email: None,
                password: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name.as_deref(), Some("X"));
        // Untouched fields keep their values
        assert_eq!(updated.dept.as_deref(), Some("IT"));
        assert_eq!(updated.email, "a@x.com");
        assert_eq!(updated.password.as_deref(), Some("$argon2id$test-hash"));
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_returns_not_found() {
        let pool = test_pool().await;
        let err = update(
            &pool,
            999,
            EmployeeUpdate {
                name: Some("X".to_string()),
                position: None,
                dept: None,
                email: None,
                password: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_then_delete_again() {
        let pool = test_pool().await;
        let created = create(&pool, payload("a@x.com", None, None)).await.unwrap();

        assert!(delete(&pool, created.id).await.unwrap());
        // Second delete finds nothing
        assert!(!delete(&pool, created.id).await.unwrap());
        assert!(find_by_id(&pool, created.id).await.unwrap().is_none());
    }

    async fn seed_search_fixtures(pool: &SqlitePool) {
        create(pool, payload("a@x.com", Some("Abdullah"), Some("IT")))
            .await
            .unwrap();
        create(pool, payload("b@x.com", Some("ABDi"), Some("Sales")))
            .await
            .unwrap();
        create(pool, payload("c@x.com", Some("Carol"), Some("IT")))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_search_name_case_insensitive_substring() {
        let pool = test_pool().await;
        seed_search_fixtures(&pool).await;

        let rows = search(&pool, Some("abd"), None).await.unwrap();
        let names: Vec<_> = rows.iter().filter_map(|e| e.name.as_deref()).collect();
        assert_eq!(names, vec!["Abdullah", "ABDi"]);
    }

    #[tokio::test]
    async fn test_search_dept_exact() {
        let pool = test_pool().await;
        seed_search_fixtures(&pool).await;

        let rows = search(&pool, None, Some("IT")).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|e| e.dept.as_deref() == Some("IT")));

        // Exact match only, not substring
        assert!(search(&pool, None, Some("I")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_combined_filters_intersect() {
        let pool = test_pool().await;
        seed_search_fixtures(&pool).await;

        let rows = search(&pool, Some("abd"), Some("IT")).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.as_deref(), Some("Abdullah"));
    }

    #[tokio::test]
    async fn test_search_without_filters_returns_all() {
        let pool = test_pool().await;
        seed_search_fixtures(&pool).await;

        assert_eq!(search(&pool, None, None).await.unwrap().len(), 3);
        assert_eq!(find_all(&pool).await.unwrap().len(), 3);
    }
}
