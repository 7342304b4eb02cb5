//! Employee Repository

use std::ops::RangeInclusive;

use rand::Rng;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Employee, EmployeePatch, NewEmployee};
use crate::utils::time::now_millis;

/// Public identifiers are 6-digit numbers
pub const EMPLOYEE_ID_RANGE: RangeInclusive<u32> = 100_000..=999_999;

/// Upper bound on generate-and-check rounds before giving up
const MAX_ID_ATTEMPTS: usize = 32;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all employees ordered by identifier
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee ORDER BY employee_id")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find employee by public identifier
    pub async fn find_by_employee_id(&self, employee_id: u32) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE employee_id = $employee_id LIMIT 1")
            .bind(("employee_id", employee_id))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Find employee by (normalized) email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Case-insensitive substring search on full name
    pub async fn search_by_name(&self, name: &str) -> RepoResult<Vec<Employee>> {
        let term = name.trim().to_lowercase();
        if term.is_empty() {
            return Err(RepoError::Validation(
                "Search term must not be empty".to_string(),
            ));
        }

        let employees: Vec<Employee> = self
            .base
            .db()
            .query(
                "SELECT * FROM employee WHERE string::lowercase(full_name) CONTAINS $term ORDER BY full_name",
            )
            .bind(("term", term))
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Draw random identifiers until one is free
    pub async fn generate_employee_id(&self) -> RepoResult<u32> {
        self.generate_employee_id_with(|| rand::thread_rng().gen_range(EMPLOYEE_ID_RANGE))
            .await
    }

    /// Generate-and-check loop over a caller-supplied candidate source
    pub async fn generate_employee_id_with<F>(&self, mut next: F) -> RepoResult<u32>
    where
        F: FnMut() -> u32,
    {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let candidate = next();
            if self.find_by_employee_id(candidate).await?.is_none() {
                return Ok(candidate);
            }
            tracing::debug!(candidate, attempt, "Employee id collision, retrying");
        }

        Err(RepoError::Database(format!(
            "Could not allocate a unique employee id after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }

    /// Create a new employee
    pub async fn create(&self, data: NewEmployee) -> RepoResult<Employee> {
        let employee_id = data.employee_id;
        let now = now_millis();

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    employee_id = $employee_id,
                    full_name = $full_name,
                    age = $age,
                    gender = $gender,
                    phone = $phone,
                    email = $email,
                    hash_pass = $hash_pass,
                    company_name = $company_name,
                    salary = $salary,
                    location = $location,
                    address = $address,
                    photo = $photo,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("employee_id", data.employee_id))
            .bind(("full_name", data.full_name))
            .bind(("age", data.age))
            .bind(("gender", data.gender))
            .bind(("phone", data.phone))
            .bind(("email", data.email))
            .bind(("hash_pass", data.hash_pass))
            .bind(("company_name", data.company_name))
            .bind(("salary", data.salary))
            .bind(("location", data.location))
            .bind(("address", data.address))
            .bind(("photo", data.photo))
            .bind(("now", now))
            .await
            .map_err(|e| unique_violation(e, employee_id))?;

        let created: Option<Employee> = result
            .take(0)
            .map_err(|e| unique_violation(e, employee_id))?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Merge a partial update into an existing employee
    pub async fn update(&self, employee_id: u32, patch: EmployeePatch) -> RepoResult<Employee> {
        let mut result = self
            .base
            .db()
            .query("UPDATE employee MERGE $patch WHERE employee_id = $employee_id RETURN AFTER")
            .bind(("patch", patch))
            .bind(("employee_id", employee_id))
            .await?;

        let updated: Vec<Employee> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound("Employee not found".to_string()))
    }

    /// Hard delete an employee, returning the removed document
    pub async fn delete(&self, employee_id: u32) -> RepoResult<Employee> {
        let mut result = self
            .base
            .db()
            .query("DELETE employee WHERE employee_id = $employee_id RETURN BEFORE")
            .bind(("employee_id", employee_id))
            .await?;

        let deleted: Vec<Employee> = result.take(0)?;
        deleted
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound("Employee not found".to_string()))
    }
}

/// Translate unique index violations into readable duplicates
fn unique_violation(err: surrealdb::Error, employee_id: u32) -> RepoError {
    match RepoError::from(err) {
        RepoError::Duplicate(msg) if msg.contains("employee_email_unique") => {
            RepoError::Duplicate("Email already exists".to_string())
        }
        RepoError::Duplicate(msg) if msg.contains("employee_id_unique") => {
            RepoError::Duplicate(format!("Employee id {} already exists", employee_id))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> EmployeeRepository {
        let db = DbService::memory("test", "test").await.unwrap();
        EmployeeRepository::new(db.db)
    }

    fn new_employee(employee_id: u32, name: &str, email: &str) -> NewEmployee {
        NewEmployee {
            employee_id,
            full_name: name.to_string(),
            age: 30,
            gender: "female".to_string(),
            phone: "9876543210".to_string(),
            email: email.to_string(),
            hash_pass: "$argon2id$placeholder".to_string(),
            company_name: "Acme".to_string(),
            salary: 50000.0,
            location: None,
            address: "1 Main Road".to_string(),
            photo: None,
        }
    }

    #[tokio::test]
    async fn create_and_find() {
        let repo = repo().await;
        let created = repo
            .create(new_employee(123456, "Asha Rao", "asha@example.com"))
            .await
            .unwrap();
        assert_eq!(created.employee_id, 123456);
        assert!(created.id.is_some());
        assert_eq!(created.created_at, created.updated_at);

        let by_id = repo.find_by_employee_id(123456).await.unwrap().unwrap();
        assert_eq!(by_id.email, "asha@example.com");
        let by_email = repo.find_by_email("asha@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.employee_id, 123456);
        assert!(repo.find_by_employee_id(999999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_by_index() {
        let repo = repo().await;
        repo.create(new_employee(111111, "Asha Rao", "asha@example.com"))
            .await
            .unwrap();
        let err = repo
            .create(new_employee(222222, "Asha Two", "asha@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(ref m) if m == "Email already exists"));
    }

    #[tokio::test]
    async fn duplicate_employee_id_is_rejected_by_index() {
        let repo = repo().await;
        repo.create(new_employee(111111, "Asha Rao", "asha@example.com"))
            .await
            .unwrap();
        let err = repo
            .create(new_employee(111111, "Ravi Kumar", "ravi@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn id_generation_skips_taken_ids() {
        let repo = repo().await;
        repo.create(new_employee(123456, "Asha Rao", "asha@example.com"))
            .await
            .unwrap();

        let mut candidates = vec![654321, 123456].into_iter().rev();
        let id = repo
            .generate_employee_id_with(|| candidates.next().unwrap_or(100000))
            .await
            .unwrap();
        assert_eq!(id, 654321);
    }

    #[tokio::test]
    async fn id_generation_gives_up_when_every_candidate_collides() {
        let repo = repo().await;
        repo.create(new_employee(123456, "Asha Rao", "asha@example.com"))
            .await
            .unwrap();

        let err = repo.generate_employee_id_with(|| 123456).await.unwrap_err();
        assert!(matches!(err, RepoError::Database(_)));
    }

    #[tokio::test]
    async fn random_ids_are_six_digits() {
        let repo = repo().await;
        for _ in 0..20 {
            let id = repo.generate_employee_id().await.unwrap();
            assert!(EMPLOYEE_ID_RANGE.contains(&id));
        }
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let repo = repo().await;
        repo.create(new_employee(111111, "Asha Rao", "asha@example.com"))
            .await
            .unwrap();
        repo.create(new_employee(222222, "Rashid Khan", "rashid@example.com"))
            .await
            .unwrap();
        repo.create(new_employee(333333, "Meera Iyer", "meera@example.com"))
            .await
            .unwrap();

        let hits = repo.search_by_name("  ASH ").await.unwrap();
        let names: Vec<_> = hits.iter().map(|e| e.full_name.as_str()).collect();
        assert_eq!(names, vec!["Asha Rao", "Rashid Khan"]);

        assert!(repo.search_by_name("zzz").await.unwrap().is_empty());
        assert!(matches!(
            repo.search_by_name("   ").await,
            Err(RepoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_merges_only_present_fields() {
        let repo = repo().await;
        let created = repo
            .create(new_employee(123456, "Asha Rao", "asha@example.com"))
            .await
            .unwrap();

        let patch = EmployeePatch {
            salary: Some(75000.0),
            location: Some("Chennai".to_string()),
            updated_at: created.updated_at + 1,
            ..Default::default()
        };
        let updated = repo.update(123456, patch).await.unwrap();
        assert_eq!(updated.salary, 75000.0);
        assert_eq!(updated.location.as_deref(), Some("Chennai"));
        assert_eq!(updated.full_name, "Asha Rao");
        assert_eq!(updated.hash_pass, created.hash_pass);
        assert!(updated.updated_at > created.created_at);

        let missing = repo.update(999999, EmployeePatch::default()).await;
        assert!(matches!(missing, Err(RepoError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_returns_removed_document() {
        let repo = repo().await;
        repo.create(new_employee(123456, "Asha Rao", "asha@example.com"))
            .await
            .unwrap();

        let removed = repo.delete(123456).await.unwrap();
        assert_eq!(removed.email, "asha@example.com");
        assert!(repo.find_by_employee_id(123456).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(123456).await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn find_all_orders_by_identifier() {
        let repo = repo().await;
        repo.create(new_employee(333333, "C", "c@example.com")).await.unwrap();
        repo.create(new_employee(111111, "A", "a@example.com")).await.unwrap();
        repo.create(new_employee(222222, "B", "b@example.com")).await.unwrap();

        let ids: Vec<u32> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.employee_id)
            .collect();
        assert_eq!(ids, vec![111111, 222222, 333333]);
    }
}
