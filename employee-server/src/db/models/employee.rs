//! Employee Model

use serde::{Deserialize, Serialize};
use shared::models::{EmployeeResponse, EmployeeUpdate};
use surrealdb::RecordId;

/// Employee document as stored in SurrealDB
#[derive(Debug, Clone, Deserialize)]
pub struct Employee {
    /// Store-internal record id, never exposed
    #[serde(default)]
    pub id: Option<RecordId>,
    pub employee_id: u32,
    pub full_name: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub hash_pass: String,
    pub company_name: String,
    pub salary: f64,
    #[serde(default)]
    pub location: Option<String>,
    pub address: String,
    #[serde(default)]
    pub photo: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fully prepared record for insertion (password already hashed)
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub employee_id: u32,
    pub full_name: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub hash_pass: String,
    pub company_name: String,
    pub salary: f64,
    pub location: Option<String>,
    pub address: String,
    pub photo: Option<String>,
}

/// Partial update merged into an existing document
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub updated_at: i64,
}

impl EmployeePatch {
    /// Build a patch from an API update payload; text fields are trimmed
    ///
    /// A blank `location` leaves the stored value unchanged.
    pub fn from_update(update: EmployeeUpdate, photo: Option<String>, updated_at: i64) -> Self {
        let trim = |s: String| s.trim().to_string();
        Self {
            full_name: update.full_name.map(trim),
            age: update.age,
            gender: update.gender.map(trim),
            phone: update.phone.map(trim),
            company_name: update.company_name.map(trim),
            salary: update.salary,
            location: update.location.map(trim).filter(|l| !l.is_empty()),
            address: update.address.map(trim),
            photo,
            updated_at,
        }
    }
}

impl Employee {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        Self {
            employee_id: e.employee_id,
            full_name: e.full_name,
            age: e.age,
            gender: e.gender,
            phone: e.phone,
            email: e.email,
            company_name: e.company_name,
            salary: e.salary,
            location: e.location,
            address: e.address,
            photo: e.photo,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(hash_pass: String) -> Employee {
        Employee {
            id: None,
            employee_id: 654321,
            full_name: "Ravi Kumar".into(),
            age: 35,
            gender: "male".into(),
            phone: "9876543210".into(),
            email: "ravi@example.com".into(),
            hash_pass,
            company_name: "Acme".into(),
            salary: 64000.0,
            location: Some("Pune".into()),
            address: "4 Lake Road".into(),
            photo: None,
            created_at: 10,
            updated_at: 10,
        }
    }

    #[test]
    fn password_hash_roundtrip() {
        let hash = Employee::hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert!(hash.starts_with("$argon2"));

        let emp = sample(hash);
        assert!(emp.verify_password("hunter22").unwrap());
        assert!(!emp.verify_password("hunter23").unwrap());
    }

    #[test]
    fn response_drops_credential() {
        let emp = sample(Employee::hash_password("hunter22").unwrap());
        let value = serde_json::to_value(EmployeeResponse::from(emp)).unwrap();
        assert!(value.get("hashPass").is_none());
        assert!(value.get("hash_pass").is_none());
        assert_eq!(value["location"], "Pune");
    }

    #[test]
    fn patch_skips_absent_fields() {
        let update = EmployeeUpdate {
            phone: Some(" 9999999999 ".into()),
            ..Default::default()
        };
        let patch = EmployeePatch::from_update(update, None, 42);
        let value = serde_json::to_value(&patch).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["phone"], "9999999999");
        assert_eq!(obj["updated_at"], 42);
    }

    #[test]
    fn patch_ignores_blank_location() {
        let update = EmployeeUpdate {
            location: Some("   ".into()),
            age: Some(40),
            ..Default::default()
        };
        let patch = EmployeePatch::from_update(update, None, 42);
        assert!(patch.location.is_none());
        let value = serde_json::to_value(&patch).unwrap();
        assert!(value.get("location").is_none());
        assert_eq!(value["age"], 40);
    }
}
