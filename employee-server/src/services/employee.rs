//! Employee Service
//!
//! Orchestrates validation, password hashing, identifier allocation, photo
//! storage and persistence for the employee API.

use shared::models::{EmployeeCreate, EmployeeUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Employee, EmployeePatch, NewEmployee};
use crate::db::repository::EmployeeRepository;
use crate::services::{PhotoStore, PhotoUpload};
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_GENDER_LEN, MAX_NAME_LEN, normalize_email, validate_age,
    validate_email, validate_optional_text, validate_password, validate_phone,
    validate_required_text, validate_salary,
};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct EmployeeService {
    repo: EmployeeRepository,
    photos: PhotoStore,
}

impl EmployeeService {
    pub fn new(db: Surreal<Db>, photos: PhotoStore) -> Self {
        Self {
            repo: EmployeeRepository::new(db),
            photos,
        }
    }

    /// Register a new employee, optionally with a photo
    pub async fn register(
        &self,
        data: EmployeeCreate,
        photo: Option<PhotoUpload>,
    ) -> AppResult<Employee> {
        validate_create(&data)?;
        if let Some(p) = &photo {
            self.photos.validate(p)?;
        }

        let email = normalize_email(&data.email);
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already exists"));
        }

        let hash_pass = Employee::hash_password(&data.password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

        let employee_id = self.repo.generate_employee_id().await?;

        let photo = match photo {
            Some(upload) => Some(self.photos.save(upload).await?),
            None => None,
        };

        let record = NewEmployee {
            employee_id,
            full_name: data.full_name.trim().to_string(),
            age: data.age,
            gender: data.gender.trim().to_string(),
            phone: data.phone.trim().to_string(),
            email,
            hash_pass,
            company_name: data.company_name.trim().to_string(),
            salary: data.salary,
            location: data
                .location
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
            address: data.address.trim().to_string(),
            photo: photo.clone(),
        };

        match self.repo.create(record).await {
            Ok(employee) => {
                tracing::info!(
                    employee_id = employee.employee_id,
                    has_photo = employee.photo.is_some(),
                    "Employee registered"
                );
                Ok(employee)
            }
            Err(err) => {
                if let Some(reference) = &photo {
                    self.photos.remove(reference).await;
                }
                Err(err.into())
            }
        }
    }

    /// Check credentials; unknown email and wrong password are indistinguishable
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Employee> {
        let email = normalize_email(email);
        let Some(employee) = self.repo.find_by_email(&email).await? else {
            tracing::warn!(email = %email, "Login failed - employee not found");
            return Err(AppError::InvalidCredentials);
        };

        let password_valid = employee
            .verify_password(password)
            .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
        if !password_valid {
            tracing::warn!(email = %email, "Login failed - invalid credentials");
            return Err(AppError::InvalidCredentials);
        }

        Ok(employee)
    }

    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get(&self, employee_id: u32) -> AppResult<Employee> {
        self.repo
            .find_by_employee_id(employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee not found"))
    }

    pub async fn search(&self, name: &str) -> AppResult<Vec<Employee>> {
        Ok(self.repo.search_by_name(name).await?)
    }

    /// Merge present fields; a new photo replaces (and then removes) the old one
    pub async fn update(
        &self,
        employee_id: u32,
        update: EmployeeUpdate,
        photo: Option<PhotoUpload>,
    ) -> AppResult<Employee> {
        validate_update(&update)?;
        if let Some(p) = &photo {
            self.photos.validate(p)?;
        }

        let existing = self.get(employee_id).await?;

        let new_photo = match photo {
            Some(upload) => Some(self.photos.save(upload).await?),
            None => None,
        };

        let patch = EmployeePatch::from_update(update, new_photo.clone(), now_millis());
        let updated = match self.repo.update(employee_id, patch).await {
            Ok(employee) => employee,
            Err(err) => {
                if let Some(reference) = &new_photo {
                    self.photos.remove(reference).await;
                }
                return Err(err.into());
            }
        };

        if new_photo.is_some()
            && let Some(old) = existing.photo.as_deref()
        {
            self.photos.remove(old).await;
        }

        tracing::info!(employee_id, "Employee updated");
        Ok(updated)
    }

    /// Hard delete, including the stored photo
    pub async fn delete(&self, employee_id: u32) -> AppResult<()> {
        let removed = self.repo.delete(employee_id).await?;
        if let Some(reference) = removed.photo.as_deref() {
            self.photos.remove(reference).await;
        }
        tracing::info!(employee_id, "Employee deleted");
        Ok(())
    }
}

/// Validate a registration payload
pub fn validate_create(data: &EmployeeCreate) -> AppResult<()> {
    validate_required_text(&data.full_name, "fullName", MAX_NAME_LEN)?;
    validate_age(data.age)?;
    validate_required_text(&data.gender, "gender", MAX_GENDER_LEN)?;
    validate_phone(&data.phone)?;
    validate_email(data.email.trim())?;
    validate_password(&data.password)?;
    validate_required_text(&data.company_name, "companyName", MAX_NAME_LEN)?;
    validate_salary(data.salary)?;
    validate_optional_text(&data.location, "location", MAX_NAME_LEN)?;
    validate_required_text(&data.address, "address", MAX_ADDRESS_LEN)?;
    Ok(())
}

/// Validate the fields present in an update payload
pub fn validate_update(data: &EmployeeUpdate) -> AppResult<()> {
    if let Some(v) = &data.full_name {
        validate_required_text(v, "fullName", MAX_NAME_LEN)?;
    }
    if let Some(v) = data.age {
        validate_age(v)?;
    }
    if let Some(v) = &data.gender {
        validate_required_text(v, "gender", MAX_GENDER_LEN)?;
    }
    if let Some(v) = &data.phone {
        validate_phone(v)?;
    }
    if let Some(v) = &data.company_name {
        validate_required_text(v, "companyName", MAX_NAME_LEN)?;
    }
    if let Some(v) = data.salary {
        validate_salary(v)?;
    }
    validate_optional_text(&data.location, "location", MAX_NAME_LEN)?;
    if let Some(v) = &data.address {
        validate_required_text(v, "address", MAX_ADDRESS_LEN)?;
    }
    Ok(())
}
