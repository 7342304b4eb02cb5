//! Employee Model

use serde::{Deserialize, Serialize};

use crate::serde_helpers;

/// Employee response (without password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    /// Public 6-digit identifier
    pub employee_id: u32,
    pub full_name: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub company_name: String,
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub address: String,
    /// Stored photo reference (`uploads/<file>`)
    #[serde(default)]
    pub photo: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Registration payload
///
/// Field aliases cover the spellings older clients still send
/// (`FullName`, `EmailID`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    #[serde(alias = "FullName", alias = "name")]
    pub full_name: String,
    #[serde(deserialize_with = "serde_helpers::number")]
    pub age: u32,
    pub gender: String,
    pub phone: String,
    #[serde(alias = "EmailID", alias = "emailId")]
    pub email: String,
    pub password: String,
    #[serde(alias = "company")]
    pub company_name: String,
    #[serde(deserialize_with = "serde_helpers::number")]
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub address: String,
}

/// Update payload
///
/// Email and password are fixed after registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(
        default,
        alias = "FullName",
        alias = "name",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::option_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, alias = "company", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::option_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl EmployeeUpdate {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.phone.is_none()
            && self.company_name.is_none()
            && self.salary.is_none()
            && self.location.is_none()
            && self.address.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_accepts_legacy_field_names() {
        let json = r#"{
            "FullName": "Asha Rao",
            "age": "29",
            "gender": "female",
            "phone": "+91 98765 43210",
            "EmailID": "asha@example.com",
            "password": "secret1",
            "companyName": "Acme",
            "salary": 52000,
            "address": "12 Park Street"
        }"#;
        let create: EmployeeCreate = serde_json::from_str(json).unwrap();
        assert_eq!(create.full_name, "Asha Rao");
        assert_eq!(create.age, 29);
        assert_eq!(create.email, "asha@example.com");
        assert_eq!(create.salary, 52000.0);
        assert!(create.location.is_none());
    }

    #[test]
    fn update_accepts_name_alias_and_reports_empty() {
        let update: EmployeeUpdate = serde_json::from_str(r#"{"name": "New Name"}"#).unwrap();
        assert_eq!(update.full_name.as_deref(), Some("New Name"));
        assert!(!update.is_empty());

        let empty: EmployeeUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn response_serializes_camel_case() {
        let resp = EmployeeResponse {
            employee_id: 123456,
            full_name: "Asha Rao".into(),
            age: 29,
            gender: "female".into(),
            phone: "9876543210".into(),
            email: "asha@example.com".into(),
            company_name: "Acme".into(),
            salary: 52000.0,
            location: None,
            address: "12 Park Street".into(),
            photo: None,
            created_at: 1,
            updated_at: 2,
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["employeeId"], 123456);
        assert_eq!(value["companyName"], "Acme");
        assert!(value.get("location").is_none());
        assert!(value.get("password").is_none());
    }
}
