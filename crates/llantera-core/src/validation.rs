//! Form validation
//!
//! Field-level checks run before anything is sent to the backend.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, FieldError, Result};
use crate::models::{Customer, Supplier};

/// Length of a national ID (DNI)
pub const DNI_LENGTH: usize = 8;

/// Length of a tax ID (RUC)
pub const RUC_LENGTH: usize = 11;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Check a DNI before a registry lookup
pub fn validate_dni(dni: &str) -> Result<()> {
    if is_digits(dni.trim(), DNI_LENGTH) {
        Ok(())
    } else {
        Err(Error::invalid_field(
            "dni",
            format!("DNI must have {} digits", DNI_LENGTH),
        ))
    }
}

/// Check a RUC before a registry lookup
pub fn validate_ruc(ruc: &str) -> Result<()> {
    if is_digits(ruc.trim(), RUC_LENGTH) {
        Ok(())
    } else {
        Err(Error::invalid_field(
            "ruc",
            format!("RUC must have {} digits", RUC_LENGTH),
        ))
    }
}

/// Validate a customer form
pub fn validate_customer(customer: &Customer) -> Result<()> {
    let mut errors = Vec::new();

    if customer.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }

    let dni = present(&customer.dni);
    let ruc = present(&customer.ruc);
    if dni.is_none() && ruc.is_none() {
        errors.push(FieldError::new("dni", "Either DNI or RUC is required"));
        errors.push(FieldError::new("ruc", "Either DNI or RUC is required"));
    }
    if let Some(dni) = dni {
        if !is_digits(dni, DNI_LENGTH) {
            errors.push(FieldError::new("dni", format!("DNI must have {} digits", DNI_LENGTH)));
        }
    }
    if let Some(ruc) = ruc {
        if !is_digits(ruc, RUC_LENGTH) {
            errors.push(FieldError::new("ruc", format!("RUC must have {} digits", RUC_LENGTH)));
        }
    }

    if let Some(email) = present(&customer.email) {
        if !email_regex().is_match(email) {
            errors.push(FieldError::new("email", "Email is not valid"));
        }
    }

    into_result(errors)
}

/// Validate a supplier form
pub fn validate_supplier(supplier: &Supplier) -> Result<()> {
    let mut errors = Vec::new();

    if supplier.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    let ruc = supplier.ruc.trim();
    if ruc.is_empty() {
        errors.push(FieldError::new("ruc", "RUC is required"));
    } else if !is_digits(ruc, RUC_LENGTH) {
        errors.push(FieldError::new("ruc", format!("RUC must have {} digits", RUC_LENGTH)));
    }

    into_result(errors)
}

fn into_result(errors: Vec<FieldError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(name: &str, dni: Option<&str>, ruc: Option<&str>) -> Customer {
        Customer {
            name: name.to_string(),
            dni: dni.map(String::from),
            ruc: ruc.map(String::from),
            ..Default::default()
        }
    }

    fn fields(result: Result<()>) -> Vec<&'static str> {
        match result {
            Err(Error::Validation(errors)) => errors.iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_customer_with_dni() {
        assert!(validate_customer(&customer("Ana Torres", Some("45678912"), None)).is_ok());
    }

    #[test]
    fn test_valid_customer_with_ruc() {
        assert!(validate_customer(&customer("Torres SAC", None, Some("20601234567"))).is_ok());
    }

    #[test]
    fn test_customer_requires_name() {
        assert_eq!(
            fields(validate_customer(&customer("  ", Some("45678912"), None))),
            vec!["name"]
        );
    }

    #[test]
    fn test_customer_requires_dni_or_ruc() {
        assert_eq!(
            fields(validate_customer(&customer("Ana", Some(""), None))),
            vec!["dni", "ruc"]
        );
    }

    #[test]
    fn test_customer_rejects_bad_email() {
        let mut c = customer("Ana", Some("45678912"), None);
        c.email = Some("ana@localhost".to_string());
        assert_eq!(fields(validate_customer(&c)), vec!["email"]);

        c.email = Some("ana@taller.pe".to_string());
        assert!(validate_customer(&c).is_ok());
    }

    #[test]
    fn test_customer_rejects_short_dni() {
        assert_eq!(
            fields(validate_customer(&customer("Ana", Some("1234"), None))),
            vec!["dni"]
        );
    }

    #[test]
    fn test_supplier_requires_name_and_ruc() {
        assert_eq!(
            fields(validate_supplier(&Supplier::default())),
            vec!["name", "ruc"]
        );
    }

    #[test]
    fn test_supplier_ruc_digits() {
        let supplier = Supplier {
            name: "Goodyear".to_string(),
            ruc: "2060123456X".to_string(),
            ..Default::default()
        };
        assert_eq!(fields(validate_supplier(&supplier)), vec!["ruc"]);
    }

    #[test]
    fn test_lookup_inputs() {
        assert!(validate_dni("45678912").is_ok());
        assert!(validate_dni("4567891").is_err());
        assert!(validate_ruc("20601234567").is_ok());
        assert!(validate_ruc("2060123456").is_err());
        assert!(validate_ruc("abcdefghijk").is_err());
    }
}
