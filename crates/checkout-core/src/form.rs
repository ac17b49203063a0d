//! Form State
//!
//! Customer and invoice metadata collected by the checkout form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};

/// Fee types offered by the form
pub const FEE_TYPES: &[(&str, &str)] = &[("registration", "Registration Fee"), ("kit", "Kit Fee")];

/// Campuses offered by the form
pub const CAMPUSES: &[(&str, &str)] = &[
    ("allentown", "Allentown"),
    ("ambler", "Ambler"),
    ("philadelphia", "Philadelphia"),
    ("stroudsburg", "Stroudsburg"),
];

/// Programs offered by the form
pub const PROGRAMS: &[(&str, &str)] = &[
    ("cosmetology", "Cosmetology"),
    ("esthetics", "Esthetics"),
    ("teacher", "Teacher"),
];

/// The five form fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    FeeType,
    Campus,
    Program,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::FeeType,
        FormField::Campus,
        FormField::Program,
    ];

    /// Field name as used in form markup and JSON bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::FeeType => "feeType",
            FormField::Campus => "campus",
            FormField::Program => "program",
        }
    }

    /// Fixed choices for select fields; `None` for free text
    pub fn options(&self) -> Option<&'static [(&'static str, &'static str)]> {
        match self {
            FormField::Name | FormField::Email => None,
            FormField::FeeType => Some(FEE_TYPES),
            FormField::Campus => Some(CAMPUSES),
            FormField::Program => Some(PROGRAMS),
        }
    }
}

impl FromStr for FormField {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self> {
        FormField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CheckoutError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer/invoice metadata; serializes as the create-customer body
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub fee_type: String,
    pub campus: String,
    pub program: String,
}

impl FormState {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::FeeType => &self.fee_type,
            FormField::Campus => &self.campus,
            FormField::Program => &self.program,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::FeeType => self.fee_type = value,
            FormField::Campus => self.campus = value,
            FormField::Program => self.program = value,
        }
    }

    /// Set a field by its markup name (`feeType`, ...)
    pub fn set_named(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let field: FormField = name.parse()?;
        self.set(field, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_empty() {
        let form = FormState::default();
        for field in FormField::ALL {
            assert_eq!(form.get(field), "");
        }
    }

    #[test]
    fn test_fields_are_independent() {
        let mut form = FormState::default();
        form.set(FormField::Name, "Ada");
        form.set_named("feeType", "kit").unwrap();

        assert_eq!(form.name, "Ada");
        assert_eq!(form.fee_type, "kit");
        assert_eq!(form.email, "");

        form.set(FormField::Name, "Grace");
        assert_eq!(form.fee_type, "kit");
    }

    #[test]
    fn test_unknown_field() {
        let mut form = FormState::default();
        assert!(matches!(
            form.set_named("fee_type", "kit"),
            Err(CheckoutError::UnknownField(_))
        ));
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut form = FormState::default();
        form.set(FormField::FeeType, "registration");
        let body = serde_json::to_value(&form).unwrap();
        assert_eq!(body["feeType"], "registration");
        assert!(body.get("fee_type").is_none());
    }

    #[test]
    fn test_select_options() {
        assert!(FormField::Email.options().is_none());
        let campuses = FormField::Campus.options().unwrap();
        assert_eq!(campuses.len(), 4);
        assert!(campuses.iter().any(|(value, _)| *value == "ambler"));
    }
}
