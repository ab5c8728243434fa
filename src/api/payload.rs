use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use validator::{Validate, ValidationErrors};

use crate::models::Customer;

/// Field name (as it appears in JSON) → violation message
pub type FieldErrors = BTreeMap<String, String>;

static NOT_BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S").expect("not-blank pattern compiles"));

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("phone pattern compiles"));

/// Request body for create and update.
///
/// Every field is optional at the JSON level so that a missing field is
/// reported as a violation next to the others instead of failing the parse.
/// Unknown keys, `id` included, are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[validate(
        required(code = "required", message = "First Name is mandatory"),
        regex(path = *NOT_BLANK, code = "not_blank", message = "First Name is mandatory"),
        length(max = 50, message = "First Name must be at most 50 characters")
    )]
    pub first_name: Option<String>,

    pub middle_name: Option<String>,

    #[validate(
        required(code = "required", message = "Last Name is mandatory"),
        regex(path = *NOT_BLANK, code = "not_blank", message = "Last Name is mandatory"),
        length(max = 50, message = "Last Name must be at most 50 characters")
    )]
    pub last_name: Option<String>,

    #[validate(
        required(code = "required", message = "Email address is mandatory"),
        regex(path = *NOT_BLANK, code = "not_blank", message = "Email address is mandatory"),
        email(message = "Invalid email address")
    )]
    pub email_address: Option<String>,

    #[validate(
        required(code = "required", message = "Phone Number is mandatory"),
        length(min = 1, code = "not_blank", message = "Phone Number is mandatory"),
        regex(
            path = *PHONE_NUMBER,
            code = "phone_pattern",
            message = "Phone Number must be valid and contain 10 to 15 digits"
        )
    )]
    pub phone_number: Option<String>,
}

impl CustomerPayload {
    /// Check every field and build the customer the service works with.
    /// All violations are reported together, one message per field.
    pub fn into_customer(self) -> Result<Customer, FieldErrors> {
        self.validate().map_err(|errors| field_messages(&errors))?;

        Ok(Customer {
            id: None,
            first_name: self.first_name.unwrap_or_default(),
            middle_name: self.middle_name,
            last_name: self.last_name.unwrap_or_default(),
            email_address: self.email_address.unwrap_or_default(),
            phone_number: self.phone_number.unwrap_or_default(),
        })
    }
}

/// Presence and blankness are reported ahead of format rules.
fn rank(code: &str) -> u8 {
    match code {
        "required" => 0,
        "not_blank" => 1,
        _ => 2,
    }
}

fn field_messages(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, violations)| {
            let first = violations.iter().min_by_key(|v| rank(&v.code))?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            Some((json_name(&field), message))
        })
        .collect()
}

/// `email_address` → `emailAddress`
///
/// Handles plain lowercase snake_case only. A field with its own
/// `#[serde(rename)]` is not reflected here.
fn json_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            name.extend(ch.to_uppercase());
            upper = false;
        } else {
            name.push(ch);
        }
    }
    name
}
