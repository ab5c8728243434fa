use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Domain Models
// ============================================================================

/// A customer record as stored and as returned by the API.
///
/// `id` is `None` only for records that have not been persisted yet; the
/// store assigns it on first save and it never changes afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Option<Uuid>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: String,
}

impl Customer {
    /// Overwrite every mutable field with the values from `details`.
    /// The receiver's id is kept.
    pub fn replace_details(&mut self, details: Customer) {
        self.first_name = details.first_name;
        self.middle_name = details.middle_name;
        self.last_name = details.last_name;
        self.email_address = details.email_address;
        self.phone_number = details.phone_number;
    }
}

#[cfg(test)]
pub(crate) fn sample_customer(first_name: &str, email: &str) -> Customer {
    Customer {
        id: None,
        first_name: first_name.to_string(),
        middle_name: Some("M".to_string()),
        last_name: "Doe".to_string(),
        email_address: email.to_string(),
        phone_number: "+1234567890".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape_uses_camel_case() {
        let mut customer = sample_customer("John", "john.doe@example.com");
        customer.id = Some(Uuid::new_v4());
        customer.middle_name = None;

        let json = serde_json::to_value(&customer).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 6);
        assert!(obj["id"].is_string());
        assert_eq!(obj["firstName"], "John");
        assert!(obj["middleName"].is_null());
        assert_eq!(obj["lastName"], "Doe");
        assert_eq!(obj["emailAddress"], "john.doe@example.com");
        assert_eq!(obj["phoneNumber"], "+1234567890");
    }

    #[test]
    fn test_replace_details_keeps_id() {
        let id = Uuid::new_v4();
        let mut existing = sample_customer("John", "john.doe@example.com");
        existing.id = Some(id);

        let mut details = sample_customer("Johnny", "johnny.does@example.com");
        details.id = Some(Uuid::new_v4());
        details.middle_name = None;
        details.last_name = "Does".to_string();
        details.phone_number = "+9876543210".to_string();

        existing.replace_details(details);

        assert_eq!(existing.id, Some(id));
        assert_eq!(existing.first_name, "Johnny");
        assert_eq!(existing.middle_name, None);
        assert_eq!(existing.last_name, "Does");
        assert_eq!(existing.email_address, "johnny.does@example.com");
        assert_eq!(existing.phone_number, "+9876543210");
    }
}
