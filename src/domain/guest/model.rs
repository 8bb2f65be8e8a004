//! Guest domain entity

use std::collections::HashMap;

use validator::Validate;

/// Hotel client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    /// Identity document number
    pub document: String,
    pub email: String,
    pub phone: String,
}

/// Guests keyed by ID
pub type GuestIndex = HashMap<i64, Guest>;

pub fn index_guests(guests: &[Guest]) -> GuestIndex {
    guests.iter().map(|g| (g.id, g.clone())).collect()
}

/// Guest create/update form
#[derive(Debug, Clone, Validate)]
pub struct GuestDraft {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 30, message = "document is required"))]
    pub document: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> GuestDraft {
        GuestDraft {
            name: "Ana Torres".into(),
            document: "12345678".into(),
            email: "ana@example.com".into(),
            phone: "+51 999 888 777".into(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn empty_name_fails() {
        let mut d = draft();
        d.name.clear();
        assert!(d.validate().is_err());
    }

    #[test]
    fn invalid_email_fails() {
        let mut d = draft();
        d.email = "ana.example.com".into();
        assert!(d.validate().is_err());
    }

    #[test]
    fn index_keys_by_id() {
        let guests = vec![Guest {
            id: 4,
            name: "Luis".into(),
            document: "X1".into(),
            email: "luis@example.com".into(),
            phone: String::new(),
        }];
        assert_eq!(index_guests(&guests)[&4].name, "Luis");
    }
}
