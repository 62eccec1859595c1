use serde::{Deserialize, Serialize};

// ============================================================================
// Customer Value Objects
// ============================================================================

/// Contact details typed in at checkout. Free text, validated only by checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub table_number: String,
}

impl CustomerInfo {
    /// Shallow merge: every field present in the update replaces the stored one
    pub fn merge(&mut self, update: CustomerInfoUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(table_number) = update.table_number {
            self.table_number = table_number;
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn has_phone(&self) -> bool {
        !self.phone.trim().is_empty()
    }
}

/// Partial update of [`CustomerInfo`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerInfoUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub table_number: Option<String>,
}

impl CustomerInfoUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn table_number(mut self, table_number: impl Into<String>) -> Self {
        self.table_number = Some(table_number.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_only_touches_given_fields() {
        let mut info = CustomerInfo::default();
        info.merge(CustomerInfoUpdate::default().name("Asha").phone("+91 98765 43210"));
        info.merge(CustomerInfoUpdate::default().address("12 MG Road"));

        assert_eq!(info.name, "Asha");
        assert_eq!(info.phone, "+91 98765 43210");
        assert_eq!(info.address, "12 MG Road");
        assert_eq!(info.email, "");
    }

    #[test]
    fn test_merge_can_blank_a_field() {
        let mut info = CustomerInfo::default();
        info.merge(CustomerInfoUpdate::default().name("Asha"));
        info.merge(CustomerInfoUpdate::default().name(""));

        assert!(!info.has_name());
    }

    #[test]
    fn test_whitespace_does_not_count_as_present() {
        let mut info = CustomerInfo::default();
        info.merge(CustomerInfoUpdate::default().name("   ").phone("\t"));

        assert!(!info.has_name());
        assert!(!info.has_phone());
    }

    #[test]
    fn test_update_deserializes_partially() {
        let update: CustomerInfoUpdate = serde_json::from_str(r#"{"table_number": "7"}"#).unwrap();

        assert_eq!(update.table_number.as_deref(), Some("7"));
        assert!(update.name.is_none());
        assert!(!update.is_empty());
        assert!(CustomerInfoUpdate::default().is_empty());
    }
}
