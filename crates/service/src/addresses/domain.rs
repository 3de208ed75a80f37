use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use models::address::{self, AddressChanges, NewAddress};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAddress {
    #[validate(length(min = 1, message = "alias is required"))]
    pub alias: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[serde(default)]
    pub number: Option<i64>,
    #[validate(length(min = 1, max = 32, message = "cep must have 1 to 32 characters"))]
    pub cep: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "state is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
}

impl From<CreateAddress> for NewAddress {
    fn from(c: CreateAddress) -> Self {
        NewAddress {
            alias: c.alias,
            address: c.address,
            number: c.number,
            cep: c.cep,
            city: c.city,
            state: c.state,
            country: c.country,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAddress {
    #[validate(length(min = 1, message = "alias must not be empty"))]
    pub alias: Option<String>,
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: Option<String>,
    pub number: Option<i64>,
    #[validate(length(min = 1, max = 32, message = "cep must have 1 to 32 characters"))]
    pub cep: Option<String>,
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "state must not be empty"))]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "country must not be empty"))]
    pub country: Option<String>,
}

impl From<UpdateAddress> for AddressChanges {
    fn from(u: UpdateAddress) -> Self {
        AddressChanges {
            alias: u.alias,
            address: u.address,
            number: u.number,
            cep: u.cep,
            city: u.city,
            state: u.state,
            country: u.country,
        }
    }
}

/// Optional equality filters. The owner constraint is added by the service
/// and cannot be overridden from here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AddressFilter {
    pub id: Option<Uuid>,
    pub alias: Option<String>,
    pub cep: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl AddressFilter {
    pub fn matches(&self, a: &address::Model) -> bool {
        fn eq<T: PartialEq>(want: &Option<T>, have: &T) -> bool {
            want.as_ref().map_or(true, |w| w == have)
        }
        eq(&self.id, &a.id)
            && eq(&self.alias, &a.alias)
            && eq(&self.cep, &a.cep)
            && eq(&self.city, &a.city)
            && eq(&self.state, &a.state)
            && eq(&self.country, &a.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(city: &str) -> address::Model {
        let now = Utc::now().into();
        address::Model {
            id: Uuid::new_v4(),
            alias: "work".into(),
            address: "Av. Paulista".into(),
            number: Some(1000),
            cep: "01310-100".into(),
            city: city.into(),
            state: "SP".into(),
            country: "BR".into(),
            user_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(AddressFilter::default().matches(&model("Santos")));
    }

    #[test]
    fn filter_fields_are_anded() {
        let m = model("Santos");
        let f = AddressFilter { city: Some("Santos".into()), state: Some("SP".into()), ..Default::default() };
        assert!(f.matches(&m));
        let f = AddressFilter { city: Some("Santos".into()), state: Some("RJ".into()), ..Default::default() };
        assert!(!f.matches(&m));
        let f = AddressFilter { id: Some(m.id), ..Default::default() };
        assert!(f.matches(&m));
    }

    #[test]
    fn create_requires_fields_but_not_number() {
        let ok = CreateAddress {
            alias: "home".into(),
            address: "Rua B".into(),
            number: None,
            cep: "22000-000".into(),
            city: "Rio".into(),
            state: "RJ".into(),
            country: "BR".into(),
        };
        assert!(ok.validate().is_ok());
        let bad = CreateAddress { alias: String::new(), ..ok };
        assert!(bad.validate().is_err());
    }
}
