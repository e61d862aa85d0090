// ── Guest domain types ──

use serde::{Deserialize, Serialize};

use super::entity_id::{EntityId, Identified};

/// Postal address; each part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// "street city country" with missing parts left blank, then trimmed.
    pub fn one_line(&self) -> String {
        let part = |p: &Option<String>| p.clone().unwrap_or_default();
        format!(
            "{} {} {}",
            part(&self.street),
            part(&self.city),
            part(&self.country)
        )
        .trim()
        .to_owned()
    }
}

/// A registered guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Kind of identity document (e.g. "passport").
    pub id_proof: String,
    pub id_number: String,
    pub address: Option<Address>,
}

impl Guest {
    /// Address for display, or "No address".
    pub fn address_line(&self) -> String {
        self.address
            .as_ref()
            .map(Address::one_line)
            .filter(|line| !line.is_empty())
            .unwrap_or_else(|| "No address".to_owned())
    }

    /// "passport: P1234567"
    pub fn id_document(&self) -> String {
        format!("{}: {}", self.id_proof, self.id_number)
    }
}

impl Identified for Guest {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest(address: Option<Address>) -> Guest {
        Guest {
            id: EntityId::from("g1"),
            name: "Ana Cruz".into(),
            email: "ana@example.com".into(),
            phone: "0917".into(),
            id_proof: "passport".into(),
            id_number: "P123".into(),
            address,
        }
    }

    #[test]
    fn address_line_joins_parts() {
        let g = guest(Some(Address {
            street: Some("12 Rizal St".into()),
            city: Some("Manila".into()),
            country: Some("PH".into()),
        }));
        assert_eq!(g.address_line(), "12 Rizal St Manila PH");
    }

    #[test]
    fn address_line_trims_missing_ends() {
        let g = guest(Some(Address {
            street: None,
            city: Some("Cebu".into()),
            country: None,
        }));
        assert_eq!(g.address_line(), "Cebu");
    }

    #[test]
    fn missing_or_blank_address() {
        assert_eq!(guest(None).address_line(), "No address");
        assert_eq!(guest(Some(Address::default())).address_line(), "No address");
    }

    #[test]
    fn id_document_format() {
        assert_eq!(guest(None).id_document(), "passport: P123");
    }
}
