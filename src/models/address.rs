use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Postal address owned by a supplier, a warehouse or a customer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "address")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_address: i64,
    pub id_supplier: i64,
    pub id_warehouse: i64,
    pub alias: String,
    pub company: Option<String>,
    pub lastname: String,
    pub firstname: String,
    pub address1: String,
    pub address2: Option<String>,
    pub postcode: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub phone: Option<String>,
    pub phone_mobile: Option<String>,
    pub vat_number: Option<String>,
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Address lines in display order, blank lines dropped.
    ///
    /// Fields sharing a line are joined with `field_separator`.
    pub fn layout_lines(&self, field_separator: &str) -> Vec<String> {
        let layout: [Vec<Option<&str>>; 9] = [
            vec![Some(self.firstname.as_str()), Some(self.lastname.as_str())],
            vec![self.company.as_deref()],
            vec![self.vat_number.as_deref()],
            vec![Some(self.address1.as_str())],
            vec![self.address2.as_deref()],
            vec![self.postcode.as_deref(), Some(self.city.as_str())],
            vec![self.state.as_deref()],
            vec![Some(self.country.as_str())],
            vec![self.phone.as_deref()],
        ];

        layout
            .iter()
            .map(|fields| {
                fields
                    .iter()
                    .flatten()
                    .map(|field| field.trim())
                    .filter(|field| !field.is_empty())
                    .collect::<Vec<_>>()
                    .join(field_separator)
            })
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Single-line rendering, e.g. for a document footer.
    pub fn format_inline(&self, line_separator: &str, field_separator: &str) -> String {
        self.layout_lines(field_separator).join(line_separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse_address() -> Model {
        Model {
            id_address: 3,
            id_supplier: 0,
            id_warehouse: 1,
            alias: "warehouse".into(),
            company: Some("Acme Logistics".into()),
            lastname: "Doe".into(),
            firstname: "Jane".into(),
            address1: "12 Dock Road".into(),
            address2: None,
            postcode: Some("75002".into()),
            city: "Paris".into(),
            state: None,
            country: "France".into(),
            phone: Some("+33 1 23 45 67 89".into()),
            phone_mobile: None,
            vat_number: Some("  ".into()),
            deleted: false,
        }
    }

    #[test]
    fn layout_skips_empty_lines() {
        let lines = warehouse_address().layout_lines(" ");
        assert_eq!(
            lines,
            vec![
                "Jane Doe",
                "Acme Logistics",
                "12 Dock Road",
                "75002 Paris",
                "France",
                "+33 1 23 45 67 89",
            ]
        );
    }

    #[test]
    fn inline_format_joins_lines() {
        let mut address = warehouse_address();
        address.company = None;
        address.phone = None;
        assert_eq!(
            address.format_inline(" - ", " "),
            "Jane Doe - 12 Dock Road - 75002 Paris - France"
        );
    }
}
