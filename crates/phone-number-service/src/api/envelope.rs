//! Response envelope wrapping phone numbers with a self link.

use crate::registry::{CustomerId, PhoneNumber};
use serde::{Deserialize, Serialize};

/// Path template for the list-all endpoint.
pub const ALL_PHONE_NUMBERS_PATH: &str = "/phone-numbers";

/// Path template for a customer's phone numbers.
pub const CUSTOMER_PHONE_NUMBERS_PATH: &str = "/customers/{customerId}/phone-numbers";

/// Path template for a single customer phone number.
pub const CUSTOMER_PHONE_NUMBER_PATH: &str = "/customers/{customerId}/phone-numbers/{phoneNumber}";

/// A hypermedia link.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,
}

/// Links attached to a phone numbers response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Links {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
}

/// Phone numbers plus a self link describing the request that produced them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumbersResponse {
    pub phone_numbers: Vec<PhoneNumber>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl PhoneNumbersResponse {
    /// Wrap `phone_numbers` with a self link built from `path_template`.
    ///
    /// `{customerId}` expands to the customer id and `{phoneNumber}` to the
    /// comma-joined numbers in the response.
    pub fn assemble(
        base_url: &str,
        customer_id: Option<CustomerId>,
        phone_numbers: Vec<PhoneNumber>,
        http_method: &str,
        path_template: &str,
    ) -> Self {
        let href = format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            expand_path(path_template, customer_id, &phone_numbers)
        );

        Self {
            phone_numbers,
            links: Some(Links {
                self_link: Some(Link {
                    href: Some(href),
                    http_method: Some(http_method.to_string()),
                    templated: Some(false),
                }),
            }),
        }
    }

    /// The self link, if any.
    pub fn self_link(&self) -> Option<&Link> {
        self.links.as_ref().and_then(|links| links.self_link.as_ref())
    }
}

/// Substitute path variables, percent-encoding each value.
fn expand_path(
    template: &str,
    customer_id: Option<CustomerId>,
    phone_numbers: &[PhoneNumber],
) -> String {
    let customer = customer_id.map(|id| id.to_string()).unwrap_or_default();
    let numbers = phone_numbers
        .iter()
        .map(|n| urlencoding::encode(&n.number).into_owned())
        .collect::<Vec<_>>()
        .join(",");

    template
        .replace("{customerId}", &customer)
        .replace("{phoneNumber}", &numbers)
}
