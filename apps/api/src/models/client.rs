use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full client record as stored in Postgres. The review list is embedded
/// in the row (`TEXT[]`); it is never serialized on detail responses —
/// the review endpoints expose it separately.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClientRow {
    pub id: Uuid,
    pub client_id: String,
    pub client_name: String,
    pub business_description: String,
    pub business_services: String,
    pub business_destination: String,
    pub google_review_link: String,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    #[serde(skip_serializing)]
    pub reviews: Vec<String>,
}

/// Slim projection returned by the client list endpoint.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub client_id: String,
    pub client_name: String,
}

/// Fields accepted when creating a client. Collected by hand from the
/// multipart form (text fields alongside the optional `reviewFile`
/// upload), then validated.
#[derive(Debug, Clone, Default)]
pub struct CreateClient {
    pub client_id: String,
    pub client_name: String,
    pub business_description: String,
    pub business_services: String,
    pub business_destination: String,
    pub google_review_link: String,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    /// Name of a server-side catalog file to seed reviews from.
    pub source_review_file: Option<String>,
}

impl CreateClient {
    /// Starting point for multipart collection, colors pre-filled with the
    /// defaults so an omitted field keeps them.
    pub fn with_defaults() -> Self {
        Self {
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            ..Self::default()
        }
    }
}

/// Fields accepted when updating a client. `client_id` and the review list
/// are immutable through this path.
///
/// Every field is defaultable so a sparse body deserializes and reaches the
/// validation layer, which reports the missing field in the service's usual
/// 400 error envelope instead of axum's bare deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub business_description: String,
    #[serde(default)]
    pub business_services: String,
    #[serde(default)]
    pub business_destination: String,
    #[serde(default)]
    pub google_review_link: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub primary_color: String,
    #[serde(default)]
    pub secondary_color: String,
}

pub fn default_primary_color() -> String {
    "#3b82f6".to_string()
}

pub fn default_secondary_color() -> String {
    "#ffffff".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_row_serialization_omits_reviews_and_uses_camel_case() {
        let row = ClientRow {
            id: Uuid::new_v4(),
            client_id: "acme01".to_string(),
            client_name: "Acme Tours".to_string(),
            business_description: String::new(),
            business_services: String::new(),
            business_destination: String::new(),
            google_review_link: "https://example.com".to_string(),
            logo_url: None,
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            reviews: vec!["hidden".to_string()],
        };

        let value = serde_json::to_value(&row).unwrap();
        assert!(value.get("reviews").is_none());
        assert_eq!(value["clientId"], "acme01");
        assert_eq!(value["googleReviewLink"], "https://example.com");
    }

    #[test]
    fn update_client_accepts_camel_case_payload() {
        let json = serde_json::json!({
            "clientName": "Acme Tours",
            "googleReviewLink": "https://example.com",
            "primaryColor": "#3b82f6",
            "secondaryColor": "#ffffff"
        });
        let req: UpdateClient = serde_json::from_value(json).unwrap();
        assert_eq!(req.client_name, "Acme Tours");
        assert_eq!(req.business_description, "");
        assert!(req.logo_url.is_none());
    }
}
