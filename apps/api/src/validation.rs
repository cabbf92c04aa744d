//! Request validation for the client and review endpoints. Violations are
//! reported as a single message naming the first offending field; the
//! handlers wrap them in `AppError::Validation` (HTTP 400).

use crate::models::client::{CreateClient, UpdateClient};

pub fn validate_create(req: &CreateClient) -> Result<(), String> {
    validate_client_id(&req.client_id)?;
    validate_common(
        &req.client_name,
        &req.google_review_link,
        req.logo_url.as_deref(),
        &req.primary_color,
        &req.secondary_color,
    )?;
    if let Some(name) = req.source_review_file.as_deref().filter(|s| !s.is_empty()) {
        validate_catalog_file_name(name)?;
    }
    Ok(())
}

pub fn validate_update(req: &UpdateClient) -> Result<(), String> {
    validate_common(
        &req.client_name,
        &req.google_review_link,
        req.logo_url.as_deref(),
        &req.primary_color,
        &req.secondary_color,
    )
}

pub fn validate_review(review: &str) -> Result<(), String> {
    let len = review.chars().count();
    if !(5..=500).contains(&len) {
        return Err("review must be between 5 and 500 characters".to_string());
    }
    Ok(())
}

fn validate_common(
    client_name: &str,
    google_review_link: &str,
    logo_url: Option<&str>,
    primary_color: &str,
    secondary_color: &str,
) -> Result<(), String> {
    let name_len = client_name.chars().count();
    if !(3..=100).contains(&name_len) {
        return Err("clientName must be between 3 and 100 characters".to_string());
    }
    if !is_http_url(google_review_link) {
        return Err("googleReviewLink must be a valid http(s) URL".to_string());
    }
    if let Some(url) = logo_url.filter(|u| !u.is_empty()) {
        if !is_http_url(url) {
            return Err("logoUrl must be a valid http(s) URL".to_string());
        }
    }
    if !is_hex_color(primary_color) {
        return Err("primaryColor must be a #rrggbb hex color".to_string());
    }
    if !is_hex_color(secondary_color) {
        return Err("secondaryColor must be a #rrggbb hex color".to_string());
    }
    Ok(())
}

fn validate_client_id(client_id: &str) -> Result<(), String> {
    let len = client_id.chars().count();
    if !(3..=50).contains(&len) || !client_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("clientId must be 3-50 alphanumeric characters".to_string());
    }
    Ok(())
}

/// Catalog file names are plain `name.json` — no path separators, so a
/// request can never escape the data directory.
fn validate_catalog_file_name(name: &str) -> Result<(), String> {
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');
    if !valid_chars || !name.ends_with(".json") || name.len() <= ".json".len() {
        return Err("sourceReviewFile must be a plain .json file name".to_string());
    }
    Ok(())
}

fn is_http_url(url: &str) -> bool {
    (url.starts_with("http://") || url.starts_with("https://"))
        && url.len() > "https://".len()
        && !url.contains(char::is_whitespace)
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::client::{default_primary_color, default_secondary_color};

    fn valid_create() -> CreateClient {
        CreateClient {
            client_id: "acme01".to_string(),
            client_name: "Acme Tours".to_string(),
            business_description: String::new(),
            business_services: String::new(),
            business_destination: String::new(),
            google_review_link: "https://g.page/r/acme/review".to_string(),
            logo_url: None,
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            source_review_file: None,
        }
    }

    #[test]
    fn valid_create_request_passes() {
        assert!(validate_create(&valid_create()).is_ok());
    }

    #[test]
    fn client_id_rejects_short_and_non_alphanumeric() {
        let mut req = valid_create();
        req.client_id = "ab".to_string();
        assert!(validate_create(&req).is_err());

        req.client_id = "with-dash".to_string();
        assert!(validate_create(&req).is_err());
    }

    #[test]
    fn review_link_must_be_http() {
        let mut req = valid_create();
        req.google_review_link = "ftp://example.com".to_string();
        assert!(validate_create(&req).is_err());
    }

    #[test]
    fn colors_must_be_six_digit_hex() {
        let mut req = valid_create();
        req.primary_color = "#fff".to_string();
        assert!(validate_create(&req).is_err());

        req.primary_color = "#12345g".to_string();
        assert!(validate_create(&req).is_err());
    }

    #[test]
    fn source_file_rejects_path_traversal() {
        let mut req = valid_create();
        req.source_review_file = Some("../secrets.json".to_string());
        assert!(validate_create(&req).is_err());

        req.source_review_file = Some("dir/file.json".to_string());
        assert!(validate_create(&req).is_err());

        req.source_review_file = Some("hotel-reviews.json".to_string());
        assert!(validate_create(&req).is_ok());
    }

    #[test]
    fn empty_source_file_field_is_allowed() {
        let mut req = valid_create();
        req.source_review_file = Some(String::new());
        assert!(validate_create(&req).is_ok());
    }

    #[test]
    fn sparse_update_body_deserializes_and_fails_validation() {
        // Missing required fields must surface as a validation error (400
        // envelope), not a body-deserialization rejection.
        let req: UpdateClient = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(validate_update(&req).is_err());

        let req: UpdateClient = serde_json::from_value(serde_json::json!({
            "clientName": "Acme Tours",
            "googleReviewLink": "https://example.com"
        }))
        .unwrap();
        // colors were omitted and default to empty strings
        assert!(validate_update(&req).is_err());
    }

    #[test]
    fn review_length_bounds() {
        assert!(validate_review("Good").is_err());
        assert!(validate_review("Good enough for me.").is_ok());
        assert!(validate_review(&"x".repeat(501)).is_err());
    }
}
