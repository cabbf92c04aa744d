//! QR code rendering for the public review page link.

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

/// The review page URL for a client, on the frontend host.
pub fn review_page_link(app_base_url: &str, client_id: &str) -> String {
    format!("{}/review/{}", app_base_url.trim_end_matches('/'), client_id)
}

/// Renders the review page link as an SVG QR code wrapped in a data URL.
/// High error correction so the code survives print-and-laminate use.
pub fn review_page_qr(app_base_url: &str, client_id: &str) -> Result<(String, String)> {
    let link = review_page_link(app_base_url, client_id);
    let code = QrCode::with_error_correction_level(link.as_bytes(), EcLevel::H)?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(300, 300)
        .quiet_zone(true)
        .build();
    let data_url = format!("data:image/svg+xml;base64,{}", STANDARD.encode(image));
    Ok((data_url, link))
}
