//! QR ticket codes issued with each registration.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Module edge length in pixels when rendering the QR image
const MODULE_PIXELS: u32 = 10;

/// Scannable ticket binding an attendee to an event.
///
/// The payload is `"<event_id>:<user_id>"`; scanning it at the venue is
/// enough to look up the registration to check in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketCode {
    payload: String,
}

impl TicketCode {
    pub fn new(event_id: Uuid, user_id: Uuid) -> Self {
        Self {
            payload: format!("{}:{}", event_id, user_id),
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Render the ticket as a base64-encoded PNG, ready to embed in a JSON
    /// response or an `<img>` tag.
    pub fn to_png_base64(&self) -> AppResult<String> {
        let code = QrCode::new(self.payload.as_bytes())
            .map_err(|e| AppError::internal(format!("QR encoding failed: {}", e)))?;
        let image = code
            .render::<Luma<u8>>()
            .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
            .build();

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| AppError::internal(format!("PNG encoding failed: {}", e)))?;

        Ok(STANDARD.encode(&png))
    }
}
