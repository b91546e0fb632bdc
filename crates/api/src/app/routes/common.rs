//! Helpers shared by the multipart (image-bearing) routes.

use std::collections::HashMap;

use axum::extract::Multipart;

use quill_core::CoreError;

use crate::app::errors::ApiError;

/// An uploaded image part.
pub struct ImagePart {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Drain a multipart body into the `image` part (if any) plus the remaining
/// text fields.
pub async fn image_and_fields(
    mut multipart: Multipart,
) -> Result<(Option<ImagePart>, HashMap<String, String>), ApiError> {
    let mut image = None;
    let mut fields = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| CoreError::invalid_input("malformed multipart body"))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| CoreError::invalid_input("malformed multipart body"))?
                .to_vec();
            image = Some(ImagePart { filename, bytes });
        } else {
            let value = field
                .text()
                .await
                .map_err(|_| CoreError::invalid_input("malformed multipart body"))?;
            fields.insert(name, value);
        }
    }

    Ok((image, fields))
}

/// The image part, or the 400 the image routes answer when it is missing.
pub fn require_image(image: Option<ImagePart>) -> Result<ImagePart, ApiError> {
    image.ok_or_else(|| ApiError::from(CoreError::invalid_input("no image provided")))
}
