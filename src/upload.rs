use crate::error::{Result, ResultExt};
use crate::query::Params;
use crate::rest::{GraphClient, ACCESS_TOKEN_PARAM};
use crate::transport::{Body, FilePart, HttpMethod, Multipart};
use crate::types::PhotoResponse;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Multipart part carrying the image bytes
pub const SOURCE_FIELD: &str = "source";

/// File name reported for uploaded images
pub const UPLOAD_FILE_NAME: &str = "image.jpg";

fn published_flag(published: bool) -> &'static str {
    if published {
        "true"
    } else {
        "false"
    }
}

impl GraphClient {
    /// Upload a local image file to a page
    pub fn upload_photo<P: AsRef<Path>>(
        &self,
        page_id: &str,
        image_path: P,
        message: &str,
        published: bool,
    ) -> Result<PhotoResponse> {
        let file = File::open(image_path.as_ref()).context("opening image file")?;
        self.upload_photo_from_reader(page_id, file, message, published)
    }

    /// Upload an image read from any byte stream to a page
    pub fn upload_photo_from_reader<R: Read>(
        &self,
        page_id: &str,
        mut reader: R,
        message: &str,
        published: bool,
    ) -> Result<PhotoResponse> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .context("copying image data")?;

        let mut form = Multipart::default().file(FilePart {
            name: SOURCE_FIELD.to_string(),
            file_name: UPLOAD_FILE_NAME.to_string(),
            mime_type: "application/octet-stream".to_string(),
            bytes,
        });
        if !message.is_empty() {
            form = form.text("message", message);
        }
        form = form
            .text("published", published_flag(published))
            .text(ACCESS_TOKEN_PARAM, self.access_token());

        self.apply(
            HttpMethod::Post,
            &format!("{}/photos", page_id),
            Params::new(),
            Body::Multipart(form),
        )
        .context("uploading photo")
    }

    /// Have the API fetch an image from a public URL and post it to a page
    pub fn upload_photo_by_url(
        &self,
        page_id: &str,
        image_url: &str,
        message: &str,
        published: bool,
    ) -> Result<PhotoResponse> {
        let mut form = vec![("url".to_string(), image_url.to_string())];
        if !message.is_empty() {
            form.push(("message".to_string(), message.to_string()));
        }
        form.push(("published".to_string(), published_flag(published).to_string()));

        self.apply(
            HttpMethod::Post,
            &format!("{}/photos", page_id),
            Params::new(),
            Body::Form(form),
        )
        .context("uploading photo by URL")
    }
}
