use crate::error::{GraphError, Result, ResultExt};
use crate::query::{Params, PHOTO_FIELDS};
use crate::response::{Collection, SuccessResponse};
use crate::rest::GraphClient;
use crate::transport::{Body, HttpMethod};
use crate::types::Photo;

impl GraphClient {
    /// List page photos
    pub fn list_photos(&self, page_id: &str, limit: Option<u32>) -> Result<Vec<Photo>> {
        let mut params = Params::new();
        params.set_limit(limit);
        params.set("fields", PHOTO_FIELDS.join(","));
        let photos: Collection<Photo> = self
            .get(&format!("{}/photos", page_id), params)
            .context("getting photos")?;
        Ok(photos.data)
    }

    /// Delete a photo. A `{"success": false}` acknowledgement is an error.
    pub fn delete_photo(&self, photo_id: &str) -> Result<()> {
        let ack: SuccessResponse = self
            .apply(HttpMethod::Delete, photo_id, Params::new(), Body::Empty)
            .context("deleting photo")?;
        if !ack.success {
            return Err(GraphError::OperationFailed("failed to delete photo".to_string())
                .context("deleting photo"));
        }
        Ok(())
    }
}
