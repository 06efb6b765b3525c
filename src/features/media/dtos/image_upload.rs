/// A local image picked for upload, as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
