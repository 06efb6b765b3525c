use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};

use crate::core::error::UploadError;
use crate::features::media::dtos::ImageUpload;
use crate::modules::storage::MediaHost;
use crate::shared::constants::{is_image_type_allowed, MAX_CONCURRENT_UPLOADS, MAX_IMAGE_SIZE};

/// Outcome of a batch upload with independent per-image results.
///
/// Indices refer to positions in the input batch so callers can keep photo
/// URLs in submission order.
#[derive(Debug)]
pub struct BatchOutcome {
    pub successful: Vec<(usize, String)>,
    pub failed: Vec<(usize, UploadError)>,
}

impl BatchOutcome {
    /// URLs in input order; only meaningful when `failed` is empty.
    pub fn urls_in_order(mut self) -> Vec<String> {
        self.successful.sort_by_key(|(idx, _)| *idx);
        self.successful.into_iter().map(|(_, url)| url).collect()
    }
}

/// Uploads images to the external media host.
///
/// Validates locally before any network traffic and never retries; retry is
/// a caller decision (the submission pipeline surfaces failures to the user).
pub struct MediaUploadService {
    host: Arc<dyn MediaHost>,
}

impl MediaUploadService {
    pub fn new(host: Arc<dyn MediaHost>) -> Self {
        Self { host }
    }

    fn validate(image: &ImageUpload) -> Result<(), UploadError> {
        if !is_image_type_allowed(&image.content_type) {
            return Err(UploadError::InvalidFormat);
        }
        if image.size() > MAX_IMAGE_SIZE {
            return Err(UploadError::PayloadTooLarge);
        }
        Ok(())
    }

    /// Upload one image and return its durable URL.
    pub async fn upload(&self, image: ImageUpload) -> Result<String, UploadError> {
        Self::validate(&image)?;
        self.host
            .upload(&image.filename, &image.content_type, image.data)
            .await
    }

    /// Upload a batch of images with independent outcomes.
    ///
    /// Uploads run concurrently, capped at `MAX_CONCURRENT_UPLOADS`; one
    /// failing image does not cancel siblings already in flight. Whether a
    /// partial result is acceptable is the caller's policy.
    pub async fn upload_batch(&self, images: Vec<ImageUpload>) -> BatchOutcome {
        let mut successful = Vec::new();
        let mut failed = Vec::new();

        let mut pending = images.into_iter().enumerate();
        let mut in_flight = FuturesUnordered::new();

        loop {
            while in_flight.len() < MAX_CONCURRENT_UPLOADS {
                match pending.next() {
                    Some((idx, image)) => in_flight.push(async move {
                        let result = self.upload(image).await;
                        (idx, result)
                    }),
                    None => break,
                }
            }

            match in_flight.next().await {
                Some((idx, Ok(url))) => successful.push((idx, url)),
                Some((idx, Err(e))) => {
                    tracing::warn!("Image {} failed to upload: {}", idx, e);
                    failed.push((idx, e));
                }
                None => break,
            }
        }

        BatchOutcome { successful, failed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Host stub that fails any filename starting with "bad"
    struct StubHost {
        calls: AtomicUsize,
    }

    impl StubHost {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MediaHost for StubHost {
        async fn upload(
            &self,
            filename: &str,
            _content_type: &str,
            _data: Vec<u8>,
        ) -> Result<String, UploadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if filename.starts_with("bad") {
                Err(UploadError::Unknown("host rejected".into()))
            } else {
                Ok(format!("https://media.example/{}", filename))
            }
        }
    }

    fn jpeg(filename: &str, size: usize) -> ImageUpload {
        ImageUpload {
            filename: filename.to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![0u8; size],
        }
    }

    #[tokio::test]
    async fn oversized_image_fails_before_any_network_call() {
        let host = Arc::new(StubHost::new());
        let service = MediaUploadService::new(Arc::clone(&host) as Arc<dyn MediaHost>);

        let err = service
            .upload(jpeg("big.jpg", MAX_IMAGE_SIZE + 1))
            .await
            .unwrap_err();
        assert_eq!(err, UploadError::PayloadTooLarge);
        assert_eq!(host.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn disallowed_type_is_rejected_locally() {
        let host = Arc::new(StubHost::new());
        let service = MediaUploadService::new(Arc::clone(&host) as Arc<dyn MediaHost>);

        let gif = ImageUpload {
            filename: "anim.gif".into(),
            content_type: "image/gif".into(),
            data: vec![0u8; 64],
        };
        assert_eq!(
            service.upload(gif).await.unwrap_err(),
            UploadError::InvalidFormat
        );
        assert_eq!(host.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn batch_outcomes_are_independent() {
        let service = MediaUploadService::new(Arc::new(StubHost::new()));

        let outcome = service
            .upload_batch(vec![
                jpeg("a.jpg", 10),
                jpeg("bad.jpg", 10),
                jpeg("c.jpg", 10),
            ])
            .await;

        assert_eq!(outcome.successful.len(), 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, 1);
    }

    #[tokio::test]
    async fn batch_preserves_input_order_in_urls() {
        let service = MediaUploadService::new(Arc::new(StubHost::new()));

        let outcome = service
            .upload_batch(vec![
                jpeg("one.jpg", 10),
                jpeg("two.jpg", 10),
                jpeg("three.jpg", 10),
            ])
            .await;

        assert!(outcome.failed.is_empty());
        assert_eq!(
            outcome.urls_in_order(),
            vec![
                "https://media.example/one.jpg",
                "https://media.example/two.jpg",
                "https://media.example/three.jpg",
            ]
        );
    }
}
