/// Maximum image size accepted by the upload pipeline (10 MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Content types the media host accepts
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Concurrent upload cap inside a single submission
pub const MAX_CONCURRENT_UPLOADS: usize = 5;

/// Photo count limits per entity
pub const MAX_REPORT_PHOTOS: usize = 3;
pub const MAX_SIGHTING_PHOTOS: usize = 5;
pub const MAX_CLAIM_PHOTOS: usize = 5;

/// Fallback display name when identity resolution fails or the profile is missing
pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous";

/// Display name shown for the subscribing user's own reports
pub const SELF_DISPLAY_NAME: &str = "You";

pub fn is_image_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}
