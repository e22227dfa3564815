// Upload boundary
// Media hosting: bytes in, public URL out

use anyhow::Result;

/// Media upload endpoint for cover photos and avatars.
///
/// Implementations are expected to enforce the cover-photo size limit
/// (see [`validate_image_size`]) before accepting the bytes.
///
/// [`validate_image_size`]: crate::services::validation::validate_image_size
pub trait ObjectUpload {
    /// Host the file and return its public URL.
    fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<String>;
}
