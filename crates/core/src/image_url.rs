//! Transformed image URLs and preload hints.

use crate::portfolio::PortfolioImage;

pub const DEFAULT_QUALITY: u8 = 80;

/// Number of gallery images hinted for preloading by default.
pub const DEFAULT_PRELOAD_COUNT: usize = 6;

/// Public object path prefix of the storage service.
const PUBLIC_OBJECT_PREFIX: &str = "storage/v1/object/public";

/// Resize and quality hints appended to an image URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageTransform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u8>,
}

/// Build the public URL for `path` with transform hints.
///
/// Absolute `http(s)` URLs are kept and only receive the query string.
/// Anything else is treated as an object path under `storage_base`.
pub fn build_image_url(storage_base: &str, path: &str, transform: ImageTransform) -> String {
    let mut url = if is_absolute(path) {
        path.to_string()
    } else {
        format!(
            "{}/{PUBLIC_OBJECT_PREFIX}/{}",
            storage_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };

    let mut params = Vec::with_capacity(3);
    if let Some(width) = transform.width {
        params.push(format!("width={width}"));
    }
    if let Some(height) = transform.height {
        params.push(format!("height={height}"));
    }
    params.push(format!(
        "quality={}",
        transform.quality.unwrap_or(DEFAULT_QUALITY)
    ));

    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(&params.join("&"));
    url
}

/// `Link` header values asking the client to preload the first `n` images.
pub fn preload_links(images: &[PortfolioImage], n: usize) -> Vec<String> {
    images
        .iter()
        .take(n)
        .map(|img| format!("<{}>; rel=preload; as=image", img.image_url))
        .collect()
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}
