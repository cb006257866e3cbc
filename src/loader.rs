//! Fetching and decoding of optional document imagery (logos, receipt photos).

use std::collections::HashMap;

use crate::error::ImageLoadError;
use crate::model::{ImageData, ImageFormat, ImageSlot, RemoteImage};

/// Raw bytes of a fetched resource plus its declared content type.
pub struct FetchedResource {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

pub trait ResourceFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedResource, ImageLoadError>;
}

/// Serves resources registered up front. Unknown URLs fail like a 404.
#[derive(Default)]
pub struct MemoryFetcher {
    resources: HashMap<String, (Vec<u8>, Option<String>)>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>, content_type: Option<&str>) {
        self.resources
            .insert(url.into(), (bytes, content_type.map(str::to_string)));
    }
}

impl ResourceFetcher for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedResource, ImageLoadError> {
        let (bytes, content_type) = self.resources.get(url).ok_or(ImageLoadError::Status {
            url: url.to_string(),
            status: 404,
        })?;
        Ok(FetchedResource {
            bytes: bytes.clone(),
            content_type: content_type.clone(),
        })
    }
}

#[cfg(feature = "http")]
pub use http::HttpFetcher;

#[cfg(feature = "http")]
mod http {
    use std::io::Read;
    use std::path::Path;
    use std::time::Duration;

    use super::{FetchedResource, ResourceFetcher};
    use crate::error::ImageLoadError;

    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    const DEFAULT_MAX_BYTES: u64 = 20 * 1024 * 1024;

    /// Fetches `http(s)://` URLs with a blocking agent; any other string is
    /// read as a local file path.
    pub struct HttpFetcher {
        agent: ureq::Agent,
        max_bytes: u64,
    }

    impl Default for HttpFetcher {
        fn default() -> Self {
            Self::new(DEFAULT_TIMEOUT, DEFAULT_MAX_BYTES)
        }
    }

    impl HttpFetcher {
        pub fn new(timeout: Duration, max_bytes: u64) -> Self {
            let agent = ureq::AgentBuilder::new().timeout(timeout).build();
            Self { agent, max_bytes }
        }

        fn fetch_remote(&self, url: &str) -> Result<FetchedResource, ImageLoadError> {
            let response = self.agent.get(url).call().map_err(|e| match e {
                ureq::Error::Status(status, _) => ImageLoadError::Status {
                    url: url.to_string(),
                    status,
                },
                other => ImageLoadError::Network {
                    url: url.to_string(),
                    reason: other.to_string(),
                },
            })?;

            let content_type = response.header("Content-Type").map(str::to_string);
            let mut bytes = Vec::new();
            response
                .into_reader()
                .take(self.max_bytes + 1)
                .read_to_end(&mut bytes)
                .map_err(|e| ImageLoadError::Network {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
            if bytes.len() as u64 > self.max_bytes {
                return Err(ImageLoadError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            Ok(FetchedResource {
                bytes,
                content_type,
            })
        }

        fn fetch_local(&self, path: &str) -> Result<FetchedResource, ImageLoadError> {
            let path = Path::new(path);
            let bytes = std::fs::read(path).map_err(|e| ImageLoadError::Network {
                url: path.display().to_string(),
                reason: e.to_string(),
            })?;
            if bytes.len() as u64 > self.max_bytes {
                return Err(ImageLoadError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            let content_type = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|ext| match ext.to_ascii_lowercase().as_str() {
                    "png" => "image/png".to_string(),
                    _ => "image/jpeg".to_string(),
                });
            Ok(FetchedResource {
                bytes,
                content_type,
            })
        }
    }

    impl ResourceFetcher for HttpFetcher {
        fn fetch(&self, url: &str) -> Result<FetchedResource, ImageLoadError> {
            if url.starts_with("http://") || url.starts_with("https://") {
                self.fetch_remote(url)
            } else {
                self.fetch_local(url.strip_prefix("file://").unwrap_or(url))
            }
        }
    }
}

/// PNG when the declared type says so, JPEG for anything else.
pub fn format_from_content_type(content_type: Option<&str>) -> ImageFormat {
    match content_type {
        Some(ct) if ct.to_ascii_lowercase().contains("png") => ImageFormat::Png,
        _ => ImageFormat::Jpeg,
    }
}

pub fn load_image(fetcher: &dyn ResourceFetcher, url: &str) -> Result<RemoteImage, ImageLoadError> {
    let resource = fetcher.fetch(url)?;
    match format_from_content_type(resource.content_type.as_deref()) {
        ImageFormat::Png => decode_png(&resource.bytes),
        ImageFormat::Jpeg => decode_jpeg(resource.bytes),
    }
}

/// Load an optional image. Failures are logged and reported, never raised.
pub fn load_optional(fetcher: &dyn ResourceFetcher, url: Option<&str>) -> ImageSlot {
    let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
        return ImageSlot::NotRequested;
    };
    match load_image(fetcher, url) {
        Ok(img) => {
            log::debug!(
                "Loaded {:?} image {}x{} from {}",
                img.format,
                img.natural_width,
                img.natural_height,
                url
            );
            ImageSlot::Loaded(img)
        }
        Err(e) => {
            log::warn!("Skipping image {url}: {e}");
            ImageSlot::Skipped(e)
        }
    }
}

/// Walk JPEG markers to the first SOF segment for dimensions and component count.
fn jpeg_header(data: &[u8]) -> Option<(u32, u32, u8)> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8 {
        return None;
    }
    let mut i = 2;
    while i + 4 < data.len() {
        if data[i] != 0xFF {
            return None;
        }
        let marker = data[i + 1];
        if marker == 0xD9 || marker == 0xDA {
            break;
        }
        let len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        if (marker == 0xC0 || marker == 0xC1 || marker == 0xC2) && i + 9 < data.len() {
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            let components = data[i + 9];
            return Some((width, height, components));
        }
        i += 2 + len;
    }
    None
}

fn decode_jpeg(stream: Vec<u8>) -> Result<RemoteImage, ImageLoadError> {
    let (width, height, components) = jpeg_header(&stream).ok_or_else(|| {
        ImageLoadError::Unsupported("not a baseline or progressive JPEG stream".to_string())
    })?;
    if width == 0 || height == 0 {
        return Err(ImageLoadError::Decode {
            format: "JPEG",
            reason: format!("degenerate size {width}x{height}"),
        });
    }
    if !matches!(components, 1 | 3 | 4) {
        return Err(ImageLoadError::Unsupported(format!(
            "JPEG with {components} colour components"
        )));
    }
    Ok(RemoteImage {
        data: ImageData::Jpeg { stream, components },
        format: ImageFormat::Jpeg,
        natural_width: width,
        natural_height: height,
    })
}

fn decode_png(bytes: &[u8]) -> Result<RemoteImage, ImageLoadError> {
    let reader = image::ImageReader::with_format(
        std::io::BufReader::new(std::io::Cursor::new(bytes)),
        image::ImageFormat::Png,
    );
    let decoded = reader.decode().map_err(|e| ImageLoadError::Decode {
        format: "PNG",
        reason: e.to_string(),
    })?;
    let rgba: image::RgbaImage = decoded.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    if width == 0 || height == 0 {
        return Err(ImageLoadError::Decode {
            format: "PNG",
            reason: format!("degenerate size {width}x{height}"),
        });
    }
    let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);
    let rgb: Vec<u8> = rgba
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();
    let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());

    Ok(RemoteImage {
        data: ImageData::Png { rgb, alpha },
        format: ImageFormat::Png,
        natural_width: width,
        natural_height: height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_selects_format() {
        assert_eq!(format_from_content_type(Some("image/png")), ImageFormat::Png);
        assert_eq!(format_from_content_type(Some("IMAGE/PNG; q=1")), ImageFormat::Png);
        assert_eq!(format_from_content_type(Some("image/webp")), ImageFormat::Jpeg);
        assert_eq!(format_from_content_type(None), ImageFormat::Jpeg);
    }

    #[test]
    fn jpeg_header_reads_sof0() {
        // SOI, APP0 (len 4), SOF0 with 3 components at 640x480
        let data = [
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x01,
            0xE0, 0x02, 0x80, 0x03, 0x00, 0x00,
        ];
        assert_eq!(jpeg_header(&data), Some((640, 480, 3)));
    }

    #[test]
    fn garbage_tagged_jpeg_is_unsupported() {
        let err = decode_jpeg(b"<html>not found</html>".to_vec()).unwrap_err();
        assert!(matches!(err, ImageLoadError::Unsupported(_)));
    }

    #[test]
    fn blank_url_is_not_requested() {
        let fetcher = MemoryFetcher::new();
        assert_eq!(load_optional(&fetcher, Some("  ")), ImageSlot::NotRequested);
        assert_eq!(load_optional(&fetcher, None), ImageSlot::NotRequested);
    }

    #[test]
    fn missing_resource_is_skipped() {
        let fetcher = MemoryFetcher::new();
        let slot = load_optional(&fetcher, Some("https://cdn.example.com/logo.png"));
        assert!(slot.is_skipped());
    }
}
