mod common;

use fieldreport_pdf::{
    DocumentImages, ImageData, ImageFormat, ImageLoadError, ImageSlot, MemoryFetcher,
    compose_receipt, compose_timecard, load_image, load_optional, render_receipt,
};

#[test]
fn png_logo_keeps_alpha_plane() {
    let img = load_image(&common::fetcher(), common::LOGO_URL).unwrap();
    assert_eq!(img.format, ImageFormat::Png);
    assert_eq!((img.natural_width, img.natural_height), (300, 100));
    match img.data {
        ImageData::Png { rgb, alpha } => {
            assert_eq!(rgb.len(), 300 * 100 * 3);
            assert_eq!(alpha.map(|a| a.len()), Some(300 * 100));
        }
        other => panic!("expected PNG data, got {other:?}"),
    }
}

#[test]
fn jpeg_photo_passes_through_undecoded() {
    let img = load_image(&common::fetcher(), common::PHOTO_URL).unwrap();
    assert_eq!(img.format, ImageFormat::Jpeg);
    assert_eq!((img.natural_width, img.natural_height), (640, 480));
    assert!(matches!(img.data, ImageData::Jpeg { components: 3, .. }));
}

#[test]
fn missing_content_type_defaults_to_jpeg() {
    let mut fetcher = MemoryFetcher::new();
    fetcher.insert("https://x.example/a", common::jpeg_bytes(20, 10), None);
    let img = load_image(&fetcher, "https://x.example/a").unwrap();
    assert_eq!(img.format, ImageFormat::Jpeg);
}

#[test]
fn mislabelled_bytes_fail_to_decode() {
    let mut fetcher = MemoryFetcher::new();
    fetcher.insert("https://x.example/b", common::jpeg_bytes(20, 10), Some("image/png"));
    let slot = load_optional(&fetcher, Some("https://x.example/b"));
    assert!(matches!(
        slot,
        ImageSlot::Skipped(ImageLoadError::Decode { format: "PNG", .. })
    ));
}

#[test]
fn landscape_photo_fits_its_bounds() {
    let options = common::options();
    let mut fetcher = MemoryFetcher::new();
    fetcher.insert("https://x.example/wide.png", common::png_bytes(800, 200, false), Some("image/png"));

    let images = DocumentImages {
        logo: ImageSlot::NotRequested,
        photo: load_optional(&fetcher, Some("https://x.example/wide.png")),
    };
    let composition = compose_receipt(&common::receipt(), &images, &options);

    let boxes = common::image_boxes(&composition, 0);
    assert_eq!(boxes.len(), 1);
    let (_, _, w, h) = boxes[0];
    assert!(w >= h);
    assert!(w <= options.layout.content_width() + 1e-3);
    assert!(h <= options.layout.photo_max_height + 1e-3);
    assert!((w / h - 4.0).abs() < 1e-3);
}

#[test]
fn photo_stays_with_its_section_title() {
    let options = common::options();
    let mut fetcher = MemoryFetcher::new();
    fetcher.insert("https://x.example/tall.png", common::png_bytes(300, 900, false), Some("image/png"));
    let mut receipt = common::receipt();
    receipt.category = "Site consumables and rental equipment returned late. ".repeat(12);

    let images = DocumentImages {
        logo: ImageSlot::NotRequested,
        photo: load_optional(&fetcher, Some("https://x.example/tall.png")),
    };
    let composition = compose_receipt(&receipt, &images, &options);

    let title_page = common::find_text(&composition, "Receipt Photo")[0].0;
    let image_page = composition
        .pages
        .iter()
        .position(|p| p.images().count() > 0)
        .unwrap();
    assert_eq!(title_page, image_page);
}

#[test]
fn logo_is_right_aligned_inside_its_box() {
    let options = common::options();
    let images = DocumentImages {
        logo: load_optional(&common::fetcher(), Some(common::LOGO_URL)),
        photo: ImageSlot::NotRequested,
    };
    let composition = compose_timecard(&common::timecard(2), &images, &options);

    let boxes = common::image_boxes(&composition, 0);
    assert_eq!(boxes.len(), 1);
    let (x, top, w, h) = boxes[0];
    let right = options.layout.page_width - options.layout.margin;
    assert!((x + w - right).abs() < 1e-3);
    assert!((top - options.layout.margin).abs() < 1e-3);
    assert!(w <= options.layout.logo_max_width + 1e-3);
    assert!(h <= options.layout.logo_max_height + 1e-3);
}

#[test]
fn failed_photo_is_skipped_and_reported() {
    let options = common::options();
    let mut receipt = common::receipt();
    receipt.photo_url = Some("https://storage.example.com/receipts/missing.jpg".to_string());
    receipt.logo_url = Some(common::LOGO_URL.to_string());

    let doc = render_receipt(&receipt, &common::fetcher(), &options);

    assert!(matches!(doc.images.logo, ImageSlot::Loaded(_)));
    assert!(matches!(
        doc.images.photo,
        ImageSlot::Skipped(ImageLoadError::Status { status: 404, .. })
    ));
    assert!(doc.bytes.starts_with(b"%PDF-"));
    assert_eq!(doc.page_count, 1);
}

#[test]
fn skipped_photo_omits_the_whole_section() {
    let options = common::options();
    let images = DocumentImages {
        logo: ImageSlot::NotRequested,
        photo: ImageSlot::Skipped(ImageLoadError::Unsupported("webp".to_string())),
    };
    let composition = compose_receipt(&common::receipt(), &images, &options);

    assert!(common::find_text(&composition, "Receipt Photo").is_empty());
    assert!(composition.pages.iter().all(|p| p.images().count() == 0));
    assert!(composition.images.is_empty());
}

#[cfg(feature = "http")]
mod local_files {
    use fieldreport_pdf::{HttpFetcher, ImageData, ImageFormat, ImageLoadError, load_image};

    use super::common;

    #[test]
    fn png_path_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.PNG");
        std::fs::write(&path, common::png_bytes(120, 40, true)).unwrap();

        let img = load_image(&HttpFetcher::default(), path.to_str().unwrap()).unwrap();
        assert_eq!(img.format, ImageFormat::Png);
        assert_eq!((img.natural_width, img.natural_height), (120, 40));
    }

    #[test]
    fn file_url_prefix_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, common::jpeg_bytes(64, 48)).unwrap();

        let url = format!("file://{}", path.display());
        let img = load_image(&HttpFetcher::default(), &url).unwrap();
        assert_eq!(img.format, ImageFormat::Jpeg);
        assert!(matches!(img.data, ImageData::Jpeg { components: 3, .. }));
        assert_eq!((img.natural_width, img.natural_height), (64, 48));
    }

    #[test]
    fn non_png_extension_is_treated_as_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.jpeg");
        std::fs::write(&path, common::png_bytes(10, 10, false)).unwrap();

        let err = load_image(&HttpFetcher::default(), path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ImageLoadError::Unsupported(_)), "{err:?}");
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.png");

        let err = load_image(&HttpFetcher::default(), path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ImageLoadError::Network { .. }), "{err:?}");
    }
}
