mod common;

use fieldreport_pdf::{DocumentImages, DrawOp, compose_receipt, compose_timecard};

#[test]
fn single_page_has_no_page_numbers() {
    let options = common::options();
    let composition = compose_receipt(&common::receipt(), &DocumentImages::default(), &options);

    assert_eq!(composition.page_count(), 1);
    assert!(composition.texts().iter().all(|t| !t.starts_with("Page ")));
    assert_eq!(common::find_text(&composition, "Generated Oct 19, 2026").len(), 1);
}

#[test]
fn every_page_is_numbered_when_there_are_several() {
    let options = common::options();
    let composition = compose_timecard(&common::timecard(100), &DocumentImages::default(), &options);
    let total = composition.page_count();
    assert!(total > 2);

    for page in &composition.pages {
        let expected = format!("Page {} of {}", page.index + 1, total);
        assert!(page.contains_text(&expected), "missing '{expected}'");
        assert!(page.contains_text("Generated Oct 19, 2026"));
        assert_eq!(page.texts().filter(|t| t.starts_with("Page ")).count(), 1);
    }
}

#[test]
fn footer_is_appended_after_page_content() {
    let options = common::options();
    let composition = compose_timecard(&common::timecard(40), &DocumentImages::default(), &options);
    let limit = options.layout.page_height - options.layout.margin;

    for page in &composition.pages {
        let n = page.ops.len();
        assert!(matches!(page.ops[n - 3], DrawOp::Rule { y1, .. } if y1 > limit));
        match &page.ops[n - 1] {
            DrawOp::Text { x, text, style, .. } => {
                assert!(text.starts_with("Page "));
                let right = options.layout.page_width - options.layout.margin;
                let w = fieldreport_pdf::text_width(text, style);
                assert!((x + w - right).abs() < 1e-3);
            }
            other => panic!("expected page number last, got {other:?}"),
        }
    }
}
