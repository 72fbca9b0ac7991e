//! Integration tests for presentations, slide registries and batch scopes.

mod common;

use common::{Call, MockService, MockStorage, SERVICE_EMAIL};
use oodles::{DocumentKind, Error, ImageSource, Presentation, SheetChart};
use serde_json::json;
use std::fs;

const DECK: &str = "deck-1";

fn open() -> (std::sync::Arc<MockService>, Presentation) {
    let service = MockService::new();
    service.insert(DECK, common::presentation_tree(DECK));
    let presentation = Presentation::open(common::config(&service), DECK).unwrap();
    service.clear_calls();
    (service, presentation)
}

fn request_names(batch: &[serde_json::Value]) -> Vec<String> {
    batch
        .iter()
        .map(|r| r.as_object().unwrap().keys().next().unwrap().clone())
        .collect()
}

// ==================== Registry ====================

#[test]
fn test_presentation_metadata() {
    let (_, presentation) = open();
    assert_eq!(presentation.id(), DECK);
    assert_eq!(presentation.title(), "Quarterly review");
    assert_eq!(presentation.page_count(), 2);
    assert_eq!(
        presentation.url(),
        "https://docs.google.com/presentation/d/deck-1"
    );
}

#[test]
fn test_open_from_url() {
    let service = MockService::new();
    service.insert(DECK, common::presentation_tree(DECK));
    let presentation = Presentation::open(
        common::config(&service),
        "https://docs.google.com/presentation/d/deck-1/edit#slide=id.p",
    )
    .unwrap();
    assert_eq!(presentation.id(), DECK);
    assert_eq!(
        service.calls(),
        vec![Call::Fetch(DocumentKind::Presentation, DECK.to_string())]
    );
}

#[test]
fn test_registry_classifies_elements() {
    let (_, presentation) = open();
    let slide = presentation.page(1).unwrap();

    assert_eq!(slide.number(), 1);
    assert_eq!(slide.object_id(), "slide-1");
    let texts: Vec<_> = slide.text_runs().iter().map(|r| r.text()).collect();
    assert_eq!(texts, vec!["Quarterly results", "Results by region"]);
    assert_eq!(slide.images().len(), 2);
    assert_eq!(slide.images().get(0).unwrap().object_id(), "logo");
    assert_eq!(slide.charts().len(), 1);
    assert_eq!(
        slide.charts().get(0).unwrap().linked(),
        Some(&SheetChart::new("sheet-src", 7))
    );
}

#[test]
fn test_pages_are_one_indexed() {
    let (_, presentation) = open();
    assert!(matches!(presentation.page(0), Err(Error::Precondition(_))));
    assert!(matches!(
        presentation.page(3),
        Err(Error::PageOutOfRange(3, 2))
    ));
    assert_eq!(presentation.page(2).unwrap().object_id(), "slide-2");
    assert_eq!(presentation.pages().len(), 2);
}

#[test]
fn test_find_returns_first_match_only() {
    let (_, presentation) = open();
    let slide = presentation.page(1).unwrap();

    let found = slide.find("esults").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found.get(0).unwrap().object_id(), "title");

    let all = slide.find_all("esults");
    let ids: Vec<_> = all.iter().map(|r| r.object_id()).collect();
    assert_eq!(ids, vec!["title", "subtitle"]);
}

#[test]
fn test_find_without_match() {
    let (service, presentation) = open();
    let slide = presentation.page(1).unwrap();

    assert!(slide.find("absent").is_none());
    assert!(slide.find_all("absent").is_empty());
    assert!(matches!(
        slide.set_text("absent", "x"),
        Err(Error::TextNotFound(_))
    ));
    assert!(service.calls().is_empty());
}

#[test]
fn test_collection_deduplicates_by_object_id() {
    let (_, presentation) = open();
    let slide = presentation.page(1).unwrap();

    let mut runs = slide.find_all("Quarterly");
    assert_eq!(runs.len(), 1);
    assert!(!runs.add(slide.text_runs()[0].clone()));
    assert_eq!(runs.len(), 1);

    runs.extend(slide.find_all("esults"));
    assert_eq!(runs.len(), 2);
    assert!(runs.contains("subtitle"));
}

// ==================== Text edits ====================

#[test]
fn test_set_text_sends_one_call() {
    let (service, presentation) = open();
    let slide = presentation.page(1).unwrap();

    slide.set_text("Quarterly", "Annual <b>results</b>").unwrap();

    let batches = service.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(
        request_names(&batches[0]),
        vec!["deleteText", "insertText", "updateTextStyle", "updateTextStyle"]
    );
    assert_eq!(batches[0][0]["deleteText"]["objectId"], "title");
    assert_eq!(batches[0][1]["insertText"]["text"], "Annual results");
    assert_eq!(
        batches[0][2]["updateTextStyle"]["style"]["fontFamily"],
        "Roboto"
    );
    assert_eq!(batches[0][3]["updateTextStyle"]["textRange"]["startIndex"], 7);
    assert_eq!(batches[0][3]["updateTextStyle"]["textRange"]["endIndex"], 14);
}

#[test]
fn test_replace_text_substitutes_substring() {
    let (service, presentation) = open();
    let slide = presentation.page(1).unwrap();

    slide
        .replace_text("region", "region", "<i>country</i>")
        .unwrap();

    let batch = &service.batches()[0];
    assert_eq!(batch[1]["insertText"]["text"], "Results by country");
    assert_eq!(batch[3]["updateTextStyle"]["style"]["italic"], true);
}

#[test]
fn test_collection_set_text_is_one_call() {
    let (service, presentation) = open();
    let slide = presentation.page(1).unwrap();

    slide.find_all("esults").set_text("same").unwrap();

    let batches = service.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 6);
    assert_eq!(batches[0][3]["deleteText"]["objectId"], "subtitle");
}

// ==================== Batch scopes ====================

#[test]
fn test_batch_collects_edits_into_one_call() {
    let (service, presentation) = open();
    let mut slide = presentation.page(1).unwrap();

    slide
        .batch(|slide| {
            slide.set_text("Quarterly", "Q3 results")?;
            slide.images().replace(1, "https://example.com/new.png")?;
            slide
                .charts()
                .replace(0, &SheetChart::new("sheet-other", 11))?;
            assert!(service.calls().is_empty());
            Ok(())
        })
        .unwrap();

    let batches = service.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(
        request_names(&batches[0]),
        vec![
            "deleteText",
            "insertText",
            "updateTextStyle",
            "replaceImage",
            "deleteObject",
            "createSheetsChart",
            "refreshSheetsChart"
        ]
    );
}

#[test]
fn test_empty_batch_makes_no_call() {
    let (service, presentation) = open();
    let mut slide = presentation.page(1).unwrap();

    slide.begin_batch().unwrap();
    assert_eq!(slide.end_batch().unwrap(), 0);
    assert!(service.calls().is_empty());
}

#[test]
fn test_nested_batch_is_rejected() {
    let (service, presentation) = open();
    let mut slide = presentation.page(1).unwrap();

    slide.begin_batch().unwrap();
    assert!(matches!(slide.begin_batch(), Err(Error::Precondition(_))));

    slide.set_text("Quarterly", "kept").unwrap();
    assert_eq!(slide.end_batch().unwrap(), 3);
    assert_eq!(service.batches().len(), 1);

    assert!(matches!(slide.end_batch(), Err(Error::Precondition(_))));
}

#[test]
fn test_batch_flushes_when_closure_fails() {
    let (service, presentation) = open();
    let mut slide = presentation.page(1).unwrap();

    let result: oodles::Result<()> = slide.batch(|slide| {
        slide.set_text("Quarterly", "partial")?;
        slide.set_text("absent", "never")
    });

    assert!(matches!(result, Err(Error::TextNotFound(_))));
    assert_eq!(service.batches().len(), 1);

    slide.set_text("region", "direct").unwrap();
    assert_eq!(service.batches().len(), 2);
}

#[test]
fn test_scope_reaches_collections_found_inside() {
    let (service, presentation) = open();
    let mut slide = presentation.page(1).unwrap();

    slide.begin_batch().unwrap();
    slide.find_all("esults").replace("results", "numbers").unwrap();
    slide.images().replace_titled("logo", "https://example.com/logo2.png").unwrap();
    assert!(service.calls().is_empty());
    assert_eq!(slide.end_batch().unwrap(), 7);
}

#[test]
fn test_collection_found_in_scope_sends_after_close() {
    let (service, presentation) = open();
    let mut slide = presentation.page(1).unwrap();

    slide.begin_batch().unwrap();
    let found = slide.find("Quarterly").unwrap();
    assert_eq!(slide.end_batch().unwrap(), 0);

    found.set_text("after close").unwrap();
    let batches = service.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 3);
    assert_eq!(batches[0][1]["insertText"]["text"], "after close");
}

#[test]
fn test_collection_found_before_scope_joins_it() {
    let (service, presentation) = open();
    let mut slide = presentation.page(1).unwrap();
    let found = slide.find_all("Results");

    slide.begin_batch().unwrap();
    found.set_text("queued").unwrap();
    assert!(service.calls().is_empty());
    assert_eq!(slide.end_batch().unwrap(), 3);
    assert_eq!(service.batches().len(), 1);
}

// ==================== Images ====================

#[test]
fn test_http_image_skips_upload() {
    let service = MockService::new();
    service.insert(DECK, common::presentation_tree(DECK));
    let storage = MockStorage::new();
    let presentation =
        Presentation::open(common::config_with_storage(&service, &storage), DECK).unwrap();
    let slide = presentation.page(1).unwrap();

    slide.images().replace(0, "http://x/y.png").unwrap();

    assert!(storage.uploads().is_empty());
    let batch = service.batches().pop().unwrap();
    assert_eq!(
        batch,
        vec![json!({
            "replaceImage": {
                "imageObjectId": "logo",
                "imageReplaceMethod": "CENTER_INSIDE",
                "url": "http://x/y.png"
            }
        })]
    );
}

#[test]
fn test_local_image_is_uploaded_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.png");
    fs::write(&path, b"\x89PNG").unwrap();

    let service = MockService::new();
    service.insert(DECK, common::presentation_tree(DECK));
    let storage = MockStorage::new();
    let presentation =
        Presentation::open(common::config_with_storage(&service, &storage), DECK).unwrap();
    let slide = presentation.page(1).unwrap();

    slide
        .images()
        .get(1)
        .unwrap()
        .set_image_file(&path)
        .unwrap();

    let uploads = storage.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, path);
    assert_eq!(uploads[0].1, "data-studies");
    assert_eq!(uploads[0].2, "img/photo.png");

    let batch = service.batches().pop().unwrap();
    assert_eq!(
        batch[0]["replaceImage"]["url"],
        "https://storage.example.com/data-studies/img/photo.png?expires=600"
    );
}

#[test]
fn test_missing_local_image_fails_before_upload() {
    let service = MockService::new();
    service.insert(DECK, common::presentation_tree(DECK));
    let storage = MockStorage::new();
    let presentation =
        Presentation::open(common::config_with_storage(&service, &storage), DECK).unwrap();
    let slide = presentation.page(1).unwrap();
    service.clear_calls();

    let err = slide.images().replace(0, "no/such/photo.png").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(storage.uploads().is_empty());
    assert!(service.calls().is_empty());
}

#[test]
fn test_local_image_without_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.png");
    fs::write(&path, b"\x89PNG").unwrap();

    let (_, presentation) = open();
    let slide = presentation.page(1).unwrap();
    let err = slide
        .images()
        .replace(0, ImageSource::LocalFile(path))
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_image_link_set_and_cleared() {
    let (service, presentation) = open();
    let slide = presentation.page(1).unwrap();

    slide
        .images()
        .replace(0, ("https://x/y.png", "https://target.example.com"))
        .unwrap();
    slide
        .images()
        .replace(0, ImageSource::parse("https://x/z.png").with_link(None))
        .unwrap();

    let batches = service.batches();
    assert_eq!(
        batches[0][1],
        json!({
            "updateImageProperties": {
                "objectId": "logo",
                "imageProperties": {"link": {"url": "https://target.example.com"}},
                "fields": "link"
            }
        })
    );
    assert_eq!(batches[1][1]["updateImageProperties"]["imageProperties"], json!({}));
}

#[test]
fn test_image_lookup_by_title() {
    let (_, presentation) = open();
    let slide = presentation.page(1).unwrap();

    assert_eq!(slide.images().by_title("logo").unwrap().object_id(), "logo");
    assert!(matches!(
        slide.images().by_title("banner"),
        Err(Error::ImageNotFound(_))
    ));
    assert!(matches!(
        slide.images().replace(5, "https://x/y.png"),
        Err(Error::Precondition(_))
    ));
}

// ==================== Charts ====================

#[test]
fn test_chart_replace_keeps_placement() {
    let (service, presentation) = open();
    let slide = presentation.page(1).unwrap();

    slide
        .replace_chart(0, &SheetChart::new("sheet-new", 99))
        .unwrap();

    let batch = service.batches().pop().unwrap();
    assert_eq!(batch[0], json!({"deleteObject": {"objectId": "chart-1"}}));
    let create = &batch[1]["createSheetsChart"];
    assert_eq!(create["objectId"], "chart-1");
    assert_eq!(create["spreadsheetId"], "sheet-new");
    assert_eq!(create["chartId"], 99);
    assert_eq!(create["linkingMode"], "LINKED");
    assert_eq!(create["elementProperties"]["pageObjectId"], "slide-1");
    assert_eq!(create["elementProperties"]["transform"]["scaleX"], 2);
    assert_eq!(batch[2], json!({"refreshSheetsChart": {"objectId": "chart-1"}}));
}

// ==================== Errors and file operations ====================

#[test]
fn test_unshared_presentation_names_service_email() {
    let service = MockService::new();
    service.insert(DECK, common::presentation_tree(DECK));
    service.deny(DECK);

    let err = Presentation::open(common::config(&service), DECK).unwrap_err();
    assert!(err.is_not_shared());
    let message = err.to_string();
    assert!(message.contains(DECK));
    assert!(message.contains(SERVICE_EMAIL));
}

#[test]
fn test_missing_presentation() {
    let service = MockService::new();
    let err = Presentation::open(common::config(&service), "nope").unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn test_copy_share_delete() {
    let (service, presentation) = open();

    let copy = presentation.copy(None).unwrap();
    assert_eq!(copy.title(), "Copy of Quarterly review");
    assert_eq!(copy.id(), "deck-1-copy");

    presentation.share_with("friend@example.com").unwrap();
    copy.delete().unwrap();

    let calls = service.calls();
    assert!(calls.contains(&Call::CopyFile(
        DECK.to_string(),
        "Copy of Quarterly review".to_string()
    )));
    assert!(calls.contains(&Call::CreatePermission(
        DECK.to_string(),
        json!({"emailAddress": "friend@example.com", "role": "writer"})
    )));
    assert!(calls.contains(&Call::DeleteFile("deck-1-copy".to_string())));
}

#[test]
fn test_reload_keeps_old_slides() {
    let (service, mut presentation) = open();
    let old = presentation.page(2).unwrap();

    let mut tree = common::presentation_tree(DECK);
    tree["slides"].as_array_mut().unwrap().pop();
    service.insert(DECK, tree);
    presentation.reload().unwrap();

    assert_eq!(presentation.page_count(), 1);
    assert_eq!(old.text_runs()[0].text(), "Nothing to see here");
}
