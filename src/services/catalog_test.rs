use super::*;
use crate::services::seed::seed_files;

fn file(id: &str, name: &str, category: FileCategory) -> FileItem {
    FileItem {
        id: id.into(),
        name: name.into(),
        author: "Test Author".into(),
        tags: vec!["test".into()],
        category,
        uploaded_at: 1_705_276_800_000,
        size: 1_024_000,
        mime_type: "application/pdf".into(),
        ticker: None,
        team: None,
        url: None,
        content: None,
        data: None,
    }
}

fn mixed_catalog() -> Catalog {
    Catalog::new(vec![
        file("1", "a.pdf", FileCategory::Internal),
        file("2", "b.pdf", FileCategory::External),
        file("3", "c.pdf", FileCategory::AiGenerated),
        file("4", "d.html", FileCategory::Irn),
        file("5", "e.pdf", FileCategory::Internal),
    ])
}

// =============================================================================
// Category parsing
// =============================================================================

#[test]
fn category_parses_kebab_labels() {
    assert_eq!("internal".parse::<FileCategory>().unwrap(), FileCategory::Internal);
    assert_eq!("ai-generated".parse::<FileCategory>().unwrap(), FileCategory::AiGenerated);
    assert_eq!("irn".parse::<FileCategory>().unwrap(), FileCategory::Irn);
}

#[test]
fn category_rejects_unknown_label() {
    assert!(matches!(
        "secret".parse::<FileCategory>(),
        Err(CatalogError::UnknownCategory(label)) if label == "secret"
    ));
}

#[test]
fn category_serializes_as_kebab_case() {
    let json = serde_json::to_string(&FileCategory::AiGenerated).unwrap();
    assert_eq!(json, "\"ai-generated\"");
}

#[test]
fn filter_parses_all_and_empty() {
    assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
    assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
    assert_eq!(
        "external".parse::<CategoryFilter>().unwrap(),
        CategoryFilter::Only(FileCategory::External)
    );
}

#[test]
fn filter_display_round_trips_through_parse() {
    for filter in [CategoryFilter::All, CategoryFilter::Only(FileCategory::Irn)] {
        assert_eq!(filter.to_string().parse::<CategoryFilter>().unwrap(), filter);
    }
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn filter_all_returns_every_file_in_order() {
    let catalog = mixed_catalog();
    let ids: Vec<&str> = catalog
        .filter(CategoryFilter::All)
        .iter()
        .map(|f| f.id.as_str())
        .collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5"]);
}

#[test]
fn filter_each_category_returns_exact_subset() {
    let catalog = mixed_catalog();
    for category in FileCategory::ALL {
        let hits = catalog.filter(CategoryFilter::Only(category));
        let expected = catalog
            .files()
            .iter()
            .filter(|f| f.category == category)
            .count();
        assert_eq!(hits.len(), expected, "count mismatch for {category}");
        assert!(hits.iter().all(|f| f.category == category));
    }
}

#[test]
fn filter_on_empty_catalog_is_empty() {
    let catalog = Catalog::default();
    assert!(catalog.filter(CategoryFilter::All).is_empty());
    assert!(catalog.is_empty());
}

#[test]
fn counts_track_each_category() {
    let counts = mixed_catalog().counts();
    assert_eq!(counts.all, 5);
    assert_eq!(counts.internal, 2);
    assert_eq!(counts.external, 1);
    assert_eq!(counts.ai_generated, 1);
    assert_eq!(counts.irn, 1);
    assert_eq!(counts.get(FileCategory::Internal), 2);
}

// =============================================================================
// Ids and lookup
// =============================================================================

#[test]
fn next_id_uses_timestamp_when_ahead() {
    let mut catalog = mixed_catalog();
    assert_eq!(catalog.next_id(1_700_000_000_000), "1700000000000");
}

#[test]
fn next_id_never_repeats_within_same_millisecond() {
    let mut catalog = Catalog::default();
    let a = catalog.next_id(1_000);
    let b = catalog.next_id(1_000);
    assert_eq!(a, "1000");
    assert_eq!(b, "1001");
}

#[test]
fn next_id_stays_ahead_of_inserted_ids() {
    let mut catalog = Catalog::default();
    catalog.insert(file("5000", "x.pdf", FileCategory::Internal));
    assert_eq!(catalog.next_id(10), "5001");
}

#[test]
fn get_finds_inserted_file() {
    let mut catalog = Catalog::default();
    catalog.insert(file("42", "answer.pdf", FileCategory::External));
    assert_eq!(catalog.get("42").unwrap().name, "answer.pdf");
    assert_eq!(catalog.len(), 1);
}

#[test]
fn get_unknown_id_is_not_found() {
    let catalog = mixed_catalog();
    assert!(matches!(catalog.get("nope"), Err(CatalogError::NotFound(id)) if id == "nope"));
}

// =============================================================================
// Facets
// =============================================================================

#[test]
fn facets_are_sorted_and_unique() {
    let mut a = file("1", "a", FileCategory::Internal);
    a.ticker = Some("MSFT".into());
    a.team = Some("Tech".into());
    a.tags = vec!["zeta".into(), "alpha".into()];
    let mut b = file("2", "b", FileCategory::Internal);
    b.ticker = Some("AAPL".into());
    b.team = Some("Tech".into());
    b.tags = vec!["alpha".into(), " ".into()];
    let catalog = Catalog::new(vec![a, b]);

    assert_eq!(catalog.available_tickers(), ["AAPL", "MSFT"]);
    assert_eq!(catalog.available_teams(), ["Tech"]);
    assert_eq!(catalog.existing_tags(), ["alpha", "zeta"]);
}

#[test]
fn seeded_catalog_covers_every_category() {
    let catalog = Catalog::new(seed_files());
    let counts = catalog.counts();
    assert!(counts.internal > 0);
    assert!(counts.external > 0);
    assert!(counts.ai_generated > 0);
    assert!(counts.irn > 0);
    assert!(catalog.available_tickers().contains(&"AAPL".to_string()));
}

#[test]
fn seeded_ids_are_unique() {
    let files = seed_files();
    let mut ids: Vec<&str> = files.iter().map(|f| f.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), files.len());
}

// =============================================================================
// Listing helpers
// =============================================================================

#[test]
fn heading_for_all_and_single_category() {
    assert_eq!(listing_heading(CategoryFilter::All, 2), "All Files (2)");
    assert_eq!(listing_heading(CategoryFilter::Only(FileCategory::Internal), 2), "Internal (2)");
    assert_eq!(listing_heading(CategoryFilter::Only(FileCategory::AiGenerated), 0), "AI Generated (0)");
}

#[test]
fn empty_message_mentions_category() {
    assert_eq!(empty_message(CategoryFilter::All), "No files found in any category");
    assert_eq!(empty_message(CategoryFilter::Only(FileCategory::Irn)), "No files found in IRN");
}

#[test]
fn file_size_formatting() {
    assert_eq!(format_file_size(0), "0 Bytes");
    assert_eq!(format_file_size(512), "512 Bytes");
    assert_eq!(format_file_size(1_024_000), "1000 KB");
    assert_eq!(format_file_size(512_000), "500 KB");
    assert_eq!(format_file_size(1_536), "1.5 KB");
    assert_eq!(format_file_size(1_048_576), "1 MB");
    assert_eq!(format_file_size(1_288_490_189), "1.2 GB");
}

#[test]
fn file_size_caps_at_gigabytes() {
    assert_eq!(format_file_size(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
}

#[test]
fn upload_date_formatting() {
    assert_eq!(format_upload_date(1_705_276_800_000), "Jan 15, 2024");
    assert_eq!(format_upload_date(1_704_844_800_000), "Jan 10, 2024");
}

#[test]
fn file_kind_prefers_note_category() {
    assert_eq!(file_kind("application/pdf", FileCategory::Irn), FileKind::Note);
    assert_eq!(file_kind("application/pdf", FileCategory::Internal), FileKind::Pdf);
    assert_eq!(
        file_kind(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            FileCategory::External
        ),
        FileKind::Document
    );
    assert_eq!(file_kind("application/vnd.ms-excel", FileCategory::Internal), FileKind::Spreadsheet);
    assert_eq!(file_kind("image/png", FileCategory::Internal), FileKind::Image);
    assert_eq!(file_kind("video/mp4", FileCategory::Internal), FileKind::Video);
    assert_eq!(file_kind("audio/mpeg", FileCategory::Internal), FileKind::Audio);
    assert_eq!(file_kind("application/zip", FileCategory::Internal), FileKind::Other);
}

#[test]
fn transient_data_is_not_serialized() {
    let mut item = file("1", "a.pdf", FileCategory::Internal);
    item.data = Some(std::sync::Arc::from(&b"bytes"[..]));
    let json = serde_json::to_value(&item).unwrap();
    assert!(json.get("data").is_none());
    assert!(json.get("ticker").is_none());
    assert_eq!(json["category"], "internal");
}
