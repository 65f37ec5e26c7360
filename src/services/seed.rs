//! Mock research documents loaded into a fresh catalog.

use super::catalog::{FileCategory, FileItem};

/// 2024-01-15T00:00:00Z.
const JAN_15_2024_MS: i64 = 1_705_276_800_000;
const DAY_MS: i64 = 86_400_000;

struct SeedFile {
    name: &'static str,
    author: &'static str,
    tags: &'static [&'static str],
    category: FileCategory,
    days_after_jan_15: i64,
    size: u64,
    mime_type: &'static str,
    ticker: Option<&'static str>,
    team: Option<&'static str>,
}

const SEED_FILES: &[SeedFile] = &[
    SeedFile {
        name: "AAPL Q4 Earnings Review.pdf",
        author: "Sarah Chen",
        tags: &["earnings", "technology", "quarterly"],
        category: FileCategory::Internal,
        days_after_jan_15: 0,
        size: 2_457_600,
        mime_type: "application/pdf",
        ticker: Some("AAPL"),
        team: Some("Technology"),
    },
    SeedFile {
        name: "Semiconductor Sector Outlook 2025.docx",
        author: "Michael Rodriguez",
        tags: &["semiconductors", "sector", "outlook"],
        category: FileCategory::Internal,
        days_after_jan_15: -3,
        size: 1_048_576,
        mime_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ticker: Some("NVDA"),
        team: Some("Technology"),
    },
    SeedFile {
        name: "MSFT Management Meeting Notes.pdf",
        author: "Lisa Thompson",
        tags: &["management", "meeting", "cloud"],
        category: FileCategory::Internal,
        days_after_jan_15: -7,
        size: 512_000,
        mime_type: "application/pdf",
        ticker: Some("MSFT"),
        team: Some("Technology"),
    },
    SeedFile {
        name: "JPM Price Target Update.xlsx",
        author: "David Park",
        tags: &["banks", "valuation", "price-target"],
        category: FileCategory::Internal,
        days_after_jan_15: -10,
        size: 356_352,
        mime_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ticker: Some("JPM"),
        team: Some("Financials"),
    },
    SeedFile {
        name: "Global Energy Transition Report.pdf",
        author: "Goldman Sachs Research",
        tags: &["energy", "transition", "macro"],
        category: FileCategory::External,
        days_after_jan_15: -5,
        size: 4_194_304,
        mime_type: "application/pdf",
        ticker: Some("XOM"),
        team: Some("Energy"),
    },
    SeedFile {
        name: "Healthcare M&A Landscape.pdf",
        author: "Morgan Stanley Research",
        tags: &["healthcare", "m&a", "deals"],
        category: FileCategory::External,
        days_after_jan_15: -12,
        size: 3_145_728,
        mime_type: "application/pdf",
        ticker: Some("UNH"),
        team: Some("Healthcare"),
    },
    SeedFile {
        name: "Interest Rate Consensus Summary.docx",
        author: "AI Research Assistant",
        tags: &["rates", "macro", "consensus"],
        category: FileCategory::AiGenerated,
        days_after_jan_15: -1,
        size: 204_800,
        mime_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ticker: None,
        team: Some("Macro"),
    },
    SeedFile {
        name: "TSLA Sentiment Digest.pdf",
        author: "AI Research Assistant",
        tags: &["sentiment", "autos", "digest"],
        category: FileCategory::AiGenerated,
        days_after_jan_15: -2,
        size: 153_600,
        mime_type: "application/pdf",
        ticker: Some("TSLA"),
        team: Some("Consumer"),
    },
];

/// Notes seeded as if written in the editor.
struct SeedNote {
    name: &'static str,
    author: &'static str,
    tags: &'static [&'static str],
    days_after_jan_15: i64,
    ticker: Option<&'static str>,
    team: Option<&'static str>,
    content: &'static str,
}

const SEED_NOTES: &[SeedNote] = &[SeedNote {
    name: "IRN: AAPL services margin check",
    author: "Sarah Chen",
    tags: &["services", "margins", "irn"],
    days_after_jan_15: -4,
    ticker: Some("AAPL"),
    team: Some("Technology"),
    content: "<p>Services gross margin held above 70% this quarter. Management reiterated that \
              App Store pricing changes are not expected to dent services growth.</p>",
}];

/// Build the mock catalog contents. Ids are the 1-based seed position.
#[must_use]
pub fn seed_files() -> Vec<FileItem> {
    let files = SEED_FILES.iter().map(|seed| FileItem {
        id: String::new(),
        name: seed.name.to_string(),
        author: seed.author.to_string(),
        tags: seed.tags.iter().map(|t| (*t).to_string()).collect(),
        category: seed.category,
        uploaded_at: JAN_15_2024_MS + seed.days_after_jan_15 * DAY_MS,
        size: seed.size,
        mime_type: seed.mime_type.to_string(),
        ticker: seed.ticker.map(str::to_string),
        team: seed.team.map(str::to_string),
        url: None,
        content: None,
        data: None,
    });
    let notes = SEED_NOTES.iter().map(|seed| FileItem {
        id: String::new(),
        name: seed.name.to_string(),
        author: seed.author.to_string(),
        tags: seed.tags.iter().map(|t| (*t).to_string()).collect(),
        category: FileCategory::Irn,
        uploaded_at: JAN_15_2024_MS + seed.days_after_jan_15 * DAY_MS,
        size: seed.content.len() as u64,
        mime_type: "text/html".to_string(),
        ticker: seed.ticker.map(str::to_string),
        team: seed.team.map(str::to_string),
        url: None,
        content: Some(seed.content.to_string()),
        data: None,
    });

    files
        .chain(notes)
        .enumerate()
        .map(|(idx, mut file)| {
            file.id = (idx + 1).to_string();
            file
        })
        .collect()
}
