//! Research chat assistant: canned replies with citations from the catalog.
//!
//! DESIGN
//! ======
//! A message is classified ([`super::intent::classify`]), then matched
//! against the catalog to pick at most four related files. File selection
//! is deterministic; page numbers and the figures quoted in snippets are
//! drawn from an injected RNG so tests can pin them.
//!
//! Sessions live in memory for the lifetime of the process.

use std::fmt::Write;
use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use super::analytics;
use super::catalog::{FileCategory, FileItem};
use super::intent::{Classification, DataSource, Intent, classify};

const MAX_CITATIONS: usize = 4;
const MAX_CITED_PAGE: u32 = 20;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("chat session not found: {0}")]
    SessionNotFound(Uuid),
}

impl crate::error::ErrorCode for ChatError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "E_EMPTY_MESSAGE",
            Self::SessionNotFound(_) => "E_SESSION_NOT_FOUND",
        }
    }
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// A pointer into a catalog document backing an assistant claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    pub file_id: String,
    pub file_name: String,
    pub page: u32,
    pub snippet: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    /// Milliseconds since Unix epoch.
    pub timestamp: i64,
    pub intent: Intent,
    pub data_source: DataSource,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
}

/// A user message and the assistant reply it produced.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub user: ChatMessage,
    pub assistant: ChatMessage,
}

/// Canned prompt offered before the first message.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConversationStarter {
    pub text: &'static str,
    /// Loose topic hint; not an [`Intent`].
    pub hint: &'static str,
    pub category: &'static str,
    pub icon: &'static str,
}

pub const CONVERSATION_STARTERS: [ConversationStarter; 6] = [
    ConversationStarter {
        text: "What are the key revenue drivers for tech companies in Q4?",
        hint: "company",
        category: "Company Analysis",
        icon: "📊",
    },
    ConversationStarter {
        text: "Show me recent analyst sentiment on semiconductor stocks",
        hint: "analyst",
        category: "Analyst Insights",
        icon: "👥",
    },
    ConversationStarter {
        text: "What's the consensus outlook on interest rates for 2025?",
        hint: "team-outlook",
        category: "Market Outlook",
        icon: "🎯",
    },
    ConversationStarter {
        text: "Compare earnings performance across major banks this quarter",
        hint: "timeframe",
        category: "Comparative Analysis",
        icon: "📈",
    },
    ConversationStarter {
        text: "What are the emerging risks in the energy sector?",
        hint: "company",
        category: "Risk Analysis",
        icon: "⚠️",
    },
    ConversationStarter {
        text: "Summarize recent M&A activity in healthcare",
        hint: "timeframe",
        category: "M&A Intelligence",
        icon: "🤝",
    },
];

// =============================================================================
// CITATIONS
// =============================================================================

/// Files related to a question, in catalog order, at most four.
#[must_use]
pub fn related_files<'a>(files: &'a [FileItem], intent: Intent, text: &str) -> Vec<&'a FileItem> {
    let lower = text.to_lowercase();
    files
        .iter()
        .filter(|file| is_related(file, intent, &lower))
        .take(MAX_CITATIONS)
        .collect()
}

fn is_related(file: &FileItem, intent: Intent, lower_text: &str) -> bool {
    if file
        .ticker
        .as_deref()
        .is_some_and(|t| !t.is_empty() && lower_text.contains(&t.to_lowercase()))
    {
        return true;
    }
    if !file.author.is_empty() && lower_text.contains(&file.author.to_lowercase()) {
        return true;
    }

    let name = file.name.to_lowercase();
    match intent {
        Intent::AnalystOpinion => file.category == FileCategory::Internal,
        Intent::ManagementMeetings => name.contains("meeting") || name.contains("irn"),
        Intent::ResearchReports => matches!(file.category, FileCategory::Internal | FileCategory::External),
        Intent::PriceTargets => name.contains("price") || name.contains("target") || name.contains("valuation"),
        _ => false,
    }
}

fn snippet_for<R: Rng + ?Sized>(intent: Intent, ticker: Option<&str>, rng: &mut R) -> String {
    match intent {
        Intent::AnalystOpinion => format!(
            "\"We maintain a positive outlook on {} based on strong fundamentals and market positioning...\"",
            ticker.unwrap_or("the company")
        ),
        Intent::ManagementMeetings => "\"Management emphasized their focus on operational efficiency and margin \
                                       expansion in the coming quarters...\""
            .to_string(),
        Intent::PriceTargets => format!(
            "\"We are raising our price target to ${} based on improved earnings visibility...\"",
            rng.random_range(100..300)
        ),
        Intent::FinancialMetrics => format!(
            "\"Revenue growth is expected to accelerate to {}% YoY with EBITDA margins expanding...\"",
            rng.random_range(10..30)
        ),
        Intent::ResearchReports => "\"Our sector analysis indicates strong tailwinds from digital transformation \
                                    and increasing demand...\""
            .to_string(),
        _ => "\"Key insights from our analysis suggest continued momentum in the sector...\"".to_string(),
    }
}

/// Build citations for the files related to a question.
pub fn generate_citations<R: Rng + ?Sized>(
    files: &[FileItem],
    intent: Intent,
    text: &str,
    rng: &mut R,
) -> Vec<Citation> {
    related_files(files, intent, text)
        .into_iter()
        .map(|file| Citation {
            file_id: file.id.clone(),
            file_name: file.name.clone(),
            page: rng.random_range(1..=MAX_CITED_PAGE),
            snippet: snippet_for(intent, file.ticker.as_deref(), rng),
        })
        .collect()
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Templated assistant reply for a classified question.
#[must_use]
pub fn generate_response(
    files: &[FileItem],
    intent: Intent,
    data_source: DataSource,
    citations: &[Citation],
) -> String {
    let total = files.len();
    let internal = files.iter().filter(|f| f.category == FileCategory::Internal).count();
    let external = files.iter().filter(|f| f.category == FileCategory::External).count();
    let ai = files.iter().filter(|f| f.category == FileCategory::AiGenerated).count();

    let mut sources = String::new();
    if !citations.is_empty() {
        sources.push_str("\n\nBased on: ");
        for (idx, c) in citations.iter().enumerate() {
            if idx > 0 {
                sources.push_str(", ");
            }
            let _ = write!(sources, "[{}, p.{}]", c.file_name, c.page);
        }
    }

    let body = match intent {
        Intent::AnalystOpinion => format!(
            "Searching through {internal} internal research notes and {external} external reports to find analyst \
             opinions. I can surface specific analyst views, compare perspectives across team members, and identify \
             consensus or divergent opinions on companies and sectors."
        ),
        Intent::ManagementMeetings => format!(
            "Analyzing {total} documents for management meeting notes, executive interactions, and key takeaways. I \
             can help you track meeting history, identify evolving themes, and surface important management \
             commentary on strategy, outlook, and market conditions."
        ),
        Intent::PriceTargets => format!(
            "Searching {total} research documents and historical database records for price target information. I \
             can track price target changes over time, compare analyst targets, and identify catalysts for target \
             adjustments."
        ),
        Intent::FinancialMetrics => format!(
            "Querying financial data across {total} documents and database records. I can help you analyze growth \
             rates, margins, profitability metrics, and compare companies based on specific financial criteria."
        ),
        Intent::InvestmentDecisions => "Analyzing investment decision history and thesis documents. I can help you \
             understand why certain investments were made or passed on, track valuation concerns, and review \
             subsequent performance of companies we evaluated."
            .to_string(),
        Intent::ResearchReports => format!(
            "Searching through {total} research reports ({internal} internal, {external} external, {ai} \
             AI-generated). I can surface the latest sector research, thematic reports, and company-specific \
             analysis."
        ),
        Intent::EarningsThesis => "Analyzing earnings reports and investment thesis documents. I can help you \
             understand how recent earnings have impacted our views, identify thesis changes, and track evolving \
             outlooks on companies."
            .to_string(),
        Intent::ThematicAnalysis => format!(
            "Performing thematic analysis across {total} documents. I can synthesize key themes, identify patterns \
             across management meetings and research notes, and provide comprehensive summaries on specific topics."
        ),
        Intent::CompanySector => format!(
            "Searching {total} documents covering company and sector analysis. I can provide insights on \
             fundamentals, competitive positioning, industry trends, and investment opportunities."
        ),
        Intent::HistoricalAnalysis => "Analyzing historical data and trends across documents and database records. \
             I can track how metrics, views, and themes have evolved over time and identify important inflection \
             points."
            .to_string(),
        Intent::General => {
            // The welcome text never carries a sources line.
            return format!(
                "{}\n\nWelcome to PRISM Research Intelligence. I have {total} documents available ({internal} \
                 internal research, {external} external sources, {ai} AI analysis). I can help you with:\n\n\
                 • Analyst opinions & views\n\
                 • Management meeting insights\n\
                 • Price targets & financial metrics\n\
                 • Investment decisions & thesis\n\
                 • Research reports & thematic analysis\n\n\
                 What would you like to research today?",
                data_source.status_line()
            );
        }
    };

    format!("{}\n\n{body}{sources}", data_source.status_line())
}

// =============================================================================
// SESSION
// =============================================================================

/// One chat panel's conversation.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: Uuid,
    pub messages: Vec<ChatMessage>,
    /// Milliseconds since Unix epoch of the open or the latest message.
    pub last_active: i64,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self { id: Uuid::new_v4(), messages: Vec::new(), last_active: super::now_ms() }
    }

    /// Classify a message and build both sides of the exchange without
    /// recording anything.
    ///
    /// # Errors
    ///
    /// Returns `EmptyMessage` for blank input.
    pub fn prepare<R: Rng + ?Sized>(
        &self,
        text: &str,
        files: &[FileItem],
        rng: &mut R,
        now_ms: i64,
    ) -> Result<Exchange, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let Classification { intent, data_source } = classify(text);
        let citations = generate_citations(files, intent, text, rng);

        analytics::track(
            analytics::MESSAGE_SENT,
            json!({
                "session_id": self.id,
                "text": text,
                "intent": intent,
                "data_source": data_source,
                "citation_count": citations.len(),
            }),
        );

        let user = ChatMessage {
            id: Uuid::new_v4(),
            sender: Sender::User,
            text: text.to_string(),
            timestamp: now_ms,
            intent,
            data_source,
            citations: Vec::new(),
        };
        let assistant = ChatMessage {
            id: Uuid::new_v4(),
            sender: Sender::Assistant,
            text: generate_response(files, intent, data_source, &citations),
            timestamp: now_ms,
            intent,
            data_source,
            citations,
        };
        Ok(Exchange { user, assistant })
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.last_active = self.last_active.max(message.timestamp);
        self.messages.push(message);
    }

    /// Whether nothing happened in the session for at least `timeout`.
    #[must_use]
    pub fn is_idle(&self, now_ms: i64, timeout: Duration) -> bool {
        let timeout_ms = i64::try_from(timeout.as_millis()).unwrap_or(i64::MAX);
        now_ms.saturating_sub(self.last_active) >= timeout_ms
    }

    /// Prepare and record an exchange in one step.
    ///
    /// # Errors
    ///
    /// Returns `EmptyMessage` for blank input.
    pub fn send<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        files: &[FileItem],
        rng: &mut R,
        now_ms: i64,
    ) -> Result<Exchange, ChatError> {
        let exchange = self.prepare(text, files, rng, now_ms)?;
        self.push(exchange.user.clone());
        self.push(exchange.assistant.clone());
        Ok(exchange)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
