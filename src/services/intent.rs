//! Chat intent classification.
//!
//! DESIGN
//! ======
//! An ordered table of rules. Each rule owns one or more case-insensitive
//! patterns; the first rule with any matching pattern decides the intent.
//! Order matters: "earnings" questions are claimed by `FinancialMetrics`
//! before `EarningsThesis` ever sees them, so earnings-thesis only fires for
//! quarterly-result phrasing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Coarse label for what a chat question is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    AnalystOpinion,
    ManagementMeetings,
    PriceTargets,
    FinancialMetrics,
    InvestmentDecisions,
    ResearchReports,
    EarningsThesis,
    ThematicAnalysis,
    CompanySector,
    HistoricalAnalysis,
    General,
}

impl Intent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AnalystOpinion => "analyst-opinion",
            Self::ManagementMeetings => "management-meetings",
            Self::PriceTargets => "price-targets",
            Self::FinancialMetrics => "financial-metrics",
            Self::InvestmentDecisions => "investment-decisions",
            Self::ResearchReports => "research-reports",
            Self::EarningsThesis => "earnings-thesis",
            Self::ThematicAnalysis => "thematic-analysis",
            Self::CompanySector => "company-sector",
            Self::HistoricalAnalysis => "historical-analysis",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the assistant claims to look for an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Files,
    Database,
    Internet,
    Mixed,
}

impl DataSource {
    /// Status line shown at the top of an assistant reply.
    #[must_use]
    pub fn status_line(self) -> &'static str {
        match self {
            Self::Files => "📁 Searching files",
            Self::Database => "💾 Querying database",
            Self::Mixed => "📁💾 Searching files & database",
            Self::Internet => "🌐 Searching",
        }
    }
}

/// Result of classifying a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub intent: Intent,
    pub data_source: DataSource,
}

const FALLBACK: Classification = Classification { intent: Intent::General, data_source: DataSource::Files };

/// One row of the classification table.
pub struct IntentRule {
    pub intent: Intent,
    pub data_source: DataSource,
    patterns: Vec<Regex>,
}

impl IntentRule {
    fn new(intent: Intent, data_source: DataSource, patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i){p}")).expect("static intent pattern"))
            .collect();
        Self { intent, data_source, patterns }
    }

    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

/// Classification rules, evaluated top to bottom.
pub static INTENT_RULES: LazyLock<Vec<IntentRule>> = LazyLock::new(|| {
    use DataSource::{Files, Mixed};
    vec![
        IntentRule::new(
            Intent::AnalystOpinion,
            Files,
            &[
                r"\b(views?|opinions?|favou?r|think|believe|perspectives?)\b.*\b(on|about)\b",
                r"\b(analysts?|experts?|researchers?|authors?)\b.*\b(views?|opinions?|favou?r|think)\b",
            ],
        ),
        IntentRule::new(
            Intent::ManagementMeetings,
            Files,
            &[
                r"\b(management meeting|met|meeting with|ceo|cfo|management team|executive)\b",
                r"\b(management.*saying|management.*focus|key takeaway|meetings.*taken place|meetings.*have)\b",
            ],
        ),
        IntentRule::new(
            Intent::PriceTargets,
            Mixed,
            &[r"\b(price target|target price|pt changed|price objective)\b"],
        ),
        IntentRule::new(
            Intent::FinancialMetrics,
            Mixed,
            &[
                r"\b(growth rate|profit margin|revenue|earnings|ebitda|operating margin|roe|roic)\b",
                r"\b(margin over|companies.*operating with)\b",
            ],
        ),
        IntentRule::new(
            Intent::InvestmentDecisions,
            Mixed,
            &[
                r"\b(passed on|valuation concern|investment decision|buy|sell|hold decision)\b",
                r"\b(thesis.*change|change.*thesis)\b",
            ],
        ),
        IntentRule::new(
            Intent::ResearchReports,
            Files,
            &[r"\b(latest research|recent research|research on|research report|sector report)\b"],
        ),
        IntentRule::new(
            Intent::EarningsThesis,
            Files,
            &[r"\b(earnings|quarterly result|q[1-4] result).*\b(thesis|view|outlook)\b"],
        ),
        IntentRule::new(
            Intent::ThematicAnalysis,
            Files,
            &[r"\b(summarize|highlight|key takeaway|theme|trend across)\b"],
        ),
        IntentRule::new(
            Intent::CompanySector,
            Mixed,
            &[r"\b(company|stock|ticker|corporation|firm|equity|sector|industry)\b"],
        ),
        IntentRule::new(
            Intent::HistoricalAnalysis,
            Mixed,
            &[r"\b(over past|last|historical|trend|evolution|over time)\b"],
        ),
    ]
});

/// Classify free text. Pure: the same text always yields the same result.
#[must_use]
pub fn classify(text: &str) -> Classification {
    INTENT_RULES
        .iter()
        .find(|rule| rule.matches(text))
        .map_or(FALLBACK, |rule| Classification { intent: rule.intent, data_source: rule.data_source })
}

#[cfg(test)]
#[path = "intent_test.rs"]
mod tests;
