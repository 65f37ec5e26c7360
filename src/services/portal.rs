//! AI initiatives portal: departments, best practices and enablement
//! resources, plus a text-to-cards generator.
//!
//! DESIGN
//! ======
//! Content is seeded mock data held in memory. The generator is a
//! line-oriented bullet parser:
//!
//! ```text
//! USE CASES:
//! - Title: description (Status: active, Priority: high, Owner: Jane Doe)
//! ```
//!
//! Non-bullet lines naming a bucket switch the current bucket. Bullets
//! become cards; parenthesised metadata is stripped from the description
//! and missing or unrecognised metadata takes a fixed default.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use time::macros::{date, format_description};
use time::{Date, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PortalError {
    #[error("department not found: {0}")]
    DepartmentNotFound(String),
    #[error("no cards could be generated from the text")]
    NothingGenerated,
    #[error("unknown portal section: {0}")]
    UnknownSection(String),
}

impl crate::error::ErrorCode for PortalError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DepartmentNotFound(_) => "E_DEPARTMENT_NOT_FOUND",
            Self::NothingGenerated => "E_NOTHING_GENERATED",
            Self::UnknownSection(_) => "E_UNKNOWN_SECTION",
        }
    }
}

// =============================================================================
// TYPES
// =============================================================================

/// Portal area a block of generated text targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalSection {
    Departments,
    Enablement,
}

impl fmt::Display for PortalSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Departments => "departments",
            Self::Enablement => "enablement",
        })
    }
}

impl FromStr for PortalSection {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        keyword(s).ok_or_else(|| PortalError::UnknownSection(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseCaseStatus {
    Active,
    #[default]
    Planned,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    #[default]
    Prompt,
    Agent,
    Tool,
    Utility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkshopType {
    Past,
    #[default]
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    #[default]
    Guide,
    Training,
    Tool,
    Template,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Critical,
    Important,
    Recommended,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UseCase {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: UseCaseStatus,
    pub priority: Priority,
    pub department: String,
    pub last_updated: i64,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptTool {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: ToolCategory,
    pub department: String,
    pub tags: Vec<String>,
    pub usage: u32,
    pub rating: f32,
    pub last_updated: i64,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workshop {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: WorkshopType,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub duration: String,
    pub department: String,
    pub instructor: String,
    pub attendees: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub department: String,
    pub expertise: Vec<String>,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub description: String,
    pub use_cases: Vec<UseCase>,
    pub prompts_tools: Vec<PromptTool>,
    pub workshops: Vec<Workshop>,
    pub team_members: Vec<TeamMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestPractice {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub importance: Importance,
    pub last_updated: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnablementResource {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub last_updated: i64,
}

/// Cards produced from one block of pasted text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneratedContent {
    pub use_cases: Vec<UseCase>,
    pub prompts_tools: Vec<PromptTool>,
    pub workshops: Vec<Workshop>,
    pub team_members: Vec<TeamMember>,
    pub resources: Vec<EnablementResource>,
}

impl GeneratedContent {
    #[must_use]
    pub fn len(&self) -> usize {
        self.use_cases.len()
            + self.prompts_tools.len()
            + self.workshops.len()
            + self.team_members.len()
            + self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn assign_department(&mut self, department_id: &str) {
        for card in &mut self.use_cases {
            card.department = department_id.to_string();
        }
        for card in &mut self.prompts_tools {
            card.department = department_id.to_string();
        }
        for card in &mut self.workshops {
            card.department = department_id.to_string();
        }
        for card in &mut self.team_members {
            card.department = department_id.to_string();
        }
    }
}

// =============================================================================
// GENERATOR
// =============================================================================

const GENERATED_DEPARTMENT: &str = "generated";

const DEPARTMENTS_EXAMPLE: &str = "Example for Investments Department:

USE CASES:
- Portfolio Risk Analysis: AI-powered risk assessment for investment portfolios (Status: active, Priority: high, Owner: Sarah Chen)
- Market Sentiment Analysis: Real-time sentiment analysis from news and social media (Status: active, Priority: high, Owner: Michael Rodriguez)

PROMPTS & TOOLS:
- Investment Research Prompt: Comprehensive prompt for analyzing investment opportunities (Category: prompt, Tags: research, analysis, due-diligence, Rating: 4.8, Author: Investment Team)

WORKSHOPS:
- AI in Investment Decision Making: Workshop on integrating AI tools into investment processes (Type: past, Date: 2024-01-10, Duration: 2 hours, Instructor: Dr. Emily Watson, Attendees: 28)

TEAM MEMBERS:
- Sarah Chen: Senior Investment Analyst (Expertise: Portfolio Analysis, Risk Management, AI Tools, Email: sarah.chen@company.com)";

const ENABLEMENT_EXAMPLE: &str = "Example for Gen AI Enablement Resources:

TRAINING RESOURCES:
- AI Fundamentals Course: Comprehensive introduction to AI concepts and applications (Type: training, URL: https://training.company.com/ai-fundamentals)
- Enterprise AI Training Portal: Centralized learning platform for AI skills development (Type: training, URL: https://training.company.com/ai)

TOOLS & GUIDES:
- AI Tool Directory: Comprehensive directory of approved AI tools and applications (Type: tool, URL: https://tools.company.com/ai-directory)
- Prompt Template Library: Reusable prompt templates for common business scenarios (Type: template)";

/// Sample input for the generator.
#[must_use]
pub fn example_prompt(section: PortalSection) -> &'static str {
    match section {
        PortalSection::Departments => DEPARTMENTS_EXAMPLE,
        PortalSection::Enablement => ENABLEMENT_EXAMPLE,
    }
}

fn meta_pattern(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("static portal pattern")
}

static STATUS: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"Status:\s*(\w+)"));
static PRIORITY: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"Priority:\s*(\w+)"));
static OWNER: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"Owner:\s*([^,)]+)"));
static CATEGORY: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"Category:\s*(\w+)"));
static TAGS: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"Tags:\s*(.+?)\s*(?:,\s*\w+:|\)|$)"));
static RATING: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"Rating:\s*([\d.]+)"));
static AUTHOR: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"Author:\s*([^,)]+)"));
static TYPE: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"\bType:\s*(\w+)"));
static DATE: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"Date:\s*([\d-]+)"));
static DURATION: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"Duration:\s*([^,)]+)"));
static INSTRUCTOR: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"Instructor:\s*([^,)]+)"));
static ATTENDEES: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"Attendees:\s*(\d+)"));
static EXPERTISE: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"Expertise:\s*(.+?)\s*(?:,\s*\w+:|\)|$)"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"Email:\s*([^,)]+)"));
static URL: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"URL:\s*(https?://[^\s,)]+)"));
static PARENTHESISED: LazyLock<Regex> = LazyLock::new(|| meta_pattern(r"\(.*?\)"));

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

fn capture_list(re: &Regex, text: &str) -> Vec<String> {
    capture(re, text)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a lower-cased keyword into one of the serde-named enums above.
fn keyword<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_lowercase())).ok()
}

fn keyword_or_default<T: DeserializeOwned + Default>(re: &Regex, text: &str) -> T {
    capture(re, text).and_then(keyword).unwrap_or_default()
}

fn strip_metadata(description: &str) -> String {
    PARENTHESISED.replace_all(description, "").trim().to_string()
}

fn generated_id() -> String {
    format!("generated-{}", Uuid::new_v4().simple())
}

fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}

fn today(now_ms: i64) -> Date {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(now_ms) * 1_000_000)
        .map_or(OffsetDateTime::UNIX_EPOCH.date(), OffsetDateTime::date)
}

/// Workshop date from metadata, or today when absent or unparseable.
fn workshop_date(text: &str, now_ms: i64) -> String {
    let parsed = capture(&DATE, text).and_then(parse_date);
    format_date(parsed.unwrap_or_else(|| today(now_ms)))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Bucket {
    UseCases,
    PromptsTools,
    Workshops,
    TeamMembers,
    Resources,
}

fn heading_bucket(section: PortalSection, upper: &str) -> Option<Bucket> {
    match section {
        PortalSection::Departments => {
            if upper.contains("USE CASES") {
                Some(Bucket::UseCases)
            } else if upper.contains("PROMPTS") || upper.contains("TOOLS") {
                Some(Bucket::PromptsTools)
            } else if upper.contains("WORKSHOPS") {
                Some(Bucket::Workshops)
            } else if upper.contains("TEAM") {
                Some(Bucket::TeamMembers)
            } else {
                None
            }
        }
        PortalSection::Enablement => ["TRAINING", "RESOURCES", "TOOLS", "GUIDES"]
            .iter()
            .any(|h| upper.contains(h))
            .then_some(Bucket::Resources),
    }
}

/// Turn pasted text into portal cards. Bullets before the first heading are
/// ignored.
pub fn parse_generated<R: Rng + ?Sized>(
    text: &str,
    section: PortalSection,
    rng: &mut R,
    now_ms: i64,
) -> GeneratedContent {
    let mut out = GeneratedContent::default();
    let mut bucket: Option<Bucket> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(content) = line.strip_prefix('-').map(str::trim) else {
            if let Some(next) = heading_bucket(section, &line.to_uppercase()) {
                bucket = Some(next);
            }
            continue;
        };
        let Some(current) = bucket else {
            continue;
        };

        let (head, rest) = content.split_once(':').unwrap_or((content, ""));
        let head = head.trim().to_string();
        let rest = rest.trim();
        if head.is_empty() {
            continue;
        }

        match current {
            Bucket::UseCases => out.use_cases.push(UseCase {
                id: generated_id(),
                title: head,
                description: strip_metadata(rest),
                status: keyword_or_default(&STATUS, rest),
                priority: keyword_or_default(&PRIORITY, rest),
                department: GENERATED_DEPARTMENT.to_string(),
                last_updated: now_ms,
                owner: capture(&OWNER, rest).unwrap_or("Unknown").to_string(),
            }),
            Bucket::PromptsTools => out.prompts_tools.push(PromptTool {
                id: generated_id(),
                title: head,
                description: strip_metadata(rest),
                category: keyword_or_default(&CATEGORY, rest),
                department: GENERATED_DEPARTMENT.to_string(),
                tags: capture_list(&TAGS, rest),
                usage: rng.random_range(50..250),
                rating: capture(&RATING, rest)
                    .and_then(|r| r.parse::<f32>().ok())
                    .unwrap_or(4.0),
                last_updated: now_ms,
                author: capture(&AUTHOR, rest).unwrap_or("Unknown").to_string(),
            }),
            Bucket::Workshops => out.workshops.push(Workshop {
                id: generated_id(),
                title: head,
                description: strip_metadata(rest),
                kind: keyword_or_default(&TYPE, rest),
                date: workshop_date(rest, now_ms),
                duration: capture(&DURATION, rest).unwrap_or("1 hour").to_string(),
                department: GENERATED_DEPARTMENT.to_string(),
                instructor: capture(&INSTRUCTOR, rest).unwrap_or("TBD").to_string(),
                attendees: capture(&ATTENDEES, rest)
                    .and_then(|a| a.parse().ok())
                    .unwrap_or(0),
                max_attendees: None,
            }),
            Bucket::TeamMembers => out.team_members.push(TeamMember {
                id: generated_id(),
                name: head,
                role: strip_metadata(rest),
                department: GENERATED_DEPARTMENT.to_string(),
                expertise: capture_list(&EXPERTISE, rest),
                email: capture(&EMAIL, rest)
                    .unwrap_or("unknown@company.com")
                    .to_string(),
            }),
            Bucket::Resources => out.resources.push(EnablementResource {
                id: generated_id(),
                title: head,
                description: strip_metadata(rest),
                kind: keyword_or_default(&TYPE, rest),
                url: capture(&URL, rest).map(str::to_string),
                last_updated: now_ms,
            }),
        }
    }
    out
}

// =============================================================================
// PORTAL
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Portal {
    pub departments: Vec<Department>,
    pub best_practices: Vec<BestPractice>,
    pub enablement: Vec<EnablementResource>,
}

impl Portal {
    /// Portal filled with the mock content.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            departments: seed_departments(),
            best_practices: seed_best_practices(),
            enablement: seed_enablement(),
        }
    }

    /// # Errors
    ///
    /// Returns `DepartmentNotFound` for an unknown id.
    pub fn department(&self, id: &str) -> Result<&Department, PortalError> {
        self.departments
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| PortalError::DepartmentNotFound(id.to_string()))
    }

    /// Parse pasted text and append the cards to the portal.
    ///
    /// Department cards go to `department_id`, or the first department when
    /// none is given. Returns the cards that were added.
    ///
    /// # Errors
    ///
    /// `DepartmentNotFound` when the target department does not exist,
    /// `NothingGenerated` when the text holds no cards.
    pub fn apply_generated<R: Rng + ?Sized>(
        &mut self,
        section: PortalSection,
        text: &str,
        department_id: Option<&str>,
        rng: &mut R,
        now_ms: i64,
    ) -> Result<GeneratedContent, PortalError> {
        let mut generated = parse_generated(text, section, rng, now_ms);

        match section {
            PortalSection::Departments => {
                let department = match department_id {
                    Some(id) => self
                        .departments
                        .iter_mut()
                        .find(|d| d.id == id)
                        .ok_or_else(|| PortalError::DepartmentNotFound(id.to_string()))?,
                    None => self
                        .departments
                        .first_mut()
                        .ok_or_else(|| PortalError::DepartmentNotFound(String::new()))?,
                };
                if generated.is_empty() {
                    return Err(PortalError::NothingGenerated);
                }
                generated.assign_department(&department.id);
                department.use_cases.extend(generated.use_cases.iter().cloned());
                department.prompts_tools.extend(generated.prompts_tools.iter().cloned());
                department.workshops.extend(generated.workshops.iter().cloned());
                department.team_members.extend(generated.team_members.iter().cloned());
                info!(department = %department.id, cards = generated.len(), "portal cards generated");
            }
            PortalSection::Enablement => {
                if generated.is_empty() {
                    return Err(PortalError::NothingGenerated);
                }
                self.enablement.extend(generated.resources.iter().cloned());
                info!(cards = generated.len(), "enablement resources generated");
            }
        }
        Ok(generated)
    }
}

// =============================================================================
// SEED
// =============================================================================

fn day_ms(date: Date) -> i64 {
    date.midnight().assume_utc().unix_timestamp() * 1000
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn use_case(
    id: &str,
    title: &str,
    description: &str,
    status: UseCaseStatus,
    priority: Priority,
    department: &str,
    updated: Date,
    owner: &str,
) -> UseCase {
    UseCase {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        status,
        priority,
        department: department.into(),
        last_updated: day_ms(updated),
        owner: owner.into(),
    }
}

fn member(id: &str, name: &str, role: &str, department: &str, expertise: &[&str], email: &str) -> TeamMember {
    TeamMember {
        id: id.into(),
        name: name.into(),
        role: role.into(),
        department: department.into(),
        expertise: strings(expertise),
        email: email.into(),
    }
}

#[allow(clippy::too_many_lines)]
fn seed_departments() -> Vec<Department> {
    vec![
        Department {
            id: "investments".into(),
            name: "Investments".into(),
            description: "AI-driven investment analysis and portfolio optimization".into(),
            use_cases: vec![
                use_case(
                    "inv-1",
                    "Portfolio Risk Analysis",
                    "AI-powered risk assessment for investment portfolios",
                    UseCaseStatus::Active,
                    Priority::High,
                    "investments",
                    date!(2024 - 01 - 20),
                    "Sarah Chen",
                ),
                use_case(
                    "inv-2",
                    "Market Sentiment Analysis",
                    "Real-time sentiment analysis from news and social media",
                    UseCaseStatus::Active,
                    Priority::High,
                    "investments",
                    date!(2024 - 01 - 18),
                    "Michael Rodriguez",
                ),
            ],
            prompts_tools: vec![
                PromptTool {
                    id: "inv-p1".into(),
                    title: "Investment Research Prompt".into(),
                    description: "Comprehensive prompt for analyzing investment opportunities".into(),
                    category: ToolCategory::Prompt,
                    department: "investments".into(),
                    tags: strings(&["research", "analysis", "due-diligence"]),
                    usage: 245,
                    rating: 4.8,
                    last_updated: day_ms(date!(2024 - 01 - 15)),
                    author: "Investment Team".into(),
                },
                PromptTool {
                    id: "inv-p2".into(),
                    title: "Risk Assessment Agent".into(),
                    description: "Automated agent for portfolio risk evaluation".into(),
                    category: ToolCategory::Agent,
                    department: "investments".into(),
                    tags: strings(&["risk", "portfolio", "automation"]),
                    usage: 189,
                    rating: 4.6,
                    last_updated: day_ms(date!(2024 - 01 - 12)),
                    author: "Risk Management".into(),
                },
            ],
            workshops: vec![
                Workshop {
                    id: "inv-w1".into(),
                    title: "AI in Investment Decision Making".into(),
                    description: "Workshop on integrating AI tools into investment processes".into(),
                    kind: WorkshopType::Past,
                    date: "2024-01-10".into(),
                    duration: "2 hours".into(),
                    department: "investments".into(),
                    instructor: "Dr. Emily Watson".into(),
                    attendees: 28,
                    max_attendees: None,
                },
                Workshop {
                    id: "inv-w2".into(),
                    title: "Advanced Portfolio Analytics".into(),
                    description: "Deep dive into AI-powered portfolio optimization".into(),
                    kind: WorkshopType::Upcoming,
                    date: "2024-02-15".into(),
                    duration: "3 hours".into(),
                    department: "investments".into(),
                    instructor: "James Liu".into(),
                    attendees: 15,
                    max_attendees: Some(30),
                },
            ],
            team_members: vec![
                member(
                    "inv-t1",
                    "Sarah Chen",
                    "Senior Investment Analyst",
                    "investments",
                    &["Portfolio Analysis", "Risk Management", "AI Tools"],
                    "sarah.chen@company.com",
                ),
                member(
                    "inv-t2",
                    "Michael Rodriguez",
                    "Quantitative Researcher",
                    "investments",
                    &["Machine Learning", "Market Analysis", "Data Science"],
                    "michael.rodriguez@company.com",
                ),
            ],
        },
        Department {
            id: "client-advisors".into(),
            name: "Client Advisors".into(),
            description: "AI tools for enhanced client relationship management".into(),
            use_cases: vec![
                use_case(
                    "ca-1",
                    "Client Communication Assistant",
                    "AI-powered email and communication drafting",
                    UseCaseStatus::Active,
                    Priority::High,
                    "client-advisors",
                    date!(2024 - 01 - 22),
                    "Lisa Thompson",
                ),
                use_case(
                    "ca-2",
                    "Meeting Preparation Tool",
                    "Automated client meeting preparation and agenda creation",
                    UseCaseStatus::Planned,
                    Priority::Medium,
                    "client-advisors",
                    date!(2024 - 01 - 19),
                    "David Park",
                ),
            ],
            prompts_tools: vec![PromptTool {
                id: "ca-p1".into(),
                title: "Client Email Templates".into(),
                description: "Professional email templates for various client scenarios".into(),
                category: ToolCategory::Prompt,
                department: "client-advisors".into(),
                tags: strings(&["communication", "email", "client-service"]),
                usage: 312,
                rating: 4.9,
                last_updated: day_ms(date!(2024 - 01 - 20)),
                author: "Client Services Team".into(),
            }],
            workshops: vec![Workshop {
                id: "ca-w1".into(),
                title: "AI-Enhanced Client Interactions".into(),
                description: "Best practices for using AI in client communications".into(),
                kind: WorkshopType::Upcoming,
                date: "2024-02-20".into(),
                duration: "1.5 hours".into(),
                department: "client-advisors".into(),
                instructor: "Amanda Foster".into(),
                attendees: 22,
                max_attendees: Some(40),
            }],
            team_members: vec![member(
                "ca-t1",
                "Lisa Thompson",
                "Senior Client Advisor",
                "client-advisors",
                &["Client Relations", "AI Communication Tools", "Wealth Planning"],
                "lisa.thompson@company.com",
            )],
        },
        Department {
            id: "wealth-planning".into(),
            name: "Wealth Planning".into(),
            description: "Strategic wealth planning with AI-powered insights".into(),
            use_cases: vec![use_case(
                "wp-1",
                "Estate Planning Optimizer",
                "AI-assisted estate planning and tax optimization",
                UseCaseStatus::Active,
                Priority::Medium,
                "wealth-planning",
                date!(2024 - 01 - 17),
                "Jennifer Walsh",
            )],
            prompts_tools: vec![PromptTool {
                id: "wp-p1".into(),
                title: "Tax Strategy Prompts".into(),
                description: "Prompts for tax-efficient wealth planning strategies".into(),
                category: ToolCategory::Prompt,
                department: "wealth-planning".into(),
                tags: strings(&["tax-planning", "estate-planning", "optimization"]),
                usage: 98,
                rating: 4.5,
                last_updated: day_ms(date!(2024 - 01 - 16)),
                author: "Tax Planning Team".into(),
            }],
            workshops: vec![Workshop {
                id: "wp-w1".into(),
                title: "AI in Estate Planning".into(),
                description: "Leveraging AI for comprehensive estate planning".into(),
                kind: WorkshopType::Past,
                date: "2024-01-05".into(),
                duration: "2.5 hours".into(),
                department: "wealth-planning".into(),
                instructor: "Mark Stevens".into(),
                attendees: 18,
                max_attendees: None,
            }],
            team_members: vec![member(
                "wp-t1",
                "Jennifer Walsh",
                "Wealth Planning Specialist",
                "wealth-planning",
                &["Estate Planning", "Tax Strategy", "AI Tools"],
                "jennifer.walsh@company.com",
            )],
        },
        Department {
            id: "finance".into(),
            name: "Finance".into(),
            description: "AI-powered financial analysis and reporting".into(),
            use_cases: vec![use_case(
                "fin-1",
                "Automated Financial Reporting",
                "AI-generated financial reports and analysis",
                UseCaseStatus::Active,
                Priority::High,
                "finance",
                date!(2024 - 01 - 23),
                "Thomas Anderson",
            )],
            prompts_tools: vec![PromptTool {
                id: "fin-p1".into(),
                title: "Financial Analysis Templates".into(),
                description: "Standardized templates for financial analysis".into(),
                category: ToolCategory::Utility,
                department: "finance".into(),
                tags: strings(&["reporting", "analysis", "templates"]),
                usage: 203,
                rating: 4.6,
                last_updated: day_ms(date!(2024 - 01 - 21)),
                author: "Finance Team".into(),
            }],
            workshops: Vec::new(),
            team_members: vec![member(
                "fin-t1",
                "Thomas Anderson",
                "Financial Analyst",
                "finance",
                &["Financial Modeling", "Data Analysis", "AI Reporting"],
                "thomas.anderson@company.com",
            )],
        },
        Department {
            id: "compliance-legal".into(),
            name: "Compliance and Legal".into(),
            description: "AI tools for compliance monitoring and legal research".into(),
            use_cases: vec![use_case(
                "cl-1",
                "Regulatory Compliance Monitor",
                "AI-powered monitoring of regulatory changes and compliance",
                UseCaseStatus::Active,
                Priority::High,
                "compliance-legal",
                date!(2024 - 01 - 24),
                "Maria Gonzalez",
            )],
            prompts_tools: vec![PromptTool {
                id: "cl-p1".into(),
                title: "Legal Research Assistant".into(),
                description: "AI prompts for efficient legal research and analysis".into(),
                category: ToolCategory::Agent,
                department: "compliance-legal".into(),
                tags: strings(&["legal-research", "compliance", "regulation"]),
                usage: 87,
                rating: 4.8,
                last_updated: day_ms(date!(2024 - 01 - 22)),
                author: "Legal Team".into(),
            }],
            workshops: vec![Workshop {
                id: "cl-w1".into(),
                title: "AI Ethics in Financial Services".into(),
                description: "Understanding ethical AI use in financial compliance".into(),
                kind: WorkshopType::Upcoming,
                date: "2024-02-28".into(),
                duration: "2 hours".into(),
                department: "compliance-legal".into(),
                instructor: "Dr. Patricia Lee".into(),
                attendees: 12,
                max_attendees: Some(25),
            }],
            team_members: vec![member(
                "cl-t1",
                "Maria Gonzalez",
                "Compliance Officer",
                "compliance-legal",
                &["Regulatory Compliance", "Risk Management", "AI Governance"],
                "maria.gonzalez@company.com",
            )],
        },
    ]
}

fn seed_best_practices() -> Vec<BestPractice> {
    let practice = |id: &str, title: &str, description: &str, category: &str, importance, updated| BestPractice {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        category: category.into(),
        importance,
        last_updated: day_ms(updated),
    };
    vec![
        practice(
            "bp-1",
            "AI Model Validation Standards",
            "Comprehensive standards for validating AI models before deployment",
            "governance",
            Importance::Critical,
            date!(2024 - 01 - 20),
        ),
        practice(
            "bp-2",
            "Data Privacy in AI Applications",
            "Guidelines for maintaining client data privacy in AI systems",
            "ethics",
            Importance::Critical,
            date!(2024 - 01 - 18),
        ),
        practice(
            "bp-3",
            "Prompt Engineering Best Practices",
            "Standards for creating effective and safe AI prompts",
            "usage",
            Importance::Important,
            date!(2024 - 01 - 15),
        ),
        practice(
            "bp-4",
            "AI Security Framework",
            "Security protocols for AI system implementation and maintenance",
            "security",
            Importance::Critical,
            date!(2024 - 01 - 22),
        ),
    ]
}

fn seed_enablement() -> Vec<EnablementResource> {
    let resource = |id: &str, title: &str, description: &str, kind, url: Option<&str>, updated| EnablementResource {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        kind,
        url: url.map(str::to_string),
        last_updated: day_ms(updated),
    };
    vec![
        resource(
            "en-1",
            "AI Onboarding Kit",
            "Complete onboarding package for new AI tool users",
            ResourceType::Guide,
            None,
            date!(2024 - 01 - 20),
        ),
        resource(
            "en-2",
            "Enterprise AI Training Portal",
            "Centralized learning platform for AI skills development",
            ResourceType::Training,
            Some("https://training.company.com/ai"),
            date!(2024 - 01 - 18),
        ),
        resource(
            "en-3",
            "AI Tool Directory",
            "Comprehensive directory of approved AI tools and applications",
            ResourceType::Tool,
            Some("https://tools.company.com/ai-directory"),
            date!(2024 - 01 - 22),
        ),
        resource(
            "en-4",
            "Prompt Template Library",
            "Reusable prompt templates for common business scenarios",
            ResourceType::Template,
            None,
            date!(2024 - 01 - 15),
        ),
    ]
}

#[cfg(test)]
#[path = "portal_test.rs"]
mod tests;
