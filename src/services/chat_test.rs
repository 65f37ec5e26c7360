use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::services::seed::seed_files;

fn ids(files: &[&FileItem]) -> Vec<String> {
    files.iter().map(|f| f.id.clone()).collect()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

// =============================================================================
// related_files
// =============================================================================

#[test]
fn analyst_opinion_cites_internal_research_capped_at_four() {
    let files = seed_files();
    let related = related_files(&files, Intent::AnalystOpinion, "What are recent analyst views on AAPL?");
    assert_eq!(ids(&related), ["1", "2", "3", "4"]);
}

#[test]
fn management_meetings_cite_meeting_notes_and_irns() {
    let files = seed_files();
    let related = related_files(&files, Intent::ManagementMeetings, "key takeaways from the cfo meeting");
    assert_eq!(ids(&related), ["3", "9"]);
}

#[test]
fn ticker_mention_matches_case_insensitively() {
    let files = seed_files();
    let related = related_files(&files, Intent::General, "anything new on tsla?");
    assert_eq!(ids(&related), ["8"]);
}

#[test]
fn author_mention_matches() {
    let files = seed_files();
    let related = related_files(&files, Intent::General, "what has david park written");
    assert_eq!(ids(&related), ["4"]);
}

#[test]
fn price_targets_match_file_names() {
    let files = seed_files();
    let related = related_files(&files, Intent::PriceTargets, "where are price targets heading");
    assert_eq!(ids(&related), ["4"]);
}

#[test]
fn unrelated_general_question_cites_nothing() {
    let files = seed_files();
    assert!(related_files(&files, Intent::General, "hello there").is_empty());
}

#[test]
fn related_files_are_deterministic() {
    let files = seed_files();
    let first = ids(&related_files(&files, Intent::ResearchReports, "latest research"));
    for _ in 0..5 {
        assert_eq!(ids(&related_files(&files, Intent::ResearchReports, "latest research")), first);
    }
}

// =============================================================================
// generate_citations
// =============================================================================

#[test]
fn citation_pages_stay_in_range() {
    let files = seed_files();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        for citation in generate_citations(&files, Intent::ResearchReports, "latest research", &mut rng) {
            assert!((1..=20).contains(&citation.page), "page {}", citation.page);
        }
    }
}

#[test]
fn citations_point_at_related_files() {
    let files = seed_files();
    let citations = generate_citations(&files, Intent::ManagementMeetings, "cfo meeting", &mut rng());
    let names: Vec<&str> = citations.iter().map(|c| c.file_name.as_str()).collect();
    assert_eq!(names, ["MSFT Management Meeting Notes.pdf", "IRN: AAPL services margin check"]);
}

#[test]
fn price_target_snippet_quotes_a_three_digit_target() {
    let files = seed_files();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let citations = generate_citations(&files, Intent::PriceTargets, "JPM price target", &mut rng);
        let snippet = &citations[0].snippet;
        let digits: String = snippet
            .split('$')
            .nth(1)
            .unwrap()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        let target: u32 = digits.parse().unwrap();
        assert!((100..=299).contains(&target), "target {target}");
    }
}

#[test]
fn analyst_snippet_names_the_ticker() {
    let files = seed_files();
    let citations = generate_citations(&files, Intent::AnalystOpinion, "analyst views on AAPL", &mut rng());
    assert!(citations[0].snippet.contains("outlook on AAPL"));
}

// =============================================================================
// generate_response
// =============================================================================

#[test]
fn general_response_is_the_welcome_text() {
    let files = seed_files();
    let text = generate_response(&files, Intent::General, DataSource::Files, &[]);
    assert!(text.starts_with(
        "📁 Searching files\n\nWelcome to PRISM Research Intelligence. I have 9 documents available \
         (4 internal research, 2 external sources, 2 AI analysis)."
    ));
    assert!(text.ends_with("What would you like to research today?"));
    assert!(!text.contains("Based on"));
}

#[test]
fn response_lists_sources() {
    let files = seed_files();
    let citations = vec![
        Citation { file_id: "3".into(), file_name: "A.pdf".into(), page: 4, snippet: String::new() },
        Citation { file_id: "9".into(), file_name: "B".into(), page: 12, snippet: String::new() },
    ];
    let text = generate_response(&files, Intent::ManagementMeetings, DataSource::Files, &citations);
    assert!(text.starts_with("📁 Searching files\n\nAnalyzing 9 documents"));
    assert!(text.ends_with("\n\nBased on: [A.pdf, p.4], [B, p.12]"));
}

#[test]
fn response_without_citations_has_no_sources_line() {
    let files = seed_files();
    let text = generate_response(&files, Intent::FinancialMetrics, DataSource::Mixed, &[]);
    assert!(text.starts_with("📁💾 Searching files & database"));
    assert!(!text.contains("Based on"));
}

#[test]
fn research_report_response_breaks_down_categories() {
    let files = seed_files();
    let text = generate_response(&files, Intent::ResearchReports, DataSource::Files, &[]);
    assert!(text.contains("9 research reports (4 internal, 2 external, 2 AI-generated)"));
}

// =============================================================================
// ChatSession
// =============================================================================

#[test]
fn send_rejects_blank_input() {
    let mut session = ChatSession::new();
    let err = session.send("   ", &seed_files(), &mut rng(), 0).unwrap_err();
    assert_eq!(err, ChatError::EmptyMessage);
    assert!(session.messages.is_empty());
}

#[test]
fn send_records_user_then_assistant() {
    let mut session = ChatSession::new();
    let exchange = session
        .send("What are recent analyst views on AAPL?", &seed_files(), &mut rng(), 42)
        .unwrap();

    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.messages[0].sender, Sender::User);
    assert_eq!(session.messages[1].sender, Sender::Assistant);
    assert_eq!(exchange.user.text, "What are recent analyst views on AAPL?");
    assert_eq!(exchange.user.timestamp, 42);
    assert!(exchange.user.citations.is_empty());
    assert_eq!(exchange.assistant.intent, Intent::AnalystOpinion);
    assert_eq!(exchange.assistant.citations.len(), 4);
    assert!(exchange.assistant.text.contains("Based on: [AAPL Q4 Earnings Review.pdf, p."));
}

#[test]
fn prepare_does_not_record() {
    let session = ChatSession::new();
    let exchange = session.prepare("hello", &seed_files(), &mut rng(), 0).unwrap();
    assert_eq!(exchange.assistant.intent, Intent::General);
    assert!(session.messages.is_empty());
}

#[test]
fn message_ids_are_unique() {
    let mut session = ChatSession::new();
    let files = seed_files();
    let mut rng = rng();
    session.send("one", &files, &mut rng, 0).unwrap();
    session.send("two", &files, &mut rng, 0).unwrap();
    let mut seen: Vec<Uuid> = session.messages.iter().map(|m| m.id).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 4);
}

#[test]
fn message_serializes_lowercase_sender_and_skips_empty_citations() {
    let session = ChatSession::new();
    let exchange = session.prepare("hello", &[], &mut rng(), 0).unwrap();
    let json = serde_json::to_value(&exchange.user).unwrap();
    assert_eq!(json["sender"], "user");
    assert_eq!(json["intent"], "general");
    assert!(json.get("citations").is_none());
}

#[test]
fn push_moves_last_active_forward_only() {
    let mut session = ChatSession::new();
    session.last_active = 1_000;
    let exchange = session.prepare("hello", &[], &mut rng(), 5_000).unwrap();
    session.push(exchange.user);
    assert_eq!(session.last_active, 5_000);

    let stale = session.prepare("again", &[], &mut rng(), 2_000).unwrap();
    session.push(stale.user);
    assert_eq!(session.last_active, 5_000);
}

#[test]
fn idle_after_timeout_elapses() {
    let mut session = ChatSession::new();
    session.last_active = 10_000;
    let timeout = Duration::from_secs(60);
    assert!(!session.is_idle(69_999, timeout));
    assert!(session.is_idle(70_000, timeout));
}

#[test]
fn six_conversation_starters() {
    assert_eq!(CONVERSATION_STARTERS.len(), 6);
    assert!(CONVERSATION_STARTERS.iter().all(|s| !s.text.is_empty() && !s.icon.is_empty()));
}
