mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{node, started_state, team, FakeSource};
use linear_embed::embed::{EmbedFormat, EmbedOutcome, EmbedProcessor, IssueCache};
use linear_embed::identifier::IssueIdentifier;
use linear_embed::resolver::IssueResolver;

fn processor(source: FakeSource) -> (EmbedProcessor<FakeSource>, Arc<FakeSource>) {
    let source = Arc::new(source);
    let processor = EmbedProcessor::new(IssueResolver::new(Arc::clone(&source)));
    (processor, source)
}

fn direct_source(identifier: &str) -> FakeSource {
    let mut fake = FakeSource::new();
    fake.direct = Some(node(identifier));
    fake.state = Some(started_state());
    fake
}

#[tokio::test]
async fn test_invalid_syntax_makes_no_calls() {
    let (processor, source) = processor(FakeSource::new());

    let outcome = processor.process("bad-id:card").await;

    assert_eq!(outcome, EmbedOutcome::InvalidSyntax);
    assert_eq!(outcome.message().unwrap(), "Invalid Linear issue embed syntax");
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn test_not_configured() {
    let (processor, source) = processor(FakeSource::unconfigured());

    let outcome = processor.process("ENG-1:card").await;

    assert_eq!(outcome, EmbedOutcome::NotConfigured);
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn test_not_found() {
    let (processor, _source) = processor(FakeSource::new());

    let outcome = processor.process("ENG-404").await;

    assert_eq!(outcome.message().unwrap(), "Issue ENG-404 not found");
    assert!(processor.cache().is_empty());
}

#[tokio::test]
async fn test_failure_message_includes_underlying_error() {
    let mut fake = FakeSource::new();
    fake.fail_workspace = true;
    let (processor, _source) = processor(fake);

    let outcome = processor.process("ENG-5").await;

    match outcome {
        EmbedOutcome::Failed { identifier, message } => {
            assert_eq!(identifier.as_str(), "ENG-5");
            assert!(message.contains("502 Bad Gateway"));
        }
        other => panic!("Expected EmbedOutcome::Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_ready_merges_options_over_defaults() {
    let (processor, _source) = processor(direct_source("ENG-7"));

    let outcome = processor.process("ENG-7:compact\nshowLabels=true\nshowTeam=false").await;

    match outcome {
        EmbedOutcome::Ready { issue, options } => {
            assert_eq!(issue.identifier, "ENG-7");
            assert_eq!(options.format, EmbedFormat::Compact);
            assert!(options.show_labels);
            assert!(!options.show_team);
            assert!(options.show_description);
            assert_eq!(options.max_description_length, 150);
        }
        other => panic!("Expected EmbedOutcome::Ready, got {:?}", other),
    }
}

#[tokio::test]
async fn test_format_defaults_to_card() {
    let (processor, _source) = processor(direct_source("ENG-7"));

    match processor.process("ENG-7:bogus").await {
        EmbedOutcome::Ready { options, .. } => assert_eq!(options.format, EmbedFormat::Card),
        other => panic!("Expected EmbedOutcome::Ready, got {:?}", other),
    }
}

#[tokio::test]
async fn test_second_render_is_served_from_cache() {
    let (processor, source) = processor(direct_source("ENG-7"));

    assert!(matches!(processor.process("ENG-7").await, EmbedOutcome::Ready { .. }));
    let calls = source.calls().len();
    assert!(matches!(processor.process("ENG-7:badge").await, EmbedOutcome::Ready { .. }));

    assert_eq!(source.calls().len(), calls);
    assert_eq!(processor.cache().len(), 1);
}

#[tokio::test]
async fn test_refresh_bypasses_cache() {
    let (processor, source) = processor(direct_source("ENG-7"));
    let identifier = IssueIdentifier::parse("ENG-7").unwrap();

    processor.process("ENG-7").await;
    source.clear_calls();
    let refreshed = processor.refresh_issue(&identifier).await.unwrap();

    assert!(refreshed.is_some());
    assert_eq!(source.direct_calls(), 1);
}

#[tokio::test]
async fn test_expired_cache_entries_are_refetched() {
    let source = Arc::new(direct_source("ENG-7"));
    let processor = EmbedProcessor::with_cache(
        IssueResolver::new(Arc::clone(&source)),
        Arc::new(IssueCache::with_ttl(Duration::ZERO)),
    );

    processor.process("ENG-7").await;
    processor.process("ENG-7").await;

    assert_eq!(source.direct_calls(), 2);
}

#[tokio::test]
async fn test_clear_cache() {
    let mut fake = FakeSource::new();
    fake.team_pages = vec![vec![team("ENG")]];
    fake.team_issue_pages = vec![vec![node("ENG-1"), node("ENG-2")]];
    let (processor, _source) = processor(fake);

    processor.process("ENG-1").await;
    processor.process("ENG-2").await;
    assert_eq!(processor.cache().len(), 2);

    processor.clear_cache();
    assert!(processor.cache().is_empty());
}

#[tokio::test]
async fn test_concurrent_embeds_resolve_independently() {
    let mut fake = FakeSource::new();
    fake.team_pages = vec![vec![team("ENG")]];
    fake.team_issue_pages = vec![vec![node("ENG-1"), node("ENG-2")]];
    let (processor, _source) = processor(fake);

    let (first, second) = tokio::join!(processor.process("ENG-1"), processor.process("ENG-2:compact"));

    assert!(matches!(first, EmbedOutcome::Ready { issue, .. } if issue.identifier == "ENG-1"));
    assert!(matches!(second, EmbedOutcome::Ready { issue, .. } if issue.identifier == "ENG-2"));
}
