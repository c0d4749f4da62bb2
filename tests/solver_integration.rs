use honeycomb::commands::{SolveConfig, define_word, solve_puzzle};
use honeycomb::definitions::{DefinitionService, HttpDefinitionLookup};
use honeycomb::error::{DefinitionError, HoneycombError, ValidationError};
use honeycomb::output::DefinitionView;
use honeycomb::wordlists::{WordListCache, source_from_setting};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;
use url::Url;

fn cache_for(setting: &str) -> WordListCache {
    WordListCache::new(source_from_setting(setting, &reqwest::Client::new()))
}

fn definition_service(server: &MockServer) -> DefinitionService {
    let base = Url::parse(&server.url("/api/v2/entries/en/")).unwrap();
    DefinitionService::new(Box::new(HttpDefinitionLookup::new(
        reqwest::Client::new(),
        base,
    )))
}

fn fixture_path() -> String {
    format!("{}/tests/fixtures/pituar_words.txt", env!("CARGO_MANIFEST_DIR"))
}

#[tokio::test]
async fn solves_with_the_fixture_list() {
    let words = cache_for(&fixture_path());
    let result = solve_puzzle(&SolveConfig::new("PITUAR", " L "), &words)
        .await
        .unwrap();

    assert_eq!(result.spec.to_string(), "[l] pituar");
    assert_eq!(result.scanned, 105);
    assert_eq!(result.words.len(), 39);
    assert_eq!(
        &result.words[..7],
        ["partial", "tilapia", "titular", "lariat", "pillar", "plural", "ritual"]
    );
    assert_eq!(result.words.last().map(String::as_str), Some("tilt"));

    // Proper nouns and near-misses from the list never qualify
    assert!(!result.words.iter().any(|w| w == "April" || w == "Lupita"));
    assert!(!result.words.iter().any(|w| w == "apparitio" || w == "triplicaatl"));
    assert_eq!(result.summary(), "39 word(s) found");
}

#[tokio::test]
async fn embedded_list_solves_real_puzzles() {
    let words = cache_for("embedded");

    let result = solve_puzzle(&SolveConfig::new("pituar", "l"), &words)
        .await
        .unwrap();
    for expected in ["pillar", "partial", "titular", "tulip", "pupil", "pill"] {
        assert!(result.words.iter().any(|w| w == expected), "missing {expected}");
    }
    assert!(result.scanned > 20_000);

    let other = solve_puzzle(&SolveConfig::new("aeinrt", "s"), &words)
        .await
        .unwrap();
    assert!(other.words.len() > 100);
    assert!(other.words.iter().any(|w| w == "entertains"));

    for ranked in [&result.words, &other.words] {
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.len() > b.len() || (a.len() == b.len() && a < b), "{a} before {b}");
        }
    }
    assert!(result.words.iter().all(|w| w.len() >= 4 && w.contains('l')));
}

#[tokio::test]
async fn solves_with_a_file_list() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "pill\n  pillar  \n\ntulip\npupil\nApril\nlip\ntrip").unwrap();

    let words = cache_for(file.path().to_str().unwrap());
    let result = solve_puzzle(&SolveConfig::new("pituar", "l"), &words)
        .await
        .unwrap();

    assert_eq!(result.words, vec!["pillar", "pupil", "tulip", "pill"]);
    assert_eq!(result.scanned, 7);
}

#[tokio::test]
async fn invalid_puzzle_fails_before_loading_words() {
    let words = cache_for("/nonexistent/honeycomb/words.txt");
    let err = solve_puzzle(&SolveConfig::new("pitua", "l"), &words)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        HoneycombError::Validation(ValidationError::InvalidOuterLength(5))
    ));
    assert!(!words.is_loaded());
}

#[tokio::test]
async fn word_list_from_http_is_loaded_once() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/wordlist.txt");
        then.status(200).body("pillar\npill\ntrip\n");
    });

    let words = cache_for(&server.url("/wordlist.txt"));
    for _ in 0..3 {
        let result = solve_puzzle(&SolveConfig::new("pituar", "l"), &words)
            .await
            .unwrap();
        assert_eq!(result.words, vec!["pillar", "pill"]);
    }

    list.assert_hits(1);
}

#[tokio::test]
async fn missing_word_list_is_reported() {
    let words = cache_for("/nonexistent/honeycomb/words.txt");
    let err = solve_puzzle(&SolveConfig::new("pituar", "l"), &words)
        .await
        .unwrap_err();

    assert!(matches!(err, HoneycombError::WordList(_)));
    assert!(err.to_string().starts_with("Could not load word list"));
}

#[tokio::test]
async fn definitions_are_fetched_once_and_formatted() {
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(GET).path("/api/v2/entries/en/pillar");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([{
                "word": "pillar",
                "phonetic": "/ˈpɪlə/",
                "meanings": [{
                    "partOfSpeech": "noun",
                    "definitions": [
                        {"definition": "A large post, often used as supporting architecture.",
                         "example": "the pillars of the temple"},
                        {"definition": "A column."},
                        {"definition": "A cylinder."},
                        {"definition": "A fourth sense that is not shown."}
                    ]
                }]
            }]));
    });

    let service = definition_service(&server);
    let first = define_word(&service, "pillar").await.unwrap();
    let second = define_word(&service, "pillar").await.unwrap();

    lookup.assert_hits(1);
    assert_eq!(first, second);

    let view = DefinitionView::from_entries(&first.word, &first.entries);
    assert_eq!(view.phonetic.as_deref(), Some("/ˈpɪlə/"));
    assert_eq!(view.sections.len(), 1);
    assert_eq!(view.sections[0].part_of_speech, "noun");
    assert_eq!(view.sections[0].definitions.len(), 3);
    assert_eq!(
        view.sections[0].definitions[0].1.as_deref(),
        Some("the pillars of the temple")
    );
}

#[tokio::test]
async fn unknown_word_is_not_found_and_not_memoized() {
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(GET).path("/api/v2/entries/en/tilt");
        then.status(404)
            .json_body(serde_json::json!({"title": "No Definitions Found"}));
    });

    let service = definition_service(&server);
    for _ in 0..2 {
        let err = define_word(&service, "tilt").await.unwrap_err();
        assert_eq!(
            err,
            DefinitionError::NotFound {
                word: "tilt".to_string()
            }
        );
    }

    lookup.assert_hits(2);
    assert!(service.cache().is_empty());
}

#[tokio::test]
async fn invalid_word_never_reaches_the_network() {
    let server = MockServer::start();
    let any = server.mock(|when, then| {
        when.method(GET);
        then.status(200).body("[]");
    });

    let service = definition_service(&server);
    let err = define_word(&service, "123 !").await.unwrap_err();

    assert_eq!(err, DefinitionError::InvalidWord);
    any.assert_hits(0);
}
