//! Integration tests for the DuckDuckGo client using WireMock
//!
//! These tests mock both request variants to verify request shape, answer
//! reconciliation, failure degradation and cancellation without making
//! actual API calls.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use integration_duckduckgo::{
    AnswerProvider, CancellationToken, DEFAULT_QUERY, DuckDuckGoClient, DuckDuckGoConfig, Fetcher,
    QuerySession, RequestVariant,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param, query_param_is_missing},
};

/// As-parameter response for "ferrara": abstract and related topics, no infobox
fn ferrara_with_q() -> serde_json::Value {
    serde_json::json!({
        "Abstract": "",
        "AbstractText": "Ferrara is a city in Emilia-Romagna, Italy.",
        "AbstractSource": "Wikipedia",
        "AbstractURL": "https://en.wikipedia.org/wiki/Ferrara",
        "Image": "/i/ferrara.jpg",
        "Heading": "Ferrara",
        "Answer": "",
        "AnswerType": "",
        "Definition": "",
        "DefinitionSource": "",
        "DefinitionURL": "",
        "Type": "A",
        "Infobox": "",
        "RelatedTopics": [
            {
                "Result": "<a href=\"https://duckduckgo.com/Province_of_Ferrara\">Province of Ferrara</a> - A province of Emilia-Romagna",
                "FirstURL": "https://duckduckgo.com/Province_of_Ferrara",
                "Icon": {"URL": "/i/province.png", "Width": 32, "Height": 32},
                "Text": "Province of Ferrara - A province of Emilia-Romagna"
            }
        ],
        "Results": []
    })
}

/// As-path response for "ferrara": infobox and a different heading
fn ferrara_without_q() -> serde_json::Value {
    serde_json::json!({
        "Abstract": "<b>Ferrara</b> is a city",
        "AbstractText": "Other text",
        "Heading": "Ferrara (city)",
        "Type": "A",
        "Infobox": {
            "content": [
                {"data_type": "string", "value": "Italy", "label": "Country", "wiki_order": 0},
                {"data_type": "string", "value": "132,009", "label": "Population", "wiki_order": 1}
            ]
        },
        "RelatedTopics": [
            {"Result": "<a href=\"https://duckduckgo.com/Este\">Este</a>", "FirstURL": "https://duckduckgo.com/Este"}
        ],
        "Results": [
            {"Result": "<a href=\"https://www.comune.fe.it/\">Official site</a>", "FirstURL": "https://www.comune.fe.it/", "Text": "Official site"}
        ]
    })
}

fn client_for(server: &MockServer) -> DuckDuckGoClient {
    let config = DuckDuckGoConfig {
        timeout_secs: 10,
        ..DuckDuckGoConfig::with_api_root(server.uri())
    };
    DuckDuckGoClient::new(config).unwrap()
}

async fn mount_variants(
    server: &MockServer,
    query: &str,
    with_q: ResponseTemplate,
    without_q: ResponseTemplate,
) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("q", query))
        .respond_with(with_q)
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/{query}")))
        .and(query_param_is_missing("q"))
        .respond_with(without_q)
        .expect(1)
        .mount(server)
        .await;
}

// =============================================================================
// Request shape
// =============================================================================

#[tokio::test]
async fn test_both_variants_carry_fixed_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("format", "json"))
        .and(query_param("no_html", "1"))
        .and(query_param("t", "discerningduck"))
        .and(header("user-agent", "discerning-duck 0.1; (foo)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let answer = client
        .query_results("rust", &CancellationToken::new())
        .await
        .unwrap();

    assert!(answer.is_empty());
}

#[tokio::test]
async fn test_custom_user_agent_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", "duck-tester/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = DuckDuckGoConfig {
        user_agent: "duck-tester/2.0".to_string(),
        ..DuckDuckGoConfig::with_api_root(mock_server.uri())
    };
    let client = DuckDuckGoClient::new(config).unwrap();
    client
        .query_results("rust", &CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dot_segment_query_is_only_sent_as_parameter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("q", ".."))
        .respond_with(ResponseTemplate::new(200).set_body_json(ferrara_with_q()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(query_param_is_missing("q"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ferrara_without_q()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let answer = client_for(&mock_server)
        .query_results("..", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(answer.abstract_.heading, "Ferrara");
    assert!(answer.infobox.is_empty());
}

#[tokio::test]
async fn test_empty_query_uses_default_term() {
    let mock_server = MockServer::start().await;
    let empty = || ResponseTemplate::new(200).set_body_json(serde_json::json!({}));

    mount_variants(&mock_server, DEFAULT_QUERY, empty(), empty()).await;

    let client = client_for(&mock_server);
    client
        .query_results("", &CancellationToken::new())
        .await
        .unwrap();
}

// =============================================================================
// Reconciliation end to end
// =============================================================================

#[tokio::test]
async fn test_answers_are_reconciled() {
    let mock_server = MockServer::start().await;

    mount_variants(
        &mock_server,
        "ferrara",
        ResponseTemplate::new(200).set_body_json(ferrara_with_q()),
        ResponseTemplate::new(200).set_body_json(ferrara_without_q()),
    )
    .await;

    let client = client_for(&mock_server);
    let answer = client
        .query_results("ferrara", &CancellationToken::new())
        .await
        .unwrap();

    // As-parameter wins where it has a value
    assert_eq!(answer.abstract_.heading, "Ferrara");
    assert_eq!(
        answer.abstract_.text_summary,
        "Ferrara is a city in Emilia-Romagna, Italy."
    );
    assert_eq!(answer.related_topics.len(), 1);
    assert_eq!(answer.related_topics[0].icon.width, 32);

    // As-path fills the gaps
    assert_eq!(answer.abstract_.summary, "<b>Ferrara</b> is a city");
    let labels: Vec<&str> = answer.infobox.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Country", "Population"]);
    assert_eq!(answer.results.len(), 1);
    assert_eq!(answer.results[0].url, "https://www.comune.fe.it/");

    assert_eq!(answer.response_type, "A");
    assert!(!answer.is_empty());
}

#[tokio::test]
async fn test_calculator_answer_from_parameter_variant() {
    let mock_server = MockServer::start().await;

    mount_variants(
        &mock_server,
        "6*7",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Answer": "42",
            "AnswerType": "calc",
            "Type": "E"
        })),
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Answer": "",
            "AnswerType": "",
            "Type": ""
        })),
    )
    .await;

    let client = client_for(&mock_server);
    let answer = client
        .query_results("6*7", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(answer.answer.instant_answer, "42");
    assert_eq!(answer.answer.answer_type, "calc");
    assert_eq!(answer.response_type, "E");
}

// =============================================================================
// Degradation
// =============================================================================

#[tokio::test]
async fn test_server_error_on_one_variant_keeps_the_other() {
    let mock_server = MockServer::start().await;

    mount_variants(
        &mock_server,
        "ferrara",
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
        ResponseTemplate::new(200).set_body_json(ferrara_without_q()),
    )
    .await;

    let client = client_for(&mock_server);
    let answer = client
        .query_results("ferrara", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(answer.abstract_.heading, "Ferrara (city)");
    assert_eq!(answer.infobox.len(), 2);
    assert_eq!(answer.related_topics[0].url, "https://duckduckgo.com/Este");
}

#[tokio::test]
async fn test_malformed_json_on_one_variant_keeps_the_other() {
    let mock_server = MockServer::start().await;

    mount_variants(
        &mock_server,
        "ferrara",
        ResponseTemplate::new(200).set_body_json(ferrara_with_q()),
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let client = client_for(&mock_server);
    let answer = client
        .query_results("ferrara", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(answer.abstract_.heading, "Ferrara");
    assert!(answer.infobox.is_empty());
    assert!(answer.abstract_.summary.is_empty());
}

#[tokio::test]
async fn test_both_variants_failing_gives_empty_answer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let answer = client
        .query_results("ferrara", &CancellationToken::new())
        .await
        .unwrap();

    assert!(answer.is_empty());
}

#[tokio::test]
async fn test_rate_limit_degrades_silently() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .query_results("test", &CancellationToken::new())
        .await;

    assert!(result.is_ok_and(|answer| answer.is_empty()));
}

#[tokio::test]
async fn test_fetcher_returns_none_for_non_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = Fetcher::new(&DuckDuckGoConfig::with_api_root(mock_server.uri())).unwrap();
    let tree = fetcher
        .fetch(RequestVariant::AsPath, "missing", &CancellationToken::new())
        .await
        .unwrap();

    assert!(tree.is_none());
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn test_cancel_before_fetch_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ferrara_with_q()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let session = QuerySession::new(Arc::new(client_for(&mock_server)));
    session.cancel();

    let answer = session.run("ferrara").await.unwrap();
    assert!(answer.is_empty());
}

#[tokio::test]
async fn test_cancel_mid_flight_aborts_promptly() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ferrara_with_q())
                .set_delay(Duration::from_secs(8)),
        )
        .mount(&mock_server)
        .await;

    let session = QuerySession::new(Arc::new(client_for(&mock_server)));
    let handle = session.handle();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
    });

    let start = Instant::now();
    let answer = session.run("ferrara").await.unwrap();

    assert!(start.elapsed() < Duration::from_secs(4));
    assert!(answer.is_empty());
    assert!(session.is_cancelled());
}

#[tokio::test]
async fn test_cancel_from_os_thread_mid_flight() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(8)))
        .mount(&mock_server)
        .await;

    let session = QuerySession::new(Arc::new(client_for(&mock_server)));
    let handle = session.handle();

    let canceller = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(100));
        handle.cancel();
    });

    let start = Instant::now();
    let answer = session.run("ferrara").await.unwrap();
    canceller.join().unwrap();

    assert!(start.elapsed() < Duration::from_secs(4));
    assert!(answer.is_empty());
}

#[tokio::test]
async fn test_session_exposes_current_config() {
    let mock_server = MockServer::start().await;
    let session = QuerySession::new(Arc::new(client_for(&mock_server)));

    assert_eq!(session.current_config().api_root, mock_server.uri());
    assert_eq!(session.current_config().timeout_secs, 10);
}
