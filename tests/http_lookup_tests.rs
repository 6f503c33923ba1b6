//! `HttpLookup` against wiremock servers: request paths, status handling,
//! and body decoding at the service boundary.
//!
//! The lookup uses reqwest's blocking client, which must not be created,
//! used, or dropped on an async runtime thread, so every call runs inside
//! `tokio::task::spawn_blocking`.

use std::net::TcpListener;
use std::time::Duration;

use locsel::domain::{LocationLookup, LookupFailure, LookupResult};
use locsel::infrastructure::HttpLookup;
use reqwest::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn call<T, F>(server: &MockServer, f: F) -> LookupResult<T>
where
    T: Send + 'static,
    F: FnOnce(&HttpLookup) -> LookupResult<T> + Send + 'static,
{
    let base = Url::parse(&server.uri()).expect("mock server uri");
    tokio::task::spawn_blocking(move || {
        let lookup = HttpLookup::new(base, Some(Duration::from_secs(5))).expect("client build");
        f(&lookup)
    })
    .await
    .expect("task")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_countries_decodes_names_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["India", "USA"])))
        .expect(1)
        .mount(&server)
        .await;

    let countries = call(&server, |lookup| lookup.list_countries()).await;
    assert_eq!(countries, Ok(vec!["India".to_string(), "USA".to_string()]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_states_requests_country_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/country=India/states"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!(["Maharashtra", "Karnataka"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let states = call(&server, |lookup| lookup.list_states("India")).await;
    assert_eq!(
        states,
        Ok(vec!["Maharashtra".to_string(), "Karnataka".to_string()])
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_cities_requests_country_and_state_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/country=India/state=Maharashtra/cities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["Pune"])))
        .expect(1)
        .mount(&server)
        .await;

    let cities = call(&server, |lookup| lookup.list_cities("India", "Maharashtra")).await;
    assert_eq!(cities, Ok(vec!["Pune".to_string()]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn server_error_maps_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/country=India/states"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let states = call(&server, |lookup| lookup.list_states("India")).await;
    assert_eq!(states, Err(LookupFailure::Status(500)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_path_maps_to_status_404() {
    let server = MockServer::start().await;

    let cities = call(&server, |lookup| lookup.list_cities("Atlantis", "Nowhere")).await;
    assert_eq!(cities, Err(LookupFailure::Status(404)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn non_array_body_maps_to_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "countries": ["India"] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let countries = call(&server, |lookup| lookup.list_countries()).await;
    assert!(matches!(countries, Err(LookupFailure::Decode(_))));
}

#[test]
fn refused_connection_maps_to_transport() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let base = Url::parse(&format!("http://{addr}")).expect("url");
    let lookup = HttpLookup::new(base, Some(Duration::from_secs(5))).expect("client build");

    let countries = lookup.list_countries();
    assert!(matches!(countries, Err(LookupFailure::Transport(_))));
}
