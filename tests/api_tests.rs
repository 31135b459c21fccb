//! Integration tests for the service clients using WireMock
//!
//! Every endpoint points at one mock server, so no real network is used.

use pretty_assertions::assert_eq;
use skycast::{
    api::{ApiClient, USER_AGENT},
    config::Endpoints,
    error::{FetchError, ResolutionError},
    state::ConditionKind,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(Endpoints::all_at(&server.uri())).expect("client")
}

fn wttr_body(temp: &str, code: &str) -> serde_json::Value {
    serde_json::json!({
        "current_condition": [{
            "temp_C": temp,
            "temp_F": "64",
            "weatherCode": code,
            "weatherDesc": [{"value": "Cloudy"}]
        }],
        "weather": [
            {"date": "2024-05-01", "avgtempC": "16", "maxtempC": "20", "mintempC": "11"},
            {"date": "2024-05-02", "avgtempC": "14", "maxtempC": "17", "mintempC": "10"},
            {"date": "2024-05-03", "avgtempC": "12", "maxtempC": "15", "mintempC": "9"}
        ]
    })
}

// =============================================================================
// IP Inference
// =============================================================================

#[tokio::test]
async fn test_locate_by_ip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "203.0.113.7",
            "city": "Berlin",
            "region": "Berlin",
            "country": "DE",
            "loc": "52.5244,13.4105"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let location = client_for(&server).locate_by_ip().await.unwrap();

    assert_eq!(location.name, "Berlin");
    assert_eq!(location.lat, 52.5244);
    assert_eq!(location.lon, 13.4105);
}

#[tokio::test]
async fn test_locate_by_ip_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client_for(&server).locate_by_ip().await.unwrap_err();

    assert!(matches!(err, ResolutionError::Status(status) if status.as_u16() == 429));
    assert!(err.to_string().starts_with("Failed to geocode city"));
}

#[tokio::test]
async fn test_locate_by_ip_invalid_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).locate_by_ip().await.unwrap_err();
    assert!(matches!(err, ResolutionError::Decode(_)));
}

// =============================================================================
// Geocoding
// =============================================================================

#[tokio::test]
async fn test_geocode_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Paris"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "place_id": 88066702,
            "lat": "48.8588897",
            "lon": "2.3200410",
            "display_name": "Paris, Île-de-France, France"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let location = client_for(&server).geocode_city("Paris").await.unwrap();

    assert_eq!(location.name, "Paris");
    assert!((location.lat - 48.8588897).abs() < 1e-9);
    assert!((location.lon - 2.3200410).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_city_with_spaces() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "lat": "40.7127281",
            "lon": "-74.0060152"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let location = client_for(&server).geocode_city("New York").await.unwrap();
    assert_eq!(location.name, "New York");
    assert!(location.lon < 0.0);
}

#[tokio::test]
async fn test_geocode_city_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .geocode_city("Atlantis")
        .await
        .unwrap_err();

    assert!(matches!(err, ResolutionError::NotFound(ref city) if city == "Atlantis"));
    assert_eq!(
        err.to_string(),
        "Failed to geocode city: no match for 'Atlantis'"
    );
}

#[tokio::test]
async fn test_geocode_city_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).geocode_city("Paris").await.unwrap_err();
    assert!(matches!(err, ResolutionError::Status(status) if status.as_u16() == 503));
}

// =============================================================================
// Weather Provider
// =============================================================================

#[tokio::test]
async fn test_weather_current() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Paris"))
        .and(query_param("format", "j1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wttr_body("18", "119")))
        .expect(1)
        .mount(&server)
        .await;

    let session = client_for(&server).open_weather_session().unwrap();
    let snapshot = session.current("Paris").await.unwrap();

    assert_eq!(snapshot.temperature, 18);
    assert_eq!(snapshot.condition, ConditionKind::Cloudy);
    let temps: Vec<i32> = snapshot.daily.iter().map(|d| d.temperature).collect();
    assert_eq!(temps, vec![16, 14, 12]);
    assert!(snapshot.daily.windows(2).all(|w| w[0].date < w[1].date));
}

#[tokio::test]
async fn test_weather_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Paris"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let session = client_for(&server).open_weather_session().unwrap();
    let err = session.current("Paris").await.unwrap_err();

    assert!(matches!(err, FetchError::Status(status) if status.as_u16() == 500));
}

#[tokio::test]
async fn test_weather_missing_conditions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Paris"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"current_condition": [], "weather": []})),
        )
        .mount(&server)
        .await;

    let session = client_for(&server).open_weather_session().unwrap();
    let err = session.current("Paris").await.unwrap_err();

    assert!(matches!(err, FetchError::NoConditions(ref city) if city == "Paris"));
}
