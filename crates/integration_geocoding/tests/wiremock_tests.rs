//! Integration tests for provider adapters and transport using wiremock
//!
//! Each built-in provider is driven end to end: request built by the adapter,
//! carried by `HttpTransport` against a mock server, and normalized back into
//! candidates.

use std::time::Duration;

use domain::{AddressCandidate, GeocodeQuery, ProviderAdapter};
use integration_geocoding::{
    GeocodingConfig, GeocodingError, HttpTransport, Provider, ProviderKind, Transport,
};
use wiremock::{
    Mock, MockServer, Request, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Create a transport suitable for the mock server
///
/// # Panics
///
/// Panics if the transport cannot be created.
fn transport() -> HttpTransport {
    HttpTransport::new(&GeocodingConfig::for_testing()).expect("transport")
}

/// Point a built-in provider at the mock server
fn provider(kind: ProviderKind, server: &MockServer, route: &str) -> Provider {
    Provider::builtin(kind).with_endpoint(format!("{}{route}", server.uri()))
}

async fn search(provider: &Provider, query: &GeocodeQuery) -> Vec<AddressCandidate> {
    let spec = provider.build_request(query).expect("request");
    let raw = transport().execute(&spec).await.expect("transport");
    provider.normalize(&raw).expect("normalize")
}

fn assert_lon_lat(candidate: &AddressCandidate, lon: f64, lat: f64) {
    assert!(
        (candidate.longitude() - lon).abs() < 1e-6,
        "longitude {} != {lon}",
        candidate.longitude()
    );
    assert!(
        (candidate.latitude() - lat).abs() < 1e-6,
        "latitude {} != {lat}",
        candidate.latitude()
    );
}

// ============================================================================
// Captured payloads
// ============================================================================

fn nominatim_payload() -> serde_json::Value {
    serde_json::json!([
        {
            "place_id": 240_109_189,
            "licence": "Data © OpenStreetMap contributors, ODbL 1.0. https://osm.org/copyright",
            "osm_type": "relation",
            "osm_id": 62422,
            "lat": "52.5170365",
            "lon": "13.3888599",
            "class": "boundary",
            "type": "administrative",
            "place_rank": 8,
            "importance": 0.852_933_7,
            "addresstype": "city",
            "name": "Berlin",
            "display_name": "Berlin, Deutschland",
            "address": {
                "city": "Berlin",
                "ISO3166-2-lvl4": "DE-BE",
                "country": "Deutschland",
                "country_code": "de"
            },
            "boundingbox": ["52.3382448", "52.6755087", "13.0883450", "13.7611609"]
        },
        {
            "place_id": 84_362_163,
            "lat": "41.9742924",
            "lon": "-71.6278513",
            "display_name": "Berlin, Worcester County, Massachusetts, United States",
            "address": {
                "town": "Berlin",
                "county": "Worcester County",
                "state": "Massachusetts",
                "postcode": "01503",
                "country": "United States",
                "country_code": "us"
            },
            "boundingbox": ["41.9342924", "42.0142924", "-71.6678513", "-71.5878513"]
        },
        {
            "place_id": 11,
            "lat": "44.4686732",
            "lon": "-71.1850897",
            "display_name": "Main Street 4, Berlin, Coos County, New Hampshire",
            "address": {
                "house_number": "4",
                "road": "Main Street",
                "city": "Berlin",
                "state": "New Hampshire",
                "country": "United States"
            }
        }
    ])
}

fn photon_payload() -> serde_json::Value {
    serde_json::json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [2.3483915, 48.8534951]},
                "properties": {
                    "osm_type": "R",
                    "osm_id": 7444,
                    "name": "Paris",
                    "type": "city",
                    "country": "France",
                    "state": "Île-de-France",
                    "extent": [2.224122, 48.902156, 2.4697602, 48.8155755]
                }
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-95.555513, 33.6617962]},
                "properties": {
                    "name": "Paris",
                    "city": "Paris",
                    "state": "Texas",
                    "postcode": "75460",
                    "country": "United States"
                }
            }
        ]
    })
}

fn bing_payload() -> serde_json::Value {
    serde_json::json!({
        "authenticationResultCode": "ValidCredentials",
        "statusCode": 200,
        "resourceSets": [{
            "estimatedTotal": 2,
            "resources": [
                {
                    "__type": "Location:http://schemas.microsoft.com/search/local/ws/rest/v1",
                    "name": "London, United Kingdom",
                    "point": {"type": "Point", "coordinates": [51.50732, -0.12765]},
                    "bbox": [51.28, -0.49, 51.69, 0.33],
                    "address": {
                        "adminDistrict": "England",
                        "countryRegion": "United Kingdom",
                        "formattedAddress": "London, United Kingdom",
                        "locality": "London"
                    }
                },
                {
                    "name": "London, ON",
                    "point": {"type": "Point", "coordinates": [42.98339, -81.23304]},
                    "address": {
                        "adminDistrict": "ON",
                        "countryRegion": "Canada",
                        "formattedAddress": "London, ON",
                        "locality": "London"
                    }
                }
            ]
        }]
    })
}

fn opencage_payload() -> serde_json::Value {
    serde_json::json!({
        "documentation": "https://opencagedata.com/api",
        "results": [
            {
                "components": {
                    "_type": "city",
                    "city": "Madrid",
                    "country": "España",
                    "state": "Comunidad de Madrid"
                },
                "formatted": "Madrid, Comunidad de Madrid, España",
                "geometry": {"lat": 40.4167047, "lng": -3.7035825},
                "bounds": {
                    "northeast": {"lat": 40.6438945, "lng": -3.5179163},
                    "southwest": {"lat": 40.3119774, "lng": -3.8889539}
                }
            },
            {
                "components": {
                    "_type": "village",
                    "town": "Madrid",
                    "state": "Iowa",
                    "country": "United States"
                },
                "formatted": "Madrid, Iowa, United States",
                "geometry": {"lat": 41.8766541, "lng": -93.8232771}
            }
        ],
        "status": {"code": 200, "message": "OK"},
        "total_results": 2
    })
}

// ============================================================================
// Direct transport
// ============================================================================

#[tokio::test]
async fn test_osm_search_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Berlin"))
        .and(query_param("format", "json"))
        .and(query_param("addressdetails", "1"))
        .and(query_param("limit", "5"))
        .and(query_param("accept-language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nominatim_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let osm = provider(ProviderKind::Osm, &server, "/search");
    let query = GeocodeQuery::new("Berlin")
        .with_limit(5)
        .with_language("en-US");
    let candidates = search(&osm, &query).await;

    assert_eq!(candidates.len(), 3);
    assert_lon_lat(&candidates[0], 13.388_859_9, 52.517_036_5);
    assert_lon_lat(&candidates[1], -71.627_851_3, 41.974_292_4);
    assert_lon_lat(&candidates[2], -71.185_089_7, 44.468_673_2);

    assert_eq!(candidates[0].original.formatted, "Berlin, Deutschland");
    assert_eq!(candidates[1].address.city.as_deref(), Some("Berlin"));
    assert_eq!(candidates[1].address.postcode.as_deref(), Some("01503"));
    assert_eq!(candidates[2].address.road.as_deref(), Some("Main Street"));
    assert_eq!(candidates[2].address.house_number.as_deref(), Some("4"));
    assert!(candidates[2].bounding_box.is_none());
}

#[tokio::test]
async fn test_mapquest_sends_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nominatim/v1/search.php"))
        .and(query_param("key", "mq-secret"))
        .and(query_param("q", "Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nominatim_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let mapquest = provider(ProviderKind::MapQuest, &server, "/nominatim/v1/search.php");
    let query = GeocodeQuery::new("Berlin").with_api_key("mq-secret");
    let candidates = search(&mapquest, &query).await;

    assert_eq!(candidates.len(), 3);
    assert_lon_lat(&candidates[0], 13.388_859_9, 52.517_036_5);
}

#[tokio::test]
async fn test_photon_search_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("q", "Paris"))
        .and(query_param("lang", "fr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photon_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let photon = provider(ProviderKind::Photon, &server, "/api/");
    let query = GeocodeQuery::new("Paris").with_language("fr-FR");
    let candidates = search(&photon, &query).await;

    assert_eq!(candidates.len(), 2);
    assert_lon_lat(&candidates[0], 2.348_391_5, 48.853_495_1);
    assert_lon_lat(&candidates[1], -95.555_513, 33.661_796_2);
    assert_eq!(candidates[1].address.state.as_deref(), Some("Texas"));
    assert!(candidates[0].bounding_box.is_some());
}

#[tokio::test]
async fn test_opencage_search_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/v1/json"))
        .and(query_param("q", "Madrid"))
        .and(query_param("key", "oc-secret"))
        .and(query_param("no_annotations", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(opencage_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let opencage = provider(ProviderKind::OpenCage, &server, "/geocode/v1/json");
    let query = GeocodeQuery::new("Madrid").with_api_key("oc-secret");
    let candidates = search(&opencage, &query).await;

    assert_eq!(candidates.len(), 2);
    assert_lon_lat(&candidates[0], -3.703_582_5, 40.416_704_7);
    assert_lon_lat(&candidates[1], -93.823_277_1, 41.876_654_1);
    assert_eq!(candidates[1].address.city.as_deref(), Some("Madrid"));
}

#[tokio::test]
async fn test_zero_results_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let osm = provider(ProviderKind::Osm, &server, "/search");
    let candidates = search(&osm, &GeocodeQuery::new("qwxzqwxz")).await;
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_server_error_is_request_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let osm = provider(ProviderKind::Osm, &server, "/search");
    let spec = osm.build_request(&GeocodeQuery::new("Berlin")).unwrap();
    let result = transport().execute(&spec).await;

    assert!(matches!(result, Err(GeocodingError::RequestFailed(_))));
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let osm = provider(ProviderKind::Osm, &server, "/search");
    let spec = osm.build_request(&GeocodeQuery::new("Berlin")).unwrap();
    let result = transport().execute(&spec).await;

    assert!(matches!(result, Err(GeocodingError::ParseError(_))));
}

#[tokio::test]
async fn test_unreachable_host_fails() {
    let osm = Provider::builtin(ProviderKind::Osm).with_endpoint("http://127.0.0.1:9/search");
    let spec = osm.build_request(&GeocodeQuery::new("Berlin")).unwrap();
    let result = transport().execute(&spec).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().is_retryable());
}

// ============================================================================
// Callback transport
// ============================================================================

/// Respond with the payload wrapped in the callback named by `jsonp`
fn jsonp_responder(
    payload: serde_json::Value,
    delay: Duration,
) -> impl Fn(&Request) -> ResponseTemplate {
    move |request: &Request| {
        let callback = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "jsonp")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/javascript")
            .set_body_string(format!("{callback}({payload});"))
            .set_delay(delay)
    }
}

#[tokio::test]
async fn test_bing_callback_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/REST/v1/Locations"))
        .and(query_param("query", "London"))
        .and(query_param("key", "bing-secret"))
        .and(query_param("includeNeighborhood", "0"))
        .and(query_param("maxResults", "5"))
        .respond_with(jsonp_responder(bing_payload(), Duration::ZERO))
        .expect(1)
        .mount(&server)
        .await;

    let bing = provider(ProviderKind::Bing, &server, "/REST/v1/Locations");
    let query = GeocodeQuery::new("London")
        .with_api_key("bing-secret")
        .with_limit(5);
    let spec = bing.build_request(&query).unwrap();
    let transport = transport();
    let raw = transport.execute(&spec).await.unwrap();
    let candidates = bing.normalize(&raw).unwrap();

    assert_eq!(candidates.len(), 2);
    // Bing reports [lat, lon]
    assert_lon_lat(&candidates[0], -0.127_65, 51.507_32);
    assert_lon_lat(&candidates[1], -81.233_04, 42.983_39);
    assert_eq!(candidates[0].original.formatted, "London, United Kingdom");
    assert_eq!(transport.pending_callbacks(), 0);
}

#[tokio::test]
async fn test_callback_with_wrong_name_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("someone_else({\"resourceSets\": []})"),
        )
        .mount(&server)
        .await;

    let bing = provider(ProviderKind::Bing, &server, "/REST/v1/Locations");
    let spec = bing
        .build_request(&GeocodeQuery::new("London").with_api_key("k"))
        .unwrap();
    let transport = transport();
    let result = transport.execute(&spec).await;

    assert!(matches!(result, Err(GeocodingError::CallbackNotInvoked(_))));
    assert_eq!(transport.pending_callbacks(), 0);
}

#[tokio::test]
async fn test_abandoned_callback_is_released() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(jsonp_responder(
            bing_payload(),
            Duration::from_millis(300),
        ))
        .mount(&server)
        .await;

    let bing = provider(ProviderKind::Bing, &server, "/REST/v1/Locations");
    let spec = bing
        .build_request(&GeocodeQuery::new("London").with_api_key("k"))
        .unwrap();
    let transport = transport();

    let waiting = tokio::spawn({
        let transport = transport.clone();
        async move { transport.execute(&spec).await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(transport.pending_callbacks(), 1);

    waiting.abort();
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(transport.pending_callbacks(), 0);
}
