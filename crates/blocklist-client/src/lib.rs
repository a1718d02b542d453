//! Blocked phone number registry API client.

mod client;
mod error;
mod types;

pub use client::BlocklistClient;
pub use error::BlocklistError;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> BlocklistClient {
        BlocklistClient::new(mock_server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_health_check_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(!client.health_check().await);
    }

    #[tokio::test]
    async fn test_search_found() {
        let mock_server = MockServer::start().await;

        let entry = serde_json::json!({
            "id": 7,
            "phoneNumber": "+14155551234",
            "reason": "Bounced check",
            "storeLocation": "Main St",
            "incidentDate": "2024-03-15",
            "createdAt": "2024-03-15 14:30:00",
            "checkAmount": 125.5,
            "notes": ""
        });

        Mock::given(method("GET"))
            .and(path("/api/blocklist"))
            .and(query_param("phone", "+14155551234"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&entry))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let found = client.search("+14155551234").await.unwrap().unwrap();

        assert_eq!(found.id, Some(7));
        assert_eq!(found.phone_number, "+14155551234");
        assert_eq!(found.store_location, "Main St");
        assert_eq!(found.reason, "Bounced check");
        assert_eq!(found.check_amount, Some(125.5));
        assert_eq!(found.incident_date.as_deref(), Some("2024-03-15"));
    }

    #[tokio::test]
    async fn test_search_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/blocklist"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = assert_ok!(client.search("+14155551234").await);
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_search_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/blocklist"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Database error"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.search("+14155551234").await;

        match result {
            Err(BlocklistError::Api { status, body }) => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "Database error");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/blocklist"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.search("+14155551234").await;
        assert!(matches!(result, Err(BlocklistError::Json(_))));
    }

    #[tokio::test]
    async fn test_create_sends_camel_case_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/blocklist"))
            .and(body_json(serde_json::json!({
                "phoneNumber": "+14155551234",
                "reason": "Fraud",
                "storeLocation": "Downtown",
                "checkAmount": 42.0,
                "notes": "second visit"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let entry = NewEntry {
            phone_number: "+14155551234".into(),
            reason: "Fraud".into(),
            store_location: "Downtown".into(),
            check_amount: Some(42.0),
            notes: "second visit".into(),
        };

        assert_ok!(client.create(&entry).await);
    }

    #[tokio::test]
    async fn test_create_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/blocklist"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Invalid check amount"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let entry = NewEntry {
            phone_number: "+14155551234".into(),
            reason: "Fraud".into(),
            store_location: "Downtown".into(),
            check_amount: None,
            notes: String::new(),
        };

        let result = client.create(&entry).await;
        assert_eq!(result.unwrap_err().status().map(|s| s.as_u16()), Some(400));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/blocklist"))
            .and(query_param("phone", "+14155551234"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Unblocked"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert_ok!(client.delete("+14155551234").await);
    }

    #[tokio::test]
    async fn test_delete_not_found_is_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/blocklist"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.delete("+14155551234").await;
        assert!(matches!(result, Err(BlocklistError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list() {
        let mock_server = MockServer::start().await;

        let entries = serde_json::json!([
            {"id": 2, "phoneNumber": "+16666666666", "createdAt": "2024-03-16T09:00:00Z"},
            {"id": 1, "phoneNumber": "+15555555555", "createdAt": "2024-03-15T14:30:00Z"}
        ]);

        Mock::given(method("GET"))
            .and(path("/api/blocklist/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&entries))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let listed = client.list().await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, 2);
        assert_eq!(listed[1].phone_number, "+15555555555");
    }
}
