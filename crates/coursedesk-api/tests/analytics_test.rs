//! Analytics integration tests.

mod helpers;

use helpers::{setup_test_app, submit_feedback, upload_file};
use serde_json::Value;

#[tokio::test]
async fn test_analytics_on_empty_data_dir() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/analytics").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["uploadedFilesCount"], 0);
    assert_eq!(body["feedbackCount"], 0);
    assert_eq!(body["recentUploads"], serde_json::json!([]));
}

#[tokio::test]
async fn test_analytics_counts_uploads_and_feedback() {
    let app = setup_test_app().await;
    let client = app.client();

    for name in ["a.txt", "b.txt", "c.txt"] {
        let response = upload_file(client, name, "text/plain", b"x".to_vec()).await;
        assert_eq!(response.status_code(), 200);
    }
    submit_feedback(client, "Ada").await;
    submit_feedback(client, "Alan").await;

    let body: Value = client.get("/api/analytics").await.json();
    assert_eq!(body["uploadedFilesCount"], 3);
    assert_eq!(body["feedbackCount"], 2);

    let recent = body["recentUploads"].as_array().expect("recentUploads array");
    assert_eq!(recent.len(), 3);
    let millis: Vec<i64> = recent
        .iter()
        .map(|u| u["uploadedAtMillis"].as_i64().expect("uploadedAtMillis"))
        .collect();
    assert!(millis.windows(2).all(|w| w[0] >= w[1]), "not newest first: {:?}", millis);
    for upload in recent {
        assert!(upload["filename"].is_string());
        assert!(upload["uploadedAt"].is_string());
        assert_eq!(upload["sizeBytes"], 1);
    }
}

#[tokio::test]
async fn test_recent_uploads_capped_at_five() {
    let app = setup_test_app().await;
    std::fs::create_dir_all(app.uploads_dir()).unwrap();
    for millis in 1..=7 {
        std::fs::write(app.uploads_dir().join(format!("{}000-doc.pdf", millis)), b"x").unwrap();
    }
    std::fs::write(app.uploads_dir().join("orphan.txt"), b"x").unwrap();

    let body: Value = app.client().get("/api/analytics").await.json();
    assert_eq!(body["uploadedFilesCount"], 8);

    let names: Vec<&str> = body["recentUploads"]
        .as_array()
        .expect("recentUploads array")
        .iter()
        .map(|u| u["filename"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "7000-doc.pdf",
            "6000-doc.pdf",
            "5000-doc.pdf",
            "4000-doc.pdf",
            "3000-doc.pdf"
        ]
    );
}
