use std::path::Path;

use conduit_astradb::{AstraUploadStager, AstraUploadStagerConfig, ConduitError, FileData};
use conduit_core::UploadStager;
use serde_json::{json, Value};

fn stager() -> AstraUploadStager {
    AstraUploadStager::new(AstraUploadStagerConfig::default())
}

fn file_data() -> FileData {
    FileData::new("file-1").with_source_name("report.pdf")
}

async fn stage(elements: &Value, dir: &Path) -> Vec<Value> {
    let input = dir.join("elements.json");
    std::fs::write(&input, serde_json::to_string(elements).unwrap()).unwrap();

    let output = stager()
        .run(&input, &file_data(), dir, "staged")
        .await
        .unwrap();
    assert_eq!(output, dir.join("staged.json"));

    serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap()
}

#[tokio::test]
async fn stages_element_into_astra_document_shape() {
    let dir = tempfile::tempdir().unwrap();
    let staged = stage(
        &json!([{"text": "hi", "embeddings": [0.1, 0.2], "source": "a"}]),
        dir.path(),
    )
    .await;

    assert_eq!(
        staged,
        vec![json!({
            "$vector": [0.1, 0.2],
            "content": "hi",
            "metadata": {"source": "a"}
        })]
    );
}

#[tokio::test]
async fn preserves_order_and_count() {
    let dir = tempfile::tempdir().unwrap();
    let elements: Vec<Value> = (0..7)
        .map(|i| json!({"text": format!("t{i}"), "embeddings": [i as f64], "index": i}))
        .collect();
    let staged = stage(&Value::Array(elements), dir.path()).await;

    assert_eq!(staged.len(), 7);
    for (i, record) in staged.iter().enumerate() {
        assert_eq!(record["content"], format!("t{i}"));
        assert_eq!(record["metadata"]["index"], i);
    }
}

#[tokio::test]
async fn missing_embeddings_and_text_stage_as_null() {
    let dir = tempfile::tempdir().unwrap();
    let staged = stage(&json!([{"source": "a"}]), dir.path()).await;

    assert_eq!(staged[0]["$vector"], Value::Null);
    assert_eq!(staged[0]["content"], Value::Null);
    assert_eq!(staged[0]["metadata"], json!({"source": "a"}));
}

#[tokio::test]
async fn metadata_never_contains_extracted_keys() {
    let dir = tempfile::tempdir().unwrap();
    let staged = stage(
        &json!([{"text": "hi", "embeddings": [0.5], "source": "a", "page": 3}]),
        dir.path(),
    )
    .await;

    let record = staged[0].as_object().unwrap();
    assert_eq!(record.len(), 3);
    let metadata = record["metadata"].as_object().unwrap();
    assert!(!metadata.contains_key("embeddings"));
    assert!(!metadata.contains_key("text"));
    assert_eq!(metadata.len(), 2);
}

#[tokio::test]
async fn empty_input_array_stages_to_empty_output() {
    let dir = tempfile::tempdir().unwrap();
    let staged = stage(&json!([]), dir.path()).await;
    assert!(staged.is_empty());
}

#[tokio::test]
async fn leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    stage(&json!([{"text": "hi"}]), dir.path()).await;
    assert!(!dir.path().join("staged.json.tmp").exists());
}

#[tokio::test]
async fn malformed_input_fails_with_staging_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("elements.json");
    std::fs::write(&input, "{ not a json array").unwrap();

    let err = stager()
        .run(&input, &file_data(), dir.path(), "staged")
        .await
        .unwrap_err();
    assert!(matches!(err, ConduitError::Staging(_)));
    assert!(!dir.path().join("staged.json").exists());
}

#[tokio::test]
async fn non_array_input_fails_with_staging_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("elements.json");
    std::fs::write(&input, r#"{"text": "hi"}"#).unwrap();

    let err = stager()
        .run(&input, &file_data(), dir.path(), "staged")
        .await
        .unwrap_err();
    assert!(matches!(err, ConduitError::Staging(_)));
}

#[tokio::test]
async fn unwritable_output_dir_fails_with_staging_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("elements.json");
    std::fs::write(&input, "[]").unwrap();

    let missing = dir.path().join("does-not-exist");
    let err = stager()
        .run(&input, &file_data(), &missing, "staged")
        .await
        .unwrap_err();
    assert!(matches!(err, ConduitError::Staging(_)));
}

#[tokio::test]
async fn missing_input_file_fails_with_staging_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = stager()
        .run(
            &dir.path().join("nope.json"),
            &file_data(),
            dir.path(),
            "staged",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ConduitError::Staging(_)));
}
