use quiz_core::model::{QuestionDraft, QuestionId};
use storage::json::{JsonQuestionFile, to_json};
use storage::repository::{QuestionRepository, Storage, StorageError};

#[tokio::test]
async fn json_file_loads_written_questions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("questions.json");

    let questions = vec![
        QuestionDraft::new("Borrow checker?", ["Rust", "Go"], "Rust")
            .validate(QuestionId::new(5))
            .unwrap(),
        QuestionDraft::new("Ferris is a?", ["Crab", "Gopher"], "Crab")
            .validate(QuestionId::new(6))
            .unwrap(),
    ];
    tokio::fs::write(&path, to_json(&questions).unwrap())
        .await
        .expect("write questions");

    let storage = Storage::json_file(&path);
    let loaded = storage.questions.list_questions().await.unwrap();
    assert_eq!(loaded, questions);
}

#[tokio::test]
async fn json_file_mixes_explicit_and_missing_ids() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("questions.json");
    tokio::fs::write(
        &path,
        r#"[
            {"question": "first", "options": ["a", "b"], "answer": "a"},
            {"id": 1, "question": "second", "options": ["a", "b"], "answer": "b"}
        ]"#,
    )
    .await
    .expect("write questions");

    let loaded = JsonQuestionFile::new(&path).list_questions().await.unwrap();
    let ids: Vec<_> = loaded.iter().map(|q| q.id().value()).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(loaded[1].text(), "second");
}

#[tokio::test]
async fn json_file_rejects_invalid_entry_with_index() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("questions.json");
    tokio::fs::write(
        &path,
        r#"[
            {"question": "ok", "options": ["a", "b"], "answer": "a"},
            {"question": "only one option", "options": ["a"], "answer": "a"}
        ]"#,
    )
    .await
    .expect("write questions");

    let err = JsonQuestionFile::new(&path)
        .list_questions()
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidQuestion { index: 1, .. }));
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = JsonQuestionFile::new(dir.path().join("nope.json"))
        .list_questions()
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Io(_)));
}

#[tokio::test]
async fn bundled_storage_has_questions() {
    let questions = Storage::bundled().questions.list_questions().await.unwrap();
    assert!(!questions.is_empty());
}
