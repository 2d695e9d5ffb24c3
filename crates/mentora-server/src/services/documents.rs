//! Document Upload & Processing Pipeline
//!
//! Fans out one upload-and-process job per file, waits for every job to
//! settle, and reduces the outcomes into a single combined result in input
//! order. Per-file failures are captured at the job boundary and never
//! abort or cancel sibling jobs; only precondition violations reject the
//! whole batch, before any I/O.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;

use mentora::{
    BlobStorage, CombinedResult, DocumentFile, DomainError, ProcessingFunction, ProcessingRequest,
    UploadOutcome, MAX_TOTAL_UPLOAD_BYTES,
};

/// Orchestrates the per-file upload + remote processing jobs of one batch
pub struct DocumentPipeline<S: BlobStorage, P: ProcessingFunction> {
    storage: Arc<S>,
    processor: Arc<P>,
}

impl<S: BlobStorage, P: ProcessingFunction> DocumentPipeline<S, P> {
    pub fn new(storage: Arc<S>, processor: Arc<P>) -> Self {
        Self { storage, processor }
    }

    /// Process a batch of course documents for one owner.
    ///
    /// After the preconditions pass, the call always returns a combined
    /// result: individual failures appear as labeled entries inside it,
    /// never as an error.
    pub async fn process_documents(
        &self,
        files: Vec<DocumentFile>,
        instruction: &str,
        owner_id: &str,
    ) -> Result<CombinedResult, DomainError> {
        check_preconditions(&files, owner_id)?;

        tracing::info!(
            "Processing {} document(s) for user {}",
            files.len(),
            owner_id
        );

        // All jobs are launched before any is awaited; join_all settles
        // every one of them and preserves input order.
        let jobs = files
            .iter()
            .map(|file| self.run_job(file, instruction, owner_id));
        let outcomes = join_all(jobs).await;

        let failed = outcomes.iter().filter(|o| !o.succeeded).count();
        if failed > 0 {
            tracing::warn!("{}/{} document(s) failed in this batch", failed, outcomes.len());
        }

        Ok(CombinedResult::from_outcomes(outcomes))
    }

    /// One file's job; any error becomes a failed outcome naming the file
    async fn run_job(
        &self,
        file: &DocumentFile,
        instruction: &str,
        owner_id: &str,
    ) -> UploadOutcome {
        match self.upload_and_process(file, instruction, owner_id).await {
            Ok(text) => UploadOutcome::success(&file.name, text),
            Err(e) => {
                tracing::warn!("Document {} failed: {}", file.name, e);
                UploadOutcome::failure(
                    &file.name,
                    format!("Failed to process {}: {}", file.name, e),
                )
            }
        }
    }

    async fn upload_and_process(
        &self,
        file: &DocumentFile,
        instruction: &str,
        owner_id: &str,
    ) -> Result<String, DomainError> {
        let key = file.storage_key(owner_id, Utc::now().timestamp_millis());

        self.storage
            .put(&key, file.bytes.clone(), &file.content_type)
            .await?;

        self.processor
            .process(&ProcessingRequest {
                file_path: key,
                title: file.name.clone(),
                user_id: owner_id.to_string(),
                prompt: instruction.to_string(),
            })
            .await
    }
}

/// Checked before any upload starts; a violation rejects the whole batch
fn check_preconditions(files: &[DocumentFile], owner_id: &str) -> Result<(), DomainError> {
    if owner_id.trim().is_empty() {
        return Err(DomainError::validation("User identity is required"));
    }

    if files.is_empty() {
        return Err(DomainError::validation("At least one file is required"));
    }

    if let Some(file) = files.iter().find(|f| !f.is_allowed_type()) {
        return Err(DomainError::validation(format!(
            "Unsupported file format: {}. Supported formats: PDF, DOC, DOCX, PPT, PPTX, TXT",
            file.name
        )));
    }

    let total: usize = files.iter().map(|f| f.bytes.len()).sum();
    if total > MAX_TOTAL_UPLOAD_BYTES {
        return Err(DomainError::validation("Total file size exceeds 20MB limit"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    struct MockStorage {
        puts: AtomicUsize,
        /// File names (post-sanitizing) whose upload should fail
        fail_keys_containing: Option<String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                puts: AtomicUsize::new(0),
                fail_keys_containing: None,
            }
        }

        fn failing_on(marker: &str) -> Self {
            Self {
                puts: AtomicUsize::new(0),
                fail_keys_containing: Some(marker.to_string()),
            }
        }
    }

    #[async_trait]
    impl BlobStorage for MockStorage {
        async fn put(
            &self,
            key: &str,
            _bytes: Vec<u8>,
            _content_type: &str,
        ) -> Result<(), DomainError> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            if let Some(marker) = &self.fail_keys_containing {
                if key.contains(marker.as_str()) {
                    return Err(DomainError::Transport("connection reset".to_string()));
                }
            }
            Ok(())
        }
    }

    struct MockProcessor {
        calls: AtomicUsize,
    }

    impl MockProcessor {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ProcessingFunction for MockProcessor {
        async fn process(&self, request: &ProcessingRequest) -> Result<String, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("processed {}", request.title))
        }
    }

    fn pdf(name: &str, size: usize) -> DocumentFile {
        DocumentFile {
            name: name.to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![0u8; size],
        }
    }

    fn pipeline(
        storage: MockStorage,
        processor: MockProcessor,
    ) -> (
        DocumentPipeline<MockStorage, MockProcessor>,
        Arc<MockStorage>,
        Arc<MockProcessor>,
    ) {
        let storage = Arc::new(storage);
        let processor = Arc::new(processor);
        (
            DocumentPipeline::new(storage.clone(), processor.clone()),
            storage,
            processor,
        )
    }

    #[tokio::test]
    async fn test_empty_batch_rejected_before_any_io() {
        let (pipeline, storage, processor) = pipeline(MockStorage::new(), MockProcessor::new());

        let err = pipeline
            .process_documents(vec![], "summarize", "user-1")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: At least one file is required");
        assert_eq!(storage.puts.load(Ordering::SeqCst), 0);
        assert_eq!(processor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_owner_rejected_before_any_io() {
        let (pipeline, storage, _) = pipeline(MockStorage::new(), MockProcessor::new());

        let err = pipeline
            .process_documents(vec![pdf("a.pdf", 16)], "summarize", "  ")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Validation error: User identity is required");
        assert_eq!(storage.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsupported_type_rejects_whole_batch() {
        let (pipeline, storage, _) = pipeline(MockStorage::new(), MockProcessor::new());

        let exe = DocumentFile {
            name: "b.exe".to_string(),
            content_type: "application/x-msdownload".to_string(),
            bytes: vec![0u8; 16],
        };

        let err = pipeline
            .process_documents(vec![pdf("a.pdf", 16), exe], "summarize", "user-1")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Unsupported file format: b.exe"));
        assert_eq!(storage.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_oversized_batch_rejects_whole_batch() {
        let (pipeline, storage, _) = pipeline(MockStorage::new(), MockProcessor::new());

        // Two valid files totalling 21 MB
        let files = vec![
            pdf("a.pdf", 11 * 1024 * 1024),
            pdf("b.pdf", 10 * 1024 * 1024),
        ];

        let err = pipeline
            .process_documents(files, "summarize", "user-1")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Validation error: Total file size exceeds 20MB limit"
        );
        assert_eq!(storage.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_one_failing_file_does_not_abort_siblings() {
        let (pipeline, storage, processor) =
            pipeline(MockStorage::failing_on("b.pdf"), MockProcessor::new());

        let files = vec![pdf("a.pdf", 16), pdf("b.pdf", 16), pdf("c.pdf", 16)];

        let result = pipeline
            .process_documents(files, "summarize", "user-1")
            .await
            .unwrap();

        assert_eq!(result.outcomes.len(), 3);
        assert_eq!(result.outcomes[0].source_file_name, "a.pdf");
        assert_eq!(result.outcomes[1].source_file_name, "b.pdf");
        assert_eq!(result.outcomes[2].source_file_name, "c.pdf");

        assert!(result.outcomes[0].succeeded);
        assert!(!result.outcomes[1].succeeded);
        assert!(result.outcomes[2].succeeded);

        assert!(result.outcomes[1].text.contains("Failed to process b.pdf"));

        // Every file attempted its upload; only the survivors reached the
        // processor
        assert_eq!(storage.puts.load(Ordering::SeqCst), 3);
        assert_eq!(processor.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_combined_text_joins_in_input_order() {
        let (pipeline, _, _) = pipeline(MockStorage::new(), MockProcessor::new());

        let result = pipeline
            .process_documents(
                vec![pdf("first.pdf", 16), pdf("second.pdf", 16)],
                "summarize",
                "user-1",
            )
            .await
            .unwrap();

        assert_eq!(
            result.combined_text,
            "processed first.pdf\n\nprocessed second.pdf"
        );
    }
}
