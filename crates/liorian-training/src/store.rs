//! Training record persistence.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use liorian_core::error::AppError;
use liorian_core::result::AppResult;
use liorian_core::traits::{Clock, ObjectStore};
use liorian_entity::training::{ProgressRecord, QuizResult, TrainingReport, UserTrainingData};

use crate::keys;

const JSON: &str = "application/json";
const PDF: &str = "application/pdf";

/// Where a saved object ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedObject {
    /// Object key.
    pub key: String,
    /// Public URL of the object.
    pub url: String,
}

/// Reads and writes training records on an object store.
#[derive(Debug, Clone)]
pub struct TrainingStore {
    objects: Arc<dyn ObjectStore>,
    clock: Arc<dyn Clock>,
}

impl TrainingStore {
    /// Creates a store over `objects`.
    pub fn new(objects: Arc<dyn ObjectStore>, clock: Arc<dyn Clock>) -> Self {
        Self { objects, clock }
    }

    /// Backend name of the underlying object store.
    pub fn provider_type(&self) -> &str {
        self.objects.provider_type()
    }

    /// Save a progress snapshot. `lastAccessed` defaults to now.
    pub async fn save_progress(&self, record: &ProgressRecord) -> AppResult<SavedObject> {
        require("userId", &record.user_id)?;
        require("courseId", &record.course_id)?;
        require("moduleId", &record.module_id)?;

        let now = self.clock.now();
        let mut record = record.clone();
        record.last_accessed.get_or_insert_with(|| iso(now));

        let key = keys::progress(
            &record.user_id,
            &record.course_id,
            &record.module_id,
            now.timestamp_millis(),
        );
        self.put_json(&key, &record).await
    }

    /// Save a quiz result. `completedAt` defaults to now.
    pub async fn save_quiz_result(&self, result: &QuizResult) -> AppResult<SavedObject> {
        require("userId", &result.user_id)?;
        require("courseId", &result.course_id)?;
        require("moduleId", &result.module_id)?;

        let now = self.clock.now();
        let mut result = result.clone();
        result.completed_at.get_or_insert_with(|| iso(now));

        let key = keys::quiz_result(
            &result.user_id,
            &result.course_id,
            &result.module_id,
            now.timestamp_millis(),
        );
        self.put_json(&key, &result).await
    }

    /// Save a JSON report. `generatedAt` defaults to now.
    pub async fn save_report(&self, report: &TrainingReport) -> AppResult<SavedObject> {
        require("userId", &report.user_id)?;
        require("reportType", &report.report_type)?;

        let now = self.clock.now();
        let mut report = report.clone();
        report.generated_at.get_or_insert_with(|| iso(now));

        let key = keys::report(&report.user_id, &report.report_type, now.timestamp_millis());
        self.put_json(&key, &report).await
    }

    /// Save a rendered PDF report.
    pub async fn save_pdf_report(
        &self,
        user_id: &str,
        report_type: &str,
        pdf: Bytes,
    ) -> AppResult<SavedObject> {
        require("userId", user_id)?;
        require("reportType", report_type)?;
        if pdf.is_empty() {
            return Err(AppError::validation("PDF body is empty"));
        }

        let key = keys::pdf_report(user_id, report_type, self.clock.now_millis());
        let size = pdf.len();
        self.objects.put(&key, pdf, PDF).await?;
        info!(key = %key, bytes = size, "PDF report saved");
        Ok(SavedObject {
            url: self.objects.object_url(&key),
            key,
        })
    }

    /// Every progress snapshot of a user, optionally for one course,
    /// ordered by key (course, module, then time).
    pub async fn get_user_progress(
        &self,
        user_id: &str,
        course_id: Option<&str>,
    ) -> AppResult<Vec<ProgressRecord>> {
        self.read_all(&keys::progress_prefix(user_id, course_id)).await
    }

    /// Every quiz result of a user, optionally for one course and module.
    pub async fn get_quiz_results(
        &self,
        user_id: &str,
        course_id: Option<&str>,
        module_id: Option<&str>,
    ) -> AppResult<Vec<QuizResult>> {
        self.read_all(&keys::quiz_prefix(user_id, course_id, module_id))
            .await
    }

    /// Progress and quiz results of every user that has either.
    pub async fn get_all_users_training_data(
        &self,
    ) -> AppResult<BTreeMap<String, UserTrainingData>> {
        let mut users = BTreeSet::new();
        for root in [keys::PROGRESS_ROOT, keys::QUIZ_ROOT] {
            for prefix in self.objects.list_prefixes(root).await? {
                if let Some(user) = keys::user_from_prefix(root, &prefix) {
                    users.insert(user.to_string());
                }
            }
        }

        let mut data = BTreeMap::new();
        for user in users {
            let progress = self.get_user_progress(&user, None).await?;
            let quiz_results = self.get_quiz_results(&user, None, None).await?;
            data.insert(
                user,
                UserTrainingData {
                    progress,
                    quiz_results,
                },
            );
        }

        debug!(users = data.len(), "Collected training data for all users");
        Ok(data)
    }

    /// Write, read back and delete a probe object.
    pub async fn test_connection(&self) -> AppResult<()> {
        let now = self.clock.now_millis();
        let key = keys::health_check(now);
        let body = serde_json::to_vec(&serde_json::json!({
            "status": "ok",
            "timestamp": now,
        }))?;
        let body = Bytes::from(body);

        self.objects.put(&key, body.clone(), JSON).await?;
        let read = self.objects.get(&key).await;
        let deleted = self.objects.delete(&key).await;

        if read? != body {
            return Err(AppError::storage("Health check object read back differently"));
        }
        deleted?;
        debug!(provider = self.objects.provider_type(), "Object store connection ok");
        Ok(())
    }

    /// Delete progress, quiz and report objects older than `days_old` days.
    ///
    /// Age comes from the backend's last-modified time, or from the key's
    /// timestamp when the backend reports none. Returns how many were deleted.
    pub async fn cleanup_old_training_data(&self, days_old: u32) -> AppResult<usize> {
        let cutoff = self.clock.now() - Duration::days(i64::from(days_old));
        let cutoff_ms = cutoff.timestamp_millis();
        let mut deleted = 0;

        for root in [keys::PROGRESS_ROOT, keys::QUIZ_ROOT, keys::REPORTS_ROOT] {
            for object in self.objects.list(root).await? {
                let modified = object
                    .last_modified
                    .map(|t| t.timestamp_millis())
                    .or_else(|| keys::timestamp_of(&object.key));
                let Some(modified) = modified else {
                    continue;
                };
                if modified < cutoff_ms {
                    self.objects.delete(&object.key).await?;
                    deleted += 1;
                }
            }
        }

        info!(days_old, deleted, cutoff = %cutoff, "Old training data cleaned up");
        Ok(deleted)
    }

    async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> AppResult<SavedObject> {
        let body = serde_json::to_vec(value)?;
        self.objects.put(key, Bytes::from(body), JSON).await?;
        debug!(key, "Training record saved");
        Ok(SavedObject {
            key: key.to_string(),
            url: self.objects.object_url(key),
        })
    }

    /// Read every JSON object under `prefix`. Unreadable objects are
    /// logged and skipped.
    async fn read_all<T: DeserializeOwned>(&self, prefix: &str) -> AppResult<Vec<T>> {
        let listed = self.objects.list(prefix).await?;
        let reads = listed
            .iter()
            .filter(|meta| meta.key.ends_with(".json"))
            .map(|meta| async move { (meta.key.as_str(), self.objects.get(&meta.key).await) });

        let mut records = Vec::new();
        for (key, result) in join_all(reads).await {
            match result.and_then(|body| serde_json::from_slice::<T>(&body).map_err(AppError::from)) {
                Ok(record) => records.push(record),
                Err(e) if e.is_not_found() => {}
                Err(e) => warn!(key, error = %e, "Skipping unreadable training record"),
            }
        }
        Ok(records)
    }
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    if value.contains('/') {
        return Err(AppError::validation(format!("{field} must not contain '/'")));
    }
    Ok(())
}

fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use liorian_core::traits::ManualClock;
    use liorian_storage::MemoryObjectStore;
    use serde_json::{Map, json};

    struct Fixture {
        store: TrainingStore,
        objects: MemoryObjectStore,
        clock: ManualClock,
    }

    fn fixture() -> Fixture {
        let clock = ManualClock::default();
        let objects = MemoryObjectStore::with_clock("liorian-training", Arc::new(clock.clone()));
        let store = TrainingStore::new(Arc::new(objects.clone()), Arc::new(clock.clone()));
        Fixture {
            store,
            objects,
            clock,
        }
    }

    fn progress(user: &str, course: &str, module: &str, pct: f64) -> ProgressRecord {
        ProgressRecord {
            user_id: user.to_string(),
            course_id: course.to_string(),
            module_id: module.to_string(),
            progress: pct,
            completed: pct >= 100.0,
            time_spent: 600,
            last_accessed: None,
            extra: Map::new(),
        }
    }

    fn quiz(user: &str, course: &str, module: &str) -> QuizResult {
        QuizResult {
            user_id: user.to_string(),
            course_id: course.to_string(),
            module_id: module.to_string(),
            quiz_id: Some("q1".to_string()),
            score: 9.0,
            total_questions: 10,
            passed: true,
            answers: json!([1, 3, 2]),
            completed_at: None,
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_progress_round_trip() {
        let f = fixture();
        let mut record = progress("u1", "aws-101", "2", 40.0);
        record.extra.insert("device".to_string(), json!("laptop"));

        let saved = f.store.save_progress(&record).await.unwrap();
        assert_eq!(
            saved.key,
            format!("training-progress/u1/aws-101/2/{}.json", f.clock.now_millis())
        );

        let read = f.store.get_user_progress("u1", None).await.unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].progress, 40.0);
        assert_eq!(read[0].extra.get("device"), Some(&json!("laptop")));
        assert!(read[0].last_accessed.is_some());
    }

    #[tokio::test]
    async fn test_progress_course_filter() {
        let f = fixture();
        f.store.save_progress(&progress("u1", "a", "1", 10.0)).await.unwrap();
        f.clock.advance(Duration::milliseconds(1));
        f.store.save_progress(&progress("u1", "b", "1", 20.0)).await.unwrap();
        f.store.save_progress(&progress("u2", "a", "1", 30.0)).await.unwrap();

        let only_a = f.store.get_user_progress("u1", Some("a")).await.unwrap();
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0].course_id, "a");
        assert_eq!(f.store.get_user_progress("u1", None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_quiz_filters() {
        let f = fixture();
        f.store.save_quiz_result(&quiz("u1", "c1", "m1")).await.unwrap();
        f.clock.advance(Duration::milliseconds(1));
        f.store.save_quiz_result(&quiz("u1", "c1", "m2")).await.unwrap();
        f.clock.advance(Duration::milliseconds(1));
        f.store.save_quiz_result(&quiz("u1", "c2", "m1")).await.unwrap();

        let all = f.store.get_quiz_results("u1", None, None).await.unwrap();
        let course = f.store.get_quiz_results("u1", Some("c1"), None).await.unwrap();
        let module = f.store.get_quiz_results("u1", Some("c1"), Some("m2")).await.unwrap();
        assert_eq!((all.len(), course.len(), module.len()), (3, 2, 1));
        assert_eq!(module[0].answers, json!([1, 3, 2]));
    }

    #[tokio::test]
    async fn test_all_users_training_data() {
        let f = fixture();
        f.store.save_progress(&progress("u1", "c", "m", 50.0)).await.unwrap();
        f.store.save_quiz_result(&quiz("u1", "c", "m")).await.unwrap();
        f.store.save_quiz_result(&quiz("u2", "c", "m")).await.unwrap();

        let data = f.store.get_all_users_training_data().await.unwrap();
        assert_eq!(data.keys().cloned().collect::<Vec<_>>(), vec!["u1", "u2"]);
        assert_eq!(data["u1"].progress.len(), 1);
        assert_eq!(data["u1"].quiz_results.len(), 1);
        assert!(data["u2"].progress.is_empty());
    }

    #[tokio::test]
    async fn test_pdf_report_key_and_url() {
        let f = fixture();
        let saved = f
            .store
            .save_pdf_report("u1", "certificate", Bytes::from_static(b"%PDF-1.7"))
            .await
            .unwrap();
        let ts = f.clock.now_millis();
        assert_eq!(saved.key, format!("training-reports/pdf/u1/certificate-{ts}.pdf"));
        assert_eq!(saved.url, format!("memory://liorian-training/{}", saved.key));
        assert_eq!(f.objects.content_type(&saved.key).await.as_deref(), Some(PDF));
    }

    #[tokio::test]
    async fn test_report_defaults_generated_at() {
        let f = fixture();
        let report = TrainingReport {
            user_id: "u1".to_string(),
            report_type: "summary".to_string(),
            generated_at: None,
            data: json!({"completedModules": 4}),
            extra: Map::new(),
        };
        let saved = f.store.save_report(&report).await.unwrap();
        let body = f.objects.get(&saved.key).await.unwrap();
        let stored: TrainingReport = serde_json::from_slice(&body).unwrap();
        assert!(stored.generated_at.is_some());
        assert_eq!(stored.data["completedModules"], 4);
    }

    #[tokio::test]
    async fn test_invalid_ids_rejected() {
        let f = fixture();
        let err = f
            .store
            .save_progress(&progress("", "c", "m", 1.0))
            .await
            .unwrap_err();
        assert_eq!(err.kind, liorian_core::error::ErrorKind::Validation);
        assert!(f.store.save_progress(&progress("u/1", "c", "m", 1.0)).await.is_err());
        assert!(f.objects.is_empty().await);
    }

    #[tokio::test]
    async fn test_connection_leaves_nothing_behind() {
        let f = fixture();
        f.store.test_connection().await.unwrap();
        assert!(f.objects.is_empty().await);
    }

    #[tokio::test]
    async fn test_cleanup_removes_only_old_objects() {
        let f = fixture();
        f.store.save_progress(&progress("u1", "c", "m", 10.0)).await.unwrap();
        f.store.save_quiz_result(&quiz("u1", "c", "m")).await.unwrap();

        f.clock.advance(Duration::days(91));
        f.store.save_progress(&progress("u1", "c", "m", 90.0)).await.unwrap();

        let deleted = f.store.cleanup_old_training_data(90).await.unwrap();
        assert_eq!(deleted, 2);

        let left = f.store.get_user_progress("u1", None).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].progress, 90.0);
    }
}
