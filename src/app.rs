use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use parking_lot::Mutex;
use reqwest::Client;

use crate::{
    config::{AppConfig, DEFAULT_TIMEZONE},
    domain::{ClassificationResult, EmailItem, HistoryEntry},
    export::{self, ExportFormat},
    heuristics::LocalClassifier,
    infrastructure::{directories::ResolvedPaths, signals},
    ingest::{self, IngestReport},
    remote::RemoteClassifierClient,
    session::{SessionEvent, SessionState, TransitionError},
    stats::{self, BatchStats},
    tasks::{BatchReport, ClassificationDispatcher, IdGenerator, ItemQueue, TimestampIds},
};

/// Inputs for one command-line run.
#[derive(Debug, Default)]
pub struct RunRequest {
    pub files: Vec<PathBuf>,
    pub texts: Vec<String>,
    pub exports: Vec<ExportFormat>,
}

pub struct ClearBoxApp {
    paths: ResolvedPaths,
    timezone: Tz,
    queue: ItemQueue,
    dispatcher: ClassificationDispatcher,
    session: Mutex<SessionState>,
}

impl ClearBoxApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(format!("clearbox/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_parts(
            config,
            paths,
            http_client,
            Arc::new(TimestampIds),
        ))
    }

    pub fn with_parts(
        config: AppConfig,
        paths: ResolvedPaths,
        http_client: Client,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let timezone = config.timezone.parse::<Tz>().unwrap_or_else(|_| {
            tracing::warn!(
                target: "app",
                timezone = %config.timezone,
                fallback = DEFAULT_TIMEZONE,
                "unknown timezone"
            );
            chrono_tz::America::Sao_Paulo
        });

        let remote = Arc::new(RemoteClassifierClient::new(http_client, config.remote));
        Self {
            paths,
            timezone,
            queue: ItemQueue::new(ids),
            dispatcher: ClassificationDispatcher::new(remote, LocalClassifier::new()),
            session: Mutex::new(SessionState::default()),
        }
    }

    pub fn add_paste(&self, text: &str) -> Option<EmailItem> {
        ingest::ingest_paste(&self.queue, text, self.timezone, Utc::now())
    }

    pub async fn ingest_files(&self, paths: &[PathBuf]) -> IngestReport {
        ingest::ingest_files(&self.queue, paths).await
    }

    pub fn items(&self) -> Vec<EmailItem> {
        self.queue.all()
    }

    pub fn results(&self) -> Vec<ClassificationResult> {
        self.session.lock().results.clone()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.session.lock().history.clone()
    }

    pub fn stats(&self) -> BatchStats {
        stats::summarize(&self.session.lock().results)
    }

    pub fn is_busy(&self) -> bool {
        self.session.lock().busy
    }

    /// Classifies everything currently queued. Rejected while another batch
    /// is still in flight.
    pub async fn process_all(&self) -> Result<BatchReport, TransitionError> {
        let items = self.queue.all();
        if items.is_empty() {
            return Ok(BatchReport::empty());
        }

        self.transition(SessionEvent::BatchStarted)?;
        let guard = BatchGuard::new(&self.session);
        let report = self.dispatcher.process_batch(&items).await;
        self.transition(SessionEvent::BatchCompleted {
            items,
            results: report.results.clone(),
            origin: report.origin,
            completed_at: Utc::now(),
        })?;
        guard.disarm();
        Ok(report)
    }

    pub fn edit_reply(&self, id: &str, reply: impl Into<String>) -> Result<(), TransitionError> {
        self.transition(SessionEvent::ReplyEdited {
            id: id.to_string(),
            reply: reply.into(),
        })
    }

    pub fn clear(&self) {
        self.queue.clear();
        if let Err(err) = self.transition(SessionEvent::Cleared) {
            tracing::warn!(target: "app", error = %err, "failed to clear results");
        }
    }

    pub async fn export(&self, format: ExportFormat) -> Result<PathBuf> {
        let items = self.queue.all();
        let results = self.results();
        let rows = export::rows(&items, &results);
        export::write_export(&self.paths.exports_dir, format, &rows, Utc::now()).await
    }

    fn transition(&self, event: SessionEvent) -> Result<(), TransitionError> {
        let mut state = self.session.lock();
        let next = state.apply(event)?;
        *state = next;
        Ok(())
    }

    pub async fn run(self, request: RunRequest) -> Result<()> {
        for text in &request.texts {
            if self.add_paste(text).is_none() {
                tracing::warn!(target: "ingest", "ignored blank text input");
            }
        }

        let report = self.ingest_files(&request.files).await;
        for skipped in &report.skipped {
            eprintln!("skipped {}: {}", skipped.path.display(), skipped.reason);
        }

        if self.queue.is_empty() {
            println!("Nothing to classify.");
            return Ok(());
        }

        tracing::info!(target: "app", queued = self.queue.len(), "starting batch");
        let batch = tokio::select! {
            res = self.process_all() => res?,
            _ = signals::wait_for_termination() => {
                tracing::info!(target: "app", "termination requested; abandoning batch");
                return Ok(());
            }
        };

        self.print_results(&batch);

        for format in &request.exports {
            let path = self.export(*format).await?;
            println!("Exported {}", path.display());
        }
        Ok(())
    }

    fn print_results(&self, batch: &BatchReport) {
        let items = self.queue.all();
        for result in &batch.results {
            let name = items
                .iter()
                .find(|item| item.id == result.id)
                .map(|item| item.name.as_str())
                .unwrap_or("?");
            println!(
                "[{}] {} ({:.0}%)",
                result.category,
                name,
                result.confidence * 100.0
            );
            println!("    {}", result.reply);
        }

        if let Some(reason) = &batch.fallback_reason {
            println!("\nResults from the local classifier ({reason}).");
        } else {
            println!("\nResults from the {} classifier.", batch.origin);
        }

        let stats = self.stats();
        println!(
            "Total: {}  Productive: {}  Unproductive: {}  Average confidence: {:.0}%",
            stats.total,
            stats.productive,
            stats.unproductive,
            stats.average_confidence * 100.0
        );
    }
}

/// Releases the busy flag if a started batch is dropped before it completes.
struct BatchGuard<'a> {
    session: &'a Mutex<SessionState>,
    armed: bool,
}

impl<'a> BatchGuard<'a> {
    fn new(session: &'a Mutex<SessionState>) -> Self {
        Self {
            session,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.session.lock();
        match state.apply(SessionEvent::BatchAborted) {
            Ok(next) => {
                *state = next;
                tracing::warn!(target: "app", "batch dropped before completion; busy flag released");
            }
            Err(err) => {
                tracing::warn!(target: "app", error = %err, "failed to abort batch");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;
    use url::Url;
    use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{
        config::{env::LoggingConfig, DirectoryConfig, RemoteConfig},
        domain::{Category, ItemSource, ResultOrigin},
        tasks::SequentialIds,
    };

    fn app(endpoint: Option<Url>, dir: &TempDir) -> ClearBoxApp {
        let config = AppConfig {
            remote: RemoteConfig {
                endpoint,
                timeout: Duration::from_secs(2),
            },
            directories: DirectoryConfig {
                logs_dir: dir.path().display().to_string(),
                exports_dir: dir.path().display().to_string(),
            },
            logging: LoggingConfig {
                level: "info".into(),
            },
            timezone: "UTC".into(),
        };
        let paths = ResolvedPaths {
            logs_dir: dir.path().to_path_buf(),
            exports_dir: dir.path().to_path_buf(),
        };
        ClearBoxApp::with_parts(
            config,
            paths,
            Client::new(),
            Arc::new(SequentialIds::default()),
        )
    }

    #[tokio::test]
    async fn empty_queue_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(None, &dir);
        let report = app.process_all().await.unwrap();
        assert!(report.results.is_empty());
        assert!(app.history().is_empty());
        assert!(!app.is_busy());
    }

    #[tokio::test]
    async fn offline_batch_is_classified_locally_and_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(None, &dir);
        app.add_paste("bom dia, obrigado");
        app.add_paste("status do meu ticket, por favor, é urgente");

        let report = app.process_all().await.unwrap();
        assert_eq!(report.origin, ResultOrigin::Local);

        let categories: Vec<(String, Category)> = app
            .results()
            .into_iter()
            .map(|r| (r.id, r.category))
            .collect();
        assert_eq!(
            categories,
            vec![
                ("paste-2".to_string(), Category::Productive),
                ("paste-1".to_string(), Category::Unproductive),
            ]
        );

        let stats = app.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.productive, 1);
        assert_eq!(app.history().len(), 2);
        assert_eq!(app.history()[1].text, "bom dia, obrigado");
    }

    #[tokio::test]
    async fn second_batch_is_rejected_while_first_is_in_flight() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "results": [{ "id": "paste-1", "category": "Produtivo", "reply": "ok" }]
                    }))
                    .set_delay(Duration::from_millis(300)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let endpoint = Url::parse(&format!("{}/api/classify", server.uri())).ok();
        let app = app(endpoint, &dir);
        app.add_paste("suporte");

        let (first, second) = tokio::join!(app.process_all(), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            app.process_all().await
        });

        assert_eq!(first.unwrap().origin, ResultOrigin::Remote);
        assert_eq!(second.unwrap_err(), TransitionError::BatchInFlight);
        assert!(!app.is_busy());
    }

    #[tokio::test]
    async fn dropped_batch_releases_the_busy_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "results": [{ "id": "paste-1", "category": "Produtivo", "reply": "ok" }]
                    }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let endpoint = Url::parse(&format!("{}/api/classify", server.uri())).ok();
        let app = app(endpoint, &dir);
        app.add_paste("problema no acesso");

        let first = tokio::time::timeout(Duration::from_millis(50), app.process_all()).await;
        assert!(first.is_err());
        assert!(!app.is_busy());
        assert!(app.results().is_empty());
        assert!(app.history().is_empty());

        let second = app.process_all().await.unwrap();
        assert_eq!(second.origin, ResultOrigin::Remote);
        assert_eq!(app.results().len(), 1);
        assert!(!app.is_busy());
    }

    #[tokio::test]
    async fn clear_empties_queue_and_results_but_keeps_history() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(None, &dir);
        app.add_paste("erro no sistema");
        app.process_all().await.unwrap();

        app.clear();
        assert!(app.items().is_empty());
        assert!(app.results().is_empty());
        assert_eq!(app.history().len(), 1);
    }

    #[tokio::test]
    async fn edited_reply_shows_up_in_exports() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(None, &dir);
        let item = app.add_paste("feliz natal").unwrap();
        assert_eq!(item.source, ItemSource::Paste);
        app.process_all().await.unwrap();

        app.edit_reply(&item.id, "Boas festas \"para todos\"").unwrap();
        assert!(app.edit_reply("missing", "x").is_err());

        let csv_path = app.export(ExportFormat::Csv).await.unwrap();
        let csv = std::fs::read_to_string(csv_path).unwrap();
        assert!(csv.ends_with("\"Boas festas \"\"para todos\"\"\""), "{csv}");

        let json_path = app.export(ExportFormat::Json).await.unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
        assert_eq!(value["data"][0]["category"], "Improdutivo");
        assert_eq!(value["data"][0]["reply"], "Boas festas \"para todos\"");
    }
}
