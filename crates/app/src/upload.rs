use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};

use serde::Deserialize;
use tcline_state::meta::FileMeta;
use tcline_state::project::AppState;
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    Backend(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid response: {0}")]
    Parse(String),
    #[error("server returned HTTP {0}")]
    Status(u16),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessResponse {
    error: Option<String>,
    name: Option<String>,
    start_time: Option<f64>,
    end_time: Option<f64>,
}

/// Turns a `/process` response body into a record, or the error it reports.
pub fn parse_process_response(body: &[u8]) -> Result<FileMeta, UploadError> {
    let resp: ProcessResponse =
        serde_json::from_slice(body).map_err(|e| UploadError::Parse(e.to_string()))?;
    if let Some(error) = resp.error.filter(|e| !e.is_empty()) {
        return Err(UploadError::Backend(error));
    }

    let name = resp
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| UploadError::Parse("missing name".into()))?;
    let start = millis_field(resp.start_time, "startTime")?;
    let end = millis_field(resp.end_time, "endTime")?;
    if end < start {
        return Err(UploadError::Parse(format!(
            "endTime {end} precedes startTime {start}"
        )));
    }
    Ok(FileMeta::new(name, start, end))
}

fn millis_field(value: Option<f64>, field: &str) -> Result<i64, UploadError> {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.round() as i64)
        .ok_or_else(|| UploadError::Parse(format!("missing {field}")))
}

pub trait UploadTransport: Send + Sync + 'static {
    fn upload(&self, path: &Path, name: &str) -> Result<FileMeta, UploadError>;
}

/// Posts files as `multipart/form-data` to the backend's `/process` route.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &AppConfig) -> Result<Self, UploadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.upload_timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.process_endpoint(),
        })
    }
}

impl UploadTransport for HttpTransport {
    fn upload(&self, path: &Path, name: &str) -> Result<FileMeta, UploadError> {
        let part = reqwest::blocking::multipart::Part::file(path)?.file_name(name.to_string());
        let form = reqwest::blocking::multipart::Form::new().part("file", part);
        let response = self.client.post(&self.endpoint).multipart(form).send()?;
        let status = response.status();
        let body = response.bytes()?;
        match parse_process_response(&body) {
            Err(UploadError::Parse(_)) if !status.is_success() => {
                Err(UploadError::Status(status.as_u16()))
            }
            other => other,
        }
    }
}

pub struct UploadResult {
    pub name: String,
    pub outcome: Result<FileMeta, UploadError>,
}

/// Runs one background upload per file and merges the results on the UI
/// thread via [`Uploader::poll`].
pub struct Uploader<T: UploadTransport> {
    transport: Arc<T>,
    result_tx: mpsc::Sender<UploadResult>,
    result_rx: mpsc::Receiver<UploadResult>,
    pending: BTreeSet<String>,
    repaint: Option<egui::Context>,
}

impl<T: UploadTransport> Uploader<T> {
    pub fn new(transport: T, repaint: Option<egui::Context>) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        Self {
            transport: Arc::new(transport),
            result_tx,
            result_rx,
            pending: BTreeSet::new(),
            repaint,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Starts uploads for every file not already loaded or in flight and
    /// returns how many were started.
    pub fn submit(&mut self, state: &mut AppState, paths: Vec<PathBuf>) -> usize {
        if paths.is_empty() {
            return 0;
        }
        state.ui.status.begin_batch(paths.len());

        let mut started = 0;
        for path in paths {
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                state.upload_failed(&path.display().to_string(), "not a file");
                continue;
            };
            if state.project.files.contains(&name) || self.pending.contains(&name) {
                tracing::info!(name = %name, "skipping already processed file");
                state.ui.status.skipped(name);
                continue;
            }
            if self.spawn(path, name.clone()) {
                started += 1;
            } else {
                state.upload_failed(&name, "could not start upload worker");
            }
        }

        if self.pending.is_empty() {
            state.batch_settled();
        }
        started
    }

    fn spawn(&mut self, path: PathBuf, name: String) -> bool {
        let transport = Arc::clone(&self.transport);
        let tx = self.result_tx.clone();
        let repaint = self.repaint.clone();
        let worker_name = name.clone();

        let spawned = std::thread::Builder::new()
            .name("upload".into())
            .spawn(move || {
                tracing::debug!(name = %worker_name, path = %path.display(), "uploading");
                let outcome = transport.upload(&path, &worker_name);
                let _ = tx.send(UploadResult {
                    name: worker_name,
                    outcome,
                });
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            });

        match spawned {
            Ok(_) => {
                self.pending.insert(name);
                true
            }
            Err(e) => {
                tracing::error!(name = %name, "failed to spawn upload thread: {e}");
                false
            }
        }
    }

    /// Applies finished uploads to `state`. Returns whether anything arrived.
    pub fn poll(&mut self, state: &mut AppState) -> bool {
        let mut received = false;
        while let Ok(result) = self.result_rx.try_recv() {
            self.pending.remove(&result.name);
            match result.outcome {
                Ok(meta) => {
                    tracing::info!(
                        name = %meta.name,
                        start = meta.start_time,
                        end = meta.end_time,
                        "upload processed"
                    );
                    state.apply_upload(meta);
                }
                Err(e) => {
                    tracing::warn!(name = %result.name, "upload failed: {e}");
                    state.upload_failed(&result.name, &e.to_string());
                }
            }
            received = true;
        }
        if received && self.pending.is_empty() {
            state.batch_settled();
        }
        received
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    use tcline_state::status::StatusLine;
    use tcline_state::timeline::DragEdge;

    use super::*;

    #[derive(Default)]
    struct MockTransport {
        responses: HashMap<String, Result<FileMeta, String>>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl MockTransport {
        fn with(mut self, name: &str, response: Result<FileMeta, &str>) -> Self {
            self.responses
                .insert(name.to_string(), response.map_err(str::to_string));
            self
        }
    }

    impl UploadTransport for MockTransport {
        fn upload(&self, _path: &Path, name: &str) -> Result<FileMeta, UploadError> {
            self.calls.lock().unwrap().push(name.to_string());
            match self.responses.get(name) {
                Some(Ok(meta)) => Ok(meta.clone()),
                Some(Err(msg)) => Err(UploadError::Backend(msg.clone())),
                None => Err(UploadError::Status(404)),
            }
        }
    }

    fn wait_idle<T: UploadTransport>(uploader: &mut Uploader<T>, state: &mut AppState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while uploader.pending_count() > 0 {
            uploader.poll(state);
            assert!(Instant::now() < deadline, "uploads did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| Path::new("/media").join(n)).collect()
    }

    #[test]
    fn existing_name_is_skipped_without_network_call() {
        let transport = MockTransport::default().with("b.tc", Ok(FileMeta::new("b.tc", 0, 10)));
        let calls = Arc::clone(&transport.calls);
        let mut uploader = Uploader::new(transport, None);
        let mut state = AppState::default();
        state.apply_upload(FileMeta::new("a.tc", 0, 1_000));

        let started = uploader.submit(&mut state, paths(&["a.tc", "b.tc"]));
        wait_idle(&mut uploader, &mut state);

        assert_eq!(started, 1);
        assert_eq!(*calls.lock().unwrap(), ["b.tc"]);
        assert!(state
            .ui
            .status
            .lines()
            .contains(&StatusLine::Skipped("a.tc".into())));
        assert_eq!(state.project.files.get("a.tc"), Some(&FileMeta::new("a.tc", 0, 1_000)));
    }

    #[test]
    fn only_skipped_files_settles_status() {
        let mut uploader = Uploader::new(MockTransport::default(), None);
        let mut state = AppState::default();
        state.apply_upload(FileMeta::new("a.tc", 0, 1_000));

        assert_eq!(uploader.submit(&mut state, paths(&["a.tc"])), 0);
        assert_eq!(
            state.ui.status.headline(),
            "Timeline Updated: 1 file(s) loaded."
        );
    }

    #[test]
    fn same_name_in_flight_is_uploaded_once() {
        let transport = MockTransport::default().with("a.tc", Ok(FileMeta::new("a.tc", 0, 10)));
        let calls = Arc::clone(&transport.calls);
        let mut uploader = Uploader::new(transport, None);
        let mut state = AppState::default();

        let batch = vec![PathBuf::from("/x/a.tc"), PathBuf::from("/y/a.tc")];
        assert_eq!(uploader.submit(&mut state, batch), 1);
        wait_idle(&mut uploader, &mut state);

        assert_eq!(calls.lock().unwrap().len(), 1);
        assert_eq!(state.project.files.len(), 1);
    }

    #[test]
    fn failed_file_does_not_abort_batch() {
        let transport = MockTransport::default()
            .with("bad.mp4", Err("Unsupported file type"))
            .with("good.tc", Ok(FileMeta::new("good.tc", 100, 200)));
        let mut uploader = Uploader::new(transport, None);
        let mut state = AppState::default();

        uploader.submit(&mut state, paths(&["bad.mp4", "good.tc"]));
        wait_idle(&mut uploader, &mut state);

        assert!(state.project.files.contains("good.tc"));
        assert!(!state.project.files.contains("bad.mp4"));
        let errors: Vec<String> = state
            .ui
            .status
            .lines()
            .iter()
            .filter(|l| l.is_error())
            .map(|l| l.to_string())
            .collect();
        assert_eq!(errors, ["Error processing bad.mp4: Unsupported file type"]);
    }

    #[test]
    fn all_failed_batch_settles_status() {
        let transport = MockTransport::default().with("bad.mp4", Err("Unsupported file type"));
        let mut uploader = Uploader::new(transport, None);
        let mut state = AppState::default();

        uploader.submit(&mut state, paths(&["bad.mp4", "missing.tc"]));
        wait_idle(&mut uploader, &mut state);

        assert_eq!(state.ui.status.headline(), tcline_state::status::READY_MESSAGE);
        assert_eq!(state.ui.status.lines().iter().filter(|l| l.is_error()).count(), 2);
    }

    #[test]
    fn uploaded_neighbours_snap_when_dragged() {
        let transport = MockTransport::default()
            .with("first.tc", Ok(FileMeta::new("first.tc", 0, 5_000)))
            .with("second.mp4", Ok(FileMeta::new("second.mp4", 4_800, 9_000)));
        let mut uploader = Uploader::new(transport, None);
        let mut state = AppState::default();

        uploader.submit(&mut state, paths(&["first.tc", "second.mp4"]));
        wait_idle(&mut uploader, &mut state);
        assert_eq!(state.project.files.len(), 2);

        assert!(state.begin_drag("second.mp4", DragEdge::Start, 4_800));
        state.update_drag(4_950);
        state.end_drag();

        let second = state.project.files.get("second.mp4").unwrap();
        assert_eq!(second.start_time, 5_000);
    }

    #[test]
    fn parses_success_body() {
        let meta = parse_process_response(
            br#"{"name":"GX010183.MP4","startTime":36000000,"endTime":36065432.6,"extra":1}"#,
        )
        .unwrap();
        assert_eq!(meta, FileMeta::new("GX010183.MP4", 36_000_000, 36_065_433));
    }

    #[test]
    fn error_field_is_reported_verbatim() {
        let err = parse_process_response(br#"{"error":"TC file is empty"}"#).unwrap_err();
        assert!(matches!(err, UploadError::Backend(_)));
        assert_eq!(err.to_string(), "TC file is empty");
    }

    #[test]
    fn malformed_bodies_are_parse_errors() {
        for body in [
            &b"<html>oops</html>"[..],
            br#"{"name":"a.tc","startTime":0}"#,
            br#"{"startTime":0,"endTime":10}"#,
            br#"{"name":"a.tc","startTime":10,"endTime":5}"#,
        ] {
            assert!(
                matches!(parse_process_response(body), Err(UploadError::Parse(_))),
                "{}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn empty_error_field_is_ignored() {
        let meta =
            parse_process_response(br#"{"error":"","name":"a.tc","startTime":1,"endTime":2}"#)
                .unwrap();
        assert_eq!(meta.name, "a.tc");
    }
}
