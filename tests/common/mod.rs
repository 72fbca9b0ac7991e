//! Shared helpers for integration tests: an in-memory document service
//! that records every call, and a fake object store.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use oodles::client::{
    DocumentService, FileInfo, ObjectStorage, Permission, ServiceError, ServiceResult,
};
use oodles::request::{Request, ValueInputOption, ValueRange};
use oodles::{Config, DocumentKind};
use serde_json::{json, Value};

pub const SERVICE_EMAIL: &str = "robot@project.iam.gserviceaccount.com";

/// A recorded service call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Fetch(DocumentKind, String),
    BatchUpdate {
        kind: DocumentKind,
        id: String,
        requests: Vec<Value>,
    },
    GetValues(String, String),
    Append {
        id: String,
        range: String,
        body: Value,
        input: Value,
    },
    CreateFile(String, DocumentKind),
    CopyFile(String, String),
    RenameFile(String, String),
    DeleteFile(String),
    ListFiles(Option<String>),
    CreatePermission(String, Value),
}

#[derive(Default)]
struct State {
    documents: HashMap<String, Value>,
    values: HashMap<String, Vec<Vec<Value>>>,
    denied: HashSet<String>,
    calls: Vec<Call>,
    next_id: i64,
}

/// Document service backed by fixture trees.
///
/// Spreadsheet batch updates applying `addSheet`, `deleteSheet` and
/// `addChart` are reflected in the stored tree, so reloads see them.
#[derive(Default)]
pub struct MockService {
    state: Mutex<State>,
}

impl MockService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, id: &str, tree: Value) {
        self.state.lock().unwrap().documents.insert(id.to_string(), tree);
    }

    pub fn set_values(&self, id: &str, range: &str, rows: Vec<Vec<Value>>) {
        self.state
            .lock()
            .unwrap()
            .values
            .insert(format!("{}/{}", id, range), rows);
    }

    pub fn deny(&self, id: &str) {
        self.state.lock().unwrap().denied.insert(id.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Request lists of every batch update, in call order.
    pub fn batches(&self) -> Vec<Vec<Value>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::BatchUpdate { requests, .. } => Some(requests),
                _ => None,
            })
            .collect()
    }

    pub fn appends(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Append { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn check_access(&self, id: &str) -> ServiceResult<()> {
        if self.state.lock().unwrap().denied.contains(id) {
            return Err(ServiceError::PermissionDenied);
        }
        Ok(())
    }

    fn apply_sheet_requests(state: &mut State, id: &str, requests: &[Value]) -> Value {
        let mut replies = Vec::new();
        for request in requests {
            state.next_id += 1;
            let next_id = state.next_id;
            let Some(tree) = state.documents.get_mut(id) else {
                replies.push(json!({}));
                continue;
            };
            if tree.get("sheets").is_none() {
                tree["sheets"] = json!([]);
            }
            let sheets = tree["sheets"].as_array_mut().unwrap();

            if let Some(add) = request.get("addSheet") {
                let mut properties = add["properties"].clone();
                properties["sheetId"] = json!(next_id);
                sheets.push(json!({ "properties": properties }));
                replies.push(json!({"addSheet": {"properties": {"sheetId": next_id}}}));
            } else if let Some(delete) = request.get("deleteSheet") {
                let sheet_id = delete["sheetId"].clone();
                sheets.retain(|s| s["properties"]["sheetId"] != sheet_id);
                replies.push(json!({}));
            } else if let Some(add) = request.get("addChart") {
                let sheet_id =
                    add["chart"]["position"]["overlayPosition"]["anchorCell"]["sheetId"].clone();
                if let Some(sheet) = sheets
                    .iter_mut()
                    .find(|s| s["properties"]["sheetId"] == sheet_id)
                {
                    if sheet.get("charts").is_none() {
                        sheet["charts"] = json!([]);
                    }
                    sheet["charts"]
                        .as_array_mut()
                        .unwrap()
                        .push(json!({ "chartId": next_id }));
                }
                replies.push(json!({"addChart": {"chart": {"chartId": next_id}}}));
            } else {
                replies.push(json!({}));
            }
        }
        json!({ "spreadsheetId": id, "replies": replies })
    }
}

impl DocumentService for MockService {
    fn fetch(&self, kind: DocumentKind, document_id: &str) -> ServiceResult<Value> {
        self.record(Call::Fetch(kind, document_id.to_string()));
        self.check_access(document_id)?;
        self.state
            .lock()
            .unwrap()
            .documents
            .get(document_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(document_id.to_string()))
    }

    fn batch_update(
        &self,
        kind: DocumentKind,
        document_id: &str,
        requests: &[Request],
    ) -> ServiceResult<Value> {
        let requests: Vec<Value> = requests
            .iter()
            .map(|r| serde_json::to_value(r).unwrap())
            .collect();
        self.record(Call::BatchUpdate {
            kind,
            id: document_id.to_string(),
            requests: requests.clone(),
        });
        self.check_access(document_id)?;

        let mut state = self.state.lock().unwrap();
        if kind == DocumentKind::Spreadsheet {
            return Ok(Self::apply_sheet_requests(&mut state, document_id, &requests));
        }
        Ok(json!({ "replies": [] }))
    }

    fn get_values(&self, spreadsheet_id: &str, range: &str) -> ServiceResult<Vec<Vec<Value>>> {
        self.record(Call::GetValues(spreadsheet_id.to_string(), range.to_string()));
        self.check_access(spreadsheet_id)?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .values
            .get(&format!("{}/{}", spreadsheet_id, range))
            .cloned()
            .unwrap_or_default())
    }

    fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &ValueRange,
        input: ValueInputOption,
    ) -> ServiceResult<Value> {
        self.record(Call::Append {
            id: spreadsheet_id.to_string(),
            range: range.to_string(),
            body: serde_json::to_value(values).unwrap(),
            input: serde_json::to_value(input).unwrap(),
        });
        self.check_access(spreadsheet_id)?;
        Ok(json!({}))
    }

    fn create_file(&self, name: &str, kind: DocumentKind) -> ServiceResult<String> {
        self.record(Call::CreateFile(name.to_string(), kind));
        let id = format!("created-{}", name.to_lowercase().replace(' ', "-"));
        let tree = match kind {
            DocumentKind::Presentation => {
                json!({"presentationId": id, "title": name, "slides": []})
            }
            DocumentKind::Spreadsheet => json!({
                "spreadsheetId": id,
                "properties": {"title": name},
                "sheets": [{"properties": {"sheetId": 0, "title": "Sheet1"}}]
            }),
            DocumentKind::Document => json!({
                "documentId": id,
                "title": name,
                "body": {"content": [{"endIndex": 1}, {"startIndex": 1, "endIndex": 2}]}
            }),
        };
        self.insert(&id, tree);
        Ok(id)
    }

    fn copy_file(&self, file_id: &str, name: &str) -> ServiceResult<String> {
        self.record(Call::CopyFile(file_id.to_string(), name.to_string()));
        self.check_access(file_id)?;
        let id = format!("{}-copy", file_id);
        let mut state = self.state.lock().unwrap();
        let mut tree = state
            .documents
            .get(file_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(file_id.to_string()))?;
        tree["title"] = json!(name);
        tree["presentationId"] = json!(id);
        state.documents.insert(id.clone(), tree);
        Ok(id)
    }

    fn rename_file(&self, file_id: &str, name: &str) -> ServiceResult<()> {
        self.record(Call::RenameFile(file_id.to_string(), name.to_string()));
        self.check_access(file_id)
    }

    fn delete_file(&self, file_id: &str) -> ServiceResult<()> {
        self.record(Call::DeleteFile(file_id.to_string()));
        self.check_access(file_id)?;
        self.state.lock().unwrap().documents.remove(file_id);
        Ok(())
    }

    fn list_files(&self, query: Option<&str>) -> ServiceResult<Vec<FileInfo>> {
        self.record(Call::ListFiles(query.map(str::to_string)));
        Ok(Vec::new())
    }

    fn create_permission(&self, file_id: &str, permission: &Permission) -> ServiceResult<()> {
        self.record(Call::CreatePermission(
            file_id.to_string(),
            serde_json::to_value(permission).unwrap(),
        ));
        self.check_access(file_id)
    }
}

/// Object store keeping a list of uploads.
#[derive(Default)]
pub struct MockStorage {
    uploads: Mutex<Vec<(PathBuf, String, String)>>,
}

impl MockStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn uploads(&self) -> Vec<(PathBuf, String, String)> {
        self.uploads.lock().unwrap().clone()
    }
}

impl ObjectStorage for MockStorage {
    fn upload(&self, local_path: &Path, bucket: &str, object: &str) -> ServiceResult<()> {
        self.uploads.lock().unwrap().push((
            local_path.to_path_buf(),
            bucket.to_string(),
            object.to_string(),
        ));
        Ok(())
    }

    fn signed_url(&self, bucket: &str, object: &str, ttl: Duration) -> ServiceResult<String> {
        Ok(format!(
            "https://storage.example.com/{}/{}?expires={}",
            bucket,
            object,
            ttl.as_secs()
        ))
    }
}

pub fn config(service: &Arc<MockService>) -> Arc<Config> {
    Arc::new(Config::new(service.clone(), SERVICE_EMAIL))
}

pub fn config_with_storage(service: &Arc<MockService>, storage: &Arc<MockStorage>) -> Arc<Config> {
    Arc::new(Config::new(service.clone(), SERVICE_EMAIL).with_storage(storage.clone()))
}

/// A text shape with one run per entry of `runs`.
pub fn text_shape(object_id: &str, runs: &[&str]) -> Value {
    let mut elements = vec![json!({"endIndex": 0, "paragraphMarker": {}})];
    for run in runs {
        elements.push(json!({
            "textRun": {
                "content": run,
                "style": {"fontFamily": "Roboto", "fontSize": {"magnitude": 14, "unit": "PT"}}
            }
        }));
    }
    json!({
        "objectId": object_id,
        "size": {"width": {"magnitude": 3000000, "unit": "EMU"}},
        "transform": {"scaleX": 1, "scaleY": 1, "unit": "EMU"},
        "shape": {"shapeType": "TEXT_BOX", "text": {"textElements": elements}}
    })
}

pub fn image(object_id: &str, title: Option<&str>) -> Value {
    let mut element = json!({
        "objectId": object_id,
        "size": {"width": {"magnitude": 100, "unit": "PT"}},
        "transform": {"scaleX": 1, "scaleY": 1, "translateX": 10, "unit": "PT"},
        "image": {
            "contentUrl": "https://lh3.example.com/rendered",
            "sourceUrl": "https://example.com/original.png"
        }
    });
    if let Some(title) = title {
        element["title"] = json!(title);
    }
    element
}

pub fn chart(object_id: &str, spreadsheet_id: &str, chart_id: i64) -> Value {
    json!({
        "objectId": object_id,
        "size": {"width": {"magnitude": 200, "unit": "PT"}},
        "transform": {"scaleX": 2, "scaleY": 2, "unit": "PT"},
        "sheetsChart": {"spreadsheetId": spreadsheet_id, "chartId": chart_id}
    })
}

/// The default test deck: two slides.
pub fn presentation_tree(id: &str) -> Value {
    json!({
        "presentationId": id,
        "title": "Quarterly review",
        "slides": [
            {
                "objectId": "slide-1",
                "pageElements": [
                    text_shape("title", &["Quarterly results\n"]),
                    text_shape("subtitle", &["Results by region\n", " ", "x"]),
                    image("logo", Some("logo")),
                    image("plot", None),
                    chart("chart-1", "sheet-src", 7),
                    {"objectId": "line-1", "line": {"lineType": "STRAIGHT"}}
                ]
            },
            {
                "objectId": "slide-2",
                "pageElements": [
                    text_shape("body", &["Nothing to see here\n"])
                ]
            }
        ]
    })
}
