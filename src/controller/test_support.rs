//! Scripted search source for controller tests

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::Mutex;

use crate::model::{Album, Artist, Page, SearchResponse, SearchSource, ServiceError, Track};

#[derive(Clone)]
pub enum Scripted {
    Reply(SearchResponse),
    Status(u16),
    Garbage,
}

#[derive(Clone, Default)]
pub struct ScriptedSource {
    script: Arc<std::sync::Mutex<HashMap<String, (Duration, Scripted)>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, query: &str, delay_ms: u64, outcome: Scripted) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert(query.to_string(), (Duration::from_millis(delay_ms), outcome));
        self
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

impl SearchSource for ScriptedSource {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<SearchResponse, ServiceError>> {
        Box::pin(async move {
            self.calls.lock().await.push(query.to_string());
            let entry = self.script.lock().unwrap().get(query).cloned();
            let (delay, outcome) = entry.unwrap_or((Duration::ZERO, Scripted::Reply(SearchResponse::default())));
            tokio::time::sleep(delay).await;
            match outcome {
                Scripted::Reply(response) => Ok(response),
                Scripted::Status(code) => Err(ServiceError::Status(code, "scripted".to_string())),
                Scripted::Garbage => Err(ServiceError::Decode("expected value at line 1".to_string())),
            }
        })
    }
}

pub fn track(id: &str, name: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn album(id: &str, name: &str) -> Album {
    Album {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn artist(id: &str, name: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

/// A response holding one record per category, all named after `tag`
pub fn response_for(tag: &str) -> SearchResponse {
    SearchResponse {
        tracks: Some(Page { items: vec![track(&format!("t-{}", tag), tag)] }),
        albums: Some(Page { items: vec![album(&format!("a-{}", tag), tag)] }),
        artists: Some(Page { items: vec![artist(&format!("ar-{}", tag), tag)] }),
    }
}
