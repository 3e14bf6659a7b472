//! Navigator that records visited URLs

use dashboard_core::navigation::Navigator;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    urls: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.urls.lock().unwrap().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.urls.lock().unwrap().push(url.to_string());
    }
}
