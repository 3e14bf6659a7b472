//! Navigation, URL query parameters and dialog state

use std::collections::BTreeMap;

/// Query parameter naming the open dialog
pub const ACTION_PARAM: &str = "action";

/// Query parameters of a dashboard URL, kept sorted for stable URLs
pub type QueryParams = BTreeMap<String, String>;

/// Moves the user to another dashboard URL
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// `path` with `params` appended as a query string
pub fn url_with_params(path: &str, params: &QueryParams) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}

/// Opens and closes dialogs by rewriting the `action` query parameter
pub struct DialogActions<'a> {
    navigator: &'a dyn Navigator,
    url: Box<dyn Fn(&QueryParams) -> String + Send + Sync + 'a>,
    params: QueryParams,
}

impl<'a> DialogActions<'a> {
    pub fn new(
        navigator: &'a dyn Navigator,
        url: impl Fn(&QueryParams) -> String + Send + Sync + 'a,
        params: QueryParams,
    ) -> Self {
        Self {
            navigator,
            url: Box::new(url),
            params,
        }
    }

    pub fn open(&self, action: &str) {
        self.open_with(action, QueryParams::new());
    }

    /// Open `action`, merging `extra` into the current parameters
    pub fn open_with(&self, action: &str, extra: QueryParams) {
        let mut params = self.params.clone();
        params.insert(ACTION_PARAM.to_string(), action.to_string());
        params.extend(extra);
        self.navigator.navigate(&(self.url)(&params));
    }

    pub fn close(&self) {
        let mut params = self.params.clone();
        params.remove(ACTION_PARAM);
        self.navigator.navigate(&(self.url)(&params));
    }

    pub fn is_open(&self, action: &str) -> bool {
        self.params.get(ACTION_PARAM).map(String::as_str) == Some(action)
    }
}

/// Visual state of a confirm button bound to a mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfirmButtonState {
    #[default]
    Default,
    Loading,
    Success,
    Error,
}

impl ConfirmButtonState {
    pub fn from_mutation(called: bool, loading: bool, error_count: usize) -> Self {
        match (called, loading, error_count) {
            (_, true, _) => Self::Loading,
            (true, false, 0) => Self::Success,
            (true, false, _) => Self::Error,
            (false, false, _) => Self::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Navigator for Recorder {
        fn navigate(&self, url: &str) {
            self.0.lock().unwrap().push(url.to_string());
        }
    }

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_url_encodes_values() {
        let url = url_with_params("/taxes/countries", &params(&[("query", "a b&c")]));
        assert_eq!(url, "/taxes/countries?query=a%20b%26c");
        assert_eq!(url_with_params("/x", &QueryParams::new()), "/x");
    }

    #[test]
    fn test_open_and_close_preserve_other_params() {
        let recorder = Recorder::default();
        let actions = DialogActions::new(
            &recorder,
            |params| url_with_params("/taxes/countries/PL", params),
            params(&[("sort", "name")]),
        );

        actions.open("add-country");
        actions.close();

        let urls = recorder.0.lock().unwrap();
        assert_eq!(urls[0], "/taxes/countries/PL?action=add-country&sort=name");
        assert_eq!(urls[1], "/taxes/countries/PL?sort=name");
    }

    #[test]
    fn test_is_open_reads_action_param() {
        let recorder = Recorder::default();
        let actions = DialogActions::new(
            &recorder,
            |params| url_with_params("/", params),
            params(&[("action", "add-country")]),
        );

        assert!(actions.is_open("add-country"));
        assert!(!actions.is_open("remove"));
    }

    #[test]
    fn test_confirm_button_state() {
        assert_eq!(
            ConfirmButtonState::from_mutation(false, false, 0),
            ConfirmButtonState::Default
        );
        assert_eq!(
            ConfirmButtonState::from_mutation(true, true, 0),
            ConfirmButtonState::Loading
        );
        assert_eq!(
            ConfirmButtonState::from_mutation(true, false, 0),
            ConfirmButtonState::Success
        );
        assert_eq!(
            ConfirmButtonState::from_mutation(true, false, 2),
            ConfirmButtonState::Error
        );
    }
}
