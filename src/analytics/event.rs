use serde::Serialize;
use std::collections::BTreeMap;

pub const FLOW_STARTED: &str = "leak_flow_started";
pub const Q1_ANSWERED: &str = "leak_q1_answered";
pub const Q2_ANSWERED: &str = "leak_q2_answered";
pub const Q3_ANSWERED: &str = "leak_q3_answered";
pub const STEP_BACK: &str = "leak_back";
pub const FLOW_COMPLETED: &str = "leak_flow_completed";
pub const FLOW_RESET: &str = "leak_flow_reset";
pub const MESSAGE_COPIED: &str = "message_copied";
pub const SAVE_TOGGLE: &str = "save_toggle";

/// Primitive property value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Text(String),
    Number(u64),
    Flag(bool),
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<u64> for PropValue {
    fn from(value: u64) -> Self {
        PropValue::Number(value)
    }
}

impl From<u8> for PropValue {
    fn from(value: u8) -> Self {
        PropValue::Number(u64::from(value))
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Flag(value)
    }
}

/// A named notification with a flat property map.
///
/// Serializes as `{"event": "...", "props": {...}}`, the body the collection endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    #[serde(rename = "event")]
    name: &'static str,
    props: BTreeMap<&'static str, PropValue>,
}

impl AnalyticsEvent {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            props: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &'static str, value: impl Into<PropValue>) -> Self {
        self.props.insert(key, value.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.props.get(key) {
            Some(PropValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn props(&self) -> &BTreeMap<&'static str, PropValue> {
        &self.props
    }
}
