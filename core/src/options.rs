//! Game options and their packed string form.
//!
//! Packed form: `KEY=value` pairs joined by `,`, keys in sorted order.
//! Values: `t`/`f` for booleans, decimal for integers, `t7`/`f7` for an
//! integer with an enable flag, anything else is text.

use crate::error::{SaveGameError, SaveResult};
use std::collections::BTreeMap;

/// Option key holding the maximum number of players.
pub const MAX_PLAYERS_KEY: &str = "PL";

const MAX_KEY_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Int(i32),
    IntBool(bool, i32),
    Text(String),
}

impl OptionValue {
    fn pack(&self) -> String {
        match self {
            Self::Bool(b) => flag(*b).to_string(),
            Self::Int(n) => n.to_string(),
            Self::IntBool(b, n) => format!("{}{n}", flag(*b)),
            Self::Text(s) => s.clone(),
        }
    }

    fn parse(raw: &str) -> Self {
        match raw {
            "t" => return Self::Bool(true),
            "f" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(n) = raw.parse::<i32>() {
            return Self::Int(n);
        }
        if let Some(rest) = raw.strip_prefix('t') {
            if let Ok(n) = rest.parse::<i32>() {
                return Self::IntBool(true, n);
            }
        }
        if let Some(rest) = raw.strip_prefix('f') {
            if let Ok(n) = rest.parse::<i32>() {
                return Self::IntBool(false, n);
            }
        }
        Self::Text(raw.to_string())
    }
}

fn flag(b: bool) -> char {
    if b { 't' } else { 'f' }
}

/// Game options keyed by short uppercase names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameOptions {
    values: BTreeMap<String, OptionValue>,
}

impl GameOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option. Rejects keys and values the packed form can't carry
    /// back unchanged.
    pub fn insert(&mut self, key: &str, value: OptionValue) -> SaveResult<()> {
        let valid_key = !key.is_empty()
            && key.len() <= MAX_KEY_LEN
            && key
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
        if !valid_key {
            return Err(options_error(key, "key must be 1-8 chars of A-Z, 0-9 or _"));
        }
        if let OptionValue::Text(text) = &value {
            if text.contains([',', '=']) {
                return Err(options_error(text, "text values can't contain ',' or '='"));
            }
            if OptionValue::parse(text) != value {
                return Err(options_error(text, "text value would read back as another type"));
            }
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    /// Builder form of [`GameOptions::insert`].
    pub fn with(mut self, key: &str, value: OptionValue) -> SaveResult<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn max_players(&self) -> Option<usize> {
        match self.get(MAX_PLAYERS_KEY) {
            Some(OptionValue::Int(n)) | Some(OptionValue::IntBool(true, n)) => {
                usize::try_from(*n).ok()
            }
            _ => None,
        }
    }

    pub fn pack(&self) -> String {
        self.values
            .iter()
            .map(|(key, value)| format!("{key}={}", value.pack()))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn parse(packed: &str) -> SaveResult<Self> {
        let mut options = Self::new();
        if packed.is_empty() {
            return Ok(options);
        }
        for pair in packed.split(',') {
            let (key, raw) = pair
                .split_once('=')
                .ok_or_else(|| options_error(packed, &format!("'{pair}' is not KEY=value")))?;
            if options.values.contains_key(key) {
                return Err(options_error(packed, &format!("duplicate key '{key}'")));
            }
            options
                .insert(key, OptionValue::parse(raw))
                .map_err(|e| options_error(packed, &e.to_string()))?;
        }
        Ok(options)
    }
}

fn options_error(packed: &str, reason: &str) -> SaveGameError {
    SaveGameError::InvalidOptions {
        packed: packed.to_string(),
        reason: reason.to_string(),
    }
}
