//! Query string and urlencoded form decoding.

use crate::error::AppError;
use http::Uri;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Form(HashMap<String, String>);

impl Form {
    pub fn parse(body: &str) -> Self {
        Self(url::form_urlencoded::parse(body.as_bytes()).into_owned().collect())
    }

    /// Field value; absent or blank fields fail form binding.
    pub fn required(&self, key: &str) -> Result<String, AppError> {
        match self.0.get(key) {
            Some(v) if !v.trim().is_empty() => Ok(v.clone()),
            _ => Err(AppError::MissingField(key.to_string())),
        }
    }
}

pub fn query_param(uri: &Uri, key: &str) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
