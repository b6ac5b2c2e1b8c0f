//! Endpoint resolution
//!
//! Templates are relative paths with `:name` placeholders, e.g.
//! `bitable/v1/apps/:baseId/tables`. They are parsed into literal and
//! placeholder segments when registered, so a bad template fails at catalog
//! construction instead of on first use.
//!
//! Values are inserted verbatim. Callers percent-encode identifiers first.

use std::collections::HashMap;

use larkbridge_domain::{LarkError, Result};

/// Action keys registered by [`EndpointCatalog::lark_default`].
pub mod actions {
    /// Tenant access token exchange.
    pub const TENANT_TOKEN: &str = "auth.tenant-token";
    /// Create a bitable app in a folder.
    pub const CREATE_BASE: &str = "folder.create-base";
    /// List the tables of a base.
    pub const LIST_TABLES: &str = "base.list-tables";
    /// Create a table in a base.
    pub const CREATE_TABLE: &str = "base.create-table";
    /// First page of a table's records.
    pub const LIST_RECORDS: &str = "table.list-records";
    /// Create one record.
    pub const CREATE_RECORD: &str = "table.create-record";
    /// Create up to 1000 records.
    pub const BATCH_CREATE: &str = "table.batch-create";
    /// Delete records by id.
    pub const BATCH_DELETE: &str = "table.batch-delete";
    /// Send a bot message.
    pub const SEND_MESSAGE: &str = "bot.send-message";
}

const LARK_TEMPLATES: &[(&str, &str)] = &[
    (actions::TENANT_TOKEN, "auth/v3/tenant_access_token/internal"),
    (actions::CREATE_BASE, "bitable/v1/apps"),
    (actions::LIST_TABLES, "bitable/v1/apps/:baseId/tables"),
    (actions::CREATE_TABLE, "bitable/v1/apps/:baseId/tables"),
    (actions::LIST_RECORDS, "bitable/v1/apps/:baseId/tables/:tableId/records"),
    (actions::CREATE_RECORD, "bitable/v1/apps/:baseId/tables/:tableId/records"),
    (actions::BATCH_CREATE, "bitable/v1/apps/:baseId/tables/:tableId/records/batch_create"),
    (actions::BATCH_DELETE, "bitable/v1/apps/:baseId/tables/:tableId/records/batch_delete"),
    (actions::SEND_MESSAGE, "im/v1/messages?receive_id_type=:receive_id_type"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl EndpointTemplate {
    /// Split `raw` into segments.
    ///
    /// # Errors
    /// `MalformedTemplate` when a `:` is not followed by an identifier
    /// (`[A-Za-z_][A-Za-z0-9_]*`).
    pub fn parse(raw: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            if ch != ':' {
                literal.push(ch);
                continue;
            }

            let mut name = String::new();
            while let Some(&(_, next)) = chars.peek() {
                let valid = if name.is_empty() {
                    next.is_ascii_alphabetic() || next == '_'
                } else {
                    next.is_ascii_alphanumeric() || next == '_'
                };
                if !valid {
                    break;
                }
                name.push(next);
                chars.next();
            }

            if name.is_empty() {
                return Err(LarkError::MalformedTemplate(format!(
                    "'{raw}' has a ':' without a placeholder name at byte {idx}"
                )));
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(name));
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { raw: raw.to_string(), segments })
    }

    /// Template text as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Distinct placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(name) = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name.as_str());
                }
            }
        }
        names
    }

    /// Whether `name` (without `:`) appears as a placeholder.
    pub fn declares(&self, name: &str) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Placeholder(p) if p == name))
    }

    /// Substitute every placeholder occurrence.
    ///
    /// Parameter names may be given with or without the leading `:`.
    ///
    /// # Errors
    /// - `MissingPlaceholder` when a parameter names a placeholder this
    ///   template does not declare
    /// - `UnresolvedPlaceholder` when a declared placeholder has no value
    pub fn render(&self, params: &[(&str, &str)]) -> Result<String> {
        for (key, _) in params {
            let name = key.trim_start_matches(':');
            if !self.declares(name) {
                return Err(LarkError::MissingPlaceholder(format!(":{name}")));
            }
        }

        let mut path = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Placeholder(name) => {
                    let value = params
                        .iter()
                        .find(|(key, _)| key.trim_start_matches(':') == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| LarkError::UnresolvedPlaceholder(format!(":{name}")))?;
                    path.push_str(value);
                }
            }
        }

        Ok(path)
    }
}

/// Named endpoint templates. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct EndpointCatalog {
    templates: HashMap<String, EndpointTemplate>,
}

impl EndpointCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every endpoint the gateway calls.
    ///
    /// # Errors
    /// Only if a built-in template fails to parse.
    pub fn lark_default() -> Result<Self> {
        Self::from_pairs(LARK_TEMPLATES.iter().copied())
    }

    /// Build a catalog from `(action, template)` pairs.
    ///
    /// # Errors
    /// `MalformedTemplate` for the first template that does not parse.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let mut catalog = Self::new();
        for (action, raw) in pairs {
            catalog.register(action, raw)?;
        }
        Ok(catalog)
    }

    /// Parse and add a template, replacing any previous one for `action`.
    ///
    /// # Errors
    /// `MalformedTemplate` if `raw` does not parse.
    pub fn register(&mut self, action: &str, raw: &str) -> Result<&mut Self> {
        let template = EndpointTemplate::parse(raw)?;
        self.templates.insert(action.to_string(), template);
        Ok(self)
    }

    /// Template registered for `action`.
    pub fn get(&self, action: &str) -> Option<&EndpointTemplate> {
        self.templates.get(action)
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no action is registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Resolve `action` to a concrete path.
    ///
    /// # Errors
    /// `UnknownAction` when nothing is registered under `action`, otherwise
    /// whatever [`EndpointTemplate::render`] reports.
    pub fn resolve(&self, action: &str, params: &[(&str, &str)]) -> Result<String> {
        self.get(action)
            .ok_or_else(|| LarkError::UnknownAction(action.to_string()))?
            .render(params)
    }
}

/// Free-function form of [`EndpointCatalog::resolve`].
///
/// # Errors
/// See [`EndpointCatalog::resolve`].
pub fn resolve(catalog: &EndpointCatalog, action: &str, params: &[(&str, &str)]) -> Result<String> {
    catalog.resolve(action, params)
}
