//! Caller-facing operations: model discovery and query execution.
//!
//! This is the surface the content-generator / RPC layer talks to. Models
//! are addressed by composite id (`provider~domain~model`); queries arrive
//! as wire JSON and leave as one of the two encoded result shapes.

use serde_json::json;
use tracing::error;

use crate::config::ServiceSettings;
use crate::encode;
use crate::executor::{ExecuteError, QueryExecutor};
use crate::schema::accessor::{find_model, localized};
use crate::schema::repository::SchemaRepository;
use crate::translate::{self, TranslateError};
use crate::wire::{self, WireError, WireModel, WireModelSummary};

pub mod messages;

/// Machine-readable error codes carried in error payloads and logs.
pub mod codes {
    pub const MALFORMED_QUERY: &str = "MALFORMED_QUERY";
    pub const INVALID_MODEL_ID: &str = "INVALID_MODEL_ID";
    pub const UNKNOWN_MODEL: &str = "UNKNOWN_MODEL";
    pub const UNRESOLVED_REFERENCE: &str = "UNRESOLVED_REFERENCE";
    pub const EXECUTION_FAILED: &str = "EXECUTION_FAILED";
    pub const ENCODING_FAILED: &str = "ENCODING_FAILED";
}

// =============================================================================
// Errors
// =============================================================================

/// Service-level failure, carrying a machine-readable code.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Wire(#[from] WireError),

    #[error("Unknown model '{model}' in domain '{domain}'")]
    UnknownModel { domain: String, model: String },

    #[error(transparent)]
    Translate(TranslateError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("Result encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Wire(_) => codes::MALFORMED_QUERY,
            ServiceError::UnknownModel { .. } => codes::UNKNOWN_MODEL,
            ServiceError::Translate(_) => codes::UNRESOLVED_REFERENCE,
            ServiceError::Execute(_) => codes::EXECUTION_FAILED,
            ServiceError::Encode(_) => codes::ENCODING_FAILED,
        }
    }
}

/// Render the structured error object shown to callers: a machine-readable
/// code plus a localized message.
pub fn error_payload(error: &ServiceError, locale: &str) -> String {
    let code = error.code();
    let message = messages::lookup(code, locale)
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string());
    json!({ "code": code, "message": message }).to_string()
}

// =============================================================================
// Service
// =============================================================================

/// Query service over a schema repository and an execution engine.
pub struct QueryService<R, E> {
    repository: R,
    executor: E,
    settings: ServiceSettings,
}

impl<R, E> QueryService<R, E>
where
    R: SchemaRepository,
    E: QueryExecutor,
{
    pub fn new(repository: R, executor: E, settings: ServiceSettings) -> Self {
        Self {
            repository,
            executor,
            settings,
        }
    }

    fn locale_or_default<'a>(&'a self, locale: &'a str) -> &'a str {
        if locale.is_empty() {
            &self.settings.default_locale
        } else {
            locale
        }
    }

    /// List visible models, optionally narrowed by provider, domain, and a
    /// case-insensitive substring filter on localized name or id.
    pub fn list_models(
        &self,
        provider: Option<&str>,
        domain: Option<&str>,
        filter: Option<&str>,
        locale: &str,
    ) -> Vec<WireModelSummary> {
        let locale = self.locale_or_default(locale);
        if provider.is_some_and(|p| p != self.settings.provider_id) {
            return Vec::new();
        }

        let needle = filter.map(str::to_lowercase);
        let mut summaries = Vec::new();
        for domain_id in self.repository.domain_ids() {
            if domain.is_some_and(|d| d != domain_id) {
                continue;
            }
            let Some(dom) = self.repository.domain(&domain_id) else {
                continue;
            };
            for model in &dom.models {
                let name = localized(&model.names, locale, &model.default_locale)
                    .unwrap_or(&model.id)
                    .to_string();
                if let Some(needle) = &needle {
                    let matches = name.to_lowercase().contains(needle)
                        || model.id.to_lowercase().contains(needle);
                    if !matches {
                        continue;
                    }
                }
                summaries.push(WireModelSummary {
                    class: WireModelSummary::CLASS.to_string(),
                    model_id: format!("{}~{}~{}", self.settings.provider_id, domain_id, model.id),
                    name,
                    description: localized(&model.descriptions, locale, &model.default_locale)
                        .filter(|text| *text != model.id)
                        .map(str::to_string),
                });
            }
        }
        summaries
    }

    /// Fetch the thin representation of one model by composite id.
    ///
    /// Malformed ids and unknown providers/domains/models all return `None`
    /// with a logged error code; none of them raise.
    pub fn get_model(&self, composite_id: &str, locale: &str) -> Option<WireModel> {
        let locale = self.locale_or_default(locale);
        let Some((provider, domain_id, model_id)) = parse_composite_id(composite_id) else {
            error!(code = codes::INVALID_MODEL_ID, id = composite_id, "malformed composite model id");
            return None;
        };
        if provider != self.settings.provider_id {
            error!(code = codes::UNKNOWN_MODEL, id = composite_id, "unknown provider");
            return None;
        }
        let Some(model) = find_model(&self.repository, domain_id, model_id) else {
            error!(code = codes::UNKNOWN_MODEL, id = composite_id, "model not found");
            return None;
        };
        Some(translate::build_thin_model(model, provider, domain_id, locale))
    }

    /// Run a wire query and encode the result in the generic nested shape.
    ///
    /// `Ok(None)` means the engine reported no data; callers surface that as
    /// a "no data" response, not an error.
    pub fn query(
        &self,
        wire_json: &str,
        row_limit: Option<u32>,
        _locale: &str,
    ) -> Result<Option<String>, ServiceError> {
        // The generic shape carries no localized fields.
        let (resolved, result) = self.run(wire_json, row_limit)?;
        Ok(encode::encode(&resolved, result.as_ref())?)
    }

    /// Run a wire query and encode the result in the flat grid shape.
    pub fn query_grid(
        &self,
        wire_json: &str,
        row_limit: Option<u32>,
        locale: &str,
    ) -> Result<Option<String>, ServiceError> {
        let locale = self.locale_or_default(locale).to_string();
        let (_, result) = self.run(wire_json, row_limit)?;
        Ok(encode::encode_grid(result.as_ref(), &locale)?)
    }

    fn run(
        &self,
        wire_json: &str,
        row_limit: Option<u32>,
    ) -> Result<
        (
            translate::ResolvedQuery<'_>,
            Option<crate::executor::TabularResult>,
        ),
        ServiceError,
    > {
        let query = wire::decode_query(wire_json)?;
        let model = find_model(&self.repository, &query.domain_id, &query.model_id).ok_or_else(
            || {
                error!(
                    code = codes::UNKNOWN_MODEL,
                    domain = %query.domain_id,
                    model = %query.model_id,
                    "query targets an unknown model"
                );
                ServiceError::UnknownModel {
                    domain: query.domain_id.clone(),
                    model: query.model_id.clone(),
                }
            },
        )?;
        let resolved =
            translate::resolve(&query, model).map_err(ServiceError::Translate)?;
        let limit = row_limit.or(self.settings.default_row_limit);
        let result = self.executor.execute(&resolved, limit)?;
        Ok((resolved, result))
    }
}

/// Split a composite model id into `(provider, domain, model)`.
///
/// Exactly three non-empty `~`-separated segments are required.
pub fn parse_composite_id(composite_id: &str) -> Option<(&str, &str, &str)> {
    let mut segments = composite_id.split('~');
    let provider = segments.next()?;
    let domain = segments.next()?;
    let model = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    if provider.is_empty() || domain.is_empty() || model.is_empty() {
        return None;
    }
    Some((provider, domain, model))
}
