//! `@crudAuth` annotation parser.
//!
//! A model's access policy lives in the documentation comment right above
//! its declaration:
//!
//! ```text
//! /// Blog author.
//! /// @crudAuth: { "create": "user", "readMany": "public" }
//! model User { ... }
//! ```
//!
//! Keys are the six operation keys; values are `public`, `user`, `admin` or
//! a custom role. Unspecified keys keep the base policy (admin-only by default).
//! A malformed fragment never fails generation: it is logged and the base
//! policy is used.

use crudgen_ir::{AuthOverrides, AuthPolicy, ModelRecord};
use tracing::{debug, warn};

use crate::error::AnnotationError;
use crate::line::{LineClassifier, LineKind};

/// Marker introducing the JSON policy fragment.
pub const CRUD_AUTH_MARKER: &str = "@crudAuth:";

/// Resolves `@crudAuth` annotations against a base policy.
#[derive(Debug, Clone, Default)]
pub struct AnnotationParser {
    defaults: AuthPolicy,
}

impl AnnotationParser {
    /// Parser with the admin-only base policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser with a caller-supplied base policy.
    pub fn with_defaults(defaults: AuthPolicy) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &AuthPolicy {
        &self.defaults
    }

    /// Policy for `model` as annotated in `source`.
    ///
    /// Returns the base policy unchanged when the model is not declared,
    /// carries no annotation, or the annotation is malformed.
    pub fn resolve(&self, source: &str, model: &str) -> AuthPolicy {
        let Some(docs) = documentation_for(source, model) else {
            debug!("model '{}' not declared in schema text, using default policy", model);
            return self.defaults.clone();
        };
        match parse_overrides(model, &docs) {
            Ok(Some(overrides)) => self.defaults.merge(&overrides),
            Ok(None) => self.defaults.clone(),
            Err(e) => {
                warn!("{}; using default policy", e);
                self.defaults.clone()
            }
        }
    }

    /// Attach a resolved policy to every model.
    pub fn annotate(&self, source: &str, models: &mut [ModelRecord]) {
        for model in models.iter_mut() {
            let policy = self.resolve(source, &model.name);
            debug!(model = %model.name, ?policy, "resolved auth policy");
            model.auth = Some(policy);
        }
    }
}

/// Policy for `model` with the admin-only base policy.
pub fn resolve_auth_for_model(source: &str, model: &str) -> AuthPolicy {
    AnnotationParser::new().resolve(source, model)
}

/// Attach policies to `models` with the admin-only base policy.
pub fn annotate(source: &str, models: &mut [ModelRecord]) {
    AnnotationParser::new().annotate(source, models)
}

/// Documentation lines directly attached to `model`'s declaration.
///
/// `None` when the model is never declared. Documentation before one model
/// never carries over to the next: the buffer resets at every declaration.
pub fn documentation_for<'a>(source: &'a str, model: &str) -> Option<Vec<&'a str>> {
    let mut classifier = LineClassifier::new();
    let mut pending = Vec::new();
    for line in source.lines() {
        match classifier.classify(line) {
            LineKind::ModelStart(name) if name == model => return Some(pending),
            LineKind::ModelStart(_) => pending.clear(),
            LineKind::Documentation(text) => pending.push(text),
            LineKind::Other => {}
        }
    }
    None
}

/// Parse the first `@crudAuth:` fragment in `docs`.
///
/// `Ok(None)` when no line carries the marker.
pub fn parse_overrides(model: &str, docs: &[&str]) -> Result<Option<AuthOverrides>, AnnotationError> {
    let Some(fragment) = docs.iter().find_map(|line| {
        line.find(CRUD_AUTH_MARKER)
            .map(|pos| line[pos + CRUD_AUTH_MARKER.len()..].trim())
    }) else {
        return Ok(None);
    };

    let malformed = |reason: String| AnnotationError::Malformed {
        model: model.to_string(),
        reason,
    };

    // Only the leading JSON value counts; prose after it is ignored.
    let value = match serde_json::Deserializer::from_str(fragment)
        .into_iter::<serde_json::Value>()
        .next()
    {
        Some(Ok(value)) => value,
        Some(Err(e)) => return Err(malformed(e.to_string())),
        None => return Err(malformed("empty annotation".to_string())),
    };
    if !value.is_object() {
        return Err(malformed(format!("expected a JSON object, got `{}`", fragment)));
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| malformed(e.to_string()))
}
