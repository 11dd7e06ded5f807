//! Schema model extractor: structural parse → [`ModelRecord`]s.

use std::collections::HashSet;

use crudgen_ir::{FieldKind, ModelField, ModelRecord, Relation};
use tracing::{debug, error, warn};

use crate::error::SchemaError;
use crate::schema::{PrismaParser, SchemaParser, StructuralField, StructuralModel};

/// `@default(...)` calls whose value the database produces.
const GENERATORS: &[&str] = &[
    "autoincrement",
    "cuid",
    "dbgenerated",
    "nanoid",
    "now",
    "ulid",
    "uuid",
];

/// Extract models with the built-in parser.
///
/// Never fails: an unparseable schema is logged and yields no models.
pub fn extract(source: &str) -> Vec<ModelRecord> {
    extract_with(source, &PrismaParser)
}

/// Extract models with an injected parser. Same failure behavior as [`extract`].
pub fn extract_with(source: &str, parser: &dyn SchemaParser) -> Vec<ModelRecord> {
    match try_extract(source, parser) {
        Ok(models) => models,
        Err(e) => {
            error!("failed to parse schema: {}", e);
            Vec::new()
        }
    }
}

/// Extract models, surfacing parser failures to the caller.
///
/// Models without fields are dropped (with a warning): every returned
/// record has a non-empty name and at least one field.
pub fn try_extract(source: &str, parser: &dyn SchemaParser) -> Result<Vec<ModelRecord>, SchemaError> {
    let schema = parser.parse(source)?;

    let model_names: HashSet<&str> = schema.models.iter().map(|m| m.name.as_str()).collect();
    let enum_names: HashSet<&str> = schema.enums.iter().map(String::as_str).collect();

    let records = schema
        .models
        .iter()
        .filter_map(|model| {
            if model.fields.is_empty() {
                warn!("model '{}' (line {}) declares no fields, skipping", model.name, model.line);
                return None;
            }
            let record = to_record(model, &model_names, &enum_names);
            debug!(
                "extracted model '{}' ({} fields, primary field '{}')",
                record.name,
                record.fields.len(),
                record.primary_field
            );
            Some(record)
        })
        .collect();

    Ok(records)
}

fn to_record(model: &StructuralModel, models: &HashSet<&str>, enums: &HashSet<&str>) -> ModelRecord {
    // Scalars named in some relation's `fields: [...]` are written through the relation.
    let foreign_keys: HashSet<String> = model
        .fields
        .iter()
        .filter_map(|f| f.attribute("relation"))
        .filter_map(|a| a.arg("fields"))
        .flat_map(|arg| arg.as_list())
        .collect();

    let fields = model
        .fields
        .iter()
        .map(|f| to_field(&model.name, f, models, enums, &foreign_keys))
        .collect();

    ModelRecord::new(model.name.clone(), fields).with_documentation(model.documentation.clone())
}

fn to_field(
    model: &str,
    field: &StructuralField,
    models: &HashSet<&str>,
    enums: &HashSet<&str>,
    foreign_keys: &HashSet<String>,
) -> ModelField {
    let kind = if models.contains(field.ty.as_str()) {
        FieldKind::Object
    } else if enums.contains(field.ty.as_str()) {
        FieldKind::Enum
    } else {
        FieldKind::Scalar
    };

    let default = field
        .attribute("default")
        .and_then(|a| a.positional())
        .map(|arg| arg.value.clone());
    let is_generated = default.as_deref().is_some_and(is_generator_call);

    let relation = (kind == FieldKind::Object).then(|| to_relation(model, field));

    ModelField {
        name: field.name.clone(),
        ty: field.ty.clone(),
        kind,
        is_id: field.has_attribute("id"),
        is_required: !field.optional && !field.list,
        is_list: field.list,
        is_unique: field.has_attribute("unique"),
        is_read_only: foreign_keys.contains(&field.name),
        is_generated,
        is_updated_at: field.has_attribute("updatedAt"),
        documentation: field.documentation.clone(),
        default,
        relation,
    }
}

fn to_relation(model: &str, field: &StructuralField) -> Relation {
    let attr = field.attribute("relation");
    let explicit_name = attr
        .and_then(|a| a.arg("name").or_else(|| a.positional()))
        .map(|arg| arg.as_str().to_string());

    Relation {
        name: explicit_name.unwrap_or_else(|| default_relation_name(model, &field.ty)),
        from_fields: attr
            .and_then(|a| a.arg("fields"))
            .map(|arg| arg.as_list())
            .unwrap_or_default(),
        to_fields: attr
            .and_then(|a| a.arg("references"))
            .map(|arg| arg.as_list())
            .unwrap_or_default(),
        on_delete: attr
            .and_then(|a| a.arg("onDelete"))
            .map(|arg| arg.value.clone()),
    }
}

/// Unnamed relations are named after both models, sorted: `PostToUser`.
fn default_relation_name(a: &str, b: &str) -> String {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    format!("{}To{}", first, second)
}

fn is_generator_call(value: &str) -> bool {
    GENERATORS.iter().any(|g| {
        value
            .strip_prefix(g)
            .is_some_and(|rest| rest.starts_with('('))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOG: &str = r#"
enum Role {
  USER
  ADMIN
}

/// Blog author.
model User {
  id        Int      @id @default(autoincrement())
  email     String   @unique
  role      Role     @default(USER)
  posts     Post[]
  updatedAt DateTime @updatedAt
}

model Post {
  id       String  @id @default(uuid())
  title    String
  body     String?
  author   User    @relation(fields: [authorId], references: [id], onDelete: Cascade)
  authorId Int
}
"#;

    #[test]
    fn extracts_models_in_declaration_order() {
        let models = extract(BLOG);
        let names: Vec<_> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["User", "Post"]);
        assert_eq!(models[0].documentation.as_deref(), Some("Blog author."));
        assert_eq!(models[0].plural_name, "Users");
        assert_eq!(models[1].plural_model_property_name, "posts");
    }

    #[test]
    fn field_flags() {
        let models = extract(BLOG);
        let user = &models[0];

        let id = user.field("id").unwrap();
        assert!(id.is_id && id.is_generated && id.is_required);
        assert_eq!(id.default.as_deref(), Some("autoincrement()"));

        assert!(user.field("email").unwrap().is_unique);
        assert_eq!(user.field("role").unwrap().kind, FieldKind::Enum);
        assert!(!user.field("role").unwrap().is_generated);

        let posts = user.field("posts").unwrap();
        assert!(posts.is_list && !posts.is_required);
        assert_eq!(posts.kind, FieldKind::Object);

        assert!(user.field("updatedAt").unwrap().is_updated_at);

        let post = &models[1];
        assert!(!post.field("body").unwrap().is_required);
        assert!(post.field("authorId").unwrap().is_read_only);
        assert!(!post.field("title").unwrap().is_read_only);
    }

    #[test]
    fn relation_metadata() {
        let models = extract(BLOG);
        let author = models[1].field("author").unwrap().relation.clone().unwrap();
        assert_eq!(author.name, "PostToUser");
        assert_eq!(author.from_fields, ["authorId"]);
        assert_eq!(author.to_fields, ["id"]);
        assert_eq!(author.on_delete.as_deref(), Some("Cascade"));

        let posts = models[0].field("posts").unwrap().relation.clone().unwrap();
        assert_eq!(posts.name, "PostToUser");
        assert!(posts.from_fields.is_empty());
    }

    #[test]
    fn primary_field_selection() {
        let models = extract(BLOG);
        assert_eq!(models[0].primary_field, "email");
        // Post's id is a String but it is the id; title comes next.
        assert_eq!(models[1].primary_field, "title");

        let only_numbers = extract("model Counter { id Int @id value Int }");
        assert_eq!(only_numbers[0].primary_field, "name");
    }

    #[test]
    fn malformed_schema_yields_empty_list() {
        assert!(extract("model User {\n  id Int @id\n").is_empty());
        assert!(try_extract("model User {", &PrismaParser).is_err());
    }

    #[test]
    fn models_without_fields_are_dropped() {
        let models = extract("model Empty {}\nmodel Full { id Int @id }");
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "Full");
    }

    #[test]
    fn injected_parser() {
        struct Fixed;
        impl SchemaParser for Fixed {
            fn parse(&self, _: &str) -> Result<crate::StructuralSchema, SchemaError> {
                PrismaParser.parse("model Widget { id Int @id label String }")
            }
        }
        let models = extract_with("ignored", &Fixed);
        assert_eq!(models[0].name, "Widget");
        assert_eq!(models[0].primary_field, "label");
    }

    #[test]
    fn generator_calls() {
        assert!(is_generator_call("now()"));
        assert!(is_generator_call("dbgenerated(\"gen_random_uuid()\")"));
        assert!(!is_generator_call("\"now\""));
        assert!(!is_generator_call("USER"));
        assert!(!is_generator_call("nowish()"));
    }
}
