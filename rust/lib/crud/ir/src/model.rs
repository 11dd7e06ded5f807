//! Model IR - one record per `model` block in the schema.

use serde::{Deserialize, Serialize};

use crate::auth::{AuthPolicy, Operation};
use crate::naming;

/// Name of the string scalar type in the schema language.
pub const STRING_SCALAR: &str = "String";

/// Primary display field used when a model has no non-id string field.
pub const DEFAULT_PRIMARY_FIELD: &str = "name";

/// What a field's type refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Built-in scalar (`String`, `Int`, `DateTime`, ...).
    Scalar,
    /// An `enum` declared in the same schema.
    Enum,
    /// Another model (a relation field).
    Object,
}

/// Relation metadata on an object field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    /// Relation name (explicit, or `<A>To<B>` with the model names sorted).
    pub name: String,

    /// Scalar fields on this model holding the foreign key (`fields: [...]`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from_fields: Vec<String>,

    /// Referenced fields on the target model (`references: [...]`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_fields: Vec<String>,

    /// Referential action on delete (e.g. `Cascade`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
}

/// A field declared in a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelField {
    /// Field name as declared (e.g. `createdAt`).
    pub name: String,

    /// Type name without modifiers (e.g. `String`, `Post`).
    #[serde(rename = "type")]
    pub ty: String,

    pub kind: FieldKind,

    /// `@id`
    pub is_id: bool,

    /// Neither optional (`?`) nor a list.
    pub is_required: bool,

    /// `[]` modifier.
    pub is_list: bool,

    /// `@unique`
    pub is_unique: bool,

    /// Foreign-key scalar written through a relation field.
    pub is_read_only: bool,

    /// Value produced by a `@default(...)` generator call.
    pub is_generated: bool,

    /// `@updatedAt`
    pub is_updated_at: bool,

    /// Documentation comment, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    /// Raw `@default(...)` argument, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
}

impl ModelField {
    /// A required scalar field with every flag cleared.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            kind: FieldKind::Scalar,
            is_id: false,
            is_required: true,
            is_list: false,
            is_unique: false,
            is_read_only: false,
            is_generated: false,
            is_updated_at: false,
            documentation: None,
            default: None,
            relation: None,
        }
    }

    pub fn id(mut self) -> Self {
        self.is_id = true;
        self
    }

    pub fn is_string(&self) -> bool {
        self.kind == FieldKind::Scalar && self.ty == STRING_SCALAR
    }
}

/// A model extracted from the schema, with derived names.
///
/// Built once per generation run. `auth` is set once by the annotation
/// parser and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    /// Model name (e.g. `UserProfile`).
    pub name: String,

    /// Pluralized name (e.g. `UserProfiles`, `EquipmentList`).
    pub plural_name: String,

    /// camelCase name (e.g. `userProfile`).
    pub model_property_name: String,

    /// camelCase plural (e.g. `userProfiles`).
    pub plural_model_property_name: String,

    /// Fields in declaration order.
    pub fields: Vec<ModelField>,

    /// Display field: first non-id `String` field, else `name`.
    pub primary_field: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthPolicy>,
}

impl ModelRecord {
    pub fn new(name: impl Into<String>, fields: Vec<ModelField>) -> Self {
        let name = name.into();
        let plural_name = naming::pluralize(&name);
        Self {
            model_property_name: naming::property_name(&name),
            plural_model_property_name: naming::property_name(&plural_name),
            primary_field: primary_field_of(&fields),
            plural_name,
            name,
            fields,
            documentation: None,
            auth: None,
        }
    }

    pub fn with_documentation(mut self, documentation: Option<String>) -> Self {
        self.documentation = documentation;
        self
    }

    pub fn with_auth(mut self, auth: AuthPolicy) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Resolved policy, or the admin-only default when none was attached.
    pub fn auth_policy(&self) -> AuthPolicy {
        self.auth.clone().unwrap_or_default()
    }

    /// `UserProfile` → `user-profile`. Base of every generated file name.
    pub fn kebab_name(&self) -> String {
        naming::kebab_case(&self.name)
    }

    /// Generated name of an operation:
    ///
    /// | operation | name                |
    /// |-----------|---------------------|
    /// | readMany  | `users`             |
    /// | count     | `usersCount`        |
    /// | readOne   | `user`              |
    /// | create    | `createUser`        |
    /// | update    | `updateUser`        |
    /// | delete    | `deleteUser`        |
    pub fn operation_name(&self, op: Operation) -> String {
        match op {
            Operation::ReadMany => self.plural_model_property_name.clone(),
            Operation::Count => format!("{}Count", self.plural_model_property_name),
            Operation::ReadOne => self.model_property_name.clone(),
            Operation::Create => format!("create{}", self.name),
            Operation::Update => format!("update{}", self.name),
            Operation::Delete => format!("delete{}", self.name),
        }
    }

    pub fn field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

fn primary_field_of(fields: &[ModelField]) -> String {
    fields
        .iter()
        .find(|f| !f.is_id && f.is_string())
        .map(|f| f.name.clone())
        .unwrap_or_else(|| DEFAULT_PRIMARY_FIELD.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> ModelRecord {
        ModelRecord::new(
            "User",
            vec![
                ModelField::new("id", "String").id(),
                ModelField::new("age", "Int"),
                ModelField::new("email", "String"),
                ModelField::new("name", "String"),
            ],
        )
    }

    #[test]
    fn derives_names() {
        let m = user();
        assert_eq!(m.plural_name, "Users");
        assert_eq!(m.model_property_name, "user");
        assert_eq!(m.plural_model_property_name, "users");
        assert_eq!(m.kebab_name(), "user");
    }

    #[test]
    fn primary_field_skips_id_and_non_strings() {
        assert_eq!(user().primary_field, "email");
    }

    #[test]
    fn primary_field_defaults_to_name() {
        let m = ModelRecord::new(
            "Counter",
            vec![ModelField::new("id", "String").id(), ModelField::new("value", "Int")],
        );
        assert_eq!(m.primary_field, DEFAULT_PRIMARY_FIELD);
    }

    #[test]
    fn operation_names_follow_table() {
        let m = ModelRecord::new("UserProfile", vec![ModelField::new("id", "Int").id()]);
        let names: Vec<_> = Operation::ALL.iter().map(|op| m.operation_name(*op)).collect();
        assert_eq!(
            names,
            [
                "userProfiles",
                "userProfilesCount",
                "userProfile",
                "createUserProfile",
                "updateUserProfile",
                "deleteUserProfile",
            ]
        );
    }

    #[test]
    fn uncountable_model_names() {
        let m = ModelRecord::new("Equipment", vec![ModelField::new("id", "Int").id()]);
        assert_eq!(m.plural_name, "EquipmentList");
        assert_eq!(m.operation_name(Operation::ReadMany), "equipmentList");
        assert_eq!(m.operation_name(Operation::ReadOne), "equipment");
        assert_eq!(m.operation_name(Operation::Count), "equipmentListCount");
    }

    #[test]
    fn missing_auth_means_default_policy() {
        assert_eq!(user().auth_policy(), AuthPolicy::default());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(user()).unwrap();
        assert_eq!(json["pluralModelPropertyName"], "users");
        assert_eq!(json["fields"][0]["isId"], true);
        assert_eq!(json["fields"][0]["type"], "String");
        assert!(json.get("auth").is_none());
    }
}
