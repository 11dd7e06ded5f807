//! Generation engine: schema text in, generated files out.
//!
//! Synchronous and side-effect free; reading the schema and writing the
//! files belong to the caller.

use std::collections::HashMap;

use crudgen_ir::ModelRecord;
use crudgen_parser::{try_extract, AnnotationParser, PrismaParser, SchemaParser};
use tracing::{debug, error, info, warn};

use crate::config::CodegenConfig;
use crate::error::CodegenError;
use crate::{Codegen, GeneratedCode, ModuleGenerator, ResolverGenerator, ServiceGenerator};

pub struct Engine {
    config: CodegenConfig,
    parser: Box<dyn SchemaParser>,
}

impl Engine {
    /// Engine with the built-in Prisma schema parser.
    pub fn new(config: CodegenConfig) -> Self {
        Self::with_parser(config, Box::new(PrismaParser))
    }

    pub fn with_parser(config: CodegenConfig, parser: Box<dyn SchemaParser>) -> Self {
        Self { config, parser }
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Extract models from `source` and attach their resolved policies.
    ///
    /// Fails when the text is empty or unparseable, or declares no model
    /// with fields, or when two models would write the same files. A
    /// malformed annotation only affects its own model.
    pub fn models(&self, source: &str) -> Result<Vec<ModelRecord>, CodegenError> {
        if source.trim().is_empty() {
            return Err(CodegenError::SchemaUnreadable("schema text is empty".to_string()));
        }
        let mut models = try_extract(source, self.parser.as_ref()).map_err(|e| {
            error!("failed to parse schema: {}", e);
            CodegenError::SchemaUnreadable(e.to_string())
        })?;
        if models.is_empty() {
            return Err(CodegenError::NothingToGenerate);
        }
        check_file_stems(&models)?;

        AnnotationParser::with_defaults(self.config.base_policy()).annotate(source, &mut models);
        info!("{} model(s) extracted", models.len());
        Ok(models)
    }

    /// Full pipeline. No files are produced unless every step succeeds.
    pub fn generate(&self, source: &str) -> Result<GeneratedCode, CodegenError> {
        let models = self.models(source)?;
        Ok(self.generate_models(&models))
    }

    /// Per-model resolvers and services, then the shared module and index.
    pub fn generate_models(&self, models: &[ModelRecord]) -> GeneratedCode {
        let generators: [Box<dyn Codegen + '_>; 3] = [
            Box::new(ResolverGenerator::new(&self.config)),
            Box::new(ServiceGenerator::new(&self.config)),
            Box::new(ModuleGenerator::new(&self.config)),
        ];

        let mut code = GeneratedCode::default();
        for generator in &generators {
            let generated = generator.generate(models);
            debug!("{}: {} file(s)", generator.target(), generated.files.len());
            code.extend(generated);
        }
        code
    }
}

/// File names derive from the kebab-cased model name, so `UserProfile` and
/// `User_Profile` would overwrite (or silently skip) each other's files.
fn check_file_stems(models: &[ModelRecord]) -> Result<(), CodegenError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for model in models {
        let stem = model.kebab_name();
        if let Some(first) = seen.get(&stem) {
            warn!("models '{}' and '{}' both map to '{}'", first, model.name, stem);
            return Err(CodegenError::NameCollision {
                stem,
                first: first.to_string(),
                second: model.name.clone(),
            });
        }
        seen.insert(stem, &model.name);
    }
    Ok(())
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(CodegenConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudgen_ir::AuthLevel;
    use crudgen_parser::{SchemaError, StructuralSchema};

    const BLOG: &str = r#"
/// @crudAuth: { "readMany": "public", "readOne": "public" }
model Post {
  id    Int    @id @default(autoincrement())
  title String
}
"#;

    #[test]
    fn empty_schema_is_unreadable() {
        let engine = Engine::default();
        assert!(matches!(engine.generate(""), Err(CodegenError::SchemaUnreadable(_))));
        assert!(matches!(engine.generate("  \n"), Err(CodegenError::SchemaUnreadable(_))));
    }

    #[test]
    fn broken_schema_is_unreadable() {
        let result = Engine::default().generate("model Post {\n  id Int @id\n");
        assert!(matches!(result, Err(CodegenError::SchemaUnreadable(_))));
    }

    #[test]
    fn schema_without_models_has_nothing_to_generate() {
        let result = Engine::default().generate("enum Role {\n  USER\n}\n");
        assert!(matches!(result, Err(CodegenError::NothingToGenerate)));
    }

    #[test]
    fn colliding_file_stems_are_rejected() {
        let src = "model UserProfile {\n  id Int @id\n}\nmodel User_Profile {\n  id Int @id\n}\n";
        match Engine::default().generate(src) {
            Err(CodegenError::NameCollision { stem, first, second }) => {
                assert_eq!(stem, "user-profile");
                assert_eq!(first, "UserProfile");
                assert_eq!(second, "User_Profile");
            }
            other => panic!("expected a name collision, got {:?}", other),
        }
    }

    #[test]
    fn files_in_pipeline_order() {
        let code = Engine::default().generate(BLOG).unwrap();
        let paths: Vec<&str> = code.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["post.resolver.ts", "post.service.ts", "crud.module.ts", "index.ts"]);
    }

    #[test]
    fn configured_base_policy_is_merged_under_annotations() {
        let mut config = CodegenConfig::default();
        config.default_policy = Some(crudgen_ir::AuthOverrides {
            create: Some(AuthLevel::User),
            read_one: Some(AuthLevel::User),
            ..Default::default()
        });
        let models = Engine::new(config).models(BLOG).unwrap();
        let policy = models[0].auth_policy();
        assert_eq!(policy.read_one, AuthLevel::Public);
        assert_eq!(policy.create, AuthLevel::User);
        assert_eq!(policy.delete, AuthLevel::Admin);
    }

    #[test]
    fn injected_parser_failure() {
        struct Broken;
        impl SchemaParser for Broken {
            fn parse(&self, _: &str) -> Result<StructuralSchema, SchemaError> {
                Err(SchemaError::UnexpectedEof { expected: "model" })
            }
        }
        let engine = Engine::with_parser(CodegenConfig::default(), Box::new(Broken));
        assert!(matches!(engine.generate(BLOG), Err(CodegenError::SchemaUnreadable(_))));
    }
}
