//! Aggregate module and barrel index.
//!
//! Both list models in input order, which is schema declaration order.

use crudgen_ir::ModelRecord;

use crate::config::CodegenConfig;
use crate::{resolver_class, resolver_stem, service_class, service_stem};
use crate::{GeneratedCode, GeneratedFile, SOURCE_EXT};

/// File name of the barrel.
pub const INDEX_FILE: &str = "index";

pub struct ModuleGenerator<'a> {
    pub config: &'a CodegenConfig,
}

impl<'a> ModuleGenerator<'a> {
    pub fn new(config: &'a CodegenConfig) -> Self {
        Self { config }
    }
}

impl crate::Codegen for ModuleGenerator<'_> {
    fn generate(&self, models: &[ModelRecord]) -> GeneratedCode {
        GeneratedCode {
            files: vec![
                GeneratedFile {
                    path: self.config.module_path(),
                    content: synthesize_module(models, self.config),
                },
                GeneratedFile {
                    path: format!("{}.{}", INDEX_FILE, SOURCE_EXT),
                    content: synthesize_index(models, self.config),
                },
            ],
        }
    }

    fn target(&self) -> &str {
        "nestjs-module"
    }
}

/// Module declaring every resolver and its service as providers.
pub fn synthesize_module(models: &[ModelRecord], config: &CodegenConfig) -> String {
    let mut output = String::new();
    output.push_str("// Auto-generated CRUD module\n");
    output.push_str("import { Module } from '@nestjs/common';\n");
    for model in models {
        output.push_str(&format!(
            "import {{ {} }} from './{}';\n",
            resolver_class(model),
            resolver_stem(model)
        ));
        output.push_str(&format!(
            "import {{ {} }} from './{}';\n",
            service_class(model),
            service_stem(model)
        ));
    }
    output.push('\n');

    output.push_str("@Module({\n");
    output.push_str("  providers: [\n");
    for model in models {
        output.push_str(&format!("    {},\n", resolver_class(model)));
        output.push_str(&format!("    {},\n", service_class(model)));
    }
    output.push_str("  ],\n");
    output.push_str("})\n");
    output.push_str(&format!("export class {} {{}}\n", config.module_name));
    output
}

/// Barrel: the module first, then one re-export per resolver.
pub fn synthesize_index(models: &[ModelRecord], config: &CodegenConfig) -> String {
    let mut output = String::new();
    output.push_str(&format!("export * from './{}';\n", config.module_file));
    for model in models {
        output.push_str(&format!("export * from './{}';\n", resolver_stem(model)));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Codegen;
    use crudgen_ir::ModelField;

    fn models() -> Vec<ModelRecord> {
        ["User", "Post", "UserProfile"]
            .into_iter()
            .map(|name| ModelRecord::new(name, vec![ModelField::new("id", "Int").id()]))
            .collect()
    }

    #[test]
    fn module_registers_providers_in_input_order() {
        let source = synthesize_module(&models(), &CodegenConfig::default());
        assert_eq!(
            source,
            "// Auto-generated CRUD module\n\
             import { Module } from '@nestjs/common';\n\
             import { UserResolver } from './user.resolver';\n\
             import { UserService } from './user.service';\n\
             import { PostResolver } from './post.resolver';\n\
             import { PostService } from './post.service';\n\
             import { UserProfileResolver } from './user-profile.resolver';\n\
             import { UserProfileService } from './user-profile.service';\n\
             \n\
             @Module({\n  providers: [\n    UserResolver,\n    UserService,\n    PostResolver,\n    PostService,\n    UserProfileResolver,\n    UserProfileService,\n  ],\n})\n\
             export class CrudModule {}\n"
        );
    }

    #[test]
    fn index_lists_module_then_resolvers() {
        let source = synthesize_index(&models(), &CodegenConfig::default());
        let lines: Vec<&str> = source.lines().collect();
        assert_eq!(
            lines,
            [
                "export * from './crud.module';",
                "export * from './user.resolver';",
                "export * from './post.resolver';",
                "export * from './user-profile.resolver';",
            ]
        );
    }

    #[test]
    fn configured_module_names() {
        let mut config = CodegenConfig::default();
        config.module_name = "AdminModule".to_string();
        config.module_file = "admin.module".to_string();
        let code = ModuleGenerator::new(&config).generate(&models());
        let paths: Vec<&str> = code.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["admin.module.ts", "index.ts"]);
        assert!(code.files[0].content.ends_with("export class AdminModule {}\n"));
        assert!(code.files[1].content.starts_with("export * from './admin.module';\n"));
    }
}
