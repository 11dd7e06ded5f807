//! Data-access service generator: one `<kebab>.service.ts` per model.
//!
//! Each resolver operation delegates to the service method of the same
//! name, which forwards to the Prisma client delegate of the model.

use crudgen_ir::{naming, ModelRecord, Operation};

use crate::config::CodegenConfig;
use crate::{args_type, import_list, service_class, service_stem};
use crate::{GeneratedCode, GeneratedFile, SOURCE_EXT};

pub struct ServiceGenerator<'a> {
    pub config: &'a CodegenConfig,
}

impl<'a> ServiceGenerator<'a> {
    pub fn new(config: &'a CodegenConfig) -> Self {
        Self { config }
    }
}

impl crate::Codegen for ServiceGenerator<'_> {
    fn generate(&self, models: &[ModelRecord]) -> GeneratedCode {
        let files = models
            .iter()
            .map(|model| GeneratedFile {
                path: format!("{}.{}", service_stem(model), SOURCE_EXT),
                content: synthesize_service(model, self.config),
            })
            .collect();
        GeneratedCode { files }
    }

    fn target(&self) -> &str {
        "nestjs-service"
    }
}

pub fn synthesize_service(model: &ModelRecord, config: &CodegenConfig) -> String {
    let mut output = String::new();
    // Prisma client delegates keep the model name with its first letter lowered.
    let delegate = naming::lower_first(&model.name);

    output.push_str(&format!("// Auto-generated CRUD service for {}\n", model.name));
    output.push_str("import { Injectable } from '@nestjs/common';\n");
    output.push_str(&format!("import {{ PrismaService }} from '{}';\n", config.prisma_import));

    let arg_types: Vec<String> = Operation::ALL.iter().map(|op| args_type(model, *op)).collect();
    output.push_str(&format!(
        "import {{ {} }} from '{}';\n\n",
        import_list(arg_types.iter().map(String::as_str)),
        config.types_import
    ));

    output.push_str("@Injectable()\n");
    output.push_str(&format!("export class {} {{\n", service_class(model)));
    output.push_str("  constructor(private readonly prisma: PrismaService) {}\n");

    for op in Operation::ALL {
        output.push('\n');
        output.push_str(&format!(
            "  {}(args: {}) {{\n",
            model.operation_name(op),
            args_type(model, op)
        ));
        output.push_str(&format!("    return this.prisma.{}.{};\n", delegate, client_call(op)));
        output.push_str("  }\n");
    }

    output.push_str("}\n");
    output
}

fn client_call(op: Operation) -> &'static str {
    match op {
        Operation::ReadMany => "findMany(args)",
        Operation::Count => "count({ where: args.where })",
        Operation::ReadOne => "findUnique(args)",
        Operation::Create => "create(args)",
        Operation::Update => "update(args)",
        Operation::Delete => "delete(args)",
    }
}
