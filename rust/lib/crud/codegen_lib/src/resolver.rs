//! NestJS GraphQL resolver generator: one `<kebab>.resolver.ts` per model.

use crudgen_ir::{ModelRecord, Operation};

use crate::config::CodegenConfig;
use crate::{args_type, import_list, resolver_class, resolver_stem, service_class, service_stem};
use crate::{GeneratedCode, GeneratedFile, SOURCE_EXT};

pub struct ResolverGenerator<'a> {
    pub config: &'a CodegenConfig,
}

impl<'a> ResolverGenerator<'a> {
    pub fn new(config: &'a CodegenConfig) -> Self {
        Self { config }
    }
}

impl crate::Codegen for ResolverGenerator<'_> {
    fn generate(&self, models: &[ModelRecord]) -> GeneratedCode {
        let files = models
            .iter()
            .map(|model| GeneratedFile {
                path: format!("{}.{}", resolver_stem(model), SOURCE_EXT),
                content: synthesize_resolver(model, self.config),
            })
            .collect();
        GeneratedCode { files }
    }

    fn target(&self) -> &str {
        "nestjs-resolver"
    }
}

/// Resolver source for one model.
///
/// Operations are emitted in [`Operation::ALL`] order. A public operation
/// gets no `@UseGuards` line; the guard import lists each distinct guard
/// once, sorted, and disappears when every operation is public.
pub fn synthesize_resolver(model: &ModelRecord, config: &CodegenConfig) -> String {
    let policy = model.auth_policy();
    let guards = config.guards.guards(&policy);
    let distinct = config.guards.distinct_guards(&policy);
    let class = resolver_class(model);
    let service = service_class(model);

    let mut output = String::new();
    output.push_str(&format!("// Auto-generated CRUD resolver for {}\n", model.name));
    if !distinct.is_empty() {
        output.push_str("import { UseGuards } from '@nestjs/common';\n");
    }
    output.push_str("import { Args, Int, Mutation, Query, Resolver } from '@nestjs/graphql';\n");
    if !distinct.is_empty() {
        output.push_str(&format!(
            "import {{ {} }} from '{}';\n",
            distinct.join(", "),
            config.guards_import
        ));
    }

    let arg_types: Vec<String> = Operation::ALL.iter().map(|op| args_type(model, *op)).collect();
    let types = std::iter::once(model.name.as_str()).chain(arg_types.iter().map(String::as_str));
    output.push_str(&format!(
        "import {{ {} }} from '{}';\n",
        import_list(types),
        config.types_import
    ));
    output.push_str(&format!("import {{ {} }} from './{}';\n\n", service, service_stem(model)));

    output.push_str(&format!("@Resolver(() => {})\n", model.name));
    output.push_str(&format!("export class {} {{\n", class));
    output.push_str(&format!("  constructor(private readonly service: {}) {{}}\n", service));

    for (op, guard) in &guards {
        let name = model.operation_name(*op);
        output.push('\n');
        if let Some(guard) = guard {
            output.push_str(&format!("  @UseGuards({})\n", guard));
        }
        output.push_str(&format!("  {}\n", decorator(model, *op)));
        output.push_str(&format!("  {}(@Args() args: {}) {{\n", name, args_type(model, *op)));
        output.push_str(&format!("    return this.service.{}(args);\n", name));
        output.push_str("  }\n");
    }

    output.push_str("}\n");
    output
}

fn decorator(model: &ModelRecord, op: Operation) -> String {
    match op {
        Operation::ReadMany => format!("@Query(() => [{}])", model.name),
        Operation::Count => "@Query(() => Int)".to_string(),
        Operation::ReadOne => format!("@Query(() => {}, {{ nullable: true }})", model.name),
        Operation::Create | Operation::Update | Operation::Delete => {
            format!("@Mutation(() => {})", model.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Codegen;
    use crudgen_ir::{AuthLevel, AuthPolicy, ModelField};

    fn user(auth: Option<AuthPolicy>) -> ModelRecord {
        let model = ModelRecord::new(
            "User",
            vec![ModelField::new("id", "Int").id(), ModelField::new("name", "String")],
        );
        match auth {
            Some(policy) => model.with_auth(policy),
            None => model,
        }
    }

    /// Lines of the operation block containing `name(`.
    fn block<'a>(source: &'a str, name: &str) -> Vec<&'a str> {
        let lines: Vec<&str> = source.lines().collect();
        let at = lines
            .iter()
            .position(|l| l.trim_start().starts_with(&format!("{}(", name)))
            .unwrap();
        let start = lines[..at].iter().rposition(|l| l.is_empty()).unwrap() + 1;
        lines[start..=at].to_vec()
    }

    #[test]
    fn default_policy_guards_every_operation_with_admin() {
        let source = synthesize_resolver(&user(None), &CodegenConfig::default());
        assert_eq!(source.matches("@UseGuards(AdminGuard)").count(), 6);
        assert!(source.contains("import { AdminGuard } from '../auth/guards';"));
        assert!(!source.contains("JwtAuthGuard"));
    }

    #[test]
    fn public_operation_has_no_guard() {
        let mut policy = AuthPolicy::default();
        policy.read_many = AuthLevel::Public;
        let source = synthesize_resolver(&user(Some(policy)), &CodegenConfig::default());

        let users = block(&source, "users");
        assert!(users.iter().all(|l| !l.contains("@UseGuards")));
        assert_eq!(users, ["  @Query(() => [User])", "  users(@Args() args: FindManyUserArgs) {"]);

        let count = block(&source, "usersCount");
        assert_eq!(count[0], "  @UseGuards(AdminGuard)");
    }

    #[test]
    fn all_public_drops_guard_imports() {
        let model = user(Some(AuthPolicy::uniform(AuthLevel::Public)));
        let source = synthesize_resolver(&model, &CodegenConfig::default());
        assert!(!source.contains("UseGuards"));
        assert!(!source.contains("../auth/guards"));
    }

    #[test]
    fn guard_imports_are_sorted_and_unique() {
        let mut policy = AuthPolicy::default();
        policy.create = AuthLevel::User;
        policy.update = AuthLevel::Custom("editor".into());
        policy.delete = AuthLevel::User;
        let source = synthesize_resolver(&user(Some(policy)), &CodegenConfig::default());
        assert!(source.contains("import { AdminGuard, AuthEditorGuard, JwtAuthGuard } from '../auth/guards';"));
        assert_eq!(block(&source, "createUser")[0], "  @UseGuards(JwtAuthGuard)");
        assert_eq!(block(&source, "updateUser")[0], "  @UseGuards(AuthEditorGuard)");
    }

    #[test]
    fn operations_in_fixed_order_with_delegation() {
        let source = synthesize_resolver(&user(None), &CodegenConfig::default());
        let names = ["users(", "usersCount(", "user(", "createUser(", "updateUser(", "deleteUser("];
        let positions: Vec<usize> = names
            .iter()
            .map(|n| source.find(&format!("  {}@Args", n)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        for name in ["users", "usersCount", "user", "createUser", "updateUser", "deleteUser"] {
            assert!(source.contains(&format!("return this.service.{}(args);", name)));
        }
        assert!(source.contains("  @Query(() => Int)\n  usersCount(@Args() args: FindManyUserArgs) {"));
        assert!(source.contains("  @Query(() => User, { nullable: true })\n  user(@Args() args: FindUniqueUserArgs) {"));
        assert!(source.contains("  @Mutation(() => User)\n  deleteUser(@Args() args: DeleteOneUserArgs) {"));
    }

    #[test]
    fn header_and_imports() {
        let source = synthesize_resolver(&user(None), &CodegenConfig::default());
        let head: Vec<&str> = source.lines().take(6).collect();
        assert_eq!(
            head,
            [
                "// Auto-generated CRUD resolver for User",
                "import { UseGuards } from '@nestjs/common';",
                "import { Args, Int, Mutation, Query, Resolver } from '@nestjs/graphql';",
                "import { AdminGuard } from '../auth/guards';",
                "import { User, FindManyUserArgs, FindUniqueUserArgs, CreateOneUserArgs, UpdateOneUserArgs, DeleteOneUserArgs } from '../@generated';",
                "import { UserService } from './user.service';",
            ]
        );
        assert!(source.contains("@Resolver(() => User)\nexport class UserResolver {"));
        assert!(source.ends_with("}\n"));
    }

    #[test]
    fn idempotent() {
        let model = user(None);
        let config = CodegenConfig::default();
        assert_eq!(synthesize_resolver(&model, &config), synthesize_resolver(&model, &config));
    }

    #[test]
    fn configured_imports_and_guards() {
        let mut config = CodegenConfig::default();
        config.guards_import = "@app/auth".to_string();
        config.types_import = "@app/graphql".to_string();
        config.guards.admin = "RootGuard".to_string();
        let source = synthesize_resolver(&user(None), &config);
        assert!(source.contains("import { RootGuard } from '@app/auth';"));
        assert!(source.contains("} from '@app/graphql';"));
        assert!(source.contains("@UseGuards(RootGuard)"));
    }

    #[test]
    fn file_per_model_named_by_kebab_case() {
        let config = CodegenConfig::default();
        let models = vec![
            user(None),
            ModelRecord::new("UserProfile", vec![ModelField::new("id", "Int").id()]),
        ];
        let code = ResolverGenerator::new(&config).generate(&models);
        let paths: Vec<&str> = code.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["user.resolver.ts", "user-profile.resolver.ts"]);
        let profile = &code.get("user-profile.resolver.ts").unwrap().content;
        assert!(profile.contains("import { UserProfileService } from './user-profile.service';"));
        assert!(profile.contains("userProfilesCount(@Args() args: FindManyUserProfileArgs) {"));
    }
}
