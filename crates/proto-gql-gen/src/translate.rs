//! Translation of protobuf descriptors into GraphQL schema trees.
use std::collections::{HashMap, HashSet};

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use protobuf::descriptor::field_descriptor_proto::{Label, Type};
use protobuf::descriptor::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    ServiceDescriptorProto,
};

use crate::config::Config;
use crate::graphql::{
    Argument, Directive, DirectiveDef, EnumType, Field, InputType, ObjectType, Schema, TypeDef,
    TypeRef,
};
use crate::{Error, Result};

/// One logical GraphQL schema and the descriptor files it was derived from.
#[derive(Debug)]
pub struct SchemaGroup {
    pub schema: Schema,
    /// Ordered names of the descriptor files this schema covers. Non-empty
    /// for every group the translator produces.
    pub source_files: Vec<String>,
}

/// Translate the files named in `files_to_generate` into schema groups.
///
/// With `merge_files` set, all generated files land in a single group;
/// otherwise each file becomes its own group. `files` must also contain the
/// imported descriptors so that cross-file type references resolve.
pub fn translate(
    files: &[FileDescriptorProto],
    files_to_generate: &[String],
    config: &Config,
) -> Result<Vec<SchemaGroup>> {
    if files_to_generate.is_empty() {
        return Ok(Vec::new());
    }
    let index = TypeIndex::build(files, config);
    let by_name: HashMap<&str, &FileDescriptorProto> =
        files.iter().map(|file| (file.name(), file)).collect();
    let targets = files_to_generate
        .iter()
        .map(|name| {
            by_name
                .get(name.as_str())
                .copied()
                .ok_or_else(|| Error::Translate(format!("missing descriptor for {name}")))
        })
        .collect::<Result<Vec<_>>>()?;

    if config.merge_files {
        let mut builder = SchemaBuilder::new(&index, config);
        for file in &targets {
            builder.add_file(file);
        }
        return Ok(vec![SchemaGroup {
            schema: builder.finish(),
            source_files: files_to_generate.to_vec(),
        }]);
    }
    Ok(targets
        .iter()
        .map(|file| {
            let mut builder = SchemaBuilder::new(&index, config);
            builder.add_file(file);
            SchemaGroup {
                schema: builder.finish(),
                source_files: vec![file.name().to_string()],
            }
        })
        .collect())
}

/// Namespace prefix for a file's types: the first service's name if the file
/// declares one, otherwise the last package segment.
fn file_prefix(file: &FileDescriptorProto) -> String {
    if let Some(service) = file.service.first() {
        return service.name().to_upper_camel_case();
    }
    file.package()
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_upper_camel_case()
}

fn proto_full_name(package: &str, relative: &str) -> String {
    if package.is_empty() {
        format!(".{relative}")
    } else {
        format!(".{package}.{relative}")
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Maps fully qualified proto type names (`.pkg.Outer.Inner`) to GraphQL
/// names and message descriptors, across the whole descriptor set.
struct TypeIndex<'a> {
    names: HashMap<String, String>,
    messages: HashMap<String, &'a DescriptorProto>,
}

impl<'a> TypeIndex<'a> {
    fn build(files: &'a [FileDescriptorProto], config: &Config) -> Self {
        let mut index = TypeIndex {
            names: HashMap::new(),
            messages: HashMap::new(),
        };
        for file in files {
            let prefix = if config.type_prefix {
                file_prefix(file)
            } else {
                String::new()
            };
            for message in &file.message_type {
                index.add_message(file.package(), &prefix, "", message);
            }
            for enum_type in &file.enum_type {
                index.add_name(file.package(), &prefix, enum_type.name());
            }
        }
        index
    }

    fn add_message(
        &mut self,
        package: &str,
        prefix: &str,
        parent: &str,
        message: &'a DescriptorProto,
    ) {
        let relative = child_path(parent, message.name());
        let full = proto_full_name(package, &relative);
        self.names
            .insert(full.clone(), format!("{prefix}{}", relative.replace('.', "_")));
        self.messages.insert(full, message);
        for nested in &message.nested_type {
            self.add_message(package, prefix, &relative, nested);
        }
        for enum_type in &message.enum_type {
            self.add_name(package, prefix, &child_path(&relative, enum_type.name()));
        }
    }

    fn add_name(&mut self, package: &str, prefix: &str, relative: &str) {
        self.names.insert(
            proto_full_name(package, relative),
            format!("{prefix}{}", relative.replace('.', "_")),
        );
    }

    /// GraphQL name for a proto type reference. Unindexed references fall
    /// back to the bare type name.
    fn resolve(&self, type_name: &str) -> String {
        self.names.get(type_name).cloned().unwrap_or_else(|| {
            type_name
                .rsplit('.')
                .next()
                .unwrap_or(type_name)
                .to_string()
        })
    }

    fn message(&self, type_name: &str) -> Option<&'a DescriptorProto> {
        self.messages.get(type_name).copied()
    }
}

/// Accumulates one [`Schema`] while files are translated into it.
struct SchemaBuilder<'a> {
    schema: Schema,
    index: &'a TypeIndex<'a>,
    config: &'a Config,
    inputs: HashSet<String>,
}

impl<'a> SchemaBuilder<'a> {
    fn new(index: &'a TypeIndex<'a>, config: &'a Config) -> Self {
        Self {
            schema: Schema::default(),
            index,
            config,
            inputs: HashSet::new(),
        }
    }

    fn finish(self) -> Schema {
        self.schema
    }

    fn add_file(&mut self, file: &FileDescriptorProto) {
        if self.go_model().is_some() && self.schema.directives.is_empty() {
            self.schema.directives.push(go_model_directive_def());
        }
        for message in &file.message_type {
            self.add_message(file.package(), "", message);
        }
        for enum_type in &file.enum_type {
            self.add_enum(file.package(), "", enum_type);
        }
        if self.config.generate_service_nodes {
            for service in &file.service {
                self.add_service(service);
            }
        }
    }

    fn go_model(&self) -> Option<&str> {
        self.config.go_model.as_deref().filter(|m| !m.is_empty())
    }

    fn model_directives(&self, type_name: &str) -> Vec<Directive> {
        match self.go_model() {
            Some(model) => vec![Directive {
                name: "goModel".to_string(),
                args: vec![("model".to_string(), format!("{model}.{type_name}"))],
            }],
            None => Vec::new(),
        }
    }

    fn add_message(&mut self, package: &str, parent: &str, message: &DescriptorProto) {
        let relative = child_path(parent, message.name());
        let name = self.index.resolve(&proto_full_name(package, &relative));
        let object = ObjectType {
            fields: message
                .field
                .iter()
                .map(|field| self.output_field(field))
                .collect(),
            directives: self.model_directives(&name),
            name,
        };
        self.schema.types.push(TypeDef::Object(object));
        for nested in &message.nested_type {
            self.add_message(package, &relative, nested);
        }
        for enum_type in &message.enum_type {
            self.add_enum(package, &relative, enum_type);
        }
    }

    fn add_enum(&mut self, package: &str, parent: &str, enum_type: &EnumDescriptorProto) {
        let relative = child_path(parent, enum_type.name());
        self.schema.types.push(TypeDef::Enum(EnumType {
            name: self.index.resolve(&proto_full_name(package, &relative)),
            values: enum_type
                .value
                .iter()
                .map(|value| value.name().to_string())
                .collect(),
        }));
    }

    fn add_service(&mut self, service: &ServiceDescriptorProto) {
        for method in &service.method {
            let mut args = Vec::new();
            if let Some(request) = self.index.message(method.input_type())
                && !request.field.is_empty()
            {
                let input_name = self.input_type(method.input_type());
                args.push(Argument {
                    name: "in".to_string(),
                    typ: TypeRef::named(input_name),
                });
            }
            let field = Field {
                name: method.name().to_lower_camel_case(),
                args,
                typ: TypeRef::named(self.index.resolve(method.output_type())),
            };
            // Every exposed RPC defaults to a mutation; server streaming maps
            // to a subscription.
            let root = if method.server_streaming() {
                self.schema
                    .subscription
                    .get_or_insert_with(|| ObjectType::new("Subscription"))
            } else {
                self.schema
                    .mutation
                    .get_or_insert_with(|| ObjectType::new("Mutation"))
            };
            root.fields.push(field);
        }
    }

    /// Emit an `input` variant of a request message, then of every message it
    /// references, once per schema.
    fn input_type(&mut self, type_name: &str) -> String {
        let name = format!("{}Input", self.index.resolve(type_name));
        if !self.inputs.insert(name.clone()) {
            return name;
        }
        let Some(message) = self.index.message(type_name) else {
            return name;
        };
        let fields = message
            .field
            .iter()
            .map(|field| self.input_field(field))
            .collect();
        let input = InputType {
            directives: self.model_directives(&name),
            name: name.clone(),
            fields,
        };
        self.schema.types.push(TypeDef::Input(input));
        name
    }

    fn output_field(&mut self, field: &FieldDescriptorProto) -> Field {
        self.field(field, false)
    }

    fn input_field(&mut self, field: &FieldDescriptorProto) -> Field {
        self.field(field, true)
    }

    fn field(&mut self, field: &FieldDescriptorProto, input: bool) -> Field {
        let base = match field.type_() {
            Type::TYPE_DOUBLE | Type::TYPE_FLOAT => "Float".to_string(),
            Type::TYPE_BOOL => "Boolean".to_string(),
            Type::TYPE_STRING | Type::TYPE_BYTES => "String".to_string(),
            Type::TYPE_MESSAGE | Type::TYPE_GROUP if input => self.input_type(field.type_name()),
            Type::TYPE_MESSAGE | Type::TYPE_GROUP | Type::TYPE_ENUM => {
                self.index.resolve(field.type_name())
            }
            _ => "Int".to_string(),
        };
        let typ = if field.label() == Label::LABEL_REPEATED {
            TypeRef::named(base).non_null().list()
        } else {
            TypeRef::named(base)
        };
        Field {
            name: field.name().to_lower_camel_case(),
            args: Vec::new(),
            typ,
        }
    }
}

fn go_model_directive_def() -> DirectiveDef {
    DirectiveDef {
        name: "goModel".to_string(),
        args: vec![Argument {
            name: "model".to_string(),
            typ: TypeRef::named("String").non_null(),
        }],
        locations: vec!["OBJECT".to_string(), "INPUT_OBJECT".to_string()],
    }
}
