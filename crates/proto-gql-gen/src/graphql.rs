//! GraphQL schema tree and SDL rendering.
use std::fmt;
use std::io::Write;

use crate::Result;

/// A reference to a GraphQL type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn non_null(self) -> Self {
        Self::NonNull(Box::new(self))
    }

    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }
}

/// A directive applied to a definition, e.g. `@goModel(model: "pkg.User")`.
///
/// Argument values are rendered as quoted strings; that is the only value
/// shape the generator emits.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub args: Vec<(String, String)>,
}

/// A directive definition emitted at the top of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveDef {
    pub name: String,
    pub args: Vec<Argument>,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub typ: TypeRef,
}

/// A field of an object or input type. Input fields carry no arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub args: Vec<Argument>,
    pub typ: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub fields: Vec<Field>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputType {
    pub name: String,
    pub fields: Vec<Field>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    Object(ObjectType),
    Input(InputType),
    Enum(EnumType),
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            directives: Vec::new(),
        }
    }
}

/// One logical GraphQL schema.
///
/// Root operation types are held apart from ordinary definitions so that
/// merged translation can keep appending fields to them; they are rendered
/// only when they end up non-empty.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Schema {
    pub directives: Vec<DirectiveDef>,
    pub types: Vec<TypeDef>,
    pub query: Option<ObjectType>,
    pub mutation: Option<ObjectType>,
    pub subscription: Option<ObjectType>,
}

impl Schema {
    fn roots(&self) -> impl Iterator<Item = &ObjectType> {
        [&self.query, &self.mutation, &self.subscription]
            .into_iter()
            .flatten()
            .filter(|root| !root.fields.is_empty())
    }

    fn schema_block(&self) -> Option<String> {
        let mut lines = Vec::new();
        for (slot, operation) in [
            (&self.query, "query"),
            (&self.mutation, "mutation"),
            (&self.subscription, "subscription"),
        ] {
            if let Some(root) = slot
                && !root.fields.is_empty()
            {
                lines.push(format!("  {operation}: {}", root.name));
            }
        }
        if lines.is_empty() {
            return None;
        }
        Some(format!("schema {{\n{}\n}}", lines.join("\n")))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{}", name),
            Self::List(inner) => write!(f, "[{}]", inner),
            Self::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.typ)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if self.args.is_empty() {
            return Ok(());
        }
        let args = self
            .args
            .iter()
            .map(|(name, value)| format!("{name}: \"{value}\""))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "({args})")
    }
}

impl fmt::Display for DirectiveDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "directive @{}", self.name)?;
        if !self.args.is_empty() {
            let args = self
                .args
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "({args})")?;
        }
        write!(f, " on {}", self.locations.join(" | "))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            let args = self
                .args
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "({args})")?;
        }
        write!(f, ": {}", self.typ)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type {}", self.name)?;
        for directive in &self.directives {
            write!(f, " {}", directive)?;
        }
        write_fields_block(f, &self.fields)
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "input {}", self.name)?;
        for directive in &self.directives {
            write!(f, " {}", directive)?;
        }
        write_fields_block(f, &self.fields)
    }
}

impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "enum {} {{", self.name)?;
        for value in &self.values {
            writeln!(f, "  {}", value)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(t) => write!(f, "{}", t),
            Self::Input(t) => write!(f, "{}", t),
            Self::Enum(t) => write!(f, "{}", t),
        }
    }
}

// A definition with no fields is rendered without braces; `{}` is not valid
// SDL.
fn write_fields_block(f: &mut fmt::Formatter<'_>, fields: &[Field]) -> fmt::Result {
    if fields.is_empty() {
        return Ok(());
    }
    writeln!(f, " {{")?;
    for field in fields {
        writeln!(f, "  {}", field)?;
    }
    write!(f, "}}")
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut blocks: Vec<String> = Vec::new();
        for directive in &self.directives {
            blocks.push(directive.to_string());
        }
        for typ in &self.types {
            blocks.push(typ.to_string());
        }
        for root in self.roots() {
            blocks.push(root.to_string());
        }
        if let Some(block) = self.schema_block() {
            blocks.push(block);
        }
        if blocks.is_empty() {
            return Ok(());
        }
        writeln!(f, "{}", blocks.join("\n\n"))
    }
}

/// Write a [`Schema`] to a writer as SDL.
pub fn render(w: &mut impl Write, schema: &Schema) -> Result<()> {
    Ok(write!(w, "{}", schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, typ: TypeRef) -> Field {
        Field {
            name: name.to_string(),
            args: Vec::new(),
            typ,
        }
    }

    #[test]
    fn test_type_ref() {
        let typ = TypeRef::named("Int").non_null().list();
        assert_eq!(typ.to_string(), "[Int!]");
    }

    #[test]
    fn test_object() {
        let mut object = ObjectType::new("Post");
        object.fields.push(field("title", TypeRef::named("String")));
        object.fields.push(field(
            "tags",
            TypeRef::named("String").non_null().list(),
        ));
        assert_eq!(
            object.to_string(),
            "type Post {\n  title: String\n  tags: [String!]\n}"
        );
    }

    #[test]
    fn test_empty_object_has_no_braces() {
        assert_eq!(ObjectType::new("Empty").to_string(), "type Empty");
    }

    #[test]
    fn test_field_arguments() {
        let mut root = ObjectType::new("Mutation");
        root.fields.push(Field {
            name: "createPost".to_string(),
            args: vec![Argument {
                name: "in".to_string(),
                typ: TypeRef::named("PostInput"),
            }],
            typ: TypeRef::named("Post"),
        });
        assert_eq!(
            root.to_string(),
            "type Mutation {\n  createPost(in: PostInput): Post\n}"
        );
    }

    #[test]
    fn test_directive() {
        let directive = Directive {
            name: "goModel".to_string(),
            args: vec![("model".to_string(), "models.Post".to_string())],
        };
        assert_eq!(directive.to_string(), "@goModel(model: \"models.Post\")");
    }

    #[test]
    fn test_render_schema() {
        let mut schema = Schema::default();
        schema.types.push(TypeDef::Object({
            let mut object = ObjectType::new("Post");
            object.fields.push(field("title", TypeRef::named("String")));
            object
        }));
        schema.types.push(TypeDef::Enum(EnumType {
            name: "Status".to_string(),
            values: vec!["DRAFT".to_string(), "PUBLISHED".to_string()],
        }));
        schema.mutation = Some({
            let mut root = ObjectType::new("Mutation");
            root.fields.push(field("createPost", TypeRef::named("Post")));
            root
        });
        let mut buf = Vec::new();
        render(&mut buf, &schema).unwrap();
        insta::assert_snapshot!(String::from_utf8(buf).unwrap(), @r#"
        type Post {
          title: String
        }

        enum Status {
          DRAFT
          PUBLISHED
        }

        type Mutation {
          createPost: Post
        }

        schema {
          mutation: Mutation
        }
        "#);
    }

    #[test]
    fn test_empty_roots_are_not_rendered() {
        let mut schema = Schema::default();
        schema.query = Some(ObjectType::new("Query"));
        assert_eq!(schema.to_string(), "");
    }
}
