// Structural IR produced by synthesis and consumed by codegen. No serde_json::Value here.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static BARE_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][0-9A-Za-z_$]*$").expect("static identifier regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Null,
    String,
    Number,
    Boolean,
    Any,                     // empty arrays and anything we cannot classify
    Array(Box<TypeRef>),
    Named(String),           // name of a `Decl` in the same document
}

impl TypeRef {
    pub fn array_of(item: TypeRef) -> Self {
        TypeRef::Array(Box::new(item))
    }

    /// The declaration this reference ultimately points at, looking through arrays.
    pub fn named(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) => Some(name),
            TypeRef::Array(item) => item.named(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Null => f.write_str("null"),
            TypeRef::String => f.write_str("string"),
            TypeRef::Number => f.write_str("number"),
            TypeRef::Boolean => f.write_str("boolean"),
            TypeRef::Any => f.write_str("any"),
            TypeRef::Array(item) => write!(f, "{item}[]"),
            TypeRef::Named(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,         // original JSON key, unsanitized
    pub ty: TypeRef,
}

impl Field {
    /// Key as it must appear in a declaration body: bare when it is a valid
    /// identifier, otherwise a quoted string literal.
    pub fn rendered_key(&self) -> String {
        if BARE_IDENT.is_match(&self.key) {
            self.key.clone()
        } else {
            // serializing a &str cannot fail
            serde_json::to_string(&self.key).unwrap_or_else(|_| format!("\"{}\"", self.key))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclKind {
    Object { fields: Vec<Field> },
    Alias { target: TypeRef },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub name: String,
    pub kind: DeclKind,
}

impl Decl {
    /// Every declaration name this one refers to, in field order.
    pub fn references(&self) -> Vec<&str> {
        match &self.kind {
            DeclKind::Object { fields } => fields.iter().filter_map(|f| f.ty.named()).collect(),
            DeclKind::Alias { target } => target.named().into_iter().collect(),
        }
    }
}

/// Result of one synthesis run: declarations in emission order plus the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    pub decls: Vec<Decl>,
    pub root: String,
}

impl OutputDocument {
    pub fn get(&self, name: &str) -> Option<&Decl> {
        self.decls.iter().find(|d| d.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.decls.iter().position(|d| d.name == name)
    }

    pub fn root_decl(&self) -> Option<&Decl> {
        self.get(&self.root)
    }
}
