//! Structural type synthesis over a single parsed JSON document.
//!
//! One depth-first walk turns a `serde_json::Value` into an `OutputDocument`:
//! every object shape becomes a named declaration, everything else becomes a
//! primitive or array reference.
//!
//! Rules worth knowing before touching this:
//! - Arrays are typed from their first element only. Mixed arrays are not unioned.
//! - A declaration's name is reserved before its fields are visited, so a
//!   container always wins the unsuffixed name over a same-named child.
//! - A declaration is pushed after its fields are visited, so nested shapes
//!   come before the declarations that use them.
//! - All state lives in `SynthContext`, created fresh per call.
pub mod name;
pub mod registry;

use serde_json::{Map, Value};

use crate::config::{Options, Style};
use crate::error::{Error, Result};
use crate::ir::{Decl, DeclKind, Field, OutputDocument, TypeRef};

pub use name::derive_base_name;
pub use registry::NameRegistry;

// ------------------------------ Context ---------------------------------- //

#[derive(Debug)]
pub struct SynthContext {
    style: Style,
    max_depth: usize,
    registry: NameRegistry,
    decls: Vec<Decl>,
}

impl SynthContext {
    pub fn new(style: Style, max_depth: usize) -> Self {
        Self {
            style,
            max_depth,
            registry: NameRegistry::new(),
            decls: Vec::new(),
        }
    }

    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    /// Type reference for `value`. `base` is the raw key (or root name) the
    /// value hangs off; it is only derived into a name when an object is hit.
    pub fn synthesize(&mut self, value: &Value, base: &str) -> Result<TypeRef> {
        self.synthesize_at(value, base, 0)
    }

    fn synthesize_at(&mut self, value: &Value, base: &str, depth: usize) -> Result<TypeRef> {
        match value {
            Value::Null => Ok(TypeRef::Null),
            Value::Bool(_) => Ok(TypeRef::Boolean),
            Value::Number(_) => Ok(TypeRef::Number),
            Value::String(_) => Ok(TypeRef::String),
            Value::Array(xs) => {
                self.check_depth(depth)?;
                match xs.first() {
                    None => Ok(TypeRef::array_of(TypeRef::Any)),
                    Some(first) => {
                        let item = self.synthesize_at(first, base, depth + 1)?;
                        Ok(TypeRef::array_of(item))
                    }
                }
            }
            Value::Object(map) => {
                self.check_depth(depth)?;
                self.synthesize_object(map, base, depth)
            }
        }
    }

    fn synthesize_object(&mut self, map: &Map<String, Value>, base: &str, depth: usize) -> Result<TypeRef> {
        let candidate = format!("{}{}", self.style.prefix(), derive_base_name(base));
        let name = self.registry.claim(&candidate);

        let mut fields = Vec::with_capacity(map.len());
        for (key, v) in map {
            let ty = self.synthesize_at(v, key, depth + 1)?;
            fields.push(Field { key: key.clone(), ty });
        }

        tracing::debug!(name = %name, fields = fields.len(), depth, "object declaration");
        self.decls.push(Decl {
            name: name.clone(),
            kind: DeclKind::Object { fields },
        });
        Ok(TypeRef::Named(name))
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        // root container sits at depth 0
        if depth >= self.max_depth {
            return Err(Error::synthesis(format!(
                "input nested too deeply (more than {} levels)",
                self.max_depth
            )));
        }
        Ok(())
    }

    /// Finish a run whose root value has already been synthesized into `root`.
    /// Non-object roots get a leading alias declaration.
    fn finish(mut self, root: TypeRef, root_base: &str) -> OutputDocument {
        let root = match root {
            TypeRef::Named(name) => name,
            other => {
                let candidate = format!("{}{}", Style::ALIAS_PREFIX, root_base);
                let name = self.registry.claim(&candidate);
                tracing::debug!(name = %name, target = %other, "root alias declaration");
                self.decls.insert(0, Decl {
                    name: name.clone(),
                    kind: DeclKind::Alias { target: other },
                });
                name
            }
        };
        OutputDocument { decls: self.decls, root }
    }
}

// ------------------------------ Entry points ----------------------------- //

/// Synthesize the declarations for an already-parsed document.
pub fn synthesize_document(value: &Value, options: &Options) -> Result<OutputDocument> {
    let root_base = derive_base_name(&options.root_name);
    let mut cx = SynthContext::new(options.style, options.max_depth);
    let root = cx.synthesize(value, &root_base)?;
    Ok(cx.finish(root, &root_base))
}

// ------------------------------- Tests ------------------------------------ //
