//! TypeScript text for an `OutputDocument`.

use std::fmt::{self, Write};

use crate::config::Style;
use crate::ir::{Decl, DeclKind, OutputDocument};

const INDENT: &str = "  ";

pub struct Codegen {
    style: Style,
    export: bool,
    out: Vec<String>,
}

impl Codegen {
    pub fn new(style: Style) -> Self {
        Self { style, export: false, out: Vec::new() }
    }

    pub fn export(mut self, value: bool) -> Self {
        self.export = value;
        self
    }

    /// Render every declaration of `doc`, in document order.
    pub fn emit(&mut self, doc: &OutputDocument) {
        for decl in &doc.decls {
            let text = self.render_decl(decl);
            self.out.push(text);
        }
    }

    pub fn render_decl(&self, decl: &Decl) -> String {
        Rendered { cg: self, decl }.to_string()
    }

    fn write_decl(&self, w: &mut impl Write, decl: &Decl) -> fmt::Result {
        if self.export {
            w.write_str("export ")?;
        }
        match &decl.kind {
            DeclKind::Alias { target } => write!(w, "type {} = {target};", decl.name),
            DeclKind::Object { fields } => {
                match self.style {
                    Style::Interface => writeln!(w, "interface {} {{", decl.name)?,
                    Style::TypeAlias => writeln!(w, "type {} = {{", decl.name)?,
                }
                for field in fields {
                    writeln!(w, "{INDENT}{}: {};", field.rendered_key(), field.ty)?;
                }
                w.write_char('}')
            }
        }
    }

    /// Rendered declarations, one string each.
    pub fn into_decls(self) -> Vec<String> {
        self.out
    }

    /// All declarations separated by a blank line, no trailing newline.
    pub fn into_string(self) -> String {
        self.out.join("\n\n")
    }
}

struct Rendered<'a> {
    cg: &'a Codegen,
    decl: &'a Decl,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cg.write_decl(f, self.decl)
    }
}
