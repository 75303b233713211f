//! JSON document → TypeScript `interface` / `type` declarations.
//!
//! ```
//! use json_former::{convert, Style};
//!
//! let out = convert(r#"{"id": 1, "tags": ["a"]}"#, "Root", Style::Interface).unwrap();
//! assert_eq!(out.root, "IRoot");
//! assert_eq!(out.to_source(), "interface IRoot {\n  id: number;\n  tags: string[];\n}");
//! ```
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod inference;
pub mod ir;
pub mod jq_exec;
pub mod parse;

pub use config::{Options, Style};
pub use error::{Error, ErrorKind};
pub use ir::OutputDocument;

/// Rendered output of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// One rendered declaration per entry, in output order.
    pub declarations: Vec<String>,
    /// Name of the root declaration or alias.
    pub root: String,
}

impl Conversion {
    pub fn to_source(&self) -> String {
        self.declarations.join("\n\n")
    }
}

/// Parse, synthesize and render with default options apart from the root name and style.
pub fn convert(src: &str, root_name: &str, style: Style) -> Result<Conversion, Error> {
    convert_with(src, &Options::new().root_name(root_name).style(style))
}

pub fn convert_with(src: &str, options: &Options) -> Result<Conversion, Error> {
    let value = parse::parse_json(src)?;
    convert_value(&value, options)
}

/// Same as [`convert_with`] for an already-parsed value.
pub fn convert_value(value: &serde_json::Value, options: &Options) -> Result<Conversion, Error> {
    let doc = inference::synthesize_document(value, options)?;
    let mut cg = codegen::Codegen::new(options.style).export(options.export);
    cg.emit(&doc);
    Ok(Conversion {
        declarations: cg.into_decls(),
        root: doc.root,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_short_circuits() {
        let err = convert(r#"{"a":}"#, "Root", Style::Interface).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(!err.message().is_empty());
        assert!(err.to_string().starts_with("Invalid JSON: "));
    }

    #[test]
    fn three_level_document() {
        let out = convert(r#"{"user":{"id":1,"address":{"city":"x"}}}"#, "Root", Style::Interface).unwrap();
        assert_eq!(out.declarations.len(), 3);
        assert!(out.declarations[0].starts_with("interface IAddress {"));
        assert!(out.declarations[1].starts_with("interface IUser {"));
        assert!(out.declarations[2].contains("  user: IUser;"));
        assert_eq!(out.root, "IRoot");
    }

    #[test]
    fn root_array_alias() {
        let out = convert("[1,2,3]", "Root", Style::Interface).unwrap();
        assert_eq!(out.declarations, ["type TRoot = number[];"]);
        assert_eq!(out.root, "TRoot");
    }

    #[test]
    fn default_root_name() {
        let out = convert_with(r#"{"a": 1}"#, &Options::default()).unwrap();
        assert_eq!(out.root, "IRootObject");
    }

    #[test]
    fn deep_text_trips_the_depth_guard_not_the_parser() {
        let depth = 120;
        let src = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let err = convert(&src, "Root", Style::Interface).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Synthesis);
        assert_eq!(
            err.to_string(),
            "An unexpected error occurred: input nested too deeply (more than 100 levels)"
        );
    }

    #[test]
    fn depth_limit_counts_the_root_container() {
        let nested = |depth: usize| format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        assert!(convert(&nested(100), "Root", Style::Interface).is_ok());
        let err = convert(&nested(101), "Root", Style::Interface).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Synthesis);
    }

    #[test]
    fn repeated_calls_are_byte_identical() {
        let src = r#"{"posts":[{"id":1,"tags":["x"]}],"user_info":{"name":"a","geo":{"lat":1}}}"#;
        let opts = Options::new().style(Style::TypeAlias).export(true);
        let a = convert_with(src, &opts).unwrap();
        let b = convert_with(src, &opts).unwrap();
        assert_eq!(a.to_source(), b.to_source());
    }
}
