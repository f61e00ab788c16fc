// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Layout tree for generated bridge modules.
//!
//! **DDD Context:** Bridge Generation - Module Layout
//!
//! Handler artifacts arrive as finished text. The assembler only orders
//! them and indents the loader body, so the tree has four shapes: text, a
//! line break, an indented run and a sequence.
//!
//! ```
//! use bridgegen_core::codegen::document::{INDENT, line, nest, seq, text};
//!
//! let doc = seq(vec![
//!     text("func stdlib_loadHandlers(env: Env) throws {"),
//!     nest(INDENT, vec![line(), text("try env.add(interface_show_value, function_show_value)")]),
//!     line(),
//!     text("}"),
//! ]);
//! assert_eq!(
//!     doc.render(),
//!     "func stdlib_loadHandlers(env: Env) throws {\n    try env.add(interface_show_value, function_show_value)\n}"
//! );
//! ```

use std::borrow::Cow;

/// Indentation width of the loader body.
pub const INDENT: usize = 4;

/// A layout node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document<'a> {
    /// Text copied verbatim, embedded newlines included.
    Text(Cow<'a, str>),
    /// A newline followed by the current indentation.
    Line,
    /// Children laid out with extra indentation.
    Nest(usize, Vec<Document<'a>>),
    /// Children laid out in order.
    Seq(Vec<Document<'a>>),
}

#[must_use]
pub fn text<'a>(value: impl Into<Cow<'a, str>>) -> Document<'a> {
    Document::Text(value.into())
}

#[must_use]
pub fn line() -> Document<'static> {
    Document::Line
}

#[must_use]
pub fn nest(indent: usize, children: Vec<Document<'_>>) -> Document<'_> {
    Document::Nest(indent, children)
}

#[must_use]
pub fn seq(children: Vec<Document<'_>>) -> Document<'_> {
    Document::Seq(children)
}

/// Places `separator` between consecutive documents.
#[must_use]
pub fn join<'a>(docs: impl IntoIterator<Item = Document<'a>>, separator: &'a str) -> Document<'a> {
    let mut children = Vec::new();
    for doc in docs {
        if !children.is_empty() {
            children.push(text(separator));
        }
        children.push(doc);
    }
    Document::Seq(children)
}

impl Document<'_> {
    /// Renders the tree to a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();
        self.render_into(&mut output, 0);
        output
    }

    fn render_into(&self, output: &mut String, indent: usize) {
        match self {
            Document::Text(value) => output.push_str(value),
            Document::Line => {
                output.push('\n');
                output.extend(std::iter::repeat_n(' ', indent));
            }
            Document::Nest(extra, children) => {
                for child in children {
                    child.render_into(output, indent + extra);
                }
            }
            Document::Seq(children) => {
                for child in children {
                    child.render_into(output, indent);
                }
            }
        }
    }
}
