//! Source emission.
//!
//! Wraps declarations in the scopes of the class that requested them:
//!
//! ```text
//! using System.Runtime.InteropServices;
//!
//! namespace MyApp.Native
//! {
//!     partial class Outer
//!     {
//!         partial class Inner
//!         {
//!             [DllImport("native.dll", EntryPoint = "#1")] public extern static int Add(int param1, int param2);
//!         }
//!     }
//! }
//! ```
//!
//! Targets naming the same library file share one [`SourceUnit`]; each target
//! contributes its own [`ScopeBlock`].

use super::{BindingDeclaration, BindingTarget};

/// One indentation level.
pub const INDENT: &str = "    ";

const USING_HEADER: &str = "using System.Runtime.InteropServices;\n";

/// Declarations of one target wrapped in its namespace and classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeBlock
{
    pub namespace: String,
    pub nesting: Vec<String>,
    pub library_literal: String,
    pub declarations: Vec<BindingDeclaration>,
}

impl ScopeBlock
{
    pub fn new(target: &BindingTarget, declarations: Vec<BindingDeclaration>) -> Self
    {
        Self {
            namespace: target.namespace.clone(),
            nesting: target.nesting.clone(),
            library_literal: target.library_literal.clone(),
            declarations,
        }
    }

    /// Append the scope's text to `out`.
    pub fn render_into(&self, out: &mut String)
    {
        let mut depth = 0;
        if !self.namespace.is_empty() {
            push_line(out, depth, &format!("namespace {}", self.namespace));
            push_line(out, depth, "{");
            depth += 1;
        }
        for class in &self.nesting {
            push_line(out, depth, &format!("partial class {class}"));
            push_line(out, depth, "{");
            depth += 1;
        }

        for declaration in &self.declarations {
            push_line(out, depth, &declaration.render(&self.library_literal));
        }

        while depth > 0 {
            depth -= 1;
            push_line(out, depth, "}");
        }
    }
}

fn push_line(out: &mut String, depth: usize, line: &str)
{
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(line);
    out.push('\n');
}

/// A generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit
{
    key: String,
    scopes: Vec<ScopeBlock>,
}

impl SourceUnit
{
    /// Create an empty unit filed under `key` (for example `native.dll.g.cs`).
    pub fn new(key: impl Into<String>) -> Self
    {
        Self {
            key: key.into(),
            scopes: Vec::new(),
        }
    }

    pub fn key(&self) -> &str
    {
        &self.key
    }

    pub fn scopes(&self) -> &[ScopeBlock]
    {
        &self.scopes
    }

    pub fn push(&mut self, scope: ScopeBlock)
    {
        self.scopes.push(scope);
    }

    /// Number of declarations across all scopes.
    pub fn declaration_count(&self) -> usize
    {
        self.scopes.iter().map(|scope| scope.declarations.len()).sum()
    }

    /// Render the whole file.
    pub fn render(&self) -> String
    {
        let mut out = String::from(USING_HEADER);
        for scope in &self.scopes {
            out.push('\n');
            scope.render_into(&mut out);
        }
        out
    }
}
