//! Extract sortable impl blocks from Rust source using syn.

use std::ops::Range;

use depsort_core::{DeclKind, Declaration};
use syn::spanned::Spanned;
use syn::{File, GenericArgument, ImplItem, Item, ItemImpl, PathArguments, ReturnType, Type};

use crate::calls::local_call_names;
use crate::error::{SortError, SortResult};
use crate::line_index::LineIndex;
use crate::visibility::{VisibilityClass, VisibilityOrder};

/// One member of an impl block with its place in the source.
#[derive(Debug, Clone)]
pub struct Member {
    /// Record handed to the ordering engine.
    pub decl: Declaration,
    pub visibility: VisibilityClass,
    /// Byte range, leading comments and attributes included.
    pub range: Range<usize>,
    /// 1-based line of the member's first token.
    pub line: usize,
}

/// A single `impl` block and its members in source order.
#[derive(Debug, Clone)]
pub struct ImplBlock {
    /// Self type as written, e.g. `Parser < 'a >`.
    pub self_ty: String,
    /// Trait being implemented, if any.
    pub trait_name: Option<String>,
    /// 1-based line of the `impl` keyword.
    pub line: usize,
    pub members: Vec<Member>,
}

impl ImplBlock {
    /// Short label for reports, e.g. `impl Display for Parser`.
    pub fn label(&self) -> String {
        match &self.trait_name {
            Some(t) => format!("impl {} for {}", t, self.self_ty),
            None => format!("impl {}", self.self_ty),
        }
    }

    pub fn declarations(&self) -> Vec<Declaration> {
        self.members.iter().map(|m| m.decl.clone()).collect()
    }

    pub fn ranges(&self) -> Vec<Range<usize>> {
        self.members.iter().map(|m| m.range.clone()).collect()
    }
}

/// Extractor for impl blocks.
pub struct BlockExtractor<'a> {
    visibility: &'a VisibilityOrder,
}

impl<'a> BlockExtractor<'a> {
    pub fn new(visibility: &'a VisibilityOrder) -> Self {
        Self { visibility }
    }

    /// Parse source code and extract every item-level impl block.
    ///
    /// Impl blocks in inline modules are included; impl blocks inside
    /// function bodies are not.
    pub fn extract(&self, source: &str) -> SortResult<Vec<ImplBlock>> {
        let (bom, body) = match source.strip_prefix('\u{feff}') {
            Some(rest) => ('\u{feff}'.len_utf8(), rest),
            None => (0, source),
        };

        let file: File = syn::parse_file(body).map_err(|e| {
            let start = e.span().start();
            SortError::Parse(format!("{}:{}: {}", start.line, start.column + 1, e))
        })?;

        let index = LineIndex::new(body);
        let mut blocks = Vec::new();
        self.collect_items(&file.items, &index, &mut blocks);

        if bom > 0 {
            for member in blocks.iter_mut().flat_map(|b| b.members.iter_mut()) {
                member.range = member.range.start + bom..member.range.end + bom;
            }
        }

        Ok(blocks)
    }

    fn collect_items(&self, items: &[Item], index: &LineIndex<'_>, blocks: &mut Vec<ImplBlock>) {
        for item in items {
            match item {
                Item::Impl(imp) => blocks.push(self.extract_block(imp, index)),
                Item::Mod(m) => {
                    if let Some((_, content)) = &m.content {
                        self.collect_items(content, index, blocks);
                    }
                }
                _ => {}
            }
        }
    }

    fn extract_block(&self, imp: &ItemImpl, index: &LineIndex<'_>) -> ImplBlock {
        let self_ty = &imp.self_ty;
        let self_name = type_ident(self_ty);
        let in_trait_impl = imp.trait_.is_some();

        // A member's text never reaches back past the opening brace or the
        // previous member.
        let mut floor = index.offset(imp.brace_token.span.open().end());
        let mut members = Vec::with_capacity(imp.items.len());
        for (i, item) in imp.items.iter().enumerate() {
            let member = self.extract_member(i, item, self_name.as_deref(), in_trait_impl, index, floor);
            floor = member.range.end;
            members.push(member);
        }

        ImplBlock {
            self_ty: quote::quote!(#self_ty).to_string(),
            trait_name: imp.trait_.as_ref().map(|(_, path, _)| quote::quote!(#path).to_string()),
            line: imp.impl_token.span.start().line,
            members,
        }
    }

    fn extract_member(
        &self,
        position: usize,
        item: &ImplItem,
        self_name: Option<&str>,
        in_trait_impl: bool,
        index: &LineIndex<'_>,
        floor: usize,
    ) -> Member {
        let (decl, vis) = match item {
            ImplItem::Fn(func) => {
                let kind = if func.sig.receiver().is_none() && returns_self(&func.sig.output, self_name) {
                    DeclKind::Constructor
                } else {
                    DeclKind::Method
                };
                let params: Vec<String> = func
                    .sig
                    .inputs
                    .iter()
                    .filter_map(|arg| match arg {
                        syn::FnArg::Typed(pt) => {
                            let ty = &pt.ty;
                            Some(quote::quote!(#ty).to_string())
                        }
                        syn::FnArg::Receiver(_) => None,
                    })
                    .collect();
                let class = VisibilityClass::of(&func.vis, in_trait_impl);
                let decl = Declaration::method(position, func.sig.ident.to_string(), position)
                    .with_kind(kind)
                    .with_visibility(self.visibility.rank(class))
                    .with_params(params)
                    .with_calls(local_call_names(func));
                (decl, class)
            }
            ImplItem::Const(c) => (
                Declaration::other(position, c.ident.to_string(), position),
                VisibilityClass::of(&c.vis, in_trait_impl),
            ),
            ImplItem::Type(t) => (
                Declaration::other(position, t.ident.to_string(), position),
                VisibilityClass::of(&t.vis, in_trait_impl),
            ),
            ImplItem::Macro(m) => {
                let path = &m.mac.path;
                (
                    Declaration::other(position, format!("{}!", quote::quote!(#path)), position),
                    VisibilityClass::Private,
                )
            }
            _ => (
                Declaration::other(position, String::new(), position),
                VisibilityClass::Private,
            ),
        };

        let start = item.span().start();
        let end = item.span().end();
        let token_start = index.offset(start);
        // Comments above only belong to a member that opens its line.
        let first_line = if index.first_non_blank(start.line) == token_start {
            leading_comment_line(index, start.line, floor)
        } else {
            start.line
        };
        let range_start = if first_line < start.line {
            index.first_non_blank(first_line).max(floor)
        } else {
            token_start.max(floor)
        };

        Member {
            decl,
            visibility: vis,
            range: range_start..index.offset(end),
            line: start.line,
        }
    }
}

/// First line of the `//` comment run directly above `line` (or `line` itself).
///
/// Lines starting before `floor` belong to earlier text and end the run.
fn leading_comment_line(index: &LineIndex<'_>, line: usize, floor: usize) -> usize {
    let mut first = line;
    while first > 1 {
        let above = index.line(first - 1).trim_start();
        if above.starts_with("//") && !above.starts_with("//!") && index.first_non_blank(first - 1) >= floor {
            first -= 1;
        } else {
            break;
        }
    }
    first
}

/// Last path segment of a type, e.g. `Parser` for `crate::Parser<'a>`.
fn type_ident(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(p) => p.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}

/// Whether a return type is `Self`/the self type, possibly wrapped in
/// `Option`, `Result` or `Box`.
fn returns_self(output: &ReturnType, self_name: Option<&str>) -> bool {
    match output {
        ReturnType::Default => false,
        ReturnType::Type(_, ty) => is_self_type(ty, self_name, true),
    }
}

fn is_self_type(ty: &Type, self_name: Option<&str>, allow_wrapper: bool) -> bool {
    let Type::Path(p) = ty else {
        return false;
    };
    let Some(last) = p.path.segments.last() else {
        return false;
    };
    if last.ident == "Self" || self_name.is_some_and(|name| last.ident == name) {
        return true;
    }
    if !allow_wrapper || !matches!(last.ident.to_string().as_str(), "Option" | "Result" | "Box") {
        return false;
    }
    match &last.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(inner)) => is_self_type(inner, self_name, false),
            _ => false,
        },
        _ => false,
    }
}
