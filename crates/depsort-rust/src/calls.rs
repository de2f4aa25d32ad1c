//! Collect local call names from a method body.
//!
//! In Rust the receiverless call of a sibling is spelled `self.name(..)` or
//! `Self::name(..)`. Calls through any other expression (`self.inner.go()`,
//! `other.go()`, `Type::go()`) are not local.

use std::collections::BTreeSet;

use syn::punctuated::Punctuated;
use syn::visit::{self, Visit};
use syn::{Expr, ExprMethodCall, ExprPath, ImplItemFn, ItemFn, ItemImpl, Macro, Token};

/// Names of sibling members a function body refers to.
pub fn local_call_names(func: &ImplItemFn) -> BTreeSet<String> {
    let mut collector = LocalCalls::default();
    collector.visit_block(&func.block);
    collector.names
}

#[derive(Default)]
struct LocalCalls {
    names: BTreeSet<String>,
}

fn is_self_value(expr: &Expr) -> bool {
    match expr {
        Expr::Path(p) => p.qself.is_none() && p.path.is_ident("self"),
        Expr::Paren(p) => is_self_value(&p.expr),
        _ => false,
    }
}

impl<'ast> Visit<'ast> for LocalCalls {
    fn visit_expr_method_call(&mut self, call: &'ast ExprMethodCall) {
        if is_self_value(&call.receiver) {
            self.names.insert(call.method.to_string());
        }
        visit::visit_expr_method_call(self, call);
    }

    // `Self::helper(..)` as well as `Self::helper` passed as a function value.
    fn visit_expr_path(&mut self, path: &'ast ExprPath) {
        let segments = &path.path.segments;
        if path.qself.is_none() && segments.len() == 2 && segments[0].ident == "Self" {
            self.names.insert(segments[1].ident.to_string());
        }
        visit::visit_expr_path(self, path);
    }

    // Macro bodies are opaque to syn; most call-carrying macros (format-like,
    // assertions, vec!) take comma separated expressions.
    fn visit_macro(&mut self, mac: &'ast Macro) {
        if let Ok(args) = mac.parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated) {
            for arg in &args {
                self.visit_expr(arg);
            }
        }
    }

    // Nested items have their own scope.
    fn visit_item_fn(&mut self, _: &'ast ItemFn) {}

    fn visit_item_impl(&mut self, _: &'ast ItemImpl) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calls(src: &str) -> Vec<String> {
        let func: ImplItemFn = syn::parse_str(src).unwrap();
        local_call_names(&func).into_iter().collect()
    }

    #[test]
    fn test_self_method_calls() {
        assert_eq!(calls("fn a(&self) { self.b(); self.c(1); }"), vec!["b", "c"]);
    }

    #[test]
    fn test_self_path_calls() {
        assert_eq!(calls("fn a() -> Self { Self::build(Self::DEFAULT) }"), vec!["DEFAULT", "build"]);
    }

    #[test]
    fn test_function_value_reference() {
        assert_eq!(calls("fn a(&self, v: &[u8]) { v.iter().map(Self::conv); }"), vec!["conv"]);
    }

    #[test]
    fn test_calls_through_expressions_are_not_local() {
        assert!(calls("fn a(&self, o: &Other) { self.inner.go(); o.go(); Other::go(); go(); }").is_empty());
    }

    #[test]
    fn test_closures_are_descended() {
        assert_eq!(calls("fn a(&self) { let f = || self.b(); f(); }"), vec!["b"]);
    }

    #[test]
    fn test_nested_fn_items_skipped() {
        assert!(calls("fn a(&self) { fn inner() { Self::b(); } }").is_empty());
    }

    #[test]
    fn test_macro_arguments_are_scanned() {
        assert_eq!(
            calls(r#"fn a(&self) { println!("{}", self.name()); assert!(self.ok()); }"#),
            vec!["name", "ok"]
        );
    }

    #[test]
    fn test_chained_call_on_self_result_is_not_local() {
        assert_eq!(calls("fn a(&self) { self.b().c(); }"), vec!["b"]);
    }
}
