use crate::ident::mentions_identifier;
use regex::Regex;
use std::borrow::Cow;

/// Single-line string literal: backtick, single or double quoted.
const STRING_LITERAL: &str = r#"(?:`[^`\n]*`|'[^'\n]*'|"[^"\n]*")"#;
const EMPTY_OBJECT: &str = r"\{[ \t]*\}";
const IDENT: &str = r"[A-Za-z_$][A-Za-z0-9_$]*";
const SEP: &str = r"[ \t]*,[ \t]*";
/// Trailing expression of the error variant: no comma, paren or newline, and
/// it must end on a non-blank character.
const TRAILING_EXPR: &str = r"[^,()\n]*[^,()\s]";

/// One recognized call shape and how to rewrite it.
///
/// `pattern` captures the call up to its last argument in `head` and any
/// blanks before the closing paren in `pad`; `template` re-emits both with the
/// injected argument between them, so no original byte is lost.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    name: &'static str,
    pattern: Regex,
    template: String,
}

impl RewriteRule {
    pub fn new(name: &'static str, pattern: &str, injected: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(pattern)?;
        // `$` is the capture sigil in replacement templates
        let template = format!("${{head}}, {}${{pad}})", injected.replace('$', "$$"));
        Ok(Self {
            name,
            pattern,
            template,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Replace every match in `text` whose arguments do not already carry
    /// `injected` as a whole identifier. Returns the new text and the
    /// replacement count.
    pub fn replace_all<'t>(&self, text: &'t str, injected: &str) -> (Cow<'t, str>, usize) {
        let mut out = String::new();
        let mut last = 0usize;
        let mut count = 0usize;

        for caps in self.pattern.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            if mentions_identifier(m.as_str(), injected) {
                tracing::trace!(rule = self.name, call = m.as_str(), "already augmented");
                continue;
            }
            if count == 0 {
                out.reserve(text.len() + injected.len() + 2);
            }
            out.push_str(&text[last..m.start()]);
            caps.expand(&self.template, &mut out);
            last = m.end();
            count += 1;
        }

        if count == 0 {
            return (Cow::Borrowed(text), 0);
        }
        out.push_str(&text[last..]);
        (Cow::Owned(out), count)
    }
}

/// The three shapes rewritten by default, in application order.
pub fn standard_rules(injected: &str) -> Result<Vec<RewriteRule>, regex::Error> {
    let empty_literal = format!(
        r"(?P<head>\blogHeader\([ \t]*{EMPTY_OBJECT}{SEP}{STRING_LITERAL})(?P<pad>[ \t]*)\)"
    );
    let ident_literal =
        format!(r"(?P<head>\blogHeader\([ \t]*{IDENT}{SEP}{STRING_LITERAL})(?P<pad>[ \t]*)\)");
    let error_expr = format!(
        r"(?P<head>\blogHeaderError\([ \t]*{EMPTY_OBJECT}{SEP}{STRING_LITERAL}{SEP}{TRAILING_EXPR})(?P<pad>[ \t]*)\)"
    );

    Ok(vec![
        RewriteRule::new("logHeader({}, literal)", &empty_literal, injected)?,
        RewriteRule::new("logHeader(ident, literal)", &ident_literal, injected)?,
        RewriteRule::new("logHeaderError({}, literal, expr)", &error_expr, injected)?,
    ])
}
