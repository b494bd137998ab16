//! Whole-word identifier lookup that ignores string literals.

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// True when `ident` appears in `text` as a whole identifier outside any
/// quoted literal. `'... test_case_id ...'` and `my_test_case_id` do not count.
///
/// A literal left open at the end of `text` (a template literal continuing on
/// the next line) is treated as running to the end.
pub fn mentions_identifier(text: &str, ident: &str) -> bool {
    if ident.is_empty() {
        return false;
    }
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev: Option<char> = None;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            prev = Some(c);
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            _ if prev.is_none_or(|p| !is_ident_char(p)) && text[i..].starts_with(ident) => {
                let after = text[i + ident.len()..].chars().next();
                if after.is_none_or(|a| !is_ident_char(a)) {
                    return true;
                }
            }
            _ => {}
        }
        prev = Some(c);
    }
    false
}
