//! Parsing of array columns delivered in their `{a,b,c}` text form.

/// Split a PostgreSQL array literal into its elements.
///
/// `None`, `{}` and the empty string all yield an empty list. Elements keep
/// their source order. Double-quoted elements may contain commas and braces;
/// the quotes and backslash escapes are removed.
///
/// ```
/// use jcpao_directory_core::parse_text_array;
///
/// assert_eq!(parse_text_array(Some("{GCU,SVU}")), vec!["GCU", "SVU"]);
/// assert!(parse_text_array(None).is_empty());
/// ```
#[must_use]
pub fn parse_text_array(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let raw = raw.trim();
    let inner = raw
        .strip_prefix('{')
        .and_then(|r| r.strip_suffix('}'))
        .unwrap_or(raw);
    if inner.trim().is_empty() {
        return Vec::new();
    }

    let mut elements = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => current.extend(chars.next()),
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => elements.push(finish_element(&mut current)),
            _ => current.push(c),
        }
    }
    elements.push(finish_element(&mut current));

    elements
}

fn finish_element(current: &mut String) -> String {
    std::mem::take(current).trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_forms() {
        assert!(parse_text_array(None).is_empty());
        assert!(parse_text_array(Some("")).is_empty());
        assert!(parse_text_array(Some("{}")).is_empty());
    }

    #[test]
    fn test_preserves_order() {
        assert_eq!(
            parse_text_array(Some("{VCU,Exec,Drug}")),
            vec!["VCU", "Exec", "Drug"]
        );
    }

    #[test]
    fn test_single_element() {
        assert_eq!(parse_text_array(Some("{FSD}")), vec!["FSD"]);
    }

    #[test]
    fn test_quoted_elements() {
        assert_eq!(
            parse_text_array(Some("{\"Drug Court\",GCU}")),
            vec!["Drug Court", "GCU"]
        );
    }

    #[test]
    fn test_quoted_element_with_comma() {
        assert_eq!(parse_text_array(Some("{\"A, B\",GCU}")), vec!["A, B", "GCU"]);
        assert_eq!(
            parse_text_array(Some("{\"x}\",\"say \\\"hi\\\"\"}")),
            vec!["x}", "say \"hi\""]
        );
    }
}
