// src/parser/mod.rs
// Splits a raw line into a command name and its arguments.
// No quoting, escaping or globbing: the host interpreter gets the raw line
// for anything that is not a builtin.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Lowercased first token.
    pub name: String,
    pub args: Vec<String>,
}

pub fn tokenize(input: &str) -> Vec<String> {
    input.split_whitespace().map(String::from).collect()
}

/// `None` for empty or whitespace-only input.
pub fn parse(input: &str) -> Option<Invocation> {
    let mut tokens = tokenize(input).into_iter();
    let name = tokens.next()?.to_lowercase();
    Some(Invocation { name, args: tokens.collect() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        assert_eq!(parse(""), None);
        assert_eq!(parse(" \t  "), None);
    }

    #[test]
    fn test_case_folds_name_only() {
        let inv = parse("  LS   Some/Dir  ").unwrap();
        assert_eq!(inv.name, "ls");
        assert_eq!(inv.args, vec!["Some/Dir"]);
    }

    #[test]
    fn test_no_quote_handling() {
        assert_eq!(tokenize(r#"echo "a b" 'c'"#), vec!["echo", "\"a", "b\"", "'c'"]);
    }
}
