//! Line splitting for the interactive session

use crate::error::{Result, RuckError};

/// Split a command line into words.
///
/// Words are separated by whitespace. Single or double quotes group words
/// (`--name "Park Trail"`), and a backslash escapes the next character.
pub fn split_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (_, '\\') => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| RuckError::Validation("trailing backslash".to_string()))?;
                current.push(escaped);
                in_word = true;
            }
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(RuckError::Validation(format!("unterminated {} quote", q)));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}

/// Whether the line asks to leave the session
pub fn is_exit(words: &[String]) -> bool {
    matches!(
        words.first().map(String::as_str),
        Some("exit") | Some("quit")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words() {
        assert_eq!(split_line("gear list").unwrap(), vec!["gear", "list"]);
        assert_eq!(split_line("   history   --limit 3 ").unwrap(), vec!["history", "--limit", "3"]);
        assert!(split_line("").unwrap().is_empty());
    }

    #[test]
    fn test_quoted_words() {
        assert_eq!(
            split_line(r#"log --route "River Run" --gear 'GORUCK Rucker 4.0'"#).unwrap(),
            vec!["log", "--route", "River Run", "--gear", "GORUCK Rucker 4.0"]
        );
        assert_eq!(split_line(r#"gear add --name """#).unwrap(), vec!["gear", "add", "--name", ""]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(split_line(r"say It\'s").unwrap(), vec!["say", "It's"]);
        assert!(split_line("oops \\").is_err());
    }

    #[test]
    fn test_unterminated_quote() {
        assert!(matches!(
            split_line("log --route \"River"),
            Err(RuckError::Validation(_))
        ));
    }

    #[test]
    fn test_is_exit() {
        assert!(is_exit(&split_line("quit").unwrap()));
        assert!(is_exit(&split_line("exit now").unwrap()));
        assert!(!is_exit(&split_line("history").unwrap()));
        assert!(!is_exit(&[]));
    }
}
