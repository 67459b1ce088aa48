//! Static tables that tune the rewrite heuristics.

/// Words that, found before a colon during the backward scan, mark
/// the colon as a type annotation rather than a named argument.
pub const DEFAULT_DECLARATION_KEYWORDS: &[&str] =
    &["var", "let", "class", "struct", "enum", "Self", "init", "func"];

/// Tokens that, directly after a `{`, mark the brace as the start of
/// a closure signature.
pub const DEFAULT_CLOSURE_OPENERS: &[&str] = &["(", "["];

/// Name Swift gives the value passed to a setter that declares none.
pub const DEFAULT_IMPLICIT_SETTER_PARAMETER: &str = "newValue";

/// One indentation level, appended to a line's own indentation for
/// relocated setter modifiers.
pub const DEFAULT_INDENT_UNIT: &str = "\t";

/// Configuration shared by the transformers.
///
/// ```
/// use swiftkotlin::Config;
///
/// let config = Config::new()
///     .indent_unit("    ")
///     .implicit_setter_parameter("value");
/// assert_eq!(config.indent_unit, "    ");
/// assert!(config.is_declaration_keyword("func"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub declaration_keywords: Vec<String>,
    pub closure_openers: Vec<String>,
    pub implicit_setter_parameter: String,
    pub indent_unit: String,
}

impl Config {
    /// Configuration with the default tables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration_keywords: to_owned(DEFAULT_DECLARATION_KEYWORDS),
            closure_openers: to_owned(DEFAULT_CLOSURE_OPENERS),
            implicit_setter_parameter: DEFAULT_IMPLICIT_SETTER_PARAMETER.to_string(),
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
        }
    }

    /// Replace the declaration keyword table.
    #[must_use]
    pub fn declaration_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declaration_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the closure opener table.
    #[must_use]
    pub fn closure_openers<I, S>(mut self, openers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.closure_openers = openers.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn implicit_setter_parameter(mut self, name: &str) -> Self {
        self.implicit_setter_parameter = name.to_string();
        self
    }

    #[must_use]
    pub fn indent_unit(mut self, unit: &str) -> Self {
        self.indent_unit = unit.to_string();
        self
    }

    #[must_use]
    pub fn is_declaration_keyword(&self, text: &str) -> bool {
        self.declaration_keywords.iter().any(|k| k == text)
    }

    #[must_use]
    pub fn is_closure_opener(&self, text: &str) -> bool {
        self.closure_openers.iter().any(|o| o == text)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.is_declaration_keyword("Self"));
        assert!(!config.is_declaration_keyword("return"));
        assert!(config.is_closure_opener("("));
        assert!(!config.is_closure_opener("{"));
        assert_eq!(config.implicit_setter_parameter, "newValue");
        assert_eq!(config.indent_unit, "\t");
    }

    #[test]
    fn builder_replaces_tables() {
        let config = Config::new()
            .declaration_keywords(["let"])
            .closure_openers(Vec::<String>::new());
        assert!(!config.is_declaration_keyword("var"));
        assert!(!config.is_closure_opener("("));
    }
}
