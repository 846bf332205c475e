//! Course search keyword

use super::ValidationError;

/// Search keyword, trimmed and non-empty.
///
/// No length or character restrictions apply. The keyword is used as an
/// ILIKE pattern wrapped in `%...%`, so `%` and `_` are wildcards and `\`
/// escapes the next character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKeyword(String);

impl SearchKeyword {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "keyword" });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `field ILIKE '%' || keyword || '%'` against any of the given fields.
    pub fn matches_any(&self, fields: &[&str]) -> bool {
        let pattern = LikeToken::parse(&format!("%{}%", self.0.to_lowercase()));
        fields.iter().any(|f| {
            let text: Vec<char> = f.to_lowercase().chars().collect();
            like_match(&pattern, &text)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LikeToken {
    /// `%`
    AnyRun,
    /// `_`
    AnyChar,
    Literal(char),
}

impl LikeToken {
    fn parse(pattern: &str) -> Vec<Self> {
        let mut tokens = Vec::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            tokens.push(match c {
                '%' => Self::AnyRun,
                '_' => Self::AnyChar,
                // A trailing backslash has nothing to escape and stays literal
                '\\' => Self::Literal(chars.next().unwrap_or('\\')),
                other => Self::Literal(other),
            });
        }
        tokens
    }
}

/// Wildcard match with backtracking to the most recent `%`.
fn like_match(pattern: &[LikeToken], text: &[char]) -> bool {
    let (mut p, mut t) = (0, 0);
    let mut last_run: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(LikeToken::AnyRun) => {
                last_run = Some((p, t));
                p += 1;
            }
            Some(LikeToken::AnyChar) => {
                p += 1;
                t += 1;
            }
            Some(LikeToken::Literal(c)) if *c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match last_run {
                Some((run_p, run_t)) => {
                    last_run = Some((run_p, run_t + 1));
                    p = run_p + 1;
                    t = run_t + 1;
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|tok| *tok == LikeToken::AnyRun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(s: &str) -> SearchKeyword {
        SearchKeyword::new(s).unwrap()
    }

    #[test]
    fn trims_keyword() {
        assert_eq!(kw("  comp ").as_str(), "comp");
    }

    #[test]
    fn rejects_blank() {
        assert!(SearchKeyword::new("").is_err());
        assert!(SearchKeyword::new("   ").is_err());
    }

    #[test]
    fn matches_case_insensitively() {
        let data = kw("DATA");
        assert!(data.matches_any(&["Database Systems", "COMP3234"]));
        assert!(!data.matches_any(&["Web Development", "COMP3278", "Prof. Zhang"]));
    }

    #[test]
    fn percent_matches_everything() {
        assert!(kw("%").matches_any(&["Calculus"]));
        assert!(kw("%").matches_any(&[""]));
        assert!(kw("comp%34").matches_any(&["COMP3234"]));
        assert!(!kw("comp%99").matches_any(&["COMP3234"]));
    }

    #[test]
    fn underscore_matches_one_character() {
        assert!(kw("comp_2").matches_any(&["COMP3234"]));
        assert!(kw("_").matches_any(&["x"]));
        assert!(!kw("_").matches_any(&[""]));
        assert!(!kw("comp__9").matches_any(&["COMP3234"]));
    }

    #[test]
    fn backslash_escapes_wildcards() {
        assert!(kw(r"100\%").matches_any(&["100% attendance"]));
        assert!(!kw(r"100\%").matches_any(&["1000 students"]));
        assert!(kw(r"a\_b").matches_any(&["x a_b y"]));
        assert!(!kw(r"a\_b").matches_any(&["axb"]));
    }
}
