use regex::Regex;
use std::sync::OnceLock;

fn experience_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"[^0-9]\+ years|[^0-9]\+ year|[0-9] [0-9]\+ years|[0-9] [0-9]\+ year|\+[0-9]",
            r"|[0-9] to [0-9] year|[0-9] to [0-9] years|[0-9] to [0-9] yrs|[0-9] [0-9] yrs",
            r"|[^0-9] +year|[0-9] +years|..\+ yrs|[0-9] [0-9] +years|entry|junior",
        ))
        .unwrap()
    })
}

/// Leftmost experience mention in lowercased text, e.g. `"5 years"` or `"junior"`.
pub fn extract_experience(text: &str) -> Option<String> {
    experience_re()
        .find(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
}

/// First digit of an experience mention.
pub fn leading_digit(span: &str) -> Option<u32> {
    span.chars().find_map(|c| c.to_digit(10))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_mentions() {
        let span = extract_experience("minimum 5 years experience in sales").unwrap();
        assert_eq!(span, "5 years");
        assert_eq!(leading_digit(&span), Some(5));

        let span = extract_experience("3 to 5 years of experience").unwrap();
        assert_eq!(span, "3 to 5 year");
        assert_eq!(leading_digit(&span), Some(3));
    }

    #[test]
    fn literal_mentions_carry_no_digit() {
        let span = extract_experience("Junior accountant wanted").unwrap();
        assert_eq!(span, "junior");
        assert_eq!(leading_digit(&span), None);
    }

    #[test]
    fn no_mention() {
        assert_eq!(extract_experience("we build pipelines"), None);
    }
}
