use regex::bytes::{Regex, RegexBuilder};

use crate::error::{EditError, Result};

/// Compiles an anchor pattern for matching raw file bytes.
///
/// Accepts a bare regex (`require.+autoload\.php;`) or the delimited
/// `/regex/flags` form. Recognised flags are `i`, `m`, `s`, `x`, `U` and `u`.
/// Without `u`, classes like `.` and `\w` work byte-wise so files that are not
/// valid UTF-8 still match; `u` switches to Unicode-aware matching.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let builder = match split_delimited(pattern) {
        Some((body, flags)) => {
            let mut builder = RegexBuilder::new(body);
            builder.unicode(false);
            for flag in flags.chars() {
                match flag {
                    'i' => builder.case_insensitive(true),
                    'm' => builder.multi_line(true),
                    's' => builder.dot_matches_new_line(true),
                    'x' => builder.ignore_whitespace(true),
                    'U' => builder.swap_greed(true),
                    'u' => builder.unicode(true),
                    _ => &mut builder,
                };
            }
            builder
        }
        None => {
            let mut builder = RegexBuilder::new(pattern);
            builder.unicode(false);
            builder
        }
    };

    builder.build().map_err(|source| EditError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, flags) = (&rest[..close], &rest[close + 1..]);
    if body.is_empty() || !flags.chars().all(|c| "imsxuU".contains(c)) {
        return None;
    }
    Some((body, flags))
}
