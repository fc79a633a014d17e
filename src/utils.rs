/// Shortens `s` to at most `max` characters for log output, flattening newlines.
pub fn clip(s: &str, max: usize) -> String {
    let flat = s.replace('\n', "\\n");
    if flat.chars().count() <= max {
        return flat;
    }
    let mut out: String = flat.chars().take(max).collect();
    out.push_str("… [truncated]");
    out
}
