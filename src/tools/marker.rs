use crate::types::MarkerStyle;

/// Start/end line pair bracketing an inserted snippet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    pub start: String,
    pub end: String,
}

impl Marker {
    pub fn new(id: &str, style: MarkerStyle) -> Marker {
        Marker {
            start: comment(&format!("AUTOEDIT: {} START", id), style),
            end: comment(&format!("AUTOEDIT: {} END", id), style),
        }
    }

    pub fn wrap(&self, snippet: &str) -> String {
        format!("{}\n{}\n{}", self.start, snippet, self.end)
    }

    // Only the start marker counts; a dangling START still blocks re-insertion.
    pub fn is_present(&self, text: &[u8]) -> bool {
        let needle = self.start.as_bytes();
        text.windows(needle.len()).any(|window| window == needle)
    }
}

fn comment(body: &str, style: MarkerStyle) -> String {
    match style {
        MarkerStyle::Block => format!("/* {} */", body),
        MarkerStyle::Line => format!("// {}", body),
        MarkerStyle::Hash => format!("# {}", body),
        MarkerStyle::Html => format!("<!-- {} -->", body),
        MarkerStyle::Plain => body.to_string(),
    }
}

/// The snippet exactly as it will land in the file.
pub fn wrap_snippet(snippet: &str, marker: Option<&Marker>) -> String {
    match marker {
        Some(marker) => marker.wrap(snippet),
        None => snippet.to_string(),
    }
}
