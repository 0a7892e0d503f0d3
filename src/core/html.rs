// src/core/html.rs
// Minimal tag scanner for the case status page.
// Not a real parser: it tracks just enough nesting to answer
// "first text of the first <tag> that sits inside a <div>".
// Tag names are matched ASCII case-insensitively.

use super::sanitize::{normalize_entities, normalize_ws};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Open { name: String, self_closing: bool },
    Close(String),
    Text(&'a str),
    /// Comments, doctype, processing instructions.
    Skip,
}

struct Tokens<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Tokens<'a> {
    fn new(s: &'a str) -> Self { Self { s, i: 0 } }

    /// Jump to the closing tag of a raw-text element so its body is never tokenized.
    fn skip_raw_text(&mut self, name: &str) {
        let close = format!("</{name}");
        let rest = &self.s[self.i..];
        let lc = rest.to_ascii_lowercase();
        self.i += lc.find(&close).unwrap_or(rest.len());
    }
}

/// Byte offset of the `>` ending the tag that starts at `s[0] == '<'`, honoring quoted attributes.
fn tag_end(s: &str) -> Option<usize> {
    let mut in_s = false; // '
    let mut in_d = false; // "
    for (i, b) in s.bytes().enumerate().skip(1) {
        match b {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return Some(i),
            _ => {}
        }
    }
    None
}

fn tag_name(s: &str) -> String {
    s.chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn starts_markup(rest: &str) -> bool {
    matches!(rest.as_bytes().get(1), Some(b) if b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'))
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let s = self.s;
        let rest = &s[self.i..];
        if rest.is_empty() { return None; }

        if !rest.starts_with('<') || !starts_markup(rest) {
            // A stray '<' ("a < b") is text too; run until real markup starts.
            let mut len = usize::from(rest.starts_with('<'));
            loop {
                match rest[len..].find('<') {
                    None => { len = rest.len(); break; }
                    Some(p) => {
                        len += p;
                        if starts_markup(&rest[len..]) { break; }
                        len += 1;
                    }
                }
            }
            self.i += len;
            return Some(Token::Text(&rest[..len]));
        }

        if rest.starts_with("<!--") {
            self.i += rest.find("-->").map_or(rest.len(), |e| e + 3);
            return Some(Token::Skip);
        }

        let Some(end) = tag_end(rest) else {
            // Unterminated tag: nothing useful left.
            self.i = self.s.len();
            return Some(Token::Skip);
        };
        self.i += end + 1;
        let inner = rest[1..end].trim();

        if let Some(closing) = inner.strip_prefix('/') {
            return Some(Token::Close(tag_name(closing)));
        }
        if inner.starts_with('!') || inner.starts_with('?') {
            return Some(Token::Skip);
        }

        let name = tag_name(inner);
        let self_closing = inner.ends_with('/') || VOID_TAGS.contains(&name.as_str());
        if !self_closing && RAW_TEXT_TAGS.contains(&name.as_str()) {
            self.skip_raw_text(&name);
        }
        Some(Token::Open { name, self_closing })
    }
}

/// First direct text node of the element just opened; consumes through its closing tag.
/// `None` when the element has no direct text at all.
fn first_direct_text<'a>(tokens: &mut Tokens<'a>) -> Option<&'a str> {
    let mut depth = 0usize;
    for tok in tokens.by_ref() {
        match tok {
            Token::Text(t) if depth == 0 => return Some(t),
            Token::Open { self_closing: false, .. } => depth += 1,
            Token::Close(_) if depth == 0 => return None,
            Token::Close(_) => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Text of the first `<tag>` nested (at any depth) in an `<ancestor>`, i.e. the
/// CSS selector `ancestor tag` followed by `text()`. Entities are decoded and
/// whitespace collapsed. Elements without any direct text are passed over.
pub fn first_text_under(doc: &str, ancestor: &str, tag: &str) -> Option<String> {
    let mut tokens = Tokens::new(doc);
    let mut ancestor_depth = 0usize;

    while let Some(tok) = tokens.next() {
        match tok {
            Token::Open { name, self_closing: false } if name == tag && ancestor_depth > 0 => {
                if let Some(text) = first_direct_text(&mut tokens) {
                    return Some(normalize_ws(&normalize_entities(text)));
                }
            }
            Token::Open { name, self_closing: false } if name == ancestor => ancestor_depth += 1,
            Token::Close(name) if name == ancestor => ancestor_depth = ancestor_depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_heading_inside_div() {
        let doc = r#"<html><body><h1>Site Banner</h1>
            <div class="rows text-center"><H1>Case Was Received</H1><p>On May 2, 2020, we received...</p></div>
            </body></html>"#;
        assert_eq!(first_text_under(doc, "div", "h1").as_deref(), Some("Case Was Received"));
        assert_eq!(first_text_under(doc, "div", "p").as_deref(), Some("On May 2, 2020, we received..."));
    }

    #[test]
    fn nested_divs_and_closed_divs() {
        let doc = "<div><div></div></div><p>outside</p><div><section><p>inside</p></section></div>";
        assert_eq!(first_text_under(doc, "div", "p").as_deref(), Some("inside"));
    }

    #[test]
    fn skips_scripts_comments_and_quoted_gt() {
        let doc = r#"<div data-x="a>b"><script>var s = "<p>not me</p>";</script>
            <!-- <p>nor me</p> --><p>me &amp; you</p></div>"#;
        assert_eq!(first_text_under(doc, "div", "p").as_deref(), Some("me & you"));
    }

    #[test]
    fn text_node_before_child_element() {
        let doc = "<div><p>Lead text <strong>bold</strong> tail</p></div>";
        assert_eq!(first_text_under(doc, "div", "p").as_deref(), Some("Lead text"));
    }

    #[test]
    fn element_without_text_is_passed_over() {
        let doc = "<div><p><img src=x.png></p><p>second</p></div>";
        assert_eq!(first_text_under(doc, "div", "p").as_deref(), Some("second"));
    }

    #[test]
    fn absent_element_is_none() {
        assert_eq!(first_text_under("<div><span>x</span></div>", "div", "h1"), None);
        assert_eq!(first_text_under("<p>no div</p>", "div", "p"), None);
        assert_eq!(first_text_under("", "div", "p"), None);
    }

    #[test]
    fn stray_angle_bracket_is_text() {
        let doc = "<div><p>1 < 2 holds</p></div>";
        assert_eq!(first_text_under(doc, "div", "p").as_deref(), Some("1 < 2 holds"));
    }
}
