//! Paragraph text extraction from a WordprocessingML `document.xml` part.
//!
//! Only top-level body paragraphs (`w:body/w:p`) are collected. Paragraphs in
//! tables, content controls or text boxes are not body paragraphs and are
//! skipped. A paragraph's text comes from its direct runs (`w:p/w:r`) and the
//! runs of its direct hyperlinks (`w:p/w:hyperlink/w:r`); runs wrapped in any
//! other element (`w:ins`, `w:smartTag`, `w:fldSimple`, ...) are left out.
//! Run content is rendered the way Word's plain text view does: `w:t` text
//! verbatim, `w:tab`/`w:ptab` as a tab, line breaks and carriage returns as
//! `\n`, non-breaking hyphens as `-`.

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parse `document.xml`, returning the text of each body paragraph in order.
pub fn parse_paragraphs<R: BufRead>(reader: R) -> Result<Vec<String>, quick_xml::Error> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(false);

    let mut buf = Vec::with_capacity(4096);

    // Local names of currently open elements
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    // Text of the body paragraph being read, if any
    let mut current: Option<String> = None;
    // Stack depth at which `current` was opened
    let mut para_depth = 0usize;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = e.local_name().as_ref().to_vec();
                if let Some(text) = current.as_mut() {
                    if run_content(&stack, para_depth).is_some_and(|rest| rest.is_empty()) {
                        push_run_element(text, e);
                    }
                } else if name == b"p" && parent_is(&stack, b"body") {
                    current = Some(String::new());
                    para_depth = stack.len();
                }
                stack.push(name);
            }

            Event::Empty(ref e) => {
                if let Some(text) = current.as_mut() {
                    if run_content(&stack, para_depth).is_some_and(|rest| rest.is_empty()) {
                        push_run_element(text, e);
                    }
                } else if e.local_name().as_ref() == b"p" && parent_is(&stack, b"body") {
                    paragraphs.push(String::new());
                }
            }

            Event::Text(ref e) => {
                if let Some(text) = current.as_mut() {
                    if in_run_text(&stack, para_depth) {
                        text.push_str(&e.unescape()?);
                    }
                }
            }

            Event::CData(ref e) => {
                if let Some(text) = current.as_mut() {
                    if in_run_text(&stack, para_depth) {
                        text.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
            }

            Event::End(_) => {
                let name = stack.pop().unwrap_or_default();
                if name == b"p" && current.is_some() && stack.len() == para_depth {
                    paragraphs.extend(current.take());
                }
            }

            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    Ok(paragraphs)
}

fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().is_some_and(|n| n.as_slice() == name)
}

/// Elements open inside a counted run, or `None` when the innermost open
/// element is not within `w:p/w:r` or `w:p/w:hyperlink/w:r` of the current
/// paragraph.
fn run_content(stack: &[Vec<u8>], para_depth: usize) -> Option<&[Vec<u8>]> {
    let (p, rest) = stack.get(para_depth..)?.split_first()?;
    if p.as_slice() != b"p" {
        return None;
    }
    let rest = match rest.split_first() {
        Some((link, inner)) if link.as_slice() == b"hyperlink" => inner,
        _ => rest,
    };
    let (r, content) = rest.split_first()?;
    (r.as_slice() == b"r").then_some(content)
}

fn in_run_text(stack: &[Vec<u8>], para_depth: usize) -> bool {
    run_content(stack, para_depth)
        .is_some_and(|rest| matches!(rest, [t] if t.as_slice() == b"t"))
}

/// Render a run-level element that stands for a character.
fn push_run_element(text: &mut String, e: &BytesStart<'_>) {
    match e.local_name().as_ref() {
        b"tab" | b"ptab" => text.push('\t'),
        b"cr" => text.push('\n'),
        b"br" if is_line_break(e) => text.push('\n'),
        b"noBreakHyphen" => text.push('-'),
        _ => {}
    }
}

/// Page and column breaks render as nothing; only text-wrapping breaks (the
/// default when `w:type` is absent) become newlines.
fn is_line_break(e: &BytesStart<'_>) -> bool {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == b"type")
        .is_none_or(|a| a.value.as_ref() == b"textWrapping")
}
