//! Document conversions: plain text, Markdown, HTML and PDF
//!
//! Markdown goes through pulldown-cmark, PDFs are written and read with lopdf.
//! PDF output uses the standard Courier font so no font files are embedded.

use std::fs;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

use super::error::Result;

// A4 in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 56;
const FONT_SIZE: i64 = 10;
const LEADING: i64 = 14;
/// Courier at 10pt is 6pt per glyph, so 80 columns fit inside the margins
pub const WRAP_COLUMNS: usize = 80;

// ============================================================================
// HTML output
// ============================================================================

/// Wrap a plain text file in a minimal HTML page, one `<p>` per paragraph
pub fn text_to_html(input: &Path, output: &Path) -> Result<()> {
    let text = fs::read_to_string(input)?;
    let body = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", escape_html(p).replace('\n', "<br>\n")))
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(output, html_page(&page_title(input), &body))?;
    Ok(())
}

/// Render a Markdown file as an HTML page
pub fn markdown_to_html(input: &Path, output: &Path) -> Result<()> {
    let markdown = fs::read_to_string(input)?;
    let parser = Parser::new_ext(&markdown, markdown_options());
    let mut body = String::new();
    html::push_html(&mut body, parser);
    fs::write(output, html_page(&page_title(input), body.trim_end()))?;
    Ok(())
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

fn html_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn page_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Escape text for HTML bodies and attributes, the same way rendered Markdown is
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail
    let _ = pulldown_cmark_escape::escape_html(&mut out, text);
    out
}

// ============================================================================
// Plain text output
// ============================================================================

/// Strip Markdown markup, keeping text and block-level line breaks
pub fn markdown_to_text(input: &Path, output: &Path) -> Result<()> {
    let markdown = fs::read_to_string(input)?;
    fs::write(output, render_markdown_text(&markdown))?;
    Ok(())
}

pub fn render_markdown_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new_ext(markdown, markdown_options()) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => out.push_str("- "),
            Event::TaskListMarker(done) => out.push_str(if done { "[x] " } else { "[ ] " }),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::CodeBlock) => out.push_str("\n\n"),
            Event::End(TagEnd::Item) | Event::End(TagEnd::TableRow) | Event::End(TagEnd::TableHead) => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            Event::End(TagEnd::TableCell) => out.push('\t'),
            Event::Rule => out.push_str("----\n\n"),
            _ => {}
        }
    }
    let mut text = out.trim_end().to_string();
    text.push('\n');
    text
}

/// Extract the text of every page of a PDF
pub fn pdf_to_text(input: &Path, output: &Path) -> Result<()> {
    let doc = Document::load(input)?;
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    log::debug!("Extracting text from {} page(s)", pages.len());
    let text = doc.extract_text(&pages)?;
    fs::write(output, text)?;
    Ok(())
}

// ============================================================================
// PDF output
// ============================================================================

/// Lay a plain text file out on A4 pages
pub fn text_to_pdf(input: &Path, output: &Path) -> Result<()> {
    let text = fs::read_to_string(input)?;
    let mut doc = build_pdf(&wrap_lines(&text, WRAP_COLUMNS))?;
    doc.save(output)?;
    Ok(())
}

/// Hard-wrap text to `width` columns, breaking on whitespace where possible
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        let raw = raw.replace('\t', "    ");
        if raw.chars().count() <= width {
            lines.push(raw);
            continue;
        }
        let mut current = String::new();
        for word in raw.split(' ') {
            let mut word = word.to_string();
            while word.chars().count() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let head: String = word.chars().take(width).collect();
                word = word.chars().skip(width).collect();
                lines.push(head);
            }
            let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
            if needed > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }
    lines
}

fn lines_per_page() -> usize {
    ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize
}

/// Build a PDF with one text object per line so extraction keeps line breaks
fn build_pdf(lines: &[String]) -> Result<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids: Vec<ObjectId> = Vec::new();
    let chunks: Vec<&[String]> = if lines.is_empty() {
        vec![lines]
    } else {
        lines.chunks(lines_per_page()).collect()
    };

    for chunk in chunks {
        let mut operations = Vec::with_capacity(chunk.len() * 5);
        for (i, line) in chunk.iter().enumerate() {
            let y = PAGE_HEIGHT - MARGIN - FONT_SIZE - (i as i64) * LEADING;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]));
            operations.push(Operation::new("Td", vec![MARGIN.into(), y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(latin1_bytes(line), StringFormat::Literal)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let page_count = page_ids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.into_iter().map(Object::from).collect::<Vec<_>>(),
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    Ok(doc)
}

/// Standard fonts only cover a single-byte encoding; anything else becomes '?'
fn latin1_bytes(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| u8::try_from(u32::from(c)).ok().filter(|b| *b >= 0x20).unwrap_or(b'?'))
        .collect()
}
