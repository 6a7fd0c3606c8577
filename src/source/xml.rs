//! Parser for `pdf2xml -blocks` output.
//!
//! The relevant structure is
//!
//! ```text
//! <PAGE width height>
//!   <BLOCK>
//!     <TEXT x y width height>
//!       <TOKEN ...>word</TOKEN> ...
//!     </TEXT> ...
//!   </BLOCK> ...
//! </PAGE>
//! ```
//!
//! Each `BLOCK` becomes a [`TextBlock`], each `TEXT` a [`TextLine`] whose
//! text is its tokens joined by single spaces. `TEXT` outside a `BLOCK` is
//! ignored.

use crate::error::{Error, Result};
use crate::model::{Page, TextBlock, TextLine};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse every `PAGE` element of a pdf2xml document.
///
/// Pages are numbered 1.. in document order; callers that know the real page
/// number overwrite it.
pub fn parse_pdf2xml(xml: &str) -> Result<Vec<Page>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut pages = Vec::new();
    let mut page: Option<Page> = None;
    let mut block: Option<TextBlock> = None;
    let mut line: Option<TextLine> = None;
    let mut tokens: Vec<String> = Vec::new();

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"PAGE" => page = Some(start_page(&e, pages.len())?),
                b"BLOCK" if page.is_some() => block = Some(TextBlock::default()),
                b"TEXT" if block.is_some() => {
                    line = Some(start_line(&e)?);
                    tokens.clear();
                }
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"PAGE" => pages.push(start_page(&e, pages.len())?),
                b"TEXT" => {
                    if let Some(block) = block.as_mut() {
                        block.push_line(start_line(&e)?);
                    }
                }
                _ => {}
            },
            Event::Text(e) if line.is_some() => tokens.push(e.unescape()?.into_owned()),
            Event::CData(e) if line.is_some() => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                tokens.push(text);
            }
            Event::End(e) => match e.name().as_ref() {
                b"TEXT" => {
                    if let (Some(mut finished), Some(block)) = (line.take(), block.as_mut()) {
                        finished.text = tokens.join(" ");
                        block.push_line(finished);
                    }
                    tokens.clear();
                }
                b"BLOCK" => {
                    if let (Some(finished), Some(page)) = (block.take(), page.as_mut()) {
                        page.add_block(finished);
                    }
                }
                b"PAGE" => {
                    if let Some(finished) = page.take() {
                        pages.push(finished);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(pages)
}

fn start_page(e: &BytesStart<'_>, index: usize) -> Result<Page> {
    let width = float_attr(e, "PAGE", "width")?;
    let height = float_attr(e, "PAGE", "height")?;
    Ok(Page::new(index as u32 + 1, width, height))
}

fn start_line(e: &BytesStart<'_>) -> Result<TextLine> {
    Ok(TextLine::new(
        String::new(),
        float_attr(e, "TEXT", "x")?,
        float_attr(e, "TEXT", "y")?,
        float_attr(e, "TEXT", "width")?,
        float_attr(e, "TEXT", "height")?,
    ))
}

fn float_attr(e: &BytesStart<'_>, element: &str, name: &str) -> Result<f64> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr.unescape_value()?;
            return match value.trim().parse() {
                Ok(number) => Ok(number),
                Err(_) => Err(not_a_number(element, name, &value)),
            };
        }
    }
    Err(Error::Xml(format!("missing attribute `{name}` on <{element}>")))
}

fn not_a_number(element: &str, name: &str, value: &str) -> Error {
    Error::Xml(format!("attribute `{name}` of <{element}> is not a number: {value:?}"))
}
