use crate::error::QuizError;
use crate::logger;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, ObjectId, Stream};
use std::path::Path;

/// Text pulled from an inclusive page range, plus the document's page count.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfExtraction {
    pub text: String,
    pub page_count: u32,
}

/// Collapse one page's extracted text items into a single space-separated line.
pub fn join_page_items(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Give every text-showing operator its own text object.
///
/// `Document::extract_text` only breaks at `ET`, so items sharing one `BT`..`ET` block
/// would run together. `'` and `"` are rewritten to their `T*`/`Tw`/`Tc` + `Tj` equivalents.
pub fn isolate_text_items(operations: Vec<Operation>) -> Vec<Operation> {
    let mut out = Vec::with_capacity(operations.len() * 3);
    for op in operations {
        match op.operator.as_str() {
            "Tj" | "TJ" => out.push(op),
            "'" => {
                out.push(Operation::new("T*", vec![]));
                out.push(Operation::new("Tj", op.operands));
            }
            "\"" => {
                if let [aw, ac, text] = op.operands.as_slice() {
                    out.push(Operation::new("Tw", vec![aw.clone()]));
                    out.push(Operation::new("Tc", vec![ac.clone()]));
                    out.push(Operation::new("T*", vec![]));
                    out.push(Operation::new("Tj", vec![text.clone()]));
                }
            }
            _ => {
                out.push(op);
                continue;
            }
        }
        out.push(Operation::new("ET", vec![]));
        out.push(Operation::new("BT", vec![]));
    }
    out
}

/// Replace a page's content with the item-isolated version of itself.
fn split_page_items(document: &mut Document, page_id: ObjectId) -> Result<(), QuizError> {
    let content = Content::decode(&document.get_page_content(page_id)?)?;
    let rewritten = Content {
        operations: isolate_text_items(content.operations),
    }
    .encode()?;

    let stream_id = document.add_object(Stream::new(dictionary! {}, rewritten));
    document
        .get_object_mut(page_id)?
        .as_dict_mut()?
        .set("Contents", stream_id);
    Ok(())
}

/// Concatenate pages in order, each prefixed with a newline.
pub fn assemble_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pages.into_iter().fold(String::new(), |mut acc, page| {
        acc.push('\n');
        acc.push_str(page.as_ref());
        acc
    })
}

fn check_range_order(start: u32, end: u32) -> Result<(), QuizError> {
    if start == 0 || start > end {
        return Err(QuizError::InvalidPageRange { start, end });
    }
    Ok(())
}

pub fn validate_page_range(start: u32, end: u32, page_count: u32) -> Result<(), QuizError> {
    check_range_order(start, end)?;
    if end > page_count {
        return Err(QuizError::PageOutOfRange {
            page: end,
            page_count,
        });
    }
    Ok(())
}

/// Extract pages `start..=end` (1-based) from an in-memory PDF.
pub fn extract_page_range(bytes: &[u8], start: u32, end: u32) -> Result<PdfExtraction, QuizError> {
    check_range_order(start, end)?;

    let mut document = Document::load_mem(bytes)?;
    let page_ids = document.get_pages();
    let page_count = page_ids.len() as u32;
    validate_page_range(start, end, page_count)?;

    let mut pages = Vec::with_capacity((end - start + 1) as usize);
    for page in start..=end {
        if let Some(page_id) = page_ids.get(&page) {
            split_page_items(&mut document, *page_id)?;
        }
        let raw = document.extract_text(&[page])?;
        pages.push(join_page_items(&raw));
    }

    Ok(PdfExtraction {
        text: assemble_pages(&pages),
        page_count,
    })
}

pub fn extract_from_file(path: &Path, start: u32, end: u32) -> Result<PdfExtraction, QuizError> {
    logger::log(&format!(
        "Extracting pages {}-{} from {}",
        start,
        end,
        path.display()
    ));
    // A bad range is reported without touching the file
    check_range_order(start, end)?;
    let bytes = std::fs::read(path)?;
    let extraction = extract_page_range(&bytes, start, end)?;
    logger::log(&format!(
        "Extracted {} chars from {} page document",
        extraction.text.len(),
        extraction.page_count
    ));
    Ok(extraction)
}
