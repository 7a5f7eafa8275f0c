use async_trait::async_trait;
use bytes::Bytes;
use docx_rs::{
    DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild, StructuredDataTag,
    StructuredDataTagChild, Table, TableCellContent, TableChild, TableRowChild,
};

use crate::parsing::errors::LoaderError;

/// Extracts text from OOXML word-processing documents.
#[async_trait]
pub trait DocxLoader: Send + Sync {
    async fn load(&self, bytes: Bytes) -> Result<Vec<String>, LoaderError>;
}

/// `docx-rs` backed loader. Produces a single fragment with one line per
/// paragraph, table cell paragraphs included.
pub struct DocxRsLoader;

#[async_trait]
impl DocxLoader for DocxRsLoader {
    async fn load(&self, bytes: Bytes) -> Result<Vec<String>, LoaderError> {
        let text = tokio::task::spawn_blocking(move || extract_docx_text(&bytes))
            .await
            .map_err(|e| LoaderError::Task(format!("DOCX extraction panicked or was cancelled: {e}")))??;
        Ok(vec![text])
    }
}

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, LoaderError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| LoaderError::Extraction(format!("not a readable Word document: {e}")))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(para) => push_paragraph(para, &mut lines),
            DocumentChild::Table(table) => push_table(table, &mut lines),
            DocumentChild::StructuredDataTag(tag) => push_tag(tag, &mut lines),
            _ => {}
        }
    }
    lines.retain(|line| !line.trim().is_empty());

    if lines.is_empty() {
        return Err(LoaderError::Extraction(
            "document contains no text".to_string(),
        ));
    }
    Ok(lines.join("\n"))
}

fn push_paragraph(para: &Paragraph, lines: &mut Vec<String>) {
    let mut text = String::new();
    paragraph_text(&para.children, &mut text);
    lines.push(text);
}

/// Row by row, cell by cell. Nested tables are flattened in place.
fn push_table(table: &Table, lines: &mut Vec<String>) {
    for TableChild::TableRow(row) in &table.rows {
        for TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(para) => push_paragraph(para, lines),
                    TableCellContent::Table(inner) => push_table(inner, lines),
                    TableCellContent::StructuredDataTag(tag) => push_tag(tag, lines),
                    TableCellContent::TableOfContents(_) => {}
                }
            }
        }
    }
}

/// Block-level content control.
fn push_tag(tag: &StructuredDataTag, lines: &mut Vec<String>) {
    for child in &tag.children {
        match child {
            StructuredDataTagChild::Paragraph(para) => push_paragraph(para, lines),
            StructuredDataTagChild::Table(table) => push_table(table, lines),
            StructuredDataTagChild::StructuredDataTag(inner) => push_tag(inner, lines),
            StructuredDataTagChild::Run(run) => {
                let mut text = String::new();
                run_text(run, &mut text);
                lines.push(text);
            }
            _ => {}
        }
    }
}

fn paragraph_text(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => run_text(run, text),
            ParagraphChild::Hyperlink(link) => paragraph_text(&link.children, text),
            // Tracked insertions are part of the current text; deletions are not.
            ParagraphChild::Insert(insert) => {
                for inserted in &insert.children {
                    if let InsertChild::Run(run) = inserted {
                        run_text(run, text);
                    }
                }
            }
            ParagraphChild::StructuredDataTag(tag) => {
                for tagged in &tag.children {
                    if let StructuredDataTagChild::Run(run) = tagged {
                        run_text(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn run_text(run: &Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::fixtures;

    #[test]
    fn test_extracts_paragraphs_in_order() {
        let bytes = fixtures::docx(&["Jane Doe", "", "Staff Engineer at Acme"]);
        let text = extract_docx_text(&bytes).unwrap();
        assert_eq!(text, "Jane Doe\nStaff Engineer at Acme");
    }

    #[test]
    fn test_document_without_text_is_an_error() {
        let bytes = fixtures::docx(&[]);
        assert!(extract_docx_text(&bytes).is_err());
    }

    #[test]
    fn test_non_zip_bytes_are_an_error() {
        let err = extract_docx_text(b"plain text pretending to be docx").unwrap_err();
        assert!(err.to_string().contains("not a readable Word document"));
    }

    #[test]
    fn test_extracts_table_cells() {
        let bytes = fixtures::docx_with_table(
            "Jane Doe",
            &["Staff Engineer, Acme 2019-2023", "Rust, Go, PostgreSQL"],
        );
        let text = extract_docx_text(&bytes).unwrap();
        assert_eq!(
            text,
            "Jane Doe\nStaff Engineer, Acme 2019-2023\nRust, Go, PostgreSQL"
        );
    }

    #[test]
    fn test_extracts_hyperlink_text() {
        let bytes = fixtures::docx_with_link("Contact:", "jane@example.com");
        let text = extract_docx_text(&bytes).unwrap();
        assert!(text.starts_with("Contact:"), "{text:?}");
        assert!(text.ends_with("jane@example.com"), "{text:?}");
    }

    #[tokio::test]
    async fn test_loader_returns_single_fragment() {
        let bytes = fixtures::docx(&["Summary", "Built billing pipelines"]);
        let fragments = DocxRsLoader.load(Bytes::from(bytes)).await.unwrap();
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].contains("billing pipelines"));
    }
}
