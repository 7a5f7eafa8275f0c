//! Builders for real PDF and DOCX bytes used by the parsing tests.

use std::io::Cursor;

use docx_rs::{Docx, Hyperlink, HyperlinkType, Paragraph, Run, Table, TableCell, TableRow};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

const WORDS: &[&str] = &[
    "engineer", "platform", "rust", "services", "latency", "billing", "team", "mentored",
    "designed", "shipped", "pipeline", "customers", "reliability", "migration", "database",
    "queue", "observability", "hiring", "roadmap", "product",
];

/// `lines_per_page` lines of `words_per_line` words each, cycling through a fixed vocabulary.
pub fn resume_pages(pages: usize, lines_per_page: usize, words_per_line: usize) -> Vec<Vec<String>> {
    let mut n = 0usize;
    (0..pages)
        .map(|_| {
            (0..lines_per_page)
                .map(|_| {
                    (0..words_per_line)
                        .map(|_| {
                            let word = WORDS[n % WORDS.len()];
                            n += 1;
                            word
                        })
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect()
        })
        .collect()
}

/// A text-only PDF with one page per entry of `pages`, each line set in 10pt Courier.
pub fn text_pdf(pages: &[Vec<String>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
            Operation::new("Td", vec![50.into(), 780.into()]),
        ];
        for line in lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
            operations.push(Operation::new("Td", vec![0.into(), (-14).into()]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn pack(docx: Docx) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

pub fn docx(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(paragraph(text));
    }
    pack(docx)
}

/// A heading paragraph followed by a one-row table, one cell per entry of `cells`.
pub fn docx_with_table(heading: &str, cells: &[&str]) -> Vec<u8> {
    let row = TableRow::new(
        cells
            .iter()
            .map(|text| TableCell::new().add_paragraph(paragraph(text)))
            .collect(),
    );
    pack(
        Docx::new()
            .add_paragraph(paragraph(heading))
            .add_table(Table::new(vec![row])),
    )
}

/// One paragraph: `label` as a plain run, then `address` as a mailto hyperlink.
pub fn docx_with_link(label: &str, address: &str) -> Vec<u8> {
    let link = Hyperlink::new(format!("mailto:{address}"), HyperlinkType::External)
        .add_run(Run::new().add_text(address));
    pack(Docx::new().add_paragraph(
        Paragraph::new()
            .add_run(Run::new().add_text(label))
            .add_hyperlink(link),
    ))
}
