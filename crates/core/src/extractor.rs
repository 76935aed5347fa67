use crate::error::IngestError;
use crate::models::{CorpusText, DocumentUpload, PageWarning};
use lopdf::Document;

pub fn extract_document_text(
    upload: &DocumentUpload,
) -> Result<(String, Vec<PageWarning>), IngestError> {
    let document = Document::load_mem(&upload.bytes)
        .map_err(|error| IngestError::PdfParse(format!("{}: {}", upload.name, error)))?;

    let mut text = String::new();
    let mut warnings = Vec::new();

    for (page_no, _page_id) in document.get_pages() {
        match document.extract_text(&[page_no]) {
            Ok(page_text) if !page_text.trim().is_empty() => text.push_str(&page_text),
            _ => warnings.push(PageWarning {
                document: upload.name.clone(),
                page: page_no,
            }),
        }
    }

    Ok((text, warnings))
}

pub fn extract_corpus_text(documents: &[DocumentUpload]) -> Result<CorpusText, IngestError> {
    let mut corpus = String::new();
    let mut warnings = Vec::new();

    for upload in documents {
        let (text, mut document_warnings) = extract_document_text(upload)?;
        corpus.push_str(&text);
        warnings.append(&mut document_warnings);
    }

    Ok(CorpusText {
        text: corpus,
        warnings,
    })
}

#[cfg(test)]
pub(crate) mod test_pdf {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    pub fn single_page_pdf(text: &str) -> Vec<u8> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = document.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = document.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content stream should encode"),
        ));

        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        document
            .save_to(&mut bytes)
            .expect("in-memory pdf should serialize");
        bytes
    }

    pub fn blank_page_pdf() -> Vec<u8> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        let content_id = document.add_object(Stream::new(
            dictionary! {},
            Content { operations: vec![] }
                .encode()
                .expect("empty content stream should encode"),
        ));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        document
            .save_to(&mut bytes)
            .expect("in-memory pdf should serialize");
        bytes
    }
}
