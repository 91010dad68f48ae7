//! PDF text extraction using lopdf

use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use super::LibraryError;

/// Extract the text of every page, pages joined with a newline.
///
/// Pages whose content stream cannot be decoded are skipped with a warning;
/// a file that is not a readable PDF at all is an error.
pub fn extract_pdf_text(path: &Path) -> Result<String, LibraryError> {
    let name = display_name(path);
    let doc = Document::load(path).map_err(|e| LibraryError::Extraction {
        name: name.clone(),
        reason: e.to_string(),
    })?;

    let pages = doc.get_pages();
    let mut page_texts = Vec::with_capacity(pages.len());
    for page_num in pages.keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(text) => page_texts.push(text),
            Err(e) => warn!("Skipping page {} of {}: {}", page_num, name, e),
        }
    }

    debug!("Extracted {} pages from {}", page_texts.len(), name);
    Ok(page_texts.join("\n"))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};
    use tempfile::tempdir;

    /// Write a one-page PDF with `text` drawn in Courier
    pub(crate) fn write_test_pdf(path: &Path, text: &str) {
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
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_extracts_text_from_generated_pdf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hello.pdf");
        write_test_pdf(&path, "Hello Mesmerizer");

        let text = extract_pdf_text(&path).unwrap();
        assert!(text.contains("Hello Mesmerizer"), "got: {:?}", text);
    }

    #[test]
    fn test_garbage_file_is_extraction_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();

        let err = extract_pdf_text(&path).unwrap_err();
        assert!(matches!(err, LibraryError::Extraction { ref name, .. } if name == "broken.pdf"));
    }
}
