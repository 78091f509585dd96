//! Small generated PDFs for tests. Each page draws the text `Page N`.

use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};

/// Build a document whose `MediaBox` and `Resources` live on the page tree
/// root, so every page inherits them.
pub fn sample_pdf(page_count: u32) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for n in 1..=page_count {
        let content = page_content(n);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// `sample_pdf` with a link on page `from` whose destination is page `to`
/// (both 1-based).
pub fn sample_pdf_with_link(page_count: u32, from: u32, to: u32) -> Document {
    let mut doc = sample_pdf(page_count);
    let pages = doc.get_pages();
    let (from_id, to_id) = (pages[&from], pages[&to]);

    let link_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![
            Object::Integer(72),
            Object::Integer(700),
            Object::Integer(200),
            Object::Integer(720),
        ],
        "Dest" => vec![Object::Reference(to_id), Object::Name(b"Fit".to_vec())],
    });
    doc.get_dictionary_mut(from_id)
        .unwrap()
        .set("Annots", vec![Object::Reference(link_id)]);

    doc
}

pub fn page_content(page: u32) -> Vec<u8> {
    format!("BT /F1 24 Tf 72 720 Td (Page {}) Tj ET", page).into_bytes()
}

pub fn write_sample_pdf(dir: &Path, name: &str, page_count: u32) -> PathBuf {
    let path = dir.join(name);
    sample_pdf(page_count).save(&path).unwrap();
    path
}

/// Content stream of every page of the PDF at `path`, in page order
pub fn page_contents(path: &Path) -> Vec<Vec<u8>> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| doc.get_page_content(id).unwrap())
        .collect()
}
