use crate::error::{Result, SplitError};
use crate::pdf::PdfDocument;
use log::debug;
use lopdf::{dictionary, Document, Object, ObjectId};
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Page attributes a page may take from its ancestors in the page tree
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// A new PDF assembled from pages of a source document.
///
/// The builder starts with the source's object store but no pages; pages are
/// appended by reference and the page tree is built when the document is
/// saved. Objects no appended page reaches are pruned at that point.
pub struct OutputDocument {
    doc: Document,
    kids: Vec<ObjectId>,
}

impl OutputDocument {
    pub fn new(source: &PdfDocument) -> Self {
        OutputDocument {
            doc: source.doc.clone(),
            kids: Vec::new(),
        }
    }

    /// Append a page of the source document after the pages already added.
    ///
    /// Inherited attributes are copied onto the page itself, since the page
    /// is re-parented under a new tree on save.
    pub fn append_page(&mut self, page_id: ObjectId) -> lopdf::Result<()> {
        let inherited = self.inherited_attributes(page_id)?;
        let page = self.doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
        self.kids.push(page_id);
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    fn inherited_attributes(&self, page_id: ObjectId) -> lopdf::Result<Vec<(Vec<u8>, Object)>> {
        let page = self.doc.get_dictionary(page_id)?;
        let mut missing: Vec<&[u8]> = INHERITABLE
            .iter()
            .copied()
            .filter(|key| !page.has(key))
            .collect();

        let mut found = Vec::new();
        let mut seen = BTreeSet::new();
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

        while let Some(node_id) = parent {
            if missing.is_empty() || !seen.insert(node_id) {
                break;
            }
            let Ok(node) = self.doc.get_dictionary(node_id) else {
                break;
            };
            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    found.push((key.to_vec(), value.clone()));
                    false
                }
                Err(_) => true,
            });
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        }

        Ok(found)
    }

    /// Drop link targets on appended pages that point at pages left behind.
    ///
    /// Such a link would keep the dropped page, its old parent and through it
    /// the whole source page tree reachable from the output.
    fn unlink_dropped_pages(&mut self) {
        let kept: BTreeSet<ObjectId> = self.kids.iter().copied().collect();
        let dropped: BTreeSet<ObjectId> = self
            .doc
            .get_pages()
            .into_values()
            .filter(|id| !kept.contains(id))
            .collect();
        if dropped.is_empty() {
            return;
        }

        let mut unlinks: Vec<(ObjectId, Vec<&'static [u8]>)> = Vec::new();
        for &page_id in &self.kids {
            for annot_id in annotation_ids(&self.doc, page_id) {
                let Ok(annot) = self.doc.get_dictionary(annot_id) else {
                    continue;
                };
                let mut keys: Vec<&'static [u8]> = Vec::new();
                if let Ok(dest) = annot.get(b"Dest") {
                    if targets_any(&self.doc, dest, &dropped) {
                        keys.push(b"Dest");
                    }
                }
                if let Ok(action) = annot.get(b"A") {
                    let goto = resolve(&self.doc, action)
                        .as_dict()
                        .and_then(|a| a.get(b"D"))
                        .map(|d| targets_any(&self.doc, d, &dropped))
                        .unwrap_or(false);
                    if goto {
                        keys.push(b"A");
                    }
                }
                if !keys.is_empty() {
                    unlinks.push((annot_id, keys));
                }
            }
        }

        for (annot_id, keys) in unlinks {
            if let Ok(annot) = self.doc.get_dictionary_mut(annot_id) {
                for key in keys {
                    annot.remove(key);
                }
            }
            debug!("removed link to a dropped page from annotation {:?}", annot_id);
        }
    }

    /// Replace the source page tree with one holding only the appended pages.
    fn build_page_tree(&mut self) {
        self.unlink_dropped_pages();
        let pages_id = self.doc.new_object_id();

        for &page_id in &self.kids {
            if let Ok(page) = self.doc.get_dictionary_mut(page_id) {
                page.set("Parent", pages_id);
            }
        }

        let kids: Vec<Object> = self.kids.iter().map(|&id| id.into()).collect();
        self.doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.kids.len() as i64,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let pruned = self.doc.prune_objects();
        debug!(
            "built page tree with {} pages, pruned {} objects",
            self.kids.len(),
            pruned.len()
        );
    }

    /// Serialize and write to `path`.
    ///
    /// The bytes go to a temporary file next to `path` that is then renamed
    /// over it, so an existing file at `path` is either fully replaced or left
    /// as it was.
    pub fn save<P: AsRef<Path>>(mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let write_error = |source: io::Error| SplitError::Write {
            path: path.to_path_buf(),
            source,
        };

        self.build_page_tree();

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| write_error(io::Error::other(e.to_string())))?;

        write_replacing(path, &bytes).map_err(write_error)?;
        debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

/// Indirect annotation ids listed in a page's `Annots`
fn annotation_ids(doc: &Document, page_id: ObjectId) -> Vec<ObjectId> {
    let Ok(page) = doc.get_dictionary(page_id) else {
        return Vec::new();
    };
    let Ok(annots) = page.get(b"Annots") else {
        return Vec::new();
    };
    match resolve(doc, annots) {
        Object::Array(items) => items
            .iter()
            .filter_map(|item| item.as_reference().ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Whether an explicit destination `[page /Fit ...]` names one of `pages`
fn targets_any(doc: &Document, dest: &Object, pages: &BTreeSet<ObjectId>) -> bool {
    match resolve(doc, dest) {
        Object::Array(items) => items
            .first()
            .and_then(|target| target.as_reference().ok())
            .map(|id| pages.contains(&id))
            .unwrap_or(false),
        _ => false,
    }
}

fn write_replacing(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = fs::metadata(path)
        .ok()
        .filter(|meta| meta.is_file())
        .map(|meta| meta.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".pdfsplit-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Passed to open(2), so the umask still applies
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut tmp = builder.tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    // An overwritten file keeps its mode
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
