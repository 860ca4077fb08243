//! The staged-file list.
//!
//! Staging is separated from submission so guests can curate their
//! selection before committing to an upload.

use tracing::debug;

use crate::types::{Candidate, FileId, StagedFile};

/// Ordered list of staged image files.
///
/// # Policies
///
/// - **Image-only intake.** [`stage_files`](Self::stage_files) silently
///   drops candidates whose MIME type is not `image/*`. This is not an
///   error; nothing is reported for dropped files.
/// - **No deduplication.** The same filename may be staged any number
///   of times; each entry gets its own [`FileId`].
/// - **Lenient removal.** [`unstage_file`](Self::unstage_file) with an
///   out-of-range index is a no-op.
#[derive(Debug, Default)]
pub struct StagingArea {
    files: Vec<StagedFile>,
    next_id: u64,
}

impl StagingArea {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the image candidates, in arrival order.
    ///
    /// Returns the number of files actually staged.
    pub fn stage_files(&mut self, candidates: impl IntoIterator<Item = Candidate>) -> usize {
        let before = self.files.len();
        let mut dropped = 0usize;
        for candidate in candidates {
            if !candidate.is_image() {
                dropped += 1;
                continue;
            }
            let id = FileId::new(self.next_id);
            self.next_id += 1;
            self.files.push(StagedFile::from_candidate(id, candidate));
        }
        let staged = self.files.len() - before;
        debug!(staged, dropped, total = self.files.len(), "staged files");
        staged
    }

    /// Remove the file at `index`, returning it.
    ///
    /// Returns `None` and leaves the list untouched when `index` is out
    /// of range.
    pub fn unstage_file(&mut self, index: usize) -> Option<StagedFile> {
        if index >= self.files.len() {
            return None;
        }
        Some(self.files.remove(index))
    }

    /// Remove the file with `id`, returning it.
    ///
    /// Returns `None` when no staged file has that id, for example when
    /// it was already removed.
    pub fn unstage_id(&mut self, id: FileId) -> Option<StagedFile> {
        let index = self.files.iter().position(|f| f.id() == id)?;
        Some(self.files.remove(index))
    }

    /// Remove every file whose id is in `ids`, preserving the order of
    /// the rest. Returns how many were removed.
    pub fn remove_ids(&mut self, ids: &[FileId]) -> usize {
        let before = self.files.len();
        self.files.retain(|f| !ids.contains(&f.id()));
        before - self.files.len()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    #[must_use]
    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Ids of all staged files, in order.
    #[must_use]
    pub fn ids(&self) -> Vec<FileId> {
        self.files.iter().map(StagedFile::id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> Candidate {
        Candidate::new(name, "image/jpeg", vec![0xFF, 0xD8])
    }

    fn text(name: &str) -> Candidate {
        Candidate::new(name, "text/plain", b"hello".to_vec())
    }

    fn names(area: &StagingArea) -> Vec<&str> {
        area.files().iter().map(StagedFile::name).collect()
    }

    #[test]
    fn stage_appends_only_images_in_order() {
        let mut area = StagingArea::new();
        area.stage_files([image("a.jpg")]);
        let staged = area.stage_files([image("b.jpg"), text("notes.txt"), image("c.jpg")]);
        assert_eq!(staged, 2);
        assert_eq!(area.len(), 3);
        assert_eq!(names(&area), ["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn stage_length_grows_by_image_count() {
        let batches: [Vec<Candidate>; 3] = [
            vec![],
            vec![text("a"), text("b")],
            vec![image("x"), text("y"), image("z"), image("w")],
        ];
        let mut area = StagingArea::new();
        for batch in batches {
            let before = area.len();
            let images = batch.iter().filter(|c| c.is_image()).count();
            area.stage_files(batch);
            assert_eq!(area.len(), before + images);
        }
    }

    #[test]
    fn duplicate_names_are_kept_with_distinct_ids() {
        let mut area = StagingArea::new();
        area.stage_files([image("IMG_0001.jpg"), image("IMG_0001.jpg")]);
        assert_eq!(area.len(), 2);
        let ids = area.ids();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn unstage_valid_index_preserves_order() {
        let mut area = StagingArea::new();
        area.stage_files([image("a"), image("b"), image("c"), image("d")]);
        let removed = area.unstage_file(1);
        assert_eq!(removed.map(|f| f.name().to_owned()).as_deref(), Some("b"));
        assert_eq!(names(&area), ["a", "c", "d"]);
    }

    #[test]
    fn unstage_out_of_range_is_noop() {
        let mut area = StagingArea::new();
        area.stage_files([image("a"), image("b")]);
        assert!(area.unstage_file(2).is_none());
        assert!(area.unstage_file(usize::MAX).is_none());
        assert_eq!(names(&area), ["a", "b"]);

        let mut empty = StagingArea::new();
        assert!(empty.unstage_file(0).is_none());
        assert!(empty.is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut area = StagingArea::new();
        area.stage_files([image("a")]);
        let first = area.ids()[0];
        area.clear();
        area.stage_files([image("a")]);
        assert_ne!(area.ids()[0], first);
    }

    #[test]
    fn remove_ids_keeps_the_rest_in_order() {
        let mut area = StagingArea::new();
        area.stage_files([image("a"), image("b"), image("c")]);
        let ids = area.ids();
        let removed = area.remove_ids(&[ids[0], ids[2]]);
        assert_eq!(removed, 2);
        assert_eq!(names(&area), ["b"]);
    }

    #[test]
    fn unstage_id_removes_that_file_once() {
        let mut area = StagingArea::new();
        area.stage_files([image("a"), image("b"), image("c")]);
        let b = area.ids()[1];

        assert_eq!(area.unstage_id(b).map(|f| f.name().to_owned()).as_deref(), Some("b"));
        // A repeated removal of the same id leaves the rest alone.
        assert!(area.unstage_id(b).is_none());
        assert_eq!(names(&area), ["a", "c"]);
    }
}
