//! Bookkeeping for thumbnail object URLs.
//!
//! Every staged file is previewed through a `blob:` URL that holds a
//! reference to its bytes until revoked. The browser side keeps one URL
//! per [`FileId`] and reconciles against the staged list after each
//! change using a [`PreviewPlan`].

use std::collections::HashSet;

use crate::types::{FileId, StagedFile};

/// Which preview URLs to create and which to release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewPlan {
    /// Staged files without a preview yet, in staged order.
    pub create: Vec<FileId>,
    /// Previews whose file is no longer staged.
    pub release: Vec<FileId>,
}

impl PreviewPlan {
    /// Compare the ids that currently have a preview with the staged list.
    #[must_use]
    pub fn reconcile(existing: impl IntoIterator<Item = FileId>, staged: &[StagedFile]) -> Self {
        let staged_ids: HashSet<FileId> = staged.iter().map(StagedFile::id).collect();
        let existing: HashSet<FileId> = existing.into_iter().collect();

        let create = staged
            .iter()
            .map(StagedFile::id)
            .filter(|id| !existing.contains(id))
            .collect();
        let mut release: Vec<FileId> = existing
            .into_iter()
            .filter(|id| !staged_ids.contains(id))
            .collect();
        release.sort_unstable();

        Self { create, release }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.release.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staging::StagingArea;
    use crate::types::Candidate;

    fn area(n: usize) -> StagingArea {
        let mut area = StagingArea::new();
        area.stage_files(
            (0..n).map(|i| Candidate::new(format!("{i}.png"), "image/png", vec![0u8])),
        );
        area
    }

    #[test]
    fn fresh_files_get_previews() {
        let area = area(3);
        let plan = PreviewPlan::reconcile([], area.files());
        assert_eq!(plan.create, area.ids());
        assert!(plan.release.is_empty());
    }

    #[test]
    fn unstaged_files_release_their_preview() {
        let mut area = area(3);
        let ids = area.ids();
        area.unstage_file(1);
        let plan = PreviewPlan::reconcile(ids.clone(), area.files());
        assert!(plan.create.is_empty());
        assert_eq!(plan.release, [ids[1]]);
    }

    #[test]
    fn clearing_releases_everything() {
        let mut area = area(2);
        let ids = area.ids();
        area.clear();
        let plan = PreviewPlan::reconcile(ids.clone(), area.files());
        assert_eq!(plan.release, ids);
    }

    #[test]
    fn in_sync_is_empty() {
        let area = area(2);
        assert!(PreviewPlan::reconcile(area.ids(), area.files()).is_empty());
    }
}
