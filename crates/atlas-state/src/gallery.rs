//! Image gallery overlay state: a bounded cursor over a fixed list.

use atlas_core::model::{ProjectId, ProjectImage};

/// Gallery overlay state. While open and non-empty,
/// `0 <= current_index < images.len()` holds after every operation.
#[derive(Debug, Default)]
pub struct GalleryState {
    open: bool,
    project_id: Option<ProjectId>,
    images: Vec<ProjectImage>,
    current_index: usize,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the overlay on a project's image list. An out-of-range
    /// initial index is clamped into the list.
    pub fn open_gallery(&mut self, project_id: ProjectId, images: Vec<ProjectImage>, initial: usize) {
        self.current_index = if images.is_empty() {
            0
        } else {
            initial.min(images.len() - 1)
        };
        self.open = true;
        self.project_id = Some(project_id);
        self.images = images;
    }

    /// Close and reset every field to its default.
    pub fn close_gallery(&mut self) {
        *self = Self::default();
    }

    /// Step forward; a no-op at the last image (saturating, not wrapping).
    pub fn next_image(&mut self) {
        if !self.images.is_empty() && self.current_index < self.images.len() - 1 {
            self.current_index += 1;
        }
    }

    /// Step back; a no-op at index 0.
    pub fn previous_image(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// Jump to an exact index. Out-of-range input is rejected (no-op),
    /// not clamped.
    pub fn set_current_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.current_index = index;
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    pub fn images(&self) -> &[ProjectImage] {
        &self.images
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_image(&self) -> Option<&ProjectImage> {
        self.images.get(self.current_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn images(n: usize) -> Vec<ProjectImage> {
        (0..n)
            .map(|i| ProjectImage {
                id: i as i64,
                url: format!("/gallery/{i}.png"),
                filename: format!("{i}.png"),
                alt_text: None,
                display_order: i as i32,
            })
            .collect()
    }

    #[test]
    fn navigation_saturates_at_both_ends() {
        let mut gallery = GalleryState::new();
        gallery.open_gallery(ProjectId(1), images(3), 0);

        gallery.previous_image();
        assert_eq!(gallery.current_index(), 0);

        gallery.next_image();
        gallery.next_image();
        assert_eq!(gallery.current_index(), 2);
        gallery.next_image();
        assert_eq!(gallery.current_index(), 2);
    }

    #[test]
    fn set_current_rejects_out_of_range() {
        let mut gallery = GalleryState::new();
        gallery.open_gallery(ProjectId(1), images(3), 0);

        gallery.set_current_image(3);
        assert_eq!(gallery.current_index(), 0);
        gallery.set_current_image(2);
        assert_eq!(gallery.current_index(), 2);
    }

    #[test]
    fn open_clamps_initial_index() {
        let mut gallery = GalleryState::new();
        gallery.open_gallery(ProjectId(1), images(2), 9);
        assert_eq!(gallery.current_index(), 1);

        gallery.open_gallery(ProjectId(1), Vec::new(), 5);
        assert_eq!(gallery.current_index(), 0);
        assert_eq!(gallery.current_image(), None);
    }

    #[test]
    fn close_resets_everything() {
        let mut gallery = GalleryState::new();
        gallery.open_gallery(ProjectId(2), images(4), 2);
        gallery.close_gallery();

        assert!(!gallery.is_open());
        assert_eq!(gallery.project_id(), None);
        assert!(gallery.images().is_empty());
        assert_eq!(gallery.current_index(), 0);
    }

    #[test]
    fn empty_gallery_navigation_is_inert() {
        let mut gallery = GalleryState::new();
        gallery.open_gallery(ProjectId(1), Vec::new(), 0);
        gallery.next_image();
        gallery.previous_image();
        gallery.set_current_image(0);
        assert_eq!(gallery.current_index(), 0);
    }
}
