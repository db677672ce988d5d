//! The animated flag background.

use std::sync::Arc;

use tracing::{info, trace};

use crate::hardware::background::RegularBg;

use super::asset::{ImageAsset, ImageCatalog};
use super::frame_buffers::{FrameBuffers, Slot};
use super::snapshot::{Snapshot, SnapshotError};
use super::waveform::Waveform;

/// A background showing a flag image rippling like a waving flag.
///
/// Call [`FlagsBg::update`] once per refresh to move the wave one step.
pub struct FlagsBg {
    wave: Waveform,
    buffers: FrameBuffers,
    image: Arc<ImageAsset>,
    frame: u32,
}

impl FlagsBg {
    /// Allocates the background and shows `image` at frame 0.
    ///
    /// # Panics
    /// If `image` is not 192x128 pixels.
    #[must_use]
    pub fn create(image: Arc<ImageAsset>) -> Self {
        let wave = Waveform::default();
        let mut buffers = FrameBuffers::allocate();
        buffers.load(&wave, &image, 0, Slot::Front);
        buffers.present(Slot::Front);

        info!(image = image.name(), "flag created");

        Self {
            wave,
            buffers,
            image,
            frame: 0,
        }
    }

    #[must_use]
    pub const fn current_image(&self) -> &Arc<ImageAsset> {
        &self.image
    }

    /// Shows `image` from the next refresh on, at the current wave position.
    ///
    /// The image is written into the hidden buffer, the shown one is not
    /// touched until the flip.
    ///
    /// # Panics
    /// If `image` is not 192x128 pixels.
    pub fn set_image(&mut self, image: Arc<ImageAsset>) {
        let slot = self.buffers.active().other();
        self.buffers.load(&self.wave, &image, self.frame, slot);
        self.buffers.present(slot);

        info!(
            from = self.image.name(),
            to = image.name(),
            frame = self.frame,
            "flag image changed"
        );
        self.image = image;
    }

    /// Moves the wave one frame forward.
    pub fn update(&mut self) {
        let destination = self.buffers.active().other();
        self.buffers.advance(&self.wave, self.frame);
        self.buffers.present(destination);
        self.frame = self.frame.wrapping_add(1);

        trace!(frame = self.frame, slot = ?destination, "flag updated");
    }

    #[must_use]
    pub const fn current_frame(&self) -> u32 {
        self.frame
    }

    #[must_use]
    pub const fn active_slot(&self) -> Slot {
        self.buffers.active()
    }

    #[must_use]
    pub const fn background(&self) -> &RegularBg {
        self.buffers.background()
    }

    #[must_use]
    pub const fn buffers(&self) -> &FrameBuffers {
        &self.buffers
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.frame, self.image.name())
    }

    /// Jumps to the position saved in `snapshot`, picking its image from
    /// `catalog`.
    ///
    /// # Errors
    /// If the snapshot image is not in `catalog`. Nothing changes then.
    pub fn restore(
        &mut self,
        snapshot: &Snapshot,
        catalog: &ImageCatalog,
    ) -> Result<(), SnapshotError> {
        let image = catalog
            .get(&snapshot.image)
            .map_err(|_| SnapshotError::UnknownImage(snapshot.image.clone()))?;

        self.frame = snapshot.frame;
        self.set_image(Arc::clone(image));

        info!(image = %snapshot.image, frame = snapshot.frame, "flag restored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::flag::artwork;

    fn catalog() -> ImageCatalog {
        artwork::default_catalog().unwrap()
    }

    #[test]
    fn create_shows_frame_zero() {
        let catalog = catalog();
        let flags = FlagsBg::create(Arc::clone(catalog.first()));

        assert_eq!(flags.current_frame(), 0);
        assert_eq!(flags.active_slot(), Slot::Front);
        assert_eq!(flags.background().shown_screen_block(), 0);
        assert!(ImageAsset::same(flags.current_image(), catalog.first()));
        assert_eq!(
            &flags.background().palette().colors()[..catalog.first().palette().len()],
            catalog.first().palette()
        );
    }

    #[test]
    fn update_alternates_slots() {
        let catalog = catalog();
        let mut flags = FlagsBg::create(Arc::clone(catalog.first()));

        for frame in 1..=10 {
            flags.update();
            assert_eq!(flags.current_frame(), frame);
            assert_eq!(flags.active_slot(), Slot::for_frame(frame));
        }
    }

    #[test]
    fn update_never_writes_the_shown_slot() {
        let catalog = catalog();
        let mut flags = FlagsBg::create(Arc::clone(catalog.first()));

        for _ in 0..20 {
            let shown = flags.active_slot();
            let before = flags.buffers().slot(shown).to_vec();
            flags.update();
            assert_eq!(flags.buffers().slot(shown), before.as_slice());
        }
    }

    #[test]
    fn set_image_keeps_the_frame_cadence() {
        let catalog = catalog();
        let first = Arc::clone(catalog.first());
        let second = Arc::clone(catalog.next_after(&first));

        let mut flags = FlagsBg::create(first);
        for _ in 0..7 {
            flags.update();
        }

        let shown = flags.active_slot();
        let before = flags.buffers().slot(shown).to_vec();
        flags.set_image(Arc::clone(&second));

        // Loaded into the hidden slot, then flipped to it.
        assert_eq!(flags.current_frame(), 7);
        assert_eq!(flags.active_slot(), shown.other());
        assert_eq!(flags.buffers().slot(shown), before.as_slice());
        assert!(ImageAsset::same(flags.current_image(), &second));

        // The new image carries on from the same wave position.
        let mut fresh = FrameBuffers::allocate();
        fresh.load(&Waveform::default(), &second, 7, Slot::Front);
        assert_eq!(
            flags.buffers().slot(flags.active_slot()),
            fresh.slot(Slot::Front)
        );

        flags.update();
        assert_eq!(flags.current_frame(), 8);
        fresh.load(&Waveform::default(), &second, 8, Slot::Front);
        assert_eq!(
            flags.buffers().slot(flags.active_slot()),
            fresh.slot(Slot::Front)
        );
    }

    #[test]
    fn set_same_image_reloads_it() {
        let catalog = catalog();
        let mut flags = FlagsBg::create(Arc::clone(catalog.first()));
        for _ in 0..3 {
            flags.update();
        }

        let shown = flags.buffers().slot(flags.active_slot()).to_vec();
        flags.set_image(Arc::clone(catalog.first()));
        assert_eq!(flags.buffers().slot(flags.active_slot()), shown.as_slice());
        assert_eq!(flags.current_frame(), 3);
    }

    #[test]
    fn frame_counter_wraps() {
        let catalog = catalog();
        let mut flags = FlagsBg::create(Arc::clone(catalog.first()));
        flags
            .restore(&Snapshot::new(u32::MAX, catalog.first().name()), &catalog)
            .unwrap();
        flags.update();
        assert_eq!(flags.current_frame(), 0);
    }

    #[test]
    fn restore_unknown_image_changes_nothing() {
        let catalog = catalog();
        let mut flags = FlagsBg::create(Arc::clone(catalog.first()));
        flags.update();

        let result = flags.restore(&Snapshot::new(99, "fr"), &catalog);
        assert!(matches!(result, Err(SnapshotError::UnknownImage(name)) if name == "fr"));
        assert_eq!(flags.current_frame(), 1);
    }
}
