//! The waving flag demo: press A to switch flags.
//!
//! ```text
//! step()
//!   ├─► A pressed since last step? ─► show the next catalog image
//!   ├─► move the wave one frame
//!   ├─► latch the keypad
//!   └─► render the LCD
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::flag::{AssetError, FlagsBg, ImageCatalog, Snapshot, SnapshotError};
use crate::hardware::keypad::Keypad;
use crate::hardware::lcd::Lcd;

pub struct FlagDemo {
    catalog: ImageCatalog,
    flags: FlagsBg,
    pub keypad: Keypad,
    lcd: Lcd,
}

impl FlagDemo {
    /// Starts on the image called `initial`, or the first of `catalog`.
    ///
    /// # Errors
    /// If `initial` is not in `catalog`.
    pub fn new(catalog: ImageCatalog, initial: Option<&str>) -> Result<Self, AssetError> {
        let image = match initial {
            Some(name) => Arc::clone(catalog.get(name)?),
            None => Arc::clone(catalog.first()),
        };

        let flags = FlagsBg::create(image);
        let mut lcd = Lcd::default();
        lcd.render(flags.background());

        Ok(Self {
            catalog,
            flags,
            keypad: Keypad::new(),
            lcd,
        })
    }

    /// Runs one refresh worth of the demo.
    pub fn step(&mut self) {
        if self.keypad.a_pressed() {
            debug!("A pressed");
            self.show_next();
        }

        self.flags.update();
        self.keypad.latch();
        self.lcd.render(self.flags.background());
    }

    /// Switches to the catalog image after the shown one.
    pub fn show_next(&mut self) {
        let next = Arc::clone(self.catalog.next_after(self.flags.current_image()));
        self.flags.set_image(next);
        self.lcd.render(self.flags.background());
    }

    /// Saves the animation position.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.flags.snapshot()
    }

    /// # Errors
    /// If the snapshot image is not in the catalog.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        self.flags.restore(snapshot, &self.catalog)?;
        self.lcd.render(self.flags.background());
        Ok(())
    }

    #[must_use]
    pub const fn flags(&self) -> &FlagsBg {
        &self.flags
    }

    #[must_use]
    pub const fn lcd(&self) -> &Lcd {
        &self.lcd
    }

    #[must_use]
    pub const fn catalog(&self) -> &ImageCatalog {
        &self.catalog
    }
}
