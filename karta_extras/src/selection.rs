/// Identifies an overlay item within a [`SelectionState`].
pub type ItemId = usize;

/// Which items are hovered, selected and grabbed. Shared by items which should not be grabbed at
/// the same time, like vertices of one polyline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    hovered: Option<ItemId>,
    selected: Option<ItemId>,
    grabbed: Option<ItemId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<ItemId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn grabbed(&self) -> Option<ItemId> {
        self.grabbed
    }

    pub fn is_hovered(&self, id: ItemId) -> bool {
        self.hovered == Some(id)
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected == Some(id)
    }

    pub fn is_grabbed(&self, id: ItemId) -> bool {
        self.grabbed == Some(id)
    }

    pub fn hover(&mut self, id: ItemId) {
        self.hovered = Some(id);
    }

    /// Clear the hover, unless some other item took it over in the meantime.
    pub fn unhover(&mut self, id: ItemId) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }

    /// Select `id`, or deselect it if it was selected already.
    pub fn toggle_selection(&mut self, id: ItemId) {
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Only one item can be grabbed at a time. Returns whether `id` holds the grab now.
    pub fn grab(&mut self, id: ItemId) -> bool {
        match self.grabbed {
            Some(grabbed) => grabbed == id,
            None => {
                self.grabbed = Some(id);
                true
            }
        }
    }

    pub fn release(&mut self, id: ItemId) {
        if self.grabbed == Some(id) {
            self.grabbed = None;
        }
    }
}
