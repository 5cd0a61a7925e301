/// Entries of the start menu, top to bottom.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum MenuItem {
    Create,
    Load,
    Exit,
}

impl MenuItem {
    pub(crate) const ALL: [MenuItem; 3] = [MenuItem::Create, MenuItem::Load, MenuItem::Exit];

    pub(crate) fn label(self) -> &'static str {
        match self {
            MenuItem::Create => "Create Library",
            MenuItem::Load => "Load Library",
            MenuItem::Exit => "Exit",
        }
    }
}

/// The start menu.
#[derive(Default)]
pub(crate) struct HomeScreen {
    pub(crate) selected: usize,
}

impl HomeScreen {
    pub(crate) fn current(&self) -> MenuItem {
        MenuItem::ALL[self.selected.min(MenuItem::ALL.len() - 1)]
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step(self.selected, offset, MenuItem::ALL.len());
    }
}

/// Cursor over the rows of the open library. The library itself lives on the
/// app; this only remembers which row is highlighted and has to be clamped
/// again after every add or remove.
#[derive(Default)]
pub(crate) struct LibraryScreen {
    pub(crate) selected: usize,
}

impl LibraryScreen {
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        self.selected = step(self.selected, offset, len);
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub(crate) fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// List of saved library files offered by the load dialog.
pub(crate) struct FilePicker {
    pub(crate) files: Vec<String>,
    pub(crate) selected: usize,
}

impl FilePicker {
    pub(crate) fn new(files: Vec<String>) -> Self {
        Self { files, selected: 0 }
    }

    pub(crate) fn current(&self) -> Option<&str> {
        self.files.get(self.selected).map(String::as_str)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step(self.selected, offset, self.files.len());
    }

    /// Jump to the 1-based entry shown next to each file name.
    pub(crate) fn select_number(&mut self, number: usize) -> bool {
        if number >= 1 && number <= self.files.len() {
            self.selected = number - 1;
            true
        } else {
            false
        }
    }
}

/// Move `current` by `offset`, saturating at both ends of `0..len`.
fn step(current: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let moved = current as isize + offset;
    moved.clamp(0, len as isize - 1) as usize
}
