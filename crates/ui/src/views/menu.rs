use std::fmt::Write as _;

use crate::vm::{MENU_SUBTITLE, MENU_TITLE, SetupVm, menu_entries};

#[must_use]
pub fn render_menu() -> String {
    let mut out = format!("{MENU_TITLE}\n{MENU_SUBTITLE}\n\n");
    for entry in menu_entries() {
        writeln!(out, "  [{}] {}", entry.key, entry.label).ok();
    }
    out
}

#[must_use]
pub fn render_setup(setup: &SetupVm) -> String {
    format!(
        "{}\n  [+] add 5 seconds   [-] remove 5 seconds   [s] start   [m] menu\n  or type a number of seconds\n",
        setup.label()
    )
}
