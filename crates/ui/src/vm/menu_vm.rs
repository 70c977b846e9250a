use dayguess_core::model::Mode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Start(Mode),
    Setup,
    Tutorial,
    Leaderboard,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuEntryVm {
    pub key: &'static str,
    pub label: &'static str,
    pub action: MenuAction,
}

pub const MENU_TITLE: &str = "Day Guesser Challenge";
pub const MENU_SUBTITLE: &str = "Select a game mode or learn the secret method.";

#[must_use]
pub fn menu_entries() -> [MenuEntryVm; 7] {
    [
        MenuEntryVm { key: "1", label: "Practice Mode", action: MenuAction::Start(Mode::Practice) },
        MenuEntryVm { key: "2", label: "5-Date Challenge", action: MenuAction::Start(Mode::Challenge { rounds: 5 }) },
        MenuEntryVm { key: "3", label: "10-Date Challenge", action: MenuAction::Start(Mode::Challenge { rounds: 10 }) },
        MenuEntryVm { key: "4", label: "Time Attack", action: MenuAction::Setup },
        MenuEntryVm { key: "h", label: "How to Play", action: MenuAction::Tutorial },
        MenuEntryVm { key: "l", label: "Hall of Fame", action: MenuAction::Leaderboard },
        MenuEntryVm { key: "q", label: "Quit", action: MenuAction::Quit },
    ]
}

/// Match typed input against the menu keys.
#[must_use]
pub fn parse_menu_choice(input: &str) -> Option<MenuAction> {
    let input = input.trim();
    menu_entries()
        .into_iter()
        .find(|entry| entry.key.eq_ignore_ascii_case(input))
        .map(|entry| entry.action)
}
