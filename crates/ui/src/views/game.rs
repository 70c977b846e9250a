use std::fmt::Write as _;

use crate::vm::{DayButtonState, GameVm};

fn marker(state: DayButtonState) -> &'static str {
    match state {
        DayButtonState::Open | DayButtonState::Other => " ",
        DayButtonState::Correct => "*",
        DayButtonState::Wrong => "x",
    }
}

#[must_use]
pub fn render_game(vm: &GameVm) -> String {
    let mut out = String::new();
    if let Some(countdown) = &vm.countdown {
        write!(out, "[{countdown}] ").ok();
    }
    if let Some(tally) = &vm.tally {
        write!(out, "{tally}").ok();
    }
    if !out.is_empty() {
        out.push('\n');
    }

    writeln!(out, "\n  {}\n", vm.date_label).ok();
    writeln!(out, "{}", vm.message).ok();
    if let Some(time) = &vm.round_time {
        writeln!(out, "{time}").ok();
    }

    for (index, button) in vm.buttons.iter().enumerate() {
        write!(out, " {}{index} {}", marker(button.state), button.label).ok();
    }
    out.push('\n');

    if let Some(next) = vm.next_label {
        writeln!(out, "[n] {next}   [m] Menu").ok();
    } else {
        writeln!(out, "Type a day (name or 0-6).   [m] Menu").ok();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::{DayButtonVm, NEXT_DATE};
    use chrono::Weekday;

    #[test]
    fn answered_round_marks_buttons_and_offers_next() {
        let vm = GameVm {
            date_label: "January 1, 2000".into(),
            message: "Not quite. The correct day was Saturday.".into(),
            round_time: Some("Round time: 2.00 seconds.".into()),
            buttons: vec![
                DayButtonVm { weekday: Weekday::Fri, label: "Friday", state: DayButtonState::Wrong },
                DayButtonVm { weekday: Weekday::Sat, label: "Saturday", state: DayButtonState::Correct },
            ],
            next_label: Some(NEXT_DATE),
            countdown: None,
            tally: None,
        };
        let text = render_game(&vm);
        assert!(text.contains("January 1, 2000"));
        assert!(text.contains("x0 Friday"));
        assert!(text.contains("*1 Saturday"));
        assert!(text.contains("[n] Next Date"));
    }
}
