use std::fmt::Write as _;

use crate::vm::ResultsVm;

#[must_use]
pub fn render_results(vm: &ResultsVm) -> String {
    let mut out = format!("{}\n", vm.title);
    for line in &vm.lines {
        writeln!(out, "  {line}").ok();
    }
    if let Some(status) = vm.save_status {
        writeln!(out, "{status}").ok();
    }
    out
}
