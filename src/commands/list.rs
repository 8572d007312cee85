//! `docrun --list`.

use crate::registry::Registry;
use crate::sessions::DEFAULT_SESSIONS;

/// Renders every task, marking with `*` the ones a run would select and
/// with `-` the rest.
#[must_use]
pub fn render(registry: &Registry, selected: &[String]) -> String {
    let chosen: Vec<usize> = if selected.is_empty() {
        DEFAULT_SESSIONS.iter().filter_map(|name| registry.matching(name)).flatten().collect()
    } else {
        selected.iter().filter_map(|name| registry.matching(name)).flatten().collect()
    };

    let mut out = String::from("Sessions defined in docrun:\n\n");
    for (id, task) in registry.tasks().iter().enumerate() {
        let marker = if chosen.contains(&id) { '*' } else { '-' };
        let line = match registry.def_of(id).description {
            Some(description) => format!("{marker} {} -> {description}\n", task.signature()),
            None => format!("{marker} {}\n", task.signature()),
        };
        out.push_str(&line);
    }
    out.push_str("\nsessions marked with * are selected, sessions marked with - are skipped.\n");
    out
}
