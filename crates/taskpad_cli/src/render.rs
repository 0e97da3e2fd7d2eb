//! Plain-text rendering of tasks and view output.

use chrono::Local;
use taskpad_core::{category_label, Task, TaskCounts, TaskView, WELL_KNOWN_CATEGORIES};

const EMPTY_SEARCH_MESSAGE: &str = "No matching tasks";
const EMPTY_LIST_MESSAGE: &str = "No tasks yet, add one";

/// One line: checkbox, id, title, category label, local creation time.
pub fn task_line(task: &Task) -> String {
    format!(
        "[{}] {}  {}  ({})  {}",
        if task.is_completed() { "x" } else { " " },
        task.id(),
        task.title(),
        category_label(task.category()),
        task.created_at().with_timezone(&Local).format("%Y-%m-%d %H:%M")
    )
}

pub fn counts(counts: &TaskCounts) -> String {
    format!(
        "total: {}  completed: {}  active: {}",
        counts.total, counts.completed, counts.active
    )
}

/// Full list output followed by the counts line.
pub fn view(view: &TaskView) -> String {
    let mut lines = Vec::with_capacity(view.tasks.len() * 2 + 2);
    if view.is_empty() {
        let message = if view.searched {
            EMPTY_SEARCH_MESSAGE
        } else {
            EMPTY_LIST_MESSAGE
        };
        lines.push(message.to_string());
    }
    for task in &view.tasks {
        lines.push(task_line(task));
        if !task.description().is_empty() {
            lines.push(format!("      {}", task.description()));
        }
    }
    lines.push(counts(&view.counts));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Hint shown when a task is filed under a tag without a known label.
pub fn custom_category_hint(tag: &str) -> Option<String> {
    if WELL_KNOWN_CATEGORIES.contains(&tag) {
        return None;
    }
    Some(format!(
        "note: `{tag}` is a custom category (known: {})",
        WELL_KNOWN_CATEGORIES.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::{custom_category_hint, view, EMPTY_LIST_MESSAGE, EMPTY_SEARCH_MESSAGE};
    use taskpad_core::{compute_view, MemorySlot, Task, TaskStore, ViewQuery};

    fn sample() -> Vec<Task> {
        let mut store = TaskStore::load(MemorySlot::new());
        store.create("Buy milk", "oat milk", "errands").unwrap();
        store.create("Write report", "", "work").unwrap();
        let report_id = store.snapshot()[0].id().to_string();
        store.toggle_completion(&report_id).unwrap();
        store.snapshot().to_vec()
    }

    #[test]
    fn renders_labels_descriptions_and_counts() {
        let out = view(&compute_view(&sample(), &ViewQuery::default()));
        assert!(out.contains("  Write report  (Work)"));
        assert!(out.contains("  Buy milk  (errands)"));
        assert!(out.starts_with("[x] "));
        assert!(out.contains("      oat milk"));
        assert!(out.ends_with("total: 2  completed: 1  active: 1\n"));
    }

    #[test]
    fn empty_state_wording_depends_on_search() {
        let searched = ViewQuery {
            search: "nothing".to_string(),
            ..ViewQuery::default()
        };
        assert!(view(&compute_view(&sample(), &searched)).starts_with(EMPTY_SEARCH_MESSAGE));
        assert!(view(&compute_view(&[], &ViewQuery::default())).starts_with(EMPTY_LIST_MESSAGE));
    }

    #[test]
    fn custom_category_hint_only_for_unknown_tags() {
        assert_eq!(custom_category_hint("work"), None);
        let hint = custom_category_hint("errands").unwrap();
        assert!(hint.contains("`errands`"));
        assert!(hint.contains("work, study, life"));
    }
}
