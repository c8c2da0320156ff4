use std::sync::atomic::{AtomicUsize, Ordering};

const PREFIX: &str = "pinnwand"; // Must NOT contain "/" or "-"

static COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Unique DOM id for an element kind, e.g. `dialog_pinnwand_3`.
pub fn use_random_id_for(element: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{element}_{PREFIX}_{n}")
}
