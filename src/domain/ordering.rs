//! Ordering primitives shared by the task store.
//!
//! These functions know nothing about storage or terminals: the store calls
//! them after mutations and the UI adapters only ever produce index pairs.

use super::enums::Status;
use super::task::Task;

/// Split raw user input into task lines.
///
/// The input is trimmed as a whole, split on LF, CRLF or bare CR line
/// breaks, and blank lines are dropped. Interior lines keep their own spacing.
pub fn split_input(raw: &str) -> Vec<String> {
    raw.trim()
        .split(['\n', '\r'])
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Stable partition of `tasks` into status groups, in priority order.
///
/// Runs in O(n) with one bucket per status, so ties keep their relative
/// order without depending on a sort's stability contract.
pub fn regroup(tasks: &mut Vec<Task>) {
    let taken = std::mem::take(tasks);
    *tasks = regrouped(taken);
}

/// Owned variant of [`regroup`]
pub fn regrouped(tasks: Vec<Task>) -> Vec<Task> {
    let mut buckets: [Vec<Task>; 4] = Default::default();
    let len = tasks.len();
    for task in tasks {
        buckets[task.status.priority()].push(task);
    }

    let mut out = Vec::with_capacity(len);
    for bucket in buckets {
        out.extend(bucket);
    }
    out
}

/// Whether `tasks` is already grouped by status priority
#[cfg(test)]
pub fn is_grouped(tasks: &[Task]) -> bool {
    tasks
        .windows(2)
        .all(|pair| pair[0].status.priority() <= pair[1].status.priority())
}

/// Move the element at `moved` onto the element at `target`.
///
/// Moving forward (`moved < target`) places the element immediately after
/// the target; moving backward places it immediately before. Both cases end
/// up at index `target` once the element has been lifted out. Returns
/// `false` (and leaves `seq` untouched) for equal or out-of-range indices.
pub fn reorder<T>(seq: &mut Vec<T>, moved: usize, target: usize) -> bool {
    if moved == target || moved >= seq.len() || target >= seq.len() {
        return false;
    }
    let item = seq.remove(moved);
    seq.insert(target, item);
    true
}

/// Number of tasks per status, in priority order
pub fn status_counts(tasks: &[Task]) -> [(Status, usize); 4] {
    let mut counts = Status::ALL.map(|status| (status, 0));
    for task in tasks {
        counts[task.status.priority()].1 += 1;
    }
    counts
}
