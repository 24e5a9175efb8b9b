use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use chrono::Utc;
use parking_lot::Mutex;

use crate::domain::{EmailItem, ItemSource};

pub trait IdGenerator: Send + Sync {
    fn next_id(&self, source: ItemSource) -> String;
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `{source}-{unix_millis}-{counter}`; the counter is process-wide so two
/// ids minted within the same millisecond still differ.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampIds;

impl IdGenerator for TimestampIds {
    fn next_id(&self, source: ItemSource) -> String {
        let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!(
            "{}-{}-{}",
            source,
            Utc::now().timestamp_millis(),
            to_base36(seq)
        )
    }
}

/// Deterministic `{source}-{n}` ids starting at 1.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, source: ItemSource) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{source}-{n}")
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Pending items, newest first.
pub struct ItemQueue {
    items: Mutex<VecDeque<EmailItem>>,
    ids: Arc<dyn IdGenerator>,
}

impl ItemQueue {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            ids,
        }
    }

    pub fn add_item(
        &self,
        source: ItemSource,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> EmailItem {
        let item = EmailItem {
            id: self.ids.next_id(source),
            source,
            name: name.into(),
            text: text.into(),
        };
        self.items.lock().push_front(item.clone());
        item
    }

    pub fn clear(&self) {
        self.items.lock().clear();
    }

    pub fn all(&self) -> Vec<EmailItem> {
        self.items.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl Default for ItemQueue {
    fn default() -> Self {
        Self::new(Arc::new(TimestampIds))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn sequential_queue() -> ItemQueue {
        ItemQueue::new(Arc::new(SequentialIds::default()))
    }

    #[test]
    fn newest_item_comes_first() {
        let queue = sequential_queue();
        queue.add_item(ItemSource::File, "a.txt", "primeiro");
        queue.add_item(ItemSource::Paste, "colado", "segundo");

        let ids: Vec<String> = queue.all().into_iter().map(|item| item.id).collect();
        assert_eq!(ids, vec!["paste-2".to_string(), "file-1".to_string()]);
    }

    #[test]
    fn add_item_returns_the_stored_item() {
        let queue = sequential_queue();
        let item = queue.add_item(ItemSource::Paste, "colado", "");
        assert_eq!(queue.all(), vec![item.clone()]);
        assert_eq!(item.text, "");
    }

    #[test]
    fn clear_empties_the_queue() {
        let queue = sequential_queue();
        queue.add_item(ItemSource::File, "a.txt", "x");
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        queue.clear();
        assert!(queue.all().is_empty());
    }

    #[test]
    fn timestamp_ids_do_not_collide_in_tight_loops() {
        let queue = ItemQueue::default();
        for _ in 0..1_000 {
            queue.add_item(ItemSource::Paste, "p", "t");
        }
        let ids: HashSet<String> = queue.all().into_iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), 1_000);
        assert!(ids.iter().all(|id| id.starts_with("paste-")));
    }

    #[test]
    fn base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
