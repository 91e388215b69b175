//! Handler records and the per-line chain store.
//!
//! Every interrupt line owns an ordered chain of handler records. Chains are
//! tail-appended and walked head-to-tail, which is what gives drivers the
//! registration-order guarantee. Chains are expected to stay short (a handful
//! of shared-line consumers), so removal is a linear scan by name.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use hal::sync::Mutex;
use hal::HalResult;

use crate::stats::{IrqStats, LineStats};

/// A registered interrupt handler.
///
/// Context the C API would pass through a `priv` pointer is captured state
/// inside the handler value. An error return is logged by the dispatcher and
/// never stops the chain walk.
pub trait IrqHandler: Send + Sync {
    /// Service one interrupt on `line`.
    fn handle(&self, line: u32) -> HalResult<()>;
}

impl<F> IrqHandler for F
where
    F: Fn(u32) -> HalResult<()> + Send + Sync,
{
    fn handle(&self, line: u32) -> HalResult<()> {
        self(line)
    }
}

/// One `(name, handler, priority)` registration on a line.
pub(crate) struct HandlerEntry {
    pub(crate) name: String,
    pub(crate) handler: Arc<dyn IrqHandler>,
    pub(crate) priority: AtomicU8,
    pub(crate) count: AtomicU64,
}

#[derive(Default)]
struct Line {
    entries: Vec<Arc<HandlerEntry>>,
    /// Priority last programmed into the controller for this line.
    priority: u8,
}

/// Fixed-size array of handler chains shared by both table flavors.
///
/// Indices are always 0-based here; the public tables translate their own
/// numbering before calling in. All mutation happens under one mutex, and
/// dispatch copies a chain out before invoking handlers, so a walk never
/// observes a half-updated chain and handlers may re-enter the registration
/// API.
pub(crate) struct LineStore {
    lines: Mutex<Vec<Line>>,
}

impl LineStore {
    pub(crate) fn new(nlines: usize) -> Self {
        let mut lines = Vec::with_capacity(nlines);
        lines.resize_with(nlines, Line::default);
        Self {
            lines: Mutex::new(lines),
        }
    }

    /// Insert-or-update one registration.
    ///
    /// A record matching both `name` and the handler identity is reused and
    /// only has its priority refreshed; anything else — including the same
    /// name with a different handler — appends a new record at the tail.
    pub(crate) fn insert(
        &self,
        index: usize,
        name: &str,
        handler: Arc<dyn IrqHandler>,
        priority: u8,
    ) {
        let mut lines = self.lines.lock();
        let line = &mut lines[index];
        line.priority = priority;

        if let Some(existing) = line
            .entries
            .iter()
            .find(|e| e.name == name && Arc::ptr_eq(&e.handler, &handler))
        {
            existing.priority.store(priority, Ordering::Relaxed);
            return;
        }

        line.entries.push(Arc::new(HandlerEntry {
            name: name.to_owned(),
            handler,
            priority: AtomicU8::new(priority),
            count: AtomicU64::new(0),
        }));
    }

    /// Remove the first record whose name matches.
    ///
    /// Matching is by name only — the documented asymmetry with
    /// [`LineStore::insert`]. Returns whether the chain still has entries.
    pub(crate) fn remove(&self, index: usize, name: &str) -> bool {
        let mut lines = self.lines.lock();
        let line = &mut lines[index];
        match line.entries.iter().position(|e| e.name == name) {
            Some(pos) => {
                line.entries.remove(pos);
            }
            None => {
                log::debug!("no handler named {name:?} on line index {index}");
            }
        }
        !line.entries.is_empty()
    }

    /// Copy of one chain, in registration order.
    pub(crate) fn snapshot(&self, index: usize) -> Vec<Arc<HandlerEntry>> {
        self.lines.lock()[index].entries.clone()
    }

    /// Statistics for every line with at least one handler. `base` is the
    /// public numbering offset of the owning table (1 for hardware lines,
    /// 0 for software lines).
    pub(crate) fn collect_stats(&self, base: u32) -> IrqStats {
        let lines = self.lines.lock();
        let lines = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.entries.is_empty())
            .map(|(index, line)| LineStats {
                line: index as u32 + base,
                count: line
                    .entries
                    .iter()
                    .map(|e| e.count.load(Ordering::Relaxed))
                    .sum(),
                priority: line.priority,
                handlers: line.entries.iter().map(|e| e.name.clone()).collect(),
            })
            .collect();
        IrqStats { lines }
    }
}
