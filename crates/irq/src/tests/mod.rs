use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use hal::{IrqChip, IrqPriority, SwIrqChip};


#[derive(Default)]
struct ChipState {
    enabled: HashSet<u32>,
    priority: HashMap<u32, IrqPriority>,
    pending: VecDeque<u32>,
    completed: Vec<u32>,
}

/// Records every controller operation and serves queued claims.
#[derive(Default)]
pub(crate) struct MockChip {
    state: Mutex<ChipState>,
}

impl MockChip {
    pub(crate) fn raise(&self, line: u32) {
        self.state.lock().unwrap().pending.push_back(line);
    }

    pub(crate) fn line_enabled(&self, line: u32) -> bool {
        self.state.lock().unwrap().enabled.contains(&line)
    }

    pub(crate) fn priority_of(&self, line: u32) -> Option<IrqPriority> {
        self.state.lock().unwrap().priority.get(&line).copied()
    }

    pub(crate) fn completed(&self) -> Vec<u32> {
        self.state.lock().unwrap().completed.clone()
    }
}

impl IrqChip for MockChip {
    fn set_priority(&self, line: u32, priority: IrqPriority) {
        self.state.lock().unwrap().priority.insert(line, priority);
    }

    fn enable(&self, line: u32) {
        self.state.lock().unwrap().enabled.insert(line);
    }

    fn disable(&self, line: u32) {
        self.state.lock().unwrap().enabled.remove(&line);
    }

    fn is_enabled(&self, line: u32) -> bool {
        self.line_enabled(line)
    }

    fn claim(&self) -> Option<u32> {
        self.state.lock().unwrap().pending.pop_front()
    }

    fn complete(&self, line: u32) {
        self.state.lock().unwrap().completed.push(line);
    }
}

/// Software flavor of [`MockChip`]: triggering line N queues the 1-based
/// source id N + 1, the convention of the software controller.
#[derive(Default)]
pub(crate) struct MockSwChip {
    state: Mutex<ChipState>,
}

impl MockSwChip {
    pub(crate) fn line_enabled(&self, line: u32) -> bool {
        self.state.lock().unwrap().enabled.contains(&line)
    }

    pub(crate) fn completed(&self) -> Vec<u32> {
        self.state.lock().unwrap().completed.clone()
    }
}

impl SwIrqChip for MockSwChip {
    fn set_priority(&self, line: u32, priority: IrqPriority) {
        self.state.lock().unwrap().priority.insert(line, priority);
    }

    fn enable(&self, line: u32) {
        self.state.lock().unwrap().enabled.insert(line);
    }

    fn disable(&self, line: u32) {
        self.state.lock().unwrap().enabled.remove(&line);
    }

    fn is_enabled(&self, line: u32) -> bool {
        self.line_enabled(line)
    }

    fn trigger(&self, line: u32) {
        self.state.lock().unwrap().pending.push_back(line + 1);
    }

    fn claim(&self) -> Option<u32> {
        self.state.lock().unwrap().pending.pop_front()
    }

    fn complete(&self, source: u32) {
        self.state.lock().unwrap().completed.push(source);
    }
}
