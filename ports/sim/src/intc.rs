//! PLIC-style interrupt controller model.
//!
//! Per-source priority (3 bits), enable bit, pending bit and a context
//! threshold. A claim selects the highest-priority enabled pending source
//! above the threshold (ties go to the lowest source number), clears its
//! pending bit and gates the source until completion — re-raises while a
//! source is in service stay pending and become claimable again only after
//! `complete`, matching the PLIC gateway behavior.

use hal::sync::Mutex;
use hal::{IrqChip, IrqPriority, SwIrqChip};

/// Priority registers implement 3 bits.
const PRIORITY_MASK: u8 = 0x7;

struct Source {
    priority: u8,
    enabled: bool,
    pending: bool,
    in_service: bool,
}

impl Source {
    fn new() -> Self {
        Self {
            priority: 0,
            enabled: false,
            pending: false,
            in_service: false,
        }
    }
}

/// Shared register model; sources are 0-based here. The public controllers
/// translate their own numbering.
struct PlicModel {
    sources: Vec<Source>,
    threshold: u8,
}

impl PlicModel {
    fn new(nsources: usize) -> Self {
        let mut sources = Vec::with_capacity(nsources);
        sources.resize_with(nsources, Source::new);
        Self {
            sources,
            threshold: 0,
        }
    }

    fn set_priority(&mut self, index: usize, priority: IrqPriority) {
        if let Some(src) = self.sources.get_mut(index) {
            src.priority = priority & PRIORITY_MASK;
        }
    }

    fn set_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(src) = self.sources.get_mut(index) {
            src.enabled = enabled;
        }
    }

    fn is_enabled(&self, index: usize) -> bool {
        self.sources.get(index).is_some_and(|s| s.enabled)
    }

    fn raise(&mut self, index: usize) {
        if let Some(src) = self.sources.get_mut(index) {
            src.pending = true;
        }
    }

    fn claim(&mut self) -> Option<usize> {
        let threshold = self.threshold;
        let best = self
            .sources
            .iter()
            .enumerate()
            .filter(|(_, s)| s.pending && s.enabled && !s.in_service && s.priority > threshold)
            // Highest priority wins; max_by_key keeps the last maximum, so
            // compare the negated index to land on the lowest source number.
            .max_by_key(|(index, s)| (s.priority, usize::MAX - index))
            .map(|(index, _)| index)?;
        let src = &mut self.sources[best];
        src.pending = false;
        src.in_service = true;
        Some(best)
    }

    fn complete(&mut self, index: usize) {
        if let Some(src) = self.sources.get_mut(index) {
            src.in_service = false;
        }
    }
}

/// Simulated external interrupt controller; sources are numbered `1..=n`.
pub struct SimIntc {
    model: Mutex<PlicModel>,
    nlines: usize,
}

impl SimIntc {
    pub fn new(nlines: usize) -> Self {
        Self {
            model: Mutex::new(PlicModel::new(nlines)),
            nlines,
        }
    }

    fn index(&self, line: u32) -> Option<usize> {
        if line == 0 || line as usize > self.nlines {
            log::debug!("intc: source {line} out of range");
            return None;
        }
        Some(line as usize - 1)
    }

    /// Asserts an interrupt from the simulated peripheral side.
    pub fn raise(&self, line: u32) {
        if let Some(index) = self.index(line) {
            self.model.lock().raise(index);
        }
    }

    /// Programs the claim threshold; only priorities above it are served.
    pub fn set_threshold(&self, threshold: u8) {
        self.model.lock().threshold = threshold & PRIORITY_MASK;
    }
}

impl IrqChip for SimIntc {
    fn set_priority(&self, line: u32, priority: IrqPriority) {
        if let Some(index) = self.index(line) {
            self.model.lock().set_priority(index, priority);
        }
    }

    fn enable(&self, line: u32) {
        if let Some(index) = self.index(line) {
            self.model.lock().set_enabled(index, true);
        }
    }

    fn disable(&self, line: u32) {
        if let Some(index) = self.index(line) {
            self.model.lock().set_enabled(index, false);
        }
    }

    fn is_enabled(&self, line: u32) -> bool {
        self.index(line)
            .is_some_and(|index| self.model.lock().is_enabled(index))
    }

    fn claim(&self) -> Option<u32> {
        self.model.lock().claim().map(|index| index as u32 + 1)
    }

    fn complete(&self, line: u32) {
        if let Some(index) = self.index(line) {
            self.model.lock().complete(index);
        }
    }
}

/// Simulated software interrupt controller; lines are numbered `0..n` at the
/// register interface, but claims report 1-based source ids like the
/// hardware block they share a design with.
pub struct SimSwIntc {
    model: Mutex<PlicModel>,
    nlines: usize,
}

impl SimSwIntc {
    pub fn new(nlines: usize) -> Self {
        Self {
            model: Mutex::new(PlicModel::new(nlines)),
            nlines,
        }
    }

    fn index(&self, line: u32) -> Option<usize> {
        if (line as usize) < self.nlines {
            Some(line as usize)
        } else {
            log::debug!("sw intc: line {line} out of range");
            None
        }
    }
}

impl SwIrqChip for SimSwIntc {
    fn set_priority(&self, line: u32, priority: IrqPriority) {
        if let Some(index) = self.index(line) {
            self.model.lock().set_priority(index, priority);
        }
    }

    fn enable(&self, line: u32) {
        if let Some(index) = self.index(line) {
            self.model.lock().set_enabled(index, true);
        }
    }

    fn disable(&self, line: u32) {
        if let Some(index) = self.index(line) {
            self.model.lock().set_enabled(index, false);
        }
    }

    fn is_enabled(&self, line: u32) -> bool {
        self.index(line)
            .is_some_and(|index| self.model.lock().is_enabled(index))
    }

    fn trigger(&self, line: u32) {
        if let Some(index) = self.index(line) {
            self.model.lock().raise(index);
        }
    }

    fn claim(&self) -> Option<u32> {
        self.model.lock().claim().map(|index| index as u32 + 1)
    }

    fn complete(&self, source: u32) {
        if source > 0 {
            self.model.lock().complete(source as usize - 1);
        }
    }
}
