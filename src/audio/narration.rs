/// Orders narration clips for playback while their synthesis runs in
/// parallel. Slots are reserved in step order before any fetch starts; a slot
/// resolving out of order waits until every earlier slot has resolved, and a
/// failed slot is skipped. Batches are numbered so results from a cancelled
/// batch are dropped.
pub struct NarrationSequencer {
    batch: u64,
    slots: Vec<Slot>,
    emitted: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Slot {
    Pending,
    Ready(String),
    Failed,
}

impl NarrationSequencer {
    pub fn new() -> Self {
        Self {
            batch: 0,
            slots: Vec::new(),
            emitted: 0,
        }
    }

    /// Reserve `count` ordered slots and return the batch id to tag fetches with.
    pub fn start(&mut self, count: usize) -> u64 {
        self.batch += 1;
        self.slots = vec![Slot::Pending; count];
        self.emitted = 0;
        self.batch
    }

    /// Drop the active batch; late results for it will be ignored.
    pub fn cancel(&mut self) {
        self.batch += 1;
        self.slots.clear();
        self.emitted = 0;
    }

    /// Record one fetch result (None = synthesis failed) and return the clip
    /// urls that are now unblocked, in step order.
    pub fn resolve(&mut self, batch: u64, step: usize, url: Option<String>) -> Vec<String> {
        if batch != self.batch || step >= self.slots.len() {
            return Vec::new();
        }
        if self.slots[step] != Slot::Pending {
            return Vec::new();
        }
        self.slots[step] = match url {
            Some(url) => Slot::Ready(url),
            None => Slot::Failed,
        };

        let mut unblocked = Vec::new();
        while self.emitted < self.slots.len() {
            match &self.slots[self.emitted] {
                Slot::Pending => break,
                Slot::Ready(url) => unblocked.push(url.clone()),
                Slot::Failed => {}
            }
            self.emitted += 1;
        }
        unblocked
    }
}
