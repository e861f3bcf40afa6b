use std::collections::VecDeque;

/// Handle for one begun clip. Ids are never reused, so a completion callback
/// that arrives after `stop()` carries a stale id and is ignored.
pub type ClipId = u64;

/// Backend that actually produces sound. `begin` returns false when playback
/// could not start; the queue treats that like an instant completion. The
/// driver reports natural completion (or a playback error) by calling
/// `AudioQueue::on_finished` with the clip's id.
pub trait ClipPlayer {
    fn begin(&mut self, id: ClipId, url: &str) -> bool;
    fn halt(&mut self, id: ClipId);
}

/// FIFO narration queue: clips play one at a time in enqueue order, errors
/// skip to the next clip, and the queue idles when drained.
pub struct AudioQueue<P: ClipPlayer> {
    player: P,
    queue: VecDeque<String>,
    current: Option<ClipId>,
    next_id: ClipId,
}

impl<P: ClipPlayer> AudioQueue<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            queue: VecDeque::new(),
            current: None,
            next_id: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    pub fn enqueue(&mut self, url: impl Into<String>) {
        self.queue.push_back(url.into());
        if self.current.is_none() {
            self.play_next();
        }
    }

    /// Completion report from the player, for both success and failure.
    /// Stale ids (anything but the current clip) are dropped.
    pub fn on_finished(&mut self, id: ClipId) {
        if self.current == Some(id) {
            self.current = None;
            self.play_next();
        }
    }

    /// Halt the current clip and forget everything queued. The halted clip's
    /// id is retired, so its late completion can never restart playback.
    pub fn stop(&mut self) {
        self.queue.clear();
        if let Some(id) = self.current.take() {
            self.player.halt(id);
        }
    }

    /// Drop only the backlog; the current clip finishes naturally and the
    /// queue then idles.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    fn play_next(&mut self) {
        while let Some(url) = self.queue.pop_front() {
            let id = self.next_id;
            self.next_id += 1;
            if self.player.begin(id, &url) {
                self.current = Some(id);
                return;
            }
            // Start failure behaves like completion: try the next clip.
        }
        self.current = None;
    }
}
