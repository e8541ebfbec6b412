//! Frame requests.
//!
//! Stands in for the display's "call me on the next refresh" hook.
//! There is one slot, so at most one frame is ever pending:
//! a new request replaces whatever was waiting.

/// A requested frame. Carries the generation of the pass that asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle {
    id: u64,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks for a frame on the next tick, dropping any earlier request.
    pub fn request(&mut self, generation: u64) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle {
            id: self.next_id,
            generation,
        };

        self.pending = Some(handle);
        handle
    }

    /// Cancels `handle` if it is still pending. Returns true if it was.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            return true;
        }

        false
    }

    pub fn cancel_all(&mut self) {
        self.pending = None;
    }

    /// Takes the pending frame so it can be run.
    pub fn take(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> usize {
        self.pending.is_some() as usize
    }
}

#[cfg(test)]
mod test {
    use super::FrameScheduler;

    #[test]
    fn test_request_replaces() {
        let mut frames = FrameScheduler::new();
        let first = frames.request(1);
        let second = frames.request(2);

        assert_ne!(first, second);
        assert_eq!(frames.pending(), 1);
        assert_eq!(frames.take(), Some(second));
        assert_eq!(frames.take(), None);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_cancel_only_pending() {
        let mut frames = FrameScheduler::new();
        let old = frames.request(1);
        let new = frames.request(1);

        // Same generation, different request
        assert!(!frames.cancel(old));
        assert_eq!(frames.pending(), 1);
        assert!(frames.cancel(new));
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_cancel_all() {
        let mut frames = FrameScheduler::new();
        frames.request(3);
        frames.cancel_all();
        assert_eq!(frames.take(), None);
    }
}
