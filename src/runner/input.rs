use std::collections::VecDeque;

/// Where a jump came from. Only used for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputDevice {
    Keyboard,
    Pointer,
    Touch,
}

/// Discrete player intent, applied at the top of the next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Jump(InputDevice),
}

/// Bounded FIFO between event handlers and the frame callback. When full,
/// new intents are dropped: a burst of taps within one frame is one jump anyway.
#[derive(Debug)]
pub struct InputQueue {
    intents: VecDeque<Intent>,
    capacity: usize,
}

impl InputQueue {
    pub const DEFAULT_CAPACITY: usize = 8;

    pub fn new(capacity: usize) -> Self {
        Self { intents: VecDeque::with_capacity(capacity), capacity }
    }

    /// Returns false when the intent was dropped.
    pub fn push(&mut self, intent: Intent) -> bool {
        if self.intents.len() >= self.capacity {
            return false;
        }
        self.intents.push_back(intent);
        true
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Intent> + '_ {
        self.intents.drain(..)
    }

    pub fn clear(&mut self) {
        self.intents.clear();
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_intents_past_capacity() {
        let mut q = InputQueue::new(2);
        assert!(q.push(Intent::Jump(InputDevice::Keyboard)));
        assert!(q.push(Intent::Jump(InputDevice::Touch)));
        assert!(!q.push(Intent::Jump(InputDevice::Pointer)));
        assert_eq!(q.len(), 2);
        let drained: Vec<_> = q.drain().collect();
        assert_eq!(drained, vec![Intent::Jump(InputDevice::Keyboard), Intent::Jump(InputDevice::Touch)]);
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn clear_empties_a_full_queue() {
        let mut q = InputQueue::default();
        while q.push(Intent::Jump(InputDevice::Touch)) {}
        assert_eq!(q.len(), InputQueue::DEFAULT_CAPACITY);
        q.clear();
        assert_eq!(q.len(), 0);
    }
}
