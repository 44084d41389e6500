// Press buffering for double-press detection

use super::action::TriggerCode;
use std::collections::VecDeque;

/// Maximum number of buffered presses to store
const MAX_BUFFER_SIZE: usize = 30;

/// How long a press stays eligible as the first half of a double press (in frames).
/// 18 frames is 0.3 seconds at 60 updates per second.
pub const DOUBLE_PRESS_WINDOW: u32 = 18;

/// A single buffered press
#[derive(Debug, Clone, Copy)]
pub struct BufferedPress {
    pub code: TriggerCode,
    pub frames_remaining: u32,
}

impl BufferedPress {
    pub fn new(code: TriggerCode) -> Self {
        Self {
            code,
            frames_remaining: DOUBLE_PRESS_WINDOW,
        }
    }

    /// Decrease the remaining frames
    pub fn age(&mut self) {
        self.frames_remaining = self.frames_remaining.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.frames_remaining == 0
    }
}

/// Recent presses of one device.
///
/// A press that finds its own code still buffered completes a double press
/// and consumes the buffered entry, so a third press starts a new pair.
#[derive(Debug)]
pub struct PressBuffer {
    buffer: VecDeque<BufferedPress>,
}

impl PressBuffer {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_BUFFER_SIZE),
        }
    }

    /// Record a press edge. Returns true if it completes a double press.
    pub fn record(&mut self, code: TriggerCode) -> bool {
        if self.consume(code) {
            return true;
        }

        self.buffer.push_back(BufferedPress::new(code));
        if self.buffer.len() > MAX_BUFFER_SIZE {
            self.buffer.pop_front();
        }
        false
    }

    /// Check if a press of `code` is still inside the window
    pub fn has(&self, code: TriggerCode) -> bool {
        self.buffer.iter().any(|press| press.code == code)
    }

    /// Remove a buffered press. Returns true if one was found.
    pub fn consume(&mut self, code: TriggerCode) -> bool {
        if let Some(pos) = self.buffer.iter().position(|press| press.code == code) {
            self.buffer.remove(pos);
            true
        } else {
            false
        }
    }

    /// Age all presses and drop expired ones. Call once per frame.
    pub fn update(&mut self) {
        for press in &mut self.buffer {
            press.age();
        }
        self.buffer.retain(|press| !press.is_expired());
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for PressBuffer {
    fn default() -> Self {
        Self::new()
    }
}
