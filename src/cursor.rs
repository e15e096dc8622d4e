/*
 * Cursor Module
 *
 * This module defines the CursorEvent produced by mouse input and the
 * CursorSlot that hands the latest event from the input handlers to the
 * simulation. Writers always replace the whole event, readers take a copy,
 * so a reader can never observe a half-updated event.
 */

use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorEvent {
    pub x: i32,
    pub y: i32,
    pub attract: bool,
    pub live: bool,
}

impl CursorEvent {
    pub fn new(x: i32, y: i32, attract: bool) -> Self {
        Self { x, y, attract, live: true }
    }

    // Copy of this event marked as released
    pub fn released(self) -> Self {
        Self { live: false, ..self }
    }
}

// Single-slot handoff holding the most recent cursor event
#[derive(Debug, Clone, Default)]
pub struct CursorSlot {
    latest: Arc<Mutex<Option<CursorEvent>>>,
}

impl CursorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<CursorEvent>> {
        // The slot only ever holds a Copy value, so a poisoned lock is still consistent
        self.latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn publish(&self, event: CursorEvent) {
        *self.lock() = Some(event);
    }

    // Replace the current event with its released copy
    pub fn release(&self) {
        let mut slot = self.lock();
        if let Some(event) = *slot {
            *slot = Some(event.released());
        }
    }

    pub fn latest(&self) -> Option<CursorEvent> {
        *self.lock()
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }
}
