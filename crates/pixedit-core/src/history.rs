//! Snapshot-based undo/redo.
//!
//! The stack owns the current buffer plus every earlier and undone state as
//! independent buffers. Applying a transform moves the old current buffer onto
//! the undo stack and installs the transform's output; undo and redo swap
//! buffers between the stacks. No buffer is ever shared between two slots.

use std::collections::VecDeque;

use crate::buffer::PixelBuffer;
use crate::error::{EngineError, Result};

/// Linear undo/redo history over [`PixelBuffer`] snapshots.
///
/// Branching is not supported: any successful apply discards the redo stack.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    current: Option<PixelBuffer>,
    /// Older states, most recent at the back.
    undo_stack: VecDeque<PixelBuffer>,
    /// Undone states, most recent last.
    redo_stack: Vec<PixelBuffer>,
    /// Maximum undo depth; `None` keeps every state.
    limit: Option<usize>,
}

impl HistoryStack {
    /// An empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty history keeping at most `limit` undo states.
    ///
    /// When a new state would exceed the limit the oldest one is dropped.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Install `buffer` as the current image and forget all history.
    pub fn load(&mut self, buffer: PixelBuffer) -> &PixelBuffer {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current.insert(buffer)
    }

    /// Replace the current buffer with `f(current)`, recording the old one.
    ///
    /// Apply is atomic: if `f` fails, the error is returned and the current
    /// buffer and both stacks are exactly as they were before the call.
    ///
    /// # Errors
    ///
    /// `NoImageLoaded` if nothing has been loaded, otherwise whatever `f`
    /// returns.
    pub fn apply<F>(&mut self, f: F) -> Result<&PixelBuffer>
    where
        F: FnOnce(&PixelBuffer) -> Result<PixelBuffer>,
    {
        let current = self.current.as_mut().ok_or(EngineError::NoImageLoaded)?;

        let next = f(&*current).inspect_err(|e| {
            log::warn!("Transform failed, history left unchanged: {}", e);
        })?;

        let previous = std::mem::replace(current, next);
        self.undo_stack.push_back(previous);
        self.redo_stack.clear();
        trim_to_limit(&mut self.undo_stack, self.limit);

        Ok(&*current)
    }

    /// Step back one state.
    ///
    /// # Errors
    ///
    /// `NoImageLoaded` before the first load, `NothingToUndo` when the undo
    /// stack is empty.
    pub fn undo(&mut self) -> Result<&PixelBuffer> {
        let current = self.current.as_mut().ok_or(EngineError::NoImageLoaded)?;
        let previous = self.undo_stack.pop_back().ok_or(EngineError::NothingToUndo)?;
        let undone = std::mem::replace(current, previous);
        self.redo_stack.push(undone);
        Ok(&*current)
    }

    /// Re-apply the most recently undone state.
    ///
    /// # Errors
    ///
    /// `NoImageLoaded` before the first load, `NothingToRedo` when the redo
    /// stack is empty.
    pub fn redo(&mut self) -> Result<&PixelBuffer> {
        let current = self.current.as_mut().ok_or(EngineError::NoImageLoaded)?;
        let next = self.redo_stack.pop().ok_or(EngineError::NothingToRedo)?;
        let replaced = std::mem::replace(current, next);
        self.undo_stack.push_back(replaced);
        trim_to_limit(&mut self.undo_stack, self.limit);
        Ok(&*current)
    }

    pub fn current(&self) -> Option<&PixelBuffer> {
        self.current.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop the image and all history.
    pub fn clear(&mut self) {
        self.current = None;
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

/// Drop the oldest undo states until at most `limit` remain.
fn trim_to_limit(undo_stack: &mut VecDeque<PixelBuffer>, limit: Option<usize>) {
    let Some(limit) = limit else {
        return;
    };
    while undo_stack.len() > limit {
        undo_stack.pop_front();
        log::warn!("Undo limit of {} reached, dropping oldest state", limit);
    }
}
