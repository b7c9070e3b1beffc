//! Interaction order numbering.
//!
//! `SequenceTracker` hands out the order label of each interaction. It is a
//! stack of frames with a base frame that is never popped:
//!
//! ```text
//! base      "1" "2"                      "4"
//! parallel          "2" "3"                      (continue_numbering = false)
//! parallel          "2" "3"                      (continue_numbering = true)
//! child                     "3.1" "3.2"          (nested subsequence)
//! ```
//!
//! A *parallel* frame starts at the enclosing counter, so sibling branches
//! reuse the same numbers. A *child* frame adds a numbering component below
//! the label the enclosing frame produced last.

use std::fmt;

use smol_str::{SmolStr, format_smolstr};
use thiserror::Error;
use tracing::trace;

use crate::base::constants::SEQUENCE_SEPARATOR;

/// The kind of a numbering frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Base,
    Parallel,
    Child,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base => "base",
            Self::Parallel => "parallel",
            Self::Child => "child",
        })
    }
}

/// Misuse of the start/end sequence pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// An end call without any open sequence.
    #[error("Cannot end a {requested} sequence: no sequence has been started")]
    Unmatched { requested: FrameKind },

    /// An end call that does not match the innermost open sequence.
    #[error("Cannot end a {requested} sequence while a {open} sequence is open")]
    Mismatched {
        requested: FrameKind,
        open: FrameKind,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Frame {
    kind: FrameKind,
    counter: u32,
    prefix: Option<SmolStr>,
}

impl Frame {
    fn base() -> Self {
        Self {
            kind: FrameKind::Base,
            counter: 0,
            prefix: None,
        }
    }

    fn label(&self) -> SmolStr {
        match &self.prefix {
            Some(prefix) => format_smolstr!("{prefix}{SEQUENCE_SEPARATOR}{}", self.counter),
            None => format_smolstr!("{}", self.counter),
        }
    }
}

/// Branch-aware interaction counter of a dynamic view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceTracker {
    // Never empty: frames[0] is the base frame.
    frames: Vec<Frame>,
}

impl Default for SequenceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::base()],
        }
    }

    fn top(&self) -> &Frame {
        // The base frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Advance the innermost frame and return its label.
    pub fn next(&mut self) -> SmolStr {
        let frame = self.top_mut();
        frame.counter += 1;
        frame.label()
    }

    /// The label most recently produced by the innermost frame, if any.
    pub fn current(&self) -> Option<SmolStr> {
        let frame = self.top();
        (frame.counter > 0).then(|| frame.label())
    }

    /// Number of open parallel/child sequences.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Kind of the innermost frame.
    pub fn innermost(&self) -> FrameKind {
        self.top().kind
    }

    /// Open a parallel branch that reuses the numbers of the enclosing frame.
    pub fn start_parallel(&mut self) {
        let top = self.top();
        let frame = Frame {
            kind: FrameKind::Parallel,
            counter: top.counter,
            prefix: top.prefix.clone(),
        };
        trace!("[SEQUENCE] start parallel at {} (depth {})", frame.counter, self.depth() + 1);
        self.frames.push(frame);
    }

    /// Close the innermost parallel branch.
    ///
    /// With `continue_numbering` the enclosing frame resumes after the
    /// highest number used in the branch; otherwise it is left untouched so
    /// a sibling branch can reuse the same numbers.
    pub fn end_parallel(&mut self, continue_numbering: bool) -> Result<(), SequenceError> {
        let branch = self.pop(FrameKind::Parallel)?;
        let parent = self.top_mut();
        if continue_numbering {
            parent.counter = parent.counter.max(branch.counter);
        }
        trace!(
            "[SEQUENCE] end parallel at {} (continue={continue_numbering}, resume at {})",
            branch.counter,
            parent.counter
        );
        Ok(())
    }

    /// Open a nested subsequence below the label produced last.
    pub fn start_child(&mut self) {
        let frame = Frame {
            kind: FrameKind::Child,
            counter: 0,
            prefix: Some(self.top().label()),
        };
        trace!(
            "[SEQUENCE] start child under {:?} (depth {})",
            frame.prefix,
            self.depth() + 1
        );
        self.frames.push(frame);
    }

    /// Close the innermost subsequence. The enclosing counter is unchanged.
    pub fn end_child(&mut self) -> Result<(), SequenceError> {
        let child = self.pop(FrameKind::Child)?;
        trace!("[SEQUENCE] end child after {}", child.label());
        Ok(())
    }

    fn pop(&mut self, requested: FrameKind) -> Result<Frame, SequenceError> {
        let open = self.top().kind;
        if self.frames.len() == 1 {
            return Err(SequenceError::Unmatched { requested });
        }
        if open != requested {
            return Err(SequenceError::Mismatched { requested, open });
        }
        self.frames.pop().ok_or(SequenceError::Unmatched { requested })
    }

    /// Make the base frame continue after a previously issued `label`.
    ///
    /// Only the leading numbering component counts; labels that don't start
    /// with a number are ignored.
    pub fn resume_after(&mut self, label: &str) {
        let major = label.split(SEQUENCE_SEPARATOR).next().unwrap_or_default();
        if let Ok(major) = major.trim().parse::<u32>() {
            let base = &mut self.frames[0];
            base.counter = base.counter.max(major);
        }
    }
}
