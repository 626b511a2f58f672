use std::iter::FusedIterator;

use tracing::debug;

use crate::catalog::{Encoding, TypedBuffer};
use crate::selection::policy::SelectionOptions;
use crate::selection::select_values;
use crate::types::{SelectionError, SelectionOutput, Value};

pub const DEFAULT_CHUNK_SIZE: usize = 65536;

/// Pull up to `size` items from `source` into `window`.
pub(crate) fn fill_window<I>(source: &mut I, window: &mut Vec<Value>, size: usize)
where
    I: Iterator,
    I::Item: Into<Value>,
{
    window.extend(source.by_ref().take(size).map(Into::into));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    /// First window not yet pulled.
    Pending,
    /// Encoding locked in by the first window, if any.
    Committed(Option<Encoding>),
    Done,
}

/// Lazy chunk-by-chunk selection driven by the first window.
///
/// The encoding chosen for the first window is applied to every later window
/// as-is. A window that does not fit it is yielded as a plain sequence; the
/// commitment itself never changes.
#[derive(Debug)]
pub struct StreamArray<I> {
    source: I,
    chunk_size: usize,
    options: SelectionOptions,
    window: Vec<Value>,
    state: StreamState,
}

pub fn stream_array<I>(source: I, chunk_size: usize, options: SelectionOptions) -> StreamArray<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    StreamArray {
        source: source.into_iter(),
        chunk_size,
        options,
        window: Vec::with_capacity(chunk_size.min(DEFAULT_CHUNK_SIZE)),
        state: StreamState::Pending,
    }
}

impl<I> StreamArray<I> {
    /// Encoding committed by the first window; `None` before it is pulled
    /// or when it fell back to a sequence.
    pub fn committed(&self) -> Option<Encoding> {
        match self.state {
            StreamState::Committed(code) => code,
            _ => None,
        }
    }

    fn emit_sequence(&mut self) -> SelectionOutput {
        SelectionOutput::Sequence(self.window.drain(..).collect())
    }
}

impl<I> Iterator for StreamArray<I>
where
    I: Iterator,
    I::Item: Into<Value>,
{
    type Item = Result<SelectionOutput, SelectionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == StreamState::Done {
            return None;
        }

        fill_window(&mut self.source, &mut self.window, self.chunk_size);
        if self.window.is_empty() {
            self.state = StreamState::Done;
            return None;
        }

        match self.state {
            StreamState::Pending => {
                let first = std::mem::replace(
                    &mut self.window,
                    Vec::with_capacity(self.chunk_size.min(DEFAULT_CHUNK_SIZE)),
                );
                match select_values(first, &self.options) {
                    Ok(out) => {
                        let code = out.encoding();
                        debug!(committed = ?code.map(Encoding::code), "stream committed");
                        self.state = StreamState::Committed(code);
                        Some(Ok(out))
                    }
                    Err(e) => {
                        self.state = StreamState::Done;
                        Some(Err(e))
                    }
                }
            }
            StreamState::Committed(Some(encoding)) => {
                match TypedBuffer::try_from_values(encoding, &self.window) {
                    Some(buf) => {
                        self.window.clear();
                        Some(Ok(SelectionOutput::Typed(buf)))
                    }
                    None => {
                        debug!(%encoding, len = self.window.len(), "window violates commitment");
                        Some(Ok(self.emit_sequence()))
                    }
                }
            }
            StreamState::Committed(None) => Some(Ok(self.emit_sequence())),
            StreamState::Done => None,
        }
    }
}

impl<I> FusedIterator for StreamArray<I>
where
    I: Iterator,
    I::Item: Into<Value>,
{
}
