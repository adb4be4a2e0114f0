use std::borrow::Borrow;
use std::io::{self, Write};

use crate::message::Message;

/// Renders [`Message`] values into an [`io::Write`] target, one per line.
///
/// ```
/// use logging::{Message, MessageSink};
///
/// let mut sink = MessageSink::new(Vec::new());
/// sink.write(Message::warning("nothing selected"))?;
///
/// assert_eq!(sink.into_inner(), b"repo-slice: warning: nothing selected\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct MessageSink<W> {
    writer: W,
    written: usize,
}

impl<W> MessageSink<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of messages written so far.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrows the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink<W> {
    /// Writes `message` followed by a newline.
    ///
    /// The message and its newline reach the writer in one `write_all`.
    pub fn write<M>(&mut self, message: M) -> io::Result<()>
    where
        M: Borrow<Message>,
    {
        let line = format!("{}\n", message.borrow());
        self.writer.write_all(line.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    /// Writes every message in order, stopping at the first failure.
    pub fn write_all<I, M>(&mut self, messages: I) -> io::Result<()>
    where
        I: IntoIterator<Item = M>,
        M: Borrow<Message>,
    {
        messages
            .into_iter()
            .try_for_each(|message| self.write(message))
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
