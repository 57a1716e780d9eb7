//! An implementation of an abstract sink.
//!
//! The module contains the sink trait, a closure adapter and
//! a cloneable wrapper that renders values for a display.

use anyhow::Result;
use std::fmt;
use std::sync::Arc;

/// An abstract sink.
pub trait Sender<M>: Send + Sync {
    /// Delivers a value to a recipient.
    fn send(&self, input: M) -> Result<()>;
}

/// A wrapper to convert any function to a sink.
pub struct FuncSender<F>(pub F);

impl<F, IN> Sender<IN> for FuncSender<F>
where
    F: Fn(IN) -> Result<()>,
    F: Send + Sync,
{
    fn send(&self, input: IN) -> Result<()> {
        (self.0)(input)
    }
}

/// A universal cloneable wrapper for `Sender`.
pub struct MessageSender<M> {
    recipient: Arc<dyn Sender<M>>,
}

impl<M> Clone for MessageSender<M> {
    fn clone(&self) -> Self {
        Self {
            recipient: self.recipient.clone(),
        }
    }
}

impl<M> Sender<M> for MessageSender<M> {
    fn send(&self, msg: M) -> Result<()> {
        self.recipient.send(msg)
    }
}

impl<M> fmt::Debug for MessageSender<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageSender")
    }
}

impl<M> MessageSender<M> {
    /// Wraps a sink with a reference counter.
    pub fn new<E>(sender: E) -> Self
    where
        E: Sender<M> + 'static,
    {
        Self {
            recipient: Arc::new(sender),
        }
    }

    /// Changes `MessageSender` to another input type.
    ///
    /// Used to render numbers into the text a display expects.
    pub fn reform<F, IN>(&self, func: F) -> MessageSender<IN>
    where
        F: Fn(IN) -> M,
        F: Send + Sync + 'static,
        M: 'static,
    {
        let recipient = self.recipient.clone();
        let func_sender = FuncSender(move |input| {
            let output = func(input);
            recipient.send(output)
        });
        MessageSender::new(func_sender)
    }
}
