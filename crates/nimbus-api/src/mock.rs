//! Scripted command bus for testing clients in isolation
//!
//! [`MockBus`] replays queued replies in order and records every dispatched
//! command, so client logic can be exercised without a live endpoint.

use crate::bus::CommandBus;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

enum Reply {
    Execute(Result<Value>),
    List(Result<Vec<Value>>),
    Boolean(Result<bool>),
}

/// A command bus that replays scripted replies.
///
/// Replies are consumed in FIFO order regardless of the command name; a
/// mismatch between the dispatched operation kind and the queued reply
/// kind panics, as does running out of replies.
#[derive(Default)]
pub struct MockBus {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next `execute` dispatch.
    pub fn push_execute(&self, reply: Result<Value>) {
        self.replies.lock().unwrap().push_back(Reply::Execute(reply));
    }

    /// Queue a reply for the next `list` dispatch.
    pub fn push_list(&self, reply: Result<Vec<Value>>) {
        self.replies.lock().unwrap().push_back(Reply::List(reply));
    }

    /// Queue a reply for the next `execute_boolean` dispatch.
    pub fn push_boolean(&self, reply: Result<bool>) {
        self.replies.lock().unwrap().push_back(Reply::Boolean(reply));
    }

    /// Queue a structured error-response reply for a boolean dispatch.
    pub fn push_boolean_error(&self, code: i32, message: impl Into<String>) {
        self.push_boolean(Err(Error::ErrorResponse {
            code,
            message: message.into(),
        }));
    }

    /// Every `(command, params)` pair dispatched so far, in order.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, command: &str, params: &Value) {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), params.clone()));
    }

    fn next_reply(&self, command: &str) -> Reply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply left for command {command}"))
    }
}

#[async_trait]
impl CommandBus for MockBus {
    async fn execute(&self, command: &str, params: Value) -> Result<Value> {
        self.record(command, &params);
        match self.next_reply(command) {
            Reply::Execute(reply) => reply,
            _ => panic!("scripted reply kind mismatch for command {command}"),
        }
    }

    async fn list(&self, command: &str, filter: Value) -> Result<Vec<Value>> {
        self.record(command, &filter);
        match self.next_reply(command) {
            Reply::List(reply) => reply,
            _ => panic!("scripted reply kind mismatch for command {command}"),
        }
    }

    async fn execute_boolean(&self, command: &str, params: Value) -> Result<bool> {
        self.record(command, &params);
        match self.next_reply(command) {
            Reply::Boolean(reply) => reply,
            _ => panic!("scripted reply kind mismatch for command {command}"),
        }
    }
}
