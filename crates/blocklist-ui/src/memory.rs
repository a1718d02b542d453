//! In-memory element implementations.
//!
//! Used by tests and by headless hosts that render the page themselves.

use crate::actions::SearchOutcome;
use crate::dom::*;
use crate::toast::Toast;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Snapshot of a [`MemoryInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    pub value: String,
    pub validity: Option<Validity>,
    pub error_visible: bool,
}

pub struct MemoryInput {
    id: String,
    state: Mutex<InputState>,
}

impl MemoryInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: Mutex::new(InputState {
                value: String::new(),
                validity: None,
                error_visible: false,
            }),
        }
    }

    pub fn with_value(id: impl Into<String>, value: &str) -> Self {
        let input = Self::new(id);
        input.set_value(value);
        input
    }

    pub fn state(&self) -> InputState {
        lock(&self.state).clone()
    }
}

impl TextInput for MemoryInput {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self) -> String {
        lock(&self.state).value.clone()
    }

    fn set_value(&self, value: &str) {
        lock(&self.state).value = value.to_string();
    }

    fn set_validity(&self, validity: Validity) {
        lock(&self.state).validity = Some(validity);
    }

    fn set_error_visible(&self, visible: bool) {
        lock(&self.state).error_visible = visible;
    }
}

pub struct MemoryButton {
    enabled: AtomicBool,
}

impl MemoryButton {
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }
}

impl Default for MemoryButton {
    fn default() -> Self {
        Self::new()
    }
}

impl Button for MemoryButton {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
struct PanelState {
    content: Option<SearchOutcome>,
    visible: bool,
    renders: usize,
}

#[derive(Default)]
pub struct MemoryPanel {
    state: Mutex<PanelState>,
}

impl MemoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> Option<SearchOutcome> {
        lock(&self.state).content.clone()
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.state).visible
    }

    /// Number of times content was rendered.
    pub fn render_count(&self) -> usize {
        lock(&self.state).renders
    }
}

impl ResultPanel for MemoryPanel {
    fn render(&self, outcome: &SearchOutcome) {
        let mut state = lock(&self.state);
        state.content = Some(outcome.clone());
        state.renders += 1;
    }

    fn clear(&self) {
        lock(&self.state).content = None;
    }

    fn set_visible(&self, visible: bool) {
        lock(&self.state).visible = visible;
    }
}

#[derive(Default)]
pub struct MemoryToastArea {
    next_id: AtomicU64,
    toasts: Mutex<Vec<(ToastId, Toast)>>,
}

impl MemoryToastArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toasts currently shown, in append order.
    pub fn visible(&self) -> Vec<Toast> {
        lock(&self.toasts).iter().map(|(_, t)| t.clone()).collect()
    }
}

impl ToastArea for MemoryToastArea {
    fn append(&self, toast: &Toast) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::SeqCst));
        lock(&self.toasts).push((id, toast.clone()));
        id
    }

    fn remove(&self, id: ToastId) {
        lock(&self.toasts).retain(|(toast_id, _)| *toast_id != id);
    }
}

#[derive(Default)]
pub struct MemoryTable {
    rows: Mutex<Vec<EntryRow>>,
}

impl MemoryTable {
    pub fn new(rows: Vec<EntryRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }
}

impl EntryTable for MemoryTable {
    fn rows(&self) -> Vec<EntryRow> {
        lock(&self.rows).clone()
    }

    fn set_timestamp_text(&self, phone: &str, text: &str) {
        let mut rows = lock(&self.rows);
        if let Some(row) = rows.iter_mut().find(|r| r.phone == phone) {
            row.timestamp = text.to_string();
        }
    }

    fn remove_row(&self, phone: &str) -> bool {
        let mut rows = lock(&self.rows);
        match rows.iter().position(|r| r.phone == phone) {
            Some(index) => {
                rows.remove(index);
                true
            }
            None => false,
        }
    }

    fn replace_rows(&self, rows: Vec<EntryRow>) {
        *lock(&self.rows) = rows;
    }
}

/// Answers confirmations from a script, declining once it runs out.
#[derive(Default)]
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn push_answer(&self, answer: bool) {
        lock(&self.answers).push_back(answer);
    }

    /// Drop scripted answers no prompt has consumed.
    pub fn clear_answers(&self) {
        lock(&self.answers).clear();
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        lock(&self.prompts).push(prompt.to_string());
        lock(&self.answers).pop_front().unwrap_or(false)
    }
}

#[derive(Default)]
pub struct MemoryFormEvent {
    prevented: AtomicBool,
}

impl MemoryFormEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented.load(Ordering::SeqCst)
    }
}

impl FormEvent for MemoryFormEvent {
    fn prevent_default(&self) {
        self.prevented.store(true, Ordering::SeqCst);
    }
}
