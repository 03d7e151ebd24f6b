// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::progress::Progress;

/// Progress sink that writes into the shared status line.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    total: usize,
    done: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, total: 0, done: 0 }
    }

    fn set(&self, msg: String) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg;
        }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.set(format!("0/{} …", total));
    }

    fn log(&mut self, msg: &str) {
        self.set(s!(msg));
    }

    fn item_done(&mut self) {
        self.done += 1;
        if self.total > 0 {
            self.set(format!("{}/{} …", self.done, self.total));
        }
    }

    fn finish(&mut self) {
        self.set(s!("Done"));
    }
}
