use async_trait::async_trait;
use banksort_core::{SortEvent, Subscribe};

use crate::subscriber::view::log_event;

/// Renders every scheduler event as a log line.
pub struct Journal;

impl Journal {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Subscribe for Journal {
    async fn on_event(&self, event: &SortEvent) {
        log_event(event);
    }
    fn name(&self) -> &'static str {
        "journal"
    }
    fn queue_capacity(&self) -> usize {
        2048
    }
}
