/// Issue a fresh random identifier: 32 lowercase hex digits, no separators.
pub fn fresh_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Monotonic identifier source scoped to one merge run.
///
/// Every call to [`IdCounter::next_id`] returns a value never returned before by the same
/// counter. Counters are plain values: two merges with two counters are independent.
#[derive(Debug, Clone, Default)]
pub struct IdCounter {
    next: u64,
}

impl IdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.next += 1;
        self.next.to_string()
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}
