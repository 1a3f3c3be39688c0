// ── Per-operation dispatch sequencing ──
//
// Every dispatch takes the next sequence number for its operation kind. A
// settlement is current only while its number is still the latest issued.

use dashmap::DashMap;

/// Identity of one dispatched operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket {
    op: &'static str,
    seq: u64,
}

impl Ticket {
    pub(crate) fn op(&self) -> &'static str {
        self.op
    }

    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }
}

/// Monotonic per-kind counters.
#[derive(Debug, Default)]
pub(crate) struct Sequencer {
    latest: DashMap<&'static str, u64>,
}

impl Sequencer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn issue(&self, op: &'static str) -> Ticket {
        let mut latest = self.latest.entry(op).or_insert(0);
        *latest += 1;
        Ticket { op, seq: *latest }
    }

    pub(crate) fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest
            .get(ticket.op)
            .is_some_and(|latest| *latest == ticket.seq)
    }

    /// Advance the counter without issuing a ticket, orphaning every
    /// outstanding dispatch of `op`.
    pub(crate) fn invalidate(&self, op: &'static str) {
        *self.latest.entry(op).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_per_operation() {
        let seq = Sequencer::new();
        let a1 = seq.issue("a");
        let b1 = seq.issue("b");
        let a2 = seq.issue("a");

        assert_eq!(a1.seq(), 1);
        assert_eq!(b1.seq(), 1);
        assert_eq!(a2.seq(), 2);
        assert!(!seq.is_current(&a1));
        assert!(seq.is_current(&a2));
        assert!(seq.is_current(&b1));
    }

    #[test]
    fn invalidate_orphans_latest() {
        let seq = Sequencer::new();
        let t = seq.issue("a");
        seq.invalidate("a");
        assert!(!seq.is_current(&t));
    }
}
