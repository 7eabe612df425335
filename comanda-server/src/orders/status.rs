//! Order State Machine
//!
//! 封闭状态集 + 显式转移表。只允许前进，`Settled` 为吸收态。

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle states
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    InPreparation,
    Ready,
    Settled,
}

impl OrderStatus {
    /// Explicit transition table. `Pending → Ready` is legal: an order
    /// whose lines all complete in one stroke skips InPreparation.
    pub fn can_transition(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (Pending, InPreparation)
                | (Pending, Ready)
                | (InPreparation, Ready)
                | (Ready, Settled)
        )
    }

    /// Still in the kitchen pipeline (waiter/cook queues)
    pub fn is_open(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::InPreparation)
    }

    /// Line edits (full replace) are only allowed here
    pub fn allows_line_edit(self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Cook completion toggles are allowed until settlement
    pub fn allows_completion_toggle(self) -> bool {
        !matches!(self, OrderStatus::Settled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InPreparation => "IN_PREPARATION",
            OrderStatus::Ready => "READY",
            OrderStatus::Settled => "SETTLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;

    const ALL: [super::OrderStatus; 4] = [Pending, InPreparation, Ready, Settled];

    #[test]
    fn forward_transitions_only() {
        assert!(Pending.can_transition(InPreparation));
        assert!(Pending.can_transition(Ready));
        assert!(InPreparation.can_transition(Ready));
        assert!(Ready.can_transition(Settled));
    }

    #[test]
    fn no_backward_or_skipping_transitions() {
        assert!(!InPreparation.can_transition(Pending));
        assert!(!Ready.can_transition(Pending));
        assert!(!Ready.can_transition(InPreparation));
        assert!(!Pending.can_transition(Settled));
        assert!(!InPreparation.can_transition(Settled));
    }

    #[test]
    fn settled_is_absorbing() {
        for to in ALL {
            assert!(!Settled.can_transition(to), "SETTLED must not reach {to}");
        }
    }

    #[test]
    fn self_transitions_rejected() {
        for s in ALL {
            assert!(!s.can_transition(s));
        }
    }

    #[test]
    fn edit_guards_follow_status() {
        assert!(Pending.allows_line_edit());
        assert!(!InPreparation.allows_line_edit());
        assert!(!Ready.allows_line_edit());
        assert!(!Settled.allows_line_edit());
        assert!(Ready.allows_completion_toggle());
        assert!(!Settled.allows_completion_toggle());
    }
}
