use crate::graph::EdgeKind;

/// A traveller's cash balance.
pub type Money = i64;

/// Economic rules for crossing roads.
///
/// A search only ever moves along an edge after [`can_cross`](Self::can_cross)
/// approved it, and then continues with the balance returned by
/// [`cross`](Self::cross).
pub trait Tariff {
    /// Whether a traveller holding `balance` may cross a road of `kind`.
    fn can_cross(&self, balance: Money, kind: EdgeKind) -> bool;

    /// The balance after crossing a road of `kind`.
    fn cross(&self, balance: Money, kind: EdgeKind) -> Money;

    /// Cross a sequence of roads starting from `budget`.
    ///
    /// Returns the final balance, or `None` as soon as a road could not be
    /// crossed.
    fn replay<I>(&self, budget: Money, kinds: I) -> Option<Money>
    where
        Self: Sized,
        I: IntoIterator<Item = EdgeKind>,
    {
        kinds.into_iter().try_fold(budget, |balance, kind| {
            self.can_cross(balance, kind)
                .then(|| self.cross(balance, kind))
        })
    }
}

/// Fixed toll and reward amounts.
///
/// - Toll roads need `balance >= toll` and cost `toll`.
/// - Reward roads are always open and pay `gain`.
/// - Public roads are always open and free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Economy {
    pub toll: Money,
    pub gain: Money,
}

impl Economy {
    pub const fn new(toll: Money, gain: Money) -> Self {
        Self { toll, gain }
    }
}

impl Tariff for Economy {
    fn can_cross(&self, balance: Money, kind: EdgeKind) -> bool {
        match kind {
            EdgeKind::Toll => balance >= self.toll,
            EdgeKind::Reward | EdgeKind::Public => true,
        }
    }

    fn cross(&self, balance: Money, kind: EdgeKind) -> Money {
        match kind {
            EdgeKind::Toll => balance.saturating_sub(self.toll),
            EdgeKind::Reward => balance.saturating_add(self.gain),
            EdgeKind::Public => balance,
        }
    }
}
