//! Resource pool and cost arithmetic.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A resource a cost can require.
///
/// `Common` is the generic kind; it is paid from the mana counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Common,
    Iron,
    Crystal,
    Biomass,
    Aether,
}

impl ResourceKind {
    /// The four typed kinds, excluding `Common`.
    pub const TYPED: [ResourceKind; 4] = [
        ResourceKind::Iron,
        ResourceKind::Crystal,
        ResourceKind::Biomass,
        ResourceKind::Aether,
    ];
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Amount required per resource kind.
///
/// ```
/// use rust_duel::resources::{Cost, ResourceKind};
///
/// let cost = Cost::common(3).with(ResourceKind::Iron, 1);
/// assert_eq!(cost.get(ResourceKind::Common), 3);
/// assert_eq!(cost.get(ResourceKind::Crystal), 0);
/// assert_eq!(cost.to_string(), "{Common: 3, Iron: 1}");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    amounts: FxHashMap<ResourceKind, u32>,
}

impl Cost {
    /// The zero cost.
    #[must_use]
    pub fn free() -> Self {
        Self::default()
    }

    /// A cost of `amount` generic mana.
    #[must_use]
    pub fn common(amount: u32) -> Self {
        Self::free().with(ResourceKind::Common, amount)
    }

    /// Add a component (builder pattern). Components of the same kind add up.
    #[must_use]
    pub fn with(mut self, kind: ResourceKind, amount: u32) -> Self {
        if amount > 0 {
            *self.amounts.entry(kind).or_insert(0) += amount;
        }
        self
    }

    /// Required amount of one kind.
    #[must_use]
    pub fn get(&self, kind: ResourceKind) -> u32 {
        self.amounts.get(&kind).copied().unwrap_or(0)
    }

    /// Is this the zero cost?
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.amounts.values().all(|&a| a == 0)
    }

    /// Non-zero components, ordered by kind.
    pub fn components(&self) -> impl Iterator<Item = (ResourceKind, u32)> {
        let mut parts: Vec<_> = self
            .amounts
            .iter()
            .filter(|(_, &a)| a > 0)
            .map(|(&k, &a)| (k, a))
            .collect();
        parts.sort_unstable();
        parts.into_iter()
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_free() {
            return f.write_str("{}");
        }
        let parts: Vec<_> = self
            .components()
            .map(|(k, a)| format!("{}: {}", k, a))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// The first component a pool could not cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("needs {required} {kind}, has {available}")]
pub struct Shortfall {
    pub kind: ResourceKind,
    pub required: u32,
    pub available: u32,
}

/// A player's mana counter and typed resource counters.
///
/// Counters are unsigned, so they can never go negative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    mana: u32,
    max_mana: u32,
    typed: FxHashMap<ResourceKind, u32>,
}

impl ResourcePool {
    /// Create an empty pool with a mana cap.
    #[must_use]
    pub fn new(max_mana: u32) -> Self {
        Self {
            mana: 0,
            max_mana,
            typed: FxHashMap::default(),
        }
    }

    /// Set the mana counter (builder pattern). Clamped to the cap.
    #[must_use]
    pub fn with_mana(mut self, mana: u32) -> Self {
        self.mana = mana.min(self.max_mana);
        self
    }

    /// Set a typed counter (builder pattern).
    #[must_use]
    pub fn with_typed(mut self, kind: ResourceKind, amount: u32) -> Self {
        self.gain(kind, amount);
        self
    }

    /// Current mana.
    #[must_use]
    pub fn mana(&self) -> u32 {
        self.mana
    }

    /// Mana cap.
    #[must_use]
    pub fn max_mana(&self) -> u32 {
        self.max_mana
    }

    /// Available amount of a kind. `Common` reads the mana counter.
    #[must_use]
    pub fn available(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Common => self.mana,
            _ => self.typed.get(&kind).copied().unwrap_or(0),
        }
    }

    /// First component of `cost` this pool cannot cover.
    #[must_use]
    pub fn shortfall(&self, cost: &Cost) -> Option<Shortfall> {
        cost.components().find_map(|(kind, required)| {
            let available = self.available(kind);
            (available < required).then_some(Shortfall {
                kind,
                required,
                available,
            })
        })
    }

    /// Can every component of `cost` be paid right now?
    #[must_use]
    pub fn can_afford(&self, cost: &Cost) -> bool {
        self.shortfall(cost).is_none()
    }

    /// Pay `cost` atomically. On failure nothing is deducted.
    pub fn pay(&mut self, cost: &Cost) -> Result<(), Shortfall> {
        if let Some(shortfall) = self.shortfall(cost) {
            return Err(shortfall);
        }
        for (kind, amount) in cost.components() {
            match kind {
                ResourceKind::Common => self.mana -= amount,
                _ => {
                    if let Some(count) = self.typed.get_mut(&kind) {
                        *count -= amount;
                    }
                }
            }
        }
        Ok(())
    }

    /// Grow the mana counter by one, up to the cap. Returns the new value.
    pub fn grow_mana(&mut self) -> u32 {
        self.mana = (self.mana + 1).min(self.max_mana);
        self.mana
    }

    /// Passive production of one resource card.
    pub fn untap_resource(&mut self, kind: ResourceKind) -> u32 {
        self.gain(kind, 1)
    }

    /// Add `amount` of a kind. `Common` goes to the capped mana counter.
    /// Returns the new value.
    pub fn gain(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        match kind {
            ResourceKind::Common => {
                self.mana = self.mana.saturating_add(amount).min(self.max_mana);
                self.mana
            }
            _ => {
                let count = self.typed.entry(kind).or_insert(0);
                *count = count.saturating_add(amount);
                *count
            }
        }
    }

    /// Remove up to `amount` mana. Returns how much was removed.
    pub fn drain_mana(&mut self, amount: u32) -> u32 {
        let drained = amount.min(self.mana);
        self.mana -= drained;
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_builder_merges_components() {
        let cost = Cost::common(2).with(ResourceKind::Common, 1).with(ResourceKind::Aether, 0);

        assert_eq!(cost.get(ResourceKind::Common), 3);
        assert_eq!(cost.components().count(), 1);
        assert!(Cost::free().is_free());
        assert_eq!(Cost::free().to_string(), "{}");
    }

    #[test]
    fn test_can_afford_counts_mana_as_common() {
        let pool = ResourcePool::new(10).with_mana(3).with_typed(ResourceKind::Iron, 1);

        assert!(pool.can_afford(&Cost::common(3)));
        assert!(!pool.can_afford(&Cost::common(4)));
        assert!(pool.can_afford(&Cost::common(2).with(ResourceKind::Iron, 1)));
        assert!(!pool.can_afford(&Cost::free().with(ResourceKind::Crystal, 1)));
        assert!(pool.can_afford(&Cost::free()));
    }

    #[test]
    fn test_pay_deducts_every_component() {
        let mut pool = ResourcePool::new(10).with_mana(5).with_typed(ResourceKind::Biomass, 2);

        pool.pay(&Cost::common(3).with(ResourceKind::Biomass, 2)).unwrap();

        assert_eq!(pool.mana(), 2);
        assert_eq!(pool.available(ResourceKind::Biomass), 0);
    }

    #[test]
    fn test_failed_pay_is_atomic() {
        let mut pool = ResourcePool::new(10).with_mana(5).with_typed(ResourceKind::Iron, 1);
        let before = pool.clone();

        let err = pool
            .pay(&Cost::common(2).with(ResourceKind::Iron, 2))
            .unwrap_err();

        assert_eq!(
            err,
            Shortfall { kind: ResourceKind::Iron, required: 2, available: 1 }
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn test_exact_payment_exhausts_cost() {
        let mut pool = ResourcePool::new(10).with_mana(3);
        let cost = Cost::common(3);

        assert!(pool.can_afford(&cost));
        pool.pay(&cost).unwrap();
        assert!(!pool.can_afford(&cost));
    }

    #[test]
    fn test_grow_mana_caps() {
        let mut pool = ResourcePool::new(2);

        assert_eq!(pool.grow_mana(), 1);
        assert_eq!(pool.grow_mana(), 2);
        assert_eq!(pool.grow_mana(), 2);
    }

    #[test]
    fn test_untap_resource_and_drain() {
        let mut pool = ResourcePool::new(10).with_mana(4);

        assert_eq!(pool.untap_resource(ResourceKind::Crystal), 1);
        assert_eq!(pool.untap_resource(ResourceKind::Crystal), 2);
        assert_eq!(pool.drain_mana(3), 3);
        assert_eq!(pool.drain_mana(3), 1);
        assert_eq!(pool.mana(), 0);
    }
}
