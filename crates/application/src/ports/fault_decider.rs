//! Port for the per-request fault decision

#[cfg(test)]
use mockall::automock;

/// Decides whether the current request should fail on purpose
///
/// Called exactly once per data-path request, before the dependency is
/// contacted.
#[cfg_attr(test, automock)]
pub trait FaultDecider: Send + Sync {
    /// `true` when a synthetic failure should be injected
    fn decide(&self) -> bool;
}

/// Decider with a fixed answer, for deterministic tests and for switching
/// injection off entirely
#[derive(Debug, Clone, Copy)]
pub struct FixedFaultDecider {
    inject: bool,
}

impl FixedFaultDecider {
    /// Inject on every request
    #[must_use]
    pub const fn always() -> Self {
        Self { inject: true }
    }

    /// Never inject
    #[must_use]
    pub const fn never() -> Self {
        Self { inject: false }
    }
}

impl FaultDecider for FixedFaultDecider {
    fn decide(&self) -> bool {
        self.inject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn FaultDecider>();
    }

    #[test]
    fn always_injects() {
        let decider = FixedFaultDecider::always();
        assert!((0..10).all(|_| decider.decide()));
    }

    #[test]
    fn never_injects() {
        let decider = FixedFaultDecider::never();
        assert!((0..10).all(|_| !decider.decide()));
    }
}
