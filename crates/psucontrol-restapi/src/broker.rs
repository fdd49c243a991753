// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of PsuControl RestAPI.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! PSU capability traits and the in-process broker that routes to a registered backend

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Generic PSU switching capability the host calls without knowing the transport
pub trait PsuControl: Send + Sync {
    /// Switch the PSU on. Outcome is not reported; poll [`PsuControl::get_psu_state`].
    fn turn_psu_on(&self);

    /// Switch the PSU off
    fn turn_psu_off(&self);

    /// Current PSU state, `false` whenever it cannot be determined
    fn get_psu_state(&self) -> bool;
}

/// Host subsystem that accepts a PSU backend
pub trait PsuBroker: Send + Sync {
    /// Older brokers cannot take plugin registrations
    fn supports_registration(&self) -> bool {
        true
    }

    /// Make `plugin` the active PSU backend
    fn register_plugin(&self, plugin: Arc<dyn PsuControl>);
}

/// Routes capability calls to whichever backend registered last
#[derive(Default)]
pub struct PsuControlBroker {
    backend: RwLock<Option<Arc<dyn PsuControl>>>,
}

impl std::fmt::Debug for PsuControlBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PsuControlBroker")
            .field("has_backend", &self.has_backend())
            .finish()
    }
}

impl PsuControlBroker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_backend(&self) -> bool {
        self.backend.read().is_some()
    }

    fn backend(&self) -> Option<Arc<dyn PsuControl>> {
        self.backend.read().clone()
    }

    pub fn turn_on(&self) {
        match self.backend() {
            Some(backend) => backend.turn_psu_on(),
            None => warn!("No PSU backend registered; ignoring turn on"),
        }
    }

    pub fn turn_off(&self) {
        match self.backend() {
            Some(backend) => backend.turn_psu_off(),
            None => warn!("No PSU backend registered; ignoring turn off"),
        }
    }

    pub fn get_state(&self) -> bool {
        match self.backend() {
            Some(backend) => backend.get_psu_state(),
            None => {
                debug!("No PSU backend registered; reporting off");
                false
            }
        }
    }
}

impl PsuBroker for PsuControlBroker {
    fn register_plugin(&self, plugin: Arc<dyn PsuControl>) {
        let mut backend = self.backend.write();
        if backend.is_some() {
            info!("Replacing registered PSU backend");
        } else {
            info!("PSU backend registered");
        }
        *backend = Some(plugin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    #[derive(Default)]
    struct FakeSwitch {
        on: AtomicBool,
        calls: AtomicU32,
    }

    impl PsuControl for FakeSwitch {
        fn turn_psu_on(&self) {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.on.store(true, Ordering::Relaxed);
        }

        fn turn_psu_off(&self) {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.on.store(false, Ordering::Relaxed);
        }

        fn get_psu_state(&self) -> bool {
            self.on.load(Ordering::Relaxed)
        }
    }

    #[test]
    fn test_empty_broker() {
        let broker = PsuControlBroker::new();
        assert!(!broker.has_backend());

        broker.turn_on();
        broker.turn_off();
        assert!(!broker.get_state());
    }

    #[test]
    fn test_routes_to_registered_backend() {
        let broker = PsuControlBroker::new();
        let switch = Arc::new(FakeSwitch::default());
        broker.register_plugin(switch.clone());

        assert!(broker.has_backend());
        broker.turn_on();
        assert!(broker.get_state());
        broker.turn_off();
        assert!(!broker.get_state());
        assert_eq!(switch.calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_last_registration_wins() {
        let broker = PsuControlBroker::new();
        let first = Arc::new(FakeSwitch::default());
        let second = Arc::new(FakeSwitch::default());
        broker.register_plugin(first.clone());
        broker.register_plugin(second.clone());

        broker.turn_on();
        assert_eq!(first.calls.load(Ordering::Relaxed), 0);
        assert_eq!(second.calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_supports_registration_by_default() {
        assert!(PsuControlBroker::new().supports_registration());
    }
}
