//! Cross-implementation fullscreen toggling for a single target element.
//!
//! The host (the embedding shell's document) exposes per-vendor request and
//! exit methods, any of which may be absent, plus the current fullscreen
//! element and a change-event feed per vendor event name. `toggle` walks the
//! vendor variants until one exists; observable state is derived only from
//! change events, never from a request's apparent success, so a silently
//! denied request simply leaves `is_fullscreen` false.

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use log::error;

use crate::events::{FullscreenChange, ListenerRegistry, Subscription};

/// Vendor API variants, tried in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    Standard,
    Webkit,
    Moz,
    Ms,
}

impl Vendor {
    pub const ALL: [Vendor; 4] = [Vendor::Standard, Vendor::Webkit, Vendor::Moz, Vendor::Ms];

    /// The change-event name the host fires for this vendor.
    pub fn change_event(&self) -> &'static str {
        match self {
            Vendor::Standard => "fullscreenchange",
            Vendor::Webkit => "webkitfullscreenchange",
            Vendor::Moz => "mozfullscreenchange",
            Vendor::Ms => "MSFullscreenChange",
        }
    }
}

/// What the embedding document must provide. A `None` from a request/exit
/// method means that vendor variant does not exist on this host.
pub trait FullscreenHost: Send + Sync {
    fn request_fullscreen(&self, vendor: Vendor, element_id: &str) -> Option<Result<()>>;
    fn exit_fullscreen(&self, vendor: Vendor) -> Option<Result<()>>;
    /// Id of the element currently in fullscreen, if any.
    fn fullscreen_element(&self) -> Option<String>;
    /// Change-event feed for one vendor event name.
    fn changes(&self, vendor: Vendor) -> &ListenerRegistry<FullscreenChange>;
}

struct Mounted {
    _subscriptions: Vec<Subscription<FullscreenChange>>,
}

/// Fullscreen capability for one target element: a reference to the element,
/// a derived boolean state, and a toggle.
pub struct FullscreenController {
    host: Arc<dyn FullscreenHost>,
    element_id: String,
    is_fullscreen: Arc<Mutex<bool>>,
    mounted: Mutex<Option<Mounted>>,
}

impl FullscreenController {
    pub fn new(host: Arc<dyn FullscreenHost>, element_id: impl Into<String>) -> Self {
        Self {
            host,
            element_id: element_id.into(),
            is_fullscreen: Arc::new(Mutex::new(false)),
            mounted: Mutex::new(None),
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        *self.is_fullscreen.lock().expect("fullscreen state poisoned")
    }

    /// Attaches the change listeners across all vendor event names, exactly
    /// once. `on_change` runs after every observed transition with the new
    /// state; the embedding wires it to the map's `invalidate_size`.
    pub fn mount(&self, on_change: impl Fn(bool) + Send + Sync + 'static) -> Result<()> {
        let mut mounted = self.mounted.lock().expect("mount state poisoned");
        if mounted.is_some() {
            bail!("fullscreen controller already mounted");
        }

        let on_change = Arc::new(on_change);
        let subscriptions = Vendor::ALL
            .iter()
            .map(|vendor| {
                let host = Arc::clone(&self.host);
                let element_id = self.element_id.clone();
                let state = Arc::clone(&self.is_fullscreen);
                let on_change = Arc::clone(&on_change);
                self.host.changes(*vendor).attach(move |_| {
                    let now = host
                        .fullscreen_element()
                        .is_some_and(|id| id == element_id);
                    *state.lock().expect("fullscreen state poisoned") = now;
                    on_change(now);
                })
            })
            .collect();

        *mounted = Some(Mounted {
            _subscriptions: subscriptions,
        });
        Ok(())
    }

    /// Detaches all change listeners.
    pub fn unmount(&self) {
        self.mounted.lock().expect("mount state poisoned").take();
    }

    /// Exits fullscreen if the host reports any fullscreen element,
    /// otherwise requests fullscreen on the target, trying vendor variants
    /// in order until one exists. Failures are logged, never surfaced.
    pub fn toggle(&self) {
        if self.host.fullscreen_element().is_some() {
            for vendor in Vendor::ALL {
                if let Some(result) = self.host.exit_fullscreen(vendor) {
                    if let Err(err) = result {
                        error!("Error exiting fullscreen: {err}");
                    }
                    return;
                }
            }
        } else {
            for vendor in Vendor::ALL {
                if let Some(result) = self.host.request_fullscreen(vendor, &self.element_id) {
                    if let Err(err) = result {
                        error!("Error attempting to enable full-screen mode: {err}");
                    }
                    return;
                }
            }
        }
    }
}

impl Drop for FullscreenController {
    fn drop(&mut self) {
        self.unmount();
    }
}
