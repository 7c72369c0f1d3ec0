//! Last-write-wins rebuild coordination
//!
//! A rebuild is triggered whenever the input step sequence changes. Rebuilds
//! are whole-replacement, and the most recent input always wins: a build
//! still in flight when a newer input arrives is superseded, and its late
//! result must never overwrite the newer one. Tickets order rebuilds; input
//! digests let an identical resubmission skip the rebuild while no newer
//! build is in flight.

use std::sync::Mutex;

use tracing::debug;

/// Admission token for one rebuild. Consumed by [`RebuildCoordinator::install`].
#[derive(Debug)]
pub struct RebuildTicket {
    serial: u64,
    digest: String,
}

impl RebuildTicket {
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }
}

struct Slot<T> {
    serial: u64,
    digest: String,
    value: T,
}

/// Serial issuance and the installed slot share one lock, so a skip
/// decision always sees both consistently.
struct CoordinatorState<T> {
    last_issued: u64,
    installed: Option<Slot<T>>,
}

/// Orders rebuilds so the newest input always wins.
///
/// Tickets are issued from a monotonic counter; a finished build installs
/// only while no build with a higher serial has installed before it.
pub struct RebuildCoordinator<T> {
    state: Mutex<CoordinatorState<T>>,
}

impl<T> Default for RebuildCoordinator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RebuildCoordinator<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CoordinatorState {
                last_issued: 0,
                installed: None,
            }),
        }
    }

    /// Claim a ticket for rebuilding the input identified by `digest`.
    ///
    /// Returns `None` when that exact input is already installed and no
    /// newer ticket is outstanding, in which case no rebuild is needed.
    pub fn begin(&self, digest: &str) -> Option<RebuildTicket> {
        let mut state = self.state.lock().unwrap();
        if let Some(slot) = state.installed.as_ref() {
            // Skip only while the installed build is also the newest issued;
            // an outstanding ticket could still install a different input.
            if slot.digest == digest && slot.serial == state.last_issued {
                debug!("begin: digest {} already installed, skipping", digest);
                return None;
            }
        }
        state.last_issued += 1;
        let serial = state.last_issued;
        debug!("begin: ticket {} for digest {}", serial, digest);
        Some(RebuildTicket {
            serial,
            digest: digest.to_string(),
        })
    }

    /// Install a finished build under its ticket.
    ///
    /// Returns `false` when a build with a newer ticket installed first; the
    /// stale value is dropped unseen.
    pub fn install(&self, ticket: RebuildTicket, value: T) -> bool {
        let mut state = self.state.lock().unwrap();
        if let Some(slot) = state.installed.as_ref() {
            if slot.serial > ticket.serial {
                debug!(
                    "install: ticket {} superseded by {}, dropping",
                    ticket.serial, slot.serial
                );
                return false;
            }
        }
        state.installed = Some(Slot {
            serial: ticket.serial,
            digest: ticket.digest,
            value,
        });
        true
    }

    /// Digest of the currently installed input, if any.
    pub fn current_digest(&self) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.installed.as_ref().map(|slot| slot.digest.clone())
    }
}

impl<T: Clone> RebuildCoordinator<T> {
    /// Clone of the currently installed value, if any.
    pub fn current(&self) -> Option<T> {
        let state = self.state.lock().unwrap();
        state.installed.as_ref().map(|slot| slot.value.clone())
    }
}
