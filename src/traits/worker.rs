// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// A long-running background loop with a cooperative stop flag.
///
/// `request_stop` never interrupts in-flight work; the loop notices the flag
/// on its next iteration and `is_stopped` turns true once it has exited.
pub trait Worker: Send + Sync {
    fn name(&self) -> &str;

    fn request_stop(&self);

    fn is_stopped(&self) -> bool;
}
