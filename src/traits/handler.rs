// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::dispatch::DispatchContext;

/// An action run when its rule matches.
///
/// Returning `None` means "nothing to say"; the dispatcher posts nothing.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &DispatchContext) -> Option<String>;
}

impl<F> Handler for F
where
    F: Fn(&DispatchContext) -> Option<String> + Send + Sync,
{
    fn handle(&self, ctx: &DispatchContext) -> Option<String> {
        self(ctx)
    }
}
