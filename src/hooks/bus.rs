use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::context::RequestContext;
use super::point::{HookPoint, HookScope};

type Listener = Box<dyn Fn(&mut RequestContext) + Send + Sync>;

/// Listener table over typed lifecycle points.
///
/// Subscribed at bootstrap, sealed into an [`Arc`] alongside the registry,
/// then dispatched synchronously per request. Dispatch is fire-and-forget:
/// listener return values are ignored, so a listener influences the request
/// only by mutating the shared context. Type-scoped listeners run before
/// any-type listeners; registration order holds within each group.
#[derive(Default)]
pub struct HookBus {
    table: HashMap<HookPoint, Vec<(HookScope, Listener)>>,
}

impl fmt::Debug for HookBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookBus")
            .field("points", &self.table.len())
            .finish_non_exhaustive()
    }
}

impl HookBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a listener to a point, observing `scope`.
    pub fn subscribe(
        &mut self,
        point: HookPoint,
        scope: HookScope,
        listener: impl Fn(&mut RequestContext) + Send + Sync + 'static,
    ) {
        self.table
            .entry(point)
            .or_default()
            .push((scope, Box::new(listener)));
    }

    /// Fire every listener subscribed to `point` whose scope matches the
    /// context's type.
    pub fn dispatch(&self, point: HookPoint, ctx: &mut RequestContext) {
        let Some(listeners) = self.table.get(&point) else {
            return;
        };

        let mut matching: Vec<&(HookScope, Listener)> = listeners
            .iter()
            .filter(|(scope, _)| scope.matches(&ctx.type_name))
            .collect();
        if matching.is_empty() {
            return;
        }
        matching.sort_by(|a, b| b.0.specificity().cmp(&a.0.specificity()));

        debug!(
            point = %point.label(),
            type_name = %ctx.type_name,
            count = matching.len(),
            "Dispatching hook"
        );
        for (_, listener) in matching {
            listener(ctx);
        }
    }

    /// Seal the bus for the read-many phase.
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
