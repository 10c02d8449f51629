//! # pageshell Regions
//!
//! The three managed areas of the page, looked up by fixed selectors. A
//! region with no matching node is valid: inserting after it or subscribing
//! to it does nothing.
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dom::error::DomError;
use crate::dom::{DomCapability, NodeSet};
use crate::event::Subscription;

/// Named UI region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionId {
    /// Application panel
    App,
    /// Navigation bar
    Nav,
    /// Message bar
    MessageBar,
}

impl RegionId {
    /// Every region, in population order.
    pub const ALL: [RegionId; 3] = [RegionId::App, RegionId::Nav, RegionId::MessageBar];

    /// Fixed selector identifying the region.
    pub fn selector(&self) -> &'static str {
        match self {
            RegionId::App => "#app",
            RegionId::Nav => "#nav",
            RegionId::MessageBar => "#message_bar",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RegionId::App => "app",
            RegionId::Nav => "nav",
            RegionId::MessageBar => "message_bar",
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RegionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegionId::ALL
            .into_iter()
            .find(|id| id.name() == s || id.selector() == s)
            .ok_or_else(|| format!("unknown region '{}' (expected app, nav or message_bar)", s))
    }
}

/// A resolved region: its id plus the node set its selector matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    id: RegionId,
    nodes: NodeSet,
}

impl Region {
    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    /// True when the selector matched nothing.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Resolves and caches regions and owns their event subscriptions.
pub struct RegionRegistry {
    dom: Rc<dyn DomCapability>,
    regions: RefCell<HashMap<RegionId, Region>>,
    subscriptions: RefCell<HashMap<RegionId, Vec<Subscription>>>,
}

impl fmt::Debug for RegionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionRegistry")
         .field("regions", &self.regions.borrow())
         .field("subscriptions", &self.subscriptions.borrow())
         .finish_non_exhaustive()
    }
}

impl RegionRegistry {
    pub fn new(dom: Rc<dyn DomCapability>) -> Self {
        Self {
            dom,
            regions: RefCell::new(HashMap::new()),
            subscriptions: RefCell::new(HashMap::new()),
        }
    }

    /// Look up a region.
    ///
    /// Only lookups made once the document is parsed are cached; those stay
    /// fixed for the life of the registry. While the document is loading every
    /// call queries again, so an early lookup cannot pin a partial node set.
    pub fn resolve(&self, id: RegionId) -> Result<Region, DomError> {
        if let Some(region) = self.regions.borrow().get(&id) {
            return Ok(region.clone());
        }
        let nodes = self.dom.select(id.selector())?;
        if nodes.is_empty() {
            log::debug!("Region '{}' matched no nodes for selector '{}'", id, id.selector());
        }
        let region = Region { id, nodes };
        if self.dom.ready_state().is_parsed() {
            self.regions.borrow_mut().insert(id, region.clone());
        }
        Ok(region)
    }

    /// Insert `markup` after every node of `region`. Returns the insertion count.
    pub fn insert_after(&self, region: &Region, markup: &str) -> Result<usize, DomError> {
        let inserted = self.dom.insert_after(region.nodes(), markup)?;
        log::debug!("Inserted content after {} node(s) of region '{}'", inserted, region.id());
        Ok(inserted)
    }

    /// Hand ownership of `subscription` to region `id`.
    pub fn attach(&self, id: RegionId, subscription: Subscription) {
        self.subscriptions.borrow_mut().entry(id).or_default().push(subscription);
    }

    /// Number of subscriptions owned by region `id`.
    pub fn subscription_count(&self, id: RegionId) -> usize {
        self.subscriptions.borrow().get(&id).map_or(0, Vec::len)
    }

    /// Detach every subscription owned by region `id`.
    ///
    /// Returns the number of listeners removed.
    pub fn teardown(&self, id: RegionId) -> usize {
        let subscriptions = self.subscriptions.borrow_mut().remove(&id).unwrap_or_default();
        let removed = subscriptions.into_iter().map(Subscription::unsubscribe).sum();
        if removed > 0 {
            log::debug!("Tore down region '{}': {} listener(s) removed", id, removed);
        }
        removed
    }
}
