//! Route grouper.

use crate::item::{Item, RouteKey};
use std::collections::HashMap;

/// Items sharing one route, in input order.
#[derive(Debug, Clone)]
pub struct RouteBucket {
    pub route: RouteKey,
    pub items: Vec<Item>,
}

/// Route buckets in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct RouteBuckets {
    buckets: Vec<RouteBucket>,
    index: HashMap<RouteKey, usize>,
}

impl RouteBuckets {
    /// Appends `item` to its route's bucket, opening the bucket if needed.
    pub fn push(&mut self, item: Item) {
        match self.index.get(item.route()) {
            Some(&i) => self.buckets[i].items.push(item),
            None => {
                let route = item.route().clone();
                self.index.insert(route.clone(), self.buckets.len());
                self.buckets.push(RouteBucket {
                    route,
                    items: vec![item],
                });
            }
        }
    }

    /// Items on `route`, if any.
    pub fn get(&self, route: &RouteKey) -> Option<&[Item]> {
        self.index
            .get(route)
            .map(|&i| self.buckets[i].items.as_slice())
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of items across all buckets.
    pub fn item_count(&self) -> usize {
        self.buckets.iter().map(|b| b.items.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteBucket> {
        self.buckets.iter()
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteKey> {
        self.buckets.iter().map(|b| &b.route)
    }
}

impl IntoIterator for RouteBuckets {
    type Item = RouteBucket;
    type IntoIter = std::vec::IntoIter<RouteBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

impl FromIterator<Item> for RouteBuckets {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut buckets = Self::default();
        for item in iter {
            buckets.push(item);
        }
        buckets
    }
}

/// Partitions items into per-route buckets.
pub struct RouteGrouper;

impl RouteGrouper {
    /// Groups `items` by route, preserving relative order within each route.
    pub fn group<I>(items: I) -> RouteBuckets
    where
        I: IntoIterator<Item = Item>,
    {
        items.into_iter().collect()
    }
}
