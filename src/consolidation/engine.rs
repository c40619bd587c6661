//! First-fit consolidation engine.

use super::config::ConsolidationConfig;
use crate::container::{Container, ContainerSnapshot};
use crate::error::ConsolidationError;
use crate::grouping::{RouteBucket, RouteBuckets, RouteGrouper};
use crate::item::{ingest, Item, RawRecord, RejectedRecord, RouteKey};
use tracing::{debug, instrument};

/// Result of a consolidation run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConsolidationResult {
    /// Containers in route order (first appearance), then creation order.
    pub containers: Vec<ContainerSnapshot>,

    /// Number of distinct routes seen.
    pub route_count: usize,

    /// Number of items placed into containers.
    pub item_count: usize,

    /// Records skipped by ingestion. Empty when the engine was fed items.
    pub rejected: Vec<RejectedRecord>,
}

impl ConsolidationResult {
    /// Containers on `route`, in creation order.
    pub fn for_route<'a>(
        &'a self,
        route: &'a RouteKey,
    ) -> impl Iterator<Item = &'a ContainerSnapshot> + 'a {
        self.containers.iter().filter(move |c| &c.route == route)
    }
}

/// Greedy first-fit consolidation of items into containers.
///
/// For every route bucket:
///
/// 1. items are sorted by the configured [`SortSpec`](crate::ordering::SortSpec);
/// 2. the first item opens the bucket's first container;
/// 3. each following item goes into the first container, in creation
///    order, that admits it, or opens a new container.
///
/// Given the same input and configuration, the output is identical
/// across runs, with or without parallelism.
///
/// # Examples
///
/// ```
/// use u_consolidate::consolidation::{ConsolidationConfig, ConsolidationEngine};
/// use u_consolidate::item::RawRecord;
///
/// let record = |pickup: &str, volume: &str, date: &str| RawRecord {
///     pickup_location: Some(pickup.into()),
///     deliver_to_location: Some("DeliverA".into()),
///     total_volume: Some(volume.into()),
///     ready_date: Some(date.into()),
///     ..RawRecord::default()
/// };
///
/// let engine = ConsolidationEngine::new(ConsolidationConfig::default()).unwrap();
/// let result = engine.run_records(vec![
///     record("PickupA", "30", "01/01/2021"),
///     record("PickupA", "30", "01/04/2021"),
///     record("", "30", "01/04/2021"),
/// ]);
///
/// assert_eq!(result.containers.len(), 1);
/// assert_eq!(result.containers[0].total_volume, 60.0);
/// assert_eq!(result.rejected.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ConsolidationEngine {
    config: ConsolidationConfig,
}

impl ConsolidationEngine {
    /// Creates an engine, rejecting an invalid configuration up front.
    pub fn new(config: ConsolidationConfig) -> Result<Self, ConsolidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConsolidationConfig {
        &self.config
    }

    /// Consolidates validated items.
    #[instrument(skip_all, fields(sort = %self.config.sort))]
    pub fn run<I>(&self, items: I) -> ConsolidationResult
    where
        I: IntoIterator<Item = Item>,
    {
        let buckets = RouteGrouper::group(items);
        let route_count = buckets.len();
        let item_count = buckets.item_count();
        debug!(route_count, item_count, "grouped items by route");

        let containers: Vec<ContainerSnapshot> = self
            .consolidate_buckets(buckets)
            .into_iter()
            .flatten()
            .map(ContainerSnapshot::from)
            .collect();
        debug!(container_count = containers.len(), "consolidation finished");

        ConsolidationResult {
            containers,
            route_count,
            item_count,
            rejected: Vec::new(),
        }
    }

    /// Validates raw records, then consolidates the valid ones.
    ///
    /// Invalid records are reported in [`ConsolidationResult::rejected`].
    pub fn run_records<I>(&self, records: I) -> ConsolidationResult
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let report = ingest(records);
        let mut result = self.run(report.items);
        result.rejected = report.rejected;
        result
    }

    /// Consolidates the items of a single route.
    ///
    /// `items` must all share one route; items on another route are never
    /// admitted to an existing container and each opens its own.
    pub fn consolidate_route(&self, mut items: Vec<Item>) -> Vec<Container> {
        self.config.sort.sort(&mut items);

        let mut containers: Vec<Container> = Vec::new();
        'items: for item in items {
            let mut pending = item;
            for container in containers.iter_mut() {
                match container.try_merge(pending) {
                    Ok(()) => continue 'items,
                    Err(refused) => pending = refused,
                }
            }
            containers.push(Container::new(pending, self.config.limits));
        }
        containers
    }

    fn consolidate_bucket(&self, bucket: RouteBucket) -> Vec<Container> {
        let RouteBucket { route, items } = bucket;
        let item_count = items.len();
        let containers = self.consolidate_route(items);
        debug!(%route, item_count, container_count = containers.len(), "route consolidated");
        containers
    }

    #[cfg(feature = "parallel")]
    fn consolidate_buckets(&self, buckets: RouteBuckets) -> Vec<Vec<Container>> {
        use rayon::prelude::*;

        if !self.config.parallel {
            return self.consolidate_sequential(buckets);
        }
        let buckets: Vec<RouteBucket> = buckets.into_iter().collect();
        buckets
            .into_par_iter()
            .map(|bucket| self.consolidate_bucket(bucket))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn consolidate_buckets(&self, buckets: RouteBuckets) -> Vec<Vec<Container>> {
        self.consolidate_sequential(buckets)
    }

    fn consolidate_sequential(&self, buckets: RouteBuckets) -> Vec<Vec<Container>> {
        buckets
            .into_iter()
            .map(|bucket| self.consolidate_bucket(bucket))
            .collect()
    }
}
