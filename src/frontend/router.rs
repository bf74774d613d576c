//! Round-robin upstream selection.
//!
//! One fixed list and one cursor per pool, shared by every request the
//! frontend serves. There is no health checking: a dead upstream keeps its
//! turn and the requests routed to it fail.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pool {
    Catalog,
    Order,
}

struct Upstreams {
    addrs: Vec<String>,
    cursor: AtomicUsize,
}

impl Upstreams {
    fn new(addrs: Vec<String>) -> Self {
        Self {
            addrs,
            cursor: AtomicUsize::new(0),
        }
    }

    fn next(&self) -> Option<&str> {
        if self.addrs.is_empty() {
            return None;
        }
        let turn = self.cursor.fetch_add(1, Ordering::Relaxed);
        Some(&self.addrs[turn % self.addrs.len()])
    }
}

pub struct RequestRouter {
    catalog: Upstreams,
    order: Upstreams,
}

impl RequestRouter {
    pub fn new(catalog: Vec<String>, order: Vec<String>) -> Self {
        Self {
            catalog: Upstreams::new(catalog),
            order: Upstreams::new(order),
        }
    }

    /// The next address in `pool`, wrapping around. `None` for an empty pool.
    pub fn next_upstream(&self, pool: Pool) -> Option<&str> {
        let upstream = self.pool(pool).next();
        tracing::debug!("Routing {:?} request to {:?}", pool, upstream);
        upstream
    }

    fn pool(&self, pool: Pool) -> &Upstreams {
        match pool {
            Pool::Catalog => &self.catalog,
            Pool::Order => &self.order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn two_node_router() -> RequestRouter {
        RequestRouter::new(
            vec!["http://catalog-a".to_string(), "http://catalog-b".to_string()],
            vec!["http://order-a".to_string(), "http://order-b".to_string()],
        )
    }

    #[test]
    fn test_round_robin_alternates() {
        let router = two_node_router();

        assert_eq!(router.next_upstream(Pool::Catalog), Some("http://catalog-a"));
        assert_eq!(router.next_upstream(Pool::Catalog), Some("http://catalog-b"));
        assert_eq!(router.next_upstream(Pool::Catalog), Some("http://catalog-a"));
    }

    #[test]
    fn test_pools_have_independent_cursors() {
        let router = two_node_router();

        assert_eq!(router.next_upstream(Pool::Catalog), Some("http://catalog-a"));
        assert_eq!(router.next_upstream(Pool::Order), Some("http://order-a"));
        assert_eq!(router.next_upstream(Pool::Order), Some("http://order-b"));
        assert_eq!(router.next_upstream(Pool::Catalog), Some("http://catalog-b"));
    }

    #[test]
    fn test_even_split_over_n_calls() {
        for n in [1usize, 2, 7, 10, 33] {
            let router = two_node_router();
            let mut counts: HashMap<String, usize> = HashMap::new();
            for _ in 0..n {
                let addr = router.next_upstream(Pool::Catalog).unwrap().to_string();
                *counts.entry(addr).or_default() += 1;
            }

            for count in counts.values() {
                assert!(*count == n / 2 || *count == n.div_ceil(2));
            }
        }
    }

    #[test]
    fn test_empty_pool_returns_none() {
        let router = RequestRouter::new(vec![], vec!["http://order-a".to_string()]);
        assert_eq!(router.next_upstream(Pool::Catalog), None);
        assert_eq!(router.next_upstream(Pool::Order), Some("http://order-a"));
    }

    #[test]
    fn test_cursor_is_shared_across_threads() {
        let router = Arc::new(two_node_router());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let router = router.clone();
                std::thread::spawn(move || {
                    let mut a = 0usize;
                    for _ in 0..250 {
                        if router.next_upstream(Pool::Catalog) == Some("http://catalog-a") {
                            a += 1;
                        }
                    }
                    a
                })
            })
            .collect();

        let total_a: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total_a, 500);
    }
}
