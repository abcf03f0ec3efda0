use crate::pool::ConnectionPool;
use fdfs_core::{Circle, Connection, FdfsError, Result, Timeouts};
use log::{debug, warn};
use tracker::TrackerClient;

/// Resolves the storage nodes for a file and opens `pool_size` connections
/// across them.
///
/// Nodes are drawn round-robin, at most `pool_size + 1` times so that one
/// failed node can be skipped. Failed connects are logged and skipped; if the
/// pool still is not full the whole download is aborted.
pub fn fill_fetch_pool(
    tracker: &dyn TrackerClient,
    timeouts: &Timeouts,
    pool_size: usize,
    group: &str,
    remote: &str,
) -> Result<ConnectionPool> {
    debug!("open connection...");
    let storages = tracker.fetch_storages(group, remote)?;
    if storages.is_empty() {
        return Err(FdfsError::InvalidArgument(format!(
            "no storage endpoints for {}/{}",
            group, remote
        )));
    }

    let mut circle = Circle::new(storages)?;
    let mut pool = ConnectionPool::new(pool_size);
    for _ in 0..=pool.capacity() {
        if pool.is_full() {
            break;
        }
        let endpoint = circle.advance();
        match Connection::open(endpoint, timeouts) {
            Ok(connection) => {
                if let Err(extra) = pool.put(connection) {
                    extra.close();
                }
            }
            Err(e) => warn!("new connection to storage {} failed: {}", endpoint, e),
        }
    }

    if !pool.is_full() {
        return Err(FdfsError::PoolNotFilled {
            established: pool.len(),
            capacity: pool.capacity(),
        });
    }
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdfs_core::Endpoint;
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Listed(Vec<Endpoint>, AtomicUsize);

    impl TrackerClient for Listed {
        fn fetch_storages(&self, _group: &str, _remote: &str) -> Result<Vec<Endpoint>> {
            self.1.fetch_add(1, Ordering::SeqCst);
            Ok(self.0.clone())
        }
    }

    fn quick() -> Timeouts {
        Timeouts {
            connect: Duration::from_millis(500),
            read: Duration::from_millis(500),
        }
    }

    fn live() -> (TcpListener, Endpoint) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, Endpoint::new("127.0.0.1", port))
    }

    fn dead() -> Endpoint {
        live().1
    }

    #[test]
    fn test_fill_pool_across_nodes() {
        let (_l1, a) = live();
        let (_l2, b) = live();
        let tracker = Listed(vec![a.clone(), b.clone()], AtomicUsize::new(0));

        let mut pool = fill_fetch_pool(&tracker, &quick(), 3, "group1", "f").unwrap();
        assert_eq!(pool.len(), 3);
        let order: Vec<Endpoint> = std::iter::from_fn(|| pool.get())
            .map(|c| c.endpoint().clone())
            .collect();
        assert_eq!(order, vec![a.clone(), b, a]);
        assert_eq!(tracker.1.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fill_pool_skips_one_dead_node() {
        let down = dead();
        let (_listener, up) = live();
        let tracker = Listed(vec![down, up.clone()], AtomicUsize::new(0));

        let pool = fill_fetch_pool(&tracker, &quick(), 1, "group1", "f").unwrap();
        assert!(pool.is_full());
    }

    #[test]
    fn test_fill_pool_not_filled() {
        let down = dead();
        let (_listener, up) = live();
        let tracker = Listed(vec![down, up], AtomicUsize::new(0));

        let result = fill_fetch_pool(&tracker, &quick(), 2, "group1", "f");
        assert!(matches!(
            result,
            Err(FdfsError::PoolNotFilled {
                established: 1,
                capacity: 2
            })
        ));
    }

    #[test]
    fn test_fill_pool_without_storages() {
        let tracker = Listed(Vec::new(), AtomicUsize::new(0));
        let result = fill_fetch_pool(&tracker, &quick(), 1, "group1", "f");
        assert!(matches!(result, Err(FdfsError::InvalidArgument(_))));
    }
}
