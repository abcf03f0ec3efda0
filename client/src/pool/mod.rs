//! Bounded set of ready storage connections for one download.

use fdfs_core::Connection;
use log::trace;

/// Holds up to `capacity` open connections.
///
/// Connections still held when the pool is closed or dropped are shut down.
pub struct ConnectionPool {
    capacity: usize,
    slots: Vec<Connection>,
}

impl ConnectionPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Adds a connection, or hands it back when the pool is already full.
    pub fn put(&mut self, connection: Connection) -> Result<(), Connection> {
        if self.is_full() {
            return Err(connection);
        }
        self.slots.push(connection);
        Ok(())
    }

    /// Removes and returns one connection.
    pub fn get(&mut self) -> Option<Connection> {
        if self.slots.is_empty() {
            None
        } else {
            Some(self.slots.remove(0))
        }
    }

    /// Whether the pool holds as many connections as its capacity.
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Closes every connection still in the pool.
    pub fn close_all(&mut self) {
        for connection in self.slots.drain(..) {
            trace!("closing pooled connection to {}", connection.endpoint());
            connection.close();
        }
    }
}

impl Drop for ConnectionPool {
    fn drop(&mut self) {
        self.close_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdfs_core::{Endpoint, Timeouts};
    use std::net::TcpListener;

    fn open_many(listener: &TcpListener, n: usize) -> Vec<Connection> {
        let port = listener.local_addr().unwrap().port();
        let endpoint = Endpoint::new("127.0.0.1", port);
        (0..n)
            .map(|_| Connection::open(&endpoint, &Timeouts::default()).unwrap())
            .collect()
    }

    #[test]
    fn test_pool_fills_to_capacity() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut pool = ConnectionPool::new(2);
        let mut connections = open_many(&listener, 3).into_iter();

        assert!(!pool.is_full());
        assert!(pool.put(connections.next().unwrap()).is_ok());
        assert!(pool.put(connections.next().unwrap()).is_ok());
        assert!(pool.is_full());
        assert!(pool.put(connections.next().unwrap()).is_err());
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn test_get_never_repeats() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut pool = ConnectionPool::new(2);
        for connection in open_many(&listener, 2) {
            pool.put(connection).unwrap();
        }

        let first = pool.get().unwrap();
        let second = pool.get().unwrap();
        assert!(pool.get().is_none());
        assert_ne!(first.local_addr().unwrap(), second.local_addr().unwrap());
        drop((first, second));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_close_all_empties_pool() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut pool = ConnectionPool::new(3);
        for connection in open_many(&listener, 3) {
            pool.put(connection).unwrap();
        }
        pool.close_all();
        assert!(pool.is_empty());
        assert!(!pool.is_full());
    }
}
