#[cfg(feature = "loom")]
mod imp {
    pub(crate) use loom::{
        sync::{
            Condvar, Mutex,
            atomic::{AtomicU64, Ordering},
        },
        thread::JoinHandle,
    };
    pub(crate) use std::sync::Arc;
    use std::io;

    /// Loom threads carry no name and cannot fail to start.
    pub(crate) fn spawn_named<F>(_name: String, f: F) -> io::Result<JoinHandle<()>>
    where
        F: FnOnce() + Send + 'static,
    {
        Ok(loom::thread::spawn(f))
    }
}

#[cfg(not(feature = "loom"))]
mod imp {
    pub(crate) use std::{
        sync::{
            Arc, Condvar, Mutex,
            atomic::{AtomicU64, Ordering},
        },
        thread::JoinHandle,
    };
    use std::{io, thread};

    pub(crate) fn spawn_named<F>(name: String, f: F) -> io::Result<JoinHandle<()>>
    where
        F: FnOnce() + Send + 'static,
    {
        thread::Builder::new().name(name).spawn(f)
    }
}

pub(crate) use imp::*;
