use std::{io, sync::Arc};

/// A handle whose written data can be flushed to stable storage.
///
/// Strategies only ever borrow targets; they never close or retain them.
pub trait SyncTarget {
    fn sync(&self) -> io::Result<()>;
}

impl SyncTarget for std::fs::File {
    fn sync(&self) -> io::Result<()> {
        self.sync_all()
    }
}

impl<T> SyncTarget for &T
where
    T: SyncTarget + ?Sized,
{
    fn sync(&self) -> io::Result<()> {
        (**self).sync()
    }
}

impl<T> SyncTarget for Arc<T>
where
    T: SyncTarget + ?Sized,
{
    fn sync(&self) -> io::Result<()> {
        (**self).sync()
    }
}
