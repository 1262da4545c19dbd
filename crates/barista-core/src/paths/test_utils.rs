//! Scoped `BARISTA_DATA_DIR` for path tests.

use std::env;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::platform::DATA_DIR_ENV;

static DATA_DIR_LOCK: Mutex<()> = Mutex::new(());

/// Points `BARISTA_DATA_DIR` at a directory until dropped, then puts the
/// previous value back. Tests holding one run one at a time.
pub struct DataDirGuard {
    previous: Option<String>,
    _lock: MutexGuard<'static, ()>,
}

impl DataDirGuard {
    #[allow(unsafe_code)]
    pub fn point_at(dir: &Path) -> Self {
        let lock = DATA_DIR_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = env::var(DATA_DIR_ENV).ok();
        // SAFETY: every writer of the variable holds DATA_DIR_LOCK.
        unsafe { env::set_var(DATA_DIR_ENV, dir) };
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for DataDirGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: the lock field is released only after this body returns.
        unsafe {
            match self.previous.take() {
                Some(value) => env::set_var(DATA_DIR_ENV, value),
                None => env::remove_var(DATA_DIR_ENV),
            }
        }
    }
}
