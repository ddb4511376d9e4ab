use std::sync::{Mutex, MutexGuard, PoisonError};

use hashbrown::HashMap;
use log::trace;

/// Resolves numeric uids to account names.
///
/// Lookups go through the passwd database once per uid; results are memoised
/// for the lifetime of the resolver, which is shared by every scan worker.
#[derive(Debug, Default)]
pub struct OwnerResolver {
    cache: Mutex<HashMap<u32, String>>,
}

impl OwnerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name for `uid`, falling back to the decimal uid when the account has
    /// no passwd entry.
    pub fn resolve(&self, uid: u32) -> String {
        self.resolve_with(uid, lookup_user_name)
    }

    fn resolve_with(&self, uid: u32, lookup: impl FnOnce(u32) -> Option<String>) -> String {
        if let Some(name) = self.lock().get(&uid) {
            return name.clone();
        }

        // Lookup runs unlocked: passwd may be backed by a slow network service.
        let name = lookup(uid).unwrap_or_else(|| uid.to_string());
        trace!("[owner] uid {uid} -> {name}");

        self.lock().entry(uid).or_insert(name).clone()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<u32, String>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn cached_len(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(unix)]
fn lookup_user_name(uid: u32) -> Option<String> {
    use std::ffi::CStr;

    const INITIAL_BUF: usize = 1024;
    const MAX_BUF: usize = 1 << 20;

    let mut buf: Vec<libc::c_char> = vec![0; INITIAL_BUF];

    loop {
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();

        let rc = unsafe {
            libc::getpwuid_r(
                uid as libc::uid_t,
                &mut pwd,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };

        if rc == libc::ERANGE && buf.len() < MAX_BUF {
            buf.resize(buf.len() * 2, 0);
            continue;
        }

        if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
            return None;
        }

        // pw_name points into `buf`, which is still alive here.
        let name = unsafe { CStr::from_ptr(pwd.pw_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

#[cfg(not(unix))]
fn lookup_user_name(_uid: u32) -> Option<String> {
    None
}

#[cfg(test)]
#[path = "owner_tests.rs"]
mod tests;
