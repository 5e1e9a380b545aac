#![allow(dead_code)]

//! In-memory stub backing for exercising the capability layer, with
//! per-method call counting so tests can assert that failed rights checks
//! perform no I/O.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use virtual_inode::types::{
    Addrinfo, AddrinfoHint, AddressFamily, Errno, Fdflags, Filestat, Filetype, Fstflags, Oflags,
    Rights, SockType, Timestamp,
};
use virtual_inode::{AccessMode, Node, VirtualNode};

#[derive(Debug, Default)]
pub struct CallLog {
    pub opens: AtomicUsize,
    pub stats: AtomicUsize,
    pub set_times: AtomicUsize,
    pub readlinks: AtomicUsize,
    pub mkdirs: AtomicUsize,
    pub rmdirs: AtomicUsize,
    pub links: AtomicUsize,
    pub renames: AtomicUsize,
    pub symlinks: AtomicUsize,
    pub unlinks: AtomicUsize,
    pub accepts: AtomicUsize,
    pub addrinfos: AtomicUsize,
}

impl CallLog {
    pub fn total(&self) -> usize {
        [
            &self.opens,
            &self.stats,
            &self.set_times,
            &self.readlinks,
            &self.mkdirs,
            &self.rmdirs,
            &self.links,
            &self.renames,
            &self.symlinks,
            &self.unlinks,
            &self.accepts,
            &self.addrinfos,
        ]
        .iter()
        .map(|counter| counter.load(Ordering::SeqCst))
        .sum()
    }
}

pub type EntryRef = Arc<Mutex<Entry>>;

#[derive(Debug)]
pub enum Entry {
    File { content: Vec<u8> },
    Symlink { target: String },
    Dir { entries: BTreeMap<String, EntryRef> },
}

pub fn file() -> EntryRef {
    Arc::new(Mutex::new(Entry::File {
        content: Vec::new(),
    }))
}

pub fn file_with(content: &[u8]) -> EntryRef {
    Arc::new(Mutex::new(Entry::File {
        content: content.to_vec(),
    }))
}

pub fn symlink(target: &str) -> EntryRef {
    Arc::new(Mutex::new(Entry::Symlink {
        target: target.to_owned(),
    }))
}

pub fn dir(entries: &[(&str, EntryRef)]) -> EntryRef {
    Arc::new(Mutex::new(Entry::Dir {
        entries: entries
            .iter()
            .map(|(name, entry)| ((*name).to_owned(), entry.clone()))
            .collect(),
    }))
}

/// One handle into the stub tree.
#[derive(Debug)]
pub struct StubNode {
    entry: EntryRef,
    filetype: Filetype,
    log: Arc<CallLog>,
}

impl StubNode {
    pub fn wrap(entry: EntryRef, log: Arc<CallLog>) -> Box<dyn Node> {
        let filetype = match &*entry.lock().unwrap() {
            Entry::File { .. } => Filetype::RegularFile,
            Entry::Symlink { .. } => Filetype::SymbolicLink,
            Entry::Dir { .. } => Filetype::Directory,
        };
        Box::new(Self {
            entry,
            filetype,
            log,
        })
    }

    fn lookup(&self, path: &str) -> Result<EntryRef, Errno> {
        if path == "." {
            return Ok(self.entry.clone());
        }
        let guard = self.entry.lock().unwrap();
        let Entry::Dir { entries } = &*guard else {
            return Err(Errno::Notdir);
        };
        entries.get(path).cloned().ok_or(Errno::Noent)
    }
}

fn stat_of(entry: &EntryRef) -> Filestat {
    match &*entry.lock().unwrap() {
        Entry::File { content } => Filestat {
            st_filetype: Filetype::RegularFile,
            st_nlink: 1,
            st_size: content.len() as u64,
            ..Filestat::default()
        },
        Entry::Symlink { target } => Filestat {
            st_filetype: Filetype::SymbolicLink,
            st_nlink: 1,
            st_size: target.len() as u64,
            ..Filestat::default()
        },
        Entry::Dir { .. } => Filestat {
            st_filetype: Filetype::Directory,
            st_nlink: 1,
            ..Filestat::default()
        },
    }
}

impl Node for StubNode {
    fn filetype(&self) -> Filetype {
        self.filetype
    }

    fn path_open(
        &self,
        path: &str,
        open_flags: Oflags,
        _fd_flags: Fdflags,
        _access: AccessMode,
    ) -> Result<Box<dyn Node>, Errno> {
        self.log.opens.fetch_add(1, Ordering::SeqCst);
        if path.is_empty() || path == "." {
            return Ok(Self::wrap(self.entry.clone(), self.log.clone()));
        }
        let mut guard = self.entry.lock().unwrap();
        let Entry::Dir { entries } = &mut *guard else {
            return Err(Errno::Notdir);
        };
        if let Some(child) = entries.get(path).cloned() {
            if open_flags.contains(Oflags::CREAT | Oflags::EXCL) {
                return Err(Errno::Exist);
            }
            if open_flags.contains(Oflags::DIRECTORY)
                && !matches!(&*child.lock().unwrap(), Entry::Dir { .. })
            {
                return Err(Errno::Notdir);
            }
            if open_flags.contains(Oflags::TRUNC) {
                if let Entry::File { content } = &mut *child.lock().unwrap() {
                    content.clear();
                }
            }
            Ok(Self::wrap(child, self.log.clone()))
        } else {
            if !open_flags.contains(Oflags::CREAT) {
                return Err(Errno::Noent);
            }
            let child = file();
            entries.insert(path.to_owned(), child.clone());
            Ok(Self::wrap(child, self.log.clone()))
        }
    }

    fn path_filestat_get(&self, path: &str) -> Result<Filestat, Errno> {
        self.log.stats.fetch_add(1, Ordering::SeqCst);
        if path.is_empty() {
            return Err(Errno::Noent);
        }
        let entry = self.lookup(path)?;
        Ok(stat_of(&entry))
    }

    fn path_filestat_set_times(
        &self,
        path: &str,
        _atim: Timestamp,
        _mtim: Timestamp,
        _fst_flags: Fstflags,
    ) -> Result<(), Errno> {
        self.log.set_times.fetch_add(1, Ordering::SeqCst);
        self.lookup(path)?;
        Ok(())
    }

    fn path_create_directory(&self, path: &str) -> Result<(), Errno> {
        self.log.mkdirs.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.entry.lock().unwrap();
        let Entry::Dir { entries } = &mut *guard else {
            return Err(Errno::Notdir);
        };
        if path == "." || entries.contains_key(path) {
            return Err(Errno::Exist);
        }
        entries.insert(path.to_owned(), dir(&[]));
        Ok(())
    }

    fn path_remove_directory(&self, path: &str) -> Result<(), Errno> {
        self.log.rmdirs.fetch_add(1, Ordering::SeqCst);
        let target = self.lookup(path)?;
        {
            let guard = target.lock().unwrap();
            let Entry::Dir { entries } = &*guard else {
                return Err(Errno::Notdir);
            };
            if !entries.is_empty() {
                return Err(Errno::Notempty);
            }
        }
        let mut guard = self.entry.lock().unwrap();
        let Entry::Dir { entries } = &mut *guard else {
            return Err(Errno::Notdir);
        };
        entries.remove(path);
        Ok(())
    }

    fn path_link(&self, old_path: &str, new_dir: &dyn Node, new_path: &str) -> Result<(), Errno> {
        self.log.links.fetch_add(1, Ordering::SeqCst);
        let other = new_dir.downcast_ref::<StubNode>().ok_or(Errno::Xdev)?;
        let source = self.lookup(old_path)?;
        if matches!(&*source.lock().unwrap(), Entry::Dir { .. }) {
            return Err(Errno::Perm);
        }
        let mut guard = other.entry.lock().unwrap();
        let Entry::Dir { entries } = &mut *guard else {
            return Err(Errno::Notdir);
        };
        if entries.contains_key(new_path) {
            return Err(Errno::Exist);
        }
        entries.insert(new_path.to_owned(), source);
        Ok(())
    }

    fn path_rename(&self, old_path: &str, new_dir: &dyn Node, new_path: &str) -> Result<(), Errno> {
        self.log.renames.fetch_add(1, Ordering::SeqCst);
        let other = new_dir.downcast_ref::<StubNode>().ok_or(Errno::Xdev)?;
        let source = {
            let mut guard = self.entry.lock().unwrap();
            let Entry::Dir { entries } = &mut *guard else {
                return Err(Errno::Notdir);
            };
            entries.remove(old_path).ok_or(Errno::Noent)?
        };
        let mut guard = other.entry.lock().unwrap();
        let Entry::Dir { entries } = &mut *guard else {
            return Err(Errno::Notdir);
        };
        entries.insert(new_path.to_owned(), source);
        Ok(())
    }

    fn path_symlink(&self, old_path: &str, new_path: &str) -> Result<(), Errno> {
        self.log.symlinks.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.entry.lock().unwrap();
        let Entry::Dir { entries } = &mut *guard else {
            return Err(Errno::Notdir);
        };
        if entries.contains_key(new_path) {
            return Err(Errno::Exist);
        }
        entries.insert(new_path.to_owned(), symlink(old_path));
        Ok(())
    }

    fn path_readlink(&self, path: &str, buffer: &mut [u8]) -> Result<usize, Errno> {
        self.log.readlinks.fetch_add(1, Ordering::SeqCst);
        let entry = self.lookup(path)?;
        let guard = entry.lock().unwrap();
        let Entry::Symlink { target } = &*guard else {
            return Err(Errno::Inval);
        };
        let len = target.len().min(buffer.len());
        buffer[..len].copy_from_slice(&target.as_bytes()[..len]);
        Ok(len)
    }

    fn path_unlink_file(&self, path: &str) -> Result<(), Errno> {
        self.log.unlinks.fetch_add(1, Ordering::SeqCst);
        let target = self.lookup(path)?;
        if matches!(&*target.lock().unwrap(), Entry::Dir { .. }) {
            return Err(Errno::Isdir);
        }
        let mut guard = self.entry.lock().unwrap();
        let Entry::Dir { entries } = &mut *guard else {
            return Err(Errno::Notdir);
        };
        entries.remove(path);
        Ok(())
    }

    fn sock_accept(&self, _fd_flags: Fdflags) -> Result<Box<dyn Node>, Errno> {
        Err(Errno::Notsock)
    }

    fn get_addrinfo(
        &self,
        _node: &str,
        _service: &str,
        _hint: &AddrinfoHint,
        _max_results: usize,
    ) -> Result<Vec<Addrinfo>, Errno> {
        Err(Errno::Notsup)
    }
}

/// Stub socket handle; never path-addressed.
#[derive(Debug)]
pub struct StubSocket {
    pub log: Arc<CallLog>,
}

impl Node for StubSocket {
    fn filetype(&self) -> Filetype {
        Filetype::SocketStream
    }

    fn path_open(
        &self,
        _path: &str,
        _open_flags: Oflags,
        _fd_flags: Fdflags,
        _access: AccessMode,
    ) -> Result<Box<dyn Node>, Errno> {
        Err(Errno::Notdir)
    }

    fn path_filestat_get(&self, _path: &str) -> Result<Filestat, Errno> {
        Err(Errno::Notdir)
    }

    fn path_filestat_set_times(
        &self,
        _path: &str,
        _atim: Timestamp,
        _mtim: Timestamp,
        _fst_flags: Fstflags,
    ) -> Result<(), Errno> {
        Err(Errno::Notdir)
    }

    fn path_create_directory(&self, _path: &str) -> Result<(), Errno> {
        Err(Errno::Notdir)
    }

    fn path_remove_directory(&self, _path: &str) -> Result<(), Errno> {
        Err(Errno::Notdir)
    }

    fn path_link(&self, _old: &str, _new_dir: &dyn Node, _new: &str) -> Result<(), Errno> {
        Err(Errno::Notdir)
    }

    fn path_rename(&self, _old: &str, _new_dir: &dyn Node, _new: &str) -> Result<(), Errno> {
        Err(Errno::Notdir)
    }

    fn path_symlink(&self, _old: &str, _new: &str) -> Result<(), Errno> {
        Err(Errno::Notdir)
    }

    fn path_readlink(&self, _path: &str, _buffer: &mut [u8]) -> Result<usize, Errno> {
        Err(Errno::Notdir)
    }

    fn path_unlink_file(&self, _path: &str) -> Result<(), Errno> {
        Err(Errno::Notdir)
    }

    fn sock_accept(&self, _fd_flags: Fdflags) -> Result<Box<dyn Node>, Errno> {
        self.log.accepts.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StubSocket {
            log: self.log.clone(),
        }))
    }

    fn get_addrinfo(
        &self,
        node: &str,
        _service: &str,
        _hint: &AddrinfoHint,
        max_results: usize,
    ) -> Result<Vec<Addrinfo>, Errno> {
        self.log.addrinfos.fetch_add(1, Ordering::SeqCst);
        let canned = Addrinfo {
            family: AddressFamily::Inet4,
            socktype: SockType::Stream,
            address: "127.0.0.1:80".parse().unwrap(),
            canonname: Some(node.to_owned()),
        };
        Ok(std::iter::repeat_with(|| canned.clone())
            .take(max_results.min(1))
            .collect())
    }
}

/// Bind `root` as a preopened directory with the given rights.
pub fn preopen(
    root: &EntryRef,
    rights_base: Rights,
    rights_inheriting: Rights,
) -> (Arc<VirtualNode>, Arc<CallLog>) {
    let log = Arc::new(CallLog::default());
    let node = StubNode::wrap(root.clone(), log.clone());
    let vnode = VirtualNode::bind(node, rights_base, rights_inheriting, "/".to_owned())
        .expect("preopen root must be a directory");
    (vnode, log)
}

/// Bind `root` with every right granted.
pub fn preopen_all(root: &EntryRef) -> (Arc<VirtualNode>, Arc<CallLog>) {
    preopen(root, Rights::all(), Rights::all())
}
