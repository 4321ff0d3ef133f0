//! `struct stat` / `struct tms` as the target's newlib lays them out.

use bitflags::bitflags;
use core::ffi::{c_long, c_ulong};

bitflags! {
    /// `st_mode` bits. Only the file-type field is ever produced here.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FileMode: u32 {
        const IFMT = 0o170000;
        const IFDIR = 0o040000;
        const IFCHR = 0o020000;
        const IFBLK = 0o060000;
        const IFREG = 0o100000;
        const IFLNK = 0o120000;
        const IFSOCK = 0o140000;
        const IFIFO = 0o010000;
    }
}

impl FileMode {
    /// The file-type field with permission bits masked off.
    pub fn file_type(&self) -> FileMode {
        *self & FileMode::IFMT
    }

    pub fn is_char_device(&self) -> bool {
        self.file_type() == FileMode::IFCHR
    }
}

/// newlib's `struct stat` for 32-bit x86 (`dev_t` is `short`, `ino_t`,
/// `nlink_t`, `uid_t`, `gid_t` are `unsigned short`, `mode_t` is 32-bit).
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub st_dev: i16,
    pub st_ino: u16,
    pub st_mode: u32,
    pub st_nlink: u16,
    pub st_uid: u16,
    pub st_gid: u16,
    pub st_rdev: i16,
    pub st_size: c_long,
    pub st_atime: c_long,
    pub st_spare1: c_long,
    pub st_mtime: c_long,
    pub st_spare2: c_long,
    pub st_ctime: c_long,
    pub st_spare3: c_long,
    pub st_blksize: c_long,
    pub st_blocks: c_long,
    pub st_spare4: [c_long; 2],
}

impl Stat {
    pub fn mode(&self) -> FileMode {
        FileMode::from_bits_retain(self.st_mode)
    }

    pub fn set_mode(&mut self, mode: FileMode) {
        self.st_mode = mode.bits();
    }
}

/// `struct tms`; `clock_t` is `unsigned long`.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tms {
    pub tms_utime: c_ulong,
    pub tms_stime: c_ulong,
    pub tms_cutime: c_ulong,
    pub tms_cstime: c_ulong,
}

#[cfg(all(unix, test))]
mod test {
    use super::*;

    #[test]
    fn test_file_type() {
        let mode = FileMode::from_bits_retain(0o020644);
        assert!(mode.is_char_device());
        assert_eq!(mode.file_type(), FileMode::IFCHR);

        // IFBLK shares the IFCHR bit, so containment is not enough.
        assert!(!FileMode::IFBLK.is_char_device());
        assert!(!FileMode::IFREG.is_char_device());
    }

    #[test]
    fn test_set_mode_replaces_whole_field() {
        let mut st = Stat {
            st_mode: 0o100755,
            ..Default::default()
        };
        st.set_mode(FileMode::IFCHR);
        assert_eq!(st.st_mode, 0o020000);
        assert!(st.mode().is_char_device());
    }
}
