//! Synthetic archives for tests.
//!
//! The builders write byte-exact RAR4 and RAR5 header chains with opaque
//! payload bytes in place of compressed data. Header CRCs are left zero;
//! the engines surface them but never verify them.

use crate::formats::Signature;

const RAR4_END: [u8; 7] = [0xC4, 0x3D, 0x7B, 0x00, 0x40, 0x07, 0x00];

/// Encode a RAR5 vint.
pub fn vint(mut value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return out;
        }
        out.push(byte | 0x80);
    }
}

/// Pack a calendar time into DOS `(time, date)` words.
pub fn dos(year: u16, month: u16, day: u16, hour: u16, minute: u16, second: u16) -> (u16, u16) {
    let time = (hour << 11) | (minute << 5) | (second / 2);
    let date = ((year - 1980) << 9) | (month << 5) | day;
    (time, date)
}

/// One RAR4 FILE_HEAD block.
#[derive(Debug, Clone)]
pub struct Rar4File {
    pub name: Vec<u8>,
    pub flags: u16,
    pub host_os: u8,
    pub crc: u32,
    pub dos_time: (u16, u16),
    pub unpack_version: u8,
    pub method: u8,
    pub attributes: u32,
    pub unpacked_size: u64,
    /// High halves of the packed size, written with 0x100.
    pub high_packed: u32,
    pub salt: Option<[u8; 8]>,
    pub ext_time: Option<Vec<u8>>,
    pub data: Vec<u8>,
}

impl Rar4File {
    pub fn new(name: &str, data: &[u8]) -> Self {
        Self {
            name: name.as_bytes().to_vec(),
            flags: 0,
            host_os: 2,
            crc: 0,
            dos_time: dos(2023, 5, 30, 9, 30, 0),
            unpack_version: 29,
            method: 0x30,
            attributes: 0x20,
            unpacked_size: data.len() as u64,
            high_packed: 0,
            salt: None,
            ext_time: None,
            data: data.to_vec(),
        }
    }

    pub fn crc(mut self, crc: u32) -> Self {
        self.crc = crc;
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags |= flags;
        self
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut flags = self.flags | 0x8000;
        let high_unpacked = (self.unpacked_size >> 32) as u32;
        if high_unpacked != 0 || self.high_packed != 0 {
            flags |= 0x0100;
        }
        if self.salt.is_some() {
            flags |= 0x0400;
        }
        if self.ext_time.is_some() {
            flags |= 0x1000;
        }

        let mut body = Vec::new();
        body.extend_from_slice(&(self.unpacked_size as u32).to_le_bytes());
        body.push(self.host_os);
        body.extend_from_slice(&self.crc.to_le_bytes());
        body.extend_from_slice(&self.dos_time.0.to_le_bytes());
        body.extend_from_slice(&self.dos_time.1.to_le_bytes());
        body.push(self.unpack_version);
        body.push(self.method);
        body.extend_from_slice(&(self.name.len() as u16).to_le_bytes());
        body.extend_from_slice(&self.attributes.to_le_bytes());
        if flags & 0x0100 != 0 {
            body.extend_from_slice(&self.high_packed.to_le_bytes());
            body.extend_from_slice(&high_unpacked.to_le_bytes());
        }
        body.extend_from_slice(&self.name);
        if let Some(salt) = &self.salt {
            body.extend_from_slice(salt);
        }
        if let Some(ext) = &self.ext_time {
            body.extend_from_slice(ext);
        }

        let mut out = vec![0x00, 0x00, 0x74];
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&((11 + body.len()) as u16).to_le_bytes());
        out.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        out.extend_from_slice(&body);
        out.extend_from_slice(&self.data);
        out
    }
}

/// RAR4 archive: signature, MAIN_HEAD, blocks, ENDARC_HEAD.
#[derive(Debug, Clone)]
pub struct Rar4Builder {
    bytes: Vec<u8>,
}

impl Default for Rar4Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Rar4Builder {
    pub fn new() -> Self {
        let mut bytes = Signature::RAR15.to_vec();
        bytes.extend_from_slice(&[0xCF, 0x90, 0x73, 0x00, 0x00, 0x0D, 0x00]);
        bytes.extend_from_slice(&[0x00; 6]);
        Self { bytes }
    }

    pub fn file(mut self, file: &Rar4File) -> Self {
        self.bytes.extend(file.encode());
        self
    }

    /// Append raw block bytes.
    pub fn raw(mut self, block: &[u8]) -> Self {
        self.bytes.extend_from_slice(block);
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.bytes.extend_from_slice(&RAR4_END);
        self.bytes
    }

    /// Archive bytes without an end marker.
    pub fn unterminated(self) -> Vec<u8> {
        self.bytes
    }
}

/// One RAR5 file or service header.
#[derive(Debug, Clone)]
pub struct Rar5File {
    pub header_type: u64,
    pub name: Vec<u8>,
    pub directory: bool,
    pub unpacked_size: u64,
    pub attributes: u64,
    pub mtime: Option<u32>,
    pub crc: Option<u32>,
    pub compression: u64,
    pub host_os: u64,
    pub extra: Vec<u8>,
    pub data: Vec<u8>,
}

impl Rar5File {
    pub fn new(name: &str, data: &[u8]) -> Self {
        Self {
            header_type: 2,
            name: name.as_bytes().to_vec(),
            directory: false,
            unpacked_size: data.len() as u64,
            attributes: 0x20,
            mtime: None,
            crc: None,
            compression: 0,
            host_os: 1,
            extra: Vec::new(),
            data: data.to_vec(),
        }
    }

    pub fn directory(name: &str) -> Self {
        Self {
            directory: true,
            attributes: 0x10,
            ..Self::new(name, b"")
        }
    }

    pub fn service(name: &str, data: &[u8]) -> Self {
        Self {
            header_type: 3,
            attributes: 0,
            ..Self::new(name, data)
        }
    }

    pub fn crc(mut self, crc: u32) -> Self {
        self.crc = Some(crc);
        self
    }

    pub fn mtime(mut self, unix: u32) -> Self {
        self.mtime = Some(unix);
        self
    }

    /// Append a high precision time record holding a FILETIME mtime.
    pub fn filetime(mut self, raw: u64) -> Self {
        self.extra.extend(vint(10));
        self.extra.extend_from_slice(&[0x03, 0x02]);
        self.extra.extend_from_slice(&raw.to_le_bytes());
        self
    }

    /// Append an arbitrary extra record.
    pub fn extra_record(mut self, record_type: u64, data: &[u8]) -> Self {
        let record_type = vint(record_type);
        self.extra.extend(vint((record_type.len() + data.len()) as u64));
        self.extra.extend(record_type);
        self.extra.extend_from_slice(data);
        self
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut header_flags = 0u64;
        if !self.extra.is_empty() {
            header_flags |= 0x0001;
        }
        if !self.data.is_empty() {
            header_flags |= 0x0002;
        }

        let mut file_flags = 0u64;
        if self.directory {
            file_flags |= 0x0001;
        }
        if self.mtime.is_some() {
            file_flags |= 0x0002;
        }
        if self.crc.is_some() {
            file_flags |= 0x0004;
        }

        let mut body = vint(self.header_type);
        body.extend(vint(header_flags));
        if !self.extra.is_empty() {
            body.extend(vint(self.extra.len() as u64));
        }
        if !self.data.is_empty() {
            body.extend(vint(self.data.len() as u64));
        }
        body.extend(vint(file_flags));
        body.extend(vint(self.unpacked_size));
        body.extend(vint(self.attributes));
        if let Some(mtime) = self.mtime {
            body.extend_from_slice(&mtime.to_le_bytes());
        }
        if let Some(crc) = self.crc {
            body.extend_from_slice(&crc.to_le_bytes());
        }
        body.extend(vint(self.compression));
        body.extend(vint(self.host_os));
        body.extend(vint(self.name.len() as u64));
        body.extend_from_slice(&self.name);
        body.extend_from_slice(&self.extra);

        let mut out = rar5_header(&body);
        out.extend_from_slice(&self.data);
        out
    }
}

/// Prefix a RAR5 header body (type onwards) with a zero CRC and its size.
pub fn rar5_header(body: &[u8]) -> Vec<u8> {
    let mut out = vec![0x00; 4];
    out.extend(vint(body.len() as u64));
    out.extend_from_slice(body);
    out
}

/// RAR5 archive: signature, main header, headers, end of archive.
#[derive(Debug, Clone)]
pub struct Rar5Builder {
    bytes: Vec<u8>,
}

impl Default for Rar5Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Rar5Builder {
    pub fn new() -> Self {
        Self::with_archive_flags(0)
    }

    pub fn with_archive_flags(flags: u64) -> Self {
        let mut bytes = Signature::RAR50.to_vec();
        let mut body = vec![0x01, 0x00];
        body.extend(vint(flags));
        bytes.extend(rar5_header(&body));
        Self { bytes }
    }

    pub fn file(mut self, file: &Rar5File) -> Self {
        self.bytes.extend(file.encode());
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.bytes.extend(rar5_header(&[0x05, 0x00, 0x00]));
        self.bytes
    }

    pub fn unterminated(self) -> Vec<u8> {
        self.bytes
    }
}

/// Two stored files made on Windows.
pub fn rar4_reference() -> Vec<u8> {
    Rar4Builder::new()
        .file(&Rar4File::new("test.txt", b"hello world").crc(0x261D_AEE5))
        .file(&Rar4File::new("test2.txt", b"second file").crc(0x7A2B_1C3D))
        .finish()
}

/// One file made on a Unix host.
pub fn rar5_unix_reference() -> Vec<u8> {
    Rar5Builder::new()
        .file(
            &Rar5File::new("testfile.txt", b"hello\n")
                .crc(0x6EC1_8FFE)
                .mtime(1_685_433_390),
        )
        .finish()
}

/// A directory with two files with multibyte names, made on Windows with
/// FILETIME extra records.
pub fn rar5_china_win_reference() -> Vec<u8> {
    let filetime = |unix: u64| 116_444_736_000_000_000 + unix * 10_000_000 + 4_321_000;
    let windows = |file: Rar5File| Rar5File { host_os: 0, ..file };

    Rar5Builder::new()
        .file(&windows(Rar5File::directory("test2").filetime(filetime(1_685_433_300))))
        .file(&windows(
            Rar5File::new("test2/很好。.txt", "很好。".as_bytes())
                .crc(0x10F2_8531)
                .filetime(filetime(1_685_433_390)),
        ))
        .file(&windows(
            Rar5File::new("test2/祝你一天过得愉快。.txt", b"twelve bytes")
                .crc(0xE3C9_4841)
                .filetime(filetime(1_685_433_336)),
        ))
        .finish()
}
