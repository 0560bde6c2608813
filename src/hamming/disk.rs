use super::matrix::CostMatrix;
use super::store::Store;
use std::path::PathBuf;
use std::sync::Arc;

/// Filesystem store. One file per node count, so entries
/// outlive the process and are shared by every process
/// pointed at the same directory.
#[derive(Debug, Clone)]
pub struct Disk {
    dir: PathBuf,
}

impl Disk {
    const VERSION: u32 = 1;

    /// store rooted at `REPERTOIRE_CACHE_DIR`, or `./cache` if unset
    pub fn from_env() -> Self {
        std::env::var(crate::CACHE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(crate::CACHE_DIR_DEFAULT))
            .into()
    }
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
    /// path to file on disk
    pub fn path(&self, n: usize) -> PathBuf {
        self.dir.join(format!("hamming.{}.bin", n))
    }
    /// signature header, in the spirit of PGCOPY
    fn header() -> &'static [u8] {
        b"HAMMING\n\xFF\r\n\0"
    }
    /// signature footer to signal end of binary file
    fn footer() -> u16 {
        0xFFFF
    }

    fn read(&self, n: usize) -> anyhow::Result<CostMatrix> {
        use byteorder::BE;
        use byteorder::ReadBytesExt;
        use std::fs::File;
        use std::io::BufReader;
        use std::io::Read;
        let ref mut reader = BufReader::new(File::open(self.path(n))?);
        let ref mut header = vec![0u8; Self::header().len()];
        reader.read_exact(header)?;
        if header.as_slice() != Self::header() {
            anyhow::bail!("bad header");
        }
        let version = reader.read_u32::<BE>()?;
        if version != Self::VERSION {
            anyhow::bail!("unknown version {}", version);
        }
        let stored = reader.read_u32::<BE>()? as usize;
        if stored != n {
            anyhow::bail!("file holds {} nodes, expected {}", stored, n);
        }
        let length = reader.read_u64::<BE>()? as usize;
        if length != 1usize << (2 * n) {
            anyhow::bail!("file holds {} costs for {} nodes", length, n);
        }
        let mut costs = vec![0u8; length];
        reader.read_exact(&mut costs)?;
        if reader.read_u16::<BE>()? != Self::footer() {
            anyhow::bail!("missing footer");
        }
        CostMatrix::from_raw(n, costs)
    }

    fn write(&self, matrix: &CostMatrix) -> anyhow::Result<()> {
        use byteorder::BE;
        use byteorder::WriteBytesExt;
        use std::fs::File;
        use std::io::BufWriter;
        use std::io::Write;
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path(matrix.n());
        let temp = path.with_extension(format!("{:016x}.tmp", rand::random::<u64>()));
        {
            let ref mut file = BufWriter::new(File::create(&temp)?);
            file.write_all(Self::header())?;
            file.write_u32::<BE>(Self::VERSION)?;
            file.write_u32::<BE>(matrix.n() as u32)?;
            file.write_u64::<BE>(matrix.raw().len() as u64)?;
            file.write_all(matrix.raw())?;
            file.write_u16::<BE>(Self::footer())?;
            file.flush()?;
        }
        // concurrent writers produce identical bytes, last rename wins
        std::fs::rename(&temp, &path).inspect_err(|_| {
            let _ = std::fs::remove_file(&temp);
        })?;
        Ok(())
    }
}

impl From<PathBuf> for Disk {
    fn from(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl Store for Disk {
    fn name(&self) -> String {
        format!("disk:{}", self.dir.display())
    }
    fn get(&self, n: usize) -> Option<Arc<CostMatrix>> {
        if !self.done(n) {
            return None;
        }
        match self.read(n) {
            Ok(matrix) => Some(Arc::new(matrix)),
            Err(e) => {
                log::warn!("{:<32}{:<16}{}", "unreadable hamming cache", n, e);
                None
            }
        }
    }
    fn put(&self, matrix: &Arc<CostMatrix>) -> anyhow::Result<()> {
        log::debug!(
            "{:<32}{:<16}{}",
            "saving hamming matrix",
            matrix.n(),
            self.path(matrix.n()).display()
        );
        self.write(matrix)
    }
    /// check if file exists on disk. says nothing about whether it is readable.
    fn done(&self, n: usize) -> bool {
        std::fs::metadata(self.path(n)).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> Disk {
        std::env::temp_dir()
            .join(format!("repertoire-disk-{:016x}", rand::random::<u64>()))
            .into()
    }

    #[test]
    fn persists_across_instances() {
        let disk = scratch();
        let matrix = Arc::new(CostMatrix::compute(4));
        assert!(disk.get(4).is_none());
        disk.put(&matrix).unwrap();
        let reopened = Disk::from(disk.dir().clone());
        assert!(reopened.done(4));
        assert_eq!(reopened.get(4), Some(matrix));
        std::fs::remove_dir_all(disk.dir()).unwrap();
    }

    #[test]
    fn corrupt_file_is_a_miss() {
        let disk = scratch();
        std::fs::create_dir_all(disk.dir()).unwrap();
        std::fs::write(disk.path(3), b"garbage").unwrap();
        assert!(disk.done(3));
        assert!(disk.get(3).is_none());
        disk.put(&Arc::new(CostMatrix::compute(3))).unwrap();
        assert_eq!(disk.get(3).as_deref(), Some(&CostMatrix::compute(3)));
        std::fs::remove_dir_all(disk.dir()).unwrap();
    }
}
