use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::Path,
};

/// Write samples to `path`, replacing the file if it exists
pub fn write_volume<P>(path: P, samples: &[u8]) -> Result<(), std::io::Error>
where
    P: AsRef<Path>,
{
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    let mut writer = BufWriter::new(file);
    writer.write_all(samples)?;
    writer.flush()
}
