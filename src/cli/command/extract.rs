use crate::cli::command::image_args::ImageArgs;
use crate::mft::mft_record_parser::MftRecordParser;
use crate::read::range_reader::read_range;
use eyre::WrapErr;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use thousands::Separable;
use tracing::info;
use tracing::warn;

const CHUNK_SIZE: usize = 1024 * 1024;

#[derive(clap::Args, Debug)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub image: ImageArgs,

    /// MFT record number of the file to recover
    pub record: u64,

    /// Where to write the recovered contents
    pub output: PathBuf,
}

impl ExtractArgs {
    pub fn invoke(self) -> eyre::Result<()> {
        let (reader, geometry) = self.image.open()?;
        let offset = geometry
            .mft_location
            .record_offset(self.record)
            .ok_or_else(|| eyre::eyre!("record number {} overflows the image", self.record))?;

        let parser = MftRecordParser::new(&reader).with_mft_location(geometry.mft_location);
        let record = parser
            .try_parse_record(offset)
            .wrap_err_with(|| format!("Record slot at offset {offset} was refused"))?;
        if record.is_directory() {
            eyre::bail!("record {} is a directory, not a file", self.record);
        }
        if record.resident_data.is_none() && record.data_runs.is_empty() && record.size > 0 {
            warn!(
                "record {} has no recoverable extents; output will be {} zero bytes",
                self.record, record.size
            );
        }

        let mut output = File::create(&self.output)
            .wrap_err_with(|| format!("Failed to create {}", self.output.display()))?;
        let mut buf = vec![0u8; CHUNK_SIZE.min(record.size.max(1) as usize)];
        let mut position: u64 = 0;
        while position < record.size {
            let take = ((record.size - position) as usize).min(CHUNK_SIZE);
            read_range(
                &reader,
                &record,
                position,
                &mut buf[..take],
                geometry.cluster_size,
            )
            .wrap_err_with(|| format!("Failed reading file bytes at offset {position}"))?;
            output
                .write_all(&buf[..take])
                .wrap_err_with(|| format!("Failed writing {}", self.output.display()))?;
            position += take as u64;
        }

        info!(
            "Recovered {} bytes from record {} into {}",
            record.size.separate_with_commas(),
            self.record,
            self.output.display()
        );
        Ok(())
    }
}
