use crate::cli::command::image_args::ImageArgs;
use crate::mft::mft_record_parser::MftRecordParser;
use eyre::WrapErr;
use thousands::Separable;

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub image: ImageArgs,

    /// MFT record number to show
    pub record: u64,

    /// Absolute byte offset of the record, overriding the record number
    #[arg(long)]
    pub offset: Option<u64>,
}

impl ShowArgs {
    pub fn invoke(self) -> eyre::Result<()> {
        let (reader, geometry) = self.image.open()?;
        let offset = match self.offset {
            Some(offset) => offset,
            None => geometry
                .mft_location
                .record_offset(self.record)
                .ok_or_else(|| eyre::eyre!("record number {} overflows the image", self.record))?,
        };

        let parser = MftRecordParser::new(&reader).with_mft_location(geometry.mft_location);
        let record = parser
            .try_parse_record(offset)
            .wrap_err_with(|| format!("Record slot at offset {offset} was refused"))?;

        println!("record:     {}", record.id);
        println!(
            "name:       {} ({})",
            if record.name.is_empty() {
                "<unnamed>"
            } else {
                record.name.as_str()
            },
            record.name_namespace
        );
        println!(
            "state:      {}{}",
            if record.is_in_use() { "in use" } else { "deleted" },
            if record.is_directory() { ", directory" } else { "" },
        );
        println!("links:      {}", record.link_count);
        println!("parent:     {}", record.parent_reference);
        println!("created:    {}", record.creation_time);
        println!("modified:   {}", record.modified_time);
        println!("size:       {} bytes", record.size.separate_with_commas());
        if let Some(resident) = &record.resident_data {
            println!("data:       resident, {} bytes inline", resident.len());
        } else if record.data_runs.is_empty() {
            println!("data:       none recovered");
        } else {
            println!(
                "data:       {} runs, {} bytes allocated",
                record.data_runs.len(),
                record
                    .allocated_bytes(geometry.cluster_size)
                    .separate_with_commas()
            );
            for run in &record.data_runs {
                match run.lcn {
                    Some(lcn) => println!(
                        "            {} clusters @ LCN {}",
                        run.cluster_count, lcn
                    ),
                    None => println!("            {} clusters sparse", run.cluster_count),
                }
            }
        }
        Ok(())
    }
}
