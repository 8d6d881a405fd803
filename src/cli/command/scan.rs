use crate::cli::command::image_args::ImageArgs;
use crate::scan::mft_scanner::MftScanner;
use thousands::Separable;

#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub image: ImageArgs,

    /// Scan at most this many record slots
    #[arg(long)]
    pub limit: Option<u64>,

    /// Only list records whose slots are marked free (deleted files)
    #[arg(long)]
    pub deleted_only: bool,
}

impl ScanArgs {
    pub fn invoke(self) -> eyre::Result<()> {
        let (reader, geometry) = self.image.open()?;
        let mut slots = geometry.available_slots();
        if let Some(limit) = self.limit {
            slots = slots.min(limit);
        }
        if slots == 0 {
            eyre::bail!(
                "No record slots to scan in {} (is --mft-offset correct?)",
                self.image.image.display()
            );
        }

        let records = MftScanner::new(&reader)
            .with_mft_location(geometry.mft_location)
            .scan(slots);

        println!(
            "{:>8}  {:>5}  {:>4}  {:>15}  {:>19}  NAME",
            "RECORD", "STATE", "KIND", "SIZE", "MODIFIED"
        );
        let mut shown = 0usize;
        for record in &records {
            if self.deleted_only && record.is_in_use() {
                continue;
            }
            println!(
                "{:>8}  {:>5}  {:>4}  {:>15}  {:>19}  {}",
                record.id,
                if record.is_in_use() { "live" } else { "del" },
                if record.is_directory() { "dir" } else { "file" },
                record.size.separate_with_commas(),
                record.modified_time.to_string(),
                if record.name.is_empty() {
                    "<unnamed>"
                } else {
                    record.name.as_str()
                },
            );
            shown += 1;
        }
        println!(
            "{} candidates ({} shown)",
            records.len().separate_with_commas(),
            shown.separate_with_commas()
        );
        Ok(())
    }
}
