//! MFT record parsing: the 1024-byte record buffer, its attribute stream,
//! the run-list codec, and the [`FileRecord`] output entity.

pub mod file_record;
pub mod filetime;
pub mod le_read;
pub mod mft_location;
pub mod mft_record;
pub mod mft_record_attribute;
pub mod mft_record_attribute_iter;
pub mod mft_record_attribute_non_resident_header;
pub mod mft_record_attribute_run_list;
pub mod mft_record_attribute_x10_standard_information;
pub mod mft_record_attribute_x20_attribute_list;
pub mod mft_record_attribute_x30_file_name;
pub mod mft_record_attribute_x80_data_attribute;
pub mod mft_record_header;
pub mod mft_record_parser;
pub mod mft_record_reference;
pub mod utf16;

pub use file_record::FileRecord;
pub use mft_record::MFT_RECORD_SIZE;
pub use mft_record::MftRecord;
pub use mft_record_attribute_run_list::DataRun;
pub use mft_record_parser::MftRecordParser;
pub use mft_record_reference::MftRecordReference;
