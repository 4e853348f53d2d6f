/// Filesystem adapters for the dataset, raw reports and local state files
mod atomic;
mod csv_dataset_repository;
mod json_pipeline_state_store;
mod registry_env_file;
mod report_archive;

pub use csv_dataset_repository::CsvDatasetRepository;
pub use json_pipeline_state_store::JsonPipelineStateStore;
pub use registry_env_file::RegistryEnvFile;
pub use report_archive::FileReportArchive;
