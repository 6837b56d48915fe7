pub mod feeding_record_mapper;

pub use feeding_record_mapper::FeedingRecordMapper;
