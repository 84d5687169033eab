pub mod media;
pub mod record;
