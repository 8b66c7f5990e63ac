pub mod limit_read;
