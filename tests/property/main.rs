mod embankment;
mod idempotence;
mod segments;
mod time_zone;
